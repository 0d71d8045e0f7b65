//! FHIR resources produced by the document transformer.
//!
//! [`Resource`] is a closed sum type tagged on the wire by `resourceType`. Its runtime kind,
//! [`ResourceType`], is what section linking compares against: a section links exactly the
//! resources whose kind equals the section's primary kind.

use crate::datatypes::{
    Address, AdministrativeGender, CodeableConcept, HumanName, Identifier, Period, Quantity,
    Reference,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares the resource kinds once and derives [`ResourceType`], [`Resource`] and the
/// per-kind `From` conversions from that single list.
macro_rules! resource_kinds {
    ($($kind:ident),+ $(,)?) => {
        /// Field-less kind tag of a [`Resource`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ResourceType {
            $($kind,)+
        }

        impl ResourceType {
            /// FHIR name of this kind, as used in `resourceType` and in references.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ResourceType::$kind => stringify!($kind),)+
                }
            }
        }

        /// A produced FHIR resource.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "resourceType")]
        pub enum Resource {
            $($kind($kind),)+
        }

        impl Resource {
            /// Runtime kind of this resource.
            pub fn resource_type(&self) -> ResourceType {
                match self {
                    $(Resource::$kind(_) => ResourceType::$kind,)+
                }
            }

            /// Logical id assigned when the resource was created.
            pub fn id(&self) -> &str {
                match self {
                    $(Resource::$kind(r) => &r.id,)+
                }
            }
        }

        $(
            impl From<$kind> for Resource {
                fn from(resource: $kind) -> Self {
                    Resource::$kind(resource)
                }
            }
        )+
    };
}

resource_kinds!(
    Composition,
    Patient,
    Practitioner,
    AllergyIntolerance,
    Condition,
    Medication,
    MedicationStatement,
    Immunization,
    Procedure,
    Observation,
    FamilyMemberHistory,
);

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Document root
// ============================================================================

/// Workflow status of a composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionStatus {
    Preliminary,
    #[default]
    Final,
    Amended,
    #[serde(rename = "entered-in-error")]
    EnteredInError,
}

/// The document-root resource. Always entry 0 of a document bundle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(default)]
    pub status: CompositionStatus,

    #[serde(rename = "type", default)]
    pub type_: CodeableConcept,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidentiality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub subject: Reference,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<CompositionSection>,
}

/// One output section of a composition. Grows by reference only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<Reference>,
}

// ============================================================================
// Participants
// ============================================================================

/// The subject of record. Always entry 1 of a document bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,
}

// ============================================================================
// Clinical resources
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyReaction {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifestation: Vec<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyIntolerance {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub patient: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substance: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reaction: Vec<AllergyReaction>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub patient: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abatement_date_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dosage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub patient: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub medication_reference: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dosage: Vec<Dosage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub patient: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine_code: Option<CodeableConcept>,

    #[serde(default)]
    pub was_not_given: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedurePerformer {
    pub actor: Reference,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub subject: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performed_period: Option<Period>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performer: Vec<ProcedurePerformer>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub subject: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_codeable_concept: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<CodeableConcept>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberCondition {
    pub code: CodeableConcept,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onset_string: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberHistory {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default)]
    pub patient: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodeableConcept>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub condition: Vec<FamilyMemberCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_matches_variant() {
        let resource: Resource = Observation {
            id: "o1".into(),
            ..Default::default()
        }
        .into();

        assert_eq!(resource.resource_type(), ResourceType::Observation);
        assert_eq!(resource.id(), "o1");
    }

    #[test]
    fn resource_type_names_are_fhir_names() {
        assert_eq!(ResourceType::AllergyIntolerance.as_str(), "AllergyIntolerance");
        assert_eq!(
            ResourceType::FamilyMemberHistory.to_string(),
            "FamilyMemberHistory"
        );
    }

    #[test]
    fn serialises_with_resource_type_tag() {
        let resource = Resource::Immunization(Immunization {
            id: "i1".into(),
            was_not_given: true,
            ..Default::default()
        });

        let value = serde_json::to_value(&resource).unwrap();

        assert_eq!(value["resourceType"], "Immunization");
        assert_eq!(value["id"], "i1");
        assert_eq!(value["wasNotGiven"], true);
        assert!(value.get("vaccineCode").is_none());
    }

    #[test]
    fn composition_type_field_is_named_type() {
        let composition = Composition {
            id: "c".into(),
            type_: CodeableConcept::text("Continuity of Care Document"),
            ..Default::default()
        };

        let value = serde_json::to_value(Resource::from(composition)).unwrap();

        assert_eq!(value["type"]["text"], "Continuity of Care Document");
        assert_eq!(value["status"], "final");
        assert!(value.get("section").is_none());
    }

    #[test]
    fn deserialises_by_resource_type() {
        let json = r#"{"resourceType":"Procedure","id":"p9","subject":{"reference":"Patient/1"}}"#;

        let resource: Resource = serde_json::from_str(json).unwrap();

        match resource {
            Resource::Procedure(procedure) => {
                assert_eq!(procedure.id, "p9");
                assert_eq!(procedure.subject.reference, "Patient/1");
            }
            other => panic!("expected Procedure, got {other:?}"),
        }
    }
}
