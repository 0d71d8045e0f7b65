//! Clinical acts, organizers and observations found inside sections.
//!
//! Each section variant owns one kind of top-level act. Some acts are organizers whose
//! clinically meaningful content sits one level deeper (for example a result organizer and its
//! result observations).

use crate::datatypes::{
    CodedValue, InstanceIdentifier, ObservationValue, PersonName, PhysicalQuantity, TimeInterval,
};
use serde::{Deserialize, Serialize};

/// A performer or other assigned participant (`assignedEntity`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignedEntity {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
}

// ============================================================================
// Allergies
// ============================================================================

/// Allergy concern act wrapping one or more allergy observations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllergyProblemAct {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergy_observations: Vec<AllergyObservation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllergyObservation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    /// The causative agent (participant playing entity code).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substance: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodedValue>,
}

// ============================================================================
// Problems
// ============================================================================

/// Problem concern act wrapping one or more problem observations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemConcernAct {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problem_observations: Vec<ProblemObservation>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemObservation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    /// The diagnosis itself (observation value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    /// Value of the nested problem status observation (`active`, `resolved`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_status: Option<CodedValue>,
}

// ============================================================================
// Medications and immunizations
// ============================================================================

/// Medication activity (`substanceAdministration` in the medications section).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicationActivity {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose_quantity: Option<PhysicalQuantity>,

    /// Manufactured material code of the consumable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumable: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Immunization activity (`substanceAdministration` in the immunizations section).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstanceAdministration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    /// `negationInd="true"` means the vaccine was not given.
    #[serde(default)]
    pub negation_ind: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumable: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performers: Vec<AssignedEntity>,
}

// ============================================================================
// Procedures
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcedureActivityProcedure {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performers: Vec<AssignedEntity>,
}

// ============================================================================
// Results and vital signs
// ============================================================================

/// An observation with a typed value, shared by result and vital sign observations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservationAct {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ObservationValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation_code: Option<CodedValue>,
}

pub type ResultObservation = ObservationAct;
pub type VitalSignObservation = ObservationAct;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultOrganizer {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result_observations: Vec<ResultObservation>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VitalSignsOrganizer {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<TimeInterval>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vital_sign_observations: Vec<VitalSignObservation>,
}

// ============================================================================
// Family history
// ============================================================================

/// The relative a family history organizer is about.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelatedSubject {
    /// Relationship code (role code system), for example `FTH` for father.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_code: Option<CodedValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyHistoryObservation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_at_onset: Option<PhysicalQuantity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyHistoryOrganizer {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_subject: Option<RelatedSubject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_history_observations: Vec<FamilyHistoryObservation>,
}
