//! FHIR complex data types shared by several resources.

use crate::resources::{Resource, ResourceType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-owning pointer from one resource to another, in `Type/id` form.
///
/// Section entries in a [`crate::Composition`] are references; several references may point at
/// the same resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Literal reference, for example `Condition/42`.
    pub reference: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Builds a reference from a resource kind and id.
    pub fn new(resource_type: ResourceType, id: impl AsRef<str>) -> Self {
        Self {
            reference: format!("{}/{}", resource_type, id.as_ref()),
            display: None,
        }
    }

    /// Builds a reference pointing at `resource` using the id it already carries.
    pub fn to(resource: &Resource) -> Self {
        Self::new(resource.resource_type(), resource.id())
    }

    /// Attaches a human-readable display string.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Returns the id portion of the reference (after the last `/`).
    pub fn id(&self) -> &str {
        self.reference
            .rsplit_once('/')
            .map(|(_, id)| id)
            .unwrap_or(&self.reference)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

/// A business identifier (system namespace plus value).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A single code from a code system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept expressed as zero or more codings and/or free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// A concept carrying only free text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Returns true if neither codings nor text are present.
    pub fn is_empty(&self) -> bool {
        self.coding.is_empty() && self.text.is_none()
    }
}

/// A time range; either bound may be open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A measured amount with units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Purpose-tagged human name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,
}

/// Postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Administrative gender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Condition;

    #[test]
    fn reference_to_uses_type_and_id() {
        let resource = Resource::Condition(Condition {
            id: "17".into(),
            ..Default::default()
        });

        let reference = Reference::to(&resource);

        assert_eq!(reference.reference, "Condition/17");
        assert_eq!(reference.id(), "17");
        assert_eq!(reference.to_string(), "Condition/17");
    }

    #[test]
    fn reference_id_without_type_prefix() {
        let reference = Reference {
            reference: "bare".into(),
            display: None,
        };

        assert_eq!(reference.id(), "bare");
    }

    #[test]
    fn reference_display_is_optional_on_the_wire() {
        let plain = serde_json::to_value(Reference::new(ResourceType::Patient, "p")).unwrap();
        assert!(plain.get("display").is_none());

        let named = Reference::new(ResourceType::Patient, "p").with_display("Jane Doe");
        let value = serde_json::to_value(named).unwrap();
        assert_eq!(value["display"], "Jane Doe");
    }

    #[test]
    fn address_uses_camel_case_names() {
        let address = Address {
            postal_code: Some("97006".into()),
            ..Default::default()
        };

        let value = serde_json::to_value(address).unwrap();
        assert_eq!(value["postalCode"], "97006");
    }

    #[test]
    fn codeable_concept_emptiness() {
        assert!(CodeableConcept::default().is_empty());
        assert!(!CodeableConcept::text("Penicillin").is_empty());
    }
}
