//! Document header and root.

use crate::datatypes::{Address, CodedValue, InstanceIdentifier, PersonName};
use crate::sections::Section;
use serde::{Deserialize, Serialize};

/// A parsed Continuity of Care Document: header metadata plus ordered sections.
///
/// The transformer only ever reads this tree; it is owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicalDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<InstanceIdentifier>,

    /// Document type code, for example LOINC `34133-9`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Creation time as CDA `TS` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidentiality_code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,

    /// The patient the document is about.
    #[serde(default)]
    pub record_target: PatientRole,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

/// `recordTarget/patientRole`, flattened with its `patient` person.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientRole {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<PersonName>,

    /// Administrative gender (`M`, `F`, `UN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_code: Option<CodedValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
}

/// `author/assignedAuthor`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<InstanceIdentifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<PersonName>,
}
