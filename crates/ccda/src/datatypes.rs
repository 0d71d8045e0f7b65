//! CDA data types.
//!
//! Simplified wire representations of the HL7 v3 data types that appear in C-CDA documents.
//! Only the attributes the transformer reads are modelled.
//!
//! Key types:
//! - [`InstanceIdentifier`]: `II`, an OID or UUID root with optional extension.
//! - [`CodedValue`]: `CD`/`CE`, a code within a code system (identified by OID).
//! - [`TimeInterval`]: `IVL_TS`, a point in time or a low/high interval of `TS` strings.
//! - [`ObservationValue`]: the `xsi:type`-discriminated value of an observation.

use serde::{Deserialize, Serialize};

/// `II`: a globally unique instance identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceIdentifier {
    /// OID or UUID naming the identifier namespace (or, alone, the instance itself).
    pub root: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// `CD`/`CE`: a coded concept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodedValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Code system OID, for example `2.16.840.1.113883.6.1` for LOINC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_system: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

/// `IVL_TS`: either a single `value` or a `low`/`high` pair of CDA timestamps.
///
/// Timestamps are kept as their CDA text (`YYYYMMDD[HHMM[SS[.S]]][+/-ZZZZ]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeInterval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
}

impl TimeInterval {
    /// The point value if present, otherwise the low bound.
    pub fn start(&self) -> Option<&str> {
        self.value.as_deref().or(self.low.as_deref())
    }
}

/// `PQ`: a physical quantity with UCUM unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicalQuantity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Observation value, discriminated the way `xsi:type` discriminates it in CDA.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObservationValue {
    /// `PQ`
    Pq {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// `CD`
    Cd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code_system: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    /// `ST`
    St { text: String },
}

/// `PN`: a person name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonName {
    /// CDA name use code (`L` legal, `P` pseudonym, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,
}

/// `AD`: a postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// CDA address use code (`HP` primary home, `WP` work place, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_code: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub street_address_lines: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
