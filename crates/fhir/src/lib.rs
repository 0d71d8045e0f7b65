//! FHIR target model for transformed clinical documents.
//!
//! This crate provides the **resource model** that the transformer produces, plus
//! **render/parse helpers** for the JSON and YAML forms of a bundle:
//! - [`Resource`] and its kind tag [`ResourceType`]
//! - [`Bundle`] and [`BundleEntry`]
//! - [`Composition`] with its [`CompositionSection`] list of [`Reference`] links
//!
//! This crate focuses on:
//! - FHIR semantic alignment (field names, `resourceType` tagging, camelCase)
//! - serialisation/deserialisation
//!
//! It does not validate resources against profiles; resources are carried as produced.

pub mod bundle;
pub mod datatypes;
pub mod resources;

// Re-export facades
pub use bundle::{Bundle, BundleEntry, BundleType};
pub use datatypes::{
    Address, AdministrativeGender, CodeableConcept, Coding, HumanName, Identifier, Period,
    Quantity, Reference,
};
pub use resources::{
    AllergyIntolerance, AllergyReaction, Composition, CompositionSection, CompositionStatus,
    Condition, Dosage, FamilyMemberCondition, FamilyMemberHistory, Immunization, Medication,
    MedicationStatement, Observation, Patient, Practitioner, Procedure, ProcedurePerformer,
    Resource, ResourceType,
};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Render a bundle as pretty-printed FHIR JSON.
///
/// # Errors
///
/// Returns [`FhirError::InvalidJson`] if serialisation fails.
pub fn render_bundle_json(bundle: &Bundle) -> FhirResult<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

/// Render a bundle as YAML, using the same field names as the JSON form.
///
/// # Errors
///
/// Returns [`FhirError::InvalidYaml`] if serialisation fails.
pub fn render_bundle_yaml(bundle: &Bundle) -> FhirResult<String> {
    Ok(serde_yaml::to_string(bundle)?)
}

/// Parse a bundle from FHIR JSON text.
///
/// Uses `serde_path_to_error` so that schema mismatches report the failing path
/// (for example `entry[3].resource.subject`).
///
/// # Errors
///
/// Returns [`FhirError::Translation`] if the JSON does not match the bundle model, or
/// [`FhirError::InvalidInput`] if `resourceType` is not `Bundle`.
pub fn parse_bundle_json(json_text: &str) -> FhirResult<Bundle> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    let bundle: Bundle = match serde_path_to_error::deserialize(&mut deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(FhirError::Translation(format!(
                "Bundle schema mismatch at {path}: {source}"
            )));
        }
    };

    if bundle.resource_type != "Bundle" {
        return Err(FhirError::InvalidInput(format!(
            "Expected resourceType 'Bundle', got '{}'",
            bundle.resource_type
        )));
    }

    Ok(bundle)
}
