//! C-CDA wire/boundary support.
//!
//! This crate holds the source side of the transformation: an already-parsed Continuity of Care
//! Document as a typed object tree (header plus an ordered list of typed sections), and
//! helpers to read that tree from YAML or JSON.
//!
//! Clinical meaning is not interpreted here. Mapping the tree onto FHIR resources lives in
//! `c2f-core`; this crate handles structure and serialisation only.

pub mod acts;
pub mod datatypes;
pub mod document;
pub mod sections;

pub use acts::{
    AllergyObservation, AllergyProblemAct, AssignedEntity, FamilyHistoryObservation,
    FamilyHistoryOrganizer, MedicationActivity, ObservationAct, ProblemConcernAct,
    ProblemObservation, ProcedureActivityProcedure, RelatedSubject, ResultObservation,
    ResultOrganizer, SubstanceAdministration, VitalSignObservation, VitalSignsOrganizer,
};
pub use datatypes::{
    Address, CodedValue, InstanceIdentifier, ObservationValue, PersonName, PhysicalQuantity,
    TimeInterval,
};
pub use document::{Author, ClinicalDocument, PatientRole};
pub use sections::{
    AllergiesSection, FamilyHistorySection, ImmunizationsSection, MedicationsSection,
    NarrativeSection, ProblemSection, ProceduresSection, ResultsSection, Section, SectionHeader,
    SectionKind, VitalSignsSection,
};

use thiserror::Error;

/// Errors returned by the `ccda` boundary crate.
#[derive(Debug, Error)]
pub enum CcdaError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`CcdaError`].
pub type CcdaResult<T> = Result<T, CcdaError>;

/// Read a clinical document tree from YAML.
///
/// This uses `serde_path_to_error` to surface a best-effort "path"
/// (e.g. `sections[2].allergy_problem_acts[0].ids`) to the failing field.
///
/// # Errors
///
/// Returns [`CcdaError::Translation`] if the YAML does not match the document model.
pub fn read_document_yaml(yaml_text: &str) -> CcdaResult<ClinicalDocument> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
    serde_path_to_error::deserialize(deserializer).map_err(schema_mismatch)
}

/// Read a clinical document tree from JSON.
///
/// # Errors
///
/// Returns [`CcdaError::Translation`] if the JSON does not match the document model.
pub fn read_document_json(json_text: &str) -> CcdaResult<ClinicalDocument> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(schema_mismatch)
}

/// Write a clinical document tree as YAML.
///
/// # Errors
///
/// Returns [`CcdaError::InvalidYaml`] if serialisation fails.
pub fn write_document_yaml(document: &ClinicalDocument) -> CcdaResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

fn schema_mismatch<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> CcdaError {
    let path = err.path().to_string();
    let message = err.into_inner().to_string();
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };

    // serde_yaml already prefixes its message with the (possibly deeper) path.
    let (path, message) = match message.split_once(": ") {
        Some((head, rest)) if head.starts_with(path.as_str()) => {
            (head.to_string(), rest.to_string())
        }
        _ => (path, message),
    };
    CcdaError::Translation(format!("document schema mismatch at {path}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
id:
  root: 2.16.840.1.113883.19.5.99999.1
  extension: TT988
code:
  code: 34133-9
  code_system: 2.16.840.1.113883.6.1
  display_name: Summarization of Episode Note
title: Community Health and Hospitals Health Summary
effective_time: "20120912000000-0400"
record_target:
  ids:
    - root: 2.16.840.1.113883.19.5.99999.2
      extension: "998991"
  names:
    - given: [Isabella, Isa]
      family: Jones
  gender_code:
    code: F
    code_system: 2.16.840.1.113883.5.1
  birth_time: "19750501"
sections:
  - kind: allergies
    header:
      title: Allergies
    allergy_problem_acts:
      - ids:
          - root: 36e3e930-7b14-11db-9fe1-0800200c9a66
        status_code: active
        allergy_observations:
          - substance:
              code: "70618"
              code_system: 2.16.840.1.113883.6.88
              display_name: Penicillin
  - kind: payers
    header:
      title: Insurance Providers
"#;

    #[test]
    fn reads_sample_yaml() {
        let document = read_document_yaml(SAMPLE).expect("parse yaml");

        assert_eq!(
            document.title.as_deref(),
            Some("Community Health and Hospitals Health Summary")
        );
        assert_eq!(document.record_target.names[0].family.as_deref(), Some("Jones"));
        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].kind(), SectionKind::Allergies);
        assert_eq!(document.sections[1].kind(), SectionKind::Payers);

        match &document.sections[0] {
            Section::Allergies(allergies) => {
                assert_eq!(allergies.allergy_problem_acts.len(), 1);
                let substance = allergies.allergy_problem_acts[0].allergy_observations[0]
                    .substance
                    .as_ref()
                    .expect("substance");
                assert_eq!(substance.display_name.as_deref(), Some("Penicillin"));
            }
            other => panic!("expected allergies section, got {other:?}"),
        }
    }

    #[test]
    fn yaml_survives_rewrite() {
        let document = read_document_yaml(SAMPLE).expect("parse yaml");
        let yaml = write_document_yaml(&document).expect("write yaml");
        let reparsed = read_document_yaml(&yaml).expect("reparse yaml");

        assert_eq!(document, reparsed);
    }

    #[test]
    fn reads_minimal_json() {
        let document = read_document_json(r#"{"sections":[]}"#).expect("parse json");

        assert!(document.sections.is_empty());
        assert!(document.authors.is_empty());
        assert!(document.id.is_none());
    }

    #[test]
    fn rejects_unknown_section_kind_with_path() {
        let input = r#"
sections:
  - kind: astrology
"#;

        let err = read_document_yaml(input).expect_err("should reject unknown kind");
        match err {
            CcdaError::Translation(msg) => {
                assert!(msg.contains("sections[0]"), "message: {msg}");
                assert!(msg.contains("astrology"), "message: {msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_names_path_once() {
        let input = r#"
sections:
  - kind: astrology
"#;

        let err = read_document_yaml(input).expect_err("should reject unknown kind");
        let msg = err.to_string();
        assert_eq!(msg.matches("sections[0]").count(), 1, "message: {msg}");
    }

    #[test]
    fn rejects_misspelled_act_list_with_path() {
        let input = r#"
sections:
  - kind: allergies
    header:
      title: Allergies
    allergy_acts:
      - status_code: active
"#;

        let err = read_document_yaml(input).expect_err("should reject misspelled act key");
        match err {
            CcdaError::Translation(msg) => {
                assert!(msg.contains("sections[0]"), "message: {msg}");
                assert!(msg.contains("allergy_acts"), "message: {msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_misspelled_act_list_in_json() {
        let input = r#"{"sections":[{"kind":"problems","problems":[]}]}"#;

        let err = read_document_json(input).expect_err("should reject misspelled act key");
        assert!(err.to_string().contains("unknown field"), "message: {err}");
        assert!(err.to_string().contains("sections[0]"), "message: {err}");
    }

    #[test]
    fn rejects_unknown_header_keys() {
        let input = r#"
sections: []
unexpected_key: should_fail
"#;

        let err = read_document_yaml(input).expect_err("should reject unknown key");
        match err {
            CcdaError::Translation(msg) => assert!(msg.contains("unexpected_key")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
