//! Constants used throughout the transformer core.
//!
//! Environment variable names, FHIR system URIs and the code system table live here so that
//! the mappers and the binary agree on them.

/// Environment variable selecting the identifier strategy (`uuid` or `counter`).
pub const ID_STRATEGY_ENV: &str = "C2F_ID_STRATEGY";

/// Environment variable enabling `fullUrl` on bundle entries.
pub const FULL_URLS_ENV: &str = "C2F_FULL_URLS";

/// Composition type text used when the document carries no code.
pub const DEFAULT_DOCUMENT_TYPE: &str = "Continuity of Care Document";

/// FHIR system for business identifiers that are bare URIs.
pub const URI_IDENTIFIER_SYSTEM: &str = "urn:ietf:rfc:3986";

/// UCUM, the unit system for observation quantities.
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// Observation category code system.
pub const OBSERVATION_CATEGORY_SYSTEM: &str = "http://hl7.org/fhir/observation-category";

/// Code system OIDs with a canonical FHIR URI. Anything else is rendered as `urn:oid:<oid>`.
pub const CODE_SYSTEMS: &[(&str, &str)] = &[
    ("2.16.840.1.113883.6.1", "http://loinc.org"),
    ("2.16.840.1.113883.6.96", "http://snomed.info/sct"),
    ("2.16.840.1.113883.6.88", "http://www.nlm.nih.gov/research/umls/rxnorm"),
    ("2.16.840.1.113883.12.292", "http://hl7.org/fhir/sid/cvx"),
    ("2.16.840.1.113883.6.90", "http://hl7.org/fhir/sid/icd-10-cm"),
    ("2.16.840.1.113883.6.103", "http://hl7.org/fhir/sid/icd-9-cm"),
    ("2.16.840.1.113883.6.8", "http://unitsofmeasure.org"),
    ("2.16.840.1.113883.5.1", "http://hl7.org/fhir/v3/AdministrativeGender"),
    ("2.16.840.1.113883.5.111", "http://hl7.org/fhir/v3/RoleCode"),
    ("2.16.840.1.113883.5.25", "http://hl7.org/fhir/v3/Confidentiality"),
    ("2.16.840.1.113883.5.83", "http://hl7.org/fhir/v3/ObservationInterpretation"),
];
