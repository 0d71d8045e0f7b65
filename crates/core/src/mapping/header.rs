//! Document header → Composition, Patient and author Practitioners.

use super::datatypes::{
    address, codeable_concept, fhir_date, fhir_date_time, gender, human_name, identifier,
    identifiers,
};
use super::DocumentHeader;
use crate::constants::DEFAULT_DOCUMENT_TYPE;
use c2f_ids::IdGenerator;
use ccda::{ClinicalDocument, InstanceIdentifier, PatientRole, PersonName, SectionHeader};
use fhir::{
    CodeableConcept, Composition, CompositionSection, CompositionStatus, Patient, Practitioner,
    Reference, Resource, ResourceType,
};

/// Maps the header. Ids are drawn in document order: Composition, Patient, then one
/// Practitioner per author.
pub(super) fn document_header(ids: &IdGenerator, document: &ClinicalDocument) -> DocumentHeader {
    let composition_id = ids.next_id();
    let patient = patient(ids, &document.record_target);
    let subject = Reference::new(ResourceType::Patient, &patient.id);

    let authors: Vec<Practitioner> = document
        .authors
        .iter()
        .map(|author| practitioner(ids, &author.ids, author.name.as_ref()))
        .collect();

    let composition = Composition {
        id: composition_id,
        identifier: document.id.as_ref().map(identifier),
        status: CompositionStatus::Final,
        type_: document
            .code
            .as_ref()
            .and_then(codeable_concept)
            .unwrap_or_else(|| CodeableConcept::text(DEFAULT_DOCUMENT_TYPE)),
        date: document.effective_time.as_deref().and_then(fhir_date_time),
        title: document.title.clone(),
        confidentiality: document
            .confidentiality_code
            .as_ref()
            .and_then(|code| code.code.clone()),
        language: document.language_code.clone(),
        subject,
        author: authors
            .iter()
            .map(|p| Reference::new(ResourceType::Practitioner, &p.id))
            .collect(),
        section: Vec::new(),
    };

    DocumentHeader {
        composition,
        patient,
        supporting: authors.into_iter().map(Resource::from).collect(),
    }
}

fn patient(ids: &IdGenerator, role: &PatientRole) -> Patient {
    Patient {
        id: ids.next_id(),
        identifier: identifiers(&role.ids),
        name: role.names.iter().map(human_name).collect(),
        gender: role.gender_code.as_ref().and_then(gender),
        birth_date: role.birth_time.as_deref().and_then(fhir_date),
        address: role.addresses.iter().map(address).collect(),
    }
}

/// A Practitioner for an author or performer, with a freshly generated id.
pub(super) fn practitioner(
    ids: &IdGenerator,
    entity_ids: &[InstanceIdentifier],
    name: Option<&PersonName>,
) -> Practitioner {
    Practitioner {
        id: ids.next_id(),
        identifier: identifiers(entity_ids),
        name: name.map(human_name).into_iter().collect(),
    }
}

/// Empty output section carrying the source section's title, code and narrative.
pub(super) fn composition_section(header: &SectionHeader) -> CompositionSection {
    CompositionSection {
        title: header.title.clone(),
        code: header.code.as_ref().and_then(codeable_concept),
        text: header.text.clone(),
        entry: Vec::new(),
    }
}
