//! Per-section and per-act resource mappers.
//!
//! [`ResourceTransformer`] is the seam between orchestration and clinical content: one method
//! per supported (section variant × act type) pair, plus the header and section-shell mappers.
//! The orchestrator only ever talks to this trait.
//!
//! [`DefaultResourceTransformer`] is a structural implementation: it copies identifiers, codes,
//! times and statuses across without terminology translation. Every resource it creates gets
//! its id from the injected [`IdGenerator`].

mod datatypes;
mod entries;
mod header;

pub use datatypes::{code_system_uri, fhir_date, fhir_date_time};

use c2f_ids::IdGenerator;
use ccda::{
    AllergyProblemAct, ClinicalDocument, FamilyHistoryOrganizer, MedicationActivity,
    ProblemConcernAct, ProcedureActivityProcedure, ResultObservation, SectionHeader,
    SubstanceAdministration, VitalSignObservation,
};
use fhir::{Bundle, Composition, CompositionSection, Patient, Reference, Resource};
use std::sync::Arc;

/// Output of the header mapper.
///
/// The Composition and Patient are separate fields so that a document bundle can always place
/// them at entries 0 and 1. `supporting` holds further header resources (document authors)
/// that follow them.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentHeader {
    pub composition: Composition,
    pub patient: Patient,
    pub supporting: Vec<Resource>,
}

/// Maps document pieces onto FHIR resources.
///
/// Act mappers receive the subject reference explicitly and return a `collection` bundle of
/// whatever they produced, with identifiers already assigned. Returned bundles are trusted
/// as-is by the caller.
pub trait ResourceTransformer {
    /// Maps the document header to the Composition, the Patient and any supporting resources.
    fn clinical_document_to_header(&self, document: &ClinicalDocument) -> DocumentHeader;

    /// Builds the (empty) output section shell for a source section.
    fn section_to_section(&self, header: &SectionHeader) -> CompositionSection;

    fn allergy_problem_act_to_allergy_intolerance(
        &self,
        act: &AllergyProblemAct,
        subject: &Reference,
    ) -> Bundle;

    fn family_history_organizer_to_family_member_history(
        &self,
        organizer: &FamilyHistoryOrganizer,
        subject: &Reference,
    ) -> Bundle;

    fn substance_administration_to_immunization(
        &self,
        act: &SubstanceAdministration,
        subject: &Reference,
    ) -> Bundle;

    fn medication_activity_to_medication_statement(
        &self,
        act: &MedicationActivity,
        subject: &Reference,
    ) -> Bundle;

    fn problem_concern_act_to_condition(
        &self,
        act: &ProblemConcernAct,
        subject: &Reference,
    ) -> Bundle;

    fn procedure_to_procedure(
        &self,
        procedure: &ProcedureActivityProcedure,
        subject: &Reference,
    ) -> Bundle;

    fn result_observation_to_observation(
        &self,
        observation: &ResultObservation,
        subject: &Reference,
    ) -> Bundle;

    fn vital_sign_observation_to_observation(
        &self,
        observation: &VitalSignObservation,
        subject: &Reference,
    ) -> Bundle;
}

/// Structural C-CDA → FHIR mappers.
#[derive(Clone, Debug)]
pub struct DefaultResourceTransformer {
    ids: Arc<IdGenerator>,
}

impl Default for DefaultResourceTransformer {
    fn default() -> Self {
        Self::new(Arc::new(IdGenerator::default()))
    }
}

impl DefaultResourceTransformer {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self { ids }
    }

    /// The generator new resources draw their ids from.
    pub fn ids(&self) -> &Arc<IdGenerator> {
        &self.ids
    }
}

impl ResourceTransformer for DefaultResourceTransformer {
    fn clinical_document_to_header(&self, document: &ClinicalDocument) -> DocumentHeader {
        header::document_header(&self.ids, document)
    }

    fn section_to_section(&self, header: &SectionHeader) -> CompositionSection {
        header::composition_section(header)
    }

    fn allergy_problem_act_to_allergy_intolerance(
        &self,
        act: &AllergyProblemAct,
        subject: &Reference,
    ) -> Bundle {
        entries::allergy_intolerance(&self.ids, act, subject)
    }

    fn family_history_organizer_to_family_member_history(
        &self,
        organizer: &FamilyHistoryOrganizer,
        subject: &Reference,
    ) -> Bundle {
        entries::family_member_history(&self.ids, organizer, subject)
    }

    fn substance_administration_to_immunization(
        &self,
        act: &SubstanceAdministration,
        subject: &Reference,
    ) -> Bundle {
        entries::immunization(&self.ids, act, subject)
    }

    fn medication_activity_to_medication_statement(
        &self,
        act: &MedicationActivity,
        subject: &Reference,
    ) -> Bundle {
        entries::medication_statement(&self.ids, act, subject)
    }

    fn problem_concern_act_to_condition(
        &self,
        act: &ProblemConcernAct,
        subject: &Reference,
    ) -> Bundle {
        entries::conditions(&self.ids, act, subject)
    }

    fn procedure_to_procedure(
        &self,
        procedure: &ProcedureActivityProcedure,
        subject: &Reference,
    ) -> Bundle {
        entries::procedure(&self.ids, procedure, subject)
    }

    fn result_observation_to_observation(
        &self,
        observation: &ResultObservation,
        subject: &Reference,
    ) -> Bundle {
        entries::observation(&self.ids, observation, subject, entries::LABORATORY)
    }

    fn vital_sign_observation_to_observation(
        &self,
        observation: &VitalSignObservation,
        subject: &Reference,
    ) -> Bundle {
        entries::observation(&self.ids, observation, subject, entries::VITAL_SIGNS)
    }
}
