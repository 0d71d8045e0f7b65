//! Section-variant dispatch table.
//!
//! Each section variant maps to three things: how to reach its leaf acts (one or two levels of
//! nesting), which mapper turns a leaf act into resources, and which resource kind the output
//! section links. The table is a pair of exhaustive matches, so adding a [`Section`] variant does
//! not compile until it is given a row here.
//!
//! Variants without a row (advance directives, encounters, functional status, medical
//! equipment, payers, plan of care, social history, other) are routed to `None`. The
//! transformer still emits an empty output section for them.

use crate::mapping::ResourceTransformer;
use ccda::{
    AllergyProblemAct, FamilyHistoryOrganizer, MedicationActivity, ProblemConcernAct,
    ProcedureActivityProcedure, ResultObservation, Section, SectionKind, SubstanceAdministration,
    VitalSignObservation,
};
use fhir::{Bundle, Reference, ResourceType};

/// A leaf act reached by walking a section, paired with the mapper that handles it.
#[derive(Clone, Copy, Debug)]
pub enum LeafAct<'a> {
    AllergyProblem(&'a AllergyProblemAct),
    FamilyHistory(&'a FamilyHistoryOrganizer),
    Immunization(&'a SubstanceAdministration),
    Medication(&'a MedicationActivity),
    ProblemConcern(&'a ProblemConcernAct),
    Procedure(&'a ProcedureActivityProcedure),
    ResultObservation(&'a ResultObservation),
    VitalSignObservation(&'a VitalSignObservation),
}

impl LeafAct<'_> {
    /// Runs the mapper for this act, producing a sub-bundle.
    pub fn transform<T>(self, mapper: &T, subject: &Reference) -> Bundle
    where
        T: ResourceTransformer + ?Sized,
    {
        match self {
            LeafAct::AllergyProblem(act) => {
                mapper.allergy_problem_act_to_allergy_intolerance(act, subject)
            }
            LeafAct::FamilyHistory(organizer) => {
                mapper.family_history_organizer_to_family_member_history(organizer, subject)
            }
            LeafAct::Immunization(act) => {
                mapper.substance_administration_to_immunization(act, subject)
            }
            LeafAct::Medication(act) => {
                mapper.medication_activity_to_medication_statement(act, subject)
            }
            LeafAct::ProblemConcern(act) => mapper.problem_concern_act_to_condition(act, subject),
            LeafAct::Procedure(act) => mapper.procedure_to_procedure(act, subject),
            LeafAct::ResultObservation(observation) => {
                mapper.result_observation_to_observation(observation, subject)
            }
            LeafAct::VitalSignObservation(observation) => {
                mapper.vital_sign_observation_to_observation(observation, subject)
            }
        }
    }
}

/// The resolved route for one supported section.
#[derive(Clone, Debug)]
pub struct SectionRoute<'a> {
    /// Resource kind linked from the output section.
    pub primary: ResourceType,
    /// Leaf acts in document order.
    pub acts: Vec<LeafAct<'a>>,
}

/// Primary resource kind of a section kind, or `None` if the kind is not mapped.
pub fn primary_resource_type(kind: SectionKind) -> Option<ResourceType> {
    match kind {
        SectionKind::Allergies => Some(ResourceType::AllergyIntolerance),
        SectionKind::FamilyHistory => Some(ResourceType::FamilyMemberHistory),
        SectionKind::Immunizations => Some(ResourceType::Immunization),
        SectionKind::Medications => Some(ResourceType::MedicationStatement),
        SectionKind::Problems => Some(ResourceType::Condition),
        SectionKind::Procedures => Some(ResourceType::Procedure),
        SectionKind::Results | SectionKind::VitalSigns => Some(ResourceType::Observation),
        SectionKind::AdvanceDirectives
        | SectionKind::Encounters
        | SectionKind::FunctionalStatus
        | SectionKind::MedicalEquipment
        | SectionKind::Payers
        | SectionKind::PlanOfCare
        | SectionKind::SocialHistory
        | SectionKind::Other => None,
    }
}

/// Walks `section` down to its leaf acts, in document order.
///
/// Results and vital signs are organizer → observation (two levels); every other mapped
/// variant is one level. Unmapped variants yield no acts.
fn leaf_acts(section: &Section) -> Vec<LeafAct<'_>> {
    match section {
        Section::Allergies(s) => s
            .allergy_problem_acts
            .iter()
            .map(LeafAct::AllergyProblem)
            .collect(),
        Section::FamilyHistory(s) => s
            .family_histories
            .iter()
            .map(LeafAct::FamilyHistory)
            .collect(),
        Section::Immunizations(s) => s
            .substance_administrations
            .iter()
            .map(LeafAct::Immunization)
            .collect(),
        Section::Medications(s) => s
            .medication_activities
            .iter()
            .map(LeafAct::Medication)
            .collect(),
        Section::Problems(s) => s
            .problem_concerns
            .iter()
            .map(LeafAct::ProblemConcern)
            .collect(),
        Section::Procedures(s) => s.procedures.iter().map(LeafAct::Procedure).collect(),
        Section::Results(s) => s
            .result_organizers
            .iter()
            .flat_map(|organizer| organizer.result_observations.iter())
            .map(LeafAct::ResultObservation)
            .collect(),
        Section::VitalSigns(s) => s
            .vital_signs_organizers
            .iter()
            .flat_map(|organizer| organizer.vital_sign_observations.iter())
            .map(LeafAct::VitalSignObservation)
            .collect(),
        Section::AdvanceDirectives(_)
        | Section::Encounters(_)
        | Section::FunctionalStatus(_)
        | Section::MedicalEquipment(_)
        | Section::Payers(_)
        | Section::PlanOfCare(_)
        | Section::SocialHistory(_)
        | Section::Other(_) => Vec::new(),
    }
}

/// Resolves the route for `section`, or `None` if its variant is not mapped.
pub fn route(section: &Section) -> Option<SectionRoute<'_>> {
    let primary = primary_resource_type(section.kind())?;
    Some(SectionRoute {
        primary,
        acts: leaf_acts(section),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccda::{
        NarrativeSection, ObservationAct, ResultOrganizer, ResultsSection, VitalSignsOrganizer,
        VitalSignsSection,
    };

    #[test]
    fn every_kind_has_a_defined_row() {
        let mapped: Vec<SectionKind> = SectionKind::ALL
            .iter()
            .copied()
            .filter(|kind| primary_resource_type(*kind).is_some())
            .collect();

        assert_eq!(
            mapped,
            vec![
                SectionKind::Allergies,
                SectionKind::FamilyHistory,
                SectionKind::Immunizations,
                SectionKind::Medications,
                SectionKind::Problems,
                SectionKind::Procedures,
                SectionKind::Results,
                SectionKind::VitalSigns,
            ]
        );
    }

    #[test]
    fn results_flatten_organizers_in_order() {
        let observation = |code: &str| ObservationAct {
            status_code: Some(code.into()),
            ..Default::default()
        };
        let section = Section::Results(ResultsSection {
            header: Default::default(),
            result_organizers: vec![
                ResultOrganizer {
                    result_observations: vec![observation("a"), observation("b")],
                    ..Default::default()
                },
                ResultOrganizer::default(),
                ResultOrganizer {
                    result_observations: vec![observation("c")],
                    ..Default::default()
                },
            ],
        });

        let route = route(&section).expect("results are mapped");

        assert_eq!(route.primary, ResourceType::Observation);
        let order: Vec<&str> = route
            .acts
            .iter()
            .map(|act| match act {
                LeafAct::ResultObservation(o) => o.status_code.as_deref().unwrap_or(""),
                other => panic!("unexpected leaf {other:?}"),
            })
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn vital_signs_share_observation_primary() {
        let section = Section::VitalSigns(VitalSignsSection {
            header: Default::default(),
            vital_signs_organizers: vec![VitalSignsOrganizer {
                vital_sign_observations: vec![ObservationAct::default(); 3],
                ..Default::default()
            }],
        });

        let route = route(&section).expect("vital signs are mapped");

        assert_eq!(route.primary, ResourceType::Observation);
        assert_eq!(route.acts.len(), 3);
        assert!(matches!(route.acts[0], LeafAct::VitalSignObservation(_)));
    }

    #[test]
    fn unmapped_variants_route_to_none() {
        let section = Section::SocialHistory(NarrativeSection::default());

        assert!(route(&section).is_none());
        assert!(primary_resource_type(SectionKind::Other).is_none());
    }
}
