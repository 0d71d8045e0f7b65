//! Clinical act mappers.
//!
//! Each mapper returns a `collection` bundle whose first resource is of the section's primary
//! kind; any supporting resources (medications, performers) follow it.

use super::datatypes::{codeable_concept, fhir_date_time, gender, identifiers, period, quantity};
use super::header::practitioner;
use crate::constants::OBSERVATION_CATEGORY_SYSTEM;
use c2f_ids::IdGenerator;
use ccda::{
    AllergyProblemAct, AssignedEntity, CodedValue, FamilyHistoryOrganizer, MedicationActivity,
    ObservationAct, ObservationValue, PhysicalQuantity, ProblemConcernAct,
    ProcedureActivityProcedure, SubstanceAdministration, TimeInterval,
};
use fhir::{
    AllergyIntolerance, AllergyReaction, Bundle, CodeableConcept, Coding, Condition, Dosage,
    FamilyMemberCondition, FamilyMemberHistory, Immunization, Medication, MedicationStatement,
    Observation, Practitioner, Procedure, ProcedurePerformer, Reference, ResourceType,
};

/// Observation category as `(code, display)`.
pub(super) type Category = (&'static str, &'static str);

pub(super) const LABORATORY: Category = ("laboratory", "Laboratory");
pub(super) const VITAL_SIGNS: Category = ("vital-signs", "Vital Signs");

fn start(time: Option<&TimeInterval>) -> Option<String> {
    time.and_then(TimeInterval::start).and_then(fhir_date_time)
}

fn end(time: Option<&TimeInterval>) -> Option<String> {
    time.and_then(|t| t.high.as_deref()).and_then(fhir_date_time)
}

fn performers(ids: &IdGenerator, entities: &[AssignedEntity]) -> Vec<Practitioner> {
    entities
        .iter()
        .map(|entity| practitioner(ids, &entity.ids, entity.name.as_ref()))
        .collect()
}

// ============================================================================
// Allergies
// ============================================================================

/// One AllergyIntolerance per concern act, folding all of its observations together.
pub(super) fn allergy_intolerance(
    ids: &IdGenerator,
    act: &AllergyProblemAct,
    subject: &Reference,
) -> Bundle {
    let observations = &act.allergy_observations;

    let substance = observations
        .iter()
        .find_map(|o| o.substance.as_ref().and_then(codeable_concept));
    let manifestation: Vec<CodeableConcept> = observations
        .iter()
        .flat_map(|o| o.reactions.iter())
        .filter_map(codeable_concept)
        .collect();
    let severity = observations
        .iter()
        .find_map(|o| o.severity.as_ref())
        .and_then(reaction_severity);

    let reaction = if manifestation.is_empty() && severity.is_none() {
        Vec::new()
    } else {
        vec![AllergyReaction {
            manifestation,
            severity,
        }]
    };

    let identifier = match observations.first() {
        Some(first) if act.ids.is_empty() => identifiers(&first.ids),
        _ => identifiers(&act.ids),
    };
    let onset = start(act.effective_time.as_ref())
        .or_else(|| start(observations.first().and_then(|o| o.effective_time.as_ref())));

    let allergy = AllergyIntolerance {
        id: ids.next_id(),
        identifier,
        patient: subject.clone(),
        status: act.status_code.as_deref().and_then(allergy_status),
        onset,
        substance,
        reaction,
    };

    let mut bundle = Bundle::collection();
    bundle.push(allergy);
    bundle
}

fn allergy_status(status: &str) -> Option<String> {
    match status {
        "active" => Some("active".into()),
        "completed" => Some("resolved".into()),
        "suspended" => Some("inactive".into()),
        _ => None,
    }
}

fn reaction_severity(severity: &CodedValue) -> Option<String> {
    let by_code = match severity.code.as_deref() {
        Some("255604002") => Some("mild"),
        Some("6736007") => Some("moderate"),
        Some("24484000") => Some("severe"),
        _ => None,
    };
    if let Some(severity) = by_code {
        return Some(severity.to_string());
    }

    let display = severity.display_name.as_deref()?.trim().to_ascii_lowercase();
    matches!(display.as_str(), "mild" | "moderate" | "severe").then_some(display)
}

// ============================================================================
// Problems
// ============================================================================

/// One Condition per problem observation in the concern act.
pub(super) fn conditions(
    ids: &IdGenerator,
    act: &ProblemConcernAct,
    subject: &Reference,
) -> Bundle {
    let mut bundle = Bundle::collection();

    for observation in &act.problem_observations {
        let identifier = if observation.ids.is_empty() {
            identifiers(&act.ids)
        } else {
            identifiers(&observation.ids)
        };
        let time = observation
            .effective_time
            .as_ref()
            .or(act.effective_time.as_ref());
        let clinical_status = observation
            .problem_status
            .as_ref()
            .and_then(problem_status)
            .or_else(|| act.status_code.as_deref().and_then(concern_status));

        bundle.push(Condition {
            id: ids.next_id(),
            identifier,
            patient: subject.clone(),
            code: observation.value.as_ref().and_then(codeable_concept),
            clinical_status,
            verification_status: Some("confirmed".into()),
            onset_date_time: start(time),
            abatement_date_time: end(time),
        });
    }

    bundle
}

fn problem_status(status: &CodedValue) -> Option<String> {
    match status.code.as_deref() {
        Some("55561003") => return Some("active".into()),
        Some("413322009") => return Some("resolved".into()),
        Some("73425007") => return Some("inactive".into()),
        _ => {}
    }

    let display = status.display_name.as_deref()?.trim().to_ascii_lowercase();
    matches!(display.as_str(), "active" | "inactive" | "resolved").then_some(display)
}

fn concern_status(status: &str) -> Option<String> {
    match status {
        "active" => Some("active".into()),
        "completed" => Some("resolved".into()),
        _ => None,
    }
}

// ============================================================================
// Medications
// ============================================================================

/// MedicationStatement followed by the Medication it references.
pub(super) fn medication_statement(
    ids: &IdGenerator,
    act: &MedicationActivity,
    subject: &Reference,
) -> Bundle {
    let statement_id = ids.next_id();
    let medication = Medication {
        id: ids.next_id(),
        code: act.consumable.as_ref().and_then(codeable_concept),
    };

    let dosage = Dosage {
        text: act.text.clone(),
        route: act.route_code.as_ref().and_then(codeable_concept),
        quantity: act.dose_quantity.as_ref().map(dose),
    };
    let has_dosage = dosage.text.is_some() || dosage.route.is_some() || dosage.quantity.is_some();

    let statement = MedicationStatement {
        id: statement_id,
        identifier: identifiers(&act.ids),
        patient: subject.clone(),
        status: act.status_code.as_deref().and_then(medication_status),
        medication_reference: Reference::new(ResourceType::Medication, &medication.id),
        effective_period: act.effective_time.as_ref().and_then(period),
        dosage: if has_dosage { vec![dosage] } else { Vec::new() },
    };

    let mut bundle = Bundle::collection();
    bundle.push(statement);
    bundle.push(medication);
    bundle
}

fn dose(amount: &PhysicalQuantity) -> fhir::Quantity {
    quantity(amount.value, amount.unit.as_deref())
}

fn medication_status(status: &str) -> Option<String> {
    match status {
        "active" => Some("active".into()),
        "completed" => Some("completed".into()),
        "aborted" | "cancelled" => Some("stopped".into()),
        "suspended" | "held" => Some("on-hold".into()),
        "nullified" => Some("entered-in-error".into()),
        _ => None,
    }
}

// ============================================================================
// Immunizations
// ============================================================================

/// Immunization followed by one Practitioner per performer.
pub(super) fn immunization(
    ids: &IdGenerator,
    act: &SubstanceAdministration,
    subject: &Reference,
) -> Bundle {
    let immunization_id = ids.next_id();
    let practitioners = performers(ids, &act.performers);

    let immunization = Immunization {
        id: immunization_id,
        identifier: identifiers(&act.ids),
        patient: subject.clone(),
        status: act.status_code.as_deref().and_then(event_status),
        date: start(act.effective_time.as_ref()),
        vaccine_code: act.consumable.as_ref().and_then(codeable_concept),
        was_not_given: act.negation_ind,
        performer: practitioners
            .first()
            .map(|p| Reference::new(ResourceType::Practitioner, &p.id)),
        lot_number: act.lot_number.clone(),
    };

    let mut bundle = Bundle::collection();
    bundle.push(immunization);
    for practitioner in practitioners {
        bundle.push(practitioner);
    }
    bundle
}

fn event_status(status: &str) -> Option<String> {
    match status {
        "completed" => Some("completed".into()),
        "nullified" => Some("entered-in-error".into()),
        _ => None,
    }
}

// ============================================================================
// Procedures
// ============================================================================

/// Procedure followed by one Practitioner per performer.
pub(super) fn procedure(
    ids: &IdGenerator,
    procedure: &ProcedureActivityProcedure,
    subject: &Reference,
) -> Bundle {
    let procedure_id = ids.next_id();
    let practitioners = performers(ids, &procedure.performers);

    let mapped = Procedure {
        id: procedure_id,
        identifier: identifiers(&procedure.ids),
        subject: subject.clone(),
        status: procedure.status_code.as_deref().and_then(procedure_status),
        code: procedure.code.as_ref().and_then(codeable_concept),
        performed_period: procedure.effective_time.as_ref().and_then(period),
        performer: practitioners
            .iter()
            .map(|p| ProcedurePerformer {
                actor: Reference::new(ResourceType::Practitioner, &p.id),
            })
            .collect(),
    };

    let mut bundle = Bundle::collection();
    bundle.push(mapped);
    for practitioner in practitioners {
        bundle.push(practitioner);
    }
    bundle
}

fn procedure_status(status: &str) -> Option<String> {
    match status {
        "completed" => Some("completed".into()),
        "active" => Some("in-progress".into()),
        "aborted" => Some("aborted".into()),
        "cancelled" => Some("not-done".into()),
        _ => None,
    }
}

// ============================================================================
// Results and vital signs
// ============================================================================

/// One Observation in the given category.
pub(super) fn observation(
    ids: &IdGenerator,
    act: &ObservationAct,
    subject: &Reference,
    (category_code, category_display): Category,
) -> Bundle {
    let mut mapped = Observation {
        id: ids.next_id(),
        identifier: identifiers(&act.ids),
        subject: subject.clone(),
        status: act.status_code.as_deref().and_then(observation_status),
        category: Some(CodeableConcept {
            coding: vec![Coding {
                system: Some(OBSERVATION_CATEGORY_SYSTEM.to_string()),
                code: Some(category_code.to_string()),
                display: Some(category_display.to_string()),
            }],
            text: None,
        }),
        code: act.code.as_ref().and_then(codeable_concept),
        effective_date_time: start(act.effective_time.as_ref()),
        interpretation: act.interpretation_code.as_ref().and_then(codeable_concept),
        ..Default::default()
    };

    match &act.value {
        Some(ObservationValue::Pq { value, unit }) => {
            mapped.value_quantity = Some(quantity(*value, unit.as_deref()));
        }
        Some(ObservationValue::Cd {
            code,
            code_system,
            display_name,
        }) => {
            mapped.value_codeable_concept = codeable_concept(&CodedValue {
                code: code.clone(),
                code_system: code_system.clone(),
                display_name: display_name.clone(),
                original_text: None,
            });
        }
        Some(ObservationValue::St { text }) => mapped.value_string = Some(text.clone()),
        None => {}
    }

    let mut bundle = Bundle::collection();
    bundle.push(mapped);
    bundle
}

fn observation_status(status: &str) -> Option<String> {
    match status {
        "completed" => Some("final".into()),
        "active" => Some("preliminary".into()),
        "aborted" | "cancelled" => Some("cancelled".into()),
        "nullified" => Some("entered-in-error".into()),
        _ => None,
    }
}

// ============================================================================
// Family history
// ============================================================================

/// One FamilyMemberHistory per organizer; each observation with a value becomes a condition.
pub(super) fn family_member_history(
    ids: &IdGenerator,
    organizer: &FamilyHistoryOrganizer,
    subject: &Reference,
) -> Bundle {
    let relative = organizer.related_subject.as_ref();

    let condition = organizer
        .family_history_observations
        .iter()
        .filter_map(|observation| {
            Some(FamilyMemberCondition {
                code: observation.value.as_ref().and_then(codeable_concept)?,
                onset_string: observation.age_at_onset.as_ref().and_then(onset_age),
            })
        })
        .collect();

    let history = FamilyMemberHistory {
        id: ids.next_id(),
        identifier: identifiers(&organizer.ids),
        patient: subject.clone(),
        status: organizer
            .status_code
            .as_deref()
            .and_then(family_history_status),
        relationship: relative
            .and_then(|r| r.code.as_ref())
            .and_then(codeable_concept),
        gender: relative
            .and_then(|r| r.gender_code.as_ref())
            .and_then(gender),
        condition,
    };

    let mut bundle = Bundle::collection();
    bundle.push(history);
    bundle
}

fn onset_age(age: &PhysicalQuantity) -> Option<String> {
    let value = age.value?;
    Some(match age.unit.as_deref() {
        Some(unit) => format!("{value} {unit}"),
        None => value.to_string(),
    })
}

fn family_history_status(status: &str) -> Option<String> {
    match status {
        "completed" => Some("completed".into()),
        "active" => Some("partial".into()),
        _ => None,
    }
}
