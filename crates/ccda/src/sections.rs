//! Typed document sections.
//!
//! [`Section`] is a closed sum type over the C-CDA section kinds. On the wire it is tagged by
//! `kind` (snake case). Sections whose content the transformer does not (yet) map carry only
//! their [`SectionHeader`] via [`NarrativeSection`]; `other` covers sections the producer
//! explicitly marked as `kind: other`. Any other unknown `kind` is a parse error.

use crate::acts::{
    AllergyProblemAct, FamilyHistoryOrganizer, MedicationActivity, ProblemConcernAct,
    ProcedureActivityProcedure, ResultOrganizer, SubstanceAdministration, VitalSignsOrganizer,
};
use crate::datatypes::CodedValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title, code and narrative block common to every section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// LOINC section code, for example `48765-2` for allergies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodedValue>,

    /// Human-readable narrative (`section/text`), flattened to plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A section the transformer carries through without mapping its entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NarrativeSection {
    #[serde(default)]
    pub header: SectionHeader,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllergiesSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub allergy_problem_acts: Vec<AllergyProblemAct>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyHistorySection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub family_histories: Vec<FamilyHistoryOrganizer>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImmunizationsSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub substance_administrations: Vec<SubstanceAdministration>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicationsSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub medication_activities: Vec<MedicationActivity>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub problem_concerns: Vec<ProblemConcernAct>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProceduresSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub procedures: Vec<ProcedureActivityProcedure>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultsSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub result_organizers: Vec<ResultOrganizer>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VitalSignsSection {
    #[serde(default)]
    pub header: SectionHeader,

    #[serde(default)]
    pub vital_signs_organizers: Vec<VitalSignsOrganizer>,
}

/// Declares every section kind once and derives [`Section`], [`SectionKind`] and the
/// accessors shared by all variants.
macro_rules! section_kinds {
    ($($kind:ident($body:ty) => $name:literal),+ $(,)?) => {
        /// One typed clinical section of a document.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", rename_all = "snake_case")]
        pub enum Section {
            $($kind($body),)+
        }

        /// Field-less kind tag of a [`Section`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum SectionKind {
            $($kind,)+
        }

        impl SectionKind {
            /// Every section kind, in declaration order.
            pub const ALL: &'static [SectionKind] = &[$(SectionKind::$kind,)+];

            /// Human-readable name, for logs and listings.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SectionKind::$kind => $name,)+
                }
            }
        }

        impl Section {
            pub fn kind(&self) -> SectionKind {
                match self {
                    $(Section::$kind(_) => SectionKind::$kind,)+
                }
            }

            pub fn header(&self) -> &SectionHeader {
                match self {
                    $(Section::$kind(s) => &s.header,)+
                }
            }
        }
    };
}

section_kinds!(
    AdvanceDirectives(NarrativeSection) => "advance directives",
    Allergies(AllergiesSection) => "allergies",
    Encounters(NarrativeSection) => "encounters",
    FamilyHistory(FamilyHistorySection) => "family history",
    FunctionalStatus(NarrativeSection) => "functional status",
    Immunizations(ImmunizationsSection) => "immunizations",
    MedicalEquipment(NarrativeSection) => "medical equipment",
    Medications(MedicationsSection) => "medications",
    Payers(NarrativeSection) => "payers",
    PlanOfCare(NarrativeSection) => "plan of care",
    Problems(ProblemSection) => "problems",
    Procedures(ProceduresSection) => "procedures",
    Results(ResultsSection) => "results",
    SocialHistory(NarrativeSection) => "social history",
    VitalSigns(VitalSignsSection) => "vital signs",
    Other(NarrativeSection) => "other",
);

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
