//! Document transformation orchestrator.
//!
//! [`CcdTransformer`] walks a [`ClinicalDocument`] depth-first: header first, then every section
//! in document order, then every leaf act of a section in document order. Each act is handed to
//! the [`ResourceTransformer`] and the sub-bundle it returns is folded into the document bundle
//! with [`merge_bundles`], linking the section's primary resources from its output section.
//!
//! The transformer keeps no per-call state. The subject reference is computed once per document
//! and passed down by value, so a single transformer may be shared between threads.

use crate::dispatch;
use crate::mapping::{DefaultResourceTransformer, DocumentHeader, ResourceTransformer};
use crate::merge::merge_bundles;
use c2f_ids::Uuid;
use ccda::{ClinicalDocument, Section, SectionKind};
use fhir::{
    Bundle, BundleType, Composition, CompositionSection, Patient, Reference, Resource,
    ResourceType,
};

/// A finished document bundle plus the reference to its subject (the Patient at entry 1).
#[derive(Clone, Debug, PartialEq)]
pub struct TransformedDocument {
    pub bundle: Bundle,
    pub subject: Reference,
}

/// Turns clinical documents into FHIR `document` bundles.
#[derive(Clone, Debug, Default)]
pub struct CcdTransformer<T = DefaultResourceTransformer> {
    resources: T,
    full_urls: bool,
}

impl<T> CcdTransformer<T>
where
    T: ResourceTransformer,
{
    pub fn new(resources: T) -> Self {
        Self {
            resources,
            full_urls: false,
        }
    }

    /// When enabled, every entry of a finished bundle carries a `fullUrl`.
    pub fn with_full_urls(mut self, enabled: bool) -> Self {
        self.full_urls = enabled;
        self
    }

    /// Transforms `document`, or returns `None` when there is no document.
    pub fn transform(&self, document: Option<&ClinicalDocument>) -> Option<Bundle> {
        document.map(|document| self.transform_document(document).bundle)
    }

    /// Transforms `document` and returns the bundle together with the subject reference.
    ///
    /// Entry 0 is the Composition and entry 1 the Patient. Supporting header resources follow,
    /// then the output of each section in document order. Every section gets an output section
    /// on the Composition, including sections whose kind is not mapped.
    pub fn transform_document(&self, document: &ClinicalDocument) -> TransformedDocument {
        let header = self.resources.clinical_document_to_header(document);
        let subject = Reference::new(ResourceType::Patient, &header.patient.id);
        let mut output = DocumentBundle::new(header);

        for section in &document.sections {
            let index = output.open_section(self.resources.section_to_section(section.header()));

            let Some(route) = dispatch::route(section) else {
                log_unmapped(section);
                continue;
            };

            let acts = route.acts.len();
            let before = output.content.len();
            for act in route.acts {
                let produced = act.transform(&self.resources, &subject);
                output.merge_into_section(index, produced, route.primary);
            }

            tracing::debug!(
                kind = %section.kind(),
                acts,
                entries = output.content.len() - before,
                links = output.composition.section[index].entry.len(),
                "section transformed"
            );
        }

        let sections = output.composition.section.len();
        let bundle = output.into_bundle(self.full_urls);
        tracing::info!(
            subject = %subject,
            sections,
            entries = bundle.len(),
            "document transformed"
        );

        TransformedDocument { bundle, subject }
    }
}

fn log_unmapped(section: &Section) {
    let title = section.header().title.as_deref().unwrap_or_default();
    match section.kind() {
        SectionKind::Other => {
            tracing::warn!(title, "section marked other, output section left empty")
        }
        kind => tracing::debug!(%kind, title, "section kind not mapped, output section left empty"),
    }
}

/// A document bundle under construction.
///
/// The Composition and Patient are held apart from the rest of the content so that output
/// sections can be extended while content entries are appended.
struct DocumentBundle {
    composition: Composition,
    patient: Patient,
    supporting: Vec<Resource>,
    content: Bundle,
}

impl DocumentBundle {
    fn new(header: DocumentHeader) -> Self {
        Self {
            composition: header.composition,
            patient: header.patient,
            supporting: header.supporting,
            content: Bundle::collection(),
        }
    }

    /// Attaches `section` to the Composition and returns its index.
    fn open_section(&mut self, section: CompositionSection) -> usize {
        self.composition.section.push(section);
        self.composition.section.len() - 1
    }

    fn merge_into_section(&mut self, index: usize, produced: Bundle, primary: ResourceType) {
        merge_bundles(
            produced,
            &mut self.content,
            &mut self.composition.section[index],
            primary,
        );
    }

    fn into_bundle(self, full_urls: bool) -> Bundle {
        let mut bundle = Bundle::new(BundleType::Document);
        bundle.push(self.composition);
        bundle.push(self.patient);
        for resource in self.supporting {
            bundle.push(resource);
        }
        bundle.entry.extend(self.content.entry);

        if full_urls {
            for entry in &mut bundle.entry {
                entry.full_url = Some(full_url(&entry.resource));
            }
        }
        bundle
    }
}

/// `urn:uuid:<id>` for UUID ids, otherwise the relative `Type/id` reference.
fn full_url(resource: &Resource) -> String {
    match Uuid::parse_str(resource.id()) {
        Ok(uuid) => format!("urn:uuid:{}", uuid.hyphenated()),
        Err(_) => Reference::to(resource).reference,
    }
}
