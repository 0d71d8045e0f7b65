//! Folding act-level bundles into the document bundle.

use fhir::{Bundle, BundleEntry, CompositionSection, Reference, ResourceType};

/// Appends every entry of `source` to `target`, in order, and links each resource whose kind is
/// `primary` from `section`.
///
/// Resources keep the identifiers they were created with. Nothing is dropped, reordered or
/// deduplicated: `target` always grows by exactly `source.len()` entries, however many of them
/// match `primary`. Each appended entry is fresh (any `fullUrl` on the source entry is not
/// carried over).
pub fn merge_bundles(
    source: Bundle,
    target: &mut Bundle,
    section: &mut CompositionSection,
    primary: ResourceType,
) {
    for entry in source.entry {
        if entry.resource.resource_type() == primary {
            section.entry.push(Reference::to(&entry.resource));
        }
        target.add_entry(BundleEntry::new(entry.resource));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{Condition, Medication, MedicationStatement, Resource};

    fn condition(id: &str) -> Resource {
        Condition {
            id: id.into(),
            ..Default::default()
        }
        .into()
    }

    fn medication(id: &str) -> Resource {
        Medication {
            id: id.into(),
            code: None,
        }
        .into()
    }

    #[test]
    fn appends_all_and_links_primary_only() {
        let source: Bundle = vec![
            MedicationStatement {
                id: "ms1".into(),
                ..Default::default()
            }
            .into(),
            medication("m1"),
        ]
        .into_iter()
        .collect();
        let mut target = Bundle::collection();
        let mut section = CompositionSection::default();

        merge_bundles(
            source,
            &mut target,
            &mut section,
            ResourceType::MedicationStatement,
        );

        assert_eq!(target.len(), 2);
        let ids: Vec<&str> = target.resources().map(Resource::id).collect();
        assert_eq!(ids, vec!["ms1", "m1"]);
        assert_eq!(section.entry.len(), 1);
        assert_eq!(section.entry[0].reference, "MedicationStatement/ms1");
    }

    #[test]
    fn growth_is_independent_of_matches() {
        for matching in 0..=3 {
            let mut resources = Vec::new();
            for i in 0..3 {
                if i < matching {
                    resources.push(condition(&format!("c{i}")));
                } else {
                    resources.push(medication(&format!("m{i}")));
                }
            }
            let source: Bundle = resources.into_iter().collect();
            let mut target: Bundle = vec![condition("existing")].into_iter().collect();
            let mut section = CompositionSection::default();

            merge_bundles(source, &mut target, &mut section, ResourceType::Condition);

            assert_eq!(target.len(), 4);
            assert_eq!(section.entry.len(), matching);
        }
    }

    #[test]
    fn keeps_ids_and_duplicate_links() {
        let mut target = Bundle::collection();
        let mut section = CompositionSection::default();

        let first: Bundle = vec![condition("same")].into_iter().collect();
        let second: Bundle = vec![condition("same")].into_iter().collect();
        merge_bundles(first, &mut target, &mut section, ResourceType::Condition);
        merge_bundles(second, &mut target, &mut section, ResourceType::Condition);

        assert_eq!(target.len(), 2);
        assert_eq!(section.entry.len(), 2);
        assert_eq!(section.entry[0], section.entry[1]);
        assert_eq!(section.entry[0].reference, "Condition/same");
    }

    #[test]
    fn fresh_entries_drop_source_full_url() {
        let mut source = Bundle::collection();
        source.add_entry(BundleEntry {
            full_url: Some("urn:uuid:stale".into()),
            resource: condition("c"),
        });
        let mut target = Bundle::collection();
        let mut section = CompositionSection::default();

        merge_bundles(source, &mut target, &mut section, ResourceType::Condition);

        assert!(target.entry[0].full_url.is_none());
    }

    #[test]
    fn empty_source_is_a_no_op() {
        let mut target: Bundle = vec![condition("a")].into_iter().collect();
        let mut section = CompositionSection::default();

        merge_bundles(
            Bundle::collection(),
            &mut target,
            &mut section,
            ResourceType::Condition,
        );

        assert_eq!(target.len(), 1);
        assert!(section.entry.is_empty());
    }
}
