//! FHIR Bundle model.

use crate::resources::Resource;
use serde::{Deserialize, Serialize};

/// Purpose of a bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// A coherent clinical document: Composition first, then the subject, then content.
    Document,
    /// An unordered set of resources, as returned by a single act mapper.
    Collection,
}

/// One wrapped resource inside a bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    pub resource: Resource,
}

impl BundleEntry {
    /// Wraps `resource` without a full URL.
    pub fn new(resource: impl Into<Resource>) -> Self {
        Self {
            full_url: None,
            resource: resource.into(),
        }
    }
}

/// An ordered collection of resource entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType", default = "default_resource_type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

impl Default for Bundle {
    fn default() -> Self {
        Self::collection()
    }
}

impl Bundle {
    /// An empty bundle of the given type.
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: default_resource_type(),
            id: None,
            bundle_type,
            entry: Vec::new(),
        }
    }

    /// An empty `collection` bundle, the shape act mappers return.
    pub fn collection() -> Self {
        Self::new(BundleType::Collection)
    }

    /// Appends `resource` as a new entry.
    pub fn push(&mut self, resource: impl Into<Resource>) {
        self.entry.push(BundleEntry::new(resource));
    }

    /// Appends an already-built entry.
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Iterates the wrapped resources in entry order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().map(|e| &e.resource)
    }
}

impl FromIterator<Resource> for Bundle {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            entry: iter.into_iter().map(BundleEntry::new).collect(),
            ..Self::collection()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Condition, Patient, ResourceType};

    #[test]
    fn push_preserves_order() {
        let mut bundle = Bundle::collection();
        bundle.push(Patient {
            id: "a".into(),
            ..Default::default()
        });
        bundle.push(Condition {
            id: "b".into(),
            ..Default::default()
        });

        let ids: Vec<&str> = bundle.resources().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(bundle.len(), 2);
        assert!(!bundle.is_empty());
    }

    #[test]
    fn collects_from_resources() {
        let bundle: Bundle = vec![Resource::from(Condition {
            id: "x".into(),
            ..Default::default()
        })]
        .into_iter()
        .collect();

        assert_eq!(bundle.bundle_type, BundleType::Collection);
        assert_eq!(
            bundle.resources().next().map(Resource::resource_type),
            Some(ResourceType::Condition)
        );
    }

    #[test]
    fn new_bundle_has_no_id() {
        let bundle = Bundle::new(BundleType::Document);

        assert!(bundle.id.is_none());
        assert_eq!(bundle.bundle_type, BundleType::Document);
        assert!(bundle.is_empty());
    }

    #[test]
    fn empty_entry_list_is_omitted() {
        let value = serde_json::to_value(Bundle::collection()).unwrap();

        assert_eq!(value["resourceType"], "Bundle");
        assert_eq!(value["type"], "collection");
        assert!(value.get("entry").is_none());
    }
}
