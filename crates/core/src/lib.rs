//! # C2F Core
//!
//! Turns a parsed Continuity of Care Document into a FHIR `document` bundle.
//!
//! This crate contains the transformation pipeline only:
//! - [`CcdTransformer`]: walks the document header and sections in order
//! - [`dispatch`]: the per-section-kind table of leaf acts and primary resource kinds
//! - [`merge_bundles`]: folds act-level bundles into the document bundle
//! - [`mapping`]: the [`ResourceTransformer`] seam and its default implementation
//! - [`TransformConfig`]: startup configuration (identifier strategy, `fullUrl`s)
//!
//! **No I/O**: reading documents and writing bundles belong in `ccda`, `fhir` and the CLI.

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod mapping;
pub mod merge;
pub mod transformer;

mod error;

pub use config::TransformConfig;
pub use error::{TransformError, TransformResult};
pub use mapping::{DefaultResourceTransformer, DocumentHeader, ResourceTransformer};
pub use merge::merge_bundles;
pub use transformer::{CcdTransformer, TransformedDocument};
