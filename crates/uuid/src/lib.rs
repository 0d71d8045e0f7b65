//! Resource identifier generation.
//!
//! Every resource produced while transforming a clinical document receives a textual
//! identifier exactly once, at creation time. This crate owns the policy for those identifiers.
//!
//! Two strategies are supported:
//! - [`IdStrategy::RandomUnique`]: a fresh hyphenated UUID v4 per call
//!   (for example `550e8400-e29b-41d4-a716-446655440000`).
//! - [`IdStrategy::SequentialCounter`]: `"1"`, `"2"`, `"3"`, ... in call order.
//!
//! The counter is an atomic, so a single [`IdGenerator`] may be shared (typically behind an
//! `Arc`) between concurrent transformations without two calls ever observing the same value.

mod generator;

// Re-export public types
pub use generator::{IdGenerator, IdStrategy, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The strategy name was not recognised.
    #[error("invalid id strategy '{0}' (expected 'uuid' or 'counter')")]
    InvalidStrategy(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
