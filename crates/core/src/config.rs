//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the transformer. The intent is to avoid reading process-wide environment
//! variables while a document is being transformed.

use crate::mapping::DefaultResourceTransformer;
use crate::transformer::CcdTransformer;
use crate::{TransformError, TransformResult};
use c2f_ids::{IdGenerator, IdStrategy};
use std::sync::Arc;

/// Transformer configuration resolved at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformConfig {
    id_strategy: IdStrategy,
    full_urls: bool,
}

impl TransformConfig {
    pub fn new(id_strategy: IdStrategy, full_urls: bool) -> Self {
        Self {
            id_strategy,
            full_urls,
        }
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    /// Whether finished bundle entries carry a `fullUrl`.
    pub fn full_urls(&self) -> bool {
        self.full_urls
    }

    /// A fresh identifier generator for this configuration's strategy.
    ///
    /// Each call returns an independent generator, so counters restart at 1.
    pub fn id_generator(&self) -> Arc<IdGenerator> {
        Arc::new(IdGenerator::new(self.id_strategy))
    }

    /// Builds a transformer backed by the default resource mappers and a fresh generator.
    pub fn build_transformer(&self) -> CcdTransformer<DefaultResourceTransformer> {
        CcdTransformer::new(DefaultResourceTransformer::new(self.id_generator()))
            .with_full_urls(self.full_urls)
    }
}

/// Parse the identifier strategy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default ([`IdStrategy::RandomUnique`]).
pub fn id_strategy_from_env_value(value: Option<String>) -> TransformResult<IdStrategy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<IdStrategy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse the `fullUrl` switch from an optional string value.
///
/// Accepts `1/true/yes/on` and `0/false/no/off` (case-insensitive). Missing or blank is `false`.
pub fn full_urls_from_env_value(value: Option<String>) -> TransformResult<bool> {
    let Some(raw) = value else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(TransformError::InvalidConfig(format!(
            "expected a boolean for full URLs, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strategy_falls_back_to_uuid() {
        assert_eq!(
            id_strategy_from_env_value(None).unwrap(),
            IdStrategy::RandomUnique
        );
        assert_eq!(
            id_strategy_from_env_value(Some("   ".into())).unwrap(),
            IdStrategy::RandomUnique
        );
    }

    #[test]
    fn strategy_is_parsed() {
        assert_eq!(
            id_strategy_from_env_value(Some(" counter ".into())).unwrap(),
            IdStrategy::SequentialCounter
        );
    }

    #[test]
    fn bad_strategy_is_an_error() {
        let err = id_strategy_from_env_value(Some("guid".into())).expect_err("should fail");
        assert!(matches!(err, TransformError::Ids(_)));
    }

    #[test]
    fn full_urls_switch() {
        assert!(!full_urls_from_env_value(None).unwrap());
        assert!(!full_urls_from_env_value(Some("off".into())).unwrap());
        assert!(full_urls_from_env_value(Some("TRUE".into())).unwrap());

        let err = full_urls_from_env_value(Some("maybe".into())).expect_err("should fail");
        assert!(matches!(err, TransformError::InvalidConfig(msg) if msg.contains("maybe")));
    }

    #[test]
    fn generators_are_independent() {
        let config = TransformConfig::new(IdStrategy::SequentialCounter, false);

        let first = config.id_generator();
        let second = config.id_generator();
        first.next_id();

        assert_eq!(second.next_id(), "1");
        assert_eq!(first.next_id(), "2");
    }
}
