//! Internal implementation of the identifier generator.

use crate::{IdError, IdResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// How new resource identifiers are minted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdStrategy {
    /// A freshly generated UUID v4 per call, independent of call history.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "uuid"))]
    RandomUnique,

    /// A monotonically increasing integer rendered as text, starting from `"1"`.
    #[cfg_attr(feature = "serde", serde(rename = "counter"))]
    SequentialCounter,
}

impl IdStrategy {
    /// Canonical short name, as accepted by [`IdStrategy::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            IdStrategy::RandomUnique => "uuid",
            IdStrategy::SequentialCounter => "counter",
        }
    }

    /// Parses a strategy name.
    ///
    /// Accepts `uuid`/`random` and `counter`/`sequential`, case-insensitively and ignoring
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidStrategy`] for any other input.
    pub fn parse(input: &str) -> IdResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "uuid" | "random" => Ok(IdStrategy::RandomUnique),
            "counter" | "sequential" => Ok(IdStrategy::SequentialCounter),
            _ => Err(IdError::InvalidStrategy(input.to_string())),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdStrategy::parse(s)
    }
}

/// Assigns a unique textual identifier to every newly created resource.
///
/// The generator is `Send + Sync`. Under [`IdStrategy::SequentialCounter`] the counter is
/// incremented with a single atomic `fetch_add`, so concurrent callers sharing one generator
/// can never be handed the same value and no value is skipped.
///
/// # Construction
/// - [`IdGenerator::new`] picks the strategy explicitly.
/// - [`IdGenerator::default`] uses [`IdStrategy::RandomUnique`].
#[derive(Debug, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counter: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator for `strategy`. Counters start at zero, so the first id is `"1"`.
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counter: AtomicU64::new(0),
        }
    }

    /// Returns the strategy this generator was built with.
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Returns the next identifier.
    ///
    /// Never fails. In counter mode this mutates the shared counter.
    pub fn next_id(&self) -> String {
        match self.strategy {
            IdStrategy::RandomUnique => Uuid::new_v4().hyphenated().to_string(),
            IdStrategy::SequentialCounter => {
                let value = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                value.to_string()
            }
        }
    }

    /// Number of identifiers handed out so far in counter mode (always 0 for UUIDs).
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn counter_starts_at_one_and_increments() {
        let ids = IdGenerator::new(IdStrategy::SequentialCounter);

        let issued: Vec<String> = (0..5).map(|_| ids.next_id()).collect();

        assert_eq!(issued, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(ids.issued(), 5);
    }

    #[test]
    fn counter_is_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new(IdStrategy::SequentialCounter));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().expect("worker thread panicked") {
                assert!(seen.insert(id), "duplicate id issued");
            }
        }

        assert_eq!(seen.len(), 2000);
        let expected: HashSet<String> = (1..=2000).map(|n: u64| n.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn uuid_strategy_yields_hyphenated_v4() {
        let ids = IdGenerator::default();
        let id = ids.next_id();

        assert_eq!(id.len(), 36);
        let parsed = Uuid::parse_str(&id).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn uuid_strategy_does_not_repeat() {
        let ids = IdGenerator::new(IdStrategy::RandomUnique);
        let a = ids.next_id();
        let b = ids.next_id();

        assert_ne!(a, b);
    }

    #[test]
    fn parse_accepts_aliases_case_insensitively() {
        assert_eq!(IdStrategy::parse("uuid").unwrap(), IdStrategy::RandomUnique);
        assert_eq!(IdStrategy::parse(" Random ").unwrap(), IdStrategy::RandomUnique);
        assert_eq!(
            IdStrategy::parse("COUNTER").unwrap(),
            IdStrategy::SequentialCounter
        );
        assert_eq!(
            "sequential".parse::<IdStrategy>().unwrap(),
            IdStrategy::SequentialCounter
        );
    }

    #[test]
    fn parse_rejects_unknown_names() {
        match IdStrategy::parse("snowflake") {
            Err(IdError::InvalidStrategy(name)) => assert_eq!(name, "snowflake"),
            other => panic!("expected InvalidStrategy, got {other:?}"),
        }
    }

    #[test]
    fn display_matches_canonical_name() {
        assert_eq!(IdStrategy::RandomUnique.to_string(), "uuid");
        assert_eq!(IdStrategy::SequentialCounter.to_string(), "counter");
    }

    #[test]
    fn serde_uses_short_names() {
        let json = serde_json::to_string(&IdStrategy::SequentialCounter).unwrap();
        assert_eq!(json, "\"counter\"");

        let parsed: IdStrategy = serde_json::from_str("\"uuid\"").unwrap();
        assert_eq!(parsed, IdStrategy::RandomUnique);
    }
}
