//! Identifier minting for new records.
//!
//! The id source is injected so callers (and tests) control the scheme; the
//! engine never reaches for the wall clock.
use uuid::Uuid;

use crate::RecordId;

pub trait IdSource {
    /// Mints an identifier unique within the local session.
    fn mint(&mut self) -> RecordId;
}

/// Production source: random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn mint(&mut self) -> RecordId {
        RecordId::from(Uuid::new_v4().to_string())
    }
}

/// Deterministic source for tests: "1", "2", "3", ...
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceSource {
    next: u64,
}

impl SequenceSource {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl IdSource for SequenceSource {
    fn mint(&mut self) -> RecordId {
        self.next += 1;
        RecordId::from(self.next.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_source_mints_distinct_ids() {
        let mut source = UuidSource;
        assert_ne!(source.mint(), source.mint());
    }

    #[test]
    fn sequence_source_is_deterministic() {
        let mut source = SequenceSource::new();
        assert_eq!(source.mint(), RecordId::from("1"));
        assert_eq!(source.mint(), RecordId::from("2"));
        assert_eq!(source.mint(), RecordId::from("3"));
    }
}
