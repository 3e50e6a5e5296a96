//! Submission identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Produces submission ids.
pub trait IdGenerator: Send + Sync {
    /// Id for a submission taken at `at`.
    fn next_id(&self, at: OffsetDateTime) -> String;
}

/// Unix epoch milliseconds as a decimal string.
///
/// Two submissions within the same millisecond share an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIds;

impl IdGenerator for TimestampIds {
    fn next_id(&self, at: OffsetDateTime) -> String {
        (at.unix_timestamp_nanos() / 1_000_000).to_string()
    }
}

/// Monotonic counter ids, independent of the clock.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, _at: OffsetDateTime) -> String {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn timestamp_ids_collide_within_a_millisecond() {
        let a = TimestampIds.next_id(datetime!(2025-01-01 00:00:00.000100 UTC));
        let b = TimestampIds.next_id(datetime!(2025-01-01 00:00:00.000900 UTC));
        assert_eq!(a, b);
        assert_eq!(a, "1735689600000");
    }

    #[test]
    fn sequential_ids_never_repeat() {
        let ids = SequentialIds::starting_at(7);
        let at = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(ids.next_id(at), "7");
        assert_eq!(ids.next_id(at), "8");
    }
}
