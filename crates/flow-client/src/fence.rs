//! Read-staleness fencing.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket counter guarding one collection's reads.
///
/// A slow in-flight query is stale once a newer query or a write has been
/// issued against the same collection. Its result should be dropped rather
/// than rendered over fresher data, so fenced reads return `None` when their
/// ticket is no longer current.
#[derive(Debug, Default)]
pub struct QueryFence {
    seq: AtomicU64,
}

impl QueryFence {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
        }
    }

    /// Claim the next ticket. The previous ticket holder becomes stale.
    pub fn issue(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the latest issued.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket
    }

    /// Mark every outstanding ticket stale without claiming one. Called
    /// after writes so pre-write reads cannot land on top of new data.
    pub fn invalidate(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_wins() {
        let fence = QueryFence::new();
        let first = fence.issue();
        let second = fence.issue();
        assert!(!fence.is_current(first));
        assert!(fence.is_current(second));
    }

    #[test]
    fn invalidate_stales_the_holder() {
        let fence = QueryFence::new();
        let ticket = fence.issue();
        assert!(fence.is_current(ticket));
        fence.invalidate();
        assert!(!fence.is_current(ticket));
    }
}
