//! Prefixed ID generation.
//!
//! IDs are time-derived and strictly monotonic within a process: the
//! millisecond timestamp is clamped to be greater than the last issued tick,
//! so two calls in the same millisecond still produce distinct, ordered ids.
//! Format: `"job-18f2a4c9b10"` (prefix, dash, lowercase hex tick).

use std::sync::atomic::{AtomicU64, Ordering};

pub const PREFIX_JOB: &str = "job";
pub const PREFIX_CANDIDATE: &str = "cnd";
pub const PREFIX_SECTION: &str = "sec";
pub const PREFIX_QUESTION: &str = "qst";

static LAST_TICK: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh prefixed id, e.g. `"cnd-18f2a4c9b10"`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    let tick = LAST_TICK
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .map_or(now, |last| now.max(last + 1));
    format!("{prefix}-{tick:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_prefixed_hex() {
        let id = generate_id(PREFIX_JOB);
        let (prefix, tick) = id.split_once('-').unwrap();
        assert_eq!(prefix, "job");
        assert!(tick.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let ids: Vec<String> = (0..200).map(|_| generate_id(PREFIX_CANDIDATE)).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());

        let ticks: Vec<u64> = ids
            .iter()
            .map(|id| u64::from_str_radix(id.split_once('-').unwrap().1, 16).unwrap())
            .collect();
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }
}
