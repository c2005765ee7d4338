//! Lane targets, conflict policy, and settle events.

use std::fmt;

/// The board region a mutation speculates over. One lane admits at most one
/// in-flight mutation at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The ordered job list (reorders).
    JobList,
    /// One candidate's card (stage moves).
    Candidate(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JobList => f.write_str("job list"),
            Self::Candidate(id) => write!(f, "candidate {id}"),
        }
    }
}

/// What to do when a mutation is begun on a lane that already has one in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnConflict {
    /// Refuse the new mutation and keep the in-flight one.
    #[default]
    Reject,
    /// Admit the new mutation and fence the in-flight one off: its settle
    /// will be discarded, and the lane keeps the original pre-speculation
    /// snapshot for rollback.
    Supersede,
}

/// How a dispatched mutation settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The write landed; the board now holds the canonical records.
    Committed,
    /// The write failed; the board was restored to its pre-mutation
    /// snapshot.
    RolledBack { error: String },
    /// A newer mutation claimed the lane first; this settle changed nothing.
    Discarded,
}

/// Emitted once per begun mutation, when its fate is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleEvent {
    pub target: Target,
    pub seq: u64,
    pub outcome: SettleOutcome,
}
