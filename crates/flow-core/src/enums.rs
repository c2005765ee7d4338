//! Status enums for jobs and candidates.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and provide `as_str()` for SQL storage plus `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a job posting. Jobs are never deleted; archiving is a
/// status value, not removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Archived,
}

impl JobStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CandidateStage
// ---------------------------------------------------------------------------

/// Pipeline stage of a candidate on the hiring board.
///
/// The board allows free movement between stages (drag-and-drop), so no
/// transition table is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

impl CandidateStage {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Screen => "screen",
            Self::Tech => "tech",
            Self::Offer => "offer",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    /// All stages in board column order.
    pub const ALL: [Self; 6] = [
        Self::Applied,
        Self::Screen,
        Self::Tech,
        Self::Offer,
        Self::Hired,
        Self::Rejected,
    ];

    /// Whether the candidate has left the active pipeline.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Archived).unwrap(),
            "\"archived\""
        );
        let parsed: JobStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, JobStatus::Active);
    }

    #[test]
    fn stage_as_str_matches_serde() {
        for stage in CandidateStage::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn terminal_stages() {
        assert!(CandidateStage::Hired.is_terminal());
        assert!(CandidateStage::Rejected.is_terminal());
        assert!(!CandidateStage::Offer.is_terminal());
    }
}
