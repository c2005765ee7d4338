use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::CandidateStage;

/// An applicant attached to a job.
///
/// `job_id` is validated against the jobs collection on write; the schema
/// itself does not enforce the reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub stage: CandidateStage,
    pub job_id: String,
    pub applied_at: DateTime<Utc>,
    /// Ordered, initially empty.
    pub notes: Vec<CandidateNote>,
}

/// A timestamped note on a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateNote {
    pub text: String,
    pub created_at: DateTime<Utc>,
}
