//! Entity structs for the three TalentFlow collections.
//!
//! Each entity maps to one row in its libSQL collection table. All structs
//! derive `Serialize`/`Deserialize` for JSON round-trips; ordered
//! sub-structures (tags, notes, sections) are persisted as JSON columns.

mod assessment;
mod candidate;
mod job;

pub use assessment::{Assessment, Question, QuestionKind, Section};
pub use candidate::{Candidate, CandidateNote};
pub use job::{Job, slugify};
