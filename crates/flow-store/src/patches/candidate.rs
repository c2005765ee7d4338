//! Candidate patch builder.

use flow_core::entities::CandidateNote;
use flow_core::enums::CandidateStage;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<CandidateStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<CandidateNote>>,
}

impl CandidatePatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.stage.is_none()
            && self.job_id.is_none()
            && self.notes.is_none()
    }
}

pub struct CandidatePatchBuilder(CandidatePatch);

impl CandidatePatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(CandidatePatch::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.0.email = Some(email.into());
        self
    }

    #[must_use]
    pub const fn stage(mut self, stage: CandidateStage) -> Self {
        self.0.stage = Some(stage);
        self
    }

    #[must_use]
    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.0.job_id = Some(job_id.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Vec<CandidateNote>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> CandidatePatch {
        self.0
    }
}

impl Default for CandidatePatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
