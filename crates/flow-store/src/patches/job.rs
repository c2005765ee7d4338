//! Job patch builder.

use flow_core::enums::JobStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl JobPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.status.is_none()
            && self.tags.is_none()
            && self.order.is_none()
            && self.description.is_none()
    }
}

pub struct JobPatchBuilder(JobPatch);

impl JobPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(JobPatch::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.0.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: JobStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.0.tags = Some(tags);
        self
    }

    #[must_use]
    pub const fn order(mut self, order: i64) -> Self {
        self.0.order = Some(order);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn build(self) -> JobPatch {
        self.0
    }
}

impl Default for JobPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
