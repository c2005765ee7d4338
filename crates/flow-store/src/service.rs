//! Mutation service: the only sanctioned write path.
//!
//! `FlowService` wraps [`FlowStore`] and owns canonical record construction:
//! id and timestamp assignment, payload validation, shallow-merge patching.
//! No other component writes to the store directly; reads may go through
//! [`FlowService::store`].

use chrono::Utc;
use flow_core::entities::{Assessment, Candidate, Job, slugify};
use flow_core::enums::{CandidateStage, JobStatus};
use flow_core::errors::ValidationError;
use flow_core::ids::{PREFIX_CANDIDATE, PREFIX_JOB, generate_id};
use tokio::sync::OnceCell;

use crate::FlowStore;
use crate::error::StoreError;
use crate::patches::{CandidatePatch, JobPatch};

/// Payload for creating a job. Id, timestamp, and (by default) board order
/// are server-assigned.
#[derive(Debug, Clone, Default)]
pub struct NewJob {
    pub title: String,
    /// Defaults to a slugified title.
    pub slug: Option<String>,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub description: Option<String>,
    /// Defaults to one past the current maximum.
    pub order: Option<i64>,
}

/// Payload for creating a candidate.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub stage: CandidateStage,
    pub job_id: String,
}

/// Orchestrates validated mutations over the store.
pub struct FlowService {
    store: FlowStore,
    seed_flight: OnceCell<()>,
}

impl FlowService {
    /// Wrap an opened store.
    #[must_use]
    pub const fn new(store: FlowStore) -> Self {
        Self {
            store,
            seed_flight: OnceCell::const_new(),
        }
    }

    /// Access the underlying store (reads and tests).
    #[must_use]
    pub const fn store(&self) -> &FlowStore {
        &self.store
    }

    pub(crate) const fn seed_flight(&self) -> &OnceCell<()> {
        &self.seed_flight
    }

    /// Create a job: assign id, timestamp, default slug and order, persist,
    /// return the canonical stored record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for an empty title.
    pub async fn create_job(&self, new: NewJob) -> Result<Job, StoreError> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        let id = generate_id(PREFIX_JOB);
        let slug = match new.slug {
            Some(slug) if !slug.trim().is_empty() => slug,
            _ => {
                let derived = slugify(&new.title);
                // Titles with no alphanumerics slugify to nothing.
                if derived.is_empty() { id.clone() } else { derived }
            }
        };
        let order = match new.order {
            Some(order) => order,
            None => self.store.max_job_order().await? + 1,
        };
        let job = Job {
            id,
            title: new.title,
            slug,
            status: new.status,
            tags: new.tags,
            order,
            description: new.description,
            created_at: Utc::now(),
        };
        self.store.insert_job(&job).await?;
        tracing::debug!(id = %job.id, order = job.order, "job created");
        Ok(job)
    }

    /// Shallow-merge `patch` over the stored job and persist the result.
    /// Patch fields override; untouched fields survive.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the id is absent, `Validation` for an empty
    /// patched title.
    pub async fn update_job(&self, id: &str, patch: JobPatch) -> Result<Job, StoreError> {
        let mut job = self
            .store
            .get_job(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection: "jobs",
                key: id.to_string(),
            })?;
        if patch.is_empty() {
            return Ok(job);
        }

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyField { field: "title" }.into());
            }
            job.title = title;
        }
        if let Some(slug) = patch.slug {
            job.slug = slug;
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        if let Some(tags) = patch.tags {
            job.tags = tags;
        }
        if let Some(order) = patch.order {
            job.order = order;
        }
        if let Some(description) = patch.description {
            job.description = description;
        }

        self.store.put_job(&job).await?;
        tracing::debug!(id = %job.id, "job updated");
        Ok(job)
    }

    /// Create a candidate. The referenced job must exist.
    ///
    /// # Errors
    ///
    /// `StoreError::Validation` for empty name/email or an unknown job id.
    pub async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, StoreError> {
        if new.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" }.into());
        }
        if new.email.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "email" }.into());
        }
        self.require_job(&new.job_id).await?;

        let candidate = Candidate {
            id: generate_id(PREFIX_CANDIDATE),
            name: new.name,
            email: new.email,
            stage: new.stage,
            job_id: new.job_id,
            applied_at: Utc::now(),
            notes: vec![],
        };
        self.store.insert_candidate(&candidate).await?;
        tracing::debug!(id = %candidate.id, stage = %candidate.stage, "candidate created");
        Ok(candidate)
    }

    /// Shallow-merge `patch` over the stored candidate and persist.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the id is absent, `Validation` for an empty
    /// patched name or email, or a patched `job_id` referencing no job.
    pub async fn update_candidate(
        &self,
        id: &str,
        patch: CandidatePatch,
    ) -> Result<Candidate, StoreError> {
        let mut candidate =
            self.store
                .get_candidate(id)
                .await?
                .ok_or_else(|| StoreError::NotFound {
                    collection: "candidates",
                    key: id.to_string(),
                })?;
        if patch.is_empty() {
            return Ok(candidate);
        }

        if let Some(job_id) = patch.job_id {
            self.require_job(&job_id).await?;
            candidate.job_id = job_id;
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyField { field: "name" }.into());
            }
            candidate.name = name;
        }
        if let Some(email) = patch.email {
            if email.trim().is_empty() {
                return Err(ValidationError::EmptyField { field: "email" }.into());
            }
            candidate.email = email;
        }
        if let Some(stage) = patch.stage {
            candidate.stage = stage;
        }
        if let Some(notes) = patch.notes {
            candidate.notes = notes;
        }

        self.store.put_candidate(&candidate).await?;
        tracing::debug!(id = %candidate.id, stage = %candidate.stage, "candidate updated");
        Ok(candidate)
    }

    /// Fetch the assessment for a job.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read fails.
    pub async fn get_assessment(&self, job_id: &str) -> Result<Option<Assessment>, StoreError> {
        self.store.get_assessment(job_id).await
    }

    /// Upsert the assessment for a job. The `job_id` key is forced onto the
    /// record regardless of what the payload carried.
    ///
    /// # Errors
    ///
    /// `StoreError::Validation` for structural defects or an unknown job.
    pub async fn upsert_assessment(
        &self,
        job_id: &str,
        mut assessment: Assessment,
    ) -> Result<Assessment, StoreError> {
        self.require_job(job_id).await?;
        assessment.job_id = job_id.to_string();
        assessment.validate()?;
        self.store.put_assessment(&assessment).await?;
        tracing::debug!(job_id, "assessment upserted");
        Ok(assessment)
    }

    /// Rewrite board order for the given jobs in one transaction and return
    /// the canonical records, in the order of `changes`.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` (with nothing committed) if any id is absent.
    pub async fn reorder_jobs(&self, changes: &[(String, i64)]) -> Result<Vec<Job>, StoreError> {
        self.store.update_job_orders(changes).await?;
        let mut jobs = Vec::with_capacity(changes.len());
        for (id, _) in changes {
            let job = self
                .store
                .get_job(id)
                .await?
                .ok_or_else(|| StoreError::NotFound {
                    collection: "jobs",
                    key: id.clone(),
                })?;
            jobs.push(job);
        }
        tracing::debug!(count = changes.len(), "job order rewritten");
        Ok(jobs)
    }

    async fn require_job(&self, job_id: &str) -> Result<(), StoreError> {
        if self.store.get_job(job_id).await?.is_none() {
            return Err(ValidationError::UnknownJob {
                job_id: job_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
