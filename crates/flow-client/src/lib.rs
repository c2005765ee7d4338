//! # flow-client
//!
//! Transport-gated facade over the TalentFlow store.
//!
//! [`FlowClient`] is the surface the UI layer talks to. Every operation
//! first acquires a permit from the configured [`Transport`], so callers
//! experience the simulated latency and write faults of a remote API even
//! though all state lives in the local store. Connecting opens the store,
//! runs migrations, and seeds empty collections.

mod error;
mod fence;
mod queries;

pub use error::ClientError;
pub use fence::QueryFence;
pub use queries::{CandidateQuery, JobQuery};

use flow_config::FlowConfig;
use flow_core::entities::{Assessment, Candidate, Job};
use flow_core::page::PageResult;
use flow_net::{OpKind, SimulatedTransport, Transport};
use flow_store::FlowStore;
use flow_store::patches::{CandidatePatch, JobPatch};
use flow_store::query::{query_candidates, query_jobs};
use flow_store::service::{FlowService, NewCandidate, NewJob};

/// Client handle over the store, the mutation service, and a transport.
///
/// Reads pay transport latency; writes additionally risk a transient fault,
/// raised before the store is touched. Each collection carries a
/// [`QueryFence`] so superseded reads can be detected.
pub struct FlowClient<T: Transport> {
    service: FlowService,
    transport: T,
    jobs_fence: QueryFence,
    candidates_fence: QueryFence,
}

impl FlowClient<SimulatedTransport> {
    /// Open the configured store, migrate, seed, and wrap it in the
    /// simulated transport.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the store cannot be opened or seeded.
    pub async fn connect(config: &FlowConfig) -> Result<Self, ClientError> {
        Self::with_transport(config, SimulatedTransport::new(&config.sim)).await
    }
}

impl<T: Transport> FlowClient<T> {
    /// Like [`FlowClient::connect`] but with a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Store` if the store cannot be opened or seeded.
    pub async fn with_transport(config: &FlowConfig, transport: T) -> Result<Self, ClientError> {
        let store = if config.store.is_memory() {
            FlowStore::open_memory().await?
        } else {
            FlowStore::open(&config.store.path).await?
        };
        let service = FlowService::new(store);
        service.ensure_seeded(&config.seed).await?;
        Ok(Self {
            service,
            transport,
            jobs_fence: QueryFence::new(),
            candidates_fence: QueryFence::new(),
        })
    }

    /// Access the mutation service (and through it, the raw store).
    #[must_use]
    pub const fn service(&self) -> &FlowService {
        &self.service
    }

    /// Access the transport, for callers that need to stage a permit apart
    /// from the store call it guards.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// List jobs: filter, sort by board order, paginate.
    ///
    /// # Errors
    ///
    /// `ClientError::Transport` on a refused permit, `Store` on read failure.
    pub async fn get_jobs(&self, query: &JobQuery) -> Result<PageResult<Job>, ClientError> {
        self.transport.permit(OpKind::Read).await?;
        let snapshot = self.service.store().list_jobs().await?;
        Ok(query_jobs(snapshot, &query.filter(), query.page()))
    }

    /// Fenced variant of [`Self::get_jobs`]: returns `None` when a newer
    /// jobs read or write was issued while this one was in flight.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_jobs`].
    pub async fn get_jobs_latest(
        &self,
        query: &JobQuery,
    ) -> Result<Option<PageResult<Job>>, ClientError> {
        let ticket = self.jobs_fence.issue();
        let page = self.get_jobs(query).await?;
        if !self.jobs_fence.is_current(ticket) {
            tracing::debug!(ticket, "dropping stale jobs read");
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// List candidates: filter, sort by application time, paginate.
    ///
    /// # Errors
    ///
    /// `ClientError::Transport` on a refused permit, `Store` on read failure.
    pub async fn get_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<PageResult<Candidate>, ClientError> {
        self.transport.permit(OpKind::Read).await?;
        let snapshot = self.service.store().list_candidates().await?;
        Ok(query_candidates(snapshot, &query.filter(), query.page()))
    }

    /// Fenced variant of [`Self::get_candidates`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_candidates`].
    pub async fn get_candidates_latest(
        &self,
        query: &CandidateQuery,
    ) -> Result<Option<PageResult<Candidate>>, ClientError> {
        let ticket = self.candidates_fence.issue();
        let page = self.get_candidates(query).await?;
        if !self.candidates_fence.is_current(ticket) {
            tracing::debug!(ticket, "dropping stale candidates read");
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Create a job through the mutation service.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit (nothing persisted), `Store` on
    /// validation or write failure.
    pub async fn create_job(&self, new: NewJob) -> Result<Job, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        let job = self.service.create_job(new).await?;
        self.jobs_fence.invalidate();
        Ok(job)
    }

    /// Shallow-merge `patch` over the stored job.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store` for an unknown id or
    /// validation failure.
    pub async fn update_job(&self, id: &str, patch: JobPatch) -> Result<Job, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        let job = self.service.update_job(id, patch).await?;
        self.jobs_fence.invalidate();
        Ok(job)
    }

    /// Create a candidate through the mutation service.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store` on validation or write
    /// failure.
    pub async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        let candidate = self.service.create_candidate(new).await?;
        self.candidates_fence.invalidate();
        Ok(candidate)
    }

    /// Shallow-merge `patch` over the stored candidate.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store` for an unknown id or
    /// validation failure.
    pub async fn update_candidate(
        &self,
        id: &str,
        patch: CandidatePatch,
    ) -> Result<Candidate, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        let candidate = self.service.update_candidate(id, patch).await?;
        self.candidates_fence.invalidate();
        Ok(candidate)
    }

    /// Fetch the assessment attached to a job, if any.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store` on read failure.
    pub async fn get_assessment(&self, job_id: &str) -> Result<Option<Assessment>, ClientError> {
        self.transport.permit(OpKind::Read).await?;
        Ok(self.service.get_assessment(job_id).await?)
    }

    /// Create or replace the assessment for a job.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store` for an unknown job or a
    /// structurally invalid assessment.
    pub async fn upsert_assessment(
        &self,
        job_id: &str,
        assessment: Assessment,
    ) -> Result<Assessment, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        Ok(self.service.upsert_assessment(job_id, assessment).await?)
    }

    /// Rewrite board order for the given jobs in one transaction. A refused
    /// permit or an unknown id leaves every order untouched.
    ///
    /// # Errors
    ///
    /// `Transport` on a refused permit, `Store::NotFound` if any id is
    /// absent.
    pub async fn reorder_jobs(&self, changes: &[(String, i64)]) -> Result<Vec<Job>, ClientError> {
        self.transport.permit(OpKind::Write).await?;
        let jobs = self.service.reorder_jobs(changes).await?;
        self.jobs_fence.invalidate();
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_config::{SeedConfig, SimConfig};
    use flow_net::{DirectTransport, ScriptedTransport, Step};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn memory_config() -> FlowConfig {
        let mut config = FlowConfig::default();
        config.store.path = ":memory:".into();
        config.sim = SimConfig::instant();
        config.seed = SeedConfig {
            jobs: 5,
            candidates: 20,
            assessments: 2,
            ..SeedConfig::default()
        };
        config
    }

    async fn direct_client() -> FlowClient<DirectTransport> {
        FlowClient::with_transport(&memory_config(), DirectTransport)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn connect_seeds_empty_collections() {
        let client = direct_client().await;
        let jobs = client.get_jobs(&JobQuery::default()).await.unwrap();
        assert_eq!(jobs.pagination.total, 5);

        let candidates = client
            .get_candidates(&CandidateQuery::default())
            .await
            .unwrap();
        assert_eq!(candidates.pagination.total, 20);
    }

    #[tokio::test]
    async fn created_job_is_immediately_searchable() {
        let client = direct_client().await;
        client
            .create_job(NewJob {
                title: "Quantum Widget Wrangler".into(),
                ..NewJob::default()
            })
            .await
            .unwrap();

        let query = JobQuery {
            search: Some("quantum".into()),
            ..JobQuery::default()
        };
        let page = client.get_jobs(&query).await.unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.data[0].title, "Quantum Widget Wrangler");
    }

    #[tokio::test]
    async fn refused_write_persists_nothing() {
        let transport = ScriptedTransport::new([Step::fault(Duration::ZERO)]);
        let client = FlowClient::with_transport(&memory_config(), transport)
            .await
            .unwrap();
        let before = client.get_jobs(&JobQuery::default()).await.unwrap();

        let err = client
            .create_job(NewJob {
                title: "Never lands".into(),
                ..NewJob::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_transient());

        let after = client.get_jobs(&JobQuery::default()).await.unwrap();
        assert_eq!(after.pagination.total, before.pagination.total);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_read_overtaken_by_write_is_dropped() {
        // The jobs read pays 100ms; the write lands while it is in flight.
        let transport = ScriptedTransport::with_reads(
            [Step::ok(Duration::from_millis(100))],
            [],
        );
        let client = Arc::new(
            FlowClient::with_transport(&memory_config(), transport)
                .await
                .unwrap(),
        );

        let reader = {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_jobs_latest(&JobQuery::default()).await })
        };
        // Let the reader claim its ticket and park on the transport delay.
        tokio::task::yield_now().await;

        client
            .create_job(NewJob {
                title: "Supersedes the read".into(),
                ..NewJob::default()
            })
            .await
            .unwrap();

        let stale = reader.await.unwrap().unwrap();
        assert_eq!(stale, None);

        // A fresh fenced read is current again and sees the write.
        let fresh = client
            .get_jobs_latest(&JobQuery::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.pagination.total, 6);
    }

    #[tokio::test]
    async fn pagination_defaults_differ_per_collection() {
        let mut config = memory_config();
        config.seed.jobs = 15;
        config.seed.candidates = 60;
        let client = FlowClient::with_transport(&config, DirectTransport)
            .await
            .unwrap();

        let jobs = client.get_jobs(&JobQuery::default()).await.unwrap();
        assert_eq!(jobs.data.len(), 10);
        assert_eq!(jobs.pagination.total_pages, 2);

        let candidates = client
            .get_candidates(&CandidateQuery::default())
            .await
            .unwrap();
        assert_eq!(candidates.data.len(), 50);
        assert_eq!(candidates.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn assessment_round_trip_through_client() {
        let client = direct_client().await;
        let jobs = client.get_jobs(&JobQuery::default()).await.unwrap();
        let job_id = jobs.data[0].id.clone();

        let assessment = Assessment {
            job_id: String::new(),
            title: "Revised screen".into(),
            sections: vec![],
        };
        let stored = client.upsert_assessment(&job_id, assessment).await.unwrap();
        assert_eq!(stored.job_id, job_id);

        let fetched = client.get_assessment(&job_id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Revised screen");
    }

    #[tokio::test]
    async fn reorder_through_client_changes_listing_order() {
        let client = direct_client().await;
        let jobs = client.get_jobs(&JobQuery::default()).await.unwrap();
        let first = jobs.data[0].clone();
        let second = jobs.data[1].clone();

        client
            .reorder_jobs(&[
                (first.id.clone(), second.order),
                (second.id.clone(), first.order),
            ])
            .await
            .unwrap();

        let reordered = client.get_jobs(&JobQuery::default()).await.unwrap();
        assert_eq!(reordered.data[0].id, second.id);
        assert_eq!(reordered.data[1].id, first.id);
    }
}
