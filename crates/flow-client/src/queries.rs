//! Caller-facing query parameter structs.

use flow_core::enums::{CandidateStage, JobStatus};
use flow_core::page::PageRequest;
use flow_store::query::{
    CANDIDATES_PAGE_SIZE, CandidateFilter, JOBS_PAGE_SIZE, JobFilter,
};

/// Parameters for a jobs listing. Absent fields mean no filtering and
/// default pagination.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl JobQuery {
    pub(crate) fn filter(&self) -> JobFilter {
        JobFilter {
            search: self.search.clone(),
            status: self.status,
        }
    }

    pub(crate) fn page(&self) -> PageRequest {
        PageRequest::resolve(self.page, self.page_size, JOBS_PAGE_SIZE)
    }
}

/// Parameters for a candidates listing.
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    /// Case-insensitive substring match against name or email.
    pub search: Option<String>,
    pub stage: Option<CandidateStage>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl CandidateQuery {
    pub(crate) fn filter(&self) -> CandidateFilter {
        CandidateFilter {
            search: self.search.clone(),
            stage: self.stage,
        }
    }

    pub(crate) fn page(&self) -> PageRequest {
        PageRequest::resolve(self.page, self.page_size, CANDIDATES_PAGE_SIZE)
    }
}
