//! Snapshot query engine: filter, stable sort, paginate.
//!
//! Operates on full collection snapshots rather than pushing filters into
//! SQL. Collections are small (thousands of rows) and the UI needs
//! post-filter totals anyway. The sort key is explicit and reproducible;
//! slicing over an unspecified order would be meaningless.

use flow_core::entities::{Candidate, Job};
use flow_core::enums::{CandidateStage, JobStatus};
use flow_core::page::{PageRequest, PageResult};

/// Default page size for job listings.
pub const JOBS_PAGE_SIZE: u32 = 10;

/// Default page size for candidate listings.
pub const CANDIDATES_PAGE_SIZE: u32 = 50;

/// Filter for the jobs collection. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
    pub status: Option<JobStatus>,
}

/// Filter for the candidates collection. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    /// Case-insensitive substring match against name or email.
    pub search: Option<String>,
    pub stage: Option<CandidateStage>,
}

fn matches_search(needle: Option<&str>, haystacks: &[&str]) -> bool {
    needle.is_none_or(|needle| {
        let needle = needle.to_lowercase();
        haystacks
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
    })
}

/// Query a jobs snapshot: filter, sort by `(order, id)`, slice one page.
///
/// Jobs sort by their persisted `order` field, the canonical board
/// sequence, with the id as tiebreaker, so committed reorders are
/// observable through pagination.
#[must_use]
pub fn query_jobs(snapshot: Vec<Job>, filter: &JobFilter, page: PageRequest) -> PageResult<Job> {
    let mut hits: Vec<Job> = snapshot
        .into_iter()
        .filter(|job| {
            filter.status.is_none_or(|status| job.status == status)
                && matches_search(filter.search.as_deref(), &[&job.title])
        })
        .collect();
    hits.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
    PageResult::slice(hits, page)
}

/// Query a candidates snapshot: filter, sort by `(applied_at, id)`
/// (creation order), slice one page.
#[must_use]
pub fn query_candidates(
    snapshot: Vec<Candidate>,
    filter: &CandidateFilter,
    page: PageRequest,
) -> PageResult<Candidate> {
    let mut hits: Vec<Candidate> = snapshot
        .into_iter()
        .filter(|candidate| {
            filter.stage.is_none_or(|stage| candidate.stage == stage)
                && matches_search(
                    filter.search.as_deref(),
                    &[&candidate.name, &candidate.email],
                )
        })
        .collect();
    hits.sort_by(|a, b| {
        a.applied_at
            .cmp(&b.applied_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    PageResult::slice(hits, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn job(id: &str, title: &str, status: JobStatus, order: i64) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            slug: flow_core::entities::slugify(title),
            status,
            tags: vec![],
            order,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn jobs_fixture() -> Vec<Job> {
        vec![
            job("job-3", "Staff Platform Engineer", JobStatus::Active, 3),
            job("job-1", "Frontend Engineer", JobStatus::Active, 1),
            job("job-2", "Backend Engineer", JobStatus::Archived, 2),
        ]
    }

    #[test]
    fn sorts_by_order_then_id() {
        let page = query_jobs(
            jobs_fixture(),
            &JobFilter::default(),
            PageRequest { page: 1, page_size: 10 },
        );
        let ids: Vec<&str> = page.data.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job-1", "job-2", "job-3"]);
    }

    #[test]
    fn status_filter_is_exact() {
        let filter = JobFilter {
            status: Some(JobStatus::Archived),
            ..JobFilter::default()
        };
        let page = query_jobs(jobs_fixture(), &filter, PageRequest { page: 1, page_size: 10 });
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.data[0].id, "job-2");
    }

    #[rstest]
    #[case("engineer", 3)]
    #[case("ENGINEER", 3)]
    #[case("front", 1)]
    #[case("quantum", 0)]
    fn search_is_case_insensitive_substring(#[case] needle: &str, #[case] expected: u32) {
        let filter = JobFilter {
            search: Some(needle.to_string()),
            ..JobFilter::default()
        };
        let page = query_jobs(jobs_fixture(), &filter, PageRequest { page: 1, page_size: 10 });
        assert_eq!(page.pagination.total, expected);
    }

    #[test]
    fn pages_partition_the_filtered_set() {
        let snapshot: Vec<Job> = (0..47)
            .map(|i| job(&format!("job-{i:03}"), "Engineer", JobStatus::Active, i))
            .collect();
        let page_size = 10;

        let full = query_jobs(
            snapshot.clone(),
            &JobFilter::default(),
            PageRequest { page: 1, page_size: 100 },
        );
        let total_pages = full.pagination.total.div_ceil(page_size);

        let mut rebuilt: Vec<String> = Vec::new();
        for page in 1..=total_pages {
            let result = query_jobs(
                snapshot.clone(),
                &JobFilter::default(),
                PageRequest { page, page_size },
            );
            // Slices are disjoint: no id seen twice.
            for j in &result.data {
                assert!(!rebuilt.contains(&j.id));
                rebuilt.push(j.id.clone());
            }
        }
        let expected: Vec<String> = full.data.into_iter().map(|j| j.id).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn candidates_sort_by_applied_at() {
        let base = Utc::now();
        let mk = |id: &str, offset: i64| Candidate {
            id: id.to_string(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            stage: CandidateStage::Applied,
            job_id: "job-1".into(),
            applied_at: base + Duration::minutes(offset),
            notes: vec![],
        };
        let page = query_candidates(
            vec![mk("cnd-b", 5), mk("cnd-a", 1)],
            &CandidateFilter::default(),
            PageRequest { page: 1, page_size: 10 },
        );
        let ids: Vec<&str> = page.data.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cnd-a", "cnd-b"]);
    }

    #[test]
    fn candidate_search_covers_email() {
        let candidate = Candidate {
            id: "cnd-1".into(),
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            stage: CandidateStage::Screen,
            job_id: "job-1".into(),
            applied_at: Utc::now(),
            notes: vec![],
        };
        let filter = CandidateFilter {
            search: Some("EXAMPLE.COM".into()),
            ..CandidateFilter::default()
        };
        let page = query_candidates(
            vec![candidate],
            &filter,
            PageRequest { page: 1, page_size: 10 },
        );
        assert_eq!(page.pagination.total, 1);
    }
}
