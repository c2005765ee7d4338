//! One-time population of empty collections with synthetic data.
//!
//! Seeding is single-flight: concurrent callers of `ensure_seeded` share one
//! pass through a `tokio::sync::OnceCell` rather than racing a
//! check-then-insert. The dataset itself comes from a fixed-seed RNG, so
//! cardinalities and shapes are reproducible.

use chrono::{Duration, Utc};
use flow_core::entities::{Assessment, Candidate, Job, Question, QuestionKind, Section, slugify};
use flow_core::enums::{CandidateStage, JobStatus};
use flow_core::ids::{
    PREFIX_CANDIDATE, PREFIX_JOB, PREFIX_QUESTION, PREFIX_SECTION, generate_id,
};
use flow_config::SeedConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::StoreError;
use crate::service::FlowService;

const JOB_ROLES: [&str; 8] = [
    "Frontend Engineer",
    "Backend Engineer",
    "Full-Stack Developer",
    "Product Designer",
    "Data Analyst",
    "DevOps Engineer",
    "QA Engineer",
    "Engineering Manager",
];

const JOB_LEVELS: [&str; 3] = ["Junior", "Mid-Level", "Senior"];

const TAG_POOL: [&str; 7] = [
    "remote", "onsite", "hybrid", "full-time", "part-time", "contract", "urgent",
];

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Margaret", "Dennis", "Radia",
    "Ken", "Frances", "Linus",
];

const LAST_NAMES: [&str; 12] = [
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Hamilton", "Ritchie",
    "Perlman", "Thompson", "Allen", "Torvalds",
];

const AGREEMENT_SCALE: [&str; 4] = ["Strongly disagree", "Disagree", "Agree", "Strongly agree"];

const QUESTION_PROMPTS: [&str; 12] = [
    "I enjoy working in cross-functional teams.",
    "Which of these technologies have you shipped to production?",
    "Briefly describe your current role.",
    "Walk us through a project you are proud of.",
    "How many years of relevant experience do you have?",
    "Attach your most recent portfolio or CV.",
    "I prefer written communication over meetings.",
    "Which deployment workflows are you comfortable with?",
    "What is your notice period?",
    "Describe a production incident you handled end to end.",
    "Rate your comfort with on-call duty from 0 to 10.",
    "Upload a code sample you are allowed to share.",
];

/// Text limit for short/long answers in seeded assessments.
const TEXT_MAX_LENGTH: u32 = 500;

/// Questions per seeded assessment section.
const QUESTIONS_PER_SECTION: usize = 12;

struct SeedDataset {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    assessments: Vec<Assessment>,
}

impl FlowService {
    /// Populate empty collections with the synthetic dataset, exactly once.
    ///
    /// No-op when the jobs collection is already non-empty. Concurrent
    /// callers await the single seeding pass.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any insert fails; the cell stays unset so a
    /// later call can retry.
    pub async fn ensure_seeded(&self, cfg: &SeedConfig) -> Result<(), StoreError> {
        self.seed_flight()
            .get_or_try_init(|| async {
                if self.store().count_jobs().await? > 0 {
                    tracing::debug!("jobs collection non-empty, skipping seed");
                    return Ok(());
                }
                let dataset = build_dataset(cfg);
                self.store().insert_jobs(&dataset.jobs).await?;
                self.store().insert_candidates(&dataset.candidates).await?;
                for assessment in &dataset.assessments {
                    self.store().put_assessment(assessment).await?;
                }
                tracing::info!(
                    jobs = dataset.jobs.len(),
                    candidates = dataset.candidates.len(),
                    assessments = dataset.assessments.len(),
                    "seeded synthetic dataset"
                );
                Ok(())
            })
            .await
            .map(|()| ())
    }
}

fn build_dataset(cfg: &SeedConfig) -> SeedDataset {
    let mut rng = StdRng::seed_from_u64(cfg.rng_seed);
    let jobs = build_jobs(cfg, &mut rng);
    let candidates = build_candidates(cfg, &mut rng, &jobs);
    let assessments = build_assessments(cfg, &jobs);
    SeedDataset {
        jobs,
        candidates,
        assessments,
    }
}

fn build_jobs(cfg: &SeedConfig, rng: &mut StdRng) -> Vec<Job> {
    let now = Utc::now();
    let total = i64::from(cfg.jobs);
    (0..cfg.jobs as usize)
        .map(|i| {
            let title = format!(
                "{} {}",
                JOB_LEVELS[i % JOB_LEVELS.len()],
                JOB_ROLES[i % JOB_ROLES.len()]
            );
            let tag_count = rng.gen_range(1..=3);
            let tags: Vec<String> = TAG_POOL
                .choose_multiple(rng, tag_count)
                .map(ToString::to_string)
                .collect();
            let status = if rng.gen_bool(0.7) {
                JobStatus::Active
            } else {
                JobStatus::Archived
            };
            Job {
                id: generate_id(PREFIX_JOB),
                slug: slugify(&title),
                title,
                status,
                tags,
                order: i as i64 + 1,
                description: Some(format!(
                    "We are hiring a {} to join the team.",
                    JOB_ROLES[i % JOB_ROLES.len()].to_lowercase()
                )),
                created_at: now - Duration::minutes(total - i as i64),
            }
        })
        .collect()
}

fn build_candidates(cfg: &SeedConfig, rng: &mut StdRng, jobs: &[Job]) -> Vec<Candidate> {
    if jobs.is_empty() {
        // Candidates must reference a job; nothing to attach them to.
        return vec![];
    }
    let now = Utc::now();
    let total = i64::from(cfg.candidates);
    (0..cfg.candidates as usize)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            let stage = CandidateStage::ALL[rng.gen_range(0..CandidateStage::ALL.len())];
            let job_id = jobs[rng.gen_range(0..jobs.len())].id.clone();
            Candidate {
                id: generate_id(PREFIX_CANDIDATE),
                name: format!("{first} {last}"),
                email: format!("{}.{}.{i}@example.com", first.to_lowercase(), last.to_lowercase()),
                stage,
                job_id,
                applied_at: now - Duration::minutes(total - i as i64),
                notes: vec![],
            }
        })
        .collect()
}

fn build_assessments(cfg: &SeedConfig, jobs: &[Job]) -> Vec<Assessment> {
    jobs.iter()
        .take(cfg.assessments as usize)
        .map(|job| {
            let questions: Vec<Question> = (0..QUESTIONS_PER_SECTION)
                .map(|q| {
                    let kind = match q % 6 {
                        0 => QuestionKind::SingleChoice {
                            options: AGREEMENT_SCALE.map(String::from).to_vec(),
                        },
                        1 => QuestionKind::MultiChoice {
                            options: AGREEMENT_SCALE.map(String::from).to_vec(),
                        },
                        2 => QuestionKind::ShortText {
                            max_length: TEXT_MAX_LENGTH,
                        },
                        3 => QuestionKind::LongText {
                            max_length: TEXT_MAX_LENGTH,
                        },
                        4 => QuestionKind::Numeric { min: 0.0, max: 10.0 },
                        _ => QuestionKind::FileUpload,
                    };
                    Question {
                        id: generate_id(PREFIX_QUESTION),
                        prompt: QUESTION_PROMPTS[q % QUESTION_PROMPTS.len()].to_string(),
                        required: q < QUESTIONS_PER_SECTION / 2,
                        kind,
                    }
                })
                .collect();
            Assessment {
                job_id: job.id.clone(),
                title: format!("{} screening", job.title),
                sections: vec![Section {
                    id: generate_id(PREFIX_SECTION),
                    title: "General".into(),
                    questions,
                }],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlowStore;
    use std::sync::Arc;

    async fn test_service() -> FlowService {
        FlowService::new(FlowStore::open_memory().await.unwrap())
    }

    fn small_config() -> SeedConfig {
        SeedConfig {
            jobs: 10,
            candidates: 40,
            assessments: 3,
            ..SeedConfig::default()
        }
    }

    #[tokio::test]
    async fn seeding_populates_expected_cardinalities() {
        let svc = test_service().await;
        svc.ensure_seeded(&small_config()).await.unwrap();

        let store = svc.store();
        assert_eq!(store.count_jobs().await.unwrap(), 10);
        assert_eq!(store.count_candidates().await.unwrap(), 40);
        assert_eq!(store.count_assessments().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let svc = test_service().await;
        svc.ensure_seeded(&small_config()).await.unwrap();
        svc.ensure_seeded(&small_config()).await.unwrap();
        assert_eq!(svc.store().count_jobs().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn concurrent_seeding_runs_exactly_once() {
        let svc = Arc::new(test_service().await);
        let cfg = small_config();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let svc = Arc::clone(&svc);
                let cfg = cfg.clone();
                tokio::spawn(async move { svc.ensure_seeded(&cfg).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(svc.store().count_jobs().await.unwrap(), 10);
        assert_eq!(svc.store().count_candidates().await.unwrap(), 40);
    }

    #[tokio::test]
    async fn seeding_skips_populated_store() {
        let svc = test_service().await;
        svc.create_job(crate::service::NewJob {
            title: "Existing role".into(),
            ..Default::default()
        })
        .await
        .unwrap();

        svc.ensure_seeded(&small_config()).await.unwrap();
        assert_eq!(svc.store().count_jobs().await.unwrap(), 1);
        assert_eq!(svc.store().count_candidates().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seeded_candidates_reference_seeded_jobs() {
        let svc = test_service().await;
        svc.ensure_seeded(&small_config()).await.unwrap();

        let jobs = svc.store().list_jobs().await.unwrap();
        let job_ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        for candidate in svc.store().list_candidates().await.unwrap() {
            assert!(job_ids.contains(&candidate.job_id.as_str()));
        }
    }

    #[tokio::test]
    async fn seeded_assessments_cycle_question_kinds() {
        let svc = test_service().await;
        svc.ensure_seeded(&small_config()).await.unwrap();

        let jobs = svc.store().list_jobs().await.unwrap();
        let assessment = svc
            .store()
            .get_assessment(&jobs[0].id)
            .await
            .unwrap()
            .unwrap();
        let questions = &assessment.sections[0].questions;
        assert_eq!(questions.len(), 12);

        // First half required, second half optional.
        assert!(questions[..6].iter().all(|q| q.required));
        assert!(questions[6..].iter().all(|q| !q.required));

        // All six kinds appear, in cycle order.
        assert!(matches!(questions[0].kind, QuestionKind::SingleChoice { .. }));
        assert!(matches!(questions[4].kind, QuestionKind::Numeric { .. }));
        assert!(matches!(questions[5].kind, QuestionKind::FileUpload));
        assert!(matches!(questions[6].kind, QuestionKind::SingleChoice { .. }));

        assessment.validate().unwrap();
    }
}
