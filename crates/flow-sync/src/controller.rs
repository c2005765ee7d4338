//! The optimistic board controller.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use flow_client::{CandidateQuery, FlowClient, JobQuery};
use flow_core::entities::{Candidate, Job};
use flow_core::enums::CandidateStage;
use flow_net::{OpKind, Transport};
use flow_store::patches::CandidatePatchBuilder;
use tokio::sync::mpsc;

use crate::{BoardError, OnConflict, SettleEvent, SettleOutcome, Target};

/// Rollback state captured before a mutation speculates.
enum Snapshot {
    Jobs(Vec<Job>),
    Candidate(Candidate),
}

/// One in-flight mutation. `seq` is the fence: a settle carrying any other
/// sequence for this lane is stale.
struct Lane {
    seq: u64,
    snapshot: Snapshot,
}

/// Canonical records returned by a landed write.
enum Commit {
    Jobs(Vec<Job>),
    Candidate(Candidate),
}

#[derive(Default)]
struct BoardState {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    lanes: HashMap<Target, Lane>,
    /// Bumped on every settle that changes board content. A refresh whose
    /// listings straddle a bump carries a stale snapshot.
    version: u64,
}

struct Inner<T: Transport> {
    client: FlowClient<T>,
    board: Mutex<BoardState>,
    seq: AtomicU64,
    settle_tx: mpsc::UnboundedSender<SettleEvent>,
}

/// Optimistic view of the hiring board.
///
/// `begin_*` methods apply the mutation to the in-memory view synchronously
/// and dispatch the write on a background task, so they must be called from
/// within a tokio runtime. The fate of each mutation arrives on the
/// [`SettleEvent`] channel returned by [`BoardController::new`].
///
/// Cloning is cheap; clones share the same board.
pub struct BoardController<T: Transport + 'static> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport + 'static> Clone for BoardController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport + 'static> BoardController<T> {
    /// Wrap a connected client. The board starts empty; call
    /// [`Self::refresh`] to hydrate it.
    #[must_use]
    pub fn new(client: FlowClient<T>) -> (Self, mpsc::UnboundedReceiver<SettleEvent>) {
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let controller = Self {
            inner: Arc::new(Inner {
                client,
                board: Mutex::new(BoardState::default()),
                seq: AtomicU64::new(0),
                settle_tx,
            }),
        };
        (controller, settle_rx)
    }

    /// Access the underlying client.
    #[must_use]
    pub fn client(&self) -> &FlowClient<T> {
        &self.inner.client
    }

    /// Reload the board from the store. Skipped (returns `false`) while any
    /// mutation is in flight, or when one settles while the listings are
    /// being read, so a stale snapshot never clobbers speculative or newer
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Client` if either listing fails.
    pub async fn refresh(&self) -> Result<bool, BoardError> {
        let version = {
            let board = self.inner.board();
            if !board.lanes.is_empty() {
                tracing::debug!("refresh skipped, mutation in flight");
                return Ok(false);
            }
            board.version
        };
        let jobs = self
            .inner
            .client
            .get_jobs(&JobQuery {
                page_size: Some(u32::MAX),
                ..JobQuery::default()
            })
            .await?;
        let candidates = self
            .inner
            .client
            .get_candidates(&CandidateQuery {
                page_size: Some(u32::MAX),
                ..CandidateQuery::default()
            })
            .await?;

        let mut board = self.inner.board();
        if !board.lanes.is_empty() || board.version != version {
            // A mutation began, or began and settled, while the listings
            // were in flight; this snapshot predates it.
            return Ok(false);
        }
        board.jobs = jobs.data;
        board.candidates = candidates.data;
        Ok(true)
    }

    /// Current job list, speculative mutations included.
    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.inner.board().jobs.clone()
    }

    /// Current candidate pipeline, speculative mutations included.
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate> {
        self.inner.board().candidates.clone()
    }

    /// One candidate's current card.
    #[must_use]
    pub fn candidate(&self, id: &str) -> Option<Candidate> {
        self.inner
            .board()
            .candidates
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Number of mutations currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.board().lanes.len()
    }

    /// Begin an optimistic reorder of the whole job list.
    ///
    /// `order` must list every board job exactly once, first-to-last. The
    /// view reorders immediately; the write dispatches in the background and
    /// settles later.
    ///
    /// # Errors
    ///
    /// `MutationInFlight` if the job-list lane is busy under
    /// [`OnConflict::Reject`], `UnknownJob`/`IncompleteOrder` for a bad
    /// permutation.
    pub fn begin_reorder(&self, order: &[String], mode: OnConflict) -> Result<u64, BoardError> {
        let mut board = self.inner.board();
        if order.len() != board.jobs.len() {
            return Err(BoardError::IncompleteOrder);
        }
        for id in order {
            if !board.jobs.iter().any(|job| job.id == *id) {
                return Err(BoardError::UnknownJob { id: id.clone() });
            }
        }
        let unique: HashSet<&str> = order.iter().map(String::as_str).collect();
        if unique.len() != order.len() {
            return Err(BoardError::IncompleteOrder);
        }

        let seq = self.inner.next_seq();
        let snapshot = Snapshot::Jobs(board.jobs.clone());
        claim(&mut board, Target::JobList, seq, mode, snapshot)?;

        let position: HashMap<&str, i64> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i as i64 + 1))
            .collect();
        for job in &mut board.jobs {
            if let Some(&ord) = position.get(job.id.as_str()) {
                job.order = ord;
            }
        }
        sort_jobs(&mut board.jobs);
        drop(board);

        let changes: Vec<(String, i64)> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i as i64 + 1))
            .collect();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.dispatch_reorder(seq, changes).await });
        tracing::debug!(seq, "reorder speculated");
        Ok(seq)
    }

    /// Begin an optimistic stage move for one candidate card.
    ///
    /// # Errors
    ///
    /// `MutationInFlight` if the candidate's lane is busy under
    /// [`OnConflict::Reject`], `UnknownCandidate` for an id not on the
    /// board.
    pub fn begin_stage_move(
        &self,
        candidate_id: &str,
        stage: CandidateStage,
        mode: OnConflict,
    ) -> Result<u64, BoardError> {
        let mut board = self.inner.board();
        let Some(pos) = board.candidates.iter().position(|c| c.id == candidate_id) else {
            return Err(BoardError::UnknownCandidate {
                id: candidate_id.to_string(),
            });
        };

        let seq = self.inner.next_seq();
        let target = Target::Candidate(candidate_id.to_string());
        let snapshot = Snapshot::Candidate(board.candidates[pos].clone());
        claim(&mut board, target.clone(), seq, mode, snapshot)?;
        board.candidates[pos].stage = stage;
        drop(board);

        let inner = Arc::clone(&self.inner);
        let id = candidate_id.to_string();
        tokio::spawn(async move { inner.dispatch_stage_move(target, seq, id, stage).await });
        tracing::debug!(seq, candidate_id, %stage, "stage move speculated");
        Ok(seq)
    }
}

/// Reserve a lane for `seq`, or fail/fence per `mode`. On supersede the
/// lane keeps its original snapshot: rollback always restores the state
/// before the first speculation.
fn claim(
    board: &mut BoardState,
    target: Target,
    seq: u64,
    mode: OnConflict,
    snapshot: Snapshot,
) -> Result<(), BoardError> {
    match board.lanes.get_mut(&target) {
        Some(lane) => match mode {
            OnConflict::Reject => Err(BoardError::MutationInFlight { target }),
            OnConflict::Supersede => {
                tracing::debug!(%target, old = lane.seq, new = seq, "mutation superseded");
                lane.seq = seq;
                Ok(())
            }
        },
        None => {
            board.lanes.insert(target, Lane { seq, snapshot });
            Ok(())
        }
    }
}

fn sort_jobs(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}

impl<T: Transport> Inner<T> {
    fn board(&self) -> MutexGuard<'_, BoardState> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, target: &Target, seq: u64) -> bool {
        self.board()
            .lanes
            .get(target)
            .is_some_and(|lane| lane.seq == seq)
    }

    async fn dispatch_reorder(&self, seq: u64, changes: Vec<(String, i64)>) {
        if let Err(e) = self.client.transport().permit(OpKind::Write).await {
            self.settle(Target::JobList, seq, Err(e.to_string()));
            return;
        }
        if !self.is_current(&Target::JobList, seq) {
            // Superseded while waiting on the transport; the store is never
            // touched by a fenced-off write.
            self.emit(Target::JobList, seq, SettleOutcome::Discarded);
            return;
        }
        let result = self
            .client
            .service()
            .reorder_jobs(&changes)
            .await
            .map(Commit::Jobs)
            .map_err(|e| e.to_string());
        self.settle(Target::JobList, seq, result);
    }

    async fn dispatch_stage_move(
        &self,
        target: Target,
        seq: u64,
        id: String,
        stage: CandidateStage,
    ) {
        if let Err(e) = self.client.transport().permit(OpKind::Write).await {
            self.settle(target, seq, Err(e.to_string()));
            return;
        }
        if !self.is_current(&target, seq) {
            self.emit(target, seq, SettleOutcome::Discarded);
            return;
        }
        let patch = CandidatePatchBuilder::new().stage(stage).build();
        let result = self
            .client
            .service()
            .update_candidate(&id, patch)
            .await
            .map(Commit::Candidate)
            .map_err(|e| e.to_string());
        self.settle(target, seq, result);
    }

    /// Resolve one dispatched mutation. Commits apply canonical records,
    /// failures restore the lane snapshot, stale sequences change nothing.
    fn settle(&self, target: Target, seq: u64, result: Result<Commit, String>) {
        let mut board = self.board();
        let outcome = match board.lanes.remove(&target) {
            Some(lane) if lane.seq == seq => {
                board.version += 1;
                match result {
                    Ok(commit) => {
                        apply_commit(&mut board, commit);
                        SettleOutcome::Committed
                    }
                    Err(error) => {
                        apply_snapshot(&mut board, lane.snapshot);
                        SettleOutcome::RolledBack { error }
                    }
                }
            }
            Some(lane) => {
                // A newer mutation owns the lane; put it back untouched.
                board.lanes.insert(target.clone(), lane);
                SettleOutcome::Discarded
            }
            None => SettleOutcome::Discarded,
        };
        drop(board);
        self.emit(target, seq, outcome);
    }

    fn emit(&self, target: Target, seq: u64, outcome: SettleOutcome) {
        tracing::debug!(%target, seq, ?outcome, "mutation settled");
        // Nobody listening is fine.
        let _ = self.settle_tx.send(SettleEvent {
            target,
            seq,
            outcome,
        });
    }
}

fn apply_commit(board: &mut BoardState, commit: Commit) {
    match commit {
        Commit::Jobs(mut jobs) => {
            sort_jobs(&mut jobs);
            board.jobs = jobs;
        }
        Commit::Candidate(candidate) => {
            if let Some(slot) = board.candidates.iter_mut().find(|c| c.id == candidate.id) {
                *slot = candidate;
            }
        }
    }
}

fn apply_snapshot(board: &mut BoardState, snapshot: Snapshot) {
    match snapshot {
        Snapshot::Jobs(jobs) => board.jobs = jobs,
        Snapshot::Candidate(candidate) => {
            if let Some(slot) = board.candidates.iter_mut().find(|c| c.id == candidate.id) {
                *slot = candidate;
            }
        }
    }
}
