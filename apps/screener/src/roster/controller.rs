//! Roster controller: the in-memory candidate list and its mutations.
//!
//! Delete and clear wait for the service to confirm before touching local
//! state, so a failed mutation never leaves the roster out of step with the
//! server. One operation runs at a time; others are answered with `Busy`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::backend::AnalysisBackend;
use crate::errors::ClientError;
use crate::models::{Candidate, CandidateId};
use crate::roster::confirm::{ConfirmPrompt, CLEAR_PROMPT, DELETE_PROMPT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterPhase {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    LoadError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    Load,
    Delete,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RosterOutcome {
    Applied,
    /// The user did not confirm; nothing was sent.
    Declined,
    /// Another roster operation is still running; nothing was sent.
    Busy,
    Failed(ClientError),
}

#[derive(Debug, Default)]
struct RosterState {
    phase: RosterPhase,
    candidates: Vec<Candidate>,
    error: Option<String>,
    pending: Option<PendingOp>,
    selected: Option<CandidateId>,
}

/// Stable sort by final score, highest first. Ties keep fetch order.
pub fn sort_for_display(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.rank_score().total_cmp(&a.rank_score()));
    sorted
}

#[derive(Clone)]
pub struct RosterController {
    backend: Arc<dyn AnalysisBackend>,
    state: Arc<Mutex<RosterState>>,
}

impl RosterController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(RosterState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RosterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> RosterPhase {
        self.lock().phase
    }

    /// Candidates in the order they were fetched.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.lock().candidates.clone()
    }

    /// Candidates in display order.
    pub fn display(&self) -> Vec<Candidate> {
        sort_for_display(&self.lock().candidates)
    }

    pub fn len(&self) -> usize {
        self.lock().candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last user-facing error, cleared by the next successful operation.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn is_clearing(&self) -> bool {
        self.lock().pending == Some(PendingOp::Clear)
    }

    /// Opens the detail view for `id`. Returns false if it is not in the roster.
    pub fn select(&self, id: &CandidateId) -> bool {
        let mut state = self.lock();
        let found = state.candidates.iter().any(|c| &c.id == id);
        state.selected = found.then(|| id.clone());
        found
    }

    pub fn selected(&self) -> Option<Candidate> {
        let state = self.lock();
        let id = state.selected.as_ref()?;
        state.candidates.iter().find(|c| &c.id == id).cloned()
    }

    pub fn close_selection(&self) {
        self.lock().selected = None;
    }

    /// Answers `Busy` if another operation holds the slot.
    fn check_idle(&self, op: PendingOp) -> Result<(), RosterOutcome> {
        match self.lock().pending {
            Some(running) => {
                warn!("Roster {op:?} refused: {running:?} still running");
                Err(RosterOutcome::Busy)
            }
            None => Ok(()),
        }
    }

    /// Claims the single operation slot, or reports `Busy`.
    fn start(&self, op: PendingOp) -> Result<PendingSlot<'_>, RosterOutcome> {
        let mut state = self.lock();
        if let Some(running) = state.pending {
            warn!("Roster {op:?} refused: {running:?} still running");
            return Err(RosterOutcome::Busy);
        }
        let previous_phase = state.phase;
        state.pending = Some(op);
        if op == PendingOp::Load {
            state.phase = RosterPhase::Loading;
        }
        Ok(PendingSlot {
            controller: self,
            op,
            previous_phase,
            finished: false,
        })
    }

    /// Fetches the full roster. A failed refresh keeps whatever was loaded before.
    pub async fn load(&self) -> RosterOutcome {
        let slot = match self.start(PendingOp::Load) {
            Ok(slot) => slot,
            Err(busy) => return busy,
        };
        let response = self.backend.list_candidates().await;

        slot.finish(|state| match response {
            Ok(candidates) => {
                info!("Loaded {} candidates", candidates.len());
                state.candidates = candidates;
                state.phase = RosterPhase::Loaded;
                state.error = None;
                RosterOutcome::Applied
            }
            Err(e) => {
                let err = ClientError::from(e);
                state.phase = RosterPhase::LoadError;
                state.error = Some(format!("Could not load candidates. {}", err.user_message()));
                RosterOutcome::Failed(err)
            }
        })
    }

    /// Deletes one candidate after confirmation. The local entry is removed
    /// only once the service has confirmed.
    pub async fn delete_one(
        &self,
        id: &CandidateId,
        prompt: &dyn ConfirmPrompt,
    ) -> RosterOutcome {
        if let Err(busy) = self.check_idle(PendingOp::Delete) {
            return busy;
        }
        if !prompt.confirm(DELETE_PROMPT).await {
            return RosterOutcome::Declined;
        }
        let slot = match self.start(PendingOp::Delete) {
            Ok(slot) => slot,
            Err(busy) => return busy,
        };
        let response = self.backend.delete_candidate(id).await;

        slot.finish(|state| match response {
            Ok(()) => {
                info!("Deleted candidate {id}");
                state.candidates.retain(|c| &c.id != id);
                if state.selected.as_ref() == Some(id) {
                    state.selected = None;
                }
                state.error = None;
                RosterOutcome::Applied
            }
            Err(e) => {
                let err = ClientError::from(e);
                state.error = Some(format!("Could not delete candidate. {}", err.user_message()));
                RosterOutcome::Failed(err)
            }
        })
    }

    /// Clears every candidate after confirmation. Success leaves an empty,
    /// loaded roster.
    pub async fn clear_all(&self, prompt: &dyn ConfirmPrompt) -> RosterOutcome {
        if let Err(busy) = self.check_idle(PendingOp::Clear) {
            return busy;
        }
        if !prompt.confirm(CLEAR_PROMPT).await {
            return RosterOutcome::Declined;
        }
        let slot = match self.start(PendingOp::Clear) {
            Ok(slot) => slot,
            Err(busy) => return busy,
        };
        let response = self.backend.clear_candidates().await;

        slot.finish(|state| match response {
            Ok(()) => {
                info!("Cleared {} candidates", state.candidates.len());
                state.candidates.clear();
                state.selected = None;
                state.phase = RosterPhase::Loaded;
                state.error = None;
                RosterOutcome::Applied
            }
            Err(e) => {
                let err = ClientError::from(e);
                state.error = Some(format!("Could not clear candidates. {}", err.user_message()));
                RosterOutcome::Failed(err)
            }
        })
    }
}

/// The claimed operation slot. Dropping it unfinished, e.g. when the caller
/// abandons the future mid-request, frees the slot and undoes `Loading`.
struct PendingSlot<'a> {
    controller: &'a RosterController,
    op: PendingOp,
    previous_phase: RosterPhase,
    finished: bool,
}

impl PendingSlot<'_> {
    /// Frees the slot and applies the response under the same lock.
    fn finish<T>(mut self, apply: impl FnOnce(&mut RosterState) -> T) -> T {
        self.finished = true;
        let mut state = self.controller.lock();
        state.pending = None;
        apply(&mut state)
    }
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("Roster {:?} abandoned before the service answered", self.op);
        let mut state = self.controller.lock();
        state.pending = None;
        if self.op == PendingOp::Load {
            state.phase = self.previous_phase;
        }
    }
}
