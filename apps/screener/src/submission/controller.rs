//! Submission controller. Owns the analysis-request lifecycle.
//!
//! `Idle → Validating → Submitting → Succeeded | Failed`, with `reset_form`
//! returning to `Idle` from anywhere. At most one request is in flight; each
//! carries a ticket, and a response whose ticket is no longer current (after a
//! reset or cancel) is dropped instead of applied.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{AnalysisBackend, BackendError};
use crate::errors::ClientError;
use crate::models::{AnalysisResult, SubmissionInput};
use crate::submission::validation::{self, ValidatedSubmission};

/// The sample job description offered next to the form.
pub const SAMPLE_JOB_DESCRIPTION: &str = "We are hiring a Full-Stack Developer. \
Required: Python, Django, React, JavaScript, Docker, AWS, PostgreSQL, MongoDB. \
Bonus: FastAPI or Flask, Linux, Git, CI/CD.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(AnalysisResult),
    Failed(ClientError),
    /// Another submission was still in flight; nothing was sent.
    Refused,
    /// The response arrived after a reset or cancel and was dropped.
    Stale,
    Cancelled,
}

#[derive(Debug, Default)]
struct SubmissionState {
    phase: SubmissionPhase,
    form: SubmissionInput,
    result: Option<AnalysisResult>,
    error: Option<ClientError>,
    in_flight: Option<Uuid>,
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SubmissionController {
    backend: Arc<dyn AnalysisBackend>,
    state: Arc<Mutex<SubmissionState>>,
}

impl SubmissionController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(SubmissionState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lock().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == SubmissionPhase::Submitting
    }

    pub fn form(&self) -> SubmissionInput {
        self.lock().form.clone()
    }

    /// The result currently on display, if any.
    pub fn result(&self) -> Option<AnalysisResult> {
        self.lock().result.clone()
    }

    pub fn error(&self) -> Option<ClientError> {
        self.lock().error.clone()
    }

    /// User-facing status line for the last failure.
    pub fn status_message(&self) -> Option<String> {
        self.lock().error.as_ref().map(|err| match err {
            ClientError::Validation(reason) => reason.clone(),
            other => format!("Could not analyze the resume. {}", other.user_message()),
        })
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        state.phase != SubmissionPhase::Submitting && validation::is_submittable(&state.form)
    }

    /// Edits the held form in place.
    pub fn update_form(&self, edit: impl FnOnce(&mut SubmissionInput)) {
        edit(&mut self.lock().form);
    }

    pub fn fill_sample_job_description(&self) {
        self.update_form(|form| form.job_description = SAMPLE_JOB_DESCRIPTION.to_string());
    }

    /// Clears the form, result and error, and returns to `Idle`.
    ///
    /// Does not cancel an outstanding request; its response will be dropped.
    pub fn reset_form(&self) {
        let mut state = self.lock();
        if let Some(ticket) = state.in_flight.take() {
            debug!("Reset while submission {ticket} in flight; its response will be dropped");
        }
        *state = SubmissionState::default();
    }

    /// Validates `input` and sends it for analysis, waiting for the response.
    pub async fn submit(&self, input: SubmissionInput) -> SubmitOutcome {
        let (ticket, submission) = match self.begin(input) {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };
        let _in_flight = InFlight {
            controller: self,
            ticket,
        };
        let response = self.backend.analyze(&submission).await;
        self.complete(ticket, response)
    }

    /// Like [`submit`](Self::submit), but runs on a spawned task and hands back
    /// a handle that can cancel it. Must be called inside a tokio runtime.
    pub fn spawn_submit(&self, input: SubmissionInput) -> SubmissionTask {
        match self.begin(input) {
            Ok((ticket, submission)) => {
                let controller = self.clone();
                let handle = tokio::spawn(async move {
                    let _in_flight = InFlight {
                        controller: &controller,
                        ticket,
                    };
                    let response = controller.backend.analyze(&submission).await;
                    controller.complete(ticket, response)
                });
                SubmissionTask {
                    ticket: Some(ticket),
                    handle,
                    controller: self.clone(),
                }
            }
            Err(outcome) => SubmissionTask {
                ticket: None,
                handle: tokio::spawn(std::future::ready(outcome)),
                controller: self.clone(),
            },
        }
    }

    /// Runs the synchronous half of a submit: the in-flight check, validation,
    /// and ticket issue. `Err` carries the final outcome when nothing is sent.
    fn begin(&self, input: SubmissionInput) -> Result<(Uuid, ValidatedSubmission), SubmitOutcome> {
        let mut state = self.lock();
        if state.phase == SubmissionPhase::Submitting {
            warn!("Submit refused: a submission is already in flight");
            return Err(SubmitOutcome::Refused);
        }

        state.form = input;
        state.phase = SubmissionPhase::Validating;
        state.error = None;

        match validation::validate(&state.form) {
            Ok(submission) => {
                let ticket = Uuid::new_v4();
                state.in_flight = Some(ticket);
                state.phase = SubmissionPhase::Submitting;
                info!(
                    "Submitting resume {} for {} (ticket {ticket})",
                    submission.resume.file_name, submission.name
                );
                Ok((ticket, submission))
            }
            Err(failure) => {
                debug!("Submission failed validation: {failure}");
                let err = ClientError::Validation(failure.reason());
                state.phase = SubmissionPhase::Failed;
                state.error = Some(err.clone());
                Err(SubmitOutcome::Failed(err))
            }
        }
    }

    fn complete(
        &self,
        ticket: Uuid,
        response: Result<AnalysisResult, BackendError>,
    ) -> SubmitOutcome {
        let mut state = self.lock();
        if state.in_flight != Some(ticket) {
            debug!("Dropping stale analysis response for ticket {ticket}");
            return SubmitOutcome::Stale;
        }
        state.in_flight = None;

        match response {
            Ok(result) => {
                info!(
                    "Analysis succeeded for {} (final score {:?})",
                    result.candidate_name, result.final_score
                );
                state.phase = SubmissionPhase::Succeeded;
                state.result = Some(result.clone());
                SubmitOutcome::Succeeded(result)
            }
            Err(e) => {
                // The previous result, if any, stays on display.
                let err = ClientError::from(e);
                state.phase = SubmissionPhase::Failed;
                state.error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Releases the in-flight slot held by `ticket`, if it still holds it.
    fn abandon(&self, ticket: Uuid) {
        let mut state = self.lock();
        if state.in_flight == Some(ticket) {
            info!("Submission {ticket} cancelled");
            state.in_flight = None;
            state.phase = SubmissionPhase::Idle;
        }
    }
}

/// Releases the in-flight slot if the request future is dropped before the
/// response is applied. A completed or superseded ticket makes this a no-op.
struct InFlight<'a> {
    controller: &'a SubmissionController,
    ticket: Uuid,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.controller.abandon(self.ticket);
    }
}

/// Handle to a submission running on its own task.
pub struct SubmissionTask {
    ticket: Option<Uuid>,
    handle: JoinHandle<SubmitOutcome>,
    controller: SubmissionController,
}

impl SubmissionTask {
    /// Aborts the request and returns the controller to `Idle`.
    /// A result already on display is kept.
    pub fn cancel(self) {
        self.handle.abort();
        if let Some(ticket) = self.ticket {
            self.controller.abandon(ticket);
        }
    }

    pub async fn join(self) -> SubmitOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => SubmitOutcome::Cancelled,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}
