//! Scripted in-memory backend for controller tests.

use std::collections::VecDeque;
use std::mem::{discriminant, Discriminant};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use crate::backend::{AnalysisBackend, BackendError};
use crate::models::{AnalysisResult, Candidate, CandidateId, ContactMessage, ExportSubject};
use crate::submission::validation::ValidatedSubmission;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Analyze { name: String, phone: String },
    ExportPdf,
    List,
    Clear,
    Delete(CandidateId),
    Contact,
}

/// Each endpoint pops its next scripted reply; an empty script answers 500.
#[derive(Default)]
pub(crate) struct FakeBackend {
    analyze: Mutex<VecDeque<Result<AnalysisResult, BackendError>>>,
    export: Mutex<VecDeque<Result<Bytes, BackendError>>>,
    list: Mutex<VecDeque<Result<Vec<Candidate>, BackendError>>>,
    clear: Mutex<VecDeque<Result<(), BackendError>>>,
    delete: Mutex<VecDeque<Result<(), BackendError>>>,
    contact: Mutex<VecDeque<Result<(), BackendError>>>,
    calls: Mutex<Vec<Call>>,
    /// When set, `analyze` waits for a notification before answering.
    analyze_gate: Option<Arc<Notify>>,
    /// The next call of each listed kind never answers.
    stalls: Mutex<Vec<Discriminant<Call>>>,
}

pub(crate) fn server_error() -> BackendError {
    BackendError::Status {
        status: 500,
        body: "internal error".to_string(),
    }
}

pub(crate) fn connection_refused() -> BackendError {
    BackendError::Transport("connection refused".to_string())
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, BackendError>>>) -> Result<T, BackendError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(server_error()))
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            analyze_gate: Some(gate),
            ..Self::default()
        }
    }

    /// Makes the next call of the same kind as `call` hang forever.
    pub(crate) fn stall_next(self, call: Call) -> Self {
        self.stalls.lock().unwrap().push(discriminant(&call));
        self
    }

    pub(crate) fn on_analyze(self, reply: Result<AnalysisResult, BackendError>) -> Self {
        self.analyze.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn on_export(self, reply: Result<Bytes, BackendError>) -> Self {
        self.export.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn on_list(self, reply: Result<Vec<Candidate>, BackendError>) -> Self {
        self.list.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn on_clear(self, reply: Result<(), BackendError>) -> Self {
        self.clear.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn on_delete(self, reply: Result<(), BackendError>) -> Self {
        self.delete.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn on_contact(self, reply: Result<(), BackendError>) -> Self {
        self.contact.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        let kind = discriminant(&call);
        self.calls.lock().unwrap().push(call);
        let stalled = {
            let mut stalls = self.stalls.lock().unwrap();
            match stalls.iter().position(|k| *k == kind) {
                Some(i) => {
                    stalls.remove(i);
                    true
                }
                None => false,
            }
        };
        if stalled {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn analyze(
        &self,
        submission: &ValidatedSubmission,
    ) -> Result<AnalysisResult, BackendError> {
        self.record(Call::Analyze {
            name: submission.name.clone(),
            phone: submission.phone.clone(),
        })
        .await;
        if let Some(gate) = &self.analyze_gate {
            gate.notified().await;
        }
        pop(&self.analyze)
    }

    async fn export_pdf(&self, _subject: &ExportSubject) -> Result<Bytes, BackendError> {
        self.record(Call::ExportPdf).await;
        pop(&self.export)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        self.record(Call::List).await;
        pop(&self.list)
    }

    async fn clear_candidates(&self) -> Result<(), BackendError> {
        self.record(Call::Clear).await;
        pop(&self.clear)
    }

    async fn delete_candidate(&self, id: &CandidateId) -> Result<(), BackendError> {
        self.record(Call::Delete(id.clone())).await;
        pop(&self.delete)
    }

    async fn send_contact(&self, _message: &ContactMessage) -> Result<(), BackendError> {
        self.record(Call::Contact).await;
        pop(&self.contact)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixtures
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn analysis(final_score: f64) -> AnalysisResult {
    AnalysisResult {
        candidate_id: Some(CandidateId::Number(1)),
        candidate_name: "Ada".to_string(),
        candidate_email: "ada@example.com".to_string(),
        candidate_phone: "555-0100".to_string(),
        experience_years: 5.0,
        education_level: "Master".to_string(),
        keyword_match_score: Some(60.0),
        semantic_score: Some(80.0),
        final_score: Some(final_score),
        resume_skills: vec!["python".into(), "rust".into()],
        job_description_skills: vec!["docker".into(), "python".into()],
        matched_skills: vec!["python".into()],
        missing_skills: vec!["docker".into()],
    }
}

pub(crate) fn candidate(id: i64, final_score: f64) -> Candidate {
    Candidate {
        id: CandidateId::Number(id),
        name: format!("Candidate {id}"),
        email: format!("c{id}@example.com"),
        phone: id.to_string(),
        final_score: Some(final_score),
        keyword_match_score: Some(final_score),
        semantic_score: Some(final_score),
        matched_skills: vec![],
        missing_skills: vec![],
        experience_years: 1.0,
        education_level: "Bachelor".to_string(),
    }
}
