//! Analysis backend: the seam between the controllers and the remote
//! screening service.
//!
//! Controllers hold an `Arc<dyn AnalysisBackend>`; production wiring uses
//! [`HttpBackend`], tests script a fake.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::{AnalysisResult, Candidate, CandidateId, ContactMessage, ExportSubject};
use crate::submission::validation::ValidatedSubmission;

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced an HTTP response (refused, reset, timed out).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 2xx response whose body reports failure, e.g. `{"success": false}`.
    #[error("service rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

impl BackendError {
    /// Transport failures and throttling/5xx responses are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Transport(_) => true,
            BackendError::Status { status, .. } => *status == 429 || *status >= 500,
            BackendError::Decode(_) | BackendError::Rejected(_) => false,
        }
    }
}

/// The HTTP contract of the screening service, one method per endpoint.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// POST /analyze_resume (multipart)
    async fn analyze(
        &self,
        submission: &ValidatedSubmission,
    ) -> Result<AnalysisResult, BackendError>;

    /// POST /export_pdf, returning the rendered PDF bytes.
    async fn export_pdf(&self, subject: &ExportSubject) -> Result<Bytes, BackendError>;

    /// GET /candidates
    async fn list_candidates(&self) -> Result<Vec<Candidate>, BackendError>;

    /// POST /candidates/clear
    async fn clear_candidates(&self) -> Result<(), BackendError>;

    /// DELETE /candidates/delete/{id}
    async fn delete_candidate(&self, id: &CandidateId) -> Result<(), BackendError>;

    /// POST /contact
    async fn send_contact(&self, message: &ContactMessage) -> Result<(), BackendError>;
}
