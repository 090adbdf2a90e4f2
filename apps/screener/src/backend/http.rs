//! HTTP backend: the single place that talks to the screening service.
//!
//! Every endpoint in the service contract goes through this type. Only
//! `GET /candidates` is retried; mutating calls are sent exactly once.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::{AnalysisBackend, BackendError};
use crate::models::{
    AnalysisResult, Candidate, CandidateId, ContactMessage, ContactResponse, ExportSubject,
};
use crate::submission::validation::ValidatedSubmission;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    retry_delay: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Base delay for the exponential backoff on idempotent reads.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_candidates_once(&self) -> Result<Vec<Candidate>, BackendError> {
        let response = self.client.get(self.url("/candidates")).send().await?;
        decode_json(ensure_success(response).await?).await
    }
}

/// Passes 2xx responses through; anything else becomes `BackendError::Status`
/// with the body kept for the logs.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!("Screening service returned {}: {}", status, body);
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(
        &self,
        submission: &ValidatedSubmission,
    ) -> Result<AnalysisResult, BackendError> {
        let resume = &submission.resume;
        let part = Part::bytes(resume.content.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str(&resume.mime_type())?;

        let form = Form::new()
            .part("resume", part)
            .text("job_description", submission.job_description.clone())
            .text("name", submission.name.clone())
            .text("email", submission.email.clone())
            .text("phone", submission.phone.clone());

        debug!(
            "Submitting {} ({} bytes) for analysis",
            resume.file_name,
            resume.content.len()
        );

        let response = self
            .client
            .post(self.url("/analyze_resume"))
            .multipart(form)
            .send()
            .await?;

        decode_json(ensure_success(response).await?).await
    }

    async fn export_pdf(&self, subject: &ExportSubject) -> Result<Bytes, BackendError> {
        let response = self
            .client
            .post(self.url("/export_pdf"))
            .json(subject)
            .send()
            .await?;

        Ok(ensure_success(response).await?.bytes().await?)
    }

    /// Retries on 429, 5xx and transport errors with exponential backoff.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        let mut last_error: Option<BackendError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_delay * (1 << (attempt - 1));
                warn!(
                    "Candidate listing attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_candidates_once().await {
                Ok(candidates) => {
                    debug!("Fetched {} candidates", candidates.len());
                    return Ok(candidates);
                }
                Err(e) if e.is_retryable() => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            BackendError::Transport(format!("gave up after {MAX_RETRIES} attempts"))
        }))
    }

    async fn clear_candidates(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/candidates/clear"))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_candidate(&self, id: &CandidateId) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/candidates/delete/{id}")))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/contact"))
            .json(message)
            .send()
            .await?;

        let reply: ContactResponse = decode_json(ensure_success(response).await?).await?;
        if reply.success {
            Ok(())
        } else {
            Err(BackendError::Rejected(
                "contact message was not accepted".to_string(),
            ))
        }
    }
}
