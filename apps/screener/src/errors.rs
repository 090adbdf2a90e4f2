use thiserror::Error;

use crate::backend::BackendError;

/// Client-level error taxonomy.
/// Controllers convert every failure into one of these at their boundary and
/// keep it as state; nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Local, synchronous; never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No HTTP response at all; the service is assumed unreachable.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status, undecodable body, or an explicit failure flag.
    #[error("Server error: {detail}")]
    Server { status: Option<u16>, detail: String },

    #[error("Export error: {0}")]
    Export(String),
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Server { .. } => "SERVER_ERROR",
            ClientError::Export(_) => "EXPORT_ERROR",
        }
    }

    /// The text shown to the user. Server detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(reason) => reason.clone(),
            ClientError::Network(_) => {
                "Could not reach the screening service. Ensure the backend is running and try again."
                    .to_string()
            }
            ClientError::Server { .. } => {
                "The screening service could not complete the request.".to_string()
            }
            ClientError::Export(notice) => notice.clone(),
        }
    }
}

impl From<BackendError> for ClientError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Transport(msg) => {
                tracing::warn!("Screening service unreachable: {msg}");
                ClientError::Network(msg)
            }
            BackendError::Status { status, body } => {
                tracing::error!("Screening service error (status {status}): {body}");
                ClientError::Server {
                    status: Some(status),
                    detail: body,
                }
            }
            BackendError::Decode(e) => {
                tracing::error!("Undecodable screening service response: {e}");
                ClientError::Server {
                    status: None,
                    detail: e.to_string(),
                }
            }
            BackendError::Rejected(msg) => {
                tracing::error!("Screening service rejected request: {msg}");
                ClientError::Server {
                    status: None,
                    detail: msg,
                }
            }
        }
    }
}
