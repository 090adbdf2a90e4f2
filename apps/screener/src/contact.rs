use tracing::info;

use crate::backend::AnalysisBackend;
use crate::errors::ClientError;
use crate::models::ContactMessage;

pub const SENT_STATUS: &str = "Message sent successfully!";

/// Sends a contact message. Blank fields fail locally without a request;
/// `{"success": false}` from the service is a server error.
pub async fn send_contact(
    backend: &dyn AnalysisBackend,
    message: &ContactMessage,
) -> Result<(), ClientError> {
    let missing = message.missing_fields();
    if !missing.is_empty() {
        return Err(ClientError::Validation(format!(
            "Please fill in: {}",
            missing.join(", ")
        )));
    }
    backend.send_contact(message).await?;
    info!("Contact message from {} delivered", message.email);
    Ok(())
}

/// Status line shown after a send attempt.
pub fn contact_status(outcome: &Result<(), ClientError>) -> String {
    match outcome {
        Ok(()) => SENT_STATUS.to_string(),
        Err(ClientError::Validation(reason)) => reason.clone(),
        Err(ClientError::Server { .. }) => "Failed to send message.".to_string(),
        Err(_) => "Error sending message.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{connection_refused, Call, FakeBackend};
    use crate::backend::BackendError;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        }
    }

    #[tokio::test]
    async fn test_blank_message_sends_nothing() {
        let backend = FakeBackend::new();
        let mut blank = message();
        blank.message = "  ".into();

        let outcome = send_contact(&backend, &blank).await;

        assert!(matches!(outcome, Err(ClientError::Validation(_))));
        assert_eq!(contact_status(&outcome), "Please fill in: message");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delivered_message() {
        let backend = FakeBackend::new().on_contact(Ok(()));
        let outcome = send_contact(&backend, &message()).await;
        assert_eq!(contact_status(&outcome), SENT_STATUS);
        assert_eq!(backend.calls(), vec![Call::Contact]);
    }

    #[tokio::test]
    async fn test_rejected_and_unreachable_statuses() {
        let rejected = FakeBackend::new().on_contact(Err(BackendError::Rejected("no".into())));
        let outcome = send_contact(&rejected, &message()).await;
        assert_eq!(contact_status(&outcome), "Failed to send message.");

        let down = FakeBackend::new().on_contact(Err(connection_refused()));
        let outcome = send_contact(&down, &message()).await;
        assert_eq!(contact_status(&outcome), "Error sending message.");
    }
}
