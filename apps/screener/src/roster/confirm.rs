use std::io::{self, BufRead, Write};

use async_trait::async_trait;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this candidate?";
pub const CLEAR_PROMPT: &str = "Delete ALL candidates? This cannot be undone.";

/// The explicit affirmative step required before a destructive roster action.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Confirms everything (`--yes`).
pub struct AssumeYes;

#[async_trait]
impl ConfirmPrompt for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Declines everything.
pub struct AssumeNo;

#[async_trait]
impl ConfirmPrompt for AssumeNo {
    async fn confirm(&self, _message: &str) -> bool {
        false
    }
}

#[async_trait]
impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Asks on stderr and reads a y/N answer from stdin. Anything but `y`/`yes`
/// (or a read error) is a no. The read runs on the blocking pool.
pub struct TerminalPrompt;

#[async_trait]
impl ConfirmPrompt for TerminalPrompt {
    async fn confirm(&self, message: &str) -> bool {
        let message = message.to_string();
        tokio::task::spawn_blocking(move || ask(&message))
            .await
            .unwrap_or(false)
    }
}

fn ask(message: &str) -> bool {
    let mut stderr = io::stderr();
    if write!(stderr, "{message} [y/N] ").and_then(|_| stderr.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_affirmative(&answer),
        Err(_) => false,
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
