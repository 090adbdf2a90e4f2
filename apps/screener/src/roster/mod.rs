// Candidate roster: load, sort, delete, clear, with confirmation.

pub mod confirm;
pub mod controller;

pub use confirm::{AssumeNo, AssumeYes, ConfirmPrompt, TerminalPrompt};
pub use controller::{sort_for_display, RosterController, RosterOutcome, RosterPhase};
