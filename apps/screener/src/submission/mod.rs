// Resume submission workflow: the validation gate and the controller that
// owns one analysis request at a time.

pub mod controller;
pub mod validation;

pub use controller::{SubmissionController, SubmissionPhase, SubmissionTask, SubmitOutcome};
pub use validation::{validate, ValidatedSubmission, ValidationFailure};
