use std::fmt;

use crate::models::{ResumeFile, SubmissionInput};

/// A submission that passed the gate. Only this type can be sent for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_description: String,
    pub resume: ResumeFile,
}

/// Names every required field that was absent or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub missing: Vec<&'static str>,
}

impl ValidationFailure {
    pub fn reason(&self) -> String {
        format!(
            "Please fill all fields and upload a resume. Missing: {}",
            self.missing.join(", ")
        )
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

pub type ValidationOutcome = Result<ValidatedSubmission, ValidationFailure>;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks the five required fields. Pure; no I/O.
///
/// FAIL conditions:
/// - no resume file, or one with an empty file name
/// - blank job description, name, email or phone (whitespace counts as blank)
pub fn validate(input: &SubmissionInput) -> ValidationOutcome {
    let resume = input
        .resume_file
        .as_ref()
        .filter(|file| !is_blank(&file.file_name));

    let mut missing = Vec::new();
    if resume.is_none() {
        missing.push("resume");
    }
    for (field, value) in [
        ("job_description", &input.job_description),
        ("name", &input.name),
        ("email", &input.email),
        ("phone", &input.phone),
    ] {
        if is_blank(value) {
            missing.push(field);
        }
    }

    match resume {
        Some(resume) if missing.is_empty() => Ok(ValidatedSubmission {
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            job_description: input.job_description.clone(),
            resume: resume.clone(),
        }),
        _ => Err(ValidationFailure { missing }),
    }
}

pub fn is_submittable(input: &SubmissionInput) -> bool {
    validate(input).is_ok()
}
