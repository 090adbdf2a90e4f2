pub mod analysis;
pub mod candidate;
pub mod contact;
pub mod submission;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use analysis::AnalysisResult;
pub use candidate::{Candidate, CandidateId};
pub use contact::{ContactMessage, ContactResponse};
pub use submission::{ResumeFile, SubmissionInput};

/// Anything that can be rendered into a PDF report by the analysis service.
/// Serialized as the bare record, with no enum tag.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExportSubject {
    Analysis(AnalysisResult),
    Candidate(Candidate),
}

impl From<AnalysisResult> for ExportSubject {
    fn from(result: AnalysisResult) -> Self {
        ExportSubject::Analysis(result)
    }
}

impl From<Candidate> for ExportSubject {
    fn from(candidate: Candidate) -> Self {
        ExportSubject::Candidate(candidate)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient decoding helpers
//
// The analysis service stores scores as nullable floats and skill lists as
// comma-joined text, so any of them may arrive as null, a string, or be absent.
// ────────────────────────────────────────────────────────────────────────────

/// Decodes a number, a numeric string, or null/absent/garbage as `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Whole years of experience; anything unusable or negative becomes 0.
pub(crate) fn lenient_years<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let years = lenient_number(deserializer)?.unwrap_or(0.0);
    Ok(if years.is_finite() { years.max(0.0) } else { 0.0 })
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Skill lists: null/absent decode as empty, non-string items are dropped.
pub(crate) fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
