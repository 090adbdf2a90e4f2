//! CSV rendering of the candidate roster. Pure; no I/O.

use thiserror::Error;

use crate::models::Candidate;

pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Email",
    "Phone",
    "Final Score",
    "Semantic Score",
    "Experience",
    "Education",
];

#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("No candidates to export.")]
    Empty,

    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

/// Absent scores render as an empty cell.
fn score_cell(score: Option<f64>) -> String {
    score.map(|s| s.to_string()).unwrap_or_default()
}

/// Renders the roster in its held order, one row per candidate.
///
/// Fields are quoted only when they contain a comma, quote or line break, so
/// ordinary rows come out as plain comma-joined values.
pub fn render_csv(candidates: &[Candidate]) -> Result<String, CsvExportError> {
    if candidates.is_empty() {
        return Err(CsvExportError::Empty);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for c in candidates {
        let final_score = score_cell(c.final_score);
        let semantic_score = score_cell(c.semantic_score);
        let experience = c.experience_years.to_string();
        writer.write_record([
            c.name.as_str(),
            c.email.as_str(),
            c.phone.as_str(),
            final_score.as_str(),
            semantic_score.as_str(),
            experience.as_str(),
            c.education_level.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvExportError::Buffer(e.to_string()))
}
