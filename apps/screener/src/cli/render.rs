//! Plain-text rendering for the terminal. All score formatting goes through
//! the projection functions.

use std::fmt::Write;

use crate::models::{AnalysisResult, Candidate};
use crate::projection::{candidate_row_band, format_percent, ResultView, ScoreBar};

const BAR_CELLS: usize = 20;

fn bar_line(bar: &ScoreBar) -> String {
    let filled = ((bar.width / 100.0) * BAR_CELLS as f64).round() as usize;
    format!(
        "  {:<20} [{}{}] {:>8} ({})",
        bar.label,
        "#".repeat(filled),
        "-".repeat(BAR_CELLS - filled),
        bar.percent,
        bar.band.as_str()
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Raw score as the roster table shows it, e.g. `82.3%`.
fn roster_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s}%")).unwrap_or_else(|| "-".to_string())
}

pub fn render_result(result: &AnalysisResult) -> String {
    let view = ResultView::project(result);
    let mut out = String::new();

    let _ = writeln!(out, "Analysis Result");
    let _ = writeln!(out, "Name: {}", result.candidate_name);
    let _ = writeln!(out, "Email: {}", result.candidate_email);
    let _ = writeln!(out, "Phone: {}", result.candidate_phone);
    let _ = writeln!(out, "Experience (years): {}", result.experience_years);
    let _ = writeln!(out, "Education Level: {}", result.education_level);
    let _ = writeln!(out);
    let _ = writeln!(out, "Scores");
    for bar in &view.bars {
        let _ = writeln!(out, "{}", bar_line(bar));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Resume Skills: {}", list_or_none(&result.resume_skills));
    let _ = writeln!(
        out,
        "Matched Skills ({}): {}",
        view.skills.matched_count,
        list_or_none(&result.matched_skills)
    );
    let _ = writeln!(
        out,
        "Missing Skills ({}): {}",
        view.skills.missing_count,
        list_or_none(&result.missing_skills)
    );
    let _ = writeln!(
        out,
        "Skill match: {}",
        format_percent(Some(view.skills.matched_ratio() * 100.0))
    );
    out
}

/// Roster table, rows already in display order.
pub fn render_roster(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No candidates found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<24} {:<28} {:<16} {:>11} {:>14} {:>10}  {:<14} {}",
        "Id",
        "Name",
        "Email",
        "Phone",
        "Final Score",
        "Semantic Score",
        "Experience",
        "Education",
        "Band"
    );
    for c in candidates {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<28} {:<16} {:>11} {:>14} {:>10}  {:<14} {}",
            c.id.to_string(),
            c.name,
            c.email,
            c.phone,
            roster_score(c.final_score),
            roster_score(c.semantic_score),
            c.experience_years,
            c.education_level,
            candidate_row_band(c).as_str()
        );
    }
    out
}

/// Detail view for one candidate.
pub fn render_candidate(candidate: &Candidate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - Profile", candidate.name);
    let _ = writeln!(out, "Email: {}", candidate.email);
    let _ = writeln!(out, "Phone: {}", candidate.phone);
    let _ = writeln!(out, "Final Score: {}", roster_score(candidate.final_score));
    let _ = writeln!(out, "Semantic Score: {}", roster_score(candidate.semantic_score));
    let _ = writeln!(out, "Experience (years): {}", candidate.experience_years);
    let _ = writeln!(out, "Education Level: {}", candidate.education_level);
    let _ = writeln!(out, "Matched Skills:");
    for skill in &candidate.matched_skills {
        let _ = writeln!(out, "  + {skill}");
    }
    let _ = writeln!(out, "Missing Skills:");
    for skill in &candidate.missing_skills {
        let _ = writeln!(out, "  - {skill}");
    }
    out
}
