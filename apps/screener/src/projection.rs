//! Result projection: display-ready values derived from an analysis result.
//!
//! Everything here takes shared references and returns new values; the source
//! result is never modified. Absent scores and skill lists are tolerated.

use serde::Serialize;

use crate::models::{AnalysisResult, Candidate};

/// Visual treatment bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

/// Two-slice proportion of matched vs missing skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillDistribution {
    pub matched_count: usize,
    pub missing_count: usize,
}

impl SkillDistribution {
    /// Share of matched skills in [0, 1]; 0 when there are no skills at all.
    pub fn matched_ratio(&self) -> f64 {
        let total = self.matched_count + self.missing_count;
        if total == 0 {
            0.0
        } else {
            self.matched_count as f64 / total as f64
        }
    }
}

/// `"0%"` for an absent or NaN score, else two decimals with a trailing `%`.
pub fn format_percent(score: Option<f64>) -> String {
    match score {
        Some(s) if !s.is_nan() => format!("{s:.2}%"),
        _ => "0%".to_string(),
    }
}

/// High (≥ 70), medium (40 – 69.99), low otherwise. NaN is low.
pub fn band_color(score: f64) -> ScoreBand {
    if score >= 70.0 {
        ScoreBand::High
    } else if score >= 40.0 {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

pub fn skill_distribution(result: &AnalysisResult) -> SkillDistribution {
    SkillDistribution {
        matched_count: result.matched_skills.len(),
        missing_count: result.missing_skills.len(),
    }
}

/// Fill width of a score bar, in percent. Absent or NaN fills nothing.
pub fn bar_width(score: Option<f64>) -> f64 {
    match score {
        Some(s) if !s.is_nan() => s.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Roster rows only distinguish strong candidates (≥ 70) from the rest.
pub fn candidate_row_band(candidate: &Candidate) -> ScoreBand {
    if candidate.rank_score() >= 70.0 {
        ScoreBand::High
    } else {
        ScoreBand::Low
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub label: &'static str,
    pub percent: String,
    pub width: f64,
    pub band: ScoreBand,
}

impl ScoreBar {
    fn new(label: &'static str, score: Option<f64>) -> Self {
        let width = bar_width(score);
        Self {
            label,
            percent: format_percent(score.or(Some(0.0))),
            width,
            band: band_color(width),
        }
    }
}

/// Everything the result panel shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub bars: [ScoreBar; 3],
    pub skills: SkillDistribution,
}

impl ResultView {
    pub fn project(result: &AnalysisResult) -> Self {
        Self {
            bars: [
                ScoreBar::new("Keyword Match", result.keyword_match_score),
                ScoreBar::new("Semantic Similarity", result.semantic_score),
                ScoreBar::new("Final Score", result.final_score),
            ],
            skills: skill_distribution(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::{analysis, candidate};

    #[test]
    fn test_format_percent_two_decimals() {
        assert_eq!(format_percent(Some(87.5)), "87.50%");
        assert_eq!(format_percent(Some(82.3)), "82.30%");
        assert_eq!(format_percent(Some(0.0)), "0.00%");
    }

    #[test]
    fn test_format_percent_nan_and_absent() {
        assert_eq!(format_percent(Some(f64::NAN)), "0%");
        assert_eq!(format_percent(None), "0%");
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_color(70.0), ScoreBand::High);
        assert_eq!(band_color(100.0), ScoreBand::High);
        assert_eq!(band_color(69.99), ScoreBand::Medium);
        assert_eq!(band_color(40.0), ScoreBand::Medium);
        assert_eq!(band_color(39.99), ScoreBand::Low);
        assert_eq!(band_color(-5.0), ScoreBand::Low);
        assert_eq!(band_color(f64::NAN), ScoreBand::Low);
    }

    #[test]
    fn test_skill_distribution_counts() {
        let mut result = analysis(50.0);
        result.matched_skills = vec!["a".into(), "b".into(), "c".into()];
        result.missing_skills = vec!["d".into()];
        let dist = skill_distribution(&result);
        assert_eq!(dist.matched_count, 3);
        assert_eq!(dist.missing_count, 1);
        assert_eq!(dist.matched_ratio(), 0.75);
    }

    #[test]
    fn test_skill_distribution_empty_lists() {
        let mut result = analysis(50.0);
        result.matched_skills.clear();
        result.missing_skills.clear();
        let dist = skill_distribution(&result);
        assert_eq!((dist.matched_count, dist.missing_count), (0, 0));
        assert_eq!(dist.matched_ratio(), 0.0);
    }

    #[test]
    fn test_bar_width_clamps() {
        assert_eq!(bar_width(Some(120.0)), 100.0);
        assert_eq!(bar_width(Some(-3.0)), 0.0);
        assert_eq!(bar_width(None), 0.0);
    }

    #[test]
    fn test_result_view_does_not_touch_source() {
        let mut result = analysis(72.0);
        result.semantic_score = None;
        let before = result.clone();

        let view = ResultView::project(&result);

        assert_eq!(result, before);
        assert_eq!(view.bars[2].percent, "72.00%");
        assert_eq!(view.bars[2].band, ScoreBand::High);
        assert_eq!(view.bars[1].percent, "0.00%");
        assert_eq!(view.bars[1].band, ScoreBand::Low);
    }

    #[test]
    fn test_candidate_row_band_threshold() {
        assert_eq!(candidate_row_band(&candidate(1, 70.0)), ScoreBand::High);
        assert_eq!(candidate_row_band(&candidate(2, 55.0)), ScoreBand::Low);
    }
}
