use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateId;
use crate::models::{lenient_list, lenient_number, lenient_string, lenient_years};

/// Output of a single `/analyze_resume` call. Not persisted client-side.
///
/// Scores are in [0, 100] when present. `matched_skills` and `missing_skills`
/// are disjoint and together cover the job description's skill set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Row id of the candidate the service created for this submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<CandidateId>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: String,
    #[serde(default, deserialize_with = "lenient_years")]
    pub experience_years: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub education_level: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub keyword_match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub semantic_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub final_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub resume_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub job_description_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub missing_skills: Vec<String>,
}
