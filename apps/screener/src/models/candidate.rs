use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{lenient_list, lenient_number, lenient_string, lenient_years};

/// Server-assigned candidate identity. Opaque to the client: the service
/// currently hands out integers, but nothing here depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Number(n) => write!(f, "{n}"),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for CandidateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => CandidateId::Number(n),
            Err(_) => CandidateId::Text(s.trim().to_string()),
        })
    }
}

impl From<i64> for CandidateId {
    fn from(n: i64) -> Self {
        CandidateId::Number(n)
    }
}

/// A persisted analysis outcome as listed by `GET /candidates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub final_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub keyword_match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub semantic_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_years")]
    pub experience_years: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub education_level: String,
}

impl Candidate {
    /// Score used for ordering; an absent score ranks as 0.
    pub fn rank_score(&self) -> f64 {
        self.final_score.filter(|s| !s.is_nan()).unwrap_or(0.0)
    }
}
