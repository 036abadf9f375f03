use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::ComponentScores;

/// Recruiter action on a ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    View,
    Shortlist,
    Application,
    Interview,
    Hire,
    Reject,
}

impl InteractionType {
    pub const ALL: [InteractionType; 6] = [
        Self::View,
        Self::Shortlist,
        Self::Application,
        Self::Interview,
        Self::Hire,
        Self::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Shortlist => "shortlist",
            Self::Application => "application",
            Self::Interview => "interview",
            Self::Hire => "hire",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown interaction type: {s}"))
    }
}

/// One ledger record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterInteraction {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub recruiter_id: String,
    pub session_id: Option<String>,
    pub interaction_type: InteractionType,
    /// 1-based rank the candidate was shown at. `None` when unattributed.
    pub search_rank_at_time: Option<u32>,
    pub original_scores_at_time: Option<ComponentScores>,
    pub reward: f64,
    pub timestamp: DateTime<Utc>,
}

impl RecruiterInteraction {
    /// Rank and scores were both recovered from the session cache.
    pub fn is_attributed(&self) -> bool {
        self.search_rank_at_time.is_some() && self.original_scores_at_time.is_some()
    }
}
