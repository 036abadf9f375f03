use serde::{Deserialize, Serialize};

use super::weights::ScoreWeights;

/// How the semantic term was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticStatus {
    Computed,
    /// One side had no embedding, or an all-zero one. Score forced to 0.
    MissingEmbedding,
    /// Both sides had embeddings of different lengths. Score forced to 0.
    DimensionMismatch,
}

/// The three feature values a weight triple is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub semantic: f64,
    pub skill_overlap: f64,
    pub experience: f64,
}

impl ComponentScores {
    pub fn as_array(&self) -> [f64; 3] {
        [self.semantic, self.skill_overlap, self.experience]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic_score: f64,
    pub skill_overlap_score: f64,
    pub experience_match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub weights_used: ScoreWeights,
    pub semantic_status: SemanticStatus,
}

impl ScoreBreakdown {
    pub fn components(&self) -> ComponentScores {
        ComponentScores {
            semantic: self.semantic_score,
            skill_overlap: self.skill_overlap_score,
            experience: self.experience_match_score,
        }
    }
}

/// One scored (job, candidate) pair. Rank is 1-based; 0 until ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: String,
    pub candidate_id: String,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub rank: u32,
}
