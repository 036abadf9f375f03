//! The three per-pair component scores.

use std::collections::BTreeSet;

use talent_core::models::normalize_skills;
use talent_core::{Candidate, Job, SemanticStatus};
use talent_embeddings::compare;

/// Cosine similarity rescaled to [0, 1]. Absent, zero, or mismatched
/// embeddings give 0 with a status saying why.
pub fn semantic_score(job: Option<&[f32]>, candidate: Option<&[f32]>) -> (f64, SemanticStatus) {
    match (job, candidate) {
        (Some(a), Some(b)) => match compare(a, b) {
            (cos, SemanticStatus::Computed) => (((cos + 1.0) / 2.0).clamp(0.0, 1.0), SemanticStatus::Computed),
            (_, status) => (0.0, status),
        },
        _ => (0.0, SemanticStatus::MissingEmbedding),
    }
}

/// Required skills of a job, normalized once per search.
#[derive(Debug, Clone)]
pub struct SkillRequirement {
    required: BTreeSet<String>,
}

/// Overlap result with the skills on either side of the split.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlap {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillRequirement {
    pub fn for_job(job: &Job) -> Self {
        Self {
            required: normalize_skills(&job.required_skills),
        }
    }

    /// |required ∩ candidate| / |required|; 1.0 when nothing is required.
    pub fn overlap(&self, candidate: &Candidate) -> SkillOverlap {
        if self.required.is_empty() {
            return SkillOverlap {
                score: 1.0,
                matched: Vec::new(),
                missing: Vec::new(),
            };
        }
        let have = normalize_skills(&candidate.skills);
        let (matched, missing): (Vec<String>, Vec<String>) = self
            .required
            .iter()
            .cloned()
            .partition(|skill| have.contains(skill));
        SkillOverlap {
            score: matched.len() as f64 / self.required.len() as f64,
            matched,
            missing,
        }
    }
}

/// 1.0 when the minimum is met or zero, else the linear ratio.
pub fn experience_match(candidate_years: f64, min_years: f64) -> f64 {
    if min_years <= 0.0 || candidate_years >= min_years {
        return 1.0;
    }
    (candidate_years / min_years).clamp(0.0, 1.0)
}
