use serde::{Deserialize, Serialize};

use super::skill::normalize_skill;

/// A candidate as supplied by the upstream repository.
///
/// Identifying fields (name, email) live outside this model; ranking only
/// ever looks at skills, experience, and the embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
    /// Absent when embedding generation failed upstream.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, skills: Vec<String>, experience_years: f64) -> Self {
        Self {
            id: id.into(),
            skills,
            experience_years,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Reason this record cannot be scored, if any.
    pub fn validation_error(&self) -> Option<String> {
        if !self.experience_years.is_finite() || self.experience_years < 0.0 {
            return Some(format!(
                "experience_years must be a non-negative number, got {}",
                self.experience_years
            ));
        }
        if let Some(raw) = self
            .skills
            .iter()
            .find(|s| normalize_skill(s).is_empty())
        {
            return Some(format!("skill entry {raw:?} is empty after normalization"));
        }
        if let Some(embedding) = &self.embedding {
            if embedding.iter().any(|v| !v.is_finite()) {
                return Some("embedding contains non-finite components".to_string());
            }
        }
        None
    }

    /// True when the embedding is present and not all zeros.
    pub fn has_embedding(&self) -> bool {
        self.embedding
            .as_deref()
            .is_some_and(|e| e.iter().any(|v| *v != 0.0))
    }
}
