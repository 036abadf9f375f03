use serde::{Deserialize, Serialize};

use super::skill::normalize_skill;

/// A job posting as supplied by the upstream repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub required_skills: Vec<String>,
    pub min_experience_years: f64,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

impl Job {
    pub fn new(id: impl Into<String>, required_skills: Vec<String>, min_experience_years: f64) -> Self {
        Self {
            id: id.into(),
            required_skills,
            min_experience_years,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// True when the embedding is present and not all zeros.
    pub fn has_embedding(&self) -> bool {
        self.embedding
            .as_deref()
            .is_some_and(|e| e.iter().any(|v| *v != 0.0))
    }

    /// Reason this job cannot be searched against, if any.
    pub fn validation_error(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("job id is empty".to_string());
        }
        if !self.min_experience_years.is_finite() || self.min_experience_years < 0.0 {
            return Some(format!(
                "min_experience_years must be a non-negative number, got {}",
                self.min_experience_years
            ));
        }
        if self.required_skills.iter().any(|s| normalize_skill(s).is_empty()) {
            return Some("required skill entry is empty after normalization".to_string());
        }
        if let Some(embedding) = &self.embedding {
            if embedding.iter().any(|v| !v.is_finite()) {
                return Some("embedding contains non-finite components".to_string());
            }
        }
        None
    }
}
