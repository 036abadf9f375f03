//! # talent-core
//!
//! Foundation crate for the candidate matching engine.
//! Defines the data model, error taxonomy, configuration, constants,
//! and the traits implemented by external collaborators.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TalentConfig;
pub use errors::{TalentError, TalentResult};
pub use models::{
    Candidate, ComponentScores, InteractionType, Job, LearningWeights, MatchResult,
    RecruiterInteraction, ScoreBreakdown, ScoreWeights, SearchSessionCacheEntry, SemanticStatus,
};
