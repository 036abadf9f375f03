//! Configuration for the matching engine.
//! TOML-based, layered resolution: env > file > defaults.

pub mod defaults;
pub mod embedding_config;
pub mod learning_config;
pub mod observability_config;
pub mod scoring_config;
pub mod session_config;
pub mod storage_config;
pub mod talent_config;

pub use embedding_config::EmbeddingConfig;
pub use learning_config::{LearningConfig, RewardConfig};
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;
pub use talent_config::TalentConfig;
