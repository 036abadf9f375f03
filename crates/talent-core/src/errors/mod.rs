mod config_error;
mod embedding_error;
mod learning_error;
mod storage_error;
mod talent_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use learning_error::LearningError;
pub use storage_error::StorageError;
pub use talent_error::{TalentError, TalentResult};
