mod candidate;
mod interaction;
mod job;
mod metrics;
mod score;
mod search;
mod session_entry;
mod skill;
mod weights;

pub use candidate::Candidate;
pub use interaction::{InteractionType, RecruiterInteraction};
pub use job::Job;
pub use metrics::{LearningMetrics, LearningStatus, TypeBreakdown};
pub use score::{ComponentScores, MatchResult, ScoreBreakdown, SemanticStatus};
pub use search::{InteractionReceipt, SearchResponse};
pub use session_entry::SearchSessionCacheEntry;
pub use skill::{normalize_skill, normalize_skills};
pub use weights::{LearningWeights, ScoreWeights, WeightSource};
