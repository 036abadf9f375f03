mod interaction_ledger;
mod repository;
mod weight_repository;

pub use interaction_ledger::IInteractionLedger;
pub use repository::ICandidateRepository;
pub use weight_repository::IWeightRepository;
