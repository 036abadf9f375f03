//! # talent-engine
//!
//! The matching engine facade. Owns every subsystem and exposes the
//! operations collaborators call: `search`, `search_bulk`,
//! `record_interaction`, `get_current_weights`, `retrain_now`,
//! `get_learning_metrics`, and `weights_history`.
//!
//! [`BackgroundWorker`] drives the asynchronous side: ledger retries,
//! session sweeps, and scheduled or feedback-triggered retrains.

pub mod engine;
pub mod ledger_writer;
pub mod repository;
pub mod tracing_setup;
pub mod worker;

pub use engine::MatchingEngine;
pub use ledger_writer::{DrainReport, LedgerWriter};
pub use repository::InMemoryRepository;
pub use worker::BackgroundWorker;
