//! # talent-scoring
//!
//! Turns a job and a candidate pool into an ordered shortlist.
//! Each pair gets a semantic, skill-overlap, and experience score; the
//! total is their dot product with the active weight triple.

pub mod components;
pub mod engine;
mod heap;

pub use engine::{RankingOutcome, ScoringEngine};
