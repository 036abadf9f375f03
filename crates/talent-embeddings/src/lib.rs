//! # talent-embeddings
//!
//! Vector side of the matching engine: similarity between job and
//! candidate embeddings, incremental upsert, approximate nearest-neighbour
//! lookup over random-hyperplane LSH tables, and save/load to SQLite.

pub mod index;
pub mod lsh;
pub mod persistence;
pub mod vector;

pub use index::EmbeddingIndex;
pub use vector::{compare, similarity};
