//! Test fixture loader for scoring scenarios and candidate pools.
//!
//! Fixtures live next to this crate under `fixtures/`; helpers panic on
//! missing or malformed files since they only run inside tests.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use talent_core::{Candidate, Job, ScoreWeights};

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Expected component and total scores for a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedScores {
    pub semantic: f64,
    pub skill_overlap: f64,
    pub experience: f64,
    pub total: f64,
    /// Absolute tolerance for the total.
    pub tolerance: f64,
}

/// One job scored against one candidate with a fixed weight triple.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringScenario {
    pub name: String,
    pub job: Job,
    pub candidate: Candidate,
    pub weights: ScoreWeights,
    pub expected: ExpectedScores,
}

/// A job plus a pool of candidates for ranking tests.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePool {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
}

pub fn scoring_scenarios() -> Vec<ScoringScenario> {
    list_fixtures("scoring")
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| format!("scoring/{n}"))
                .unwrap_or_else(|| panic!("bad fixture path {}", path.display()));
            load_fixture(&name)
        })
        .collect()
}

pub fn scoring_scenario(file: &str) -> ScoringScenario {
    load_fixture(&format!("scoring/{file}"))
}

pub fn small_pool() -> CandidatePool {
    load_fixture("pools/small_pool.json")
}
