//! In-process job and candidate repository.

use dashmap::DashMap;
use talent_core::traits::ICandidateRepository;
use talent_core::{Candidate, Job, TalentResult};

/// Concurrent map-backed repository for embedders and tests.
#[derive(Default)]
pub struct InMemoryRepository {
    jobs: DashMap<String, Job>,
    candidates: DashMap<String, Candidate>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_job(&self, job: Job) {
        self.jobs.insert(job.id.clone(), job);
    }

    pub fn upsert_candidate(&self, candidate: Candidate) {
        self.candidates.insert(candidate.id.clone(), candidate);
    }
}

impl ICandidateRepository for InMemoryRepository {
    fn get_job(&self, job_id: &str) -> TalentResult<Option<Job>> {
        Ok(self.jobs.get(job_id).map(|j| j.value().clone()))
    }

    /// Sorted by id so repeated searches see the same input order.
    fn list_candidates(&self) -> TalentResult<Vec<Candidate>> {
        let mut all: Vec<Candidate> = self.candidates.iter().map(|c| c.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    fn candidate_count(&self) -> TalentResult<usize> {
        Ok(self.candidates.len())
    }
}
