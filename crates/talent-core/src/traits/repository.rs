use crate::errors::TalentResult;
use crate::models::{Candidate, Job};

/// Upstream source of job and candidate records.
pub trait ICandidateRepository: Send + Sync {
    /// `Ok(None)` when the job does not exist.
    fn get_job(&self, job_id: &str) -> TalentResult<Option<Job>>;

    /// The full candidate pool.
    fn list_candidates(&self) -> TalentResult<Vec<Candidate>>;

    fn candidate_count(&self) -> TalentResult<usize> {
        Ok(self.list_candidates()?.len())
    }
}
