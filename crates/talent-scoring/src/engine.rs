//! Pair scoring and parallel top-k ranking.

use rayon::prelude::*;
use talent_core::config::ScoringConfig;
use talent_core::errors::{ConfigError, TalentError, TalentResult};
use talent_core::{Candidate, Job, MatchResult, ScoreBreakdown, ScoreWeights, SemanticStatus};
use tracing::{debug, warn};

use crate::components::{experience_match, semantic_score, SkillRequirement};
use crate::heap::TopK;

/// Result of ranking one job against a pool.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Best first, ranks 1..=k.
    pub matches: Vec<MatchResult>,
    /// Candidates that were scored (excludes skipped ones).
    pub scored: usize,
    /// Malformed candidates excluded from the ranking.
    pub skipped: usize,
    /// Scored candidates whose semantic term was forced to 0.
    pub missing_embeddings: usize,
}

/// Stateless scorer. Holds only an optional dedicated thread pool.
pub struct ScoringEngine {
    pool: Option<rayon::ThreadPool>,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> TalentResult<Self> {
        let pool = if config.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .thread_name(|i| format!("talent-score-{i}"))
                .build()
                .map_err(|e| ConfigError::ValidationFailed {
                    field: "scoring.threads".to_string(),
                    message: e.to_string(),
                })?;
            Some(pool)
        } else {
            None
        };
        Ok(Self { pool })
    }

    /// Score a single pair. Rank is left at 0.
    pub fn score(
        &self,
        job: &Job,
        candidate: &Candidate,
        weights: &ScoreWeights,
    ) -> TalentResult<MatchResult> {
        check_job(job)?;
        if let Some(reason) = candidate.validation_error() {
            return Err(TalentError::malformed_candidate(&candidate.id, reason));
        }
        Ok(score_pair(job, &SkillRequirement::for_job(job), candidate, weights))
    }

    /// Top `k` candidates by total score, ties by candidate id ascending.
    ///
    /// Malformed candidates are excluded and counted; they never abort the
    /// ranking. A malformed job does.
    pub fn rank_candidates(
        &self,
        job: &Job,
        candidates: &[Candidate],
        k: usize,
        weights: &ScoreWeights,
    ) -> TalentResult<RankingOutcome> {
        check_job(job)?;
        let requirement = SkillRequirement::for_job(job);

        let run = || {
            candidates
                .par_iter()
                .fold(
                    || Partial::new(k),
                    |mut acc, candidate| {
                        if let Some(reason) = candidate.validation_error() {
                            debug!(candidate_id = %candidate.id, %reason, "skipping malformed candidate");
                            acc.skipped += 1;
                            return acc;
                        }
                        let result = score_pair(job, &requirement, candidate, weights);
                        if result.breakdown.semantic_status != SemanticStatus::Computed {
                            acc.missing_embeddings += 1;
                        }
                        acc.scored += 1;
                        acc.top.push(result);
                        acc
                    },
                )
                .reduce(|| Partial::new(k), Partial::merge)
        };
        let partial = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        if partial.skipped > 0 {
            warn!(job_id = %job.id, skipped = partial.skipped, "malformed candidates excluded from ranking");
        }
        Ok(RankingOutcome {
            matches: partial.top.into_ranked(),
            scored: partial.scored,
            skipped: partial.skipped,
            missing_embeddings: partial.missing_embeddings,
        })
    }
}

struct Partial {
    top: TopK,
    scored: usize,
    skipped: usize,
    missing_embeddings: usize,
}

impl Partial {
    fn new(k: usize) -> Self {
        Self {
            top: TopK::new(k),
            scored: 0,
            skipped: 0,
            missing_embeddings: 0,
        }
    }

    fn merge(self, other: Partial) -> Self {
        Self {
            top: self.top.merge(other.top),
            scored: self.scored + other.scored,
            skipped: self.skipped + other.skipped,
            missing_embeddings: self.missing_embeddings + other.missing_embeddings,
        }
    }
}

fn check_job(job: &Job) -> TalentResult<()> {
    match job.validation_error() {
        Some(reason) => Err(TalentError::invalid_job(&job.id, reason)),
        None => Ok(()),
    }
}

fn score_pair(
    job: &Job,
    requirement: &SkillRequirement,
    candidate: &Candidate,
    weights: &ScoreWeights,
) -> MatchResult {
    let (semantic, semantic_status) =
        semantic_score(job.embedding.as_deref(), candidate.embedding.as_deref());
    let skills = requirement.overlap(candidate);
    let experience = experience_match(candidate.experience_years, job.min_experience_years);

    let breakdown = ScoreBreakdown {
        semantic_score: semantic,
        skill_overlap_score: skills.score,
        experience_match_score: experience,
        matched_skills: skills.matched,
        missing_skills: skills.missing,
        weights_used: *weights,
        semantic_status,
    };
    MatchResult {
        job_id: job.id.clone(),
        candidate_id: candidate.id.clone(),
        total_score: weights.dot(&breakdown.components()),
        breakdown,
        rank: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(&ScoringConfig::default()).unwrap()
    }

    fn pool(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("c{i:03}"), vec!["rust".into()], i as f64 % 7.0))
            .collect()
    }

    #[test]
    fn ranks_are_one_based_and_bounded_by_k() {
        let job = Job::new("j", vec!["Rust".into()], 5.0);
        let out = engine()
            .rank_candidates(&job, &pool(50), 5, &ScoreWeights::default())
            .unwrap();
        assert_eq!(out.matches.len(), 5);
        let ranks: Vec<u32> = out.matches.iter().map(|m| m.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(out.scored, 50);
    }

    #[test]
    fn ties_break_by_candidate_id() {
        let job = Job::new("j", vec![], 0.0);
        let candidates = vec![
            Candidate::new("b", vec![], 1.0),
            Candidate::new("a", vec![], 1.0),
            Candidate::new("c", vec![], 1.0),
        ];
        let out = engine()
            .rank_candidates(&job, &candidates, 3, &ScoreWeights::default())
            .unwrap();
        let ids: Vec<&str> = out.matches.iter().map(|m| m.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn malformed_candidates_are_skipped_not_fatal() {
        let job = Job::new("j", vec!["Go".into()], 1.0);
        let candidates = vec![
            Candidate::new("ok", vec!["go".into()], 2.0),
            Candidate::new("bad", vec!["go".into()], f64::NAN),
        ];
        let out = engine()
            .rank_candidates(&job, &candidates, 10, &ScoreWeights::default())
            .unwrap();
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn malformed_job_aborts() {
        let job = Job::new("j", vec![], -1.0);
        let err = engine()
            .rank_candidates(&job, &pool(3), 3, &ScoreWeights::default())
            .unwrap_err();
        assert!(matches!(err, TalentError::InvalidJob { .. }));
    }

    #[test]
    fn zero_k_returns_nothing_but_counts() {
        let job = Job::new("j", vec![], 0.0);
        let out = engine()
            .rank_candidates(&job, &pool(4), 0, &ScoreWeights::default())
            .unwrap();
        assert!(out.matches.is_empty());
        assert_eq!(out.scored, 4);
    }

    #[test]
    fn dedicated_pool_gives_same_order() {
        let job = Job::new("j", vec!["Rust".into()], 3.0);
        let candidates = pool(200);
        let global = engine()
            .rank_candidates(&job, &candidates, 20, &ScoreWeights::default())
            .unwrap();
        let dedicated = ScoringEngine::new(&ScoringConfig {
            threads: 2,
            ..ScoringConfig::default()
        })
        .unwrap()
        .rank_candidates(&job, &candidates, 20, &ScoreWeights::default())
        .unwrap();
        assert_eq!(global.matches, dedicated.matches);
    }
}
