//! Span definitions per operation: search, interaction, retrain.

/// Create a search span.
#[macro_export]
macro_rules! search_span {
    ($job_id:expr, $k:expr) => {
        tracing::info_span!("talent.search", job_id = %$job_id, k = $k)
    };
}

/// Create an interaction span.
#[macro_export]
macro_rules! interaction_span {
    ($job_id:expr, $candidate_id:expr, $kind:expr) => {
        tracing::info_span!(
            "talent.interaction",
            job_id = %$job_id,
            candidate_id = %$candidate_id,
            kind = %$kind
        )
    };
}

/// Create a retrain span.
#[macro_export]
macro_rules! retrain_span {
    ($trigger:expr) => {
        tracing::info_span!("talent.retrain", trigger = $trigger)
    };
}
