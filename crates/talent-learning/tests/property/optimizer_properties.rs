//! Property tests: fitted weights always land on the simplex.

use proptest::prelude::*;
use talent_core::config::RewardConfig;
use talent_core::{InteractionType, ScoreWeights};
use talent_learning::ridge;
use talent_learning::RewardPolicy;

fn row() -> impl Strategy<Value = ([f64; 3], f64)> {
    ([0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0], -0.5f64..=1.2)
}

proptest! {
    #[test]
    fn rectified_fit_is_on_simplex(rows in prop::collection::vec(row(), 5..120)) {
        let features: Vec<[f64; 3]> = rows.iter().map(|r| r.0).collect();
        let targets: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let fit = ridge::fit(&features, &targets, 0.1).unwrap();
        prop_assert!(fit.r2 <= 1.0 + 1e-9);
        if let Ok(w) = ScoreWeights::from_raw(fit.coefficients) {
            prop_assert!(w.validate().is_ok());
            prop_assert!(w.as_array().iter().all(|v| *v >= 0.0));
        }
    }

    #[test]
    fn fit_is_deterministic(rows in prop::collection::vec(row(), 5..60)) {
        let features: Vec<[f64; 3]> = rows.iter().map(|r| r.0).collect();
        let targets: Vec<f64> = rows.iter().map(|r| r.1).collect();
        prop_assert_eq!(
            ridge::fit(&features, &targets, 0.1).unwrap(),
            ridge::fit(&features, &targets, 0.1).unwrap()
        );
    }

    #[test]
    fn better_rank_never_earns_less(rank in 1u32..40) {
        let policy = RewardPolicy::new(RewardConfig::default());
        for kind in InteractionType::ALL {
            let here = policy.reward(kind, Some(rank));
            let below = policy.reward(kind, Some(rank + 1));
            prop_assert!(here >= below, "{kind} at {rank}: {here} < {below}");
        }
    }

    #[test]
    fn hire_outranks_reject_everywhere(rank in 1u32..100) {
        let policy = RewardPolicy::default();
        prop_assert!(
            policy.reward(InteractionType::Hire, Some(rank))
                > policy.reward(InteractionType::Reject, Some(rank))
        );
    }
}
