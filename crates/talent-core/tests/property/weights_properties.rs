//! Property tests: rectified weights always land on the simplex.

use proptest::prelude::*;
use talent_core::models::ScoreWeights;

proptest! {
    #[test]
    fn prop_from_raw_is_on_simplex(
        a in -10.0f64..10.0,
        b in -10.0f64..10.0,
        c in -10.0f64..10.0,
    ) {
        prop_assume!(a > 1e-9 || b > 1e-9 || c > 1e-9);
        let w = ScoreWeights::from_raw([a, b, c]).unwrap();
        prop_assert!(w.semantic >= 0.0 && w.skill >= 0.0 && w.experience >= 0.0);
        prop_assert!((w.as_array().iter().sum::<f64>() - 1.0).abs() <= 1e-6);
    }

    #[test]
    fn prop_dot_stays_in_unit_interval(
        s in 0.0f64..=1.0,
        k in 0.0f64..=1.0,
        e in 0.0f64..=1.0,
        a in 0.01f64..10.0,
        b in 0.01f64..10.0,
        c in 0.01f64..10.0,
    ) {
        let w = ScoreWeights::from_raw([a, b, c]).unwrap();
        let total = w.dot(&talent_core::ComponentScores { semantic: s, skill_overlap: k, experience: e });
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&total));
    }
}
