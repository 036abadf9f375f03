//! Property tests: similarity bounds and nearest-neighbour ordering.

use proptest::prelude::*;
use talent_core::config::EmbeddingConfig;
use talent_embeddings::{similarity, EmbeddingIndex};

proptest! {
    #[test]
    fn prop_similarity_bounded_and_symmetric(
        a in prop::collection::vec(-10.0f32..10.0, 4),
        b in prop::collection::vec(-10.0f32..10.0, 4),
    ) {
        let ab = similarity(&a, &b);
        let ba = similarity(&b, &a);
        prop_assert!((-1.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn prop_nearest_is_bounded_and_sorted(
        vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 6), 1..60),
        query in prop::collection::vec(-1.0f32..1.0, 6),
        k in 1usize..10,
    ) {
        let index = EmbeddingIndex::new(EmbeddingConfig { rebuild_threshold: 8, ..EmbeddingConfig::default() });
        for (i, v) in vectors.iter().enumerate() {
            index.upsert(&format!("e{i}"), v).unwrap();
        }
        let hits = index.nearest(&query, k).unwrap();
        prop_assert!(hits.len() <= k);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
            if pair[0].1 == pair[1].1 {
                prop_assert!(pair[0].0 < pair[1].0);
            }
        }
    }
}
