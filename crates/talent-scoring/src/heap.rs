//! Bounded top-k selection. The heap keeps the worst retained result on
//! top so each push past capacity evicts it in O(log k).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use talent_core::MatchResult;

/// Orders so that "greater" means "ranks worse": lower total, then
/// larger candidate id.
struct Worst(MatchResult);

impl PartialEq for Worst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Worst {}

impl PartialOrd for Worst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Worst {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .total_score
            .total_cmp(&self.0.total_score)
            .then_with(|| self.0.candidate_id.cmp(&other.0.candidate_id))
    }
}

pub(crate) struct TopK {
    k: usize,
    heap: BinaryHeap<Worst>,
}

impl TopK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
        }
    }

    pub(crate) fn push(&mut self, result: MatchResult) {
        if self.k == 0 {
            return;
        }
        self.heap.push(Worst(result));
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    pub(crate) fn merge(mut self, other: TopK) -> Self {
        for item in other.heap {
            self.push(item.0);
        }
        self
    }

    /// Best first, 1-based ranks assigned.
    pub(crate) fn into_ranked(self) -> Vec<MatchResult> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .enumerate()
            .map(|(i, Worst(mut r))| {
                r.rank = i as u32 + 1;
                r
            })
            .collect()
    }
}
