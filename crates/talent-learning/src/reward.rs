//! Maps a recruiter action and the rank it happened at to a scalar reward.

use talent_core::config::RewardConfig;
use talent_core::InteractionType;

#[derive(Debug, Clone)]
pub struct RewardPolicy {
    config: RewardConfig,
}

impl RewardPolicy {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn base(&self, kind: InteractionType) -> f64 {
        let c = &self.config;
        match kind {
            InteractionType::View => c.view,
            InteractionType::Shortlist => c.shortlist,
            InteractionType::Application => c.application,
            InteractionType::Interview => c.interview,
            InteractionType::Hire => c.hire,
            InteractionType::Reject => c.reject,
        }
    }

    /// Base reward adjusted by the 1-based rank it was shown at.
    ///
    /// Positive rewards earn a bonus that shrinks linearly to 0 at
    /// `bonus_horizon`. High rewards at ranks past `poor_rank_threshold`
    /// lose `poor_rank_penalty`. Without a rank only the base applies.
    pub fn reward(&self, kind: InteractionType, rank: Option<u32>) -> f64 {
        let base = self.base(kind);
        let Some(rank) = rank else {
            return base;
        };
        let c = &self.config;
        let mut reward = base;
        if base > 0.0 && c.bonus_horizon > 0 {
            let horizon = f64::from(c.bonus_horizon);
            let bonus = ((horizon - f64::from(rank)) / horizon).max(0.0);
            reward += bonus * c.position_bonus_max;
        }
        if base >= c.high_reward_threshold && rank > c.poor_rank_threshold {
            reward -= c.poor_rank_penalty;
        }
        reward
    }
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self::new(RewardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_rewards_match_table() {
        let p = RewardPolicy::default();
        assert_eq!(p.base(InteractionType::View), 0.1);
        assert_eq!(p.base(InteractionType::Hire), 1.0);
        assert_eq!(p.base(InteractionType::Reject), -0.5);
    }

    #[test]
    fn rank_one_hire_gets_bonus() {
        let p = RewardPolicy::default();
        assert!((p.reward(InteractionType::Hire, Some(1)) - 1.18).abs() < 1e-12);
    }

    #[test]
    fn bonus_vanishes_at_horizon() {
        let p = RewardPolicy::default();
        assert_eq!(p.reward(InteractionType::Shortlist, Some(10)), 0.3);
        assert_eq!(p.reward(InteractionType::Shortlist, Some(25)), 0.3);
    }

    #[test]
    fn high_reward_at_poor_rank_is_penalised() {
        let p = RewardPolicy::default();
        assert!((p.reward(InteractionType::Interview, Some(11)) - 0.8).abs() < 1e-12);
        // Below the high-reward threshold: no penalty.
        assert_eq!(p.reward(InteractionType::View, Some(40)), 0.1);
    }

    #[test]
    fn rejects_get_no_bonus() {
        let p = RewardPolicy::default();
        assert_eq!(p.reward(InteractionType::Reject, Some(1)), -0.5);
    }

    #[test]
    fn unattributed_uses_base() {
        let p = RewardPolicy::default();
        assert_eq!(p.reward(InteractionType::Application, None), 0.7);
    }
}
