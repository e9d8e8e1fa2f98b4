//! Upgrades and random rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Amount, GameConfig};

/// A purchasable multiplier on per-turn income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Display name, usually generated by the language model.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Gold needed to buy the upgrade.
    pub gold_cost: Amount,
    /// Factor applied to the owner's gold income.
    pub gold_multiplier: Amount,
    /// Factor applied to the owner's experience income.
    pub exp_multiplier: Amount,
}

impl Upgrade {
    /// Create an upgrade.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        gold_cost: Amount,
        gold_multiplier: Amount,
        exp_multiplier: Amount,
    ) -> Self {
        Self {
            name: name.into(),
            description: "An upgrade".to_string(),
            gold_cost,
            gold_multiplier,
            exp_multiplier,
        }
    }

    /// Create an upgrade with random cost and multipliers.
    pub fn random<R: Rng>(name: impl Into<String>, rng: &mut R, config: &GameConfig) -> Self {
        let cost = Amount::pow10(rng.gen_range(config.upgrade_cost_exp.clone()));
        let gold = Amount::from(rng.gen_range(config.upgrade_multiplier.clone()));
        let exp = Amount::from(rng.gen_range(config.upgrade_multiplier.clone()));
        Self::new(name, cost, gold, exp)
    }
}

/// A one-shot grant of gold and experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomReward {
    /// Gold granted.
    pub gold: Amount,
    /// Experience granted.
    pub exp: Amount,
}

impl RandomReward {
    /// Draw a fresh reward.
    pub fn roll<R: Rng>(rng: &mut R, config: &GameConfig) -> Self {
        Self {
            gold: Amount::pow10(rng.gen_range(config.reward_exp.clone())),
            exp: Amount::pow10(rng.gen_range(config.reward_exp.clone())),
        }
    }
}
