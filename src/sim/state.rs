//! Run state and core simulation types
//!
//! Everything that is reset when a run restarts lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;
use crate::consts::{HARD_TIER_SCORE, NORMAL_TIER_SCORE};

/// Phase of the play scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Ticks run, flaps apply
    Active,
    /// Pause menu is up, ticks suppressed
    Paused,
    /// Resume requested, counting down before ticks run again
    Resuming { remaining: u32 },
    /// Terminal condition hit, waiting for the restart timer
    Ending,
    /// Player left through the pause menu
    Stopped,
}

/// How score thresholds promote the difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromotionRule {
    /// Promote only when the score lands exactly on a threshold.
    ///
    /// A score that jumps over a threshold never promotes. Scores move one
    /// recycle at a time, so this cannot happen during a normal run.
    #[default]
    ExactScore,
    /// Promote whenever the score is at or past a threshold
    Threshold,
}

/// Mutable per-run state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    pub tier: DifficultyTier,
    pub is_paused: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        Self {
            score: 0,
            tier: DifficultyTier::Easy,
            is_paused: false,
        }
    }

    /// Count one recycled pair and apply tier promotion.
    ///
    /// Returns the new tier if this pair promoted the run.
    pub fn on_pair_recycled(&mut self, rule: PromotionRule) -> Option<DifficultyTier> {
        self.score += 1;

        let target = match rule {
            PromotionRule::ExactScore => match self.score {
                NORMAL_TIER_SCORE => Some(DifficultyTier::Normal),
                HARD_TIER_SCORE => Some(DifficultyTier::Hard),
                _ => None,
            },
            PromotionRule::Threshold => {
                if self.score >= HARD_TIER_SCORE {
                    Some(DifficultyTier::Hard)
                } else if self.score >= NORMAL_TIER_SCORE {
                    Some(DifficultyTier::Normal)
                } else {
                    None
                }
            }
        };

        match target {
            Some(tier) if tier > self.tier => {
                log::info!("Difficulty promoted to {} at score {}", tier, self.score);
                self.tier = tier;
                Some(tier)
            }
            _ => None,
        }
    }
}

/// RNG seed record for reproducible runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Runs started with this seed (each restart advances it)
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Move to the next run's stream
    pub fn advance(&mut self) {
        self.stream = self.stream.wrapping_add(1);
    }
}
