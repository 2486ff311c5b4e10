//! Difficulty tiers and their spawn ranges

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive integer range sampled uniformly by the spawn planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}

impl SpawnRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Uniform draw over `[min, max]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.random_range(self.min..=self.max)
    }
}

/// Spacing and gap ranges for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierParams {
    /// Distance from the rightmost obstacle to the next pair
    pub horizontal_spacing: SpawnRange,
    /// Height of the gap between the upper and lower half
    pub vertical_opening: SpawnRange,
}

/// Difficulty tier, promoted as the score grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    #[default]
    Easy,
    Normal,
    Hard,
}

const EASY: TierParams = TierParams {
    horizontal_spacing: SpawnRange::new(300, 500),
    vertical_opening: SpawnRange::new(100, 250),
};

const NORMAL: TierParams = TierParams {
    horizontal_spacing: SpawnRange::new(280, 330),
    vertical_opening: SpawnRange::new(140, 190),
};

const HARD: TierParams = TierParams {
    horizontal_spacing: SpawnRange::new(250, 310),
    vertical_opening: SpawnRange::new(120, 170),
};

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub fn params(&self) -> TierParams {
        match self {
            DifficultyTier::Easy => EASY,
            DifficultyTier::Normal => NORMAL,
            DifficultyTier::Hard => HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Hard => "hard",
        }
    }

    /// Tier that follows this one (Hard is terminal)
    pub fn next(&self) -> Option<Self> {
        match self {
            DifficultyTier::Easy => Some(DifficultyTier::Normal),
            DifficultyTier::Normal => Some(DifficultyTier::Hard),
            DifficultyTier::Hard => None,
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
