//! Difficulty data structures.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Difficulty tiers, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Inclusive integer range, written as `[min, max]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct SpawnRange {
    pub min: u32,
    pub max: u32,
}

impl SpawnRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `min > max`, i.e. there is nothing to draw from.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Uniform draw inclusive of both bounds.
    ///
    /// An empty range collapses to `min`. Configs are validated before a
    /// scene is built, so this only matters for hand-built ranges.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.is_empty() {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl From<(u32, u32)> for SpawnRange {
    fn from((min, max): (u32, u32)) -> Self {
        Self::new(min, max)
    }
}

impl From<SpawnRange> for (u32, u32) {
    fn from(range: SpawnRange) -> Self {
        (range.min, range.max)
    }
}

/// Spawn ranges for a single tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRanges {
    /// Distance from the rightmost pipe to the newly placed one.
    pub horizontal: SpawnRange,
    /// Height of the gap between the upper and lower pipe.
    pub vertical: SpawnRange,
}

/// Static mapping from tier to spawn ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: TierRanges,
    pub normal: TierRanges,
    pub hard: TierRanges,
}

impl DifficultyTable {
    pub fn get(&self, tier: DifficultyTier) -> &TierRanges {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Normal => &self.normal,
            DifficultyTier::Hard => &self.hard,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DifficultyTier, &TierRanges)> {
        DifficultyTier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: TierRanges {
                horizontal: SpawnRange::new(300, 350),
                vertical: SpawnRange::new(150, 200),
            },
            normal: TierRanges {
                horizontal: SpawnRange::new(280, 330),
                vertical: SpawnRange::new(140, 190),
            },
            hard: TierRanges {
                horizontal: SpawnRange::new(250, 310),
                vertical: SpawnRange::new(120, 170),
            },
        }
    }
}
