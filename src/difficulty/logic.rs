//! Tier progression driven by score.

use super::types::DifficultyTier;
use crate::core::constants::{HARD_SCORE_THRESHOLD, NORMAL_SCORE_THRESHOLD};

/// Tier for a given score.
///
/// Thresholds are inclusive lower bounds, so a score that jumps past an
/// exact threshold still advances the tier.
pub fn tier_for(score: u32) -> DifficultyTier {
    if score >= HARD_SCORE_THRESHOLD {
        DifficultyTier::Hard
    } else if score >= NORMAL_SCORE_THRESHOLD {
        DifficultyTier::Normal
    } else {
        DifficultyTier::Easy
    }
}

/// Returns the new tier if `score` moves the game past `current`.
///
/// Tiers never move backwards within a run.
pub fn advance_tier(current: DifficultyTier, score: u32) -> Option<DifficultyTier> {
    let next = tier_for(score);
    (next > current).then_some(next)
}
