//! Pipe placement and recycling.

use super::types::{ObstaclePair, ObstaclePool};
use crate::core::config::SceneConfig;
use crate::difficulty::TierRanges;
use rand::Rng;
use tracing::debug;

/// Random draws behind one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementDraw {
    /// Gap height, from the tier's vertical range.
    pub gap: u32,
    /// Gap top, kept `edge_margin` away from both playfield edges.
    pub gap_top: u32,
    /// Distance to the rightmost pipe, from the tier's horizontal range.
    pub distance: u32,
}

/// Draw gap height, gap position and spawn distance for one pair.
///
/// Each call makes fresh independent draws. The gap height is drawn first
/// because it bounds the position range.
pub fn draw_placement<R: Rng + ?Sized>(
    ranges: &TierRanges,
    config: &SceneConfig,
    rng: &mut R,
) -> PlacementDraw {
    let gap = ranges.vertical.sample(rng);
    let gap_top = config.vertical_position_range(gap).sample(rng);
    let distance = ranges.horizontal.sample(rng);
    PlacementDraw {
        gap,
        gap_top,
        distance,
    }
}

/// Compute the new position of a pair placed after `rightmost_x`.
pub fn place<R: Rng + ?Sized>(
    rightmost_x: f32,
    ranges: &TierRanges,
    config: &SceneConfig,
    rng: &mut R,
) -> ObstaclePair {
    let draw = draw_placement(ranges, config, rng);
    let upper_y = draw.gap_top as f32;
    ObstaclePair {
        x: rightmost_x + draw.distance as f32,
        upper_y,
        lower_y: upper_y + draw.gap as f32,
    }
}

/// Reposition `slot` behind the current rightmost pair.
///
/// Returns the new pair, or `None` if the slot does not exist.
pub fn reposition<R: Rng + ?Sized>(
    pool: &mut ObstaclePool,
    slot: usize,
    ranges: &TierRanges,
    config: &SceneConfig,
    rng: &mut R,
) -> Option<ObstaclePair> {
    let rightmost = pool.rightmost_x();
    let placed = place(rightmost, ranges, config, rng);
    let pair = pool.get_mut(slot)?;
    *pair = placed;
    Some(placed)
}

/// Give every slot its first position, one after another from x = 0.
pub fn populate<R: Rng + ?Sized>(
    pool: &mut ObstaclePool,
    ranges: &TierRanges,
    config: &SceneConfig,
    rng: &mut R,
) {
    for slot in 0..pool.len() {
        reposition(pool, slot, ranges, config, rng);
    }
}

/// A pair that left the playfield and was placed again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recycled {
    pub slot: usize,
    pub pair: ObstaclePair,
}

/// Recycle the first expired pair, if any.
///
/// Callers loop until this returns `None`, crediting one pass-through per
/// call. Looping lets the caller change the tier between two recycles
/// happening in the same frame.
pub fn recycle_next<R: Rng + ?Sized>(
    pool: &mut ObstaclePool,
    ranges: &TierRanges,
    config: &SceneConfig,
    rng: &mut R,
) -> Option<Recycled> {
    let slot = pool.first_expired()?;
    let pair = reposition(pool, slot, ranges, config, rng)?;
    debug!(slot, x = pair.x, gap = pair.gap_height(), "recycled pipe pair");
    Some(Recycled { slot, pair })
}
