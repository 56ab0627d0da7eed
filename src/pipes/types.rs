//! Pipe data structures.

/// Axis-aligned box in playfield coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Strict overlap; boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// One upper + one lower pipe sharing an x position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObstaclePair {
    /// Left edge of both pipes.
    pub x: f32,
    /// Bottom end of the upper pipe (top of the gap).
    pub upper_y: f32,
    /// Top end of the lower pipe (bottom of the gap).
    pub lower_y: f32,
}

impl ObstaclePair {
    pub fn gap_height(&self) -> f32 {
        self.lower_y - self.upper_y
    }

    /// A pair expires once its right edge has left the playfield.
    pub fn is_expired(&self, pipe_width: f32) -> bool {
        self.x + pipe_width < 0.0
    }

    /// Upper pipe box, from the top of the playfield down to the gap.
    pub fn upper_bounds(&self, pipe_width: f32) -> Bounds {
        Bounds::new(self.x, 0.0, pipe_width, self.upper_y.max(0.0))
    }

    /// Lower pipe box, from the gap down to `floor`.
    pub fn lower_bounds(&self, pipe_width: f32, floor: f32) -> Bounds {
        Bounds::new(self.x, self.lower_y, pipe_width, (floor - self.lower_y).max(0.0))
    }
}

/// Fixed-capacity pool of pipe pairs.
///
/// Slots are created once and repositioned in place; the pool never grows
/// or shrinks for the lifetime of a scene.
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    pairs: Vec<ObstaclePair>,
    pipe_width: f32,
}

impl ObstaclePool {
    /// Create `capacity` pairs, all parked at the origin until placed.
    pub fn new(capacity: usize, pipe_width: f32) -> Self {
        Self {
            pairs: vec![ObstaclePair::default(); capacity],
            pipe_width,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pipe_width(&self) -> f32 {
        self.pipe_width
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn get(&self, slot: usize) -> Option<&ObstaclePair> {
        self.pairs.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ObstaclePair> {
        self.pairs.get_mut(slot)
    }

    /// Largest x among all pairs, never less than 0.
    pub fn rightmost_x(&self) -> f32 {
        self.pairs.iter().fold(0.0_f32, |acc, pair| acc.max(pair.x))
    }

    /// First expired slot in slot order.
    pub fn first_expired(&self) -> Option<usize> {
        self.pairs
            .iter()
            .position(|pair| pair.is_expired(self.pipe_width))
    }

    /// Move every pair horizontally by `dx`.
    pub fn scroll(&mut self, dx: f32) {
        for pair in &mut self.pairs {
            pair.x += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_is_parked() {
        let pool = ObstaclePool::new(4, 26.0);
        assert_eq!(pool.len(), 4);
        assert!(pool.pairs().iter().all(|p| p.x == 0.0));
        assert_eq!(pool.rightmost_x(), 0.0);
        assert!(pool.first_expired().is_none());
    }

    #[test]
    fn test_expiry_needs_right_edge_past_zero() {
        let width = 26.0;
        let mut pair = ObstaclePair {
            x: -26.0,
            upper_y: 100.0,
            lower_y: 250.0,
        };
        // Right edge exactly at the boundary is still on screen
        assert!(!pair.is_expired(width));
        pair.x = -26.5;
        assert!(pair.is_expired(width));
    }

    #[test]
    fn test_rightmost_ignores_offscreen_pairs() {
        let mut pool = ObstaclePool::new(3, 26.0);
        pool.scroll(-100.0);
        assert_eq!(pool.rightmost_x(), 0.0);
        pool.get_mut(1).unwrap().x = 420.0;
        assert_eq!(pool.rightmost_x(), 420.0);
    }

    #[test]
    fn test_first_expired_in_slot_order() {
        let mut pool = ObstaclePool::new(4, 26.0);
        pool.get_mut(0).unwrap().x = 300.0;
        pool.get_mut(2).unwrap().x = -40.0;
        pool.get_mut(3).unwrap().x = -50.0;
        assert_eq!(pool.first_expired(), Some(2));
    }

    #[test]
    fn test_pair_bounds() {
        let pair = ObstaclePair {
            x: 100.0,
            upper_y: 150.0,
            lower_y: 320.0,
        };
        assert_eq!(pair.gap_height(), 170.0);
        assert_eq!(pair.upper_bounds(26.0), Bounds::new(100.0, 0.0, 26.0, 150.0));
        assert_eq!(
            pair.lower_bounds(26.0, 600.0),
            Bounds::new(100.0, 320.0, 26.0, 280.0)
        );
    }

    #[test]
    fn test_bounds_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Bounds::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Bounds::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Bounds::new(0.0, 20.0, 10.0, 10.0)));
    }
}
