//! Pipe obstacles: the fixed-size pool, placement and recycling.
//!
//! Upper and lower pipes are stored as one [`ObstaclePair`] from creation
//! on, so they always share an x position and are always recycled together.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
