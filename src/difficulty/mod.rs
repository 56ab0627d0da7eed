//! Difficulty tiers and the score thresholds that advance them.
//!
//! Each tier bundles the horizontal spawn-distance range and the vertical
//! gap range that pipe placement draws from. The active tier only affects
//! pipes placed after it changes.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
