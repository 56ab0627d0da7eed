//! Score keeping and best-score persistence.

pub mod persistence;
pub mod tracker;

pub use persistence::*;
pub use tracker::*;
