//! Scene configuration and tuning constants.

pub mod config;
pub mod constants;

pub use config::*;
pub use constants::*;
