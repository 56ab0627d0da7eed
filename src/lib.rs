//! Flappy Scene - the play scene of a side-scrolling flappy bird game.
//!
//! The library holds the gameplay core: a fixed pool of pipe pairs that is
//! recycled as pipes scroll off screen, score-driven difficulty tiers, best
//! score persistence and the running/paused/game-over flow. Rendering,
//! physics and input sit behind the [`scene::Engine`] trait.

pub mod core;
pub mod difficulty;
pub mod engine;
pub mod pipes;
pub mod scene;
pub mod score;
pub mod utils;

pub use crate::core::config::{ConfigError, SceneConfig, ValidatedConfig};
pub use difficulty::{tier_for, DifficultyTier};
pub use engine::ArcadeEngine;
pub use scene::{Engine, PlayScene, SceneEvent, ScenePhase};
pub use score::{BestScoreStore, JsonBestScoreStore, MemoryBestScoreStore, ScoreTracker};
