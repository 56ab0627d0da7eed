//! Scene configuration: playfield, physics defaults, timers and difficulty table.
//!
//! Configs are validated once at load time. A [`ValidatedConfig`] is the only
//! thing a scene accepts, so placement never has to handle an empty range.

use super::constants::*;
use crate::difficulty::{DifficultyTable, SpawnRange};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{tier} {axis} range is inverted: min {min} > max {max}")]
    InvalidRange {
        tier: &'static str,
        axis: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{tier} vertical gap must be at least 1 px")]
    ZeroGap { tier: &'static str },
    #[error(
        "{tier} vertical gap of up to {gap_max} px does not fit a {height} px playfield with {margin} px margins"
    )]
    EmptyPlacementRange {
        tier: &'static str,
        gap_max: u32,
        height: u32,
        margin: u32,
    },
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable parameters for one play scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    pub bird_start_x: f32,
    pub bird_start_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Upward speed set by a flap, in px/s.
    pub flap_velocity: f32,
    /// Horizontal pipe speed in px/s (negative = leftward).
    pub pipe_velocity_x: f32,
    pub pipe_width: f32,
    /// Number of pipe pairs in the pool.
    pub pipe_count: usize,
    /// Minimum distance between a pipe end and the top/bottom of the playfield.
    pub edge_margin: u32,
    pub restart_delay_ms: u64,
    pub countdown_start: u32,
    pub countdown_tick_ms: u64,
    pub difficulty: DifficultyTable,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            bird_start_x: BIRD_START_X,
            bird_start_y: BIRD_START_Y,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            pipe_velocity_x: PIPE_VELOCITY_X,
            pipe_width: PIPE_WIDTH,
            pipe_count: PIPE_COUNT,
            edge_margin: EDGE_MARGIN,
            restart_delay_ms: RESTART_DELAY_MS,
            countdown_start: COUNTDOWN_START,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
            difficulty: DifficultyTable::default(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be a positive number",
        })
    }
}

impl SceneConfig {
    /// Load a config from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<ValidatedConfig, ConfigError> {
        let config = match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str::<SceneConfig>(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => SceneConfig::default(),
            Err(e) => return Err(e.into()),
        };
        config.validated()
    }

    /// Load from a resolved config location. When the location itself could
    /// not be resolved (no usable home directory) the defaults are used.
    pub fn load_or_default(location: io::Result<PathBuf>) -> Result<ValidatedConfig, ConfigError> {
        match location {
            Ok(path) => Self::load(&path),
            Err(e) => {
                warn!(error = %e, "config directory unavailable, using defaults");
                Ok(ValidatedConfig::default())
            }
        }
    }

    /// Playfield height in whole pixels, as used by placement.
    pub fn height_px(&self) -> u32 {
        self.height.max(0.0).floor() as u32
    }

    /// Range of gap-top positions that keeps a gap of `gap` px inside the margins.
    pub fn vertical_position_range(&self, gap: u32) -> SpawnRange {
        let max = self
            .height_px()
            .saturating_sub(self.edge_margin)
            .saturating_sub(gap);
        SpawnRange::new(self.edge_margin, max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("bird_width", self.bird_width)?;
        positive("bird_height", self.bird_height)?;
        positive("pipe_width", self.pipe_width)?;
        positive("flap_velocity", self.flap_velocity)?;
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "gravity",
                reason: "must be zero or positive",
            });
        }
        if !(self.pipe_velocity_x.is_finite() && self.pipe_velocity_x < 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "pipe_velocity_x",
                reason: "pipes must scroll left",
            });
        }
        if self.pipe_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipe_count",
                reason: "pool needs at least one pair",
            });
        }
        if self.countdown_start == 0 {
            return Err(ConfigError::InvalidValue {
                field: "countdown_start",
                reason: "must be at least 1",
            });
        }
        if self.countdown_tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "countdown_tick_ms",
                reason: "must be at least 1",
            });
        }

        for (tier, ranges) in self.difficulty.iter() {
            let tier = tier.name();
            for (axis, range) in [("horizontal", ranges.horizontal), ("vertical", ranges.vertical)] {
                if range.is_empty() {
                    return Err(ConfigError::InvalidRange {
                        tier,
                        axis,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
            if ranges.vertical.min == 0 {
                return Err(ConfigError::ZeroGap { tier });
            }
            let needed = ranges
                .vertical
                .max
                .saturating_add(self.edge_margin.saturating_mul(2));
            if needed > self.height_px() {
                return Err(ConfigError::EmptyPlacementRange {
                    tier,
                    gap_max: ranges.vertical.max,
                    height: self.height_px(),
                    margin: self.edge_margin,
                });
            }
        }
        Ok(())
    }

    pub fn validated(self) -> Result<ValidatedConfig, ConfigError> {
        self.validate()?;
        Ok(ValidatedConfig(self))
    }
}

/// A [`SceneConfig`] that passed [`SceneConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig(SceneConfig);

impl ValidatedConfig {
    pub fn into_inner(self) -> SceneConfig {
        self.0
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self(SceneConfig::default())
    }
}

impl Deref for ValidatedConfig {
    type Target = SceneConfig;

    fn deref(&self) -> &SceneConfig {
        &self.0
    }
}
