//! Best-score storage.
//!
//! The best score is a single integer that outlives every scene instance.
//! Stores may fail (missing home directory, read-only disk); callers treat
//! a failed read as "no best score yet" and keep playing.

use crate::core::constants::BEST_SCORE_FILE;
use crate::utils::persistence::{load_json, save_json, save_path};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("best score storage is unavailable")]
    Unavailable,
}

/// Durable key-value slot holding the best score.
pub trait BestScoreStore {
    /// Stored best score, `None` if nothing was ever written.
    fn load_best(&self) -> Result<Option<u32>, StoreError>;

    /// Overwrite the stored best score.
    fn save_best(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best(&self) -> Result<Option<u32>, StoreError> {
        (**self).load_best()
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save_best(score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// Best score kept as `{"best_score": N}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonBestScoreStore {
    path: PathBuf,
}

impl JsonBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at ~/.flappy/best_score.json.
    pub fn in_flappy_dir() -> Result<Self, StoreError> {
        Ok(Self::new(save_path(BEST_SCORE_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonBestScoreStore {
    fn load_best(&self) -> Result<Option<u32>, StoreError> {
        let record: Option<BestScoreRecord> = load_json(&self.path)?;
        Ok(record.map(|r| r.best_score))
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        save_json(&self.path, &BestScoreRecord { best_score: score })?;
        Ok(())
    }
}

/// In-process store, with switches to simulate disabled storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBestScoreStore {
    pub best: Option<u32>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    /// Number of successful writes.
    pub writes: u32,
}

impl MemoryBestScoreStore {
    pub fn with_best(best: u32) -> Self {
        Self {
            best: Some(best),
            ..Self::default()
        }
    }

    /// A store whose reads and writes always fail.
    pub fn unavailable() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load_best(&self) -> Result<Option<u32>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.best)
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        self.best = Some(score);
        self.writes += 1;
        Ok(())
    }
}
