//! Play scene data structures.

use super::timers::TimerHandle;
use crate::difficulty::DifficultyTier;
use crate::score::ScoreTracker;

/// Scene state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Simulation live (possibly still counting down after a resume).
    Running,
    /// Suspended; the pause menu has control.
    Paused,
    /// Run ended; a restart is scheduled.
    GameOver,
}

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Bird reached the bottom of the playfield.
    Ground,
    /// Physics reported bird/pipe overlap.
    Collision,
}

/// Text overlays the scene keeps up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Score,
    BestScore,
    Countdown,
}

/// Deferred scene callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTimer {
    Restart,
    CountdownTick,
}

/// Something that happened inside the scene, for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A pipe pair left the playfield and was recycled.
    PassThrough { score: u32 },
    /// A new best score was written to the store.
    NewBest { score: u32 },
    TierChanged { tier: DifficultyTier },
    GameOver { cause: GameOverCause, score: u32 },
    Paused,
    CountdownTick { remaining: u32 },
    /// Countdown finished; flapping works again.
    Resumed,
    /// A fresh run started.
    RunStarted { run: u32 },
}

/// Resume countdown in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: u32,
    pub handle: TimerHandle,
}

/// Mutable per-run state. Replaced wholesale when the scene restarts.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: ScenePhase,
    pub tracker: ScoreTracker,
    pub tier: DifficultyTier,
    /// Flap input is ignored while set. Stays set until a resume countdown ends.
    pub is_paused: bool,
    pub countdown: Option<Countdown>,
}

impl GameState {
    pub fn new(tracker: ScoreTracker) -> Self {
        Self {
            phase: ScenePhase::Running,
            tracker,
            tier: DifficultyTier::Easy,
            is_paused: false,
            countdown: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn best_score_text(best: u32) -> String {
    format!("Best score: {}", best)
}

pub fn countdown_text(remaining: u32) -> String {
    format!("Fly in: {}", remaining)
}
