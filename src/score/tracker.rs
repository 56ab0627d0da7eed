//! Per-run score with best-score bookkeeping.

use super::persistence::BestScoreStore;
use tracing::{info, warn};

/// Score for the current run plus the best score known to this session.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: u32,
    /// Best score read when the run started, used for display.
    best_at_start: u32,
    /// Highest best score seen in the store or written by this tracker.
    best_seen: Option<u32>,
}

/// Outcome of one pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u32,
    /// The score was written to the store as the new best.
    pub new_best: bool,
}

/// Read the best score, treating an unavailable store as empty.
fn read_best<S: BestScoreStore + ?Sized>(store: &S) -> Option<u32> {
    match store.load_best() {
        Ok(best) => best,
        Err(e) => {
            warn!(error = %e, "best score unavailable, treating as absent");
            None
        }
    }
}

impl ScoreTracker {
    /// Start a run at score 0 and read the stored best score once.
    pub fn start<S: BestScoreStore + ?Sized>(store: &S) -> Self {
        let best_seen = read_best(store);
        Self {
            score: 0,
            best_at_start: best_seen.unwrap_or(0),
            best_seen,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_at_start(&self) -> u32 {
        self.best_at_start
    }

    /// Best score including anything this run has written.
    pub fn best(&self) -> u32 {
        self.best_seen.unwrap_or(0)
    }

    /// Credit one pass-through and update the stored best score.
    pub fn on_pass_through<S: BestScoreStore + ?Sized>(&mut self, store: &mut S) -> ScoreUpdate {
        self.score = self.score.saturating_add(1);
        let new_best = self.persist_best(store);
        ScoreUpdate {
            score: self.score,
            new_best,
        }
    }

    /// Write the current score if there is no best score yet or it beats it.
    ///
    /// The comparison uses the larger of the stored value and the best seen
    /// by this tracker. While the stored value is unknown (read failed and
    /// nothing seen yet) nothing is written, so the stored best never drops.
    /// Returns true when a new best was written.
    pub fn persist_best<S: BestScoreStore + ?Sized>(&mut self, store: &mut S) -> bool {
        let known = match (store.load_best(), self.best_seen) {
            (Ok(stored), seen) => stored.max(seen),
            (Err(e), Some(seen)) => {
                warn!(error = %e, "best score unavailable, using last seen");
                Some(seen)
            }
            (Err(e), None) => {
                warn!(error = %e, score = self.score, "best score unknown, skipping write");
                return false;
            }
        };
        self.best_seen = known;

        if known.is_some_and(|best| self.score <= best) {
            return false;
        }
        match store.save_best(self.score) {
            Ok(()) => {
                info!(best_score = self.score, "new best score");
                self.best_seen = Some(self.score);
                true
            }
            Err(e) => {
                warn!(error = %e, score = self.score, "could not persist best score");
                false
            }
        }
    }
}
