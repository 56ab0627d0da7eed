//! The play scene: per-frame loop controller, pause/resume flow and game over.
//!
//! The scene owns all per-run state and talks to rendering, physics and
//! input only through the [`Engine`] handle it was built with. Deferred work
//! (restart delay, resume countdown) runs on a [`TimerQueue`] advanced from
//! [`PlayScene::frame`], so every callback is serialized with the update.

pub mod engine;
pub mod logic;
pub mod timers;
pub mod types;

pub use engine::*;
pub use logic::*;
pub use timers::*;
pub use types::*;
