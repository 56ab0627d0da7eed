//! Loop controller for the play scene.

use super::engine::{Collision, Engine};
use super::timers::TimerQueue;
use super::types::{
    best_score_text, countdown_text, score_text, Countdown, GameOverCause, GameState,
    SceneEvent, ScenePhase, SceneTimer, TextSlot,
};
use crate::core::config::ValidatedConfig;
use crate::core::constants::FAILED_TINT;
use crate::difficulty::{advance_tier, DifficultyTier};
use crate::pipes::{populate, recycle_next, ObstaclePool};
use crate::score::{BestScoreStore, ScoreTracker};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

/// One play scene: pipes, score, difficulty and the pause/game-over flow.
///
/// Driven by an external loop: call [`PlayScene::frame`] once per tick and
/// forward input through [`PlayScene::flap`], [`PlayScene::request_pause`]
/// and [`PlayScene::resume`].
pub struct PlayScene<E, S, R> {
    config: ValidatedConfig,
    engine: E,
    store: S,
    rng: R,
    state: GameState,
    pool: ObstaclePool,
    timers: TimerQueue<SceneTimer>,
    events: Vec<SceneEvent>,
    runs: u32,
}

impl<E: Engine, S: BestScoreStore, R: Rng> PlayScene<E, S, R> {
    /// Build the scene and start the first run.
    pub fn new(config: ValidatedConfig, engine: E, store: S, rng: R) -> Self {
        let pool = ObstaclePool::new(config.pipe_count, config.pipe_width);
        let mut scene = Self {
            config,
            engine,
            store,
            rng,
            state: GameState::new(ScoreTracker::default()),
            pool,
            timers: TimerQueue::new(),
            events: Vec::new(),
            runs: 0,
        };
        scene.start_run();
        scene
    }

    /// Reset every per-run piece of state. The store outlives runs.
    fn start_run(&mut self) {
        self.engine.reset();
        self.state = GameState::new(ScoreTracker::start(&self.store));
        self.timers = TimerQueue::new();

        self.pool = ObstaclePool::new(self.config.pipe_count, self.config.pipe_width);
        let ranges = self.config.difficulty.get(self.state.tier);
        populate(&mut self.pool, ranges, &self.config, &mut self.rng);

        self.engine.set_text(TextSlot::Score, score_text(0));
        self.engine.set_text(
            TextSlot::BestScore,
            best_score_text(self.state.tracker.best_at_start()),
        );
        self.engine.set_text(TextSlot::Countdown, String::new());

        self.runs += 1;
        info!(
            run = self.runs,
            best_score = self.state.tracker.best_at_start(),
            "run started"
        );
        self.events.push(SceneEvent::RunStarted { run: self.runs });
    }

    /// Advance the scene by one frame and return what happened since the
    /// previous call (including input handled in between).
    pub fn frame(&mut self, dt: Duration) -> Vec<SceneEvent> {
        if self.state.phase != ScenePhase::Paused {
            for (handle, timer) in self.timers.advance(dt) {
                match timer {
                    SceneTimer::Restart => {
                        self.restart();
                        return std::mem::take(&mut self.events);
                    }
                    SceneTimer::CountdownTick => {
                        if self.state.countdown.is_some_and(|c| c.handle == handle) {
                            self.countdown_tick();
                        }
                    }
                }
            }

            if self.state.phase == ScenePhase::Running && !self.engine.physics_paused() {
                if let Some(collision) = self.engine.step_physics(dt, &mut self.pool) {
                    self.on_collision(collision);
                }
            }
            self.update();
        }
        std::mem::take(&mut self.events)
    }

    /// Per-frame work while running: termination check, then recycling.
    pub fn update(&mut self) {
        if self.state.phase != ScenePhase::Running {
            return;
        }
        self.check_game_status();
        if self.state.phase == ScenePhase::Running {
            self.pipe_pooler();
        }
    }

    fn check_game_status(&mut self) {
        let bird = self.engine.bird();
        if bird.y >= self.config.height - bird.height {
            self.game_over(GameOverCause::Ground);
        }
    }

    fn pipe_pooler(&mut self) {
        loop {
            let ranges = self.config.difficulty.get(self.state.tier);
            let Some(recycled) = recycle_next(&mut self.pool, ranges, &self.config, &mut self.rng)
            else {
                break;
            };
            debug!(slot = recycled.slot, tier = self.state.tier.name(), "pass-through");
            self.increase_score();
            self.increase_difficulty();
        }
    }

    fn increase_score(&mut self) {
        let update = self.state.tracker.on_pass_through(&mut self.store);
        self.engine.set_text(TextSlot::Score, score_text(update.score));
        self.events.push(SceneEvent::PassThrough {
            score: update.score,
        });
        if update.new_best {
            self.events.push(SceneEvent::NewBest {
                score: update.score,
            });
        }
    }

    fn increase_difficulty(&mut self) {
        if let Some(tier) = advance_tier(self.state.tier, self.state.score()) {
            info!(tier = tier.name(), score = self.state.score(), "difficulty increased");
            self.state.tier = tier;
            self.events.push(SceneEvent::TierChanged { tier });
        }
    }

    /// Flap input. Ignored while paused or counting down, and after game over.
    ///
    /// Returns true if the bird flapped.
    pub fn flap(&mut self) -> bool {
        if self.state.is_paused || self.state.phase != ScenePhase::Running {
            return false;
        }
        self.engine.set_bird_velocity_y(-self.config.flap_velocity);
        true
    }

    /// Collision signal from physics.
    pub fn on_collision(&mut self, collision: Collision) {
        if self.state.phase != ScenePhase::Running {
            return;
        }
        debug!(slot = collision.slot, "bird hit pipe");
        self.game_over(GameOverCause::Collision);
    }

    fn game_over(&mut self, cause: GameOverCause) {
        if self.state.phase == ScenePhase::GameOver {
            return;
        }
        self.cancel_countdown();
        self.state.phase = ScenePhase::GameOver;
        self.engine.pause_physics();
        self.engine.set_bird_tint(Some(FAILED_TINT));
        if self.state.tracker.persist_best(&mut self.store) {
            self.events.push(SceneEvent::NewBest {
                score: self.state.score(),
            });
        }
        self.timers.schedule_once(
            Duration::from_millis(self.config.restart_delay_ms),
            SceneTimer::Restart,
        );
        info!(
            ?cause,
            score = self.state.score(),
            best = self.state.tracker.best(),
            "game over"
        );
        self.events.push(SceneEvent::GameOver {
            cause,
            score: self.state.score(),
        });
    }

    fn restart(&mut self) {
        info!(run = self.runs, "restarting scene");
        self.start_run();
    }

    /// Pause button. Freezes physics and timers and opens the pause menu.
    ///
    /// Pausing during a resume countdown drops that countdown. Returns false
    /// when not running.
    pub fn request_pause(&mut self) -> bool {
        if self.state.phase != ScenePhase::Running {
            return false;
        }
        self.cancel_countdown();
        self.state.is_paused = true;
        self.state.phase = ScenePhase::Paused;
        self.engine.pause_physics();
        self.engine.open_pause_menu();
        info!(score = self.state.score(), "paused");
        self.events.push(SceneEvent::Paused);
        true
    }

    /// Resume signal from the pause menu. Starts the countdown; flapping and
    /// physics come back when it reaches zero. Returns false when not paused.
    pub fn resume(&mut self) -> bool {
        if self.state.phase != ScenePhase::Paused {
            return false;
        }
        self.state.phase = ScenePhase::Running;
        let remaining = self.config.countdown_start;
        self.engine.set_text(TextSlot::Countdown, countdown_text(remaining));
        let handle = self.timers.schedule_repeating(
            Duration::from_millis(self.config.countdown_tick_ms),
            SceneTimer::CountdownTick,
        );
        self.state.countdown = Some(Countdown { remaining, handle });
        info!(countdown = remaining, "resuming");
        true
    }

    fn countdown_tick(&mut self) {
        let Some(countdown) = self.state.countdown.as_mut() else {
            return;
        };
        countdown.remaining = countdown.remaining.saturating_sub(1);
        let remaining = countdown.remaining;
        let handle = countdown.handle;
        self.events.push(SceneEvent::CountdownTick { remaining });

        if remaining > 0 {
            self.engine.set_text(TextSlot::Countdown, countdown_text(remaining));
            return;
        }
        self.state.is_paused = false;
        self.engine.set_text(TextSlot::Countdown, String::new());
        self.engine.resume_physics();
        self.timers.cancel(handle);
        self.state.countdown = None;
        info!("resumed");
        self.events.push(SceneEvent::Resumed);
    }

    fn cancel_countdown(&mut self) {
        if let Some(countdown) = self.state.countdown.take() {
            self.timers.cancel(countdown.handle);
            self.engine.set_text(TextSlot::Countdown, String::new());
        }
    }

    pub fn phase(&self) -> ScenePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn tier(&self) -> DifficultyTier {
        self.state.tier
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    /// Number of runs started, including the current one.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn pool(&self) -> &ObstaclePool {
        &self.pool
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct pool access, for drivers that move pipes themselves.
    pub fn pool_mut(&mut self) -> &mut ObstaclePool {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SceneConfig;
    use crate::scene::engine::BirdBody;
    use crate::score::MemoryBestScoreStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    /// Engine double: the bird stays where tests put it, pipes scroll by a
    /// fixed amount per step.
    #[derive(Debug, Default)]
    struct ScriptedEngine {
        bird: Option<BirdBody>,
        physics_paused: bool,
        tint: Option<u32>,
        texts: HashMap<TextSlot, String>,
        pause_menus: u32,
        resets: u32,
        scroll_per_step: f32,
        next_collision: Option<Collision>,
    }

    impl ScriptedEngine {
        fn text(&self, slot: TextSlot) -> &str {
            self.texts.get(&slot).map(String::as_str).unwrap_or("")
        }
    }

    impl Engine for ScriptedEngine {
        fn bird(&self) -> BirdBody {
            self.bird.unwrap_or(BirdBody {
                x: 80.0,
                y: 300.0,
                width: 48.0,
                height: 40.0,
                velocity_y: 0.0,
            })
        }

        fn set_bird_velocity_y(&mut self, velocity_y: f32) {
            let mut bird = self.bird();
            bird.velocity_y = velocity_y;
            self.bird = Some(bird);
        }

        fn pause_physics(&mut self) {
            self.physics_paused = true;
        }

        fn resume_physics(&mut self) {
            self.physics_paused = false;
        }

        fn physics_paused(&self) -> bool {
            self.physics_paused
        }

        fn step_physics(&mut self, _dt: Duration, pool: &mut ObstaclePool) -> Option<Collision> {
            if self.physics_paused {
                return None;
            }
            pool.scroll(-self.scroll_per_step);
            self.next_collision.take()
        }

        fn set_bird_tint(&mut self, tint: Option<u32>) {
            self.tint = tint;
        }

        fn set_text(&mut self, slot: TextSlot, text: String) {
            self.texts.insert(slot, text);
        }

        fn open_pause_menu(&mut self) {
            self.pause_menus += 1;
        }

        fn reset(&mut self) {
            self.bird = None;
            self.physics_paused = false;
            self.tint = None;
            self.texts.clear();
            self.resets += 1;
        }
    }

    type TestScene = PlayScene<ScriptedEngine, MemoryBestScoreStore, ChaCha8Rng>;

    fn create_scene(store: MemoryBestScoreStore) -> TestScene {
        PlayScene::new(
            ValidatedConfig::default(),
            ScriptedEngine::default(),
            store,
            ChaCha8Rng::seed_from_u64(12345),
        )
    }

    fn second() -> Duration {
        Duration::from_millis(1000)
    }

    fn frame_ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn expire_slot(scene: &mut TestScene, slot: usize) {
        let width = scene.pool().pipe_width();
        if let Some(pair) = scene.pool_mut().get_mut(slot) {
            pair.x = -width - 1.0;
        }
    }

    #[test]
    fn test_new_scene_starts_running() {
        let mut scene = create_scene(MemoryBestScoreStore::with_best(7));
        assert_eq!(scene.phase(), ScenePhase::Running);
        assert_eq!(scene.tier(), DifficultyTier::Easy);
        assert_eq!(scene.pool().len(), 4);
        assert!(scene.pool().pairs().iter().all(|p| p.x > 0.0));
        assert_eq!(scene.engine().text(TextSlot::Score), "Score: 0");
        assert_eq!(scene.engine().text(TextSlot::BestScore), "Best score: 7");
        assert_eq!(scene.engine().resets, 1);

        let events = scene.frame(frame_ms(16));
        assert_eq!(events, vec![SceneEvent::RunStarted { run: 1 }]);
    }

    #[test]
    fn test_flap_sets_upward_velocity() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        assert!(scene.flap());
        assert_eq!(scene.engine().bird().velocity_y, -300.0);
    }

    #[test]
    fn test_pass_through_scores_once_per_pair() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        scene.frame(frame_ms(16));

        expire_slot(&mut scene, 2);
        let events = scene.frame(frame_ms(16));

        assert_eq!(scene.score(), 1);
        assert!(events.contains(&SceneEvent::PassThrough { score: 1 }));
        assert!(events.contains(&SceneEvent::NewBest { score: 1 }));
        assert_eq!(scene.engine().text(TextSlot::Score), "Score: 1");
        assert_eq!(scene.store().best, Some(1));

        // Recycled pair is back on the right; nothing more to credit
        scene.frame(frame_ms(16));
        assert_eq!(scene.score(), 1);
    }

    #[test]
    fn test_recycled_pair_lands_behind_rightmost() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        let rightmost = scene.pool().rightmost_x();
        expire_slot(&mut scene, 0);
        scene.frame(frame_ms(16));

        let x = scene.pool().get(0).unwrap().x;
        let easy = scene.config().difficulty.easy.horizontal;
        assert!(easy.contains((x - rightmost) as u32));
    }

    #[test]
    fn test_tier_advances_at_fifty() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        for _ in 0..49 {
            expire_slot(&mut scene, 0);
            scene.frame(frame_ms(16));
        }
        assert_eq!(scene.tier(), DifficultyTier::Easy);

        expire_slot(&mut scene, 0);
        let events = scene.frame(frame_ms(16));
        assert_eq!(scene.score(), 50);
        assert_eq!(scene.tier(), DifficultyTier::Normal);
        assert!(events.contains(&SceneEvent::TierChanged {
            tier: DifficultyTier::Normal
        }));
    }

    #[test]
    fn test_several_expired_pairs_in_one_frame() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        expire_slot(&mut scene, 0);
        expire_slot(&mut scene, 3);
        let events = scene.frame(frame_ms(16));
        let passes = events
            .iter()
            .filter(|e| matches!(e, SceneEvent::PassThrough { .. }))
            .count();
        assert_eq!(passes, 2);
        assert_eq!(scene.score(), 2);
    }

    #[test]
    fn test_ground_ends_run_once_and_restarts() {
        let mut store = MemoryBestScoreStore::default();
        store.best = Some(0);
        let mut scene = create_scene(store);
        scene.engine_mut().bird = Some(BirdBody {
            x: 80.0,
            y: 560.0,
            width: 48.0,
            height: 40.0,
            velocity_y: 0.0,
        });

        let events = scene.frame(frame_ms(16));
        assert!(events.contains(&SceneEvent::GameOver {
            cause: GameOverCause::Ground,
            score: 0
        }));
        assert_eq!(scene.phase(), ScenePhase::GameOver);
        assert!(scene.engine().physics_paused());
        assert_eq!(scene.engine().tint, Some(FAILED_TINT));
        assert!(!scene.flap());

        // Still on the ground, but no second game over
        let events = scene.frame(frame_ms(500));
        assert!(!events
            .iter()
            .any(|e| matches!(e, SceneEvent::GameOver { .. })));
        assert_eq!(scene.runs(), 1);

        let events = scene.frame(frame_ms(500));
        assert!(events.contains(&SceneEvent::RunStarted { run: 2 }));
        assert_eq!(scene.runs(), 2);
        assert_eq!(scene.phase(), ScenePhase::Running);
        assert_eq!(scene.engine().tint, None);
        assert_eq!(scene.score(), 0);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        expire_slot(&mut scene, 1);
        scene.frame(frame_ms(16));
        assert_eq!(scene.score(), 1);

        scene.engine_mut().next_collision = Some(Collision { slot: 0 });
        let events = scene.frame(frame_ms(16));
        assert!(events.contains(&SceneEvent::GameOver {
            cause: GameOverCause::Collision,
            score: 1
        }));

        scene.on_collision(Collision { slot: 1 });
        assert!(scene.frame(frame_ms(16)).is_empty());
        assert_eq!(scene.store().best, Some(1));
    }

    #[test]
    fn test_pause_and_countdown() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        scene.frame(frame_ms(16));

        assert!(scene.request_pause());
        assert_eq!(scene.phase(), ScenePhase::Paused);
        assert!(scene.engine().physics_paused());
        assert_eq!(scene.engine().pause_menus, 1);
        assert!(!scene.flap());

        // Nothing moves while paused
        let before = scene.pool().pairs().to_vec();
        scene.frame(second() * 5);
        assert_eq!(scene.pool().pairs(), &before[..]);

        assert!(scene.resume());
        assert!(!scene.resume());
        assert_eq!(scene.engine().text(TextSlot::Countdown), "Fly in: 3");
        assert!(scene.is_paused());
        assert!(!scene.flap());

        scene.frame(second());
        assert_eq!(scene.engine().text(TextSlot::Countdown), "Fly in: 2");
        scene.frame(second());
        assert_eq!(scene.engine().text(TextSlot::Countdown), "Fly in: 1");
        assert!(scene.engine().physics_paused());
        assert!(!scene.flap());

        let events = scene.frame(second());
        assert!(events.contains(&SceneEvent::Resumed));
        assert_eq!(scene.engine().text(TextSlot::Countdown), "");
        assert!(!scene.is_paused());
        assert!(!scene.engine().physics_paused());
        assert!(scene.state().countdown.is_none());
        assert!(scene.flap());

        // Countdown timer is gone
        let events = scene.frame(second() * 2);
        assert!(!events
            .iter()
            .any(|e| matches!(e, SceneEvent::CountdownTick { .. })));
    }

    #[test]
    fn test_pause_during_countdown_restarts_it() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        scene.request_pause();
        scene.resume();
        scene.frame(second());
        assert_eq!(scene.engine().text(TextSlot::Countdown), "Fly in: 2");

        assert!(scene.request_pause());
        assert!(scene.state().countdown.is_none());
        assert_eq!(scene.engine().text(TextSlot::Countdown), "");

        scene.resume();
        assert_eq!(scene.engine().text(TextSlot::Countdown), "Fly in: 3");
        let events = scene.frame(second() * 3);
        let ticks = events
            .iter()
            .filter(|e| matches!(e, SceneEvent::CountdownTick { .. }))
            .count();
        assert_eq!(ticks, 3);
        assert!(events.contains(&SceneEvent::Resumed));
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut scene = create_scene(MemoryBestScoreStore::default());
        scene.on_collision(Collision { slot: 0 });
        assert!(!scene.request_pause());
        assert!(!scene.resume());
        assert_eq!(scene.phase(), ScenePhase::GameOver);
    }

    #[test]
    fn test_unavailable_store_does_not_stop_play() {
        let mut scene = create_scene(MemoryBestScoreStore::unavailable());
        assert_eq!(scene.engine().text(TextSlot::BestScore), "Best score: 0");
        expire_slot(&mut scene, 0);
        scene.frame(frame_ms(16));
        assert_eq!(scene.score(), 1);
        scene.on_collision(Collision { slot: 0 });
        assert_eq!(scene.phase(), ScenePhase::GameOver);
    }

    #[test]
    fn test_restart_keeps_store() {
        let config = SceneConfig {
            restart_delay_ms: 10,
            ..SceneConfig::default()
        };
        let mut scene = PlayScene::new(
            config.validated().unwrap(),
            ScriptedEngine::default(),
            MemoryBestScoreStore::default(),
            ChaCha8Rng::seed_from_u64(7),
        );
        for _ in 0..3 {
            expire_slot(&mut scene, 0);
            scene.frame(frame_ms(16));
        }
        scene.on_collision(Collision { slot: 0 });
        scene.frame(frame_ms(10));

        assert_eq!(scene.runs(), 2);
        assert_eq!(scene.engine().text(TextSlot::BestScore), "Best score: 3");
        assert_eq!(scene.store().best, Some(3));
    }
}
