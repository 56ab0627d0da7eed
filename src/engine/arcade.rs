//! `ArcadeEngine`: gravity, pipe scrolling and box overlap, nothing more.
//!
//! Positions are in playfield pixels with y growing downward. The bird is
//! kept inside the playfield the way a world-bounds collider would.

use crate::core::config::SceneConfig;
use crate::pipes::ObstaclePool;
use crate::scene::{BirdBody, Collision, Engine, TextSlot};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ArcadeEngine {
    bird: BirdBody,
    start_x: f32,
    start_y: f32,
    gravity: f32,
    pipe_velocity_x: f32,
    width: f32,
    height: f32,
    physics_paused: bool,
    tint: Option<u32>,
    texts: HashMap<TextSlot, String>,
    pause_menu_open: bool,
}

impl ArcadeEngine {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            bird: BirdBody {
                x: config.bird_start_x,
                y: config.bird_start_y,
                width: config.bird_width,
                height: config.bird_height,
                velocity_y: 0.0,
            },
            start_x: config.bird_start_x,
            start_y: config.bird_start_y,
            gravity: config.gravity,
            pipe_velocity_x: config.pipe_velocity_x,
            width: config.width,
            height: config.height,
            physics_paused: false,
            tint: None,
            texts: HashMap::new(),
            pause_menu_open: false,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tint(&self) -> Option<u32> {
        self.tint
    }

    /// Current overlay text, empty if never set.
    pub fn text(&self, slot: TextSlot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn pause_menu_open(&self) -> bool {
        self.pause_menu_open
    }

    /// Called by the pause menu before it sends the resume signal.
    pub fn close_pause_menu(&mut self) {
        self.pause_menu_open = false;
    }

    fn floor(&self) -> f32 {
        self.height - self.bird.height
    }
}

impl Engine for ArcadeEngine {
    fn bird(&self) -> BirdBody {
        self.bird
    }

    fn set_bird_velocity_y(&mut self, velocity_y: f32) {
        self.bird.velocity_y = velocity_y;
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

    fn step_physics(&mut self, dt: Duration, pool: &mut ObstaclePool) -> Option<Collision> {
        if self.physics_paused {
            return None;
        }
        let secs = dt.as_secs_f32();

        self.bird.velocity_y += self.gravity * secs;
        self.bird.y += self.bird.velocity_y * secs;
        if self.bird.y < 0.0 {
            self.bird.y = 0.0;
            self.bird.velocity_y = 0.0;
        }
        let floor = self.floor();
        if self.bird.y > floor {
            self.bird.y = floor;
            self.bird.velocity_y = 0.0;
        }

        pool.scroll(self.pipe_velocity_x * secs);

        let bird = self.bird.bounds();
        let pipe_width = pool.pipe_width();
        pool.pairs()
            .iter()
            .position(|pair| {
                bird.overlaps(&pair.upper_bounds(pipe_width))
                    || bird.overlaps(&pair.lower_bounds(pipe_width, self.height))
            })
            .map(|slot| Collision { slot })
    }

    fn set_bird_tint(&mut self, tint: Option<u32>) {
        self.tint = tint;
    }

    fn set_text(&mut self, slot: TextSlot, text: String) {
        self.texts.insert(slot, text);
    }

    fn open_pause_menu(&mut self) {
        self.pause_menu_open = true;
    }

    fn reset(&mut self) {
        self.bird.x = self.start_x;
        self.bird.y = self.start_y;
        self.bird.velocity_y = 0.0;
        self.physics_paused = false;
        self.tint = None;
        self.texts.clear();
        self.pause_menu_open = false;
    }
}
