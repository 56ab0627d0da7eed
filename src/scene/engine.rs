//! Interface to the rendering/physics/input collaborator.

use super::types::TextSlot;
use crate::pipes::{Bounds, ObstaclePool};
use std::time::Duration;

/// Bird body as reported by physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdBody {
    /// Left edge.
    pub x: f32,
    /// Top edge (y grows downward).
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical speed in px/s, positive = falling.
    pub velocity_y: f32,
}

impl BirdBody {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Overlap between the bird and a pipe pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub slot: usize,
}

/// Services the scene calls into. Physics integration, drawing and input
/// wiring live behind this trait.
pub trait Engine {
    fn bird(&self) -> BirdBody;

    /// Set the bird's vertical speed immediately, without easing.
    fn set_bird_velocity_y(&mut self, velocity_y: f32);

    fn pause_physics(&mut self);

    fn resume_physics(&mut self);

    fn physics_paused(&self) -> bool;

    /// Integrate one frame: bird gravity and pipe scrolling.
    ///
    /// Does nothing while physics is paused. Returns the first bird/pipe
    /// overlap found after moving.
    fn step_physics(&mut self, dt: Duration, pool: &mut ObstaclePool) -> Option<Collision>;

    /// Tint the bird with an RGB color, or clear the tint.
    fn set_bird_tint(&mut self, tint: Option<u32>);

    fn set_text(&mut self, slot: TextSlot, text: String);

    /// Hand control to the pause menu.
    fn open_pause_menu(&mut self);

    /// Put the bird back at its start position with physics running and
    /// overlays cleared, ready for a new run.
    fn reset(&mut self);
}
