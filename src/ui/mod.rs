//! Terminal rendering for the play scene.

pub mod play_scene;

pub use play_scene::render_play_scene;
