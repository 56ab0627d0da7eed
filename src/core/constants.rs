// Frame timing
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 FPS

// Playfield
pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;
pub const EDGE_MARGIN: u32 = 20;

// Bird
pub const BIRD_START_X: f32 = 80.0;
pub const BIRD_START_Y: f32 = 300.0;
pub const BIRD_WIDTH: f32 = 48.0;
pub const BIRD_HEIGHT: f32 = 40.0;
pub const GRAVITY: f32 = 600.0;
pub const FLAP_VELOCITY: f32 = 300.0;
/// Tint applied to the bird when the run ends (RGB).
pub const FAILED_TINT: u32 = 0xfc030f;

// Pipes
pub const PIPE_COUNT: usize = 4;
pub const PIPE_WIDTH: f32 = 26.0;
pub const PIPE_VELOCITY_X: f32 = -200.0;

// Difficulty thresholds (score at which the tier kicks in)
pub const NORMAL_SCORE_THRESHOLD: u32 = 50;
pub const HARD_SCORE_THRESHOLD: u32 = 100;

// Timers
pub const RESTART_DELAY_MS: u64 = 1000;
pub const COUNTDOWN_START: u32 = 3;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

// Persistence
pub const BEST_SCORE_FILE: &str = "best_score.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
