// World geometry, in canvas pixels
pub const VIEWPORT_WIDTH: f64 = 320.0;
pub const VIEWPORT_HEIGHT: f64 = 480.0;

// Entity
pub const ENTITY_X: f64 = 50.0;
pub const ENTITY_WIDTH: f64 = 34.0;
pub const ENTITY_HEIGHT: f64 = 24.0;

// Physics, per tick
pub const GRAVITY: f64 = 0.25;
pub const JUMP_FORCE: f64 = -5.0;

// Obstacles
pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_GAP: f64 = 120.0;
pub const PIPE_SPEED: f64 = 2.0;
pub const PIPE_FREQUENCY_MS: u64 = 1500;
/// Minimum barrier material kept on each side of the random gap offset.
pub const PIPE_MARGIN: f64 = 50.0;

// Presentation
pub const TILT_PER_VELOCITY: f64 = 5.0;
pub const MAX_TILT_DEGREES: f64 = 30.0;

// Real-time frame rate
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS
pub const INPUT_POLL_MS: u64 = 50;

// Persistence
pub const HIGH_SCORE_KEY: &str = "highScore";
pub const SCORES_FILE: &str = "scores.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "aeroflap.log";
