//! Session data: the falling entity, the obstacle sequence and scores.

use crate::core::config::GameConfig;
use crate::core::constants::{MAX_TILT_DEGREES, TILT_PER_VELOCITY};

/// High-level session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Waiting for the first jump. Physics paused.
    #[default]
    Idle,
    /// Tick loop active.
    Running,
    /// Simulation frozen until the next jump resets it.
    Over,
}

/// Discrete sound notifications, fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Upward impulse applied.
    Flap,
    /// Collision with an obstacle or the viewport bounds.
    Hit,
    /// An obstacle was passed.
    Point,
    /// Run started.
    Swoosh,
}

/// The player-controlled falling object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Left edge. Constant after spawn.
    pub x: f64,
    /// Top edge. Row 0 is the ceiling, positive is downward.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity per tick (positive = downward).
    pub velocity: f64,
}

impl Entity {
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Visual tilt in degrees, clamped to ±30. Presentation only; collision
    /// always uses the un-rotated box.
    pub fn tilt_degrees(&self) -> f64 {
        (self.velocity * TILT_PER_VELOCITY).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
    }
}

/// A top/bottom barrier pair with a gap between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge (decreases every tick).
    pub x: f64,
    /// Top of the upper barrier. Always negative, so the barrier hangs from
    /// above the viewport down to `gap_top()`.
    pub y: f64,
    pub width: f64,
    /// Height of each barrier (the viewport height).
    pub height: f64,
    /// Vertical size of the opening.
    pub gap: f64,
    /// Set once the entity has moved past; awards exactly one point.
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge.
    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    pub fn gap_top(&self) -> f64 {
        self.y + self.height
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_top() + self.gap
    }
}

/// Everything that happened during one tick, for the runner and the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Sounds to hand to the audio sink, in emission order.
    pub events: Vec<SoundEvent>,
    /// An obstacle was appended this tick.
    pub spawned: bool,
    /// The run ended this tick.
    pub ended: bool,
    /// New best score, when the run beat the previous one.
    pub new_high_score: Option<u32>,
}

/// The single owned game session.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub entity: Entity,
    /// Spawn order == left-to-right screen order.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub high_score: u32,
    pub run_state: RunState,
    /// Clock time of the last obstacle spawn, in milliseconds. `None` until
    /// the run's first tick, which always spawns.
    pub last_spawn_ms: Option<u64>,
}

impl Session {
    /// Build an idle session. `config` must already be validated.
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        let mut session = Self {
            config,
            entity: Entity {
                x: config.entity_x,
                y: 0.0,
                width: config.entity_width,
                height: config.entity_height,
                velocity: 0.0,
            },
            obstacles: Vec::new(),
            score: 0,
            high_score,
            run_state: RunState::Idle,
            last_spawn_ms: None,
        };
        session.reset();
        session
    }

    /// Return to a fresh idle session. The high score survives.
    pub fn reset(&mut self) {
        self.entity.y = self.config.viewport_height / 2.0;
        self.entity.velocity = 0.0;
        self.obstacles.clear();
        self.score = 0;
        self.run_state = RunState::Idle;
        self.last_spawn_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Raise the high score to the current score if it was beaten.
    /// Returns the new value when it changed.
    pub fn record_high_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }
}
