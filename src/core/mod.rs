//! Constants, configuration and loop timing.

pub mod config;
pub mod constants;
pub mod game_loop;

pub use config::{ConfigError, GameConfig};
pub use constants::*;
pub use game_loop::{Clock, FrameScheduler, FrameStatus, MonotonicClock};
