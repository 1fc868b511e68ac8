//! Aeroflap - terminal arcade game library
//!
//! This module exposes the game core for testing and for the binary.

pub mod audio;
pub mod core;
pub mod game;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::core::config::{ConfigError, GameConfig};
pub use crate::core::constants::*;
pub use crate::game::{Game, JumpOutcome, RunState, Session, SoundEvent, TickResult};
