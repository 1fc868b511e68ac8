//! The falling-entity arcade game.
//!
//! The player keeps an aeroplane aloft through scrolling barrier pairs by
//! timing upward impulses. Gravity pulls it down every tick; touching a
//! barrier, the floor or the ceiling ends the run.

pub mod machine;
pub mod physics;
pub mod runner;
pub mod spawn;
pub mod types;

pub use machine::{process_jump, JumpOutcome, JumpResult};
pub use physics::tick;
pub use runner::Game;
pub use types::*;
