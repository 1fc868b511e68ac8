//! Obstacle generator.

use super::types::{Obstacle, Session};
use crate::core::config::GameConfig;
use rand::Rng;

/// Draw a gap offset so the upper barrier keeps at least `pipe_margin` of
/// material, i.e. `-(floor(rand[0, span)) + margin)`.
pub fn random_offset<R: Rng>(config: &GameConfig, rng: &mut R) -> f64 {
    let span = config.offset_span();
    let drawn = rng.gen_range(0.0..span).floor();
    -(drawn + config.pipe_margin)
}

/// Append a new obstacle at the right edge when the spawn interval elapsed,
/// or when nothing has spawned yet this run. Returns true when one was spawned.
pub fn maybe_spawn<R: Rng>(session: &mut Session, now_ms: u64, rng: &mut R) -> bool {
    let due = match session.last_spawn_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > session.config.pipe_frequency_ms,
    };
    if !due {
        return false;
    }

    let config = session.config;
    session.obstacles.push(Obstacle {
        x: config.viewport_width,
        y: random_offset(&config, rng),
        width: config.pipe_width,
        height: config.viewport_height,
        gap: config.pipe_gap,
        passed: false,
    });
    session.last_spawn_ms = Some(now_ms);
    true
}
