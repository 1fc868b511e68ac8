//! The game runner: one session plus the collaborators it talks to.

use super::machine::{process_jump, JumpOutcome};
use super::physics;
use super::types::{Session, TickResult};
use crate::audio::AudioSink;
use crate::core::config::{ConfigError, GameConfig};
use crate::core::constants::HIGH_SCORE_KEY;
use crate::core::game_loop::FrameStatus;
use crate::utils::persistence::KeyValueStore;
use rand::Rng;

/// Owns the session and routes its outputs to the score store and audio sink.
pub struct Game<S: KeyValueStore, A: AudioSink, R: Rng> {
    session: Session,
    store: S,
    audio: A,
    rng: R,
}

impl<S: KeyValueStore, A: AudioSink, R: Rng> Game<S, A, R> {
    /// Validate the config and seed the high score from the store.
    pub fn new(config: GameConfig, store: S, audio: A, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = store.get(HIGH_SCORE_KEY).unwrap_or(0);
        log::info!("starting with high score {}", high_score);
        Ok(Self {
            session: Session::new(config, high_score),
            store,
            audio,
            rng,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Handle one jump from any input modality.
    pub fn jump(&mut self) -> JumpOutcome {
        let result = process_jump(&mut self.session);
        match result.outcome {
            JumpOutcome::Started => log::info!("run started"),
            JumpOutcome::Reset => log::debug!("session reset"),
            JumpOutcome::Flapped => {}
        }
        self.audio.play_all(&result.events);
        result.outcome
    }

    /// Return to a fresh idle session.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Run one scheduled frame's simulation step.
    pub fn frame(&mut self, now_ms: u64) -> (FrameStatus, TickResult) {
        if !self.session.is_running() {
            return (FrameStatus::Stopped, TickResult::default());
        }

        let result = physics::tick(&mut self.session, now_ms, &mut self.rng);
        self.audio.play_all(&result.events);

        if let Some(high_score) = result.new_high_score {
            self.persist_high_score(high_score);
        }

        if result.ended {
            log::info!(
                "run over: score {} (best {})",
                self.session.score,
                self.session.high_score
            );
            (FrameStatus::Stopped, result)
        } else {
            (FrameStatus::Continue, result)
        }
    }

    /// Failure to persist is logged and otherwise ignored.
    fn persist_high_score(&mut self, high_score: u32) {
        match self.store.set(HIGH_SCORE_KEY, high_score) {
            Ok(()) => log::info!("new high score {}", high_score),
            Err(e) => log::warn!("could not save high score {}: {}", high_score, e),
        }
    }
}
