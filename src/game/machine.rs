//! Run-state transitions driven by the jump input.

use super::types::{RunState, Session, SoundEvent};

/// What a jump did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Idle -> Running. The frame loop must be started.
    Started,
    /// Impulse applied to a running session.
    Flapped,
    /// Over -> Idle. The idle screen must be drawn; no loop.
    Reset,
}

/// Result of handling one jump input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpResult {
    pub outcome: JumpOutcome,
    pub events: Vec<SoundEvent>,
}

/// Apply the upward impulse. Always sets, never adds.
pub fn apply_impulse(session: &mut Session) {
    session.entity.velocity = session.config.jump_force;
}

/// Handle a jump from any input modality.
///
/// Starting a run also flaps, so the first input lifts the entity immediately.
/// Leaving Over only resets; a second jump is needed to start again.
pub fn process_jump(session: &mut Session) -> JumpResult {
    match session.run_state {
        RunState::Idle => {
            session.run_state = RunState::Running;
            apply_impulse(session);
            JumpResult {
                outcome: JumpOutcome::Started,
                events: vec![SoundEvent::Swoosh, SoundEvent::Flap],
            }
        }
        RunState::Running => {
            apply_impulse(session);
            JumpResult {
                outcome: JumpOutcome::Flapped,
                events: vec![SoundEvent::Flap],
            }
        }
        RunState::Over => {
            session.reset();
            JumpResult {
                outcome: JumpOutcome::Reset,
                events: Vec::new(),
            }
        }
    }
}
