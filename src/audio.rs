//! Sound output.
//!
//! A terminal has no mixer, so the default sink rings the terminal bell for
//! the events worth hearing. Sinks never report failure back to the game.

use crate::game::SoundEvent;
use std::io::Write;

/// Receives discrete sound notifications, fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, event: SoundEvent);

    fn play_all(&mut self, events: &[SoundEvent]) {
        for &event in events {
            self.play(event);
        }
    }
}

/// Drops every event (`--mute`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _event: SoundEvent) {}
}

/// Rings the terminal bell on hits and points.
pub struct TerminalBell<W: Write> {
    out: W,
    pub rings: u32,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, rings: 0 }
    }

    /// Whether an event is audible through the bell. Flaps are far too
    /// frequent for a bell and the swoosh is always paired with one.
    pub fn rings_for(event: SoundEvent) -> bool {
        matches!(event, SoundEvent::Hit | SoundEvent::Point)
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, event: SoundEvent) {
        if !Self::rings_for(event) {
            return;
        }
        if self.out.write_all(b"\x07").and_then(|_| self.out.flush()).is_ok() {
            self.rings += 1;
        } else {
            log::debug!("terminal bell unavailable for {:?}", event);
        }
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, event: SoundEvent) {
        (**self).play(event);
    }
}

/// Records every event in order.
impl AudioSink for Vec<SoundEvent> {
    fn play(&mut self, event: SoundEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_for_hit_and_point_only() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play_all(&[
            SoundEvent::Swoosh,
            SoundEvent::Flap,
            SoundEvent::Point,
            SoundEvent::Flap,
            SoundEvent::Hit,
        ]);
        assert_eq!(bell.rings, 2);
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorded: Vec<SoundEvent> = Vec::new();
        recorded.play_all(&[SoundEvent::Swoosh, SoundEvent::Flap]);
        recorded.play(SoundEvent::Hit);
        assert_eq!(
            recorded,
            vec![SoundEvent::Swoosh, SoundEvent::Flap, SoundEvent::Hit]
        );
    }

    #[test]
    fn test_silent_accepts_everything() {
        let mut sink = Silent;
        sink.play_all(&[SoundEvent::Hit, SoundEvent::Point]);
    }
}
