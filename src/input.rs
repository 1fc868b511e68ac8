//! Input handling: maps terminal events onto game commands.
//!
//! Space, Up and a left mouse press are interchangeable; all of them become a
//! single jump. Esc asks for confirmation before quitting: Esc once to ask,
//! Esc again to confirm, anything else cancels.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// Input actions understood by the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space, Up or mouse press.
    Jump,
    /// Esc.
    Quit,
    /// `q` or Ctrl+C.
    QuitNow,
    /// Any other key.
    Other,
    /// Events the game does not care about (resize, mouse motion, key release).
    Ignored,
}

/// Classify a raw terminal event.
pub fn map_event(event: &Event) -> GameInput {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => GameInput::Jump,
            _ => GameInput::Ignored,
        },
        _ => GameInput::Ignored,
    }
}

/// Classify a key event. Releases and repeats are ignored so a held key
/// flaps once.
pub fn map_key(key: &KeyEvent) -> GameInput {
    if key.kind != KeyEventKind::Press {
        return GameInput::Ignored;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => GameInput::Jump,
        KeyCode::Esc => GameInput::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => GameInput::QuitNow,
        KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::QuitNow,
        _ => GameInput::Other,
    }
}

/// What the driver must do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing further.
    Continue,
    /// Forward a jump to the game.
    Jump,
    /// Leave the program.
    Exit,
}

/// UI-side state that is not part of the game session.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Esc was pressed once; a second Esc exits.
    pub quit_pending: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve an input against the quit confirmation.
    pub fn handle(&mut self, input: GameInput) -> InputResult {
        match input {
            GameInput::Ignored => InputResult::Continue,
            GameInput::QuitNow => InputResult::Exit,
            GameInput::Quit => {
                if self.quit_pending {
                    InputResult::Exit
                } else {
                    self.quit_pending = true;
                    InputResult::Continue
                }
            }
            GameInput::Jump | GameInput::Other if self.quit_pending => {
                // Any non-Esc key cancels the pending quit
                self.quit_pending = false;
                InputResult::Continue
            }
            GameInput::Jump => InputResult::Jump,
            GameInput::Other => InputResult::Continue,
        }
    }
}
