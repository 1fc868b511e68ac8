pub mod game_common;
pub mod game_scene;

use crate::game::types::Session;
use crate::input::UiState;
use ratatui::Frame;

/// Main UI drawing function. Consumes a session snapshot; produces nothing
/// back to the game.
pub fn draw_ui(frame: &mut Frame, session: &Session, ui: &UiState) {
    let size = frame.size();
    game_scene::render_game(frame, size, session, ui);
}
