//! Shared UI building blocks: layout, status bar, overlays.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field area - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the game layout with an outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Largest rect inside `area` that shows a `world_width` x `world_height`
/// world undistorted, centered. Terminal cells are about twice as tall as
/// they are wide.
pub fn fit_viewport(area: Rect, world_width: f64, world_height: f64) -> Rect {
    if area.width == 0 || area.height == 0 || world_width <= 0.0 || world_height <= 0.0 {
        return Rect::new(area.x, area.y, 0, 0);
    }

    let cols_per_row = world_width / world_height * 2.0;
    let mut rows = area.height;
    let mut cols = (rows as f64 * cols_per_row).round() as u16;
    if cols > area.width {
        cols = area.width;
        rows = ((cols as f64 / cols_per_row).round() as u16).clamp(1, area.height);
    }
    let cols = cols.max(1);

    Rect::new(
        area.x + (area.width - cols) / 2,
        area.y + (area.height - rows) / 2,
        cols,
        rows,
    )
}

/// Render the status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Space]", "Flap")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render a centered modal box over `area` with a bold title line followed by
/// `body`.
pub fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    color: Color,
    title: &str,
    body: Vec<Line<'static>>,
) {
    let content_height = body.len() as u16 + 2;
    let height = (content_height + 2).min(area.height);
    let width = (body
        .iter()
        .map(|l| l.width() as u16)
        .chain(std::iter::once(title.chars().count() as u16))
        .max()
        .unwrap_or(0)
        + 6)
    .min(area.width);

    let modal = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render an info panel frame with standard " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Quit confirmation status text.
pub const QUIT_STATUS_TEXT: &str = "Quit game?";

/// Quit confirmation status color.
pub const QUIT_STATUS_COLOR: Color = Color::Red;

/// Quit confirmation controls.
pub const QUIT_CONTROLS: &[(&str, &str)] = &[("[Esc]", "Confirm"), ("[Any]", "Cancel")];

/// Render the quit confirmation status bar. Returns `true` if rendered.
pub fn render_quit_status_bar(frame: &mut Frame, area: Rect, quit_pending: bool) -> bool {
    if !quit_pending {
        return false;
    }
    render_status_bar(
        frame,
        area,
        QUIT_STATUS_TEXT,
        QUIT_STATUS_COLOR,
        QUIT_CONTROLS,
    );
    true
}
