//! Rendering of the game screen.

use crate::game::types::{Entity, RunState, Session};
use crate::input::UiState;
use crate::ui::game_common::{
    create_game_layout, fit_viewport, render_info_panel_frame, render_overlay,
    render_quit_status_bar, render_status_bar,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CONTROLS: &[(&str, &str)] = &[("[Space/Up/Click]", "Flap"), ("[Esc]", "Quit")];

/// What occupies one terminal cell of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Sky,
    Barrier,
    /// Barrier cap right next to the gap.
    GapEdge,
    Body,
    Nose,
}

/// Maps terminal cells of the play field onto world coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub cols: u16,
    pub rows: u16,
    pub world_width: f64,
    pub world_height: f64,
}

impl Projection {
    pub fn new(area: Rect, world_width: f64, world_height: f64) -> Self {
        Self {
            cols: area.width,
            rows: area.height,
            world_width,
            world_height,
        }
    }

    fn cell_width(&self) -> f64 {
        self.world_width / self.cols.max(1) as f64
    }

    fn cell_height(&self) -> f64 {
        self.world_height / self.rows.max(1) as f64
    }

    /// World coordinates of a cell's center.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.cell_width(),
            (row as f64 + 0.5) * self.cell_height(),
        )
    }

    /// Cell containing a world point, clamped to the field.
    pub fn cell_at(&self, x: f64, y: f64) -> (u16, u16) {
        let col = (x / self.cell_width()).floor().clamp(0.0, (self.cols.max(1) - 1) as f64);
        let row = (y / self.cell_height()).floor().clamp(0.0, (self.rows.max(1) - 1) as f64);
        (col as u16, row as u16)
    }
}

/// Cells covered by the entity: every cell whose center lies in its box, or
/// the cell under its center when the field is too coarse for that.
fn entity_cells(entity: &Entity, projection: &Projection) -> Vec<(u16, u16)> {
    let mut cells = Vec::new();
    for row in 0..projection.rows {
        for col in 0..projection.cols {
            let (x, y) = projection.cell_center(col, row);
            if x >= entity.left() && x < entity.right() && y >= entity.top() && y < entity.bottom()
            {
                cells.push((col, row));
            }
        }
    }
    if cells.is_empty() {
        cells.push(projection.cell_at(
            entity.x + entity.width / 2.0,
            entity.y + entity.height / 2.0,
        ));
    }
    cells
}

/// Classify every cell of the play field.
pub fn classify_cells(session: &Session, projection: &Projection) -> Vec<Vec<CellKind>> {
    let mut grid = vec![vec![CellKind::Sky; projection.cols as usize]; projection.rows as usize];
    let cell_height = projection.world_height / projection.rows.max(1) as f64;

    for (row, line) in grid.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let (x, y) = projection.cell_center(col as u16, row as u16);
            for obstacle in &session.obstacles {
                if x < obstacle.x || x >= obstacle.trailing_edge() {
                    continue;
                }
                let (top, bottom) = (obstacle.gap_top(), obstacle.gap_bottom());
                if y < top || y >= bottom {
                    let near_gap = (y < top && top - y < cell_height)
                        || (y >= bottom && y - bottom < cell_height);
                    *cell = if near_gap {
                        CellKind::GapEdge
                    } else {
                        CellKind::Barrier
                    };
                }
                break;
            }
        }
    }

    let cells = entity_cells(&session.entity, projection);
    let nose_col = cells.iter().map(|&(c, _)| c).max().unwrap_or(0);
    for (col, row) in cells {
        grid[row as usize][col as usize] = if col == nose_col {
            CellKind::Nose
        } else {
            CellKind::Body
        };
    }
    grid
}

/// Glyph for the plane's nose given its visual tilt.
pub fn nose_glyph(entity: &Entity) -> &'static str {
    let tilt = entity.tilt_degrees();
    if tilt <= -10.0 {
        "▲" // Climbing
    } else if tilt >= 10.0 {
        "▼" // Diving
    } else {
        "►"
    }
}

/// Render the game screen.
pub fn render_game(frame: &mut Frame, area: Rect, session: &Session, ui: &UiState) {
    let layout = create_game_layout(frame, area, " Aeroflap ", Color::Cyan, 10, 22);

    let field = fit_viewport(
        layout.content,
        session.config.viewport_width,
        session.config.viewport_height,
    );
    render_play_area(frame, field, session);

    match session.run_state {
        RunState::Idle => render_idle_overlay(frame, field, session),
        RunState::Running => render_score(frame, field, session),
        RunState::Over => render_over_overlay(frame, field, session),
    }

    render_status_bar_content(frame, layout.status_bar, session, ui);
    render_info_panel(frame, layout.info_panel, session);
}

/// Render the play field with barriers and the plane.
fn render_play_area(frame: &mut Frame, area: Rect, session: &Session) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let projection = Projection::new(
        area,
        session.config.viewport_width,
        session.config.viewport_height,
    );
    let grid = classify_cells(session, &projection);
    let nose = nose_glyph(&session.entity);

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        CellKind::Sky => Span::styled(" ", Style::default().bg(Color::Blue)),
                        CellKind::Barrier => {
                            Span::styled("█", Style::default().fg(Color::Green))
                        }
                        CellKind::GapEdge => {
                            Span::styled("▓", Style::default().fg(Color::LightGreen))
                        }
                        CellKind::Body => Span::styled(
                            "=",
                            Style::default().fg(Color::White).bg(Color::Blue),
                        ),
                        CellKind::Nose => Span::styled(
                            nose,
                            Style::default()
                                .fg(Color::Yellow)
                                .bg(Color::Blue)
                                .add_modifier(Modifier::BOLD),
                        ),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Current score, centered near the top of the field.
fn render_score(frame: &mut Frame, area: Rect, session: &Session) {
    if area.height < 2 {
        return;
    }
    let score = Paragraph::new(Span::styled(
        session.score.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(score, Rect::new(area.x, area.y + 1, area.width, 1));
}

fn render_idle_overlay(frame: &mut Frame, area: Rect, session: &Session) {
    render_overlay(
        frame,
        area,
        Color::Yellow,
        "AEROFLAP",
        vec![
            Line::from("Press Space to fly"),
            Line::from(""),
            Line::from(format!("High Score: {}", session.high_score)),
        ],
    );
}

fn render_over_overlay(frame: &mut Frame, area: Rect, session: &Session) {
    let beat = session.score > 0 && session.score == session.high_score;
    let mut body = vec![
        Line::from(format!("Score: {}", session.score)),
        Line::from(format!("High Score: {}", session.high_score)),
    ];
    if beat {
        body.push(Line::from(Span::styled(
            "New best!",
            Style::default().fg(Color::Cyan),
        )));
    }
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        "[Space] Continue",
        Style::default().fg(Color::DarkGray),
    )));
    render_overlay(frame, area, Color::Red, "GAME OVER", body);
}

/// Render the status bar at the bottom.
fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &Session, ui: &UiState) {
    if render_quit_status_bar(frame, area, ui.quit_pending) {
        return;
    }

    match session.run_state {
        RunState::Idle => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            CONTROLS,
        ),
        RunState::Running => render_status_bar(
            frame,
            area,
            &format!("Score: {}", session.score),
            Color::Green,
            CONTROLS,
        ),
        RunState::Over => render_status_bar(
            frame,
            area,
            "Crashed! Press Space to continue",
            Color::Red,
            CONTROLS,
        ),
    }
}

/// Render the info panel on the right.
fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (state_text, state_color) = match session.run_state {
        RunState::Idle => ("Ready", Color::Yellow),
        RunState::Running => ("Flying", Color::Green),
        RunState::Over => ("Crashed", Color::Red),
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));

    let lines = vec![
        Line::from(vec![
            label(" State: "),
            Span::styled(state_text, Style::default().fg(state_color)),
        ]),
        Line::from(""),
        Line::from(vec![
            label(" Score: "),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label(" Best: "),
            Span::styled(
                session.high_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label(" Speed: "),
            Span::styled(
                format!("{:+.1}", session.entity.velocity),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            label(" Pipes: "),
            Span::styled(
                session.obstacles.len().to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
