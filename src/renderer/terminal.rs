//! Terminal renderer
//!
//! Paints a [`Scene`] onto a grid of braille cells (2x4 dots per cell) and
//! draws it with ratatui inside a bordered frame with status and help bars.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::scene::{DrawCommand, Scene, TextAnchor, build_scene};
use super::shapes::{circle_outline, filled_circle, filled_rect, line_cells};
use super::{Rgba, colors};
use crate::sim::{GameState, Mode};

/// Color of cells outside the playfield
const MARGIN_BG: Color = Color::Rgb(24, 24, 32);

/// Convert an RGBA color to a terminal color (alpha is ignored)
pub fn to_color(c: Rgba) -> Color {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(channel(c[0]), channel(c[1]), channel(c[2]))
}

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    bits: u8,
    glyph: Option<char>,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Cell {
    fn symbol(&self) -> char {
        match self.glyph {
            Some(ch) => ch,
            None if self.bits != 0 => char::from_u32(0x2800 + self.bits as u32).unwrap_or(' '),
            None => ' ',
        }
    }

    fn style(&self) -> Style {
        let style = Style::default().fg(self.fg).bg(self.bg);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

/// Character grid that scene commands are rasterized onto
///
/// The playfield is scaled uniformly to fit and centered; everything drawn
/// is clipped to the playfield rectangle.
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    scale: f32,
    offset: (f32, f32),
    /// Playfield bounds in dots, half-open
    field: (i32, i32, i32, i32),
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16, scene: &Scene) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        let (dot_w, dot_h) = ((cols * 2) as f32, (rows * 4) as f32);
        let scale = if scene.width > 0.0 && scene.height > 0.0 {
            (dot_w / scene.width).min(dot_h / scene.height)
        } else {
            0.0
        };
        let offset = (
            ((dot_w - scene.width * scale) / 2.0).floor(),
            ((dot_h - scene.height * scale) / 2.0).floor(),
        );
        let field = (
            offset.0 as i32,
            offset.1 as i32,
            (offset.0 + scene.width * scale).round() as i32,
            (offset.1 + scene.height * scale).round() as i32,
        );

        let bg = to_color(scene.clear);
        let mut cells = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                // A cell is inside the field if its center dot is
                let (cx, cy) = ((col * 2) as i32 + 1, (row * 4) as i32 + 2);
                let inside = cx >= field.0 && cx < field.2 && cy >= field.1 && cy < field.3;
                cells.push(Cell {
                    bits: 0,
                    glyph: None,
                    fg: Color::Reset,
                    bg: if inside { bg } else { MARGIN_BG },
                    bold: false,
                });
            }
        }

        Self {
            cols,
            rows,
            cells,
            scale,
            offset,
            field,
        }
    }

    /// Playfield point to dot coordinates
    fn to_dot(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset.0, y * self.scale + self.offset.1)
    }

    fn set_dot(&mut self, x: i32, y: i32, color: Color) {
        let (left, top, right, bottom) = self.field;
        if x < left || y < top || x >= right || y >= bottom {
            return;
        }
        let (col, row) = (x as usize / 2, y as usize / 4);
        if col >= self.cols || row >= self.rows {
            return;
        }
        let cell = &mut self.cells[row * self.cols + col];
        if cell.glyph.is_some() {
            return;
        }
        cell.bits |= braille_bit(x as usize % 2, y as usize % 4);
        cell.fg = color;
    }

    fn plot(&mut self, dots: impl IntoIterator<Item = (i32, i32)>, color: Color) {
        for (x, y) in dots {
            self.set_dot(x, y, color);
        }
    }

    fn put_text(&mut self, x: f32, y: f32, text: &str, anchor: TextAnchor, color: Color, bold: bool) {
        let (dx, dy) = self.to_dot(x, y);
        let len = text.chars().count() as i32;
        let mut col = (dx / 2.0).floor() as i32;
        let row = (dy / 4.0).floor() as i32;
        if anchor == TextAnchor::Center {
            col -= len / 2;
        }
        if row < 0 || row as usize >= self.rows {
            return;
        }

        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c < 0 || c as usize >= self.cols {
                continue;
            }
            let cell = &mut self.cells[row as usize * self.cols + c as usize];
            cell.glyph = Some(ch);
            cell.bits = 0;
            cell.fg = color;
            cell.bold = bold;
        }
    }

    /// Rasterize every command in paint order
    pub fn paint(&mut self, scene: &Scene) {
        for command in &scene.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    let (cx, cy) = self.to_dot(center.x, center.y);
                    let r = radius * self.scale;
                    let color = to_color(*color);
                    self.plot(filled_circle(cx, cy, r), color);
                    if r > 3.0 {
                        self.plot(circle_outline(cx, cy, r, 32), color);
                    }
                }
                DrawCommand::FilledSquare { square, color } => {
                    let (x0, y0) = self.to_dot(square.left(), square.top());
                    let (x1, y1) = self.to_dot(square.right(), square.bottom());
                    let (x0, y0) = (x0.round() as i32, y0.round() as i32);
                    let x1 = (x1.round() as i32 - 1).max(x0);
                    let y1 = (y1.round() as i32 - 1).max(y0);
                    self.plot(filled_rect(x0, y0, x1, y1), to_color(*color));
                }
                DrawCommand::Line { from, to, color } => {
                    let (x0, y0) = self.to_dot(from.x, from.y);
                    let (x1, y1) = self.to_dot(to.x, to.y);
                    let dots = line_cells(
                        x0.round() as i32,
                        y0.round() as i32,
                        x1.round() as i32,
                        y1.round() as i32,
                    );
                    self.plot(dots, to_color(*color));
                }
                DrawCommand::Text {
                    pos,
                    text,
                    color,
                    anchor,
                    bold,
                } => self.put_text(pos.x, pos.y, text, *anchor, to_color(*color), *bold),
            }
        }
    }

    /// One styled line per row
    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| Span::styled(cell.symbol().to_string(), cell.style()))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Rasterize a scene to `cols` x `rows` lines
pub fn render_field(scene: &Scene, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let mut canvas = BrailleCanvas::new(cols, rows, scene);
    canvas.paint(scene);
    canvas.into_lines()
}

/// Draw one frame for the current game state
pub fn draw(frame: &mut Frame, state: &GameState) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(to_color(colors::PLAYER)))
        .title(" Circle vs Squares ")
        .title_style(
            Style::default()
                .fg(to_color(colors::ENEMY))
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(state)), chunks[0]);
    draw_field(frame, state, chunks[1]);
    frame.render_widget(Paragraph::new(help_line(state)), chunks[2]);
}

fn draw_field(frame: &mut Frame, state: &GameState, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let scene = build_scene(state);
    let lines = render_field(&scene, area.width, area.height);
    frame.render_widget(Paragraph::new(lines), area);
}

fn separator() -> Span<'static> {
    Span::styled(" | ", Style::default().fg(Color::DarkGray))
}

fn status_line(state: &GameState) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" Score: {} ", state.session.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(
            format!("Best: {}", state.best_score),
            Style::default().fg(Color::Cyan),
        ),
        separator(),
        Span::styled(
            format!("Difficulty: {}", state.difficulty.as_str()),
            Style::default().fg(Color::Green),
        ),
        separator(),
        Span::styled(
            format!("Cooldown: {}ms", state.player.shoot_cooldown_ms),
            Style::default().fg(Color::Gray),
        ),
        separator(),
        Span::styled(
            format!("Spawn: {}ms", state.session.spawn_interval_ms),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn help_line(state: &GameState) -> Line<'static> {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let spans = match state.mode {
        Mode::Welcome => vec![
            Span::styled(" Enter ", key),
            Span::styled("Start ", dim),
            Span::styled("| Q ", key),
            Span::styled("Quit", dim),
        ],
        Mode::DifficultySelect { .. } => vec![
            Span::styled(" \u{2191}\u{2193} ", key),
            Span::styled("Choose ", dim),
            Span::styled("| Enter ", key),
            Span::styled("Confirm ", dim),
            Span::styled("| Q ", key),
            Span::styled("Quit", dim),
        ],
        Mode::Playing => vec![
            Span::styled(" WASD ", key),
            Span::styled("Move ", dim),
            Span::styled("| J/K ", key),
            Span::styled("Rotate ", dim),
            Span::styled("| Space ", key),
            Span::styled("Shoot ", dim),
            Span::styled("| Q ", key),
            Span::styled("Quit", dim),
        ],
        Mode::GameOver { .. } => vec![
            Span::styled(
                " YOU LOST ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("| Enter ", key),
            Span::styled("Play again ", dim),
            Span::styled("| Q ", key),
            Span::styled("Quit", dim),
        ],
    };
    Line::from(spans)
}
