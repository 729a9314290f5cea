use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::assets::{Atlas, RegionId};
use crate::geometry::WorldRect;
use crate::session::{GameState, Session};

/// How a region should be drawn on top of its own colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Normal,
    /// Entity just took damage.
    Flash,
    /// Button held down.
    Pressed,
}

/// Draw target for game objects. Entities only ever see this trait, so the
/// simulation never depends on the terminal.
pub trait Canvas {
    fn draw_region(&mut self, region: RegionId, center: Vec2, tint: Tint);
}

/// Maps world coordinates onto a rectangle of terminal cells and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub area: Rect,
    pub bounds: WorldRect,
}

impl Projection {
    pub fn new(area: Rect, bounds: WorldRect) -> Self {
        Self { area, bounds }
    }

    /// Fractional cell coordinates for a world point.
    pub fn to_cell(&self, pos: Vec2) -> (f32, f32) {
        let col = (pos.x - self.bounds.left()) / self.bounds.width() * self.area.width as f32;
        let row = (self.bounds.top() - pos.y) / self.bounds.height() * self.area.height as f32;
        (self.area.x as f32 + col, self.area.y as f32 + row)
    }

    /// World point at the center of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        let width = self.area.width.max(1) as f32;
        let height = self.area.height.max(1) as f32;
        let col = col.saturating_sub(self.area.x) as f32 + 0.5;
        let row = row.saturating_sub(self.area.y) as f32 + 0.5;
        Vec2::new(
            self.bounds.left() + col / width * self.bounds.width(),
            self.bounds.top() - row / height * self.bounds.height(),
        )
    }
}

/// Writes atlas regions straight into a ratatui buffer, clipped to the
/// projection's area. Spaces in region art are transparent.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    atlas: &'a Atlas,
    projection: Projection,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buffer: &'a mut Buffer, atlas: &'a Atlas, projection: Projection) -> Self {
        Self {
            buffer,
            atlas,
            projection,
        }
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn draw_region(&mut self, region: RegionId, center: Vec2, tint: Tint) {
        let Some(art) = self.atlas.get(region) else {
            return;
        };
        let style = match tint {
            Tint::Normal => Style::default().fg(art.color),
            Tint::Flash => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Tint::Pressed => Style::default()
                .fg(art.color)
                .add_modifier(Modifier::REVERSED),
        };

        let (col, row) = self.projection.to_cell(center);
        let left = (col - art.cols() as f32 / 2.0).round() as i32;
        let top = (row - art.rows() as f32 / 2.0).round() as i32;
        let area = self.projection.area;

        for (dy, line) in art.lines.iter().enumerate() {
            let y = top + dy as i32;
            if y < area.top() as i32 || y >= area.bottom() as i32 {
                continue;
            }
            for (dx, glyph) in line.chars().enumerate() {
                let x = left + dx as i32;
                if glyph == ' ' || x < area.left() as i32 || x >= area.right() as i32 {
                    continue;
                }
                if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
                    cell.set_char(glyph).set_style(style);
                }
            }
        }
    }
}

/// View struct that holds everything needed to draw one frame
pub struct RenderView<'a> {
    pub session: &'a Session,
    pub atlas: &'a Atlas,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// The part of the screen the world is projected onto: everything between
    /// the stats line and the controls hint.
    pub fn playfield(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let projection = Projection::new(Self::playfield(area), *view.session.bounds());
        {
            let mut canvas = TerminalCanvas::new(frame.buffer_mut(), view.atlas, projection);
            view.session.draw(&mut canvas);
        }

        frame.render_widget(Paragraph::new(self.stats_line(view)), Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        });

        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", minutes, seconds),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(timer).centered(), Rect {
            height: area.height.min(1),
            ..area
        });

        let hint = match view.session.state() {
            GameState::Playing => "[A/D/Arrows: Move] [Space: Fire] [Mouse: Steer] [Q: Quit]",
            GameState::GameOver => "[R / click NEW GAME: Restart] [Q: Quit]",
        };
        if area.height >= 2 {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    hint,
                    Style::default().fg(Color::DarkGray),
                )))
                .centered(),
                Rect {
                    x: area.x + 1,
                    y: area.y + area.height - 1,
                    width: area.width.saturating_sub(2),
                    height: 1,
                },
            );
        }
    }

    fn stats_line(&self, view: &RenderView) -> Line<'static> {
        let session = view.session;
        let health = session.ship().health;
        let health_style = if health > 50 {
            Style::default().fg(Color::Green)
        } else if health > 25 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Red)
        }
        .add_modifier(Modifier::BOLD);

        Line::from(vec![
            Span::styled("Frags: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.frags()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  HP: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", health.max(0)), health_style),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.enemies().active_count()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}
