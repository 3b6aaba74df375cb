//! Rendering layer.
//!
//! `render` turns a session into draw calls on a `Surface`; no game logic
//! happens here. `TerminalSurface` is the crossterm-backed surface that maps
//! world units onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use crate::assets::SpriteId;
use crate::collision::Aabb;
use crate::entities::GameSession;
use crate::error::Result;
use crate::player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// Rendering collaborator.
pub trait Surface {
    fn fill(&mut self, color: Rgb) -> Result<()>;
    /// Draw `sprite` stretched over `bounds`, tilted by `rotation` degrees.
    fn draw(&mut self, sprite: SpriteId, bounds: Aabb, rotation: f32) -> Result<()>;
    fn draw_text(&mut self, text: &str, center: Vec2) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

/// Render one complete frame: backdrop, every entity in registry order,
/// then the score on top.
pub fn render(surface: &mut impl Surface, session: &GameSession) -> Result<()> {
    surface.fill(Rgb::from(session.config.backdrop))?;

    for entity in session.registry.iter() {
        let rotation = entity
            .as_bird()
            .map(|bird| player::rotation_degrees(bird.velocity))
            .unwrap_or(0.0);
        surface.draw(entity.sprite, entity.bounds(), rotation)?;
    }

    session
        .score
        .render(surface, &session.config, session.assets.font)?;
    surface.present()
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BIRD: Color = Color::Rgb { r: 245, g: 200, b: 66 };
const C_BIRD_EYE: Color = Color::Black;
const C_PIPE: Color = Color::Rgb { r: 100, g: 170, b: 40 };
const C_PIPE_EDGE: Color = Color::Rgb { r: 60, g: 100, b: 20 };
const C_GROUND: Color = Color::Rgb { r: 210, g: 185, b: 110 };
const C_GRASS: Color = Color::Rgb { r: 84, g: 168, b: 55 };
const C_BUTTON: Color = Color::White;
const C_BUTTON_TEXT: Color = Color::Rgb { r: 230, g: 97, b: 29 };
const C_SCORE: Color = Color::White;

const START_LABEL: &str = "START";

// ── Terminal surface ──────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world: Vec2,
    backdrop: Color,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, world: Vec2) -> Self {
        Self {
            out,
            cols,
            rows,
            world,
            backdrop: Color::Reset,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.cols) / self.world.x,
            f32::from(self.rows) / self.world.y,
        )
    }

    /// World position at the centre of a terminal cell.
    pub fn cell_to_world(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(f32::from(col), f32::from(row)) + 0.5) / self.scale()
    }

    /// Cells covered by `bounds`, clipped to the screen: (cols, rows) as
    /// half-open ranges.
    fn cell_span(&self, bounds: Aabb) -> Option<(std::ops::Range<u16>, std::ops::Range<u16>)> {
        let scale = self.scale();
        let min = bounds.min * scale;
        let max = bounds.max * scale;
        let clip = |lo: f32, hi: f32, limit: u16| {
            let lo = lo.round().max(0.0).min(f32::from(limit)) as u16;
            let hi = hi.round().max(0.0).min(f32::from(limit)) as u16;
            // Never let a visible sprite vanish between cells.
            if lo == hi && lo < limit {
                lo..lo + 1
            } else {
                lo..hi
            }
        };
        if max.x <= 0.0 || max.y <= 0.0 || min.x >= f32::from(self.cols) || min.y >= f32::from(self.rows) {
            return None;
        }
        let cols = clip(min.x, max.x, self.cols);
        let rows = clip(min.y, max.y, self.rows);
        if cols.is_empty() || rows.is_empty() {
            None
        } else {
            Some((cols, rows))
        }
    }

    fn paint(&mut self, cols: &std::ops::Range<u16>, row: u16, fg: Color, bg: Color, glyph: &str) -> Result<()> {
        self.out.queue(cursor::MoveTo(cols.start, row))?;
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(style::SetBackgroundColor(bg))?;
        self.out.queue(Print(glyph.repeat(cols.len())))?;
        Ok(())
    }

    fn draw_bird(&mut self, cols: std::ops::Range<u16>, rows: std::ops::Range<u16>, rotation: f32) -> Result<()> {
        let glyph = bird_glyph(rotation);
        for row in rows {
            self.paint(&cols, row, C_BIRD_EYE, C_BIRD, glyph)?;
        }
        Ok(())
    }

    fn draw_pipe(&mut self, cols: std::ops::Range<u16>, rows: std::ops::Range<u16>) -> Result<()> {
        for row in rows {
            self.paint(&cols, row, C_PIPE_EDGE, C_PIPE, "▐")?;
        }
        Ok(())
    }

    fn draw_ground(&mut self, cols: std::ops::Range<u16>, rows: std::ops::Range<u16>) -> Result<()> {
        let grass_row = rows.start;
        for row in rows {
            if row == grass_row {
                self.paint(&cols, row, C_GRASS, C_GROUND, "▀")?;
            } else {
                self.paint(&cols, row, C_GRASS, C_GROUND, "░")?;
            }
        }
        Ok(())
    }

    fn draw_button(&mut self, cols: std::ops::Range<u16>, rows: std::ops::Range<u16>) -> Result<()> {
        let label_row = rows.start + (rows.len() as u16) / 2;
        for row in rows {
            self.paint(&cols, row, C_BUTTON_TEXT, C_BUTTON, " ")?;
        }
        let width = cols.len();
        let label: String = START_LABEL.chars().take(width).collect();
        let col = cols.start + ((width - label.chars().count()) / 2) as u16;
        self.out.queue(cursor::MoveTo(col, label_row))?;
        self.out.queue(Print(label))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn fill(&mut self, color: Rgb) -> Result<()> {
        self.backdrop = color.into();
        self.out.queue(style::SetBackgroundColor(self.backdrop))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw(&mut self, sprite: SpriteId, bounds: Aabb, rotation: f32) -> Result<()> {
        let Some((cols, rows)) = self.cell_span(bounds) else {
            return Ok(());
        };
        match sprite {
            SpriteId::Bird => self.draw_bird(cols, rows, rotation),
            SpriteId::Pipe => self.draw_pipe(cols, rows),
            SpriteId::Ground => self.draw_ground(cols, rows),
            SpriteId::Start => self.draw_button(cols, rows),
        }
    }

    fn draw_text(&mut self, text: &str, center: Vec2) -> Result<()> {
        let scale = self.scale();
        let row = (center.y * scale.y).max(0.0) as u16;
        let half = text.chars().count() as f32 / 2.0;
        let col = (center.x * scale.x - half).max(0.0) as u16;
        if row >= self.rows {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(C_SCORE))?;
        self.out.queue(style::SetBackgroundColor(self.backdrop))?;
        self.out.queue(style::SetAttribute(style::Attribute::Bold))?;
        self.out.queue(Print(text))?;
        self.out.queue(style::SetAttribute(style::Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Arrow pointing the way the bird is heading.
fn bird_glyph(rotation: f32) -> &'static str {
    if rotation > 10.0 {
        "↗"
    } else if rotation > -30.0 {
        "→"
    } else if rotation > -70.0 {
        "↘"
    } else {
        "↓"
    }
}
