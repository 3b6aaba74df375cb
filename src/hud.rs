//! Score keeping and the score overlay.

use glam::Vec2;

use crate::assets::FontMetrics;
use crate::config::GameConfig;
use crate::display::Surface;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    value: u32,
    label: String,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            value: 0,
            label: "0".to_string(),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Text currently shown on screen.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn increment(&mut self) {
        self.value += 1;
        self.label = self.value.to_string();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Draw the score centred horizontally, sitting on the HUD baseline.
    pub fn render(&self, surface: &mut impl Surface, config: &GameConfig, font: FontMetrics) -> Result<()> {
        let center = Vec2::new(
            config.screen_width / 2.0,
            config.hud_baseline - font.line_height / 2.0,
        );
        surface.draw_text(&self.label, center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_tracks_value() {
        let mut board = Scoreboard::new();
        board.increment();
        board.increment();
        assert_eq!(board.value(), 2);
        assert_eq!(board.label(), "2");
        board.reset();
        assert_eq!(board.value(), 0);
        assert_eq!(board.label(), "0");
    }
}
