//! Tunable game constants.
//!
//! Defaults reproduce the reference feel of the game. A TOML file can
//! override any subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, Result};

/// Default file looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "flappy.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    /// Clear colour of the play area.
    pub backdrop: [u8; 3],

    // ── Player ───────────────────────────────────────────────────────────────
    /// Fixed screen column the bird flies along.
    pub player_x: f32,
    /// Upward displacement applied instantly by a flap.
    pub jump_impulse: f32,
    /// Velocity the accumulator is reset to on a flap (negative = upward).
    pub flap_kick: f32,
    /// Multiplier applied to velocity when integrating position.
    pub speed_scale: f32,
    /// Added to velocity every tick.
    pub gravity: f32,

    // ── Pipes ────────────────────────────────────────────────────────────────
    pub pipe_speed: f32,
    /// Extra distance past the right edge where a wave starts.
    pub pipe_spawn_margin: f32,
    pub pipe_spacing_min: u32,
    pub pipe_spacing_max: u32,
    pub pairs_per_wave: u32,

    // ── HUD / audio ──────────────────────────────────────────────────────────
    /// Baseline of the score text.
    pub hud_baseline: f32,
    pub volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 500.0,
            screen_height: 600.0,
            fps: 60,
            backdrop: [66, 200, 245],
            player_x: 200.0,
            jump_impulse: 35.0,
            flap_kick: -5.0,
            speed_scale: 0.8,
            gravity: 0.25,
            pipe_speed: 2.8,
            pipe_spawn_margin: 25.0,
            pipe_spacing_min: 150,
            pipe_spacing_max: 700,
            pairs_per_wave: 2,
            hud_baseline: 100.0,
            volume: 0.1,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load `path` when it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        // Written so NaN fails too.
        let positive = |v: f32| v > 0.0 && v.is_finite();
        if !positive(self.screen_width) || !positive(self.screen_height) {
            return Err(GameError::Config(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.fps == 0 {
            return Err(GameError::Config("fps must be at least 1".into()));
        }
        if !positive(self.pipe_speed) {
            return Err(GameError::Config(format!(
                "pipe speed must be positive, got {}",
                self.pipe_speed
            )));
        }
        if self.pairs_per_wave == 0 {
            return Err(GameError::Config("pairs_per_wave must be at least 1".into()));
        }
        if self.pipe_spacing_min > self.pipe_spacing_max {
            return Err(GameError::Config(format!(
                "pipe spacing range is inverted: {}..={}",
                self.pipe_spacing_min, self.pipe_spacing_max
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(GameError::Config(format!(
                "volume must be within 0..=1, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}
