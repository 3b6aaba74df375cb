//! Asset provider.
//!
//! The simulation only needs the dimensions of each sprite (bounding boxes
//! are derived from them) and the line height of the HUD font. Everything is
//! resolved once at startup; a missing asset is fatal.

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Bird,
    Pipe,
    Ground,
    Start,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [SpriteId::Bird, SpriteId::Pipe, SpriteId::Ground, SpriteId::Start];

    /// Logical name the provider is asked for.
    pub fn name(self) -> &'static str {
        match self {
            SpriteId::Bird => "bird",
            SpriteId::Pipe => "pipe",
            SpriteId::Ground => "ground",
            SpriteId::Start => "start",
        }
    }
}

/// Pixel size of a sprite image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteMetrics {
    pub width: f32,
    pub height: f32,
}

impl SpriteMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub line_height: f32,
}

/// Something that can hand out images and a font by logical name.
pub trait AssetProvider {
    fn sprite(&self, name: &str) -> Result<SpriteMetrics>;
    fn font(&self) -> Result<FontMetrics>;
}

/// The sprite set drawn by the terminal renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn sprite(&self, name: &str) -> Result<SpriteMetrics> {
        match name {
            "bird" => Ok(SpriteMetrics::new(34.0, 24.0)),
            "pipe" => Ok(SpriteMetrics::new(52.0, 320.0)),
            "ground" => Ok(SpriteMetrics::new(500.0, 112.0)),
            "start" => Ok(SpriteMetrics::new(104.0, 58.0)),
            other => Err(GameError::MissingAsset(other.to_string())),
        }
    }

    fn font(&self) -> Result<FontMetrics> {
        Ok(FontMetrics { line_height: 50.0 })
    }
}

/// Every asset the game uses, resolved up front.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub bird: SpriteMetrics,
    pub pipe: SpriteMetrics,
    pub ground: SpriteMetrics,
    pub start: SpriteMetrics,
    pub font: FontMetrics,
}

impl Assets {
    pub fn load(provider: &impl AssetProvider) -> Result<Self> {
        let assets = Self {
            bird: provider.sprite(SpriteId::Bird.name())?,
            pipe: provider.sprite(SpriteId::Pipe.name())?,
            ground: provider.sprite(SpriteId::Ground.name())?,
            start: provider.sprite(SpriteId::Start.name())?,
            font: provider.font()?,
        };
        tracing::debug!(?assets, "assets loaded");
        Ok(assets)
    }

    pub fn metrics(&self, sprite: SpriteId) -> SpriteMetrics {
        match sprite {
            SpriteId::Bird => self.bird,
            SpriteId::Pipe => self.pipe,
            SpriteId::Ground => self.ground,
            SpriteId::Start => self.start,
        }
    }
}
