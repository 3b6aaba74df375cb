//! Game entity types and the session that owns them.

use glam::Vec2;

use crate::assets::{Assets, SpriteId};
use crate::collision::Aabb;
use crate::config::GameConfig;
use crate::hud::Scoreboard;
use crate::registry::Registry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// A collision happened; everything is halted until restart.
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeRole {
    Top,
    Bottom,
}

// ── Per-kind state ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Vertical velocity accumulator (negative = upward).
    pub velocity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub role: PipeRole,
    /// Only one pipe per pair counts toward the score.
    pub scoring: bool,
    pub scored: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Player(Bird),
    Pipe(Pipe),
    Ground,
    /// Clickable control shown while frozen; clicking it restarts the session.
    RestartButton,
}

impl EntityKind {
    /// Whether the player dies on touching it.
    pub fn is_solid(&self) -> bool {
        matches!(self, EntityKind::Pipe(_) | EntityKind::Ground)
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub sprite: SpriteId,
    /// Centre of the sprite, in world units.
    pub pos: Vec2,
    pub size: Vec2,
    /// Halts per-tick motion; the entity is still drawn.
    pub frozen: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn as_bird(&self) -> Option<&Bird> {
        match &self.kind {
            EntityKind::Player(bird) => Some(bird),
            _ => None,
        }
    }

    pub fn as_pipe(&self) -> Option<&Pipe> {
        match &self.kind {
            EntityKind::Pipe(pipe) => Some(pipe),
            _ => None,
        }
    }
}

/// Raw input, already translated from whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    FlapDown,
    FlapUp,
    PointerDown(Vec2),
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything one play session owns. Passed by reference to every
/// component instead of living in globals.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    pub assets: Assets,
    pub registry: Registry,
    pub score: Scoreboard,
    pub status: GameStatus,
    /// Set while the flap key is held so holding does not re-flap.
    pub flap_held: bool,
    pub player: EntityId,
    pub ground: EntityId,
    pub ticks: u64,
}

impl GameSession {
    pub fn player_entity(&self) -> Option<&Entity> {
        self.registry.get(self.player)
    }

    pub fn ground_entity(&self) -> Option<&Entity> {
        self.registry.get(self.ground)
    }

    pub fn is_frozen(&self) -> bool {
        self.status == GameStatus::Frozen
    }

    pub fn count_players(&self) -> usize {
        self.registry
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Player(_)))
            .count()
    }

    pub fn count_grounds(&self) -> usize {
        self.registry
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Ground))
            .count()
    }
}
