//! Axis-aligned bounding-box collision.

use glam::Vec2;

use crate::entities::{EntityId, EntityKind};
use crate::registry::Registry;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Non-empty overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstacle {
    Ground,
    Pipe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
    pub id: EntityId,
    pub obstacle: Obstacle,
}

/// Every solid entity overlapping `subject`, in registry order.
pub fn collisions(registry: &Registry, subject: EntityId) -> Vec<Collision> {
    let Some(subject_box) = registry.get(subject).map(|e| e.bounds()) else {
        return Vec::new();
    };
    registry
        .iter()
        .filter(|e| e.id != subject && e.kind.is_solid())
        .filter(|e| e.bounds().intersects(&subject_box))
        .filter_map(|e| {
            let obstacle = match e.kind {
                EntityKind::Ground => Obstacle::Ground,
                EntityKind::Pipe(_) => Obstacle::Pipe,
                _ => return None,
            };
            Some(Collision { id: e.id, obstacle })
        })
        .collect()
}

/// Topmost (last drawn) restart button under `point`.
pub fn button_at(registry: &Registry, point: Vec2) -> Option<EntityId> {
    registry
        .button_ids()
        .iter()
        .rev()
        .copied()
        .find(|&id| registry.get(id).is_some_and(|e| e.bounds().contains(point)))
}
