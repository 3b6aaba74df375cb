//! Entity registry.
//!
//! Entities are kept in insertion order, which is also the update, draw and
//! collision order. Pipes and restart buttons are additionally tracked in
//! subgroups so the spawner and the pointer handler don't have to scan.
//!
//! Structural changes made while an update pass is running go through
//! `queue_spawn` / `queue_despawn` and only land on `commit`. Direct
//! `spawn` / `despawn` are for code that is not iterating.

use crate::entities::{Entity, EntityId, EntityKind};

#[derive(Clone, Debug)]
enum Pending {
    Spawn(Entity),
    Despawn(EntityId),
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entities: Vec<Entity>,
    pipes: Vec<EntityId>,
    buttons: Vec<EntityId>,
    pending: Vec<Pending>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id for an entity that is about to be built.
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Immediate mutation ───────────────────────────────────────────────────

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        match entity.kind {
            EntityKind::Pipe(_) => self.pipes.push(id),
            EntityKind::RestartButton => self.buttons.push(id),
            _ => {}
        }
        self.entities.push(entity);
        id
    }

    /// Remove an entity from the registry and from every subgroup.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        self.pipes.retain(|&p| p != id);
        self.buttons.retain(|&b| b != id);
        Some(self.entities.remove(index))
    }

    /// Destroy every entity, including anything still queued.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pipes.clear();
        self.buttons.clear();
        self.pending.clear();
    }

    // ── Deferred mutation ────────────────────────────────────────────────────

    pub fn queue_spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.pending.push(Pending::Spawn(entity));
        id
    }

    pub fn queue_despawn(&mut self, id: EntityId) {
        if !self.is_despawn_queued(id) {
            self.pending.push(Pending::Despawn(id));
        }
    }

    pub fn is_despawn_queued(&self, id: EntityId) -> bool {
        self.pending
            .iter()
            .any(|p| matches!(p, Pending::Despawn(queued) if *queued == id))
    }

    /// Apply queued spawns and despawns in the order they were queued.
    pub fn commit(&mut self) {
        for change in std::mem::take(&mut self.pending) {
            match change {
                Pending::Spawn(entity) => {
                    self.spawn(entity);
                }
                Pending::Despawn(id) => {
                    self.despawn(id);
                }
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Copy of the current id order, safe to walk while mutating.
    pub fn snapshot(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pipe_ids(&self) -> &[EntityId] {
        &self.pipes
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    pub fn button_ids(&self) -> &[EntityId] {
        &self.buttons
    }
}
