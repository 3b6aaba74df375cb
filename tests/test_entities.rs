use flappy_bird::assets::SpriteId;
use flappy_bird::collision::{self, Obstacle};
use flappy_bird::entities::*;
use flappy_bird::registry::Registry;

use glam::Vec2;

fn entity(registry: &mut Registry, kind: EntityKind, pos: Vec2, size: Vec2) -> Entity {
    let sprite = match kind {
        EntityKind::Player(_) => SpriteId::Bird,
        EntityKind::Pipe(_) => SpriteId::Pipe,
        EntityKind::Ground => SpriteId::Ground,
        EntityKind::RestartButton => SpriteId::Start,
    };
    Entity {
        id: registry.alloc_id(),
        sprite,
        pos,
        size,
        frozen: false,
        kind,
    }
}

fn pipe(role: PipeRole) -> EntityKind {
    EntityKind::Pipe(Pipe {
        role,
        scoring: role == PipeRole::Bottom,
        scored: false,
    })
}

fn bird() -> EntityKind {
    EntityKind::Player(Bird { velocity: 0.0 })
}

#[test]
fn kinds_know_whether_they_are_solid() {
    assert!(EntityKind::Ground.is_solid());
    assert!(pipe(PipeRole::Top).is_solid());
    assert!(!bird().is_solid());
    assert!(!EntityKind::RestartButton.is_solid());
}

#[test]
fn ids_are_never_reused() {
    let mut registry = Registry::new();
    let a = registry.alloc_id();
    registry.clear();
    let b = registry.alloc_id();
    assert_ne!(a, b);
}

// ── Subgroups ─────────────────────────────────────────────────────────────────

#[test]
fn pipes_and_buttons_join_their_subgroups() {
    let mut registry = Registry::new();
    let ground = entity(&mut registry, EntityKind::Ground, Vec2::ZERO, Vec2::ONE);
    let top = entity(&mut registry, pipe(PipeRole::Top), Vec2::ZERO, Vec2::ONE);
    let button = entity(&mut registry, EntityKind::RestartButton, Vec2::ZERO, Vec2::ONE);
    let (ground, top, button) = (registry.spawn(ground), registry.spawn(top), registry.spawn(button));

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.pipe_ids(), &[top]);
    assert_eq!(registry.button_ids(), &[button]);
    assert!(registry.contains(ground));
}

#[test]
fn despawn_leaves_no_trace() {
    let mut registry = Registry::new();
    let top = entity(&mut registry, pipe(PipeRole::Top), Vec2::ZERO, Vec2::ONE);
    let top = registry.spawn(top);

    let removed = registry.despawn(top).unwrap();
    assert_eq!(removed.id, top);
    assert!(!registry.contains(top));
    assert!(registry.pipe_ids().is_empty());
    assert!(registry.despawn(top).is_none());
}

// ── Deferred changes ──────────────────────────────────────────────────────────

#[test]
fn queued_changes_wait_for_commit() {
    let mut registry = Registry::new();
    let old = entity(&mut registry, pipe(PipeRole::Top), Vec2::ZERO, Vec2::ONE);
    let old = registry.spawn(old);
    let new = entity(&mut registry, pipe(PipeRole::Bottom), Vec2::ZERO, Vec2::ONE);

    let new = registry.queue_spawn(new);
    registry.queue_despawn(old);
    assert!(registry.contains(old));
    assert!(!registry.contains(new));
    assert!(registry.is_despawn_queued(old));

    registry.commit();
    assert!(!registry.contains(old));
    assert!(registry.contains(new));
    assert_eq!(registry.pipe_ids(), &[new]);
}

#[test]
fn double_despawn_is_queued_once() {
    let mut registry = Registry::new();
    let e = entity(&mut registry, EntityKind::Ground, Vec2::ZERO, Vec2::ONE);
    let id = registry.spawn(e);
    registry.queue_despawn(id);
    registry.queue_despawn(id);
    registry.commit();
    assert!(registry.is_empty());
}

#[test]
fn snapshot_survives_mutation() {
    let mut registry = Registry::new();
    for _ in 0..3 {
        let e = entity(&mut registry, pipe(PipeRole::Top), Vec2::ZERO, Vec2::ONE);
        registry.spawn(e);
    }
    let order = registry.snapshot();
    for id in &order {
        registry.despawn(*id);
    }
    assert_eq!(order.len(), 3);
    assert!(registry.is_empty());
}

#[test]
fn clear_drops_pending_work() {
    let mut registry = Registry::new();
    let e = entity(&mut registry, EntityKind::RestartButton, Vec2::ZERO, Vec2::ONE);
    registry.queue_spawn(e);
    registry.clear();
    registry.commit();
    assert!(registry.is_empty());
    assert!(registry.button_ids().is_empty());
}

// ── Collision queries ─────────────────────────────────────────────────────────

#[test]
fn collisions_come_back_in_registry_order() {
    let mut registry = Registry::new();
    let ground = entity(&mut registry, EntityKind::Ground, Vec2::new(0.0, 20.0), Vec2::new(100.0, 20.0));
    let ground = registry.spawn(ground);
    let player = entity(&mut registry, bird(), Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
    let player = registry.spawn(player);
    let miss = entity(&mut registry, pipe(PipeRole::Top), Vec2::new(50.0, 10.0), Vec2::new(10.0, 10.0));
    registry.spawn(miss);
    let hit = entity(&mut registry, pipe(PipeRole::Bottom), Vec2::new(5.0, 10.0), Vec2::new(10.0, 10.0));
    let hit = registry.spawn(hit);

    let hits = collision::collisions(&registry, player);
    assert_eq!(hits.len(), 2);
    assert_eq!((hits[0].id, hits[0].obstacle), (ground, Obstacle::Ground));
    assert_eq!((hits[1].id, hits[1].obstacle), (hit, Obstacle::Pipe));
}

#[test]
fn buttons_are_not_obstacles() {
    let mut registry = Registry::new();
    let player = entity(&mut registry, bird(), Vec2::ZERO, Vec2::new(10.0, 10.0));
    let player = registry.spawn(player);
    let button = entity(&mut registry, EntityKind::RestartButton, Vec2::ZERO, Vec2::new(10.0, 10.0));
    registry.spawn(button);

    assert!(collision::collisions(&registry, player).is_empty());
}

#[test]
fn unknown_subject_collides_with_nothing() {
    let mut registry = Registry::new();
    let ground = entity(&mut registry, EntityKind::Ground, Vec2::ZERO, Vec2::ONE);
    registry.spawn(ground);
    assert!(collision::collisions(&registry, EntityId(999)).is_empty());
}

#[test]
fn pointer_hits_only_inside_buttons() {
    let mut registry = Registry::new();
    let button = entity(&mut registry, EntityKind::RestartButton, Vec2::new(250.0, 300.0), Vec2::new(104.0, 58.0));
    let button = registry.spawn(button);

    assert_eq!(collision::button_at(&registry, Vec2::new(250.0, 300.0)), Some(button));
    assert_eq!(collision::button_at(&registry, Vec2::new(199.0, 300.0)), Some(button));
    assert_eq!(collision::button_at(&registry, Vec2::new(190.0, 300.0)), None);
    assert_eq!(collision::button_at(&registry, Vec2::new(250.0, 340.0)), None);
}
