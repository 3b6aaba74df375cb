//! Player controller: flap impulse, gravity integration, crash detection.

use glam::Vec2;

use crate::assets::{Assets, SpriteId};
use crate::audio::{AudioSink, SoundId};
use crate::collision::{self, Obstacle};
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Bird, Entity, EntityId, EntityKind, GameSession, GameStatus};
use crate::registry::Registry;

/// Maximum nose-down tilt, in degrees.
const MAX_DIVE: f32 = -90.0;
/// Degrees of tilt per unit of velocity.
const TILT_PER_VELOCITY: f32 = 7.0;

pub fn spawn_player(registry: &mut Registry, config: &GameConfig, assets: &Assets) -> EntityId {
    let id = registry.alloc_id();
    registry.spawn(Entity {
        id,
        sprite: SpriteId::Bird,
        pos: Vec2::new(config.player_x, config.screen_height / 2.0),
        size: assets.bird.size(),
        frozen: false,
        kind: EntityKind::Player(Bird { velocity: 0.0 }),
    })
}

/// Apply one upward impulse. Returns whether the flap happened.
///
/// Ignored while the flap key is still held from a previous press, and
/// while the player is frozen.
pub fn flap(session: &mut GameSession, audio: &mut impl AudioSink) -> bool {
    if session.flap_held {
        return false;
    }
    let jump = session.config.jump_impulse;
    let kick = session.config.flap_kick;
    let Some(player) = session.registry.get_mut(session.player) else {
        return false;
    };
    if player.frozen {
        return false;
    }
    player.pos.y = (player.pos.y - jump).max(0.0);
    if let EntityKind::Player(bird) = &mut player.kind {
        bird.velocity = kick;
    }
    audio.play(SoundId::Jump);
    true
}

/// One physics step for the player.
///
/// Collisions are resolved first: any hit freezes the game, and a hit on the
/// ground pins the bird to the ground surface instead of integrating.
pub fn integrate(session: &mut GameSession, audio: &mut impl AudioSink) {
    let player_id = session.player;
    match session.registry.get(player_id) {
        Some(player) if !player.frozen => {}
        _ => return,
    }

    let hits = collision::collisions(&session.registry, player_id);
    if !hits.is_empty() {
        if session.status == GameStatus::Running {
            compute::freeze(session, audio);
        }
        let ground_top = hits
            .iter()
            .find(|hit| hit.obstacle == Obstacle::Ground)
            .and_then(|hit| session.registry.get(hit.id))
            .map(|ground| ground.bounds().top());
        if let Some(top) = ground_top {
            if let Some(player) = session.registry.get_mut(player_id) {
                player.pos.y = player.pos.y.min(top);
            }
            return;
        }
    }

    let speed_scale = session.config.speed_scale;
    let gravity = session.config.gravity;
    if let Some(player) = session.registry.get_mut(player_id) {
        if let EntityKind::Player(bird) = &mut player.kind {
            player.pos.y = (player.pos.y + speed_scale * bird.velocity).max(0.0);
            bird.velocity += gravity;
        }
    }
}

/// Sprite tilt for a given velocity: nose up while rising, diving down to a
/// vertical nose-down pose while falling. Cosmetic only.
pub fn rotation_degrees(velocity: f32) -> f32 {
    (-TILT_PER_VELOCITY * velocity).max(MAX_DIVE)
}
