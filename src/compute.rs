//! Game-state machine and the per-tick simulation step.
//!
//! All randomness comes through an injected RNG and all sound through an
//! injected `AudioSink`, so callers control determinism (tests use a seeded
//! RNG and a recording sink).

use glam::Vec2;
use rand::Rng;

use crate::assets::{Assets, SpriteId};
use crate::audio::{AudioSink, SoundId};
use crate::collision;
use crate::config::GameConfig;
use crate::entities::{Entity, EntityId, EntityKind, GameSession, GameStatus, InputEvent};
use crate::hud::Scoreboard;
use crate::pipes;
use crate::player;
use crate::registry::Registry;

/// What the loop driver should do after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn spawn_ground(registry: &mut Registry, config: &GameConfig, assets: &Assets) -> EntityId {
    let id = registry.alloc_id();
    registry.spawn(Entity {
        id,
        sprite: SpriteId::Ground,
        pos: Vec2::new(config.screen_width / 2.0, config.screen_height),
        size: assets.ground.size(),
        frozen: false,
        kind: EntityKind::Ground,
    })
}

/// Build a fresh session in the RUNNING state.
pub fn new_session(config: GameConfig, assets: Assets) -> GameSession {
    let mut registry = Registry::new();
    let ground = spawn_ground(&mut registry, &config, &assets);
    let player = player::spawn_player(&mut registry, &config, &assets);
    tracing::info!("session started");
    GameSession {
        config,
        assets,
        registry,
        score: Scoreboard::new(),
        status: GameStatus::Running,
        flap_held: false,
        player,
        ground,
        ticks: 0,
    }
}

/// Throw the current session away and start over: every entity is
/// destroyed, the score drops to zero, ground and player are rebuilt.
pub fn play(session: &mut GameSession) {
    session.registry.clear();
    session.score.reset();
    session.ground = spawn_ground(&mut session.registry, &session.config, &session.assets);
    session.player = player::spawn_player(&mut session.registry, &session.config, &session.assets);
    session.status = GameStatus::Running;
    session.ticks = 0;
    tracing::info!("session restarted");
}

// ── State transitions ────────────────────────────────────────────────────────

/// RUNNING → FROZEN. Halts every entity, plays the crash sound and queues
/// the restart control (it appears on the next `Registry::commit`).
/// No-op when already frozen.
pub fn freeze(session: &mut GameSession, audio: &mut impl AudioSink) {
    if session.status == GameStatus::Frozen {
        return;
    }
    session.status = GameStatus::Frozen;
    for entity in session.registry.iter_mut() {
        entity.frozen = true;
    }
    audio.play(SoundId::Hit);

    let button = Entity {
        id: session.registry.alloc_id(),
        sprite: SpriteId::Start,
        pos: session.config.center(),
        size: session.assets.start.size(),
        frozen: true,
        kind: EntityKind::RestartButton,
    };
    session.registry.queue_spawn(button);
    tracing::info!(score = session.score.value(), "crashed");
}

/// FROZEN → RUNNING, via a click on a restart control.
/// Returns whether the click hit one.
pub fn click(session: &mut GameSession, point: Vec2) -> bool {
    let Some(button) = collision::button_at(&session.registry, point) else {
        return false;
    };
    session.registry.despawn(button);
    play(session);
    true
}

// ── Input ────────────────────────────────────────────────────────────────────

pub fn press_flap(session: &mut GameSession, audio: &mut impl AudioSink) {
    player::flap(session, audio);
    session.flap_held = true;
}

pub fn release_flap(session: &mut GameSession) {
    session.flap_held = false;
}

pub fn handle_input(session: &mut GameSession, event: InputEvent, audio: &mut impl AudioSink) -> Flow {
    match event {
        InputEvent::Quit => return Flow::Quit,
        InputEvent::FlapDown => press_flap(session, audio),
        InputEvent::FlapUp => release_flap(session),
        InputEvent::PointerDown(point) => {
            click(session, point);
        }
    }
    Flow::Continue
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// Advance the simulation by one tick: spawn a wave if the screen is empty,
/// then step every entity in registry order. Spawns and despawns requested
/// during the pass are applied once it finishes.
pub fn tick(session: &mut GameSession, rng: &mut impl Rng, audio: &mut impl AudioSink) {
    session.ticks += 1;
    pipes::spawn_wave(session, rng);

    for id in session.registry.snapshot() {
        if session.registry.is_despawn_queued(id) {
            continue;
        }
        let Some(entity) = session.registry.get(id) else {
            continue;
        };
        let is_player = matches!(entity.kind, EntityKind::Player(_));
        let is_pipe = matches!(entity.kind, EntityKind::Pipe(_));

        if is_player {
            player::integrate(session, audio);
        } else if is_pipe {
            pipes::advance(session, id, audio);
        }
    }

    session.registry.commit();
}
