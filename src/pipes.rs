//! Pipe spawner and scroller.

use glam::Vec2;
use rand::Rng;

use crate::assets::{Assets, SpriteId};
use crate::audio::{AudioSink, SoundId};
use crate::entities::{Entity, EntityId, EntityKind, GameSession, GameStatus, Pipe, PipeRole};
use crate::registry::Registry;

/// Where the gap of a pair sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GapProfile {
    /// Both pipes short: a wide gap around the middle.
    Centered,
    /// Long top pipe, stubby bottom pipe.
    Low,
    /// Stubby top pipe, long bottom pipe.
    High,
}

/// How far each pipe of a pair reaches into the play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gap {
    pub profile: GapProfile,
    pub top: u32,
    pub bottom: u32,
}

/// Pick one of the three gap profiles uniformly, then its two extents.
pub fn roll_gap(rng: &mut impl Rng) -> Gap {
    match rng.gen_range(1..=3) {
        1 => Gap {
            profile: GapProfile::Centered,
            top: rng.gen_range(0..=120),
            bottom: rng.gen_range(0..=120),
        },
        2 => Gap {
            profile: GapProfile::Low,
            top: rng.gen_range(120..=300),
            bottom: rng.gen_range(0..=30),
        },
        _ => Gap {
            profile: GapProfile::High,
            top: rng.gen_range(0..=30),
            bottom: rng.gen_range(120..=300),
        },
    }
}

/// Build one pipe. `extent` is how far the pipe reaches into the screen
/// from its edge; `x` is the centre column.
pub fn pipe_entity(
    registry: &mut Registry,
    screen_height: f32,
    assets: &Assets,
    role: PipeRole,
    x: f32,
    extent: f32,
    scoring: bool,
) -> Entity {
    let y = match role {
        PipeRole::Top => extent / 2.0,
        PipeRole::Bottom => screen_height - extent / 2.0,
    };
    Entity {
        id: registry.alloc_id(),
        sprite: SpriteId::Pipe,
        pos: Vec2::new(x, y),
        size: assets.pipe.size(),
        frozen: false,
        kind: EntityKind::Pipe(Pipe {
            role,
            scoring,
            scored: false,
        }),
    }
}

/// Spawn a TOP/BOTTOM pair sharing column `x`. The bottom pipe scores.
pub fn spawn_pair(session: &mut GameSession, x: f32, gap: Gap) -> (EntityId, EntityId) {
    let height = session.config.screen_height;
    let top = pipe_entity(
        &mut session.registry,
        height,
        &session.assets,
        PipeRole::Top,
        x,
        gap.top as f32,
        false,
    );
    let bottom = pipe_entity(
        &mut session.registry,
        height,
        &session.assets,
        PipeRole::Bottom,
        x,
        gap.bottom as f32,
        true,
    );
    (session.registry.spawn(top), session.registry.spawn(bottom))
}

/// Start a new wave once the previous one has fully left the screen.
/// Returns the number of pairs spawned.
pub fn spawn_wave(session: &mut GameSession, rng: &mut impl Rng) -> usize {
    if session.status != GameStatus::Running || session.registry.pipe_count() > 0 {
        return 0;
    }
    let config = &session.config;
    let (pairs, min, max) = (config.pairs_per_wave, config.pipe_spacing_min, config.pipe_spacing_max);
    let start_x = config.screen_width + config.pipe_spawn_margin;

    for i in 0..pairs {
        let gap = roll_gap(rng);
        let spacing = i * rng.gen_range(min..=max);
        let x = start_x + spacing as f32;
        tracing::debug!(pair = i, x, ?gap, "spawning pipe pair");
        spawn_pair(session, x, gap);
    }
    pairs as usize
}

/// One scroll step for pipe `id`: move left, award the pass, or leave.
pub fn advance(session: &mut GameSession, id: EntityId, audio: &mut impl AudioSink) {
    let speed = session.config.pipe_speed;
    let player_left = session.player_entity().map(|p| p.bounds().min.x);

    let Some(entity) = session.registry.get_mut(id) else {
        return;
    };
    if entity.frozen {
        return;
    }
    entity.pos.x -= speed;
    // Passing and leaving are both judged on the left edge.
    let left = entity.bounds().min.x;
    let width = entity.size.x;
    let EntityKind::Pipe(pipe) = &mut entity.kind else {
        return;
    };

    if pipe.scoring && !pipe.scored && player_left.is_some_and(|px| left <= px) {
        pipe.scored = true;
        session.score.increment();
        audio.play(SoundId::Collect);
        tracing::info!(score = session.score.value(), "pipe passed");
    } else if left < -width {
        session.registry.queue_despawn(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gap_extents_stay_in_profile_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let gap = roll_gap(&mut rng);
            match gap.profile {
                GapProfile::Centered => {
                    assert!(gap.top <= 120 && gap.bottom <= 120, "{gap:?}");
                }
                GapProfile::Low => {
                    assert!((120..=300).contains(&gap.top), "{gap:?}");
                    assert!(gap.bottom <= 30, "{gap:?}");
                }
                GapProfile::High => {
                    assert!(gap.top <= 30, "{gap:?}");
                    assert!((120..=300).contains(&gap.bottom), "{gap:?}");
                }
            }
        }
    }

    #[test]
    fn profiles_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0u32; 3];
        for _ in 0..3_000 {
            let slot = match roll_gap(&mut rng).profile {
                GapProfile::Centered => 0,
                GapProfile::Low => 1,
                GapProfile::High => 2,
            };
            counts[slot] += 1;
        }
        for count in counts {
            assert!((800..=1_200).contains(&count), "{counts:?}");
        }
    }
}
