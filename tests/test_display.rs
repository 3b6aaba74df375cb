use flappy_bird::assets::{Assets, BuiltinAssets, SpriteId};
use flappy_bird::audio::{AudioSink, SoundId};
use flappy_bird::collision::Aabb;
use flappy_bird::compute;
use flappy_bird::config::GameConfig;
use flappy_bird::display::{render, Rgb, Surface, TerminalSurface};
use flappy_bird::entities::GameSession;
use flappy_bird::error::Result;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, PartialEq)]
enum Call {
    Fill(Rgb),
    Draw(SpriteId, Aabb, f32),
    Text(String, Vec2),
    Present,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Surface for Recorder {
    fn fill(&mut self, color: Rgb) -> Result<()> {
        self.calls.push(Call::Fill(color));
        Ok(())
    }

    fn draw(&mut self, sprite: SpriteId, bounds: Aabb, rotation: f32) -> Result<()> {
        self.calls.push(Call::Draw(sprite, bounds, rotation));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, center: Vec2) -> Result<()> {
        self.calls.push(Call::Text(text.to_string(), center));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

struct Mute;

impl AudioSink for Mute {
    fn play(&mut self, _sound: SoundId) {}
    fn set_volume(&mut self, _volume: f32) {}
}

fn make_session() -> GameSession {
    compute::new_session(GameConfig::default(), Assets::load(&BuiltinAssets).unwrap())
}

fn sprites(calls: &[Call]) -> Vec<SpriteId> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Draw(sprite, _, _) => Some(*sprite),
            _ => None,
        })
        .collect()
}

#[test]
fn frame_is_backdrop_entities_score_present() {
    let s = make_session();
    let mut surface = Recorder::default();
    render(&mut surface, &s).unwrap();

    assert_eq!(surface.calls.first(), Some(&Call::Fill(Rgb(66, 200, 245))));
    assert_eq!(sprites(&surface.calls), vec![SpriteId::Ground, SpriteId::Bird]);
    assert_eq!(
        surface.calls[surface.calls.len() - 2],
        Call::Text("0".to_string(), Vec2::new(250.0, 75.0))
    );
    assert_eq!(surface.calls.last(), Some(&Call::Present));
}

#[test]
fn bird_is_drawn_tilted_by_velocity() {
    let mut s = make_session();
    compute::press_flap(&mut s, &mut Mute);
    let mut surface = Recorder::default();
    render(&mut surface, &s).unwrap();

    let tilt = surface.calls.iter().find_map(|c| match c {
        Call::Draw(SpriteId::Bird, _, rotation) => Some(*rotation),
        _ => None,
    });
    assert_eq!(tilt, Some(35.0));
}

#[test]
fn frozen_frame_still_draws_everything_plus_restart() {
    let mut s = make_session();
    let mut rng = StdRng::seed_from_u64(3);
    compute::tick(&mut s, &mut rng, &mut Mute);
    compute::freeze(&mut s, &mut Mute);
    compute::tick(&mut s, &mut rng, &mut Mute);

    let mut surface = Recorder::default();
    render(&mut surface, &s).unwrap();
    let drawn = sprites(&surface.calls);
    assert_eq!(drawn.iter().filter(|&&s| s == SpriteId::Pipe).count(), 4);
    assert_eq!(drawn.last(), Some(&SpriteId::Start));
    assert!(surface.calls.iter().any(|c| matches!(c, Call::Text(t, _) if t == "0")));
}

#[test]
fn terminal_surface_writes_a_frame() {
    let s = make_session();
    let world = Vec2::new(s.config.screen_width, s.config.screen_height);
    let mut surface = TerminalSurface::new(Vec::new(), 50, 30, world);
    render(&mut surface, &s).unwrap();

    let bytes = surface.into_inner();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains('→'), "bird glyph missing");
    assert!(text.contains('▀'), "ground missing");
    assert!(text.contains('0'), "score missing");
}
