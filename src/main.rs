use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use flappy_bird::assets::{Assets, BuiltinAssets};
use flappy_bird::audio::{AudioSink, GameAudio};
use flappy_bird::clock::TickLimiter;
use flappy_bird::compute::{self, Flow};
use flappy_bird::config::{GameConfig, CONFIG_FILE};
use flappy_bird::display::{self, TerminalSurface};
use flappy_bird::entities::GameSession;
use flappy_bird::error::GameError;
use flappy_bird::input::InputMapper;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit event. Each tick: drain input, step the simulation,
/// draw, then sleep out the rest of the tick.
fn game_loop<W: Write, A: AudioSink>(
    surface: &mut TerminalSurface<W>,
    session: &mut GameSession,
    input: &mut InputMapper,
    audio: &mut A,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut limiter = TickLimiter::new(session.config.fps);
    let mut frame: u64 = 0;

    loop {
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(cols, rows) = ev {
                surface.resize(cols, rows);
                continue;
            }
            let mapped = input.map(&ev, frame, |col, row| surface.cell_to_world(col, row));
            if let Some(game_event) = mapped {
                if compute::handle_input(session, game_event, audio) == Flow::Quit {
                    return Ok(());
                }
            }
        }
        if let Some(release) = input.expire(frame) {
            compute::handle_input(session, release, audio);
        }

        compute::tick(session, &mut rng, audio);
        display::render(surface, session)?;

        limiter.wait();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // Everything that can fail for want of config or assets fails here,
    // before the terminal is touched.
    let config = GameConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let assets = Assets::load(&BuiltinAssets)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "terminal ready");

    let result = run(out.by_ref(), config, assets, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: W,
    config: GameConfig,
    assets: Assets,
    keyboard_enhanced: bool,
) -> Result<(), GameError> {
    let (cols, rows) = terminal::size()?;
    let world = Vec2::new(config.screen_width, config.screen_height);
    let mut surface = TerminalSurface::new(out, cols, rows, world);
    let mut input = InputMapper::new(keyboard_enhanced, config.center());

    let mut audio = GameAudio::open_or_bell(stdout());
    audio.set_volume(config.volume);

    let mut session = compute::new_session(config, assets);
    game_loop(&mut surface, &mut session, &mut input, &mut audio)?;

    tracing::info!(score = session.score.value(), ticks = session.ticks, "quit");
    Ok(())
}
