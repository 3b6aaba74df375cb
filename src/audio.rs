//! Fire-and-forget sound effects.
//!
//! The jump, collect and hit effects are synthesised once at startup with
//! `fundsp` and handed to `rodio` on every play. Terminals without an output
//! device fall back to the bell.

use std::io::Write;

use fundsp::prelude32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    Collect,
    Hit,
}

/// Audio collaborator. `play` must never block the tick loop.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
    fn set_volume(&mut self, volume: f32);
}

// ── Synthesis ─────────────────────────────────────────────────────────────────

pub const SAMPLE_RATE: u32 = 44_100;

const JUMP_DURATION: f32 = 0.12;
const HIT_DURATION: f32 = 0.5;
const COLLECT_NOTES: [f32; 2] = [520.0, 680.0];
const COLLECT_NOTE_GAP: f32 = 0.1;
const COLLECT_NOTE_LEN: f32 = 0.15;

/// Mono clips for every `SoundId`, rendered at `SAMPLE_RATE`.
pub struct SoundBank {
    jump: Vec<f32>,
    collect: Vec<f32>,
    hit: Vec<f32>,
}

impl SoundBank {
    pub fn render() -> Self {
        Self {
            jump: jump_clip(SAMPLE_RATE),
            collect: collect_clip(SAMPLE_RATE),
            hit: hit_clip(SAMPLE_RATE),
        }
    }

    pub fn clip(&self, sound: SoundId) -> &[f32] {
        match sound {
            SoundId::Jump => &self.jump,
            SoundId::Collect => &self.collect,
            SoundId::Hit => &self.hit,
        }
    }
}

/// Rising chirp.
fn jump_clip(sample_rate: u32) -> Vec<f32> {
    let mut node = (dsp::lfo(|t: f32| {
        if t < 0.08 {
            dsp::xerp(400.0, 800.0, (t / 0.08).min(1.0))
        } else {
            800.0
        }
    }) >> dsp::sine())
        * dsp::lfo(|t: f32| dsp::xerp(0.15, 0.001, (t / JUMP_DURATION).min(1.0)));
    render_mono(&mut node, sample_rate, JUMP_DURATION)
}

/// Two quick ascending notes.
fn collect_clip(sample_rate: u32) -> Vec<f32> {
    let total = COLLECT_NOTE_GAP * (COLLECT_NOTES.len() as f32 - 1.0) + COLLECT_NOTE_LEN;
    let total_samples = (sample_rate as f32 * total) as usize;
    let mut samples = vec![0.0f32; total_samples];

    for (idx, freq) in COLLECT_NOTES.iter().enumerate() {
        let start = (COLLECT_NOTE_GAP * idx as f32 * sample_rate as f32) as usize;
        let mut node = dsp::sine_hz(*freq)
            * dsp::lfo(|t: f32| dsp::xerp(0.12, 0.001, (t / COLLECT_NOTE_LEN).min(1.0)));
        let tone = render_mono(&mut node, sample_rate, COLLECT_NOTE_LEN);
        for (slot, s) in samples.iter_mut().skip(start).zip(tone) {
            *slot += s;
        }
    }
    samples
}

/// Falling buzz.
fn hit_clip(sample_rate: u32) -> Vec<f32> {
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(400.0, 80.0, (t / 0.4).min(1.0))) >> dsp::saw())
        * dsp::lfo(|t: f32| dsp::lerp(0.15, 0.0, (t / HIT_DURATION).min(1.0)));
    render_mono(&mut node, sample_rate, HIT_DURATION)
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(f64::from(sample_rate));
    node.reset();

    let count = (sample_rate as f32 * duration) as usize;
    (0..count).map(|_| node.get_mono()).collect()
}

/// Scales a clip by the output volume.
pub fn mix(clip: &[f32], volume: f32) -> Vec<f32> {
    clip.iter().map(|s| s * volume).collect()
}

// ── Speaker output ────────────────────────────────────────────────────────────

/// Plays synthesised clips on the default output device.
pub struct Speaker {
    // Dropping the stream silences every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    volume: f32,
}

impl Speaker {
    pub fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            bank: SoundBank::render(),
            volume: 1.0,
        })
    }
}

impl AudioSink for Speaker {
    fn play(&mut self, sound: SoundId) {
        tracing::debug!(?sound, volume = self.volume, "play sound");
        if self.volume <= 0.0 {
            return;
        }
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                let samples = mix(self.bank.clip(sound), self.volume);
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(err) => tracing::warn!(%err, ?sound, "dropped sound"),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

// ── Bell fallback ─────────────────────────────────────────────────────────────

/// Used when no output device opens: rings the terminal bell on a crash.
///
/// The bell has one loudness, so volume only decides whether it rings.
/// Jump and collect happen far too often for the bell to be anything but
/// noise, so they are only traced.
pub struct TerminalBell<W: Write> {
    out: W,
    volume: f32,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, volume: 1.0 }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: SoundId) {
        tracing::debug!(?sound, "play sound");
        if sound == SoundId::Hit && self.volume > 0.0 {
            // A lost bell is not worth stopping the game for.
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

/// Whatever output the terminal session ended up with.
pub enum GameAudio<W: Write> {
    Speaker(Speaker),
    Bell(TerminalBell<W>),
}

impl<W: Write> GameAudio<W> {
    /// Opens the speaker, or falls back to the bell on `bell_out`.
    pub fn open_or_bell(bell_out: W) -> Self {
        match Speaker::open() {
            Ok(speaker) => GameAudio::Speaker(speaker),
            Err(err) => {
                tracing::warn!(%err, "no audio device, using the terminal bell");
                GameAudio::Bell(TerminalBell::new(bell_out))
            }
        }
    }
}

impl<W: Write> AudioSink for GameAudio<W> {
    fn play(&mut self, sound: SoundId) {
        match self {
            GameAudio::Speaker(speaker) => speaker.play(sound),
            GameAudio::Bell(bell) => bell.play(sound),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        match self {
            GameAudio::Speaker(speaker) => speaker.set_volume(volume),
            GameAudio::Bell(bell) => bell.set_volume(volume),
        }
    }
}
