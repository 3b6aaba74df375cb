//! Translates terminal events into game input.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
//!   `Repeat` / `Release` events, so Space release maps straight to
//!   `FlapUp`.
//! * **Classic terminals**: only `Press` events, with OS key-repeat showing
//!   up as more presses. Space counts as held for `REPEAT_DELAY_WINDOW`
//!   ticks after the first press, long enough for the OS repeat delay, and
//!   then for `REPEAT_WINDOW` ticks after each repeat. `expire` synthesises
//!   the `FlapUp` once presses stop.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use glam::Vec2;

use crate::entities::InputEvent;

/// Silence, in ticks, that releases a classic-terminal Space before any
/// repeat has arrived. Covers OS repeat delays up to about 660 ms at 60 fps.
pub const REPEAT_DELAY_WINDOW: u64 = 40;

/// Silence, in ticks, that releases Space once repeats are flowing.
pub const REPEAT_WINDOW: u64 = 8;

pub struct InputMapper {
    release_events: bool,
    /// Tick of the last Space press or repeat while held.
    space_seen: Option<u64>,
    /// Whether OS repeats have started for the current hold.
    repeating: bool,
    /// Where a keyboard "click" lands: the restart control sits here.
    keyboard_click: Vec2,
}

impl InputMapper {
    pub fn new(release_events: bool, keyboard_click: Vec2) -> Self {
        Self {
            release_events,
            space_seen: None,
            repeating: false,
            keyboard_click,
        }
    }

    pub fn map(
        &mut self,
        event: &Event,
        tick: u64,
        cell_to_world: impl Fn(u16, u16) -> Vec2,
    ) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.map_key(key, tick),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(InputEvent::PointerDown(cell_to_world(*column, *row))),
            _ => None,
        }
    }

    fn map_key(&mut self, key: &KeyEvent, tick: u64) -> Option<InputEvent> {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;

        if *code == KeyCode::Char(' ') {
            return self.map_space(*kind, tick);
        }
        if *kind != KeyEventKind::Press {
            return None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                Some(InputEvent::PointerDown(self.keyboard_click))
            }
            _ => None,
        }
    }

    fn map_space(&mut self, kind: KeyEventKind, tick: u64) -> Option<InputEvent> {
        match kind {
            KeyEventKind::Press => {
                let held = self.space_seen.is_some();
                self.space_seen = Some(tick);
                self.repeating = held;
                if held && !self.release_events {
                    None
                } else {
                    Some(InputEvent::FlapDown)
                }
            }
            KeyEventKind::Repeat => {
                self.space_seen = Some(tick);
                self.repeating = true;
                None
            }
            KeyEventKind::Release => {
                self.space_seen = None;
                Some(InputEvent::FlapUp)
            }
        }
    }

    /// Classic terminals only: release Space once its presses stop.
    pub fn expire(&mut self, tick: u64) -> Option<InputEvent> {
        if self.release_events {
            return None;
        }
        let last = self.space_seen?;
        let window = if self.repeating {
            REPEAT_WINDOW
        } else {
            REPEAT_DELAY_WINDOW
        };
        if tick.saturating_sub(last) > window {
            self.space_seen = None;
            self.repeating = false;
            Some(InputEvent::FlapUp)
        } else {
            None
        }
    }
}
