//! Keyboard input to `TickInput`
//!
//! Terminals report keys two ways. Keyboard-enhancement capable terminals
//! send `Press` / `Repeat` / `Release`, so a key is held until released.
//! Classic terminals only send `Press` (OS key-repeat shows up as repeated
//! presses), so a key counts as held while its last press is younger than
//! [`HOLD_WINDOW`] frames.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::TickInput;

/// Frames a key stays live after its last press/repeat when no release
/// events are available (~133ms at 60 FPS)
pub const HOLD_WINDOW: u64 = 8;

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    RotateCcw,
    RotateCw,
    Shoot,
    Confirm,
    Quit,
}

/// Map a key event to its action
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Action::Up),
            's' => Some(Action::Down),
            'a' => Some(Action::Left),
            'd' => Some(Action::Right),
            'j' => Some(Action::RotateCcw),
            'k' => Some(Action::RotateCw),
            ' ' => Some(Action::Shoot),
            'q' => Some(Action::Quit),
            _ => None,
        },
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Tracks held keys across frames and collects one-shot presses
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Action -> frame it was last pressed or repeated
    held: HashMap<Action, u64>,
    frame: u64,
    /// Set once the terminal has sent a release event
    releases_reported: bool,
    /// One-shot presses since the last `take_input`
    pending: TickInput,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Returns true when quit was requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = action_for(&key) else {
            return false;
        };

        match key.kind {
            KeyEventKind::Press => {
                self.held.insert(action, self.frame);
                match action {
                    Action::Quit => return true,
                    Action::Confirm => self.pending.confirm = true,
                    Action::Up => self.pending.select_prev = true,
                    Action::Down => self.pending.select_next = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.held.insert(action, self.frame);
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.held.remove(&action);
            }
        }
        false
    }

    /// Whether an action's key is currently down
    pub fn is_held(&self, action: Action) -> bool {
        self.held.get(&action).is_some_and(|&last| {
            self.releases_reported || self.frame.saturating_sub(last) <= HOLD_WINDOW
        })
    }

    /// Held keys plus any one-shot presses since the last call
    pub fn take_input(&mut self) -> TickInput {
        let one_shots = std::mem::take(&mut self.pending);
        TickInput {
            up: self.is_held(Action::Up),
            down: self.is_held(Action::Down),
            left: self.is_held(Action::Left),
            right: self.is_held(Action::Right),
            rotate_ccw: self.is_held(Action::RotateCcw),
            rotate_cw: self.is_held(Action::RotateCw),
            shoot: self.is_held(Action::Shoot),
            confirm: one_shots.confirm,
            select_prev: one_shots.select_prev,
            select_next: one_shots.select_next,
        }
    }

    /// Advance the frame counter and expire stale keys
    pub fn end_frame(&mut self) {
        self.frame += 1;
        if !self.releases_reported {
            let frame = self.frame;
            self.held
                .retain(|_, &mut last| frame.saturating_sub(last) <= HOLD_WINDOW);
        }
    }
}
