//! Keyboard event decoding.
//!
//! This crate reduces crossterm key events to the small key set the
//! modal front-end understands. Escape sequences and arrow keys are
//! already decoded by crossterm; everything else is dropped here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key understood by the modal front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character
    Char(char),
    Enter,
    Backspace,
    Esc,
    Up,
    Down,
    Left,
    Right,
    /// Ctrl+O (one-shot normal mode from insert)
    CtrlO,
}

impl Key {
    /// Decode a crossterm key event.
    ///
    /// Returns `None` for releases, unsupported keys, and Ctrl/Alt chords
    /// other than Ctrl+O.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let chord = event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match event.code {
            KeyCode::Char('o' | 'O') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::CtrlO)
            }
            KeyCode::Char(_) if chord => None,
            KeyCode::Char(ch) => Some(Key::Char(ch)),
            KeyCode::Tab if !chord => Some(Key::Char('\t')),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            _ => None,
        }
    }
}
