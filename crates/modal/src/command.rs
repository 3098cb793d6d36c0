//! Key to command mapping.
//!
//! All bindings live in [`Command::from_key`] so they can be read and
//! tested in one place.

use gapedit_keyboard::Key;

use crate::Mode;

/// Action requested by a key in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Mode changes
    EnterInsert,
    AppendAfterCursor,
    EnterVisual,
    OpenLineBelow,
    OpenLineAbove,
    EnterCommandLine,
    EnterSearch,

    // Motions
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    WordNext,
    WordEnd,
    WordPrev,
    LineStart,
    LineEnd,

    // Editing in normal mode
    Undo,
    DeleteChar,
    Paste,

    // Operators, completed by repeating the key (dd, yy, gg)
    PendingDelete,
    PendingYank,
    PendingGoto,

    // Visual mode
    DeleteSelection,
    YankSelection,

    // Insert mode
    InsertChar(char),
    InsertNewline,
    Backspace,
    OneShotNormal,

    // Command line and search prompt
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,

    // No operation (for unhandled keys)
    None,
}

impl Command {
    /// Map a key pressed in `mode` to a command.
    ///
    /// Esc is not mapped here; the editor resets on it before dispatching.
    pub fn from_key(mode: Mode, key: Key) -> Self {
        match mode {
            Mode::Normal => Self::normal(key),
            Mode::Visual => Self::visual(key),
            Mode::Insert => Self::insert(key),
            Mode::Command | Mode::Search => Self::prompt(key),
        }
    }

    fn normal(key: Key) -> Self {
        match key {
            Key::Char('i') => Self::EnterInsert,
            Key::Char('a') => Self::AppendAfterCursor,
            Key::Char('v') => Self::EnterVisual,
            Key::Char('o') => Self::OpenLineBelow,
            Key::Char('O') => Self::OpenLineAbove,
            Key::Char(':') => Self::EnterCommandLine,
            Key::Char('/') => Self::EnterSearch,
            Key::Char('h') | Key::Left => Self::MoveLeft,
            Key::Char('l') | Key::Right => Self::MoveRight,
            Key::Char('j') | Key::Down => Self::MoveDown,
            Key::Char('k') | Key::Up => Self::MoveUp,
            Key::Char('w') => Self::WordNext,
            Key::Char('e') => Self::WordEnd,
            Key::Char('b') => Self::WordPrev,
            Key::Char('0') => Self::LineStart,
            Key::Char('$') => Self::LineEnd,
            Key::Char('u') => Self::Undo,
            Key::Char('x') => Self::DeleteChar,
            Key::Char('p') => Self::Paste,
            Key::Char('d') => Self::PendingDelete,
            Key::Char('y') => Self::PendingYank,
            Key::Char('g') => Self::PendingGoto,
            _ => Self::None,
        }
    }

    fn visual(key: Key) -> Self {
        match key {
            Key::Char('h') => Self::MoveLeft,
            Key::Char('l') => Self::MoveRight,
            Key::Char('j') => Self::MoveDown,
            Key::Char('k') => Self::MoveUp,
            Key::Char('w') => Self::WordNext,
            Key::Char('d') => Self::DeleteSelection,
            Key::Char('y') => Self::YankSelection,
            _ => Self::None,
        }
    }

    fn insert(key: Key) -> Self {
        match key {
            Key::CtrlO => Self::OneShotNormal,
            Key::Backspace => Self::Backspace,
            Key::Enter => Self::InsertNewline,
            Key::Char(ch) => Self::InsertChar(ch),
            _ => Self::None,
        }
    }

    fn prompt(key: Key) -> Self {
        match key {
            Key::Enter => Self::PromptSubmit,
            Key::Backspace => Self::PromptBackspace,
            Key::Char(ch) => Self::PromptChar(ch),
            _ => Self::None,
        }
    }
}
