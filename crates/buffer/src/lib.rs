//! Gap buffer text engine for gapedit.
//!
//! Provides byte-oriented text storage with the gap kept at the cursor,
//! along with snapshot undo, line navigation, word motions, search and
//! file load/save.

mod buffer;
mod file_io;
mod history;
mod lines;
mod search;
mod word;

pub use buffer::{TextBuffer, MIN_CAPACITY};
pub use history::{History, Snapshot, DEFAULT_UNDO_DEPTH};
pub use word::{is_word_byte, CharClass};
