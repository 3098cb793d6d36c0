//! Headless vi-style modal dispatcher for gapedit.
//!
//! Keys are first mapped to a [`Command`] for the current [`Mode`], then
//! [`ModalEditor::handle_key`] applies the command to an explicit
//! [`Session`]. Nothing here draws to a terminal.

mod command;
mod editor;
mod mode;
mod session;

pub use command::Command;
pub use editor::{ModalEditor, Operator, PROMPT_LIMIT};
pub use gapedit_keyboard::Key;
pub use mode::Mode;
pub use session::Session;
