use std::path::{Path, PathBuf};

use gapedit_buffer::TextBuffer;

/// Editing context shared by every key handler.
///
/// Owned by the front-end entry point and passed by `&mut` into the editor.
#[derive(Debug)]
pub struct Session {
    /// Document being edited
    pub buffer: TextBuffer,
    /// Last yanked bytes
    pub clipboard: Option<Vec<u8>>,
    /// File used by `:w`
    pub file_path: Option<PathBuf>,
    /// Cleared by `:q`
    pub running: bool,
    /// Last status message for the front-end to show
    pub message: Option<String>,
}

impl Session {
    /// Create a running session over `buffer`
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            clipboard: None,
            file_path: None,
            running: true,
            message: None,
        }
    }

    /// Open `path`, falling back to an empty buffer when it cannot be read.
    ///
    /// The path is remembered for `:w` either way.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize, undo_depth: usize) -> Self {
        let path = path.as_ref();
        let buffer = match TextBuffer::from_file(path) {
            Ok(buffer) => buffer.with_undo_capacity(undo_depth),
            Err(e) => {
                log::warn!("Starting with an empty buffer: {:#}", e);
                TextBuffer::with_capacity(capacity).with_undo_capacity(undo_depth)
            }
        };

        let mut session = Self::new(buffer);
        session.file_path = Some(path.to_path_buf());
        session
    }

    /// Save the buffer to the remembered file
    pub(crate) fn write(&mut self) {
        let Some(path) = self.file_path.clone() else {
            self.message = Some("No file name".to_string());
            return;
        };

        self.message = Some(match self.buffer.save_to(&path) {
            Ok(()) => format!("\"{}\" {}B written", path.display(), self.buffer.len()),
            Err(e) => {
                log::error!("Save failed: {:#}", e);
                format!("{:#}", e)
            }
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TextBuffer::new())
    }
}
