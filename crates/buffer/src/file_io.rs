//! Loading and saving whole buffers.
//!
//! Files are raw bytes: no header, no encoding detection, no newline
//! normalization on either side.

use std::path::Path;

use anyhow::{Context, Result};

use super::buffer::SLACK;
use super::{History, TextBuffer};

impl TextBuffer {
    /// Load a file into a new buffer with the cursor at the end.
    ///
    /// On error callers usually fall back to an empty buffer.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.load(path)?;
        Ok(buffer)
    }

    /// Replace the content with the file at `path`.
    ///
    /// Storage is sized to the file plus slack and filled byte by byte.
    /// Undo history is cleared. On error the buffer is left as it was.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let depth = self.history.max_size();
        *self = Self::with_capacity(contents.len() + SLACK);
        self.history = History::with_capacity(depth);
        self.insert_bytes(&contents);

        log::info!("Loaded {} bytes from {}", contents.len(), path.display());
        Ok(())
    }

    /// Write the content to `path` verbatim
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        log::info!("Saved {} bytes to {}", self.len(), path.display());
        Ok(())
    }
}
