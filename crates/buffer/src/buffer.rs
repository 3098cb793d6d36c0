use std::fmt;

use super::History;

/// Capacity used when a buffer is created with zero capacity.
pub const MIN_CAPACITY: usize = 64;

/// Extra room reserved on growth, reload and undo restore.
pub(crate) const SLACK: usize = 64;

/// Gap buffer holding the document as raw bytes.
///
/// Live text occupies `storage[..gap_start]` and `storage[gap_end..]`.
/// The cursor is always `gap_start`.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Backing store, its length is the capacity
    storage: Vec<u8>,
    /// First byte of the gap (also the cursor)
    gap_start: usize,
    /// One past the last byte of the gap
    gap_end: usize,
    /// Snapshots for undo
    pub(crate) history: History,
}

impl TextBuffer {
    /// Create an empty buffer with the minimum capacity
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Create an empty buffer able to hold `capacity` bytes before growing.
    ///
    /// A capacity of zero is bumped to [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 { MIN_CAPACITY } else { capacity };
        Self {
            storage: vec![0; capacity],
            gap_start: 0,
            gap_end: capacity,
            history: History::new(),
        }
    }

    /// Replace the undo history with an empty one holding at most `depth` snapshots
    pub fn with_undo_capacity(mut self, depth: usize) -> Self {
        self.history = History::with_capacity(depth);
        self
    }

    /// Total allocated bytes, gap included
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Free bytes available before the next reallocation
    pub fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Number of live bytes
    pub fn len(&self) -> usize {
        self.gap_start + (self.storage.len() - self.gap_end)
    }

    /// Buffer holds no text
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current cursor position (logical byte offset)
    pub fn cursor(&self) -> usize {
        self.gap_start
    }

    /// Move the gap so the cursor sits at `pos`, clamped to `[0, len]`.
    ///
    /// Costs O(distance moved).
    pub fn move_cursor(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            // Gap moves left: [pos, gap_start) slides to end right before gap_end
            let dist = self.gap_start - pos;
            self.storage
                .copy_within(pos..self.gap_start, self.gap_end - dist);
            self.gap_start -= dist;
            self.gap_end -= dist;
        } else if pos > self.gap_start {
            // Gap moves right: [gap_end, gap_end + dist) slides down to gap_start
            let dist = pos - self.gap_start;
            self.storage
                .copy_within(self.gap_end..self.gap_end + dist, self.gap_start);
            self.gap_start += dist;
            self.gap_end += dist;
        }
    }

    /// Move the cursor by `offset` bytes, stopping at 0 on underflow
    pub fn move_cursor_relative(&mut self, offset: isize) {
        let target = self.gap_start.saturating_add_signed(offset);
        self.move_cursor(target);
    }

    /// Insert one byte at the cursor and advance past it
    pub fn insert_char(&mut self, c: u8) {
        if self.gap_start == self.gap_end {
            self.grow(1);
        }
        self.storage[self.gap_start] = c;
        self.gap_start += 1;
    }

    /// Insert text at the cursor, leaving the cursor after it
    pub fn insert_text(&mut self, text: &str) {
        self.insert_bytes(text.as_bytes());
    }

    /// Insert raw bytes at the cursor one at a time
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.insert_char(b);
        }
    }

    /// Delete the byte before the cursor.
    ///
    /// Returns `false` at position 0.
    pub fn backspace(&mut self) -> bool {
        if self.gap_start > 0 {
            self.gap_start -= 1;
            true
        } else {
            false
        }
    }

    /// Delete the byte after the cursor.
    ///
    /// Returns `false` at end of buffer.
    pub fn delete(&mut self) -> bool {
        if self.gap_end < self.storage.len() {
            self.gap_end += 1;
            true
        } else {
            false
        }
    }

    /// Delete the logical range `[start, end)`, leaving the cursor at `start`.
    ///
    /// Empty or out-of-range requests are ignored; `end` is clamped to the length.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let len = self.len();
        if start >= len {
            return;
        }
        let end = end.min(len);

        // With the gap's left edge at `end`, retracting it swallows the range
        self.move_cursor(end);
        self.gap_start -= end - start;
    }

    /// Reallocate so the gap has at least `min_extra` more bytes.
    ///
    /// Doubling keeps a run of inserts at one cursor amortized O(1).
    fn grow(&mut self, min_extra: usize) {
        let capacity = self.storage.len();
        let mut new_capacity = capacity * 2;
        if new_capacity < capacity + min_extra {
            new_capacity = capacity + min_extra + SLACK;
        }

        let suffix_len = capacity - self.gap_end;
        let new_gap_end = new_capacity - suffix_len;

        let mut storage = vec![0; new_capacity];
        storage[..self.gap_start].copy_from_slice(&self.storage[..self.gap_start]);
        storage[new_gap_end..].copy_from_slice(&self.storage[self.gap_end..]);

        log::debug!("Gap buffer grown from {} to {} bytes", capacity, new_capacity);

        self.storage = storage;
        self.gap_end = new_gap_end;
    }

    /// Byte at logical `index`, or `None` past the end
    pub fn char_at(&self, index: usize) -> Option<u8> {
        if index < self.gap_start {
            return Some(self.storage[index]);
        }
        let physical = index.checked_add(self.gap_len())?;
        self.storage.get(physical).copied()
    }

    /// Copy of the whole content with the gap removed
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(&self.storage[..self.gap_start]);
        bytes.extend_from_slice(&self.storage[self.gap_end..]);
        bytes
    }

    /// Copy of the bytes in `[start, end)`.
    ///
    /// Returns `None` when `start >= end`. Positions past the end are dropped.
    pub fn range(&self, start: usize, end: usize) -> Option<Vec<u8>> {
        if start >= end {
            return None;
        }
        let end = end.min(self.len());
        Some((start..end).filter_map(|i| self.char_at(i)).collect())
    }

    /// Number of lines (newline count + 1)
    pub fn line_count(&self) -> usize {
        let newlines = self.storage[..self.gap_start]
            .iter()
            .chain(&self.storage[self.gap_end..])
            .filter(|&&b| b == b'\n')
            .count();
        newlines + 1
    }

    /// Discard the current content and restart from `content` with the cursor at its end.
    ///
    /// The new storage has `content.len() + SLACK` bytes.
    pub(crate) fn reset_to(&mut self, content: &[u8]) {
        let capacity = content.len() + SLACK;
        let mut storage = vec![0; capacity];
        storage[..content.len()].copy_from_slice(content);
        self.storage = storage;
        self.gap_start = content.len();
        self.gap_end = capacity;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextBuffer {
    /// Lossy UTF-8 view of the content
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
