use super::TextBuffer;

/// Default number of snapshots kept for undo
pub const DEFAULT_UNDO_DEPTH: usize = 32;

/// Full copy of the buffer content taken before an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Serialized content at capture time
    content: Vec<u8>,
    /// Cursor at capture time
    cursor: usize,
}

impl Snapshot {
    /// Create a snapshot from owned content and a cursor position
    pub fn new(content: Vec<u8>, cursor: usize) -> Self {
        Self { content, cursor }
    }

    /// Captured content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Captured cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Bounded LIFO of snapshots.
///
/// When full, pushing drops the oldest entry and shifts the rest down.
/// Every snapshot is a whole-buffer copy, so push and undo are O(len).
#[derive(Debug, Clone)]
pub struct History {
    /// Oldest first, top of stack last
    undo_stack: Vec<Snapshot>,
    /// Maximum number of snapshots
    max_size: usize,
}

impl History {
    /// Create history with the default depth
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_UNDO_DEPTH)
    }

    /// Create history holding at most `max_size` snapshots (at least one)
    pub fn with_capacity(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a snapshot, evicting the oldest when full
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.undo_stack.len() >= self.max_size {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snapshot);
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.undo_stack.pop()
    }

    /// Most recent snapshot without removing it
    pub fn peek(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    /// Check if undo is possible
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    /// No snapshots held
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Maximum number of snapshots
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Record the current content and cursor for a later [`undo`](Self::undo).
    ///
    /// Never called implicitly; consumers snapshot right before edits they
    /// want to be reversible.
    pub fn save_snapshot(&mut self) {
        let snapshot = Snapshot::new(self.to_bytes(), self.cursor());
        self.history.push(snapshot);
    }

    /// Restore the most recent snapshot.
    ///
    /// Storage is reallocated to the snapshot length plus slack and the cursor
    /// is moved back to where it was. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        self.reset_to(snapshot.content());
        self.move_cursor(snapshot.cursor());
        log::debug!(
            "Undo restored {} bytes, {} snapshot(s) left",
            snapshot.content().len(),
            self.history.len()
        );
        true
    }

    /// Check if undo is possible
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Number of snapshots available for undo
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Undo history
    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new();
        history.push(Snapshot::new(b"one".to_vec(), 1));
        history.push(Snapshot::new(b"two".to_vec(), 2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().content(), b"two");
        assert_eq!(history.pop().unwrap().content(), b"one");
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut history = History::with_capacity(3);
        for i in 0..5 {
            history.push(Snapshot::new(vec![b'0' + i as u8], i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.peek().unwrap().cursor(), 4);
        let cursors: Vec<usize> = std::iter::from_fn(|| history.pop())
            .map(|s| s.cursor())
            .collect();
        assert_eq!(cursors, vec![4, 3, 2]);
    }

    #[test]
    fn test_default_depth() {
        let mut buffer = TextBuffer::new();
        for _ in 0..40 {
            buffer.insert_char(b'x');
            buffer.save_snapshot();
        }
        assert_eq!(buffer.undo_depth(), DEFAULT_UNDO_DEPTH);
    }

    #[test]
    fn test_undo_restores_content_and_cursor() {
        let mut buffer = TextBuffer::with_capacity(8);
        buffer.insert_text("hello world");
        buffer.move_cursor(5);
        buffer.save_snapshot();

        buffer.delete_range(0, 6);
        buffer.insert_text("goodbye, cruel ");
        buffer.move_cursor(0);
        assert_eq!(buffer.to_string(), "goodbye, cruel world");

        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "hello world");
        assert_eq!(buffer.cursor(), 5);
        assert_eq!(buffer.capacity(), 11 + 64);
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.insert_text("abc");
        assert!(!buffer.undo());
        assert_eq!(buffer.to_string(), "abc");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_nested_undo() {
        let mut buffer = TextBuffer::new();
        buffer.save_snapshot();
        buffer.insert_text("a");
        buffer.save_snapshot();
        buffer.insert_text("b");

        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "a");
        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut buffer = TextBuffer::new();
        buffer.insert_text("abc");
        buffer.save_snapshot();
        buffer.move_cursor(0);
        buffer.insert_text("zzz");

        assert_eq!(buffer.history().peek().unwrap().content(), b"abc");
    }

    #[test]
    fn test_custom_undo_capacity() {
        let mut buffer = TextBuffer::new().with_undo_capacity(2);
        buffer.insert_text("1");
        buffer.save_snapshot();
        buffer.insert_text("2");
        buffer.save_snapshot();
        buffer.insert_text("3");
        buffer.save_snapshot();
        buffer.insert_text("4");

        assert_eq!(buffer.undo_depth(), 2);
        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "123");
        assert!(buffer.undo());
        assert_eq!(buffer.to_string(), "12");
        assert!(!buffer.undo());
    }

    proptest! {
        #[test]
        fn prop_undo_restores_snapshot(
            initial in prop::collection::vec(any::<u8>(), 0..80),
            cursor in any::<usize>(),
            edits in prop::collection::vec(
                (any::<u8>(), any::<usize>(), prop::collection::vec(any::<u8>(), 0..8)),
                0..20,
            ),
        ) {
            let mut buffer = TextBuffer::with_capacity(0);
            buffer.insert_bytes(&initial);
            buffer.move_cursor(cursor % (initial.len() + 1));

            let content = buffer.to_bytes();
            let cursor = buffer.cursor();
            buffer.save_snapshot();

            for (selector, pos, payload) in edits {
                let pos = pos % (buffer.len() + 1);
                match selector % 3 {
                    0 => {
                        buffer.move_cursor(pos);
                        buffer.insert_bytes(&payload);
                    }
                    1 => {
                        buffer.move_cursor(pos);
                        buffer.backspace();
                    }
                    _ => buffer.delete_range(pos, pos + payload.len()),
                }
            }

            prop_assert!(buffer.undo());
            prop_assert_eq!(buffer.to_bytes(), content);
            prop_assert_eq!(buffer.cursor(), cursor);
            prop_assert!(!buffer.can_undo());
        }
    }
}
