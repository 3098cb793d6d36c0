//! Linear substring search.
//!
//! Matching is byte-for-byte and case-sensitive. Worst case is
//! O((len - query len) * query len). Searching never moves the cursor.

use super::TextBuffer;

impl TextBuffer {
    /// First occurrence of `query` at or after `start`.
    ///
    /// Returns `None` for an empty query, a start at or past the end, or no match.
    pub fn find(&self, query: impl AsRef<[u8]>, start: usize) -> Option<usize> {
        let query = query.as_ref();
        let len = self.len();
        if query.is_empty() || start >= len || query.len() > len {
            return None;
        }

        let last = len - query.len();
        (start..=last).find(|&i| {
            query
                .iter()
                .enumerate()
                .all(|(j, &b)| self.char_at(i + j) == Some(b))
        })
    }

    /// Next occurrence after the cursor, wrapping to the top once.
    ///
    /// A match under the cursor is only returned after wrapping around.
    pub fn find_next(&self, query: impl AsRef<[u8]>) -> Option<usize> {
        let query = query.as_ref();
        self.find(query, self.cursor() + 1)
            .or_else(|| self.find(query, 0))
    }
}
