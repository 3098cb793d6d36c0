//! Word motions driven by byte classes.
//!
//! Classification is ASCII only: any byte outside the word and whitespace
//! sets counts as punctuation.

use super::TextBuffer;

/// Character class used to find word boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Space, tab, newline, carriage return
    Whitespace,
    /// ASCII letters, digits and underscore
    Word,
    /// Everything else
    Punctuation,
}

impl CharClass {
    /// Classify a single byte
    pub fn of(b: u8) -> Self {
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => CharClass::Whitespace,
            b if is_word_byte(b) => CharClass::Word,
            _ => CharClass::Punctuation,
        }
    }
}

/// Check if byte belongs to a word (letter, digit or underscore)
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl TextBuffer {
    /// Class of the byte at `pos`; past the end counts as punctuation
    fn class_at(&self, pos: usize) -> CharClass {
        self.char_at(pos)
            .map(CharClass::of)
            .unwrap_or(CharClass::Punctuation)
    }

    /// Move to the start of the next word or punctuation run (vi `w`)
    pub fn move_word_next(&mut self) {
        let len = self.len();
        let mut pos = self.cursor();
        if pos >= len {
            return;
        }

        let class = self.class_at(pos);
        while pos < len && self.class_at(pos) == class {
            pos += 1;
        }
        while pos < len && self.class_at(pos) == CharClass::Whitespace {
            pos += 1;
        }

        self.move_cursor(pos);
    }

    /// Move to the last character of the current or next run (vi `e`)
    pub fn move_word_end(&mut self) {
        let len = self.len();
        let mut pos = self.cursor();
        if pos + 1 >= len {
            return;
        }

        pos += 1;
        while pos < len && self.class_at(pos) == CharClass::Whitespace {
            pos += 1;
        }
        if pos >= len {
            return;
        }

        let class = self.class_at(pos);
        while pos + 1 < len && self.class_at(pos + 1) == class {
            pos += 1;
        }

        self.move_cursor(pos);
    }

    /// Move to the first character of the previous run (vi `b`)
    pub fn move_word_prev(&mut self) {
        let mut pos = self.cursor();
        if pos == 0 {
            return;
        }

        pos -= 1;
        while pos > 0 && self.class_at(pos) == CharClass::Whitespace {
            pos -= 1;
        }

        let class = self.class_at(pos);
        while pos > 0 && self.class_at(pos - 1) == class {
            pos -= 1;
        }

        self.move_cursor(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_at(text: &str, pos: usize) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        buffer.insert_text(text);
        buffer.move_cursor(pos);
        buffer
    }

    #[test]
    fn test_char_class() {
        assert_eq!(CharClass::of(b' '), CharClass::Whitespace);
        assert_eq!(CharClass::of(b'\r'), CharClass::Whitespace);
        assert_eq!(CharClass::of(b'z'), CharClass::Word);
        assert_eq!(CharClass::of(b'7'), CharClass::Word);
        assert_eq!(CharClass::of(b'_'), CharClass::Word);
        assert_eq!(CharClass::of(b'.'), CharClass::Punctuation);
        assert_eq!(CharClass::of(0xc3), CharClass::Punctuation);
    }

    #[test]
    fn test_word_next() {
        let mut buffer = buffer_at("foo.bar  baz", 0);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 3);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 4);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 9);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 12);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 12);
    }

    #[test]
    fn test_word_next_from_whitespace() {
        let mut buffer = buffer_at("a   b", 1);
        buffer.move_word_next();
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_word_end() {
        let mut buffer = buffer_at("foo bar, baz", 0);
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 2);
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 6);
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 7);
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 11);
        // Within one byte of the end
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 11);
    }

    #[test]
    fn test_word_end_trailing_whitespace() {
        let mut buffer = buffer_at("ab   ", 1);
        buffer.move_word_end();
        assert_eq!(buffer.cursor(), 1);

        let mut empty = TextBuffer::new();
        empty.move_word_end();
        assert_eq!(empty.cursor(), 0);
    }

    #[test]
    fn test_word_prev() {
        let mut buffer = buffer_at("foo bar, baz", 12);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 9);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 7);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 4);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_word_prev_across_lines() {
        let mut buffer = buffer_at("one\n\n  two", 7);
        buffer.move_word_prev();
        assert_eq!(buffer.cursor(), 0);
    }
}
