//! Line boundaries and row/column resolution.
//!
//! There is no line table: every query scans the buffer, so `row_col` is
//! O(pos) and the boundary searches are O(distance to the nearest newline).

use super::TextBuffer;

impl TextBuffer {
    /// Start of the line containing `pos` (index right after the previous newline)
    pub fn find_line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        (1..=pos)
            .rev()
            .find(|&i| self.char_at(i - 1) == Some(b'\n'))
            .unwrap_or(0)
    }

    /// End of the line containing `pos` (index of its newline, or the buffer length)
    pub fn find_line_end(&self, pos: usize) -> usize {
        let len = self.len();
        (pos..len)
            .find(|&i| self.char_at(i) == Some(b'\n'))
            .unwrap_or(len)
    }

    /// Zero-based `(row, column)` of `pos`
    pub fn row_col(&self, pos: usize) -> (usize, usize) {
        let mut row = 0;
        let mut last_line_start = 0;
        for i in 0..pos {
            if self.char_at(i) == Some(b'\n') {
                row += 1;
                last_line_start = i + 1;
            }
        }
        (row, pos - last_line_start)
    }

    /// Row and column of the cursor
    pub fn cursor_row_col(&self) -> (usize, usize) {
        self.row_col(self.cursor())
    }

    /// Move cursor to the start of the current line
    pub fn move_to_line_start(&mut self) {
        let start = self.find_line_start(self.cursor());
        self.move_cursor(start);
    }

    /// Move cursor to the end of the current line
    pub fn move_to_line_end(&mut self) {
        let end = self.find_line_end(self.cursor());
        self.move_cursor(end);
    }

    /// Move cursor one line up, clamping the column to the shorter line.
    ///
    /// No-op on the first line.
    pub fn move_up(&mut self) {
        let pos = self.cursor();
        let (row, col) = self.row_col(pos);
        if row == 0 {
            return;
        }

        let line_start = self.find_line_start(pos);
        let prev_line_end = line_start - 1;
        let prev_line_start = self.find_line_start(prev_line_end);
        let prev_line_len = prev_line_end - prev_line_start;

        self.move_cursor(prev_line_start + col.min(prev_line_len));
    }

    /// Move cursor one line down, clamping the column to the shorter line.
    ///
    /// No-op on the last line.
    pub fn move_down(&mut self) {
        let pos = self.cursor();
        let (_, col) = self.row_col(pos);

        let line_end = self.find_line_end(pos);
        if line_end >= self.len() {
            return;
        }

        let next_line_start = line_end + 1;
        let next_line_len = self.find_line_end(next_line_start) - next_line_start;

        self.move_cursor(next_line_start + col.min(next_line_len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_lines() -> TextBuffer {
        let mut buffer = TextBuffer::with_capacity(10);
        buffer.insert_text("Line 1\nLine 2\nLine 3");
        buffer
    }

    #[test]
    fn test_navigation_scenario() {
        let mut buffer = three_lines();
        assert_eq!(buffer.cursor(), 20);

        buffer.move_up();
        assert_eq!(buffer.cursor_row_col(), (1, 6));

        buffer.move_up();
        assert_eq!(buffer.cursor_row_col(), (0, 6));

        buffer.move_to_line_start();
        assert_eq!(buffer.cursor_row_col().1, 0);

        buffer.move_down();
        assert_eq!(buffer.cursor_row_col(), (1, 0));

        buffer.move_to_line_end();
        assert_eq!(buffer.cursor_row_col().1, 6);
    }

    #[test]
    fn test_line_boundaries() {
        let buffer = three_lines();
        assert_eq!(buffer.find_line_start(0), 0);
        assert_eq!(buffer.find_line_start(9), 7);
        assert_eq!(buffer.find_line_start(7), 7);
        assert_eq!(buffer.find_line_start(100), 14);

        assert_eq!(buffer.find_line_end(0), 6);
        assert_eq!(buffer.find_line_end(6), 6);
        assert_eq!(buffer.find_line_end(15), 20);
    }

    #[test]
    fn test_row_col() {
        let buffer = three_lines();
        assert_eq!(buffer.row_col(0), (0, 0));
        assert_eq!(buffer.row_col(6), (0, 6));
        assert_eq!(buffer.row_col(7), (1, 0));
        assert_eq!(buffer.row_col(20), (2, 6));
    }

    #[test]
    fn test_edges_are_noops() {
        let mut buffer = three_lines();
        buffer.move_down();
        assert_eq!(buffer.cursor(), 20);

        buffer.move_cursor(3);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_column_clamps_to_shorter_line() {
        let mut buffer = TextBuffer::new();
        buffer.insert_text("long line here\nab\nanother long line");
        buffer.move_cursor(buffer.len());

        buffer.move_up();
        assert_eq!(buffer.cursor_row_col(), (1, 2));

        // Column is not remembered across moves
        buffer.move_up();
        assert_eq!(buffer.cursor_row_col(), (0, 2));
    }

    #[test]
    fn test_empty_lines() {
        let mut buffer = TextBuffer::new();
        buffer.insert_text("a\n\nb");
        buffer.move_cursor(0);

        buffer.move_down();
        assert_eq!(buffer.cursor(), 2);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 3);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_trailing_newline_last_line() {
        let mut buffer = TextBuffer::new();
        buffer.insert_text("abc\n");
        buffer.move_cursor(1);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 4);
        assert_eq!(buffer.cursor_row_col(), (1, 0));
    }
}
