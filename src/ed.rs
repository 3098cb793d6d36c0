//! Line-command interpreter in the style of `ed`.
//!
//! Commands are read one per line from any [`BufRead`]; output goes to any
//! [`Write`], so the interpreter runs the same against a terminal or a test
//! fixture.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use gapedit_buffer::TextBuffer;

/// One parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum EdCommand {
    Quit,
    /// Open a line after the current one and read input
    Append,
    /// Read input at the start of the current line
    Insert,
    Print,
    PrintAll,
    Delete,
    Undo,
    Write(Option<String>),
    Goto(usize),
    Empty,
    Unknown,
}

impl EdCommand {
    fn parse(line: &str) -> Self {
        match line {
            "" => Self::Empty,
            "q" => Self::Quit,
            "a" => Self::Append,
            "i" => Self::Insert,
            "p" => Self::Print,
            ",p" => Self::PrintAll,
            "d" => Self::Delete,
            "u" => Self::Undo,
            _ => {
                if let Some(rest) = line.strip_prefix('w') {
                    return Self::Write(rest.split_whitespace().next().map(str::to_string));
                }

                let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
                match digits.parse() {
                    Ok(row) => Self::Goto(row),
                    Err(_) => Self::Unknown,
                }
            }
        }
    }
}

/// Interpreter state: the document and where output goes
pub struct EdSession<W: Write> {
    buffer: TextBuffer,
    out: W,
}

impl<W: Write> EdSession<W> {
    pub fn new(buffer: TextBuffer, out: W) -> Self {
        Self { buffer, out }
    }

    /// Start a session, loading `path` when given.
    ///
    /// A successful load prints the byte count. A missing or unreadable
    /// file starts an empty buffer of `capacity` bytes.
    pub fn open(
        path: Option<&Path>,
        capacity: usize,
        undo_depth: usize,
        mut out: W,
    ) -> Result<Self> {
        let loaded = match path {
            Some(path) => match TextBuffer::from_file(path) {
                Ok(buffer) => {
                    writeln!(out, "{}", buffer.len())?;
                    Some(buffer)
                }
                Err(e) => {
                    log::warn!("Starting with an empty buffer: {:#}", e);
                    None
                }
            },
            None => None,
        };

        let buffer = loaded.unwrap_or_else(|| TextBuffer::with_capacity(capacity));
        Ok(Self::new(buffer.with_undo_capacity(undo_depth), out))
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Consume the session, returning the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute commands from `input` until `q` or end of input
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            let text = String::from_utf8_lossy(&line);
            let command = EdCommand::parse(text.trim_end_matches(['\r', '\n']));
            log::debug!("ed command: {:?}", command);

            if !self.execute(command, &mut input)? {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Returns `false` when the session should end
    fn execute<R: BufRead>(&mut self, command: EdCommand, input: &mut R) -> Result<bool> {
        match command {
            EdCommand::Quit => return Ok(false),
            EdCommand::Append => {
                self.buffer.move_to_line_end();
                if !self.buffer.is_empty() {
                    self.buffer.insert_char(b'\n');
                }
                self.read_input(input)?;
            }
            EdCommand::Insert => {
                self.buffer.move_to_line_start();
                self.read_input(input)?;
            }
            EdCommand::Print => self.print_line()?,
            EdCommand::PrintAll => self.print_all()?,
            EdCommand::Delete => {
                let pos = self.buffer.cursor();
                let start = self.buffer.find_line_start(pos);
                let end = self.buffer.find_line_end(pos);
                // Nothing to delete on the empty line after a trailing newline
                if start < self.buffer.len() {
                    self.buffer.save_snapshot();
                    // Range is clamped, so the last line without a newline is fine
                    self.buffer.delete_range(start, end + 1);
                }
            }
            EdCommand::Undo => {
                if !self.buffer.undo() {
                    writeln!(self.out, "?")?;
                }
            }
            EdCommand::Write(Some(name)) => match self.buffer.save_to(&name) {
                Ok(()) => writeln!(self.out, "{}", self.buffer.len())?,
                Err(e) => {
                    log::error!("Write failed: {:#}", e);
                    writeln!(self.out, "?")?;
                }
            },
            EdCommand::Write(None) | EdCommand::Unknown => writeln!(self.out, "?")?,
            EdCommand::Goto(row) => {
                self.buffer.move_cursor(0);
                // Past the last line move_down is a no-op
                for _ in 0..row.min(self.buffer.line_count()) {
                    self.buffer.move_down();
                }
                self.print_line()?;
            }
            EdCommand::Empty => {}
        }
        Ok(true)
    }

    /// Insert input lines verbatim until a lone `.`
    fn read_input<R: BufRead>(&mut self, input: &mut R) -> Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            if line == b".\n" || line == b".\r\n" || line == b"." {
                return Ok(());
            }
            self.buffer.insert_bytes(&line);
        }
    }

    fn print_line(&mut self) -> Result<()> {
        let pos = self.buffer.cursor();
        let start = self.buffer.find_line_start(pos);
        let end = self.buffer.find_line_end(pos);
        let text = self.buffer.range(start, end).unwrap_or_default();
        self.out.write_all(&text)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn print_all(&mut self) -> Result<()> {
        let text = self.buffer.to_bytes();
        self.out.write_all(&text)?;
        if text.last().is_some_and(|&b| b != b'\n') {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(initial: &str, script: &str) -> (String, String) {
        let mut buffer = TextBuffer::new();
        buffer.insert_text(initial);
        buffer.move_cursor(0);

        let mut session = EdSession::new(buffer, Vec::new());
        session.run(Cursor::new(script)).unwrap();
        let text = session.buffer().to_string();
        let output = String::from_utf8(session.into_output()).unwrap();
        (text, output)
    }

    #[test]
    fn test_parse() {
        assert_eq!(EdCommand::parse("q"), EdCommand::Quit);
        assert_eq!(EdCommand::parse(",p"), EdCommand::PrintAll);
        assert_eq!(
            EdCommand::parse("w out.txt"),
            EdCommand::Write(Some("out.txt".to_string()))
        );
        assert_eq!(EdCommand::parse("w"), EdCommand::Write(None));
        assert_eq!(EdCommand::parse("12"), EdCommand::Goto(12));
        assert_eq!(EdCommand::parse("3x"), EdCommand::Goto(3));
        assert_eq!(EdCommand::parse("zz"), EdCommand::Unknown);
        assert_eq!(EdCommand::parse(""), EdCommand::Empty);
    }

    #[test]
    fn test_append_to_empty_buffer() {
        let (text, output) = run_script("", "a\nhello\nworld\n.\n,p\nq\n");
        assert_eq!(text, "hello\nworld\n");
        assert_eq!(output, "hello\nworld\n");
    }

    #[test]
    fn test_insert_at_line_start() {
        let (text, _) = run_script("second", "i\nfirst\n.\n");
        assert_eq!(text, "first\nsecond");
    }

    #[test]
    fn test_print_current_and_goto() {
        let (_, output) = run_script("Line 1\nLine 2\nLine 3", "p\n2\n1\n9\n");
        assert_eq!(output, "Line 1\nLine 3\nLine 2\nLine 3\n");
    }

    #[test]
    fn test_print_all_adds_missing_newline() {
        let (_, output) = run_script("abc", ",p\n");
        assert_eq!(output, "abc\n");

        let (_, output) = run_script("", ",p\n");
        assert_eq!(output, "");
    }

    #[test]
    fn test_delete_and_undo() {
        let (text, output) = run_script("one\ntwo\nthree", "1\nd\n,p\nu\n,p\n");
        assert_eq!(text, "one\ntwo\nthree");
        assert_eq!(output, "two\none\nthree\none\ntwo\nthree\n");
    }

    #[test]
    fn test_delete_last_line_without_newline() {
        let (text, _) = run_script("one\ntwo", "1\nd\n");
        assert_eq!(text, "one\n");
    }

    #[test]
    fn test_goto_huge_line_number_stops_at_last_line() {
        let (_, output) = run_script("a\nb\nc", "18446744073709551615\nq\n");
        assert_eq!(output, "c\n");
    }

    #[test]
    fn test_delete_empty_line_keeps_undo_history() {
        let (text, output) = run_script("", "d\nu\n");
        assert_eq!(text, "");
        assert_eq!(output, "?\n");

        // Cursor on the empty last line after a trailing newline
        let (text, output) = run_script("one\n", "1\nd\nu\n,p\n");
        assert_eq!(text, "one\n");
        assert_eq!(output, "\n?\none\n");
    }

    #[test]
    fn test_unknown_and_empty_lines() {
        let (_, output) = run_script("x", "\nbogus\nu\n");
        assert_eq!(output, "?\n?\n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let (text, _) = run_script("", "q\na\nignored\n.\n");
        assert_eq!(text, "");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let script = format!("a\nsaved\n.\nw {}\n", path.display());
        let (_, output) = run_script("", &script);
        assert_eq!(output, "6\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "saved\n");
    }

    #[test]
    fn test_write_failure_prints_question_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        let (_, output) = run_script("x", &format!("w {}\nw\n", path.display()));
        assert_eq!(output, "?\n?\n");
    }

    #[test]
    fn test_open_existing_prints_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello\n").unwrap();

        let session = EdSession::open(Some(file.path()), 1024, 32, Vec::new()).unwrap();
        assert_eq!(session.buffer().to_string(), "hello\n");
        assert_eq!(session.into_output(), b"6\n");
    }

    #[test]
    fn test_open_missing_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let session = EdSession::open(Some(&path), 256, 8, Vec::new()).unwrap();
        assert!(session.buffer().is_empty());
        assert_eq!(session.buffer().capacity(), 256);
        assert_eq!(session.buffer().history().max_size(), 8);
        assert!(session.into_output().is_empty());
    }
}
