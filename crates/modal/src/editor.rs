use std::path::PathBuf;

use gapedit_keyboard::Key;

use crate::{Command, Mode, Session};

/// Maximum length of the command line and search prompt
pub const PROMPT_LIMIT: usize = 255;

/// Operator waiting for its repeat key (`dd`, `yy`, `gg`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Yank,
    Goto,
}

/// Modal state machine.
///
/// Holds only mode bookkeeping; the document and clipboard live in the
/// [`Session`] passed to [`handle_key`](Self::handle_key).
#[derive(Debug, Clone, Default)]
pub struct ModalEditor {
    mode: Mode,
    command_line: String,
    search_line: String,
    pending: Option<Operator>,
    /// Selection anchor while in visual mode
    visual_anchor: usize,
    /// Set by Ctrl+O: return to insert mode after one normal command
    insert_return: bool,
}

impl ModalEditor {
    /// Create an editor in normal mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Text typed after `:`
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Text typed after `/`
    pub fn search_line(&self) -> &str {
        &self.search_line
    }

    /// Operator waiting for its second key
    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    /// Inclusive selection bounds while in visual mode
    pub fn selection(&self, cursor: usize) -> Option<(usize, usize)> {
        (self.mode == Mode::Visual).then(|| {
            (
                self.visual_anchor.min(cursor),
                self.visual_anchor.max(cursor),
            )
        })
    }

    /// Process one key against the session.
    ///
    /// This is the only state transition entry point.
    pub fn handle_key(&mut self, session: &mut Session, key: Key) {
        if key == Key::Esc {
            self.reset();
            return;
        }

        let command = Command::from_key(self.mode, key);
        log::debug!("{:?} in {:?}", command, self.mode);

        match self.mode {
            Mode::Normal => self.execute_normal(session, command),
            Mode::Visual => self.execute_visual(session, command),
            Mode::Insert => self.execute_insert(session, command),
            Mode::Command | Mode::Search => self.execute_prompt(session, command),
        }
    }

    /// Back to normal mode, dropping prompts and pending operators
    fn reset(&mut self) {
        self.mode = Mode::Normal;
        self.command_line.clear();
        self.search_line.clear();
        self.pending = None;
        self.insert_return = false;
    }

    fn execute_normal(&mut self, session: &mut Session, command: Command) {
        let buffer = &mut session.buffer;

        // Second key of dd, yy, gg
        let completed = match (self.pending.take(), command) {
            (Some(Operator::Delete), Command::PendingDelete) => {
                let (start, end) = current_line_span(buffer);
                buffer.save_snapshot();
                buffer.delete_range(start, end);
                true
            }
            (Some(Operator::Yank), Command::PendingYank) => {
                let (start, end) = current_line_span(buffer);
                session.clipboard = buffer.range(start, end);
                true
            }
            (Some(Operator::Goto), Command::PendingGoto) => {
                buffer.move_cursor(0);
                true
            }
            _ => false,
        };
        if completed {
            self.finish_one_shot();
            return;
        }

        match command {
            Command::PendingDelete => {
                self.pending = Some(Operator::Delete);
                return;
            }
            Command::PendingYank => {
                self.pending = Some(Operator::Yank);
                return;
            }
            Command::PendingGoto => {
                self.pending = Some(Operator::Goto);
                return;
            }
            Command::EnterInsert => self.mode = Mode::Insert,
            Command::AppendAfterCursor => {
                buffer.move_cursor(buffer.cursor() + 1);
                self.mode = Mode::Insert;
            }
            Command::EnterVisual => {
                self.mode = Mode::Visual;
                self.visual_anchor = buffer.cursor();
            }
            Command::OpenLineBelow => {
                buffer.save_snapshot();
                buffer.move_to_line_end();
                buffer.insert_char(b'\n');
                self.mode = Mode::Insert;
            }
            Command::OpenLineAbove => {
                buffer.save_snapshot();
                let start = buffer.find_line_start(buffer.cursor());
                buffer.move_cursor(start);
                buffer.insert_char(b'\n');
                buffer.move_cursor(start);
                self.mode = Mode::Insert;
            }
            Command::EnterCommandLine => {
                self.mode = Mode::Command;
                self.command_line.clear();
            }
            Command::EnterSearch => {
                self.mode = Mode::Search;
                self.search_line.clear();
            }
            Command::Undo => {
                buffer.undo();
            }
            Command::DeleteChar => {
                let pos = buffer.cursor();
                buffer.save_snapshot();
                buffer.delete_range(pos, pos + 1);
            }
            Command::Paste => {
                if let Some(text) = &session.clipboard {
                    buffer.save_snapshot();
                    buffer.insert_bytes(text);
                }
            }
            Command::None => {}
            motion => apply_motion(session, motion),
        }

        self.finish_one_shot();
    }

    fn execute_visual(&mut self, session: &mut Session, command: Command) {
        let (start, end) = match self.selection(session.buffer.cursor()) {
            Some(bounds) => bounds,
            None => return,
        };

        match command {
            Command::DeleteSelection => {
                session.buffer.save_snapshot();
                session.buffer.delete_range(start, end + 1);
                self.mode = Mode::Normal;
            }
            Command::YankSelection => {
                session.clipboard = session.buffer.range(start, end + 1);
                self.mode = Mode::Normal;
            }
            motion => apply_motion(session, motion),
        }
    }

    fn execute_insert(&mut self, session: &mut Session, command: Command) {
        let buffer = &mut session.buffer;
        match command {
            Command::OneShotNormal => {
                self.mode = Mode::Normal;
                self.insert_return = true;
            }
            Command::Backspace => {
                let pos = buffer.cursor();
                if pos > 0 {
                    buffer.delete_range(pos - 1, pos);
                }
            }
            Command::InsertNewline => {
                buffer.save_snapshot();
                buffer.insert_char(b'\n');
            }
            Command::InsertChar(ch) => {
                let mut encoded = [0; 4];
                buffer.insert_text(ch.encode_utf8(&mut encoded));
            }
            _ => {}
        }
    }

    fn execute_prompt(&mut self, session: &mut Session, command: Command) {
        let line = if self.mode == Mode::Command {
            &mut self.command_line
        } else {
            &mut self.search_line
        };

        match command {
            Command::PromptChar(ch) => {
                if line.chars().count() < PROMPT_LIMIT {
                    line.push(ch);
                }
            }
            Command::PromptBackspace => {
                line.pop();
            }
            Command::PromptSubmit => {
                if self.mode == Mode::Command {
                    run_command_line(session, &self.command_line);
                } else {
                    search(session, &self.search_line);
                }
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    /// Leave normal mode again after a Ctrl+O command
    fn finish_one_shot(&mut self) {
        if self.insert_return {
            self.insert_return = false;
            self.mode = Mode::Insert;
        }
    }
}

/// `[line start, line end + 1)` around the cursor, newline included
fn current_line_span(buffer: &gapedit_buffer::TextBuffer) -> (usize, usize) {
    let pos = buffer.cursor();
    (buffer.find_line_start(pos), buffer.find_line_end(pos) + 1)
}

fn apply_motion(session: &mut Session, command: Command) {
    let buffer = &mut session.buffer;
    match command {
        Command::MoveLeft => buffer.move_cursor_relative(-1),
        Command::MoveRight => buffer.move_cursor_relative(1),
        Command::MoveUp => buffer.move_up(),
        Command::MoveDown => buffer.move_down(),
        Command::WordNext => buffer.move_word_next(),
        Command::WordEnd => buffer.move_word_end(),
        Command::WordPrev => buffer.move_word_prev(),
        Command::LineStart => buffer.move_to_line_start(),
        Command::LineEnd => buffer.move_to_line_end(),
        _ => {}
    }
}

/// Execute a `:` command
fn run_command_line(session: &mut Session, line: &str) {
    match line {
        "q" => session.running = false,
        "w" => session.write(),
        _ => {
            if let Some(name) = line.strip_prefix("w ") {
                session.file_path = Some(PathBuf::from(name));
                session.write();
            } else {
                session.message = Some(format!("Not an editor command: {}", line));
            }
        }
    }
}

/// Jump to the next match after the cursor, wrapping once
fn search(session: &mut Session, query: &str) {
    match session.buffer.find_next(query) {
        Some(pos) => session.buffer.move_cursor(pos),
        None if !query.is_empty() => {
            session.message = Some(format!("Pattern not found: {}", query));
        }
        None => {}
    }
}
