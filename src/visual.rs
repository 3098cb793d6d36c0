//! Full-screen front-end driving the modal editor.
//!
//! Drawing is ratatui over crossterm; every key goes through
//! [`ModalEditor::handle_key`] against one [`Session`].

use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame, Terminal,
};

use gapedit_buffer::TextBuffer;
use gapedit_keyboard::Key;
use gapedit_modal::{ModalEditor, Mode, Session};

/// Editor state plus the first visible row
struct Screen {
    editor: ModalEditor,
    session: Session,
    top: usize,
}

impl Screen {
    fn new(session: Session) -> Self {
        Self {
            editor: ModalEditor::new(),
            session,
            top: 0,
        }
    }

    fn handle_key(&mut self, key: Key) {
        self.session.message = None;
        self.editor.handle_key(&mut self.session, key);
    }

    fn render(&mut self, frame: &mut Frame) {
        let [text_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let (row, col) = cursor_cell(&self.session.buffer);
        self.top = scroll_top(self.top, row, usize::from(text_area.height));

        let text = Paragraph::new(self.session.buffer.to_string())
            .scroll((clamp_u16(self.top), 0));
        frame.render_widget(text, text_area);

        let status = Paragraph::new(status_line(&self.editor, &self.session))
            .style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(status, status_area);

        if self.editor.mode().is_prompt() {
            let prompt_len = status_line(&self.editor, &self.session).chars().count();
            frame.set_cursor_position((status_area.x + clamp_u16(prompt_len), status_area.y));
        } else {
            frame.set_cursor_position((
                text_area.x + clamp_u16(col),
                text_area.y + clamp_u16(row - self.top),
            ));
        }
    }
}

/// Run the full-screen editor on `path` until `:q`
pub fn run(path: Option<&Path>, capacity: usize, undo_depth: usize) -> Result<()> {
    let session = match path {
        Some(path) => Session::open(path, capacity, undo_depth),
        None => Session::new(TextBuffer::with_capacity(capacity).with_undo_capacity(undo_depth)),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, Screen::new(session));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut screen: Screen) -> Result<()> {
    while screen.session.running {
        terminal.draw(|frame| screen.render(frame))?;

        if let Event::Key(event) = event::read()? {
            if let Some(key) = Key::from_event(&event) {
                screen.handle_key(key);
            }
        }
    }
    Ok(())
}

/// Bottom line: the prompt while typing one, otherwise mode and message
fn status_line(editor: &ModalEditor, session: &Session) -> String {
    match editor.mode() {
        Mode::Command => format!(":{}", editor.command_line()),
        Mode::Search => format!("/{}", editor.search_line()),
        mode => {
            let (row, col) = session.buffer.cursor_row_col();
            let mut line = format!("{} {}:{}", mode.label(), row + 1, col + 1);
            if let Some(message) = &session.message {
                line.push_str("  ");
                line.push_str(message);
            }
            line
        }
    }
}

/// Screen row and character column of the cursor
fn cursor_cell(buffer: &TextBuffer) -> (usize, usize) {
    let pos = buffer.cursor();
    let (row, _) = buffer.row_col(pos);
    let start = buffer.find_line_start(pos);
    let before = buffer.range(start, pos).unwrap_or_default();
    (row, String::from_utf8_lossy(&before).chars().count())
}

/// Smallest change to `top` that keeps `row` inside a window of `height` rows
fn scroll_top(top: usize, row: usize, height: usize) -> usize {
    let height = height.max(1);
    if row < top {
        row
    } else if row >= top + height {
        row + 1 - height
    } else {
        top
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
