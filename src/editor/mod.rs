//! The modal editor: key dispatch, ordered command application and frames.
//!
//! An [`Editor`] owns one document together with its wrap index, cursor and
//! viewport. Every key becomes at most one [`Command`], applied as a single
//! step in a fixed order:
//!
//! 1. buffer mutation (if the command edits)
//! 2. wrap-index update for the changed lines
//! 3. cursor update
//! 4. viewport scroll so the cursor row is visible
//!
//! # Examples
//!
//! ```
//! use vedit::editor::{Editor, Mode};
//! use vedit::input::KeyEvent;
//! use vedit::EditorOptions;
//!
//! let mut editor = Editor::new(EditorOptions::default(), 10, 40).with_text("ab\ncd");
//! for key in ['j', 'i', 'X'] {
//!     editor.handle_key(KeyEvent::char(key));
//! }
//! assert_eq!(editor.mode(), Mode::Insert);
//! assert_eq!(editor.buffer().text(), "ab\nXcd");
//! ```

mod frame;
mod keymap;

pub use frame::{Frame, FrameRow};
pub use keymap::{Command, Keymap, Mode};

use crate::backend::Backend;
use crate::cell::Cell;
use crate::config::EditorOptions;
use crate::error::{Error, IoFailure, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::input::KeyEvent;
use crate::io::{read_file, write_file};
use crate::style::TextAttributes;
use crate::text::{Cursor, Encoding, LineChange, Position, TextBuffer, Viewport, WrapIndex};
use std::path::{Path, PathBuf};

/// A single-document modal editor.
pub struct Editor {
    buffer: TextBuffer,
    wrap: WrapIndex,
    cursor: Cursor,
    viewport: Viewport,
    mode: Mode,
    keymap: Keymap,
    options: EditorOptions,
    path: Option<PathBuf>,
    message: String,
    should_quit: bool,
    /// Terminal size as `(rows, cols)`.
    size: (usize, usize),
}

impl Editor {
    /// Create an editor with an empty document for a `rows` x `cols`
    /// terminal.
    #[must_use]
    pub fn new(options: EditorOptions, rows: usize, cols: usize) -> Self {
        let buffer = TextBuffer::new();
        let (text_rows, text_cols) = layout(&options, &buffer, (rows, cols));
        let wrap = WrapIndex::new(&buffer, text_cols, options.glyph_model(), options.wrap_mode);
        Self {
            buffer,
            wrap,
            cursor: Cursor::new(),
            viewport: Viewport::new(text_cols, text_rows),
            mode: Mode::Normal,
            keymap: Keymap::new(),
            options,
            path: None,
            message: String::new(),
            should_quit: false,
            size: (rows, cols),
        }
    }

    /// Replace the document with `text`, unbound to any file.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.load(TextBuffer::with_text(text), None);
        self
    }

    /// Replace the key bindings.
    #[must_use]
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Open `path`, replacing the current document.
    ///
    /// A path that does not exist starts an empty document bound to it. Any
    /// other read failure leaves the editor untouched and is reported on the
    /// status line as well as returned.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let buffer = match read_file(path) {
            Ok(bytes) => TextBuffer::from_bytes(&bytes),
            Err(err) if err.io_failure() == Some(IoFailure::NotFound) => {
                self.load(TextBuffer::new(), Some(path.to_path_buf()));
                self.message = format!("\"{}\" [New File]", path.display());
                emit_event("open", &path.display().to_string());
                return Ok(());
            }
            Err(err) => {
                self.message = format!(
                    "Failed to read file '{}': {}",
                    path.display(),
                    failure_reason(&err)
                );
                emit_log(LogLevel::Warn, &self.message);
                return Err(err);
            }
        };

        let encoding = buffer.encoding();
        self.load(buffer, Some(path.to_path_buf()));
        self.message = format!("\"{}\" {}L", path.display(), self.buffer.line_count());
        if encoding == Encoding::Latin1 {
            self.message.push_str(" [latin-1]");
        }
        emit_log(
            LogLevel::Debug,
            &format!(
                "opened {} ({} lines, {encoding:?})",
                path.display(),
                self.buffer.line_count()
            ),
        );
        emit_event("open", &path.display().to_string());
        Ok(())
    }

    /// Write the document to its file.
    ///
    /// Without a bound path nothing is written and the status line says so.
    /// Failures leave the buffer untouched and are reported on the status
    /// line as well as returned; nothing is retried.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            self.message = "Can't write file without filename.".to_string();
            return Ok(());
        };

        let bytes = self.buffer.to_bytes();
        if let Err(err) = write_file(&path, &bytes) {
            self.message = format!(
                "Failed to write file '{}': {}",
                path.display(),
                failure_reason(&err)
            );
            emit_log(LogLevel::Warn, &self.message);
            return Err(err);
        }

        self.buffer.mark_saved();
        self.message = format!(
            "\"{}\" {}L, {}B written",
            path.display(),
            self.buffer.line_count(),
            bytes.len()
        );
        emit_log(
            LogLevel::Debug,
            &format!("saved {} ({} bytes)", path.display(), bytes.len()),
        );
        emit_event("save", &path.display().to_string());
        Ok(())
    }

    /// Translate one key through the current mode's table and apply it.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message.clear();
        match self.keymap.lookup(self.mode, key) {
            Some(command) => self.apply(command),
            None if self.mode == Mode::Normal => {
                self.message = format!("Unknown key: {}", key.describe());
            }
            None => {}
        }
    }

    /// Apply one command: buffer, then wrap index, then cursor, then
    /// viewport.
    pub fn apply(&mut self, command: Command) {
        if let Err(err) = self.execute(command) {
            emit_log(
                LogLevel::Error,
                &format!("{command:?} at {} failed: {err}", self.cursor.position()),
            );
        }
        self.cursor.clamp(&self.buffer);
        self.scroll_to_cursor();
    }

    /// Adapt to a new terminal size.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if self.size == (rows, cols) {
            return;
        }
        self.size = (rows, cols);
        self.sync_layout();
        self.scroll_to_cursor();
    }

    /// Snapshot of the screen for the current state.
    #[must_use]
    pub fn render(&self) -> Frame {
        let gutter_width = self.gutter_width();
        let text_width = self.wrap.width();

        let rows = self
            .viewport
            .rows()
            .map(|row| match self.wrap.row(row) {
                Some(wrap_row) => {
                    let gutter = if gutter_width == 0 {
                        String::new()
                    } else if wrap_row.is_continuation {
                        " ".repeat(gutter_width)
                    } else {
                        format!("{:>gutter_width$}", format!("{} ", wrap_row.line + 1))
                    };
                    FrameRow {
                        gutter,
                        cells: self.row_cells(row, text_width),
                    }
                }
                None => FrameRow::filler(gutter_width),
            })
            .collect();

        let pos = self.cursor.position();
        let left = if self.message.is_empty() {
            self.mode.to_string()
        } else {
            format!("{} {}", self.mode, self.message)
        };
        let right = format!("LN {}:{}", pos.line + 1, pos.column + 1);
        let status = Frame::status_line(&left, &right, self.size.1);

        let cursor_row = self.wrap.row_of(pos).saturating_sub(self.viewport.top());
        let x = self.wrap.x_of(&self.buffer, pos).min(text_width - 1);

        Frame {
            width: self.size.1,
            rows,
            status,
            cursor: (cursor_row, gutter_width + x),
        }
    }

    /// Draw the current state through `backend`.
    pub fn paint(&self, backend: &mut impl Backend) -> Result<()> {
        self.render().paint(backend)
    }

    /// Run the read, process, render loop until the user quits.
    pub fn run(&mut self, backend: &mut impl Backend) -> Result<()> {
        let (rows, cols) = backend.terminal_size()?;
        self.resize(rows, cols);
        self.paint(backend)?;
        while !self.should_quit {
            let key = backend.next_key_event()?;
            self.handle_key(key);
            let (rows, cols) = backend.terminal_size()?;
            self.resize(rows, cols);
            self.paint(backend)?;
        }
        emit_log(LogLevel::Debug, "editor loop finished");
        Ok(())
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn wrap(&self) -> &WrapIndex {
        &self.wrap
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Cursor position in the document.
    #[must_use]
    pub fn cursor(&self) -> Position {
        self.cursor.position()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Transient status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// File the document is bound to.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        let pos = self.cursor.position();
        let (buffer, wrap) = (&self.buffer, &self.wrap);
        match command {
            Command::MoveLeft => self.cursor.move_left(buffer, wrap),
            Command::MoveRight => self.cursor.move_right(buffer, wrap),
            Command::MoveUp => self.cursor.move_up(buffer, wrap),
            Command::MoveDown => self.cursor.move_down(buffer, wrap),
            Command::LineStart => self.cursor.move_line_start(buffer, wrap),
            Command::FirstNonBlank => self.cursor.move_first_non_blank(buffer, wrap),
            Command::LineEnd => self.cursor.move_line_end(buffer, wrap),
            Command::WordForward => self.cursor.move_word_forward(buffer, wrap),
            Command::WordBack => self.cursor.move_word_back(buffer, wrap),
            Command::WordEnd => self.cursor.move_word_end(buffer, wrap),
            Command::DocumentStart => self.cursor.move_document_start(buffer, wrap),
            Command::DocumentEnd => self.cursor.move_document_end(buffer, wrap),
            Command::PageDown => self.page_down(),
            Command::PageUp => self.page_up(),
            Command::InsertBefore => self.set_mode(Mode::Insert),
            Command::Append => {
                let len = self.buffer.line_len(pos.line)?;
                let target = Position::new(pos.line, (pos.column + 1).min(len));
                self.cursor.move_to(&self.buffer, &self.wrap, target);
                self.set_mode(Mode::Insert);
            }
            Command::AppendLineEnd => {
                self.cursor.move_line_end(buffer, wrap);
                self.set_mode(Mode::Insert);
            }
            Command::InsertLineStart => {
                self.cursor.move_first_non_blank(buffer, wrap);
                self.set_mode(Mode::Insert);
            }
            Command::OpenBelow => {
                let end = Position::new(pos.line, self.buffer.line_len(pos.line)?);
                let change = self.buffer.split_line(end)?;
                self.after_edit(change);
                self.cursor
                    .move_to(&self.buffer, &self.wrap, Position::new(pos.line + 1, 0));
                self.set_mode(Mode::Insert);
            }
            Command::OpenAbove => {
                let change = self.buffer.split_line(Position::new(pos.line, 0))?;
                self.after_edit(change);
                self.cursor
                    .move_to(&self.buffer, &self.wrap, Position::new(pos.line, 0));
                self.set_mode(Mode::Insert);
            }
            Command::ExitInsert => {
                self.cursor.move_left_in_line(buffer, wrap);
                self.set_mode(Mode::Normal);
            }
            Command::InsertChar('\n') | Command::NewLine => {
                let change = self.buffer.split_line(pos)?;
                self.after_edit(change);
                self.cursor
                    .move_to(&self.buffer, &self.wrap, Position::new(pos.line + 1, 0));
            }
            Command::InsertChar(ch) => {
                let change = self.buffer.insert_char(pos, ch)?;
                self.after_edit(change);
                self.cursor.move_to(
                    &self.buffer,
                    &self.wrap,
                    Position::new(pos.line, pos.column + 1),
                );
            }
            Command::Backspace => {
                let (change, joined) = self.buffer.delete_before(pos)?;
                self.after_edit(change);
                self.cursor.move_to(&self.buffer, &self.wrap, joined);
            }
            Command::DeleteChar => {
                let change = self.buffer.delete_forward(pos)?;
                self.after_edit(change);
                self.cursor.clamp(&self.buffer);
            }
            Command::Save => {
                // Already reported on the status line
                let _ = self.save();
            }
            Command::Quit => {
                if self.buffer.is_modified() {
                    self.message =
                        "No write since last change (press Q to quit anyway)".to_string();
                } else {
                    self.should_quit = true;
                }
            }
            Command::ForceQuit => self.should_quit = true,
        }
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            emit_log(LogLevel::Debug, &format!("mode -> {mode}"));
            emit_event("mode", mode.name());
        }
    }

    /// Re-wrap the changed lines, then re-fit the layout (the gutter grows
    /// with the line count).
    fn after_edit(&mut self, change: LineChange) {
        self.wrap.apply(&self.buffer, change);
        self.sync_layout();
    }

    fn page_down(&mut self) {
        self.viewport.page_down(self.wrap.row_count());
        let row = self.wrap.row_of(self.cursor.position());
        if !self.viewport.contains(row) {
            self.cursor
                .move_to_row(&self.buffer, &self.wrap, self.viewport.top());
        }
    }

    fn page_up(&mut self) {
        self.viewport.page_up();
        let row = self.wrap.row_of(self.cursor.position());
        if !self.viewport.contains(row) {
            let bottom = self.viewport.rows().end - 1;
            self.cursor.move_to_row(&self.buffer, &self.wrap, bottom);
        }
    }

    fn scroll_to_cursor(&mut self) {
        self.viewport.clamp_to(self.wrap.row_count());
        self.viewport
            .scroll_to_row(self.wrap.row_of(self.cursor.position()));
    }

    /// Resize the viewport and re-wrap everything if the text width moved.
    fn sync_layout(&mut self) {
        let (text_rows, text_cols) = layout(&self.options, &self.buffer, self.size);
        self.viewport.set_size(text_cols, text_rows);
        if self.wrap.width() != text_cols {
            self.wrap.set_width(&self.buffer, text_cols);
        }
    }

    fn load(&mut self, buffer: TextBuffer, path: Option<PathBuf>) {
        self.buffer = buffer;
        self.path = path;
        let (text_rows, text_cols) = layout(&self.options, &self.buffer, self.size);
        self.wrap = WrapIndex::new(
            &self.buffer,
            text_cols,
            self.options.glyph_model(),
            self.options.wrap_mode,
        );
        self.viewport = Viewport::new(text_cols, text_rows);
        self.cursor = Cursor::new();
        self.mode = Mode::Normal;
        self.should_quit = false;
    }

    fn gutter_width(&self) -> usize {
        gutter_width(&self.options, &self.buffer)
    }

    fn row_cells(&self, row: usize, text_width: usize) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .wrap
            .row_glyphs(&self.buffer, row)
            .into_iter()
            .flat_map(|glyph| {
                let attributes = if glyph.form.is_substitute() {
                    TextAttributes::SUBSTITUTE
                } else {
                    TextAttributes::empty()
                };
                let glyphs = glyph.form.cells();
                glyphs
                    .iter()
                    .enumerate()
                    .map(|(i, &cell)| {
                        let wide = glyphs.get(i + 1) == Some(&None);
                        Cell::from_glyph(cell, wide, attributes)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        // A glyph wider than the whole row is cut at the edge
        cells.truncate(text_width);
        cells
    }
}

/// Gutter columns: `max(3, digits(line_count)) + 1`, or 0 when disabled.
fn gutter_width(options: &EditorOptions, buffer: &TextBuffer) -> usize {
    if options.line_numbers {
        buffer.line_count().to_string().len().max(3) + 1
    } else {
        0
    }
}

/// Text area as `(rows, cols)` for a terminal of `size`; one row is the
/// status line.
fn layout(options: &EditorOptions, buffer: &TextBuffer, size: (usize, usize)) -> (usize, usize) {
    let (rows, cols) = size;
    let text_rows = rows.saturating_sub(1).max(1);
    let text_cols = cols.saturating_sub(gutter_width(options, buffer)).max(1);
    (text_rows, text_cols)
}

fn failure_reason(err: &Error) -> String {
    match err {
        Error::Io {
            kind: IoFailure::Other,
            source,
            ..
        } => source.to_string(),
        Error::Io { kind, .. } => kind.describe().to_string(),
        other => other.to_string(),
    }
}
