//! Raw-mode ANSI terminal backend.
//!
//! [`Terminal`] reads key bytes from an input stream and decodes them with
//! [`InputParser`], and draws frames through an [`AnsiWriter`]. Frames are
//! double buffered: [`Backend::refresh`] writes only the cells that changed
//! since the last frame.

mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, terminal_size};

use crate::ansi::{AnsiWriter, sequences};
use crate::backend::Backend;
use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::input::{InputParser, KeyEvent, ParseError};
use crate::screen::Screen;
use std::io::{self, Read, Stdin, Stdout, Write};

/// Terminal state manager.
pub struct Terminal<R: Read, W: Write> {
    input: R,
    parser: InputParser,
    pending: Vec<u8>,
    writer: AnsiWriter<W>,
    front: Screen,
    back: Screen,
    cursor: (usize, usize),
    fixed_size: Option<(usize, usize)>,
    force_redraw: bool,
    alt_screen: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl Terminal<Stdin, Stdout> {
    /// Terminal over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> Terminal<R, W> {
    /// Create a terminal reading keys from `input` and drawing to `output`.
    ///
    /// The size is queried from stdout on each
    /// [`terminal_size`](Backend::terminal_size) call unless fixed with
    /// [`Terminal::with_size`].
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            parser: InputParser::new(),
            pending: Vec::new(),
            writer: AnsiWriter::new(output),
            front: Screen::new(1, 1),
            back: Screen::new(1, 1),
            cursor: (0, 0),
            fixed_size: None,
            force_redraw: true,
            alt_screen: false,
            raw_mode_guard: None,
        }
    }

    /// Pin the reported size to `(rows, cols)`.
    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.fixed_size = Some((rows, cols));
        self.front.resize(rows, cols);
        self.back.resize(rows, cols);
        self
    }

    /// Check if terminal is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Enter raw mode on stdin.
    pub fn enter_raw_mode(&mut self) -> Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    /// Exit raw mode.
    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    /// Enter alternate screen buffer and clear it.
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        if !self.alt_screen {
            self.writer.write_str(sequences::ALT_SCREEN_ON);
            self.writer.write_str(sequences::CLEAR_SCREEN);
            self.writer.flush()?;
            self.alt_screen = true;
            self.force_redraw = true;
        }
        Ok(())
    }

    /// Leave alternate screen buffer.
    pub fn leave_alt_screen(&mut self) -> Result<()> {
        if self.alt_screen {
            self.writer.write_str(sequences::ALT_SCREEN_OFF);
            self.writer.flush()?;
            self.alt_screen = false;
        }
        Ok(())
    }

    /// The frame currently shown.
    #[must_use]
    pub fn front(&self) -> &Screen {
        &self.front
    }

    /// Get the underlying writer.
    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    /// Cleanup terminal on exit.
    pub fn cleanup(&mut self) -> Result<()> {
        self.writer.reset();
        self.writer.write_str(sequences::CURSOR_SHOW);
        self.writer.flush()?;
        self.leave_alt_screen()?;
        self.exit_raw_mode();
        Ok(())
    }

    fn resize_screens(&mut self, rows: usize, cols: usize) {
        if self.back.size() != (rows.max(1), cols.max(1)) {
            self.back.resize(rows, cols);
            self.front.resize(rows, cols);
            self.force_redraw = true;
        }
    }

    /// Decode one key from the pending bytes, skipping garbage.
    fn take_key(&mut self) -> Option<KeyEvent> {
        loop {
            match self.parser.parse(&self.pending) {
                Ok((event, consumed)) => {
                    self.pending.drain(..consumed);
                    return Some(event);
                }
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    emit_log(
                        LogLevel::Debug,
                        &format!("ignoring input sequence {:?}", String::from_utf8_lossy(&seq)),
                    );
                    let skip = seq.len().clamp(1, self.pending.len());
                    self.pending.drain(..skip);
                }
                Err(ParseError::InvalidUtf8) => {
                    self.pending.drain(..1);
                }
                Err(ParseError::Empty | ParseError::Incomplete) => return None,
            }
        }
    }
}

impl<R: Read, W: Write> Backend for Terminal<R, W> {
    fn next_key_event(&mut self) -> Result<KeyEvent> {
        let mut buf = [0u8; 256];
        loop {
            if let Some(event) = self.take_key() {
                return Ok(event);
            }
            let n = match self.input.read(&mut buf) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::Terminal(err)),
            };
            if n > 0 {
                self.pending.extend_from_slice(&buf[..n]);
                continue;
            }
            // Nothing arrived before the read timeout: a held-back ESC is a key
            if let Some((event, consumed)) = self.parser.parse_stalled(&self.pending) {
                self.pending.drain(..consumed);
                return Ok(event);
            }
            // Outside raw mode a zero-byte read is end of input
            if !self.is_raw_mode() {
                return Err(Error::Terminal(io::ErrorKind::UnexpectedEof.into()));
            }
        }
    }

    fn draw_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.back.put(row, col, cell);
    }

    fn place_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }

    fn refresh(&mut self) -> Result<()> {
        self.writer.write_str(sequences::sync::BEGIN);
        self.writer.write_str(sequences::CURSOR_HIDE);
        // The terminal cursor may be anywhere after the previous frame
        self.writer.reset_state();

        let changed = if self.force_redraw {
            self.writer.write_str(sequences::CLEAR_SCREEN);
            let (rows, cols) = self.back.size();
            (0..rows)
                .flat_map(|row| (0..cols).map(move |col| (row, col)))
                .collect()
        } else {
            self.back.diff(&self.front)
        };

        let cols = self.back.size().1;
        for (row, col) in changed {
            if let Some(cell) = self.back.get(row, col) {
                if !cell.is_continuation() {
                    self.writer.write_cell_at(row as u32, col as u32, cell);
                    if col + cell.display_width() >= cols {
                        self.writer.forget_cursor();
                    }
                }
            }
        }

        self.writer.reset();
        let (row, col) = self.cursor;
        self.writer.move_cursor(row as u32, col as u32);
        self.writer.write_str(sequences::CURSOR_SHOW);
        self.writer.write_str(sequences::sync::END);
        self.writer.flush()?;

        std::mem::swap(&mut self.front, &mut self.back);
        self.back.clear();
        self.force_redraw = false;
        Ok(())
    }

    fn terminal_size(&mut self) -> Result<(usize, usize)> {
        let (rows, cols) = match self.fixed_size {
            Some(size) => size,
            None => {
                let (cols, rows) = raw::terminal_size()?;
                (usize::from(rows), usize::from(cols))
            }
        };
        self.resize_screens(rows, cols);
        Ok((rows, cols))
    }
}

impl<R: Read, W: Write> Drop for Terminal<R, W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::style::TextAttributes;

    fn terminal(input: &[u8]) -> Terminal<&[u8], Vec<u8>> {
        Terminal::new(input, Vec::new()).with_size(3, 10)
    }

    #[test]
    fn test_terminal_basic() {
        let terminal = terminal(b"");
        assert!(!terminal.alt_screen);
        assert!(!terminal.is_raw_mode());
        assert_eq!(terminal.front().size(), (3, 10));
    }

    #[test]
    fn test_terminal_alt_screen() {
        let mut terminal = terminal(b"");
        terminal.enter_alt_screen().unwrap();
        assert!(terminal.alt_screen);
        terminal.leave_alt_screen().unwrap();
        assert!(!terminal.alt_screen);
        let out = String::from_utf8_lossy(terminal.writer()).into_owned();
        assert!(out.starts_with(sequences::ALT_SCREEN_ON));
        assert!(out.ends_with(sequences::ALT_SCREEN_OFF));
    }

    #[test]
    fn test_next_key_event_decodes_stream() {
        let mut terminal = terminal(b"i\x1b[Ax\x1b");
        assert_eq!(terminal.next_key_event().unwrap(), KeyEvent::char('i'));
        assert_eq!(terminal.next_key_event().unwrap().code, KeyCode::Up);
        assert_eq!(terminal.next_key_event().unwrap(), KeyEvent::char('x'));
        // Trailing ESC with nothing after it is the Escape key
        assert_eq!(terminal.next_key_event().unwrap().code, KeyCode::Esc);
        assert!(matches!(terminal.next_key_event(), Err(Error::Terminal(_))));
    }

    #[test]
    fn test_next_key_event_skips_unknown_sequences() {
        let mut terminal = terminal(b"\x1b[99~\xffq");
        assert_eq!(terminal.next_key_event().unwrap(), KeyEvent::char('q'));
    }

    #[test]
    fn test_refresh_writes_only_changes() {
        let mut terminal = terminal(b"");
        terminal.draw_cell(0, 0, Cell::new('a', TextAttributes::empty()));
        terminal.refresh().unwrap();
        assert_eq!(terminal.front().row_text(0).trim_end(), "a");

        let before = terminal.writer().len();
        terminal.draw_cell(0, 0, Cell::new('a', TextAttributes::empty()));
        terminal.draw_cell(1, 2, Cell::new('b', TextAttributes::empty()));
        terminal.refresh().unwrap();
        let out = String::from_utf8_lossy(&terminal.writer()[before..]).into_owned();
        assert!(out.contains('b'));
        assert!(!out.contains('a'));
        assert!(!out.contains(sequences::CLEAR_SCREEN));
    }
}
