//! Buffered ANSI output writer with state tracking.

use crate::ansi;
use crate::cell::{Cell, CellContent};
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Buffered writer that tracks ANSI state to minimize escape sequences.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,

    // Current state for delta encoding
    current_attrs: TextAttributes,

    // Cursor position; `None` until the first absolute move
    cursor: Option<(u32, u32)>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            current_attrs: TextAttributes::empty(),
            cursor: None,
        }
    }

    /// Forget tracked state so the next writes are emitted in full.
    pub fn reset_state(&mut self) {
        self.current_attrs = TextAttributes::empty();
        self.cursor = None;
    }

    /// Forget the tracked cursor position so the next move is absolute.
    ///
    /// Needed after writing the last column of a row: the terminal holds the
    /// cursor there instead of advancing it.
    pub fn forget_cursor(&mut self) {
        self.cursor = None;
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to position, using relative moves if more efficient.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        let Some((cur_row, cur_col)) = self.cursor else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
            self.cursor = Some((row, col));
            return;
        };
        if row == cur_row && col == cur_col {
            return;
        }

        let dy = row as i32 - cur_row as i32;
        let dx = col as i32 - cur_col as i32;

        // ESC[r;cH costs 4 bytes plus the digits
        let abs_cost = 4 + digits(row + 1) + digits(col + 1);
        let rel_cost = if dy != 0 {
            3 + digits(dy.unsigned_abs())
        } else {
            0
        } + if dx != 0 {
            3 + digits(dx.unsigned_abs())
        } else {
            0
        };

        if rel_cost < abs_cost {
            let _ = ansi::write_cursor_move(&mut self.buffer, dx, dy);
        } else {
            let _ = ansi::write_cursor_position(&mut self.buffer, row, col);
        }

        self.cursor = Some((row, col));
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        let mut current = self.current_attrs;
        if !removed.is_empty() {
            let _ = ansi::write_attributes_off(&mut self.buffer, removed);
            current -= removed;
            // 22 clears bold and dim together
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                current -= TextAttributes::BOLD | TextAttributes::DIM;
            }
        }

        let to_add = attrs - current;
        if !to_add.is_empty() {
            let _ = ansi::write_attributes(&mut self.buffer, to_add);
        }

        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell) {
        self.set_attributes(cell.attributes);

        match cell.content {
            CellContent::Char(c) | CellContent::Wide(c) => {
                let mut buf = [0u8; 4];
                self.buffer.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            CellContent::Empty => self.buffer.push(b' '),
            // Drawn by the wide character to the left
            CellContent::Continuation => {}
        }

        if let Some((_, col)) = self.cursor.as_mut() {
            *col += cell.display_width() as u32;
        }
    }

    /// Write a cell at a specific position.
    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell) {
        self.move_cursor(row, col);
        self.write_cell(cell);
    }

    /// Reset all ANSI attributes.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_attrs = TextAttributes::empty();
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

/// Count decimal digits in a number.
fn digits(n: u32) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}
