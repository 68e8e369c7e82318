//! Cursor position and movement.
//!
//! The cursor is a logical [`Position`] plus the column it tries to return
//! to when moving between rows, counted from the start of its wrapped row. Horizontal moves reset that target;
//! vertical moves keep it, so passing through a short line does not lose
//! the column the cursor came from.
//!
//! Every movement takes the buffer and its [`WrapIndex`]; a move at a
//! document boundary leaves the cursor where it is.

// Movement helpers read better as explicit loops
#![allow(clippy::while_let_loop)]

use crate::text::buffer::{Position, TextBuffer};
use crate::text::wrap::WrapIndex;

/// Column a vertical move aims for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetColumn {
    /// A character offset from the start of the row.
    Column(usize),
    /// The end of whatever row is reached (after `$`).
    End,
}

impl Default for TargetColumn {
    fn default() -> Self {
        Self::Column(0)
    }
}

/// Character class used by word motions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Whitespace, and the line break at the end of every line.
    Whitespace,
    /// Alphanumerics and underscore.
    Word,
    Punctuation,
}

impl CharClass {
    /// Classify a character; `None` is a line break.
    #[must_use]
    pub fn of(ch: Option<char>) -> Self {
        match ch {
            None => Self::Whitespace,
            Some(c) if c.is_whitespace() => Self::Whitespace,
            Some(c) if c.is_alphanumeric() || c == '_' => Self::Word,
            Some(_) => Self::Punctuation,
        }
    }
}

/// Cursor position with vertical target memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    target: TargetColumn,
}

impl Cursor {
    /// Create a cursor at the start of the document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.pos.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.pos.column
    }

    /// Remembered target for vertical moves.
    #[must_use]
    pub fn target(&self) -> TargetColumn {
        self.target
    }

    /// Move to `pos` (clamped into the buffer) and remember its column.
    pub fn move_to(&mut self, buffer: &TextBuffer, wrap: &WrapIndex, pos: Position) {
        self.pos = clamp(buffer, pos);
        self.remember(wrap);
    }

    /// Pull the cursor back inside the buffer after an edit, keeping the
    /// remembered target.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.pos = clamp(buffer, self.pos);
    }

    /// Move one column left, onto the end of the previous line at column 0.
    pub fn move_left(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        if let Some(prev) = prev_position(buffer, self.pos) {
            self.move_to(buffer, wrap, prev);
        }
    }

    /// Move one column left without leaving the line.
    pub fn move_left_in_line(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        if self.pos.column > 0 {
            self.move_to(buffer, wrap, Position::new(self.pos.line, self.pos.column - 1));
        }
    }

    /// Move one column right, onto the next line past the append point.
    pub fn move_right(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        if let Some(next) = next_position(buffer, self.pos) {
            self.move_to(buffer, wrap, next);
        }
    }

    /// Move one wrapped row up.
    pub fn move_up(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let row = wrap.row_of(self.pos);
        if row > 0 {
            self.move_to_row(buffer, wrap, row - 1);
        }
    }

    /// Move one wrapped row down.
    pub fn move_down(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let row = wrap.row_of(self.pos);
        if row + 1 < wrap.row_count() {
            self.move_to_row(buffer, wrap, row + 1);
        }
    }

    /// Move to `row`, landing on the remembered target column.
    pub fn move_to_row(&mut self, buffer: &TextBuffer, wrap: &WrapIndex, row: usize) {
        let row = row.min(wrap.row_count().saturating_sub(1));
        let Some(wrap_row) = wrap.row(row) else {
            return;
        };
        let column = match self.target {
            TargetColumn::Column(offset) if offset < wrap_row.len() => wrap_row.start + offset,
            // Past the end of the row
            _ => wrap.column_at_x(buffer, row, usize::MAX),
        };
        self.pos = clamp(buffer, Position::new(wrap_row.line, column));
    }

    pub fn move_line_start(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        self.move_to(buffer, wrap, Position::new(self.pos.line, 0));
    }

    /// Move to the append point and stick to line ends on vertical moves.
    pub fn move_line_end(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let len = buffer.line_len(self.pos.line).unwrap_or(0);
        self.move_to(buffer, wrap, Position::new(self.pos.line, len));
        self.target = TargetColumn::End;
    }

    /// Move to the first non-blank character of the line.
    pub fn move_first_non_blank(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let column = first_non_blank(buffer, self.pos.line);
        self.move_to(buffer, wrap, Position::new(self.pos.line, column));
    }

    pub fn move_document_start(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        self.move_to(buffer, wrap, Position::new(0, 0));
    }

    /// Move to the first non-blank character of the last line.
    pub fn move_document_end(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let line = buffer.line_count() - 1;
        let column = first_non_blank(buffer, line);
        self.move_to(buffer, wrap, Position::new(line, column));
    }

    /// Move to the start of the next word (vim `w`).
    ///
    /// Skips the rest of the current word or punctuation run, then any
    /// whitespace and line breaks. An empty line counts as a word.
    pub fn move_word_forward(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let mut pos = self.pos;
        let start_class = class_at(buffer, pos);
        if start_class != CharClass::Whitespace {
            while class_at(buffer, pos) == start_class && char_at(buffer, pos).is_some() {
                match next_position(buffer, pos) {
                    Some(next) => pos = next,
                    None => break,
                }
            }
        }
        while class_at(buffer, pos) == CharClass::Whitespace {
            match next_position(buffer, pos) {
                Some(next) => {
                    pos = next;
                    if is_empty_line(buffer, pos) {
                        break;
                    }
                }
                None => break,
            }
        }
        if pos != self.pos {
            self.move_to(buffer, wrap, pos);
        }
    }

    /// Move to the start of the previous word (vim `b`).
    pub fn move_word_back(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let Some(mut pos) = prev_position(buffer, self.pos) else {
            return;
        };
        loop {
            if is_empty_line(buffer, pos) || class_at(buffer, pos) != CharClass::Whitespace {
                break;
            }
            match prev_position(buffer, pos) {
                Some(prev) => pos = prev,
                None => break,
            }
        }
        if !is_empty_line(buffer, pos) {
            let class = class_at(buffer, pos);
            while let Some(prev) = prev_position(buffer, pos) {
                if char_at(buffer, prev).is_some() && class_at(buffer, prev) == class {
                    pos = prev;
                } else {
                    break;
                }
            }
        }
        self.move_to(buffer, wrap, pos);
    }

    /// Move to the last character of the current or next word (vim `e`).
    pub fn move_word_end(&mut self, buffer: &TextBuffer, wrap: &WrapIndex) {
        let Some(mut pos) = next_position(buffer, self.pos) else {
            return;
        };
        while class_at(buffer, pos) == CharClass::Whitespace {
            match next_position(buffer, pos) {
                Some(next) => pos = next,
                None => break,
            }
        }
        let class = class_at(buffer, pos);
        if class != CharClass::Whitespace {
            while let Some(next) = next_position(buffer, pos) {
                if char_at(buffer, next).is_some() && class_at(buffer, next) == class {
                    pos = next;
                } else {
                    break;
                }
            }
        }
        self.move_to(buffer, wrap, pos);
    }

    fn remember(&mut self, wrap: &WrapIndex) {
        let start = wrap.row(wrap.row_of(self.pos)).map_or(0, |row| row.start);
        self.target = TargetColumn::Column(self.pos.column.saturating_sub(start));
    }
}

fn clamp(buffer: &TextBuffer, pos: Position) -> Position {
    let line = pos.line.min(buffer.line_count() - 1);
    let len = buffer.line_len(line).unwrap_or(0);
    Position::new(line, pos.column.min(len))
}

fn char_at(buffer: &TextBuffer, pos: Position) -> Option<char> {
    buffer.char_at(pos).ok().flatten()
}

fn class_at(buffer: &TextBuffer, pos: Position) -> CharClass {
    CharClass::of(char_at(buffer, pos))
}

fn is_empty_line(buffer: &TextBuffer, pos: Position) -> bool {
    pos.column == 0 && buffer.line_len(pos.line).unwrap_or(0) == 0
}

fn first_non_blank(buffer: &TextBuffer, line: usize) -> usize {
    let Ok(chars) = buffer.line_chars(line) else {
        return 0;
    };
    let mut len = 0;
    for (column, ch) in chars.enumerate() {
        if ch != ' ' && ch != '\t' {
            return column;
        }
        len = column + 1;
    }
    len
}

/// Position after `pos` in document order, crossing line breaks.
fn next_position(buffer: &TextBuffer, pos: Position) -> Option<Position> {
    let len = buffer.line_len(pos.line).ok()?;
    if pos.column < len {
        Some(Position::new(pos.line, pos.column + 1))
    } else if pos.line + 1 < buffer.line_count() {
        Some(Position::new(pos.line + 1, 0))
    } else {
        None
    }
}

/// Position before `pos` in document order; column 0 steps to the end of
/// the previous line.
fn prev_position(buffer: &TextBuffer, pos: Position) -> Option<Position> {
    if pos.column > 0 {
        Some(Position::new(pos.line, pos.column - 1))
    } else if pos.line > 0 {
        let len = buffer.line_len(pos.line - 1).ok()?;
        Some(Position::new(pos.line - 1, len))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::wrap::WrapMode;
    use crate::unicode::GlyphModel;

    fn setup(text: &str, width: usize) -> (TextBuffer, WrapIndex) {
        let buffer = TextBuffer::with_text(text);
        let wrap = WrapIndex::new(&buffer, width, GlyphModel::new(), WrapMode::Char);
        (buffer, wrap)
    }

    fn at(buffer: &TextBuffer, wrap: &WrapIndex, line: usize, column: usize) -> Cursor {
        let mut cursor = Cursor::new();
        cursor.move_to(buffer, wrap, Position::new(line, column));
        cursor
    }

    #[test]
    fn test_left_right_cross_lines() {
        let (buffer, wrap) = setup("ab\ncd", 80);
        let mut cursor = at(&buffer, &wrap, 0, 2);
        cursor.move_right(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.move_left(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 2));
    }

    #[test]
    fn test_boundaries_are_noops() {
        let (buffer, wrap) = setup("ab\ncd", 80);
        let mut cursor = Cursor::new();
        cursor.move_left(&buffer, &wrap);
        cursor.move_up(&buffer, &wrap);
        cursor.move_word_back(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 0));

        let mut cursor = at(&buffer, &wrap, 1, 2);
        cursor.move_right(&buffer, &wrap);
        cursor.move_down(&buffer, &wrap);
        cursor.move_word_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 2));
    }

    #[test]
    fn test_target_column_memory() {
        let (buffer, wrap) = setup("0123456789\nab\n0123456789", 80);
        let mut cursor = at(&buffer, &wrap, 0, 5);
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 2));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(2, 5));
        cursor.move_up(&buffer, &wrap);
        cursor.move_up(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 5));
    }

    #[test]
    fn test_horizontal_move_resets_target() {
        let (buffer, wrap) = setup("0123456789\nab\n0123456789", 80);
        let mut cursor = at(&buffer, &wrap, 0, 5);
        cursor.move_down(&buffer, &wrap);
        cursor.move_left(&buffer, &wrap);
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(2, 1));
    }

    #[test]
    fn test_vertical_moves_through_wrapped_rows() {
        let (buffer, wrap) = setup("abcdefgh\nxy", 3);
        let mut cursor = at(&buffer, &wrap, 0, 1);
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 4));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 7));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 1));
    }

    #[test]
    fn test_target_is_character_column() {
        let (buffer, wrap) = setup("\tx\nabcdefghij", 80);
        let mut cursor = at(&buffer, &wrap, 0, 1);
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 1));
        cursor.move_up(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 1));

        let (buffer, wrap) = setup("日本語x\nabcdef", 80);
        let mut cursor = at(&buffer, &wrap, 0, 3);
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 3));
    }

    #[test]
    fn test_target_counts_from_row_start() {
        // Rows: "abcd" "ef" / "0123"
        let (buffer, wrap) = setup("abcdef\n0123", 4);
        let mut cursor = at(&buffer, &wrap, 0, 5);
        assert_eq!(cursor.target(), TargetColumn::Column(1));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 1));

        // A short final row clamps to the append point
        let mut cursor = at(&buffer, &wrap, 1, 3);
        cursor.move_up(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 6));
    }

    #[test]
    fn test_line_end_is_sticky() {
        let (buffer, wrap) = setup("abc\n0123456\nxy", 80);
        let mut cursor = Cursor::new();
        cursor.move_line_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 3));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 7));
        cursor.move_down(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(2, 2));
        cursor.move_line_start(&buffer, &wrap);
        assert_eq!(cursor.target(), TargetColumn::Column(0));
    }

    #[test]
    fn test_first_non_blank_and_document_ends() {
        let (buffer, wrap) = setup("  \tfoo\nbar\n   baz", 80);
        let mut cursor = at(&buffer, &wrap, 0, 5);
        cursor.move_first_non_blank(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 3));
        cursor.move_document_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(2, 3));
        cursor.move_document_start(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 0));
    }

    #[test]
    fn test_word_forward() {
        let (buffer, wrap) = setup("foo.bar  baz\n\nqux", 80);
        let mut cursor = Cursor::new();
        let mut stops = Vec::new();
        for _ in 0..6 {
            cursor.move_word_forward(&buffer, &wrap);
            stops.push(cursor.position());
        }
        assert_eq!(
            stops,
            vec![
                Position::new(0, 3),
                Position::new(0, 4),
                Position::new(0, 9),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_word_back() {
        let (buffer, wrap) = setup("foo.bar  baz\n\nqux", 80);
        let mut cursor = at(&buffer, &wrap, 2, 2);
        let mut stops = Vec::new();
        for _ in 0..6 {
            cursor.move_word_back(&buffer, &wrap);
            stops.push(cursor.position());
        }
        assert_eq!(
            stops,
            vec![
                Position::new(2, 0),
                Position::new(1, 0),
                Position::new(0, 9),
                Position::new(0, 4),
                Position::new(0, 3),
                Position::new(0, 0),
            ]
        );
    }

    #[test]
    fn test_word_end() {
        let (buffer, wrap) = setup("foo bar\n  baz", 80);
        let mut cursor = Cursor::new();
        cursor.move_word_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 2));
        cursor.move_word_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(0, 6));
        cursor.move_word_end(&buffer, &wrap);
        assert_eq!(cursor.position(), Position::new(1, 4));
    }

    #[test]
    fn test_clamp_after_edit() {
        let (mut buffer, wrap) = setup("abcdef\nxy", 80);
        let mut cursor = at(&buffer, &wrap, 1, 2);
        buffer.delete_forward(Position::new(1, 0)).unwrap();
        buffer.delete_forward(Position::new(1, 0)).unwrap();
        buffer.delete_before(Position::new(1, 0)).unwrap();
        cursor.clamp(&buffer);
        assert_eq!(cursor.position(), Position::new(0, 2));
    }

    #[test]
    fn test_char_classes() {
        assert_eq!(CharClass::of(None), CharClass::Whitespace);
        assert_eq!(CharClass::of(Some('\t')), CharClass::Whitespace);
        assert_eq!(CharClass::of(Some('_')), CharClass::Word);
        assert_eq!(CharClass::of(Some('é')), CharClass::Word);
        assert_eq!(CharClass::of(Some('-')), CharClass::Punctuation);
    }
}
