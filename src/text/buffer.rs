//! Line-addressed document storage.
//!
//! This module provides [`TextBuffer`], a rope-backed document that is read
//! and mutated through (line, column) positions. Every mutation reports the
//! lines it replaced as a [`LineChange`] so derived layout can be patched
//! instead of rebuilt.

use crate::error::{Error, Result};
use crate::text::rope::LineRope;
use std::fmt;

/// A (line, column) position; `column` counts characters.
///
/// `column == line_len(line)` is the append point after the last character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lines replaced by a buffer mutation.
///
/// `removed` old lines starting at `start` were replaced by `inserted` new
/// lines starting at the same index. A no-op has both counts zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineChange {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl LineChange {
    /// A change confined to one line.
    #[must_use]
    pub const fn line(line: usize) -> Self {
        Self {
            start: line,
            removed: 1,
            inserted: 1,
        }
    }

    /// A change that touched nothing.
    #[must_use]
    pub const fn none(line: usize) -> Self {
        Self {
            start: line,
            removed: 0,
            inserted: 0,
        }
    }

    /// Check whether the change touched nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.removed == 0 && self.inserted == 0
    }

    /// Net change in line count.
    #[must_use]
    pub fn line_delta(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }
}

/// How the buffer's bytes were decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Valid UTF-8.
    #[default]
    Utf8,
    /// Anything else: each byte is the code point of the same value.
    Latin1,
}

/// Editable document: an ordered sequence of at least one line.
///
/// Lines never store their line feed. A document ending in a line feed has
/// an empty last line, which keeps `load` and `save` exact inverses.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: LineRope,
    encoding: Encoding,
    revision: u64,
    saved_revision: u64,
}

impl TextBuffer {
    /// Create a buffer holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a UTF-8 buffer from text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: LineRope::from_text(text),
            ..Self::default()
        }
    }

    /// Decode raw file bytes.
    ///
    /// Valid UTF-8 decodes as UTF-8; anything else decodes byte-per-char as
    /// Latin-1 so no byte is lost.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::with_text(text),
            Err(_) => {
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                Self {
                    rope: LineRope::from_text(&text),
                    encoding: Encoding::Latin1,
                    ..Self::default()
                }
            }
        }
    }

    /// Encode the document as file bytes, lines joined by LF.
    ///
    /// A Latin-1 buffer writes characters up to U+00FF as single bytes;
    /// characters typed beyond that range are written as UTF-8.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.encoding {
            Encoding::Utf8 => {
                let mut out = Vec::with_capacity(self.rope.len_chars());
                for chunk in self.rope.chunks() {
                    out.extend_from_slice(chunk.as_bytes());
                }
                out
            }
            Encoding::Latin1 => {
                let mut out = Vec::with_capacity(self.rope.len_chars());
                let mut utf8 = [0u8; 4];
                for ch in self.rope.chars() {
                    match u8::try_from(u32::from(ch)) {
                        Ok(byte) => out.push(byte),
                        Err(_) => out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes()),
                    }
                }
                out
            }
        }
    }

    /// Encoding detected when the buffer was loaded.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of lines (always at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.line_count()
    }

    /// Number of characters in `line`.
    pub fn line_len(&self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        Ok(self.rope.line_len(line))
    }

    /// Text of `line`, without its line feed.
    pub fn line_text(&self, line: usize) -> Result<String> {
        self.check_line(line)?;
        Ok(self.rope.line_slice(line).to_string())
    }

    /// Iterate over the characters of `line`.
    pub fn line_chars(&self, line: usize) -> Result<impl Iterator<Item = char> + '_> {
        self.check_line(line)?;
        Ok(self.rope.line_slice(line).chars())
    }

    /// Character at `pos`, or `None` at the append point.
    pub fn char_at(&self, pos: Position) -> Result<Option<char>> {
        self.check(pos)?;
        Ok(self.rope.char_at(pos.line, pos.column))
    }

    /// The whole document as a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.text()
    }

    /// Position after the last character of the document.
    #[must_use]
    pub fn end(&self) -> Position {
        let line = self.line_count() - 1;
        Position::new(line, self.rope.line_len(line))
    }

    /// Insert `ch` at `pos`. A line feed splits the line.
    pub fn insert_char(&mut self, pos: Position, ch: char) -> Result<LineChange> {
        if ch == '\n' {
            return self.split_line(pos);
        }
        let idx = self.char_index(pos)?;
        self.rope.insert_char(idx, ch);
        self.bump_revision();
        Ok(LineChange::line(pos.line))
    }

    /// Break the line at `pos`; the tail moves to a new line below.
    pub fn split_line(&mut self, pos: Position) -> Result<LineChange> {
        let idx = self.char_index(pos)?;
        self.rope.insert_char(idx, '\n');
        self.bump_revision();
        Ok(LineChange {
            start: pos.line,
            removed: 1,
            inserted: 2,
        })
    }

    /// Delete the character at `pos`.
    ///
    /// At column 0 of a non-first line the line is merged into the previous
    /// one instead. At the append point there is nothing to delete.
    pub fn delete_char(&mut self, pos: Position) -> Result<LineChange> {
        let idx = self.char_index(pos)?;
        if pos.column == 0 && pos.line > 0 {
            // The line feed ending the previous line
            self.rope.remove(idx - 1..idx);
            self.bump_revision();
            return Ok(LineChange {
                start: pos.line - 1,
                removed: 2,
                inserted: 1,
            });
        }
        if pos.column == self.rope.line_len(pos.line) {
            return Ok(LineChange::none(pos.line));
        }
        self.rope.remove(idx..idx + 1);
        self.bump_revision();
        Ok(LineChange::line(pos.line))
    }

    /// Delete forward from `pos` (`x` and Delete).
    ///
    /// At the append point the following line is joined onto this one; at
    /// the end of the document nothing happens.
    pub fn delete_forward(&mut self, pos: Position) -> Result<LineChange> {
        let idx = self.char_index(pos)?;
        if idx >= self.rope.len_chars() {
            return Ok(LineChange::none(pos.line));
        }
        let joins = pos.column == self.rope.line_len(pos.line);
        self.rope.remove(idx..idx + 1);
        self.bump_revision();
        Ok(if joins {
            LineChange {
                start: pos.line,
                removed: 2,
                inserted: 1,
            }
        } else {
            LineChange::line(pos.line)
        })
    }

    /// Delete the character before `pos` (Backspace).
    ///
    /// At column 0 of a non-first line the line is merged into the previous
    /// one. Returns the change and the position where the deleted character
    /// was, which is where a cursor at `pos` belongs afterwards.
    pub fn delete_before(&mut self, pos: Position) -> Result<(LineChange, Position)> {
        self.check(pos)?;
        let target = if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 0 {
            Position::new(pos.line - 1, self.rope.line_len(pos.line - 1))
        } else {
            return Ok((LineChange::none(0), pos));
        };
        let change = if pos.column > 0 {
            self.delete_char(target)?
        } else {
            self.delete_char(pos)?
        };
        Ok((change, target))
    }

    /// Get the buffer revision (increments on content changes).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check whether the buffer changed since it was loaded or last saved.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.revision != self.saved_revision
    }

    /// Record the current contents as saved.
    pub fn mark_saved(&mut self) {
        self.saved_revision = self.revision;
    }

    /// Check that `pos` addresses a valid line and a column within it.
    pub fn check(&self, pos: Position) -> Result<()> {
        self.check_line(pos.line).map_err(|_| Error::OutOfRange {
            line: pos.line,
            column: pos.column,
            line_count: self.line_count(),
            line_len: None,
        })?;
        let len = self.rope.line_len(pos.line);
        if pos.column > len {
            return Err(Error::OutOfRange {
                line: pos.line,
                column: pos.column,
                line_count: self.line_count(),
                line_len: Some(len),
            });
        }
        Ok(())
    }

    fn check_line(&self, line: usize) -> Result<()> {
        if line < self.line_count() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                line,
                column: 0,
                line_count: self.line_count(),
                line_len: None,
            })
        }
    }

    fn char_index(&self, pos: Position) -> Result<usize> {
        self.check(pos)?;
        Ok(self.rope.line_start(pos.line) + pos.column)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
