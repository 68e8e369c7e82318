//! Line-addressed rope using the ropey crate.
//!
//! ropey is built without its `unicode_lines` and `cr_lines` features, so LF
//! is the only line break: a CR or a U+2028 inside a line stays part of that
//! line's text.

use ropey::{Rope, RopeSlice};

/// Wrapper around `ropey::Rope` that speaks in (line, column) terms.
///
/// A rope holding `n` line feeds has `n + 1` lines; the last line never ends
/// with a line feed and may be empty.
#[derive(Clone, Debug, Default)]
pub struct LineRope {
    rope: Rope,
}

impl LineRope {
    /// Create a rope holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of characters, line feeds included.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines (always at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Char index of the first character of `line`.
    ///
    /// Lines past the end map to the end of the rope.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.line_count() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line)
        }
    }

    /// Number of characters in `line`, excluding its line feed.
    #[must_use]
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let start = self.rope.line_to_char(line);
        if line + 1 < self.line_count() {
            self.rope.line_to_char(line + 1) - start - 1
        } else {
            self.len_chars() - start
        }
    }

    /// The characters of `line`, excluding its line feed.
    #[must_use]
    pub fn line_slice(&self, line: usize) -> RopeSlice<'_> {
        let start = self.line_start(line);
        self.rope.slice(start..start + self.line_len(line))
    }

    /// Character at (line, column), if the column is inside the line.
    #[must_use]
    pub fn char_at(&self, line: usize, column: usize) -> Option<char> {
        if line >= self.line_count() || column >= self.line_len(line) {
            return None;
        }
        self.rope.get_char(self.rope.line_to_char(line) + column)
    }

    /// Insert a character at a char index.
    pub fn insert_char(&mut self, char_idx: usize, ch: char) {
        if char_idx <= self.len_chars() {
            self.rope.insert_char(char_idx, ch);
        }
    }

    /// Remove a range of char indices.
    pub fn remove(&mut self, range: std::ops::Range<usize>) {
        let end = range.end.min(self.len_chars());
        if range.start < end {
            self.rope.remove(range.start..end);
        }
    }

    /// Iterate over text chunks in document order.
    pub fn chunks(&self) -> impl Iterator<Item = &str> {
        self.rope.chunks()
    }

    /// Iterate over all characters, line feeds included.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// The whole document as a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for LineRope {
    fn from(s: &str) -> Self {
        Self::from_text(s)
    }
}
