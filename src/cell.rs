//! Terminal cell type representing a single character position.
//!
//! A screen is a grid of cells, each holding one character and its
//! attributes. A character of display width 2 occupies its own cell plus a
//! [`CellContent::Continuation`] cell to its right.
//!
//! # Examples
//!
//! ```
//! use vedit::{Cell, TextAttributes};
//!
//! let cell = Cell::new('A', TextAttributes::BOLD);
//! assert_eq!(cell.display_width(), 1);
//!
//! let wide = Cell::new('漢', TextAttributes::empty());
//! assert_eq!(wide.display_width(), 2);
//!
//! // Ambiguous-width glyphs are wide only when laid out that way
//! assert_eq!(Cell::new('①', TextAttributes::empty()).display_width(), 1);
//! assert_eq!(Cell::wide('①', TextAttributes::empty()).display_width(), 2);
//!
//! assert_eq!(Cell::blank().symbol(), ' ');
//! ```

use crate::style::TextAttributes;
use crate::unicode::{WidthMethod, is_wide};

/// Content of a terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    /// A character one column wide.
    Char(char),
    /// A character two columns wide; the next cell is its continuation.
    Wide(char),
    /// Nothing drawn; renders as a space.
    #[default]
    Empty,
    /// Covered by the wide character in the cell to the left.
    Continuation,
}

/// A single terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub content: CellContent,
    pub attributes: TextAttributes,
}

impl Cell {
    /// Create a cell holding `ch`, wide when wcwidth says so.
    #[must_use]
    pub fn new(ch: char, attributes: TextAttributes) -> Self {
        if is_wide(ch, WidthMethod::WcWidth) {
            Self::wide(ch, attributes)
        } else {
            Self::narrow(ch, attributes)
        }
    }

    /// A cell holding `ch` in one column.
    #[must_use]
    pub const fn narrow(ch: char, attributes: TextAttributes) -> Self {
        Self {
            content: CellContent::Char(ch),
            attributes,
        }
    }

    /// A cell holding `ch` across two columns.
    #[must_use]
    pub const fn wide(ch: char, attributes: TextAttributes) -> Self {
        Self {
            content: CellContent::Wide(ch),
            attributes,
        }
    }

    /// An empty, unstyled cell.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            content: CellContent::Empty,
            attributes: TextAttributes::empty(),
        }
    }

    /// The continuation half of a wide character.
    #[must_use]
    pub const fn continuation(attributes: TextAttributes) -> Self {
        Self {
            content: CellContent::Continuation,
            attributes,
        }
    }

    /// Build a cell from one entry of [`RenderForm::cells`](crate::unicode::RenderForm::cells).
    ///
    /// `wide` is set when the entry is followed by a continuation.
    #[must_use]
    pub const fn from_glyph(glyph: Option<char>, wide: bool, attributes: TextAttributes) -> Self {
        match glyph {
            Some(ch) if wide => Self::wide(ch, attributes),
            Some(ch) => Self::narrow(ch, attributes),
            None => Self::continuation(attributes),
        }
    }

    /// Number of terminal columns the cell's content advances.
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self.content {
            CellContent::Wide(_) => 2,
            CellContent::Char(_) | CellContent::Empty => 1,
            CellContent::Continuation => 0,
        }
    }

    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// The character to draw; empty cells draw a space.
    #[must_use]
    pub fn symbol(&self) -> char {
        match self.content {
            CellContent::Char(c) | CellContent::Wide(c) => c,
            CellContent::Empty | CellContent::Continuation => ' ',
        }
    }
}
