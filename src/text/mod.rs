//! Document storage and layout.
//!
//! Key types:
//!
//! - [`TextBuffer`]: rope-backed lines addressed by [`Position`]
//! - [`WrapIndex`]: logical lines split into wrapped screen rows
//! - [`Cursor`]: position plus target-column memory and all motions
//! - [`Viewport`]: visible row window with minimal-scroll policy
//!
//! # Examples
//!
//! ```
//! use vedit::text::{Position, TextBuffer, WrapIndex, WrapMode};
//! use vedit::unicode::GlyphModel;
//!
//! let mut buffer = TextBuffer::with_text("abcdef");
//! let mut wrap = WrapIndex::new(&buffer, 3, GlyphModel::new(), WrapMode::Char);
//! assert_eq!(wrap.row_count(), 2);
//!
//! let change = buffer.insert_char(Position::new(0, 6), 'g').unwrap();
//! wrap.apply(&buffer, change);
//! assert_eq!(wrap.row_count(), 3);
//! ```

mod buffer;
mod cursor;
mod rope;
mod viewport;
mod wrap;

pub use buffer::{Encoding, LineChange, Position, TextBuffer};
pub use cursor::{CharClass, Cursor, TargetColumn};
pub use rope::LineRope;
pub use viewport::Viewport;
pub use wrap::{PlacedGlyph, WrapIndex, WrapMode, WrapRow, wrap_line};
