//! Unicode utilities for display width and glyph substitution.

mod glyph;
mod width;

pub use glyph::{DEFAULT_TAB_WIDTH, GlyphModel, MAX_TAB_WIDTH, REPLACEMENT, RenderForm};
pub use width::{WidthMethod, char_width_with_method, is_wide};
