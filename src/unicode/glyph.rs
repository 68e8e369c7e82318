//! How a single character is drawn.
//!
//! [`GlyphModel`] decides the display width of every character and the cells
//! that stand in for characters a terminal cannot show directly:
//!
//! | Character                     | Drawn as            | Width            |
//! |-------------------------------|---------------------|------------------|
//! | printable                     | itself              | 1 (2 if wide)    |
//! | tab                           | spaces to next stop | stop distance    |
//! | C0 control, DEL               | `^A`, `^[`, `^?`    | 2                |
//! | C1 control, undefined width   | `<9b>`              | length of form   |
//! | zero-width (combining marks)  | `�`                 | 1                |
//!
//! Every character occupies at least one cell, which keeps the cursor
//! addressable on every column of a line.

use crate::unicode::width::{WidthMethod, char_width_with_method};

/// Default distance between tab stops.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Largest accepted tab stop distance.
pub const MAX_TAB_WIDTH: usize = 32;

/// Cell used for characters that would otherwise occupy no column.
pub const REPLACEMENT: char = '\u{FFFD}';

/// The rendered form of one character at a given display column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderForm {
    /// The character itself, `width` cells wide.
    Literal { ch: char, width: usize },
    /// A tab expanded to the next stop.
    Tab { width: usize, indicator: Option<char> },
    /// Caret notation for C0 controls and DEL (`^` followed by `ch`).
    Caret(char),
    /// Hex notation (`<9b>`) for characters without a defined width.
    Hex(u32),
    /// Single replacement cell for zero-width characters.
    Replacement,
}

impl RenderForm {
    /// Number of terminal columns this form occupies.
    #[must_use]
    pub fn width(&self) -> usize {
        match *self {
            Self::Literal { width, .. } | Self::Tab { width, .. } => width,
            Self::Caret(_) => 2,
            Self::Hex(code) => hex_digits(code) + 2,
            Self::Replacement => 1,
        }
    }

    /// Whether the form substitutes a visible stand-in for the character.
    #[must_use]
    pub fn is_substitute(&self) -> bool {
        matches!(self, Self::Caret(_) | Self::Hex(_) | Self::Replacement)
    }

    /// The glyphs to draw, one per cell.
    ///
    /// A wide literal yields its character once followed by `None` for the
    /// continuation cell it covers.
    #[must_use]
    pub fn cells(&self) -> Vec<Option<char>> {
        match *self {
            Self::Literal { ch, width } => {
                let mut cells = vec![Some(ch)];
                cells.extend(std::iter::repeat_n(None, width.saturating_sub(1)));
                cells
            }
            Self::Tab { width, indicator } => {
                let mut cells = vec![Some(' '); width];
                if let (Some(ind), Some(first)) = (indicator, cells.first_mut()) {
                    *first = Some(ind);
                }
                cells
            }
            Self::Caret(ch) => vec![Some('^'), Some(ch)],
            Self::Hex(code) => format!("<{code:x}>").chars().map(Some).collect(),
            Self::Replacement => vec![Some(REPLACEMENT)],
        }
    }
}

fn hex_digits(code: u32) -> usize {
    if code == 0 {
        1
    } else {
        (32 - code.leading_zeros()).div_ceil(4) as usize
    }
}

/// Per-character display policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphModel {
    tab_width: usize,
    tab_indicator: Option<char>,
    width_method: WidthMethod,
}

impl Default for GlyphModel {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            tab_indicator: None,
            width_method: WidthMethod::default(),
        }
    }
}

impl GlyphModel {
    /// Create a model with the default policy (tab stops every 8 columns).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tab stop distance (clamped to `1..=MAX_TAB_WIDTH`).
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.clamp(1, MAX_TAB_WIDTH);
        self
    }

    /// Draw `indicator` in the first cell of every tab.
    #[must_use]
    pub fn with_tab_indicator(mut self, indicator: Option<char>) -> Self {
        self.tab_indicator = indicator;
        self
    }

    /// Set the width method used for ambiguous-width characters.
    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Tab stop distance.
    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Tab indicator glyph, if any.
    #[must_use]
    pub fn tab_indicator(&self) -> Option<char> {
        self.tab_indicator
    }

    /// Width method for ambiguous-width characters.
    #[must_use]
    pub fn width_method(&self) -> WidthMethod {
        self.width_method
    }

    /// Rendered form of `ch` when it starts at display column `x`.
    #[must_use]
    pub fn render_form(&self, ch: char, x: usize) -> RenderForm {
        match ch {
            '\t' => RenderForm::Tab {
                width: self.tab_width - x % self.tab_width,
                indicator: self.tab_indicator,
            },
            '\u{0}'..='\u{1f}' => RenderForm::Caret(char::from(ch as u8 + 0x40)),
            '\u{7f}' => RenderForm::Caret('?'),
            '\u{80}'..='\u{9f}' => RenderForm::Hex(u32::from(ch)),
            _ => match char_width_with_method(ch, self.width_method) {
                Some(0) => RenderForm::Replacement,
                Some(width) => RenderForm::Literal { ch, width },
                None => RenderForm::Hex(u32::from(ch)),
            },
        }
    }

    /// Display width of `ch` when it starts at display column `x`.
    #[must_use]
    pub fn display_width(&self, ch: char, x: usize) -> usize {
        self.render_form(ch, x).width()
    }

    /// Display width of `text` drawn from column 0 without wrapping.
    #[must_use]
    pub fn text_width(&self, text: &str) -> usize {
        text.chars()
            .fold(0, |x, ch| x + self.display_width(ch, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_width() {
        let glyphs = GlyphModel::new();
        assert_eq!(glyphs.display_width('a', 0), 1);
        assert_eq!(glyphs.display_width('~', 7), 1);
        assert_eq!(
            glyphs.render_form('q', 3),
            RenderForm::Literal { ch: 'q', width: 1 }
        );
    }

    #[test]
    fn test_wide_glyph() {
        let glyphs = GlyphModel::new();
        let form = glyphs.render_form('漢', 0);
        assert_eq!(form.width(), 2);
        assert_eq!(form.cells(), vec![Some('漢'), None]);
    }

    #[test]
    fn test_tab_stops() {
        let glyphs = GlyphModel::new();
        assert_eq!(glyphs.display_width('\t', 0), 8);
        assert_eq!(glyphs.display_width('\t', 3), 5);
        assert_eq!(glyphs.display_width('\t', 7), 1);
        assert_eq!(glyphs.display_width('\t', 8), 8);

        let glyphs = GlyphModel::new().with_tab_width(4);
        assert_eq!(glyphs.display_width('\t', 1), 3);
    }

    #[test]
    fn test_tab_width_clamped() {
        assert_eq!(GlyphModel::new().with_tab_width(0).tab_width(), 1);
        assert_eq!(GlyphModel::new().with_tab_width(500).tab_width(), MAX_TAB_WIDTH);
    }

    #[test]
    fn test_tab_indicator_cells() {
        let glyphs = GlyphModel::new()
            .with_tab_width(4)
            .with_tab_indicator(Some('>'));
        let form = glyphs.render_form('\t', 1);
        assert_eq!(form.cells(), vec![Some('>'), Some(' '), Some(' ')]);
        assert!(!form.is_substitute());
    }

    #[test]
    fn test_control_caret() {
        let glyphs = GlyphModel::new();
        assert_eq!(glyphs.render_form('\u{1}', 0), RenderForm::Caret('A'));
        assert_eq!(glyphs.render_form('\u{1b}', 0), RenderForm::Caret('['));
        assert_eq!(glyphs.render_form('\r', 0), RenderForm::Caret('M'));
        assert_eq!(glyphs.render_form('\u{0}', 0), RenderForm::Caret('@'));
        assert_eq!(glyphs.render_form('\u{7f}', 0), RenderForm::Caret('?'));

        let form = glyphs.render_form('\u{1}', 5);
        assert_eq!(form.width(), 2);
        assert_eq!(form.cells(), vec![Some('^'), Some('A')]);
        assert!(form.is_substitute());
    }

    #[test]
    fn test_c1_hex() {
        let glyphs = GlyphModel::new();
        let form = glyphs.render_form('\u{9b}', 0);
        assert_eq!(form, RenderForm::Hex(0x9b));
        assert_eq!(form.width(), 4);
        assert_eq!(
            form.cells(),
            vec![Some('<'), Some('9'), Some('b'), Some('>')]
        );
    }

    #[test]
    fn test_hex_width_matches_cells() {
        for code in [0x0u32, 0x9, 0x85, 0x2028, 0x10_FFFF] {
            let form = RenderForm::Hex(code);
            assert_eq!(form.width(), form.cells().len(), "code {code:#x}");
        }
    }

    #[test]
    fn test_zero_width_replacement() {
        let glyphs = GlyphModel::new();
        let form = glyphs.render_form('\u{0301}', 0);
        assert_eq!(form, RenderForm::Replacement);
        assert_eq!(form.width(), 1);
        assert_eq!(form.cells(), vec![Some(REPLACEMENT)]);
    }

    #[test]
    fn test_every_char_has_width() {
        let glyphs = GlyphModel::new();
        for code in (0u32..0x3000).chain([0xFE0F, 0x200D, 0xE000, 0x1F600]) {
            if let Some(ch) = char::from_u32(code) {
                let form = glyphs.render_form(ch, 0);
                assert!(form.width() >= 1, "{code:#x} has no width");
                assert_eq!(form.width(), form.cells().len(), "{code:#x}");
            }
        }
    }

    #[test]
    fn test_text_width() {
        let glyphs = GlyphModel::new();
        assert_eq!(glyphs.text_width(""), 0);
        assert_eq!(glyphs.text_width("abc"), 3);
        assert_eq!(glyphs.text_width("a\tb"), 9);
        assert_eq!(glyphs.text_width("\u{1}x"), 3);
    }
}
