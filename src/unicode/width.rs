//! Display width calculation for terminal rendering.

use unicode_width::UnicodeWidthChar;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

impl WidthMethod {
    /// Parse a method name as used in configuration (`wcwidth` / `unicode`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "wcwidth" | "narrow" => Some(Self::WcWidth),
            "unicode" | "cjk" | "wide" => Some(Self::Unicode),
            _ => None,
        }
    }
}

/// Get the display width of a character using a specific method.
///
/// Returns `None` for characters without a defined width (control codes).
#[inline]
#[must_use]
pub fn char_width_with_method(c: char, method: WidthMethod) -> Option<usize> {
    // ASCII printable characters are always width 1
    if (' '..='~').contains(&c) {
        return Some(1);
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c),
    }
}

/// Check if a character is wide (takes 2 columns) under `method`.
#[must_use]
pub fn is_wide(c: char, method: WidthMethod) -> bool {
    char_width_with_method(c, method) == Some(2)
}
