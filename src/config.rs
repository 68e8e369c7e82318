//! Editor options and their environment overrides.

use crate::text::WrapMode;
use crate::unicode::{DEFAULT_TAB_WIDTH, GlyphModel, WidthMethod};
use std::env;

/// Display options for one editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorOptions {
    /// Columns between tab stops (1..=32).
    pub tab_width: usize,
    pub wrap_mode: WrapMode,
    /// Draw the line-number gutter.
    pub line_numbers: bool,
    /// Character drawn in the first cell of an expanded tab.
    pub tab_indicator: Option<char>,
    pub width_method: WidthMethod,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            wrap_mode: WrapMode::Char,
            line_numbers: true,
            tab_indicator: None,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl EditorOptions {
    /// Defaults overridden by `VEDIT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `VEDIT_*` key. Values that do not parse are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(width) = lookup("VEDIT_TAB_WIDTH").and_then(|v| v.trim().parse().ok()) {
            options.tab_width = width;
        }
        if let Some(mode) = lookup("VEDIT_WRAP").and_then(|v| WrapMode::parse(&v)) {
            options.wrap_mode = mode;
        }
        if let Some(flag) = lookup("VEDIT_LINE_NUMBERS").and_then(|v| parse_flag(&v)) {
            options.line_numbers = flag;
        }
        if let Some(value) = lookup("VEDIT_TAB_INDICATOR") {
            options.tab_indicator = value.chars().next();
        }
        if let Some(method) = lookup("VEDIT_WIDTH").and_then(|v| WidthMethod::parse(&v)) {
            options.width_method = method;
        }

        options
    }

    /// The glyph model these options describe.
    #[must_use]
    pub fn glyph_model(&self) -> GlyphModel {
        GlyphModel::new()
            .with_tab_width(self.tab_width)
            .with_tab_indicator(self.tab_indicator)
            .with_width_method(self.width_method)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
