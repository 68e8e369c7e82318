//! Mapping between logical lines and wrapped screen rows.
//!
//! [`WrapIndex`] splits every line of a [`TextBuffer`] into rows no wider
//! than the wrap width. Rows are stored per logical line in an arena
//! (`lines[i]` holds the spans of line `i`) with a prefix table of first-row
//! indices, so an edit replaces only the spans of the lines it touched and
//! row lookups are a binary search.

use crate::text::buffer::{LineChange, Position, TextBuffer};
use crate::unicode::{GlyphModel, RenderForm};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Text wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Wrap at character boundaries.
    #[default]
    Char,
    /// Wrap at word boundaries, falling back to characters for long words.
    Word,
}

impl WrapMode {
    /// Parse a mode name (`char` / `word`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "char" | "character" => Some(Self::Char),
            "word" => Some(Self::Word),
            _ => None,
        }
    }
}

/// Column run of one row within its line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    width: usize,
}

/// One wrapped screen row: columns `[start, end)` of `line`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapRow {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    /// Display width of the row's glyphs.
    pub width: usize,
    /// Whether the row continues the line started on an earlier row.
    pub is_continuation: bool,
}

impl WrapRow {
    /// Number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A character laid out on a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedGlyph {
    /// Column of the character in its line.
    pub column: usize,
    /// Display column within the row where the glyph starts.
    pub x: usize,
    pub form: RenderForm,
}

/// Wrapped-row layout of a whole buffer.
#[derive(Clone, Debug)]
pub struct WrapIndex {
    width: usize,
    mode: WrapMode,
    glyphs: GlyphModel,
    lines: Vec<Vec<Span>>,
    /// `row_offsets[i]` is the first row of line `i`; the last entry is the
    /// total row count.
    row_offsets: Vec<usize>,
}

impl WrapIndex {
    /// Build the layout of `buffer` at `width` columns (at least 1).
    #[must_use]
    pub fn new(buffer: &TextBuffer, width: usize, glyphs: GlyphModel, mode: WrapMode) -> Self {
        let mut index = Self {
            width: width.max(1),
            mode,
            glyphs,
            lines: Vec::new(),
            row_offsets: vec![0],
        };
        index.rebuild(buffer);
        index
    }

    /// Wrap width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    #[must_use]
    pub fn glyphs(&self) -> &GlyphModel {
        &self.glyphs
    }

    /// Recompute every line.
    pub fn rebuild(&mut self, buffer: &TextBuffer) {
        self.lines = (0..buffer.line_count())
            .map(|line| self.wrap_buffer_line(buffer, line))
            .collect();
        self.recompute_offsets(0);
    }

    /// Change the wrap width, rebuilding when it differs.
    pub fn set_width(&mut self, buffer: &TextBuffer, width: usize) {
        let width = width.max(1);
        if width != self.width {
            self.width = width;
            self.rebuild(buffer);
        }
    }

    /// Change the wrap mode, rebuilding when it differs.
    pub fn set_mode(&mut self, buffer: &TextBuffer, mode: WrapMode) {
        if mode != self.mode {
            self.mode = mode;
            self.rebuild(buffer);
        }
    }

    /// Change the glyph model, rebuilding when it differs.
    pub fn set_glyphs(&mut self, buffer: &TextBuffer, glyphs: GlyphModel) {
        if glyphs != self.glyphs {
            self.glyphs = glyphs;
            self.rebuild(buffer);
        }
    }

    /// Patch the layout after a buffer mutation.
    ///
    /// Only the `change.inserted` lines starting at `change.start` are
    /// re-wrapped; row offsets are recomputed from `change.start` onward.
    pub fn apply(&mut self, buffer: &TextBuffer, change: LineChange) {
        if change.is_empty() {
            return;
        }
        let start = change.start.min(self.lines.len());
        let removed_end = (start + change.removed).min(self.lines.len());
        let fresh: Vec<Vec<Span>> = (start..start + change.inserted)
            .map(|line| self.wrap_buffer_line(buffer, line))
            .collect();
        self.lines.splice(start..removed_end, fresh);
        self.recompute_offsets(start);
    }

    /// Total number of wrapped rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_offsets.last().copied().unwrap_or(0)
    }

    /// Number of logical lines indexed.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The row at index `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<WrapRow> {
        if row >= self.row_count() {
            return None;
        }
        let line = self.row_offsets.partition_point(|&first| first <= row) - 1;
        let k = row - self.row_offsets[line];
        let span = self.lines[line][k];
        Some(WrapRow {
            line,
            start: span.start,
            end: span.end,
            width: span.width,
            is_continuation: k > 0,
        })
    }

    /// Rows in `range`, clipped to the index.
    pub fn rows(&self, range: Range<usize>) -> impl Iterator<Item = WrapRow> + '_ {
        range.filter_map(|row| self.row(row))
    }

    /// Row indices occupied by `line`.
    #[must_use]
    pub fn rows_for_line(&self, line: usize) -> Range<usize> {
        let line = line.min(self.lines.len().saturating_sub(1));
        self.row_offsets[line]..self.row_offsets[line + 1]
    }

    /// First row of `line`.
    #[must_use]
    pub fn first_row_of_line(&self, line: usize) -> usize {
        self.rows_for_line(line).start
    }

    /// Row containing `pos`. The append point belongs to the line's last row.
    #[must_use]
    pub fn row_of(&self, pos: Position) -> usize {
        let line = pos.line.min(self.lines.len().saturating_sub(1));
        let spans = &self.lines[line];
        let k = spans
            .partition_point(|span| span.end <= pos.column)
            .min(spans.len() - 1);
        self.row_offsets[line] + k
    }

    /// Lay out the glyphs of `row`.
    #[must_use]
    pub fn row_glyphs(&self, buffer: &TextBuffer, row: usize) -> Vec<PlacedGlyph> {
        let Some(wrap_row) = self.row(row) else {
            return Vec::new();
        };
        let Ok(chars) = buffer.line_chars(wrap_row.line) else {
            return Vec::new();
        };
        let mut x = 0;
        chars
            .enumerate()
            .skip(wrap_row.start)
            .take(wrap_row.len())
            .map(|(column, ch)| {
                let form = self.glyphs.render_form(ch, x);
                let placed = PlacedGlyph { column, x, form };
                x += form.width();
                placed
            })
            .collect()
    }

    /// Display column of `pos` within its row.
    ///
    /// The append point sits just after the row's last glyph.
    #[must_use]
    pub fn x_of(&self, buffer: &TextBuffer, pos: Position) -> usize {
        let row = self.row_of(pos);
        let glyphs = self.row_glyphs(buffer, row);
        glyphs
            .iter()
            .find(|g| g.column == pos.column)
            .map_or_else(
                || glyphs.last().map_or(0, |g| g.x + g.form.width()),
                |g| g.x,
            )
    }

    /// Column in `row` whose glyph covers display column `x`.
    ///
    /// Past the row's last glyph, a final row answers its append point and a
    /// continuation-bearing row answers its last column.
    #[must_use]
    pub fn column_at_x(&self, buffer: &TextBuffer, row: usize, x: usize) -> usize {
        let Some(wrap_row) = self.row(row) else {
            return 0;
        };
        let glyphs = self.row_glyphs(buffer, row);
        if let Some(glyph) = glyphs.iter().find(|g| x < g.x + g.form.width()) {
            return glyph.column;
        }
        let is_last = row + 1 == self.rows_for_line(wrap_row.line).end;
        if is_last || wrap_row.is_empty() {
            wrap_row.end
        } else {
            wrap_row.end - 1
        }
    }

    fn wrap_buffer_line(&self, buffer: &TextBuffer, line: usize) -> Vec<Span> {
        let text = buffer.line_text(line).unwrap_or_default();
        wrap_spans(&text, self.width, &self.glyphs, self.mode)
    }

    fn recompute_offsets(&mut self, from_line: usize) {
        let from_line = from_line.min(self.lines.len());
        self.row_offsets.truncate(from_line + 1);
        if self.row_offsets.is_empty() {
            self.row_offsets.push(0);
        }
        let mut total = self.row_offsets[from_line];
        for spans in &self.lines[from_line..] {
            total += spans.len();
            self.row_offsets.push(total);
        }
    }
}

/// Wrap one line of text, returning the `[start, end)` column run of each
/// row.
///
/// Rows are filled greedily. A glyph wider than `width` gets a row of its
/// own. In word mode a row ends before the last word that does not fit,
/// unless the row holds nothing but that word.
#[must_use]
pub fn wrap_line(
    text: &str,
    width: usize,
    glyphs: &GlyphModel,
    mode: WrapMode,
) -> Vec<Range<usize>> {
    wrap_spans(text, width.max(1), glyphs, mode)
        .into_iter()
        .map(|span| span.start..span.end)
        .collect()
}

fn wrap_spans(text: &str, width: usize, glyphs: &GlyphModel, mode: WrapMode) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![Span {
            start: 0,
            end: 0,
            width: 0,
        }];
    }

    let word_starts = match mode {
        WrapMode::Char => Vec::new(),
        WrapMode::Word => word_starts(text, &chars),
    };

    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut current_width = 0usize;
    // (column, width of the row before that column)
    let mut last_break: Option<(usize, usize)> = None;
    let mut i = 0usize;

    while i < chars.len() {
        if mode == WrapMode::Word && i > start && word_starts[i] && !chars[i].is_whitespace() {
            last_break = Some((i, current_width));
        }

        let w = glyphs.display_width(chars[i], current_width);
        if current_width + w > width && current_width > 0 {
            let (break_at, break_width) = last_break.unwrap_or((i, current_width));
            spans.push(Span {
                start,
                end: break_at,
                width: break_width,
            });
            start = break_at;
            current_width = 0;
            last_break = None;
            i = break_at;
            continue;
        }

        current_width += w;
        i += 1;
    }

    spans.push(Span {
        start,
        end: chars.len(),
        width: current_width,
    });
    spans
}

fn word_starts(text: &str, chars: &[char]) -> Vec<bool> {
    let mut starts = vec![false; chars.len() + 1];
    let mut column = 0;
    for segment in text.split_word_bounds() {
        starts[column] = true;
        column += segment.chars().count();
    }
    starts
}
