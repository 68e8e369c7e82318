//! Render snapshot of one editor screen.

use crate::backend::Backend;
use crate::cell::Cell;
use crate::error::Result;
use crate::style::TextAttributes;
use crate::unicode::{WidthMethod, char_width_with_method};

/// One screen row of the text area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRow {
    /// Gutter text (line number, blanks, or `~`), drawn in reverse video.
    pub gutter: String,
    /// Text cells, one per terminal column.
    pub cells: Vec<Cell>,
}

impl FrameRow {
    /// Row past the end of the document.
    #[must_use]
    pub fn filler(gutter_width: usize) -> Self {
        if gutter_width == 0 {
            Self {
                gutter: String::new(),
                cells: vec![Cell::new('~', TextAttributes::SUBSTITUTE)],
            }
        } else {
            Self {
                gutter: format!("{:<gutter_width$}", "~"),
                cells: Vec::new(),
            }
        }
    }

    /// The row as plain text, trailing blanks removed.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.gutter.clone();
        text.extend(
            self.cells
                .iter()
                .filter(|cell| !cell.is_continuation())
                .map(Cell::symbol),
        );
        text.trim_end().to_string()
    }
}

/// Everything needed to draw one screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Terminal width in columns.
    pub width: usize,
    /// Text area rows, top to bottom.
    pub rows: Vec<FrameRow>,
    /// Status line, already fitted to `width`.
    pub status: String,
    /// Terminal cursor as `(row, col)`.
    pub cursor: (usize, usize),
}

impl Frame {
    /// Build the status line: `left` at the start, `right` flush right.
    ///
    /// When both do not fit, the line is `left` and `right` separated by one
    /// space and cut at `width`. Control characters show as `?`.
    #[must_use]
    pub fn status_line(left: &str, right: &str, width: usize) -> String {
        let left = printable(left);
        let right = printable(right);
        let (left, right) = (left.as_str(), right.as_str());
        let used = text_width(left) + text_width(right);
        if used < width {
            let gap = width - used;
            format!("{left}{}{right}", " ".repeat(gap))
        } else {
            fit(&format!("{left} {right}"), width)
        }
    }

    /// The frame as plain text lines, status line last.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.rows.iter().map(FrameRow::text).collect();
        lines.push(self.status.trim_end().to_string());
        lines
    }

    /// Draw the frame through `backend` and show it.
    pub fn paint(&self, backend: &mut impl Backend) -> Result<()> {
        for (row, frame_row) in self.rows.iter().enumerate() {
            let mut col = 0;
            for ch in frame_row.gutter.chars() {
                backend.draw_cell(row, col, Cell::narrow(ch, TextAttributes::GUTTER));
                col += 1;
            }
            for cell in &frame_row.cells {
                if !cell.is_continuation() {
                    backend.draw_cell(row, col, *cell);
                }
                col += 1;
            }
        }

        let status_row = self.rows.len();
        let mut col = 0;
        for ch in self.status.chars() {
            backend.draw_cell(status_row, col, Cell::new(ch, TextAttributes::STATUS));
            col += glyph_width(ch);
        }
        while col < self.width {
            backend.draw_cell(status_row, col, Cell::narrow(' ', TextAttributes::STATUS));
            col += 1;
        }

        let (row, col) = self.cursor;
        backend.place_cursor(row, col);
        backend.refresh()
    }
}

fn printable(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { '?' } else { ch })
        .collect()
}

fn glyph_width(ch: char) -> usize {
    char_width_with_method(ch, WidthMethod::WcWidth).unwrap_or(1)
}

fn text_width(text: &str) -> usize {
    text.chars().map(glyph_width).sum()
}

/// Cut `text` to at most `width` columns.
fn fit(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|&ch| {
            used += glyph_width(ch);
            used <= width
        })
        .collect()
}
