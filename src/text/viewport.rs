//! Visible window over the wrapped rows.

use std::ops::Range;

/// The rows and columns currently on screen.
///
/// `top` is a wrapped-row index; rows `[top, top + height)` are visible.
/// Wrapping removes horizontal overflow, so there is no horizontal offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
    width: usize,
    height: usize,
}

impl Viewport {
    /// Create a viewport at the top of the document (sizes are at least 1).
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            top: 0,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// First visible row.
    #[must_use]
    pub fn top(&self) -> usize {
        self.top
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resize; the caller re-scrolls afterwards.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Visible row range.
    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.top..self.top + self.height
    }

    /// Check whether `row` is on screen.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.rows().contains(&row)
    }

    /// Scroll the least amount that brings `row` on screen.
    pub fn scroll_to_row(&mut self, row: usize) {
        if row < self.top {
            self.top = row;
        } else if row >= self.top + self.height {
            self.top = row + 1 - self.height;
        }
    }

    /// Keep the view from starting past the last of `row_count` rows.
    pub fn clamp_to(&mut self, row_count: usize) {
        self.top = self.top.min(row_count.saturating_sub(1));
    }

    /// Scroll one screen down, stopping with the last row at the top.
    pub fn page_down(&mut self, row_count: usize) {
        self.top = (self.top + self.height).min(row_count.saturating_sub(1));
    }

    /// Scroll one screen up.
    pub fn page_up(&mut self) {
        self.top = self.top.saturating_sub(self.height);
    }

    /// Row within the screen for `row`, if visible.
    #[must_use]
    pub fn screen_row(&self, row: usize) -> Option<usize> {
        self.contains(row).then(|| row - self.top)
    }
}
