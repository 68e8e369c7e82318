//! Cell grid for one terminal frame.
//!
//! Backends paint into a [`Screen`] and compare it against the previously
//! shown one so only changed cells are written.

use crate::cell::Cell;

/// A `rows` x `cols` grid of cells stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Screen {
    /// Create a blank screen. Dimensions are clamped to at least 1.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cells: vec![Cell::blank(); rows.saturating_mul(cols)],
        }
    }

    /// Get screen size as `(rows, cols)`.
    #[must_use]
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Resize and blank the whole screen.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        *self = Self::new(rows, cols);
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|idx| &self.cells[idx])
    }

    /// Draw `cell` at a position; out-of-bounds positions are ignored.
    ///
    /// A wide cell also claims the next cell as its continuation. One that
    /// would straddle the right edge is drawn as a space instead.
    pub fn put(&mut self, row: usize, col: usize, cell: Cell) {
        let Some(idx) = self.index(row, col) else {
            return;
        };
        let attributes = cell.attributes;
        if cell.display_width() < 2 {
            self.cells[idx] = cell;
            return;
        }
        match self.index(row, col + 1) {
            Some(next) => {
                self.cells[idx] = cell;
                self.cells[next] = Cell::continuation(attributes);
            }
            None => self.cells[idx] = Cell::narrow(' ', attributes),
        }
    }

    /// The text of one row, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter_map(|col| self.get(row, col))
            .filter(|cell| !cell.is_continuation())
            .map(Cell::symbol)
            .collect()
    }

    /// All rows as text with trailing blanks removed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| self.row_text(row).trim_end().to_string())
            .collect()
    }

    /// Positions whose cells differ from `old`.
    ///
    /// Every position is reported when the sizes differ.
    #[must_use]
    pub fn diff(&self, old: &Self) -> Vec<(usize, usize)> {
        let all = self.size() != old.size();
        let mut changed = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = row * self.cols + col;
                if all || self.cells[idx] != old.cells[idx] {
                    changed.push((row, col));
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextAttributes;

    #[test]
    fn test_new_clamps_size() {
        assert_eq!(Screen::new(0, 0).size(), (1, 1));
        assert_eq!(Screen::new(3, 5).size(), (3, 5));
    }

    #[test]
    fn test_put_and_row_text() {
        let mut screen = Screen::new(2, 4);
        screen.put(0, 0, Cell::new('a', TextAttributes::empty()));
        screen.put(0, 1, Cell::new('b', TextAttributes::INVERSE));
        screen.put(5, 0, Cell::new('z', TextAttributes::empty()));
        assert_eq!(screen.row_text(0), "ab  ");
        assert_eq!(screen.get(0, 1).map(|c| c.attributes), Some(TextAttributes::INVERSE));
        assert_eq!(screen.lines(), vec!["ab".to_string(), String::new()]);
    }

    #[test]
    fn test_wide_glyph_claims_continuation() {
        let mut screen = Screen::new(1, 3);
        screen.put(0, 0, Cell::new('日', TextAttributes::empty()));
        assert!(screen.get(0, 1).is_some_and(Cell::is_continuation));
        assert_eq!(screen.row_text(0), "日 ");

        screen.put(0, 2, Cell::new('本', TextAttributes::empty()));
        assert_eq!(screen.get(0, 2).map(Cell::symbol), Some(' '));
    }

    #[test]
    fn test_ambiguous_glyph_laid_out_wide() {
        let mut screen = Screen::new(1, 3);
        screen.put(0, 0, Cell::wide('①', TextAttributes::empty()));
        assert!(screen.get(0, 1).is_some_and(Cell::is_continuation));
        screen.put(0, 2, Cell::new('x', TextAttributes::empty()));
        assert_eq!(screen.row_text(0), "①x");
    }

    #[test]
    fn test_diff() {
        let old = Screen::new(2, 2);
        let mut new = old.clone();
        assert!(new.diff(&old).is_empty());

        new.put(1, 0, Cell::new('x', TextAttributes::empty()));
        assert_eq!(new.diff(&old), vec![(1, 0)]);

        let bigger = Screen::new(2, 3);
        assert_eq!(bigger.diff(&old).len(), 6);
    }
}
