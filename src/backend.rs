//! The rendering and input boundary the editor drives.

use crate::cell::Cell;
use crate::error::Result;
use crate::input::KeyEvent;

/// A character-cell display plus its key input.
///
/// Drawing is buffered: cells drawn since the last [`Backend::refresh`]
/// make up the next frame and anything not drawn is blank.
pub trait Backend {
    /// Block until the next key event.
    fn next_key_event(&mut self) -> Result<KeyEvent>;

    /// Draw one cell at `(row, col)` of the next frame.
    fn draw_cell(&mut self, row: usize, col: usize, cell: Cell);

    /// Put the hardware cursor at `(row, col)` when the frame is shown.
    fn place_cursor(&mut self, row: usize, col: usize);

    /// Show the drawn frame.
    fn refresh(&mut self) -> Result<()>;

    /// Current size as `(rows, cols)`.
    fn terminal_size(&mut self) -> Result<(usize, usize)>;
}
