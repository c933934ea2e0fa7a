//! Display surfaces the renderer draws through.

mod buffer;
mod term;

pub use buffer::BufferScreen;
pub use term::TermScreen;

use anyhow::Result;

use crate::style::Style;

/// Minimal cell-grid contract between the renderer and a terminal.
///
/// Drawing calls are infallible and clipped to `[0, width) x [0, height)`;
/// I/O problems surface on [`Surface::present`], after which the caller may
/// not assume anything about the screen contents.
pub trait Surface {
    /// Reset every cell to a blank default-styled cell and hide the cursor.
    fn clear(&mut self);

    /// Current `(width, height)` in cells.
    fn size(&self) -> (usize, usize);

    /// Put one character at the given position.
    fn set_cell(&mut self, col: usize, row: usize, ch: char, style: Style);

    /// Park the visible cursor at the given position for the next present.
    fn set_cursor(&mut self, col: usize, row: usize);

    /// Make everything drawn since the last clear visible.
    fn present(&mut self) -> Result<()>;
}
