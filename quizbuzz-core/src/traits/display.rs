//! Text display trait for the local scoreboard

use core::fmt;

/// Character-cell display addressed by row and column
///
/// Text goes through [`fmt::Write`], so callers format with `write!`
/// after positioning the cursor with [`locate`](TextDisplay::locate).
pub trait TextDisplay: fmt::Write {
    /// Move the cursor to a character cell
    fn locate(&mut self, row: u8, col: u8);

    /// Blank the whole display
    fn clear(&mut self);

    /// Display size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}
