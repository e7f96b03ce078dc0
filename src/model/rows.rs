//! Forward row cursor over a borrowed frame

use super::cell::Cell;
use super::frame::DataFrame;

/// A restartable forward cursor producing one row snapshot at a time.
///
/// The cursor is an index plus a shared borrow of the frame, so any
/// structural mutation while a cursor is live is rejected at compile
/// time rather than invalidating it silently. Two cursors compare equal
/// only when they point at the same frame and the same position, which
/// is how end-of-iteration is detected against [`DataFrame::end`].
#[derive(Debug, Clone, Copy)]
pub struct RowCursor<'a> {
    frame: &'a DataFrame,
    pos: usize,
}

impl<'a> RowCursor<'a> {
    pub(crate) fn new(frame: &'a DataFrame, pos: usize) -> Self {
        Self { frame, pos }
    }

    /// Current position in `[0, row_count]`
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The row under the cursor, or `None` when the cursor sits one past
    /// the last row.
    pub fn current(&self) -> Option<Vec<Cell>> {
        self.frame.row(self.pos)
    }

    /// Step forward one row; saturates at the end position.
    pub fn advance(&mut self) {
        if self.pos < self.frame.row_count() {
            self.pos += 1;
        }
    }

    /// True once the cursor has passed the last row
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.frame.row_count()
    }
}

impl PartialEq for RowCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.frame, other.frame) && self.pos == other.pos
    }
}

impl Eq for RowCursor<'_> {}

impl Iterator for RowCursor<'_> {
    type Item = Vec<Cell>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.current()?;
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frame.row_count().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RowCursor<'_> {}
