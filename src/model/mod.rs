//! Data model: cells, columns, the frame, and the row cursor

mod cell;
mod column;
mod frame;
mod rows;

pub use cell::Cell;
pub use column::{Column, ColumnKind};
pub use frame::DataFrame;
pub use rows::RowCursor;
