//! colframe - In-memory columnar table engine
//!
//! Loads delimited and JSON datasets into a columnar [`DataFrame`],
//! infers per-column types (numeric vs categorical), tracks missing
//! values per cell, and computes descriptive statistics over the loaded
//! data.

pub mod error;
pub mod model;
pub mod parser;
pub mod stats;

pub use error::{FrameError, Result};
pub use model::{Cell, Column, ColumnKind, DataFrame, RowCursor};
pub use parser::CsvOptions;
pub use stats::FiveNumber;
