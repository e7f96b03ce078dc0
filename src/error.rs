//! Error types for table loading, structural operations, and statistics

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ColumnKind;

/// All errors produced by this crate.
///
/// Every operation reports its failure synchronously; nothing is retried
/// internally. A failed read leaves the previously loaded frame untouched,
/// and a failed structural operation does not partially mutate the frame.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Failed to open or read the underlying stream.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV/JSON input, field-count mismatch, or inconsistent
    /// JSON record schema.
    #[error("format error: {0}")]
    Format(String),

    /// No column with the given name.
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Column index past the end of the column list.
    #[error("column index {index} out of range ({len} columns)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Numeric operation on a categorical column, or vice versa.
    #[error("column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },

    /// Column has no non-missing values to operate on.
    #[error("column '{0}' is empty or all-missing")]
    EmptyColumn(String),

    /// Quantile probability outside [0, 1].
    #[error("quantile probability {0} outside [0, 1]")]
    QuantileOutOfRange(f64),

    /// Histogram requested with zero bins.
    #[error("histogram needs at least one bin, got {0}")]
    BadBinCount(usize),

    /// Too few (jointly) valid rows for the requested statistic.
    #[error("need at least {needed} valid rows, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    /// Added column length or replacement header length disagrees with
    /// the frame's current shape.
    #[error("shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Column name already present in the frame.
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrameError>;
