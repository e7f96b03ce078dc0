//! Column storage and kind inference

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Classification of a column, fixed at load/add time and never
/// re-inferred per access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// A named, typed column. Invariant: `values` never mixes `Number` and
/// `Text` cells; a `Numeric` column holds `Number`/`Missing` only and a
/// `Categorical` column holds `Text`/`Missing` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unique within a frame)
    pub name: String,
    /// Inferred kind
    pub kind: ColumnKind,
    /// Cell values, one per row
    pub values: Vec<Cell>,
}

impl Column {
    /// Build a column from raw cells, inferring the kind: `Numeric` if
    /// every non-missing cell is a number, `Categorical` otherwise. In a
    /// categorical column, number cells are coerced to their text form so
    /// the no-mixing invariant holds. A `Number(NaN)` cell normalizes to
    /// `Missing`, keeping `Missing` the only not-a-value marker.
    pub fn from_cells(name: impl Into<String>, values: Vec<Cell>) -> Self {
        let numeric = values.iter().all(|c| !matches!(c, Cell::Text(_)));
        if numeric {
            let values = values
                .into_iter()
                .map(|c| match c {
                    Cell::Number(f) if f.is_nan() => Cell::Missing,
                    other => other,
                })
                .collect();
            Self {
                name: name.into(),
                kind: ColumnKind::Numeric,
                values,
            }
        } else {
            let values = values
                .into_iter()
                .map(|c| match c {
                    Cell::Number(f) if f.is_nan() => Cell::Missing,
                    Cell::Number(f) => Cell::Text(f.to_string()),
                    other => other,
                })
                .collect();
            Self {
                name: name.into(),
                kind: ColumnKind::Categorical,
                values,
            }
        }
    }

    /// Create a column with a known kind; the caller guarantees the cells
    /// already satisfy the no-mixing invariant.
    pub fn with_kind(name: impl Into<String>, kind: ColumnKind, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Number of cells (== frame row count)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the column holds no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of `Missing` cells
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_missing()).count()
    }
}
