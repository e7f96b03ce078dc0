//! The DataFrame: an ordered collection of named, typed columns

use indexmap::IndexMap;

use crate::error::{FrameError, Result};

use super::cell::Cell;
use super::column::{Column, ColumnKind};
use super::rows::RowCursor;

/// An in-memory columnar table.
///
/// The frame is the sole owner of its columns. Every column holds exactly
/// `shape().0` cells, and column names are unique. Statistics and row
/// cursors borrow the frame read-only; structural operations take `&mut
/// self`, so the borrow checker rules out iteration across a mutation.
#[derive(Debug, Default, Clone)]
pub struct DataFrame {
    columns: Vec<Column>,
}

impl DataFrame {
    /// Create an empty frame with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame directly from columns. The parser layer guarantees
    /// equal lengths and unique names before calling this.
    pub(crate) fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// All columns, in order
    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// The ordered column names
    pub fn get_header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Replace every column name. Fails with a shape mismatch if the new
    /// header length differs from the column count, and rejects duplicate
    /// names; the frame is untouched on failure.
    pub fn set_header(&mut self, new_header: Vec<String>) -> Result<()> {
        if new_header.len() != self.columns.len() {
            return Err(FrameError::ShapeMismatch {
                expected: self.columns.len(),
                actual: new_header.len(),
            });
        }
        for (i, name) in new_header.iter().enumerate() {
            if new_header[..i].contains(name) {
                return Err(FrameError::DuplicateColumn(name.clone()));
            }
        }
        for (col, name) in self.columns.iter_mut().zip(new_header) {
            col.name = name;
        }
        Ok(())
    }

    /// The column at a 0-based position
    pub fn get_column(&self, index: usize) -> Result<&Column> {
        self.columns.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            len: self.columns.len(),
        })
    }

    /// Position of a column by name. Every by-name accessor resolves
    /// through this.
    pub fn find_idx(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// The column with the given name
    pub fn column(&self, name: &str) -> Result<&Column> {
        let idx = self.find_idx(name)?;
        Ok(&self.columns[idx])
    }

    /// Resolve a column and require it to be of `kind`
    pub(crate) fn column_of_kind(&self, name: &str, kind: ColumnKind) -> Result<&Column> {
        let col = self.column(name)?;
        if col.kind != kind {
            return Err(FrameError::TypeMismatch {
                column: name.to_string(),
                expected: kind,
                actual: col.kind,
            });
        }
        Ok(col)
    }

    /// Whether the named column is numeric
    pub fn is_numeric(&self, name: &str) -> Result<bool> {
        Ok(self.column(name)?.kind == ColumnKind::Numeric)
    }

    /// Append a new column, inferring its kind from the cells. Fails if
    /// the name is taken or the length disagrees with the current row
    /// count (a first column may have any length).
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Cell>) -> Result<()> {
        let name = name.into();
        if self.find_idx(&name).is_ok() {
            return Err(FrameError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(FrameError::ShapeMismatch {
                expected: self.row_count(),
                actual: values.len(),
            });
        }
        self.columns.push(Column::from_cells(name, values));
        Ok(())
    }

    /// Remove a column (and its header entry) by name
    pub fn drop_col(&mut self, name: &str) -> Result<()> {
        let idx = self.find_idx(name)?;
        self.columns.remove(idx);
        Ok(())
    }

    /// Remove the row at `index` from every column in lockstep
    pub fn drop_row(&mut self, index: usize) -> Result<()> {
        if index >= self.row_count() {
            return Err(FrameError::IndexOutOfRange {
                index,
                len: self.row_count(),
            });
        }
        for col in &mut self.columns {
            col.values.remove(index);
        }
        Ok(())
    }

    /// Per-column `Missing` counts, in column order
    pub fn table_nan(&self) -> IndexMap<String, usize> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.missing_count()))
            .collect()
    }

    /// Remove every row that has at least one `Missing` cell, preserving
    /// the relative order of the survivors. Idempotent.
    pub fn drop_row_nan(&mut self) {
        let keep: Vec<bool> = (0..self.row_count())
            .map(|i| self.columns.iter().all(|c| !c.values[i].is_missing()))
            .collect();
        for col in &mut self.columns {
            let mut i = 0;
            col.values.retain(|_| {
                let k = keep[i];
                i += 1;
                k
            });
        }
    }

    /// Extract a numeric column as `f64`s. `Missing` cells become NaN so
    /// row alignment is preserved for pairwise statistics.
    pub fn get_double_column(&self, name: &str) -> Result<Vec<f64>> {
        let col = self.column_of_kind(name, ColumnKind::Numeric)?;
        Ok(col
            .values
            .iter()
            .map(|c| c.as_number().unwrap_or(f64::NAN))
            .collect())
    }

    /// Extract a categorical column as strings; `Missing` renders as `"NA"`.
    pub fn get_string_column(&self, name: &str) -> Result<Vec<String>> {
        let col = self.column_of_kind(name, ColumnKind::Categorical)?;
        Ok(col.values.iter().map(|c| c.display().into_owned()).collect())
    }

    /// One row as a cell snapshot, or `None` past the end
    pub(crate) fn row(&self, index: usize) -> Option<Vec<Cell>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| c.values[index].clone()).collect())
    }

    /// Full body as row snapshots; mutating the result does not touch the
    /// frame.
    pub fn get_data(&self) -> Vec<Vec<Cell>> {
        (0..self.row_count()).filter_map(|i| self.row(i)).collect()
    }

    /// First `min(5, rows)` rows
    pub fn head(&self) -> Vec<Vec<Cell>> {
        (0..self.row_count().min(5))
            .filter_map(|i| self.row(i))
            .collect()
    }

    /// Per-column maximum display width (header included). Presentation
    /// helper only; no numeric semantics.
    pub fn formatting_width(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|c| {
                c.values
                    .iter()
                    .map(|v| v.display().chars().count())
                    .chain(std::iter::once(c.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Cursor positioned at the first row
    pub fn begin(&self) -> RowCursor<'_> {
        RowCursor::new(self, 0)
    }

    /// Cursor positioned one past the last row
    pub fn end(&self) -> RowCursor<'_> {
        RowCursor::new(self, self.row_count())
    }

    /// Forward iterator over row snapshots
    pub fn rows(&self) -> RowCursor<'_> {
        self.begin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column("a", vec![1.0.into(), 2.0.into(), 3.0.into()])
            .unwrap();
        df.add_column("b", vec!["x".into(), "y".into(), "x".into()])
            .unwrap();
        df
    }

    #[test]
    fn test_shape_and_header() {
        let df = sample();
        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.get_header(), vec!["a", "b"]);
    }

    #[test]
    fn test_set_header_length_mismatch() {
        let mut df = sample();
        let err = df.set_header(vec!["only".into()]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
        // untouched on failure
        assert_eq!(df.get_header(), vec!["a", "b"]);
    }

    #[test]
    fn test_set_header_rejects_duplicates() {
        let mut df = sample();
        let err = df.set_header(vec!["c".into(), "c".into()]).unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn(_)));
    }

    #[test]
    fn test_find_idx() {
        let df = sample();
        assert_eq!(df.find_idx("b").unwrap(), 1);
        assert!(matches!(
            df.find_idx("nope"),
            Err(FrameError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_get_column_out_of_range() {
        let df = sample();
        assert!(df.get_column(1).is_ok());
        assert!(matches!(
            df.get_column(2),
            Err(FrameError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_add_column_shape_mismatch() {
        let mut df = sample();
        let err = df.add_column("c", vec![1.0.into()]).unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
        assert_eq!(df.column_count(), 2);
    }

    #[test]
    fn test_add_column_duplicate_name() {
        let mut df = sample();
        let err = df
            .add_column("a", vec![1.0.into(), 2.0.into(), 3.0.into()])
            .unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn(_)));
    }

    #[test]
    fn test_drop_col() {
        let mut df = sample();
        df.drop_col("a").unwrap();
        assert_eq!(df.shape(), (3, 1));
        assert_eq!(df.get_header(), vec!["b"]);
        assert!(df.drop_col("a").is_err());
    }

    #[test]
    fn test_drop_row() {
        let mut df = sample();
        df.drop_row(1).unwrap();
        assert_eq!(df.row_count(), 2);
        assert_eq!(df.get_double_column("a").unwrap(), vec![1.0, 3.0]);
        assert!(matches!(
            df.drop_row(2),
            Err(FrameError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_table_nan_and_drop_row_nan() {
        let mut df = DataFrame::new();
        df.add_column("a", vec![1.0.into(), Cell::Missing, 3.0.into()])
            .unwrap();
        df.add_column("b", vec!["x".into(), "y".into(), Cell::Missing])
            .unwrap();

        let nans = df.table_nan();
        assert_eq!(nans["a"], 1);
        assert_eq!(nans["b"], 1);

        df.drop_row_nan();
        assert_eq!(df.row_count(), 1);
        assert_eq!(df.get_double_column("a").unwrap(), vec![1.0]);

        // idempotent
        df.drop_row_nan();
        assert_eq!(df.row_count(), 1);
    }

    #[test]
    fn test_typed_extraction() {
        let mut df = DataFrame::new();
        df.add_column("a", vec![1.0.into(), Cell::Missing]).unwrap();
        df.add_column("b", vec!["u".into(), Cell::Missing]).unwrap();

        let doubles = df.get_double_column("a").unwrap();
        assert_eq!(doubles[0], 1.0);
        assert!(doubles[1].is_nan());

        assert_eq!(df.get_string_column("b").unwrap(), vec!["u", "NA"]);

        assert!(matches!(
            df.get_double_column("b"),
            Err(FrameError::TypeMismatch { .. })
        ));
        assert!(matches!(
            df.get_string_column("a"),
            Err(FrameError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_data_is_a_snapshot() {
        let df = sample();
        let mut data = df.get_data();
        data[0][0] = Cell::Missing;
        assert_eq!(df.get_column(0).unwrap().values[0], Cell::Number(1.0));
    }

    #[test]
    fn test_head_caps_at_five() {
        let mut df = DataFrame::new();
        df.add_column("a", (0..8).map(|i| Cell::from(i as f64)).collect())
            .unwrap();
        assert_eq!(df.head().len(), 5);
        assert_eq!(sample().head().len(), 3);
    }

    #[test]
    fn test_formatting_width() {
        let mut df = DataFrame::new();
        df.add_column("long_name", vec![1.0.into(), 22.5.into()])
            .unwrap();
        df.add_column("b", vec!["abcdef".into(), "x".into()]).unwrap();
        assert_eq!(df.formatting_width(), vec![9, 6]);
    }
}
