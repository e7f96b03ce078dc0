//! Parser layer: turns raw CSV/JSON text into a typed frame

mod csv;
mod json;

use std::path::Path;

use crate::error::Result;
use crate::model::{Cell, Column, ColumnKind, DataFrame};

/// Options for delimited-text reading.
///
/// By default only blank fields count as missing. Tokens such as `"NA"`
/// or `"NaN"` are recognized as missing only when listed in `na_tokens`
/// (compared after trimming, case-sensitive).
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field separator, split literally (no quoting or escaping)
    pub separator: char,
    /// Whether the first line is a header; otherwise `Col1..ColN` is
    /// generated from the first data line's field count
    pub has_header: bool,
    /// Extra tokens to treat as missing values
    pub na_tokens: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            has_header: true,
            na_tokens: Vec::new(),
        }
    }
}

impl CsvOptions {
    pub(crate) fn is_na(&self, token: &str) -> bool {
        self.na_tokens.iter().any(|t| t == token)
    }
}

/// Parse a token as a number. A token that parses to NaN is rejected so
/// that `Missing` stays the only not-a-value marker in a numeric column.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|f| !f.is_nan())
}

/// Build a column from raw tokens (`None` = missing field), deciding the
/// kind with one scan: `Numeric` if every present token parses as a
/// number, `Categorical` otherwise.
pub(crate) fn column_from_tokens(name: String, tokens: Vec<Option<String>>) -> Column {
    let numeric = tokens
        .iter()
        .flatten()
        .all(|token| parse_number(token).is_some());
    if numeric {
        let values = tokens
            .into_iter()
            .map(|t| {
                t.as_deref()
                    .and_then(parse_number)
                    .map_or(Cell::Missing, Cell::Number)
            })
            .collect();
        Column::with_kind(name, ColumnKind::Numeric, values)
    } else {
        let values = tokens
            .into_iter()
            .map(|t| t.map_or(Cell::Missing, Cell::Text))
            .collect();
        Column::with_kind(name, ColumnKind::Categorical, values)
    }
}

impl DataFrame {
    /// Load a CSV file with default options (comma separator, header
    /// line present). Replaces the frame's entire content on success;
    /// on failure the prior content is left untouched.
    pub fn read_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.read_csv_with(path, &CsvOptions::default())
    }

    /// Load a CSV file with explicit options
    pub fn read_csv_with(&mut self, path: impl AsRef<Path>, options: &CsvOptions) -> Result<()> {
        let loaded = csv::read(path.as_ref(), options)?;
        *self = loaded;
        Ok(())
    }

    /// Load a JSON file (array-of-objects or object-of-arrays). Replaces
    /// the frame's entire content on success; on failure the prior
    /// content is left untouched.
    pub fn read_json(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = json::read(path.as_ref())?;
        *self = loaded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_number("abc"), None);
        // NaN tokens are not numbers; Missing is the only NA marker
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_failed_read_leaves_frame_untouched() {
        let mut df = DataFrame::new();
        df.add_column("a", vec![1.0.into(), 2.0.into()]).unwrap();

        assert!(df.read_csv("/no/such/file.csv").is_err());
        assert_eq!(df.shape(), (2, 1));
        assert!(df.read_json("/no/such/file.json").is_err());
        assert_eq!(df.shape(), (2, 1));
    }

    #[test]
    fn test_second_read_replaces_first() {
        use std::io::Write;
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(b"a,b\n1,2\n").unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f2.write_all(b"c\nx\ny\nz\n").unwrap();

        let mut df = DataFrame::new();
        df.read_csv(f1.path()).unwrap();
        assert_eq!(df.shape(), (1, 2));
        df.read_csv(f2.path()).unwrap();
        assert_eq!(df.shape(), (3, 1));
        assert_eq!(df.get_header(), vec!["c"]);
    }
}
