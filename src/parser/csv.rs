//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{FrameError, Result};
use crate::model::DataFrame;

use super::{column_from_tokens, CsvOptions};

/// Read a delimited text file into a fresh frame.
///
/// Splitting is literal: quoting and escaping are disabled, so the
/// separator always splits. Every line must carry the same field count
/// as the header (or the first data line); a short or long row fails the
/// whole load.
pub fn read(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    // only an ASCII separator matches its own encoding in the raw bytes
    if !options.separator.is_ascii() {
        return Err(FrameError::Format(format!(
            "separator '{}' must be an ASCII character",
            options.separator
        )));
    }
    let separator = options.separator as u8;

    let file = File::open(path).map_err(|source| FrameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(separator)
        .quoting(false)
        .flexible(false)
        .from_reader(BufReader::new(file));

    let header: Option<Vec<String>> = if options.has_header {
        let headers = reader
            .headers()
            .map_err(|e| FrameError::Format(format!("failed to read CSV header: {e}")))?;
        Some(headers.iter().map(|s| s.trim().to_string()).collect())
    } else {
        None
    };

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        // field-count mismatches surface here as csv errors
        let record =
            result.map_err(|e| FrameError::Format(format!("CSV row {}: {e}", line + 1)))?;
        records.push(record);
    }

    let header = match header {
        Some(h) => h,
        // Synthetic Col1..ColN header from the first data line
        None => match records.first() {
            Some(first) => (1..=first.len()).map(|i| format!("Col{i}")).collect(),
            None => return Ok(DataFrame::new()),
        },
    };

    for (i, name) in header.iter().enumerate() {
        if header[..i].contains(name) {
            return Err(FrameError::Format(format!(
                "duplicate column name '{name}' in CSV header"
            )));
        }
    }

    let columns = header
        .into_iter()
        .enumerate()
        .map(|(j, name)| {
            let tokens = records
                .iter()
                .map(|record| {
                    let raw = record.get(j).unwrap_or("").trim();
                    if raw.is_empty() || options.is_na(raw) {
                        None
                    } else {
                        Some(raw.to_string())
                    }
                })
                .collect();
            column_from_tokens(name, tokens)
        })
        .collect();

    Ok(DataFrame::from_columns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::model::{Cell, ColumnKind};

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_basic_read_with_header() {
        let file = write_temp("a,b\n1,x\n3,y\n");
        let df = read(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_header(), vec!["a", "b"]);
        assert_eq!(df.get_double_column("a").unwrap(), vec![1.0, 3.0]);
        assert_eq!(df.get_string_column("b").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_synthetic_header() {
        let file = write_temp("1,2,3\n4,5,6\n");
        let options = CsvOptions {
            has_header: false,
            ..CsvOptions::default()
        };
        let df = read(file.path(), &options).unwrap();
        assert_eq!(df.get_header(), vec!["Col1", "Col2", "Col3"]);
        assert_eq!(df.shape(), (2, 3));
    }

    #[test]
    fn test_custom_separator() {
        let file = write_temp("a;b\n1;2\n");
        let options = CsvOptions {
            separator: ';',
            ..CsvOptions::default()
        };
        let df = read(file.path(), &options).unwrap();
        assert_eq!(df.get_double_column("b").unwrap(), vec![2.0]);
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        // 'é' is one char but two bytes in the file; accepting it would
        // silently collapse every line into a single column
        let file = write_temp("a\u{e9}b\n1\u{e9}2\n");
        let options = CsvOptions {
            separator: '\u{e9}',
            ..CsvOptions::default()
        };
        let err = read(file.path(), &options).unwrap_err();
        assert!(matches!(err, FrameError::Format(_)));
    }

    #[test]
    fn test_field_count_mismatch_is_fatal() {
        let file = write_temp("a,b\n1,2\n3\n");
        let err = read(file.path(), &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, FrameError::Format(_)));
    }

    #[test]
    fn test_blank_fields_are_missing() {
        let file = write_temp("a,b\n1,x\n,\n2,z\n");
        let df = read(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(df.get_column(0).unwrap().values[1], Cell::Missing);
        assert_eq!(df.get_column(1).unwrap().values[1], Cell::Missing);
        // blanks do not demote a numeric column
        assert_eq!(df.get_column(0).unwrap().kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_na_tokens_are_opt_in() {
        let file = write_temp("a\n1\nNA\n3\n");
        let df = read(file.path(), &CsvOptions::default()).unwrap();
        // without the option, "NA" is data and the column is categorical
        assert_eq!(df.get_column(0).unwrap().kind, ColumnKind::Categorical);

        let options = CsvOptions {
            na_tokens: vec!["NA".to_string()],
            ..CsvOptions::default()
        };
        let df = read(file.path(), &options).unwrap();
        assert_eq!(df.get_column(0).unwrap().kind, ColumnKind::Numeric);
        assert_eq!(df.get_column(0).unwrap().values[1], Cell::Missing);
    }

    #[test]
    fn test_mixed_column_is_categorical() {
        let file = write_temp("a\n1\nhello\n");
        let df = read(file.path(), &CsvOptions::default()).unwrap();
        let col = df.get_column(0).unwrap();
        assert_eq!(col.kind, ColumnKind::Categorical);
        // numeric-looking tokens keep their original text
        assert_eq!(col.values[0], Cell::from("1"));
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let file = write_temp("a,a\n1,2\n");
        assert!(matches!(
            read(file.path(), &CsvOptions::default()),
            Err(FrameError::Format(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read(Path::new("/no/such/file.csv"), &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, FrameError::Io { .. }));
    }
}
