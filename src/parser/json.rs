//! JSON dataset parser (array-of-objects or object-of-arrays)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{FrameError, Result};
use crate::model::{Cell, Column, DataFrame};

/// Read a JSON document into a fresh frame.
///
/// Two shapes are accepted: an array of objects (one object per row, all
/// objects carrying the same key set) or an object of equal-length arrays
/// (one array per column). Key order of the first object / the outer
/// object decides column order. `null` maps to `Missing`.
pub fn read(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| FrameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| FrameError::Format(format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(records) => from_records(records),
        Value::Object(map) => from_column_map(map),
        _ => Err(FrameError::Format(
            "JSON root must be an array of objects or an object of arrays".to_string(),
        )),
    }
}

/// Row-oriented shape: `[{"a": 1, "b": "x"}, ...]`
fn from_records(records: Vec<Value>) -> Result<DataFrame> {
    let first = match records.first() {
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            return Err(FrameError::Format(
                "JSON array elements must be objects".to_string(),
            ))
        }
        None => {
            return Err(FrameError::Format(
                "empty JSON array: no header can be derived".to_string(),
            ))
        }
    };
    let header: Vec<String> = first.keys().cloned().collect();

    // Every record must carry exactly the header's key set
    for (i, record) in records.iter().enumerate() {
        let obj = match record {
            Value::Object(obj) => obj,
            _ => {
                return Err(FrameError::Format(format!(
                    "JSON record {i} is not an object"
                )))
            }
        };
        if obj.len() != header.len() || !header.iter().all(|k| obj.contains_key(k)) {
            return Err(FrameError::Format(format!(
                "JSON record {i} does not match the key set of the first record"
            )));
        }
    }

    let columns = header
        .into_iter()
        .map(|name| {
            let cells = records
                .iter()
                .map(|record| {
                    // key presence was validated above
                    let value = record
                        .as_object()
                        .and_then(|obj| obj.get(&name))
                        .unwrap_or(&Value::Null);
                    scalar_to_cell(&name, value)
                })
                .collect::<Result<Vec<Cell>>>()?;
            Ok(Column::from_cells(name, cells))
        })
        .collect::<Result<Vec<Column>>>()?;

    Ok(DataFrame::from_columns(columns))
}

/// Column-oriented shape: `{"a": [1, 2], "b": ["x", "y"]}`
fn from_column_map(map: Map<String, Value>) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(map.len());
    let mut expected_len: Option<usize> = None;

    for (name, value) in map {
        let items = match value {
            Value::Array(items) => items,
            _ => {
                return Err(FrameError::Format(format!(
                    "JSON key '{name}' must map to an array of values"
                )))
            }
        };
        match expected_len {
            None => expected_len = Some(items.len()),
            Some(len) if len != items.len() => {
                return Err(FrameError::Format(format!(
                    "JSON column '{name}' has {} values, expected {len}",
                    items.len()
                )))
            }
            Some(_) => {}
        }
        let cells = items
            .iter()
            .map(|v| scalar_to_cell(&name, v))
            .collect::<Result<Vec<Cell>>>()?;
        columns.push(Column::from_cells(name, cells));
    }

    Ok(DataFrame::from_columns(columns))
}

fn scalar_to_cell(column: &str, value: &Value) -> Result<Cell> {
    match value {
        Value::Null => Ok(Cell::Missing),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(Cell::Number(f)),
            None => Err(FrameError::Format(format!(
                "number {n} in column '{column}' cannot be represented as f64"
            ))),
        },
        Value::String(s) => Ok(Cell::Text(s.clone())),
        Value::Bool(b) => Ok(Cell::Text(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(FrameError::Format(format!(
            "nested value in column '{column}': cells must be scalars"
        ))),
    }
}
