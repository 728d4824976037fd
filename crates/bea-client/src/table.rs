//! Conversion of BEA record nodes into data frames.

use crate::{Result, error::BeaError};
use polars::prelude::{Column, DataFrame, Schema};
use serde_json::{Map, Value};

/// Convert a record node into a table.
///
/// The node is either an array of objects (one row each) or a single object
/// (one row). Columns follow the order in which keys are first seen; records
/// missing a key get a null cell. Every cell is text.
pub(crate) fn records_to_frame(node: &str, value: &Value) -> Result<DataFrame> {
    let records: Vec<&Map<String, Value>> = match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object().ok_or_else(|| {
                    BeaError::UnexpectedShape(format!(
                        "`{node}` element {i} is a {}, expected an object",
                        kind(item)
                    ))
                })
            })
            .collect::<Result<_>>()?,
        Value::Object(map) => vec![map],
        other => {
            return Err(BeaError::UnexpectedShape(format!(
                "`{node}` is a {}, expected an array of objects",
                kind(other)
            )));
        }
    };

    let mut names: Vec<&str> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    // Records with no attributes still count as rows.
    if names.is_empty() {
        return Ok(DataFrame::full_null(&Schema::default(), records.len()));
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let cells: Vec<Option<String>> = records
                .iter()
                .map(|record| record.get(name).and_then(cell_text))
                .collect();
            Column::new(name.into(), cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(df: &DataFrame, name: &str, row: usize) -> Option<String> {
        let column = df.column(name).unwrap().as_materialized_series();
        column.str().unwrap().get(row).map(str::to_string)
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_array_becomes_one_row_per_record() {
        let node = json!([
            {"DatasetName": "NIPA", "DatasetDescription": "Standard NIPA tables"},
            {"DatasetName": "Regional", "DatasetDescription": "Regional data sets"},
            {"DatasetName": "ITA", "DatasetDescription": "International transactions"}
        ]);
        let df = records_to_frame("Dataset", &node).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(column_names(&df), ["DatasetName", "DatasetDescription"]);
        assert_eq!(cell(&df, "DatasetName", 1).as_deref(), Some("Regional"));
    }

    #[test]
    fn test_ragged_records_fill_nulls() {
        let node = json!([
            {"Key": "1", "Desc": "Personal income"},
            {"Key": "2", "Desc": "Population", "NoteRef": "a"}
        ]);
        let df = records_to_frame("ParamValue", &node).unwrap();

        assert_eq!(column_names(&df), ["Key", "Desc", "NoteRef"]);
        assert_eq!(cell(&df, "NoteRef", 0), None);
        assert_eq!(cell(&df, "NoteRef", 1).as_deref(), Some("a"));
    }

    #[test]
    fn test_non_string_cells_are_rendered_as_text() {
        let node = json!([{"Ordinal": 1, "IsValue": true, "Extra": {"a": 1}, "Gap": null}]);
        let df = records_to_frame("Dimensions", &node).unwrap();

        assert_eq!(cell(&df, "Ordinal", 0).as_deref(), Some("1"));
        assert_eq!(cell(&df, "IsValue", 0).as_deref(), Some("true"));
        assert_eq!(cell(&df, "Extra", 0).as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(cell(&df, "Gap", 0), None);
    }

    #[test]
    fn test_single_object_is_one_row() {
        let node = json!({"NoteRef": "1", "NoteText": "Source: BEA"});
        let df = records_to_frame("Notes", &node).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_empty_array_is_empty_table() {
        let df = records_to_frame("Notes", &json!([])).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }

    #[test]
    fn test_empty_records_keep_row_count() {
        let df = records_to_frame("Dataset", &json!([{}, {}, {}])).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 0);

        let df = records_to_frame("Notes", &json!({})).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_scalar_node_is_shape_error() {
        let err = records_to_frame("Data", &json!("nope")).unwrap_err();
        assert!(matches!(err, BeaError::UnexpectedShape(msg) if msg.contains("`Data` is a string")));
    }

    #[test]
    fn test_non_object_element_is_shape_error() {
        let err = records_to_frame("Data", &json!([{"a": "1"}, 5])).unwrap_err();
        assert!(matches!(err, BeaError::UnexpectedShape(msg) if msg.contains("element 1")));
    }
}
