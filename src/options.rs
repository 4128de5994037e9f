//! Grid configuration loading.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::column::Column;
use crate::value::CellValue;

/// Grid construction options: column declarations plus the initial data
/// matrix, indexed `data[y][x]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub columns: Vec<Column>,
    pub data: Vec<Vec<CellValue>>,
}

impl GridOptions {
    /// Parse an options document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid grid options document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn test_options_from_json() {
        let options = GridOptions::from_json(
            r##"{
                "columns": [
                    {"type": "text", "title": "Name"},
                    {"type": "numeric", "mask": "#,##0.00"},
                    {"type": "checkbox"}
                ],
                "data": [["Ada", 1234.5, true], ["Grace", 0, false]]
            }"##,
        )
        .expect("valid options");

        assert_eq!(options.columns.len(), 3);
        assert_eq!(options.columns[1].kind, ColumnType::Numeric);
        assert_eq!(options.data[0][1], CellValue::Number(1234.5));
        assert_eq!(options.data[1][2], CellValue::Bool(false));
    }

    #[test]
    fn test_invalid_json_reports_context() {
        let err = GridOptions::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("invalid grid options document"));
    }

    #[test]
    fn test_empty_document_defaults() {
        let options = GridOptions::from_json("{}").expect("empty options are valid");
        assert!(options.columns.is_empty());
        assert!(options.data.is_empty());
    }
}
