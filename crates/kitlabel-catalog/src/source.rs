//! Catalog load collaborators
//!
//! A [`CatalogSource`] hands the catalog raw spreadsheet rows. Turning rows
//! into records (column mapping, header skipping, blank-row filtering) is
//! done by [`ProductCatalog::load`](crate::ProductCatalog::load).

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use kitlabel_utils::error::LoadError;

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Cell {
    /// Display text of the cell, trimmed.
    ///
    /// Whole numbers are rendered without a fractional part.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.to_string()
                } else if let Some(u) = n.as_u64() {
                    u.to_string()
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
                        Some(f) => f.to_string(),
                        None => n.to_string(),
                    }
                }
            }
        }
    }

    fn from_value(row: usize, value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Null => Ok(Self::Empty),
            Value::String(s) => Ok(Self::Text(s)),
            Value::Number(n) => Ok(Self::Number(n)),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Array(_) | Value::Object(_) => Err(LoadError::InvalidRow {
                row,
                reason: "cells must be strings, numbers, booleans or null".to_string(),
            }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One spreadsheet row as exported.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRow {
    /// Cells by position; index 0 is column A.
    Positional(Vec<Cell>),
    /// Cells keyed by column letter or field name.
    Keyed(BTreeMap<String, Cell>),
}

impl RawRow {
    /// Convert a JSON value into a row; `row` is the 1-based row number for errors.
    pub fn from_value(row: usize, value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Array(cells) => cells
                .into_iter()
                .map(|cell| Cell::from_value(row, cell))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Positional),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, cell)| Cell::from_value(row, cell).map(|c| (key, c)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Keyed),
            _ => Err(LoadError::InvalidRow {
                row,
                reason: "row must be an array of cells or an object".to_string(),
            }),
        }
    }
}

/// Supplies raw rows to the catalog.
pub trait CatalogSource {
    /// Human-readable origin used in logs.
    fn describe(&self) -> String;

    /// Read every row, header rows included.
    fn load_rows(&self) -> Result<Vec<RawRow>, LoadError>;
}

/// Reads a JSON export of the product spreadsheet.
///
/// The file holds an array of rows; each row is an array of cells or an
/// object keyed by column letter (`"A"`) or field name (`"brand_name"`).
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse rows from JSON text; `origin` names the source in errors.
    pub fn parse_rows(origin: &str, content: &str) -> Result<Vec<RawRow>, LoadError> {
        let value: Value = serde_json::from_str(content).map_err(|e| LoadError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;

        let Value::Array(rows) = value else {
            return Err(LoadError::Parse {
                path: origin.to_string(),
                reason: "expected a top-level array of rows".to_string(),
            });
        };

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| RawRow::from_value(i + 1, row))
            .collect()
    }
}

impl CatalogSource for JsonCatalogSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| LoadError::Read {
            path: self.describe(),
            reason: e.to_string(),
        })?;
        Self::parse_rows(&self.describe(), &content)
    }
}

/// In-memory rows, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    rows: Vec<RawRow>,
}

impl StaticCatalogSource {
    #[must_use]
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.rows.len())
    }

    fn load_rows(&self) -> Result<Vec<RawRow>, LoadError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitlabel_utils::test_support::SAMPLE_CATALOG_JSON;

    #[test]
    fn test_number_cells_render_without_trailing_zero() {
        let rows = JsonCatalogSource::parse_rows("t", "[[2020, 0.48, 110.0, -3, true, null]]")
            .unwrap();
        let RawRow::Positional(cells) = &rows[0] else {
            panic!("expected positional row");
        };
        let texts: Vec<String> = cells.iter().map(Cell::to_text).collect();
        assert_eq!(texts, ["2020", "0.48", "110", "-3", "true", ""]);
    }

    #[test]
    fn test_sample_catalog_parses() {
        let rows = JsonCatalogSource::parse_rows("sample", SAMPLE_CATALOG_JSON).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_keyed_rows() {
        let rows =
            JsonCatalogSource::parse_rows("t", r#"[{"A": "F-1", "brand_name": "BMW"}]"#).unwrap();
        let RawRow::Keyed(map) = &rows[0] else {
            panic!("expected keyed row");
        };
        assert_eq!(map.get("A"), Some(&Cell::from("F-1")));
    }

    #[test]
    fn test_nested_cell_is_invalid_row() {
        let err = JsonCatalogSource::parse_rows("t", r#"[["ok"], [["nested"]]]"#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_non_array_document_is_parse_error() {
        let err = JsonCatalogSource::parse_rows("t", r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let err = JsonCatalogSource::parse_rows("t", "not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = JsonCatalogSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.load_rows(), Err(LoadError::Read { .. })));
    }
}
