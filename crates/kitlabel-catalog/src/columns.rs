//! Spreadsheet column letters and the field-to-column map

use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use kitlabel_utils::error::ConfigError;

use crate::field::FieldId;

/// Zero-based index of a spreadsheet column letter (`A` = 0, `AA` = 26).
#[must_use]
pub fn column_index(letter: &str) -> Option<usize> {
    let letter = letter.trim();
    if letter.is_empty() || letter.len() > 3 {
        return None;
    }
    let mut index = 0usize;
    for c in letter.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        index = index * 26 + digit;
    }
    Some(index - 1)
}

/// Spreadsheet column letter for a zero-based index.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Which spreadsheet column holds each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: BTreeMap<FieldId, usize>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            columns: FieldId::iter().map(|f| (f, f.default_column())).collect(),
        }
    }
}

impl ColumnMap {
    /// Default layout with `field name -> column letter` overrides applied.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut map = Self::default();
        for (name, letter) in overrides {
            let field = FieldId::parse(name).ok_or_else(|| ConfigError::InvalidValue {
                key: format!("columns.{name}"),
                value: "unknown catalog field".to_string(),
            })?;
            let index = column_index(letter).ok_or_else(|| ConfigError::InvalidValue {
                key: format!("columns.{name}"),
                value: format!("'{letter}' is not a spreadsheet column letter"),
            })?;
            map.columns.insert(field, index);
        }
        Ok(map)
    }

    #[must_use]
    pub fn index_of(&self, field: FieldId) -> usize {
        self.columns
            .get(&field)
            .copied()
            .unwrap_or_else(|| field.default_column())
    }

    /// Field stored in the given column, if any.
    #[must_use]
    pub fn field_at(&self, index: usize) -> Option<FieldId> {
        self.columns
            .iter()
            .find(|(_, i)| **i == index)
            .map(|(f, _)| *f)
    }
}
