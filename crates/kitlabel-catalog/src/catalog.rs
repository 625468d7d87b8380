//! Catalog lifecycle: unloaded, loading, ready or failed

use std::fmt;

use kitlabel_utils::error::{CatalogError, LoadError};

use crate::columns::ColumnMap;
use crate::field::FieldId;
use crate::record::ProductRecord;
use crate::source::{CatalogSource, RawRow};
use strum::IntoEnumIterator;

/// Load lifecycle of the catalog.
///
/// `Unloaded -> Loading -> Ready`, or `Unloaded -> Loading -> Failed`.
/// A `Failed` catalog may be loaded again; `Ready` is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Unloaded,
    Loading,
    Ready { records: usize },
    Failed { reason: String },
}

impl CatalogState {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

impl fmt::Display for CatalogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => f.write_str("unloaded"),
            Self::Loading => f.write_str("loading"),
            Self::Ready { records } => write!(f, "ready ({records} records)"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    state: CatalogState,
    records: Vec<ProductRecord>,
    columns: ColumnMap,
    skip_rows: usize,
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(ColumnMap::default(), 1)
    }
}

impl ProductCatalog {
    /// Empty, unloaded catalog using the given column layout.
    #[must_use]
    pub fn new(columns: ColumnMap, skip_rows: usize) -> Self {
        Self {
            state: CatalogState::Unloaded,
            records: Vec::new(),
            columns,
            skip_rows,
        }
    }

    /// Ready catalog over already-built records.
    #[must_use]
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        Self {
            state: CatalogState::Ready {
                records: records.len(),
            },
            records,
            columns: ColumnMap::default(),
            skip_rows: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Loaded records in catalog order. Empty unless `Ready`.
    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load records from a source.
    ///
    /// All rows must convert or nothing is kept. Loading a `Ready` catalog is
    /// a no-op returning the current record count.
    pub fn load(&mut self, source: &dyn CatalogSource) -> Result<usize, LoadError> {
        match &self.state {
            CatalogState::Ready { records } => {
                tracing::debug!(records, "Catalog already loaded");
                return Ok(*records);
            }
            CatalogState::Loading => return Err(LoadError::AlreadyLoading),
            CatalogState::Unloaded | CatalogState::Failed { .. } => {}
        }

        self.state = CatalogState::Loading;
        tracing::debug!(source = %source.describe(), "Loading catalog");

        match source
            .load_rows()
            .and_then(|rows| self.records_from_rows(rows))
        {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.state = CatalogState::Ready { records: count };
                tracing::info!(records = count, source = %source.describe(), "Catalog ready");
                Ok(count)
            }
            Err(e) => {
                self.records.clear();
                self.state = CatalogState::Failed {
                    reason: e.to_string(),
                };
                tracing::warn!(error = %e, "Catalog load failed");
                Err(e)
            }
        }
    }

    fn records_from_rows(&self, rows: Vec<RawRow>) -> Result<Vec<ProductRecord>, LoadError> {
        let mut records = Vec::new();
        for (index, row) in rows.into_iter().enumerate().skip(self.skip_rows) {
            let record = self.record_from_row(index + 1, row)?;
            if record.is_blank() {
                tracing::trace!(row = index + 1, "Skipping blank row");
                continue;
            }
            records.push(record);
        }
        Ok(records)
    }

    fn record_from_row(&self, row: usize, raw: RawRow) -> Result<ProductRecord, LoadError> {
        match raw {
            RawRow::Positional(cells) => Ok(ProductRecord::from_pairs(FieldId::iter().map(
                |field| {
                    let text = cells
                        .get(self.columns.index_of(field))
                        .map(|c| c.to_text())
                        .unwrap_or_default();
                    (field, text)
                },
            ))),
            RawRow::Keyed(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, cell) in map {
                    let field = FieldId::parse(&key).or_else(|| {
                        crate::columns::column_index(&key).and_then(|i| self.columns.field_at(i))
                    });
                    match field {
                        Some(field) => pairs.push((field, cell.to_text())),
                        None if key.trim().is_empty() => {
                            return Err(LoadError::InvalidRow {
                                row,
                                reason: "empty column key".to_string(),
                            });
                        }
                        None => tracing::trace!(row, key = %key, "Ignoring unmapped column"),
                    }
                }
                Ok(ProductRecord::from_pairs(pairs))
            }
        }
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), CatalogError> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(CatalogError::NotReady {
                state: self.state.to_string(),
            })
        }
    }
}
