//! Fuzzy and exact product code search

use kitlabel_utils::error::CatalogError;
use kitlabel_utils::types::KitType;

use crate::catalog::ProductCatalog;
use crate::field::CODE_FIELDS;
use crate::record::ProductRecord;

/// Queries shorter than this (in characters, after trimming) match nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Maximum number of records returned by a fuzzy search.
pub const MAX_FUZZY_RESULTS: usize = 50;

/// Result of an exact code lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactMatch<'a> {
    pub record: &'a ProductRecord,
    /// Kit type inferred from the code field that matched.
    pub kit_type: KitType,
}

impl ProductCatalog {
    /// Case-insensitive substring search over the three code fields.
    ///
    /// Results keep catalog order and are capped at [`MAX_FUZZY_RESULTS`].
    pub fn fuzzy_search(&self, query: &str) -> Result<Vec<&ProductRecord>, CatalogError> {
        self.ensure_ready()?;

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        Ok(self
            .records()
            .iter()
            .filter(|record| {
                CODE_FIELDS.iter().any(|(field, _)| {
                    let code = record.get(*field);
                    !code.is_empty() && code.to_lowercase().contains(&needle)
                })
            })
            .take(MAX_FUZZY_RESULTS)
            .collect())
    }

    /// Case-insensitive exact lookup by product code.
    ///
    /// Records are scanned in catalog order; within a record the fork code is
    /// checked before the shock code before the combi code. The first record
    /// with any matching code wins and the matching field decides the kit type.
    pub fn exact_search(&self, query: &str) -> Result<Option<ExactMatch<'_>>, CatalogError> {
        self.ensure_ready()?;

        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let needle = query.to_lowercase();

        for record in self.records() {
            for (field, kit_type) in CODE_FIELDS {
                let code = record.get(field);
                if !code.is_empty() && code.to_lowercase() == needle {
                    return Ok(Some(ExactMatch { record, kit_type }));
                }
            }
        }
        Ok(None)
    }
}
