//! Product catalog for kitlabel
//!
//! Records come from a spreadsheet export (one row per product). The catalog
//! owns the load state machine and the two code lookups used by the front end:
//! substring search over the three code fields and exact lookup with kit-type
//! inference.

mod catalog;
mod columns;
mod field;
mod record;
mod search;
mod source;

pub use catalog::{CatalogState, ProductCatalog};
pub use columns::{ColumnMap, column_index, column_letter};
pub use field::{CODE_FIELDS, FieldId};
pub use record::ProductRecord;
pub use search::{ExactMatch, MAX_FUZZY_RESULTS, MIN_QUERY_LEN};
pub use source::{CatalogSource, Cell, JsonCatalogSource, RawRow, StaticCatalogSource};
