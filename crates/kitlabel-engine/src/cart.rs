//! The pending print batch
//!
//! Entries keep insertion order, which is also the order labels are
//! generated in. Every mutation notifies the registered listeners
//! synchronously, in registration order.
//!
//! Ids come from a counter that wraps back to 1 after [`ID_CEILING`]. The
//! ceiling is far above [`MAX_ITEMS`], and ids still held by live entries are
//! skipped after a wrap, so an id is never shared by two live entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error;

use kitlabel_catalog::{FieldId, ProductRecord};
use kitlabel_utils::error::{CartError, ValidationError};
use kitlabel_utils::types::KitType;

use crate::expansion::{self, LabelCounts};

/// Maximum number of entries in a cart
pub const MAX_ITEMS: usize = 500;
/// Largest id handed out before the counter wraps to 1
pub const ID_CEILING: u64 = 1_000_000_000;
pub const MIN_QUANTITY: u8 = 1;
pub const MAX_QUANTITY: u8 = 99;

const _: () = assert!((MAX_ITEMS as u64) < ID_CEILING);

/// Rule name reported when identifying fields are missing.
pub const REQUIRED_FIELDS_RULE: &str = "a cart entry needs a product code, a brand and a model";

/// Clamp a requested quantity into `[MIN_QUANTITY, MAX_QUANTITY]`.
#[must_use]
pub fn clamp_quantity(requested: i64) -> u8 {
    let clamped = requested.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY));
    u8::try_from(clamped).unwrap_or(MAX_QUANTITY)
}

/// Check a record carries at least one code, a brand and a model.
///
/// All missing fields are reported together.
pub fn validate_record(record: &ProductRecord) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if record.first_code().is_none() {
        missing.push("fork_code|shock_code|combi_code".to_string());
    }
    for field in [FieldId::BrandName, FieldId::ModelType] {
        if !record.has(field) {
            missing.push(field.as_str().to_string());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields {
            fields: missing,
            rule: REQUIRED_FIELDS_RULE,
        })
    }
}

/// One line of the print batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: u64,
    /// Copy of the catalog record taken when the entry was added
    pub record: ProductRecord,
    pub kit_type: KitType,
    pub quantity: u8,
    pub created_at: DateTime<Utc>,
}

impl CartEntry {
    /// Code for the entry's kit type, or the first code present.
    #[must_use]
    pub fn product_code(&self) -> &str {
        let code = self.record.code_for(self.kit_type);
        if code.is_empty() {
            self.record.first_code().map_or("", |(_, c)| c)
        } else {
            code
        }
    }

    /// `"{brand} {model} {year}"` with absent parts dropped.
    #[must_use]
    pub fn display_name(&self) -> String {
        [FieldId::BrandName, FieldId::ModelType, FieldId::Year]
            .iter()
            .map(|f| self.record.get(*f))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Documents this entry contributes to a batch.
    #[must_use]
    pub fn counts(&self) -> LabelCounts {
        expansion::expand(self.kit_type, u32::from(self.quantity))
    }
}

/// What changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    Added { id: u64 },
    Removed { id: u64 },
    QuantityUpdated { id: u64, quantity: u8 },
    Cleared { removed: usize },
}

/// Failure reported by a cart listener.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Callback invoked after every cart mutation.
pub type CartListener = Box<dyn FnMut(&CartEvent) -> Result<(), ListenerError> + Send>;

/// Ordered collection of cart entries.
pub struct Cart {
    entries: Vec<CartEntry>,
    next_id: u64,
    listeners: Vec<CartListener>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("entries", &self.entries)
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Rebuild a cart from already validated entries.
    ///
    /// `next_id` is normalized into `1..=ID_CEILING`.
    #[must_use]
    pub fn restore(entries: Vec<CartEntry>, next_id: u64) -> Self {
        Self {
            entries,
            next_id: next_id.clamp(1, ID_CEILING),
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe(&mut self, listener: CartListener) {
        self.listeners.push(listener);
    }

    /// Add a product to the cart.
    ///
    /// The quantity is clamped to `[1, 99]`. The record is copied, so later
    /// catalog changes do not affect the entry.
    ///
    /// # Errors
    ///
    /// [`CartError::Full`] at [`MAX_ITEMS`] entries, or
    /// [`CartError::Validation`] when code, brand or model is missing.
    pub fn add(
        &mut self,
        record: &ProductRecord,
        kit_type: KitType,
        quantity: i64,
    ) -> Result<CartEntry, CartError> {
        if self.entries.len() >= MAX_ITEMS {
            return Err(CartError::Full { max: MAX_ITEMS });
        }
        validate_record(record)?;

        let quantity = Self::clamp_logged(quantity);
        let entry = CartEntry {
            id: self.allocate_id(),
            record: record.clone(),
            kit_type,
            quantity,
            created_at: Utc::now(),
        };
        tracing::debug!(
            id = entry.id,
            product_code = entry.product_code(),
            kit_type = %kit_type,
            quantity,
            "Added cart entry"
        );
        self.entries.push(entry.clone());
        self.notify(&CartEvent::Added { id: entry.id });
        Ok(entry)
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: u64) -> Result<CartEntry, CartError> {
        let index = self.position(id)?;
        let entry = self.entries.remove(index);
        self.notify(&CartEvent::Removed { id });
        Ok(entry)
    }

    /// Change an entry's quantity, clamped like [`add`](Self::add).
    pub fn update_quantity(&mut self, id: u64, quantity: i64) -> Result<CartEntry, CartError> {
        let index = self.position(id)?;
        let quantity = Self::clamp_logged(quantity);
        self.entries[index].quantity = quantity;
        let entry = self.entries[index].clone();
        self.notify(&CartEvent::QuantityUpdated { id, quantity });
        Ok(entry)
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.notify(&CartEvent::Cleared { removed });
        removed
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ITEMS
    }

    /// Id the next added entry will receive (before live-id skipping).
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Label counts for the whole cart, derived from the expansion rules.
    #[must_use]
    pub fn summary(&self) -> LabelCounts {
        self.entries.iter().map(CartEntry::counts).sum()
    }

    fn position(&self, id: u64) -> Result<usize, CartError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CartError::UnknownEntry { id })
    }

    fn clamp_logged(requested: i64) -> u8 {
        let quantity = clamp_quantity(requested);
        if i64::from(quantity) != requested {
            tracing::warn!(requested, clamped = quantity, "Quantity clamped to 1..=99");
        }
        quantity
    }

    fn allocate_id(&mut self) -> u64 {
        loop {
            let id = self.next_id;
            self.next_id = if id >= ID_CEILING { 1 } else { id + 1 };
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    fn notify(&mut self, event: &CartEvent) {
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(listener = index, error = %e, ?event, "Cart listener failed");
                }
                Err(_) => {
                    tracing::warn!(listener = index, ?event, "Cart listener panicked");
                }
            }
        }
    }
}
