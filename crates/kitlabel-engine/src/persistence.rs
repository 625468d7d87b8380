//! Cart persistence
//!
//! The cart is stored as a versioned snapshot whose entries are covered by a
//! blake3 hash of their JCS-canonical JSON. A snapshot that fails any check
//! is discarded as a whole and the cart starts empty.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use kitlabel_utils::atomic_write::write_file_atomic;
use kitlabel_utils::error::PersistenceError;

use crate::cart::{Cart, CartEntry, ID_CEILING, MAX_ITEMS, MAX_QUANTITY, MIN_QUANTITY};

/// Schema version written into every snapshot
pub const CART_SCHEMA_VERSION: u32 = 1;
/// Snapshot file name inside the state directory
pub const CART_FILE_NAME: &str = "cart.json";

/// Serialized cart state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub next_id: u64,
    pub entries: Vec<CartEntry>,
    /// blake3 of the JCS-canonical `entries` array
    pub content_hash: String,
}

/// Why a stored snapshot was discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRejection {
    #[error("snapshot is not valid JSON for this schema: {0}")]
    Malformed(String),

    #[error("schema version {found} is not supported (expected {CART_SCHEMA_VERSION})")]
    SchemaVersion { found: u32 },

    #[error("content hash does not match the stored entries")]
    HashMismatch,

    #[error("snapshot holds {count} entries, more than the {MAX_ITEMS} allowed")]
    TooManyEntries { count: usize },

    #[error("entry {id} is invalid: {reason}")]
    InvalidEntry { id: u64, reason: String },
}

/// Hash of the entries' canonical JSON.
pub fn content_hash(entries: &[CartEntry]) -> Result<String, PersistenceError> {
    let value = serde_json::to_value(entries).map_err(|e| PersistenceError::Serialize {
        reason: e.to_string(),
    })?;
    let canonical =
        serde_json_canonicalizer::to_vec(&value).map_err(|e| PersistenceError::Serialize {
            reason: format!("Failed to canonicalize cart entries: {e}"),
        })?;
    Ok(blake3::hash(&canonical).to_hex().to_string())
}

impl CartSnapshot {
    /// Capture the cart's entries and id counter.
    pub fn from_cart(cart: &Cart) -> Result<Self, PersistenceError> {
        let entries = cart.entries().to_vec();
        Ok(Self {
            schema_version: CART_SCHEMA_VERSION,
            saved_at: Utc::now(),
            next_id: cart.next_id(),
            content_hash: content_hash(&entries)?,
            entries,
        })
    }

    /// Parse and verify a stored snapshot.
    pub fn parse(content: &str) -> Result<Self, SnapshotRejection> {
        let snapshot: Self = serde_json::from_str(content)
            .map_err(|e| SnapshotRejection::Malformed(e.to_string()))?;
        snapshot.verify()?;
        Ok(snapshot)
    }

    /// Check schema version, hash, size and every entry.
    pub fn verify(&self) -> Result<(), SnapshotRejection> {
        if self.schema_version != CART_SCHEMA_VERSION {
            return Err(SnapshotRejection::SchemaVersion {
                found: self.schema_version,
            });
        }

        let expected = content_hash(&self.entries)
            .map_err(|e| SnapshotRejection::Malformed(e.to_string()))?;
        if expected != self.content_hash {
            return Err(SnapshotRejection::HashMismatch);
        }

        if self.entries.len() > MAX_ITEMS {
            return Err(SnapshotRejection::TooManyEntries {
                count: self.entries.len(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let invalid = |reason: String| SnapshotRejection::InvalidEntry {
                id: entry.id,
                reason,
            };
            if entry.id == 0 || entry.id > ID_CEILING {
                return Err(invalid("id out of range".to_string()));
            }
            if !seen.insert(entry.id) {
                return Err(invalid("duplicate id".to_string()));
            }
            if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&entry.quantity) {
                return Err(invalid(format!("quantity {} out of range", entry.quantity)));
            }
            crate::cart::validate_record(&entry.record).map_err(|e| invalid(e.to_string()))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn into_cart(self) -> Cart {
        Cart::restore(self.entries, self.next_id)
    }
}

/// Durable cart storage.
pub trait CartStore {
    /// Load the stored cart; an absent or discarded snapshot yields an empty cart.
    fn load(&self) -> Result<Cart, PersistenceError>;

    fn save(&self, cart: &Cart) -> Result<(), PersistenceError>;

    fn clear(&self) -> Result<(), PersistenceError>;
}

/// Stores the cart as `<state_dir>/cart.json`.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    state_dir: Utf8PathBuf,
}

impl FileCartStore {
    pub fn new(state_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    #[must_use]
    pub fn state_dir(&self) -> &Utf8Path {
        &self.state_dir
    }

    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.state_dir.join(CART_FILE_NAME)
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Result<Cart, PersistenceError> {
        let path = self.path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path, "No stored cart");
                return Ok(Cart::new());
            }
            Err(e) => {
                return Err(PersistenceError::Read {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        match CartSnapshot::parse(&content) {
            Ok(snapshot) => {
                tracing::debug!(path = %path, entries = snapshot.entries.len(), "Restored cart");
                Ok(snapshot.into_cart())
            }
            Err(rejection) => {
                tracing::warn!(path = %path, reason = %rejection, "Discarding stored cart");
                self.clear()?;
                Ok(Cart::new())
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), PersistenceError> {
        let snapshot = CartSnapshot::from_cart(cart)?;
        let json =
            serde_json::to_string_pretty(&snapshot).map_err(|e| PersistenceError::Serialize {
                reason: e.to_string(),
            })?;
        let path = self.path();
        write_file_atomic(&path, &json).map_err(|e| PersistenceError::Write {
            path: path.to_string(),
            reason: format!("{e:#}"),
        })?;
        tracing::debug!(path = %path, entries = cart.len(), "Saved cart");
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        let path = self.path();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Write {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
