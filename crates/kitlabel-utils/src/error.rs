use std::fmt;
use thiserror::Error;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `KitLabelError` is the primary error type returned by kitlabel library operations.
/// It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes for consistent error reporting
///
/// # Error Categories
///
/// | Category | Description |
/// |----------|-------------|
/// | `Config` | Configuration file or CLI argument errors |
/// | `Validation` | A requested cart mutation was rejected |
/// | `Cart` | Cart rejections (capacity, unknown entry) |
/// | `Load` | Catalog or template collaborator failures |
/// | `Catalog` | Search on a catalog that is not ready |
/// | `Render` | Template/variable mismatch |
/// | `Batch` | A batch failed as a whole because one entry failed |
/// | `Persistence` | Cart state could not be read or written |
/// | `Delivery` | A finished print job could not be written |
///
/// # Exit Code Mapping
///
/// Use [`to_exit_code()`](Self::to_exit_code) to map errors to CLI exit codes.
///
/// Library code returns `KitLabelError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum KitLabelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("No product matches code '{query}'")]
    ProductNotFound { query: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Capacity,
    Loading,
    Rendering,
    Persistence,
    Output,
    FileSystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Validation => write!(f, "Validation"),
            Self::Capacity => write!(f, "Capacity"),
            Self::Loading => write!(f, "Loading"),
            Self::Rendering => write!(f, "Rendering"),
            Self::Persistence => write!(f, "Persistence"),
            Self::Output => write!(f, "Output"),
            Self::FileSystem => write!(f, "File System"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

/// Rejections of a requested mutation or a malformed input value.
///
/// These are recovered locally: the mutation is refused and the caller is told why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown kit type '{value}' (expected fork, shock or combi)")]
    UnknownKitType { value: String },

    #[error("Record is missing required field(s) {}: {rule}", .fields.join(", "))]
    MissingFields {
        fields: Vec<String>,
        rule: &'static str,
    },
}

/// Cart mutation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Cart is full ({max} entries maximum)")]
    Full { max: usize },

    #[error("No cart entry with id {id}")]
    UnknownEntry { id: u64 },
}

/// Catalog and template collaborator failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Row {row} is malformed: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Catalog is already loading")]
    AlreadyLoading,
}

/// Search attempted before the catalog became usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog is not ready (state: {state})")]
    NotReady { state: String },
}

/// Template/variable mismatches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Template '{kind}' is missing or empty at {path}")]
    MissingTemplate { kind: String, path: String },

    #[error("Template '{template}' uses unknown placeholder(s): {}", .names.join(", "))]
    UnknownPlaceholders { template: String, names: Vec<String> },

    #[error("Template '{template}' has unresolved placeholder(s): {}", .names.join(", "))]
    UnresolvedPlaceholders { template: String, names: Vec<String> },
}

/// A batch fails as a whole when any single entry fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Entry {entry_id} ({product_code}) failed to render: {source}")]
    Entry {
        entry_id: u64,
        product_code: String,
        #[source]
        source: RenderError,
    },
}

/// Cart state storage failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Failed to read cart state at {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write cart state at {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Failed to serialize cart state: {reason}")]
    Serialize { reason: String },

    #[error("Cart state at {path} is locked by another kitlabel process")]
    Locked { path: String },
}

/// Print job delivery failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Failed to write {destination} print job to {path}: {reason}")]
    Write {
        destination: String,
        path: String,
        reason: String,
    },

    #[error("No free file name for job '{job_name}' in {dir} after {attempts} attempts")]
    NameExhausted {
        job_name: String,
        dir: String,
        attempts: u32,
    },
}

impl UserFriendlyError for KitLabelError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(ConfigError::InvalidValue { key, value }) => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::Config(err) => err.to_string(),
            Self::Validation(err) | Self::Cart(CartError::Validation(err)) => {
                format!("The request was rejected: {err}")
            }
            Self::Cart(CartError::Full { max }) => {
                format!("The cart already holds the maximum of {max} entries")
            }
            Self::Cart(CartError::UnknownEntry { id }) => {
                format!("Cart entry {id} does not exist")
            }
            Self::Load(err) => format!("Could not load data: {err}"),
            Self::Catalog(err) => err.to_string(),
            Self::Render(err) => format!("Label templates cannot be rendered: {err}"),
            Self::Batch(BatchError::Entry {
                entry_id,
                product_code,
                ..
            }) => {
                format!(
                    "Batch aborted: cart entry {entry_id} ({product_code}) could not be rendered"
                )
            }
            Self::Persistence(err) => err.to_string(),
            Self::Delivery(err) => format!("Print jobs were not delivered: {err}"),
            Self::ProductNotFound { query } => {
                format!("No product has a fork, shock or combi code equal to '{query}'")
            }
            Self::Io(err) => format!("File operation failed: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(_) => Some(
                "Configuration is read from .kitlabel/config.toml, $KITLABEL_HOME or --config."
                    .to_string(),
            ),
            Self::Cart(CartError::Full { .. }) => Some(
                "Large batches are split across several generate runs to keep print jobs bounded."
                    .to_string(),
            ),
            Self::Batch(BatchError::Entry { source, .. }) => Some(format!(
                "No documents were produced for any entry. Cause: {source}"
            )),
            Self::Render(RenderError::UnknownPlaceholders { .. }) => Some(
                "Every {{placeholder}} in a template must be a variable the label builder produces."
                    .to_string(),
            ),
            Self::Delivery(_) => Some(
                "The cart is kept when delivery fails; no partial job set is left behind."
                    .to_string(),
            ),
            Self::Load(_) => Some(
                "The catalog is not usable until it loads completely; no partial catalog is kept."
                    .to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(_) => vec![
                "Run 'kitlabel config show' to inspect the effective configuration".to_string(),
                "Check the TOML syntax of the configuration file".to_string(),
            ],
            Self::Validation(ValidationError::UnknownKitType { .. })
            | Self::Cart(CartError::Validation(ValidationError::UnknownKitType { .. })) => {
                vec!["Use one of: fork, shock, combi".to_string()]
            }
            Self::Validation(ValidationError::MissingFields { .. })
            | Self::Cart(CartError::Validation(ValidationError::MissingFields { .. })) => vec![
                "Fix the product row in the spreadsheet and re-export the catalog".to_string(),
            ],
            Self::Cart(CartError::Full { .. }) => vec![
                "Generate the current batch, then add the remaining kits".to_string(),
                "Remove entries with 'kitlabel cart remove <id>'".to_string(),
            ],
            Self::Cart(CartError::UnknownEntry { .. }) => {
                vec!["List entry ids with 'kitlabel cart list'".to_string()]
            }
            Self::Load(_) => vec![
                "Check that the catalog path in the configuration exists".to_string(),
                "Re-export the spreadsheet as JSON".to_string(),
            ],
            Self::Catalog(_) => vec!["Load the catalog before searching".to_string()],
            Self::Render(_) | Self::Batch(_) => vec![
                "Run 'kitlabel templates check' to list placeholder problems".to_string(),
                "Regenerate the whole batch after fixing the cause".to_string(),
            ],
            Self::Persistence(PersistenceError::Locked { .. }) => {
                vec!["Wait for the other kitlabel command to finish".to_string()]
            }
            Self::Delivery(DeliveryError::Write { .. }) => vec![
                "Check that the output directory is writable".to_string(),
                "Pass another directory with 'kitlabel generate --out <dir>'".to_string(),
            ],
            Self::Delivery(DeliveryError::NameExhausted { .. }) => {
                vec!["Move finished job files out of the output directory".to_string()]
            }
            Self::Persistence(_) | Self::Io(_) => {
                vec!["Check permissions of the state and output directories".to_string()]
            }
            Self::ProductNotFound { .. } => vec![
                "Use 'kitlabel search <partial code>' to find the exact code".to_string(),
            ],
            _ => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Validation(_) | Self::Cart(CartError::Validation(_)) => {
                ErrorCategory::Validation
            }
            Self::Cart(CartError::Full { .. }) => ErrorCategory::Capacity,
            Self::Cart(CartError::UnknownEntry { .. }) | Self::ProductNotFound { .. } => {
                ErrorCategory::Validation
            }
            Self::Load(_) | Self::Catalog(_) => ErrorCategory::Loading,
            Self::Render(_) | Self::Batch(_) => ErrorCategory::Rendering,
            Self::Persistence(_) => ErrorCategory::Persistence,
            Self::Delivery(_) => ErrorCategory::Output,
            Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

impl KitLabelError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    ///
    /// | Exit Code | Name | Description |
    /// |-----------|------|-------------|
    /// | 1 | INTERNAL | General failure |
    /// | 2 | CLI_ARGS | Invalid CLI arguments or configuration |
    /// | 3 | LOAD_FAILURE | Catalog or templates could not be loaded |
    /// | 4 | VALIDATION | A mutation was rejected |
    /// | 5 | CART_FULL | Cart at capacity |
    /// | 6 | RENDER_FAILURE | Templates could not be rendered |
    /// | 7 | NOT_FOUND | Product or cart entry not found |
    /// | 8 | DELIVERY_FAILURE | Print jobs could not be written |
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::Validation(_) | Self::Cart(CartError::Validation(_)) => ExitCode::VALIDATION,
            Self::Cart(CartError::Full { .. }) => ExitCode::CART_FULL,
            Self::Cart(CartError::UnknownEntry { .. }) | Self::ProductNotFound { .. } => {
                ExitCode::NOT_FOUND
            }
            Self::Load(_) | Self::Catalog(_) => ExitCode::LOAD_FAILURE,
            Self::Render(_) | Self::Batch(_) => ExitCode::RENDER_FAILURE,
            Self::Delivery(_) => ExitCode::DELIVERY_FAILURE,
            Self::Persistence(_) | Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}
