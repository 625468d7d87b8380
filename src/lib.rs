//! kitlabel - batch ZPL label generation for suspension kits
//!
//! kitlabel turns a product catalog (a JSON export of the kit spreadsheet)
//! into print-ready ZPL documents. Products are looked up by code, collected
//! into a cart with a kit type and quantity, and rendered as one document for
//! the large-label printer and one for the small-label printer.
//!
//! kitlabel can be used in two ways:
//! - **CLI**: run `kitlabel search`, `kitlabel cart add`, `kitlabel generate`
//! - **Library**: build an [`AppContext`] from a [`Config`] and call its
//!   operations directly
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Find a product by partial code
//! kitlabel search HD14
//!
//! # Add two combi kits to the cart
//! kitlabel cart add SP-HD14-SSE001REV --qty 2
//!
//! # Render the cart into out/job_<timestamp>_BIG.zpl and _SMALL.zpl
//! kitlabel generate
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use kitlabel::{AppContext, Config};
//!
//! let config = Config::builder()
//!     .catalog_path("catalog.json")
//!     .templates_dir("templates")
//!     .build()?;
//! let mut ctx = AppContext::init(config)?;
//! ctx.add_to_cart("SP-HD14-SSE001REV", None, 1)?;
//! let batch = ctx.generate()?;
//! println!("{} big / {} small", batch.counts.big, batch.counts.total_small());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ============================================================================
// Public API
// ============================================================================

/// Configuration with discovery and precedence: CLI > config file > defaults.
pub use kitlabel_config::{CliArgs, Config, ConfigBuilder, ConfigSource};

/// Library error type and CLI exit codes.
pub use kitlabel_utils::error::{KitLabelError, UserFriendlyError};
pub use kitlabel_utils::exit_codes::ExitCode;

/// Kit types a cart entry can be printed as.
pub use kitlabel_utils::types::KitType;

pub use kitlabel_catalog::{ExactMatch, FieldId, ProductCatalog, ProductRecord};

pub use kitlabel_engine::batch::{BatchGenerator, BatchOutput, EntryWarning};
pub use kitlabel_engine::cart::{Cart, CartEntry, CartEvent};
pub use kitlabel_engine::context::AppContext;
pub use kitlabel_engine::expansion::LabelCounts;
pub use kitlabel_engine::sink::{DirectorySink, OutputSink};

// ============================================================================
// Internal modules - accessible but not covered by semver guarantees
// ============================================================================

#[doc(hidden)]
pub use kitlabel_engine::{
    batch, cart, context, expansion, notes, persistence, sink, sizing, variables,
};

#[doc(hidden)]
pub use kitlabel_utils::{atomic_write, error, exit_codes, logging, types};

#[doc(hidden)]
#[cfg(any(test, feature = "test-utils"))]
pub use kitlabel_utils::test_support;

#[doc(hidden)]
pub use kitlabel_template as template;

#[doc(hidden)]
pub use kitlabel_catalog as catalog;

#[doc(hidden)]
pub mod cli;

#[doc(hidden)]
pub mod error_reporter;
