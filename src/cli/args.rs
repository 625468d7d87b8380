//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and all subcommand enums.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kitlabel - batch ZPL label generation for suspension kits
#[derive(Parser)]
#[command(name = "kitlabel")]
#[command(about = "Generate ZPL print jobs for suspension kits from a product catalog")]
#[command(long_about = r#"
kitlabel looks up suspension kits in a product catalog, collects them in a
cart and renders the cart into two ZPL documents: one for the large-label
printer and one for the small-label printer.

EXAMPLES:
  # Find products whose fork, shock or combi code contains "HD14"
  kitlabel search HD14

  # Look up one exact code and show the inferred kit type
  kitlabel lookup SP-HD14-SSE001REV

  # Add three fork kits to the cart
  kitlabel cart add SP-HD14-SSA001REV --kit fork --qty 3

  # Show the cart and the label totals
  kitlabel cart list

  # Render the cart into out/job_<timestamp>_BIG.zpl and _SMALL.zpl
  kitlabel generate

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from CWD for .kitlabel/config.toml
  KITLABEL_HOME/config.toml is used when set; --config overrides both
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog export (JSON) to load
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory holding the label templates
    #[arg(long, global = true)]
    pub templates: Option<PathBuf>,

    /// Directory holding the persisted cart
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search product codes by substring
    ///
    /// Matches the fork, shock and combi codes case-insensitively. Queries
    /// shorter than two characters match nothing; at most 50 products are shown.
    ///
    /// EXAMPLES:
    ///   kitlabel search hd14
    ///   kitlabel search SSA --json
    Search {
        /// Part of a product code
        query: String,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up one product by exact code
    ///
    /// The code field that matched decides the kit type: fork before shock
    /// before combi.
    ///
    /// EXAMPLES:
    ///   kitlabel lookup SP-HD14-SSD001REV
    Lookup {
        /// Exact product code (case-insensitive)
        code: String,

        /// Output the product as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommands),

    /// Render the cart into print jobs
    ///
    /// Writes `job_<timestamp>_BIG` and `job_<timestamp>_SMALL` into the
    /// output directory. Either the whole cart renders or nothing is written.
    ///
    /// EXAMPLES:
    ///   kitlabel generate
    ///   kitlabel generate --out /mnt/printer-spool --keep-cart
    Generate {
        /// Output directory (overrides [output] dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Keep the cart after a successful run
        #[arg(long)]
        keep_cart: bool,

        /// Output the batch summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect label templates
    #[command(subcommand)]
    Templates(TemplateCommands),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Cart subcommands
#[derive(Subcommand)]
pub enum CartCommands {
    /// Add a product by exact code
    ///
    /// EXAMPLES:
    ///   kitlabel cart add SP-HD14-SSE001REV
    ///   kitlabel cart add SP-HD14-SSE001REV --kit fork --qty 2
    Add {
        /// Exact product code
        code: String,

        /// Kit type (fork, shock, combi); defaults to the type of the matching code
        #[arg(long)]
        kit: Option<String>,

        /// Number of kits, clamped to 1..=99
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },

    /// List cart entries and label totals
    List {
        /// Output the cart as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove an entry by id
    Remove {
        /// Entry id as shown by `cart list`
        id: u64,
    },

    /// Change the quantity of an entry
    Update {
        /// Entry id as shown by `cart list`
        id: u64,

        /// New quantity, clamped to 1..=99
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },

    /// Remove every entry
    Clear,
}

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Load the templates and check every placeholder is a known variable
    Check,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration and where each value came from
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the clap command, for completions and tests
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
