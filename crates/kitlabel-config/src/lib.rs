//! Configuration management for kitlabel
//!
//! This crate provides hierarchical configuration with discovery and precedence:
//! CLI > file > defaults. Supports TOML configuration files with `[defaults]`,
//! `[catalog]`, `[templates]` and `[output]` sections.

mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use discovery::{CONFIG_DIR_NAME, HOME_ENV_VAR};
pub use kitlabel_utils::types::ConfigSource;
pub use model::*;
pub use validation::MAX_SKIP_ROWS;
