//! Command-line interface for kitlabel
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions and parsing structures (clap)
//! - `run`: Main entry point and command dispatch
//! - `commands`: Command implementations and helpers
//! - `tests`: Test module (cfg(test) only)

pub mod args;
mod commands;
mod run;

#[cfg(test)]
mod tests;

pub use args::{CartCommands, Cli, Commands, ConfigCommands, TemplateCommands, build_cli};

pub use run::run;
