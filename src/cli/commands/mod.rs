//! CLI command implementations (facade).
//!
//! This module re-exports the command surface used by `run.rs` and CLI tests.
//! Implementations live in `commands/*`.

mod cart;
mod catalog;
mod common;
mod config;
mod generate;
mod json_emit;
mod templates;

pub use cart::{
    execute_cart_add_command, execute_cart_clear_command, execute_cart_list_command,
    execute_cart_remove_command, execute_cart_update_command,
};
pub use catalog::{execute_lookup_command, execute_search_command};
pub use config::execute_config_show_command;
pub use generate::execute_generate_command;
pub use templates::execute_templates_check_command;
