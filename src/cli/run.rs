//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Dispatches to command handlers
//! - Handles all error output

use anyhow::Result;
use clap::Parser;

use super::args::{CartCommands, Cli, Commands, ConfigCommands, TemplateCommands};
use super::commands;

use crate::error_reporter::utils as error_utils;
use crate::logging::init_tracing;
use crate::{CliArgs, Config, ExitCode, KitLabelError};

/// Main CLI execution function.
///
/// Handles ALL output including errors and returns the exit code on failure;
/// main.rs only calls `std::process::exit()`.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let output_dir = match &cli.command {
        Commands::Generate { out, .. } => out.clone(),
        _ => None,
    };
    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        catalog_path: cli.catalog.clone(),
        templates_dir: cli.templates.clone(),
        state_dir: cli.state_dir.clone(),
        output_dir,
        verbose: cli.verbose.then_some(true),
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = KitLabelError::Config(err);
            eprintln!("{}", error_utils::create_contextual_report(&err, "config"));
            return Err(err.to_exit_code());
        }
    };

    // Fails only if a subscriber is already installed.
    let _ = init_tracing(config.verbose());

    let operation = match &cli.command {
        Commands::Search { .. } => "search",
        Commands::Lookup { .. } => "lookup",
        Commands::Cart(_) => "cart",
        Commands::Generate { .. } => "generate",
        Commands::Templates(_) => "templates",
        Commands::Config(_) => "config",
    };
    tracing::debug!(operation, base_dir = %config.base_dir.display(), "Dispatching command");

    let result = match cli.command {
        Commands::Search { query, json } => commands::execute_search_command(&query, json, config),
        Commands::Lookup { code, json } => commands::execute_lookup_command(&code, json, config),
        Commands::Cart(cart_cmd) => match cart_cmd {
            CartCommands::Add { code, kit, qty } => {
                commands::execute_cart_add_command(&code, kit.as_deref(), qty, config)
            }
            CartCommands::List { json } => commands::execute_cart_list_command(json, config),
            CartCommands::Remove { id } => commands::execute_cart_remove_command(id, config),
            CartCommands::Update { id, qty } => {
                commands::execute_cart_update_command(id, qty, config)
            }
            CartCommands::Clear => commands::execute_cart_clear_command(config),
        },
        Commands::Generate {
            keep_cart, json, ..
        } => commands::execute_generate_command(keep_cart, json, config),
        Commands::Templates(TemplateCommands::Check) => {
            commands::execute_templates_check_command(&config)
        }
        Commands::Config(ConfigCommands::Show { json }) => {
            commands::execute_config_show_command(json, &config)
        }
    };

    if let Err(error) = result {
        if let Some(kitlabel_error) = error.downcast_ref::<KitLabelError>() {
            eprintln!(
                "{}",
                error_utils::create_contextual_report(kitlabel_error, operation)
            );
            return Err(kitlabel_error.to_exit_code());
        }

        eprintln!("✗ Unexpected error: {error:#}");
        eprintln!("\n  General troubleshooting:");
        eprintln!("    - Run with --verbose for more detailed output");
        eprintln!("    - Check permissions of the state and output directories");
        return Err(ExitCode::INTERNAL);
    }

    Ok(())
}
