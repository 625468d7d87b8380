//! `kitlabel cart` subcommands
//!
//! Every mutation runs as one locked read-modify-write cycle on the stored
//! cart.

use anyhow::Result;

use super::common::{counts_line, entry_line, open_context};
use super::json_emit::{CartJsonOutput, emit_jcs};

use crate::{Config, KitLabelError, KitType};

/// Execute `cart add`
pub fn execute_cart_add_command(
    code: &str,
    kit: Option<&str>,
    qty: i64,
    config: Config,
) -> Result<()> {
    let kit_type = kit
        .map(KitType::parse)
        .transpose()
        .map_err(KitLabelError::from)?;

    let mut ctx = open_context(config)?;
    let entry = ctx.with_cart_transaction(|ctx| ctx.add_to_cart(code, kit_type, qty))?;

    println!("✓ Added {}", entry_line(&entry));
    println!("  Cart: {} entries, {}", ctx.cart().len(), counts_line(&ctx.summary()));
    Ok(())
}

/// Execute `cart list`
pub fn execute_cart_list_command(json: bool, config: Config) -> Result<()> {
    let ctx = open_context(config)?;
    let cart = ctx.cart();

    if json {
        let output = CartJsonOutput {
            entries: cart.entries(),
            counts: cart.summary(),
        };
        println!("{}", emit_jcs(&output)?);
        return Ok(());
    }

    if cart.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }
    for entry in cart.entries() {
        println!("  {}", entry_line(entry));
    }
    println!("\n  Total: {}", counts_line(&cart.summary()));
    Ok(())
}

/// Execute `cart remove`
pub fn execute_cart_remove_command(id: u64, config: Config) -> Result<()> {
    let mut ctx = open_context(config)?;
    let entry = ctx.with_cart_transaction(|ctx| ctx.remove(id))?;

    println!("✓ Removed {}", entry_line(&entry));
    Ok(())
}

/// Execute `cart update`
pub fn execute_cart_update_command(id: u64, qty: i64, config: Config) -> Result<()> {
    let mut ctx = open_context(config)?;
    let entry = ctx.with_cart_transaction(|ctx| ctx.update_quantity(id, qty))?;

    println!("✓ Updated {}", entry_line(&entry));
    Ok(())
}

/// Execute `cart clear`
pub fn execute_cart_clear_command(config: Config) -> Result<()> {
    let mut ctx = open_context(config)?;
    let removed = ctx.with_cart_transaction(|ctx| Ok(ctx.clear()))?;

    println!("✓ Removed {removed} entries");
    Ok(())
}
