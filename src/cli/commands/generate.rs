//! `kitlabel generate`

use anyhow::Result;
use chrono::Utc;

use super::common::{counts_line, open_context};
use super::json_emit::{GenerateJsonOutput, emit_jcs};

use crate::context::utf8_path;
use crate::sink::{DeliveredJobs, deliver_batch};
use crate::{BatchOutput, Config, DirectorySink, KitLabelError};

/// Execute the generate command
///
/// Rendering, delivery and clearing the cart happen under one state lock, so
/// a cart change made concurrently is never cleared without being printed.
pub fn execute_generate_command(keep_cart: bool, json: bool, config: Config) -> Result<()> {
    let output_dir = utf8_path("output_dir", config.output_dir()).map_err(KitLabelError::from)?;
    let sink = DirectorySink::new(output_dir, config.output_extension());

    let mut ctx = open_context(config)?;
    let (batch, delivered, cleared) = ctx.with_cart_transaction(|ctx| {
        let batch = ctx.generate()?;
        let delivered = deliver_batch(&sink, &batch, Utc::now())?;
        let cleared = !keep_cart && !ctx.cart().is_empty();
        if cleared {
            ctx.clear();
        }
        Ok((batch, delivered, cleared))
    })?;

    if json {
        let output = GenerateJsonOutput {
            counts: batch.counts,
            warnings: &batch.warnings,
            big_job: delivered.big.as_ref().map(ToString::to_string),
            small_job: delivered.small.as_ref().map(ToString::to_string),
            cart_cleared: cleared,
        };
        println!("{}", emit_jcs(&output)?);
        return Ok(());
    }

    print_summary(&batch, &delivered, cleared);
    Ok(())
}

fn print_summary(batch: &BatchOutput, delivered: &DeliveredJobs, cleared: bool) {
    if batch.counts.grand_total() == 0 {
        println!("Cart is empty; no print jobs written");
        return;
    }

    println!("✓ Generated {}", counts_line(&batch.counts));
    if let Some(path) = &delivered.big {
        println!("  Big:   {path}");
    }
    if let Some(path) = &delivered.small {
        println!("  Small: {path}");
    }

    for warning in &batch.warnings {
        println!(
            "  ⚠ entry #{} ({}): {}",
            warning.entry_id, warning.product_code, warning.warning
        );
    }

    if cleared {
        println!("  Cart cleared");
    }
}
