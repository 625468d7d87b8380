//! `kitlabel search` and `kitlabel lookup`

use anyhow::Result;

use super::common::{open_context, product_line};
use super::json_emit::{ProductJson, SearchJsonOutput, emit_jcs};

use crate::Config;
use crate::catalog::MAX_FUZZY_RESULTS;

/// Execute the search command
pub fn execute_search_command(query: &str, json: bool, config: Config) -> Result<()> {
    let ctx = open_context(config)?;
    let results = ctx.search(query)?;

    if json {
        let output = SearchJsonOutput {
            query,
            count: results.len(),
            results: results
                .iter()
                .map(|record| ProductJson {
                    kit_type: None,
                    fields: record,
                })
                .collect(),
        };
        println!("{}", emit_jcs(&output)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No products match '{}'", query.trim());
        return Ok(());
    }

    for record in &results {
        println!("  {}", product_line(record));
    }
    if results.len() == MAX_FUZZY_RESULTS {
        println!("\n(showing the first {MAX_FUZZY_RESULTS} matches; refine the query)");
    }
    Ok(())
}

/// Execute the lookup command
pub fn execute_lookup_command(code: &str, json: bool, config: Config) -> Result<()> {
    let ctx = open_context(config)?;
    let found = ctx.lookup(code)?;

    if json {
        let output = ProductJson {
            kit_type: Some(found.kit_type),
            fields: found.record,
        };
        println!("{}", emit_jcs(&output)?);
        return Ok(());
    }

    println!("{}", product_line(found.record));
    println!("  Kit type: {}", found.kit_type);
    for (field, value) in found.record.iter() {
        println!("  {:<18} {value}", field.as_str());
    }
    Ok(())
}
