//! Helpers shared by the command implementations

use anyhow::Result;

use crate::catalog::CODE_FIELDS;
use crate::{AppContext, CartEntry, Config, FieldId, LabelCounts, ProductRecord};

/// Build the application context, loading catalog, templates and cart.
pub fn open_context(config: Config) -> Result<AppContext> {
    Ok(AppContext::init(config)?)
}

/// `FORKKIT F-1 | SHOCKKIT S-1 | HARLEY DAVIDSON FXDX 1999-2005`
pub fn product_line(record: &ProductRecord) -> String {
    let codes: Vec<String> = CODE_FIELDS
        .iter()
        .filter(|(field, _)| record.has(*field))
        .map(|(field, kit)| format!("{} {}", kit.label_prefix(), record.get(*field)))
        .collect();

    let name: Vec<&str> = [FieldId::BrandName, FieldId::ModelType, FieldId::Year]
        .iter()
        .map(|f| record.get(*f))
        .filter(|part| !part.is_empty())
        .collect();

    format!("{} | {}", codes.join(" | "), name.join(" "))
}

/// `#3  combi x2  SP-1  HARLEY DAVIDSON ...`
pub fn entry_line(entry: &CartEntry) -> String {
    format!(
        "#{:<4} {:<6} x{:<3} {:<22} {}",
        entry.id,
        entry.kit_type.as_str(),
        entry.quantity,
        entry.product_code(),
        entry.display_name()
    )
}

pub fn counts_line(counts: &LabelCounts) -> String {
    format!(
        "{} big, {} small ({} fork, {} shock)",
        counts.big,
        counts.total_small(),
        counts.small_fork,
        counts.small_shock
    )
}
