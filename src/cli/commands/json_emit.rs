//! JSON output for CLI commands
//!
//! All `--json` output is emitted as canonical JSON (JCS, RFC 8785) so that
//! scripts see stable key order.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{CartEntry, EntryWarning, KitType, LabelCounts, ProductRecord};

/// Emit a value as canonical JSON.
pub fn emit_jcs<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize output")?;
    let bytes =
        serde_json_canonicalizer::to_vec(&value).context("Failed to canonicalize JSON output")?;
    String::from_utf8(bytes).context("Canonical JSON is not valid UTF-8")
}

/// One product, with the kit type when it was inferred by an exact lookup.
#[derive(Debug, Serialize)]
pub struct ProductJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kit_type: Option<KitType>,
    pub fields: &'a ProductRecord,
}

#[derive(Debug, Serialize)]
pub struct SearchJsonOutput<'a> {
    pub query: &'a str,
    pub count: usize,
    pub results: Vec<ProductJson<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CartJsonOutput<'a> {
    pub entries: &'a [CartEntry],
    pub counts: LabelCounts,
}

#[derive(Debug, Serialize)]
pub struct GenerateJsonOutput<'a> {
    pub counts: LabelCounts,
    pub warnings: &'a [EntryWarning],
    pub big_job: Option<String>,
    pub small_job: Option<String>,
    pub cart_cleared: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfigValueJson {
    pub value: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigJsonOutput {
    pub values: BTreeMap<String, ConfigValueJson>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldId;

    #[test]
    fn test_emit_jcs_sorts_keys() {
        let record = ProductRecord::from_pairs([
            (FieldId::ShockCode, "S-1"),
            (FieldId::BrandName, "HONDA"),
        ]);
        let product = ProductJson {
            kit_type: Some(KitType::Shock),
            fields: &record,
        };

        let json = emit_jcs(&product).unwrap();

        assert_eq!(
            json,
            r#"{"fields":{"brand_name":"HONDA","shock_code":"S-1"},"kit_type":"shock"}"#
        );
    }

    #[test]
    fn test_kit_type_omitted_when_not_inferred() {
        let record = ProductRecord::from_pairs([(FieldId::ForkCode, "F-1")]);
        let json = emit_jcs(&ProductJson {
            kit_type: None,
            fields: &record,
        })
        .unwrap();

        assert!(!json.contains("kit_type"));
    }
}
