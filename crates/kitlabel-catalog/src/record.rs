//! Product records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kitlabel_utils::types::KitType;

use crate::field::{CODE_FIELDS, FieldId};

/// One spreadsheet row as a flat, read-only field map.
///
/// Values are trimmed at construction and empty values are not stored, so
/// [`get`](Self::get) returns `""` for anything absent. Defaulting to display
/// literals (`N/A`, `NONE`) happens when label variables are built, not here.
/// Deserialized records go through the same normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FieldId, String>",
    into = "BTreeMap<FieldId, String>"
)]
pub struct ProductRecord {
    fields: BTreeMap<FieldId, String>,
}

impl ProductRecord {
    /// Build a record from `(field, value)` pairs. Later pairs win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (FieldId, S)>,
        S: AsRef<str>,
    {
        let mut fields = BTreeMap::new();
        for (field, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                fields.remove(&field);
            } else {
                fields.insert(field, value.to_string());
            }
        }
        Self { fields }
    }

    /// Value of a field, `""` when absent.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        self.fields.get(&field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: FieldId) -> bool {
        self.fields.contains_key(&field)
    }

    /// Code identifying this product for the given kit type, `""` when absent.
    #[must_use]
    pub fn code_for(&self, kit_type: KitType) -> &str {
        self.get(FieldId::code_for(kit_type))
    }

    /// First non-empty code in fork, shock, combi order.
    #[must_use]
    pub fn first_code(&self) -> Option<(KitType, &str)> {
        CODE_FIELDS
            .iter()
            .map(|(field, kit)| (*kit, self.get(*field)))
            .find(|(_, code)| !code.is_empty())
    }

    /// True when no code, brand, or model is present.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.first_code().is_none()
            && !self.has(FieldId::BrandName)
            && !self.has(FieldId::ModelType)
    }

    /// Present fields in column order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl From<BTreeMap<FieldId, String>> for ProductRecord {
    fn from(fields: BTreeMap<FieldId, String>) -> Self {
        Self::from_pairs(fields)
    }
}

impl From<ProductRecord> for BTreeMap<FieldId, String> {
    fn from(record: ProductRecord) -> Self {
        record.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_trimmed_and_empty_dropped() {
        let record = ProductRecord::from_pairs([
            (FieldId::BrandName, "  KTM "),
            (FieldId::ModelType, "   "),
        ]);

        assert_eq!(record.get(FieldId::BrandName), "KTM");
        assert_eq!(record.get(FieldId::ModelType), "");
        assert!(!record.has(FieldId::ModelType));
    }

    #[test]
    fn test_first_code_priority() {
        let record = ProductRecord::from_pairs([
            (FieldId::CombiCode, "C-1"),
            (FieldId::ShockCode, "S-1"),
        ]);
        assert_eq!(record.first_code(), Some((KitType::Shock, "S-1")));
        assert_eq!(record.code_for(KitType::Fork), "");
        assert_eq!(record.code_for(KitType::Combi), "C-1");
    }

    #[test]
    fn test_blank_detection() {
        assert!(ProductRecord::default().is_blank());
        assert!(ProductRecord::from_pairs([(FieldId::Year, "2020")]).is_blank());
        assert!(!ProductRecord::from_pairs([(FieldId::BrandName, "BMW")]).is_blank());
    }

    #[test]
    fn test_serializes_as_field_map() {
        let record = ProductRecord::from_pairs([(FieldId::ForkCode, "F-1")]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"fork_code":"F-1"}"#);

        let back: ProductRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_trims_and_drops_empty_values() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"fork_code":" F-1 ","brand_name":"","model_type":"   "}"#,
        )
        .unwrap();

        assert_eq!(record, ProductRecord::from_pairs([(FieldId::ForkCode, "F-1")]));
        assert!(!record.has(FieldId::BrandName));
        assert!(!record.has(FieldId::ModelType));
    }
}
