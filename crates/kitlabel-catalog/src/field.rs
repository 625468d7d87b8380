//! Catalog field identifiers
//!
//! One identifier per spreadsheet column, in default column order.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

use kitlabel_utils::types::KitType;

/// Positional field identifiers of a catalog row.
///
/// Declaration order is the default spreadsheet column order (A..R).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    ForkCode,
    ShockCode,
    CombiCode,
    BrandName,
    ModelType,
    Year,
    ForkSpring,
    ShockSpring,
    OilType,
    OilLevel,
    ForkPreload,
    ShockPreload,
    ForkSag,
    ShockSag,
    ForkCompression,
    ShockCompression,
    ForkExtraInfo,
    RearExtraInfo,
}

/// The three code fields, in exact-match priority order.
pub const CODE_FIELDS: [(FieldId, KitType); 3] = [
    (FieldId::ForkCode, KitType::Fork),
    (FieldId::ShockCode, KitType::Shock),
    (FieldId::CombiCode, KitType::Combi),
];

impl FieldId {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ForkCode => "fork_code",
            Self::ShockCode => "shock_code",
            Self::CombiCode => "combi_code",
            Self::BrandName => "brand_name",
            Self::ModelType => "model_type",
            Self::Year => "year",
            Self::ForkSpring => "fork_spring",
            Self::ShockSpring => "shock_spring",
            Self::OilType => "oil_type",
            Self::OilLevel => "oil_level",
            Self::ForkPreload => "fork_preload",
            Self::ShockPreload => "shock_preload",
            Self::ForkSag => "fork_sag",
            Self::ShockSag => "shock_sag",
            Self::ForkCompression => "fork_compression",
            Self::ShockCompression => "shock_compression",
            Self::ForkExtraInfo => "fork_extra_info",
            Self::RearExtraInfo => "rear_extra_info",
        }
    }

    /// Look up a field by name.
    ///
    /// Accepts the snake_case name and the camelCase spelling used by
    /// spreadsheet exports (`forkCode`); matching ignores case and `_`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let wanted: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::iter().find(|field| field.as_str().replace('_', "") == wanted)
    }

    /// Zero-based column index in the default layout.
    #[must_use]
    pub fn default_column(&self) -> usize {
        Self::iter().position(|f| f == *self).unwrap_or_default()
    }

    /// Whether this is one of the three product code fields.
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self, Self::ForkCode | Self::ShockCode | Self::CombiCode)
    }

    /// Code field identifying a product for the given kit type.
    #[must_use]
    pub const fn code_for(kit_type: KitType) -> Self {
        match kit_type {
            KitType::Fork => Self::ForkCode,
            KitType::Shock => Self::ShockCode,
            KitType::Combi => Self::CombiCode,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
