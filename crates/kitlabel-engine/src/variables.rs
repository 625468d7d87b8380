//! Label variable construction
//!
//! Building a variable set is a two-phase pipeline whose ordering is carried
//! by the types:
//!
//! 1. [`DefaultedFields::from_record`] copies display fields (with `NONE` /
//!    `N/A` defaults), combines notes and formats the kit line.
//! 2. [`DefaultedFields::size`] measures the unescaped text and produces
//!    [`SizedFields`].
//! 3. [`SizedFields::escape`] escapes every text value for ZPL and produces
//!    the final [`LabelVariableSet`].
//!
//! There is no way to obtain escaped text without first going through
//! sizing, and sizes are only computed from unescaped text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use kitlabel_catalog::{FieldId, ProductRecord};
use kitlabel_template::{VariableLookup, escape_zpl_field};

use crate::notes;
use crate::sizing::{SizingRole, size_for};

/// Default for empty code fields
pub const CODE_DEFAULT: &str = "NONE";
/// Default for every other empty display field
pub const FIELD_DEFAULT: &str = "N/A";

/// Display variables copied from the record: `(variable, field)`.
pub const DISPLAY_FIELDS: [(&str, FieldId); 16] = [
    ("fork_code", FieldId::ForkCode),
    ("shock_code", FieldId::ShockCode),
    ("combi_code", FieldId::CombiCode),
    ("brand_name", FieldId::BrandName),
    ("model_type", FieldId::ModelType),
    ("year", FieldId::Year),
    ("fork_spring", FieldId::ForkSpring),
    ("shock_spring", FieldId::ShockSpring),
    ("oil_type", FieldId::OilType),
    ("oil_level", FieldId::OilLevel),
    ("fork_preload", FieldId::ForkPreload),
    ("shock_preload", FieldId::ShockPreload),
    ("fork_sag", FieldId::ForkSag),
    ("shock_sag", FieldId::ShockSag),
    ("fork_compression", FieldId::ForkCompression),
    ("shock_compression", FieldId::ShockCompression),
];

/// Every variable name a [`LabelVariableSet`] defines.
pub const KNOWN_VARIABLES: [&str; 24] = [
    "fork_code",
    "shock_code",
    "combi_code",
    "brand_name",
    "model_type",
    "year",
    "fork_spring",
    "shock_spring",
    "oil_type",
    "oil_level",
    "fork_preload",
    "shock_preload",
    "fork_sag",
    "shock_sag",
    "fork_compression",
    "shock_compression",
    "notes",
    "kit_info",
    "brand_font_size",
    "model_font_size",
    "small_brand_font_size",
    "small_model_font_size",
    "kit_font_size",
    "notes_font_size",
];

/// Layout problems the engine can detect but not fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Notes are longer than the largest notes bracket; no truncation applied.
    NotesOverflow { length: usize, ceiling: usize },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotesOverflow { length, ceiling } => write!(
                f,
                "notes are {length} characters, longer than the {ceiling}-character layout limit; \
                 check the printed label"
            ),
        }
    }
}

/// Format the three-code kit line.
#[must_use]
pub fn kit_info_line(fork: &str, shock: &str, combi: &str) -> String {
    format!("FORKKIT: {fork} --- SHOCKKIT: {shock} --- COMBIKIT: {combi}")
}

/// Phase one: defaulted, unescaped display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultedFields {
    display: BTreeMap<&'static str, String>,
    notes: String,
    kit_info: String,
}

impl DefaultedFields {
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        let display: BTreeMap<&'static str, String> = DISPLAY_FIELDS
            .iter()
            .map(|(name, field)| {
                let value = record.get(*field);
                let value = if !value.is_empty() {
                    value.to_string()
                } else if field.is_code() {
                    CODE_DEFAULT.to_string()
                } else {
                    FIELD_DEFAULT.to_string()
                };
                (*name, value)
            })
            .collect();

        let notes = notes::combine(
            record.get(FieldId::ForkExtraInfo),
            record.get(FieldId::RearExtraInfo),
        );
        let code = |name: &str| display.get(name).map_or(CODE_DEFAULT, String::as_str);
        let kit_info = kit_info_line(code("fork_code"), code("shock_code"), code("combi_code"));

        Self {
            display,
            notes,
            kit_info,
        }
    }

    /// Unescaped value of a display variable.
    #[must_use]
    pub fn display(&self, name: &str) -> Option<&str> {
        self.display.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn kit_info(&self) -> &str {
        &self.kit_info
    }

    fn text(&self, name: &str) -> &str {
        self.display(name).unwrap_or_default()
    }

    /// Compute every font size from the unescaped text.
    #[must_use]
    pub fn size(self) -> SizedFields {
        let brand = self.text("brand_name");
        let model = self.text("model_type");
        let sizes = FontSizes {
            brand: size_for(SizingRole::Brand, brand),
            model: size_for(SizingRole::Model, model),
            small_brand: size_for(SizingRole::SmallBrand, brand),
            small_model: size_for(SizingRole::SmallModel, model),
            kit: size_for(SizingRole::KitInfo, &self.kit_info),
            notes: size_for(SizingRole::Notes, &self.notes),
        };

        let mut warnings = Vec::new();
        let notes_len = self.notes.chars().count();
        let ceiling = SizingRole::Notes.ceiling();
        if notes_len > ceiling {
            warnings.push(LayoutWarning::NotesOverflow {
                length: notes_len,
                ceiling,
            });
        }

        SizedFields {
            fields: self,
            sizes,
            warnings,
        }
    }
}

/// Point sizes chosen for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub brand: u32,
    pub model: u32,
    pub small_brand: u32,
    pub small_model: u32,
    pub kit: u32,
    pub notes: u32,
}

/// Phase two: sizes fixed, text still unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedFields {
    fields: DefaultedFields,
    sizes: FontSizes,
    warnings: Vec<LayoutWarning>,
}

impl SizedFields {
    #[must_use]
    pub fn sizes(&self) -> &FontSizes {
        &self.sizes
    }

    #[must_use]
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Escape all text for ZPL field data and produce the final set.
    #[must_use]
    pub fn escape(self) -> LabelVariableSet {
        let Self {
            fields,
            sizes,
            warnings,
        } = self;

        let mut values: BTreeMap<String, String> = fields
            .display
            .iter()
            .map(|(name, value)| ((*name).to_string(), escape_zpl_field(value)))
            .collect();
        values.insert("notes".to_string(), escape_zpl_field(&fields.notes));
        values.insert("kit_info".to_string(), escape_zpl_field(&fields.kit_info));

        let size_values = [
            ("brand_font_size", sizes.brand),
            ("model_font_size", sizes.model),
            ("small_brand_font_size", sizes.small_brand),
            ("small_model_font_size", sizes.small_model),
            ("kit_font_size", sizes.kit),
            ("notes_font_size", sizes.notes),
        ];
        for (name, points) in size_values {
            values.insert(name.to_string(), points.to_string());
        }

        LabelVariableSet {
            values,
            sizes,
            warnings,
        }
    }
}

/// Fully resolved, escaped variables for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVariableSet {
    values: BTreeMap<String, String>,
    sizes: FontSizes,
    warnings: Vec<LayoutWarning>,
}

impl LabelVariableSet {
    /// Run all phases for a record.
    #[must_use]
    pub fn build(record: &ProductRecord) -> Self {
        DefaultedFields::from_record(record).size().escape()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn sizes(&self) -> &FontSizes {
        &self.sizes
    }

    #[must_use]
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableLookup for LabelVariableSet {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}
