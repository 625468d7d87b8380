//! Label templates for kitlabel
//!
//! Three ZPL templates make up a label set: one large label per kit unit and
//! two small label variants (fork and shock). Templates reference variables
//! with `{{name}}` placeholders. Rendering is strict: a placeholder without a
//! value is an error, never literal text in a print job.

mod escape;
mod render;
mod set;

pub use escape::escape_zpl_field;
pub use render::{VariableLookup, placeholders, render};
pub use set::{Template, TemplateFileNames, TemplateSet};

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The three documents a label set is made of.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// One per kit unit, carries every spec field
    Large,
    /// Small label for the fork side
    SmallFork,
    /// Small label for the shock side
    SmallShock,
}

impl TemplateKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::SmallFork => "small_fork",
            Self::SmallShock => "small_shock",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
