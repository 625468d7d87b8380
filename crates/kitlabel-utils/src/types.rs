use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

use crate::error::ValidationError;

/// Kit types a product can be labelled as.
///
/// A single catalog record can carry up to three independent product codes
/// (fork, shock, combi). The kit type decides which of those codes identifies
/// the product on the label and how many label documents one kit unit needs.
///
/// # Example
///
/// ```rust
/// use kitlabel_utils::types::KitType;
///
/// let kit = KitType::parse("Combi").unwrap();
/// assert_eq!(kit, KitType::Combi);
/// assert_eq!(kit.as_str(), "combi");
/// ```
///
/// # Serialization
///
/// `KitType` serializes to its lowercase name (`"fork"`, `"shock"`, `"combi"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum KitType {
    /// Front fork kit.
    Fork,
    /// Rear shock kit.
    Shock,
    /// Fork and shock sold together.
    Combi,
}

impl KitType {
    /// Canonical lowercase name used in persisted carts and CLI arguments.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fork => "fork",
            Self::Shock => "shock",
            Self::Combi => "combi",
        }
    }

    /// Upper-case label used on printed documents (`FORKKIT`, ...).
    #[must_use]
    pub const fn label_prefix(&self) -> &'static str {
        match self {
            Self::Fork => "FORKKIT",
            Self::Shock => "SHOCKKIT",
            Self::Combi => "COMBIKIT",
        }
    }

    /// Parse a kit type name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownKitType`] if the name is not recognized.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "fork" | "f" => Ok(Self::Fork),
            "shock" | "s" | "rear" => Ok(Self::Shock),
            "combi" | "c" | "combo" => Ok(Self::Combi),
            _ => Err(ValidationError::UnknownKitType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for KitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Source of a configuration value.
///
/// Indicates where a configuration value originated from in the precedence chain:
/// CLI arguments > config file > programmatic overrides > built-in defaults.
///
/// # Serialization
///
/// Serializes to lowercase strings: `"cli"`, `"config"`, `"programmatic"`, `"default"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value loaded from configuration file.
    Config,
    /// Value provided programmatically (e.g., `Config::builder()`).
    Programmatic,
    /// Built-in default value (lowest precedence).
    Default,
}

impl ConfigSource {
    /// Stable label used in `config show` output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Config => "config",
            Self::Programmatic => "programmatic",
            Self::Default => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kit_type_parse_accepts_aliases_and_case() {
        assert_eq!(KitType::parse("fork").unwrap(), KitType::Fork);
        assert_eq!(KitType::parse("FORK").unwrap(), KitType::Fork);
        assert_eq!(KitType::parse(" Shock ").unwrap(), KitType::Shock);
        assert_eq!(KitType::parse("rear").unwrap(), KitType::Shock);
        assert_eq!(KitType::parse("combo").unwrap(), KitType::Combi);
    }

    #[test]
    fn test_kit_type_parse_rejects_unknown() {
        let err = KitType::parse("spring").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownKitType { ref value } if value == "spring"));
    }

    #[test]
    fn test_kit_type_round_trips_through_as_str() {
        for kit in KitType::iter() {
            assert_eq!(KitType::parse(kit.as_str()).unwrap(), kit);
        }
    }

    #[test]
    fn test_kit_type_serializes_lowercase() {
        let json = serde_json::to_string(&KitType::Combi).unwrap();
        assert_eq!(json, r#""combi""#);
    }

    #[test]
    fn test_config_source_serializes_lowercase() {
        let json = serde_json::to_string(&ConfigSource::Cli).unwrap();
        assert_eq!(json, r#""cli""#);
        assert_eq!(ConfigSource::Default.as_str(), "default");
    }
}
