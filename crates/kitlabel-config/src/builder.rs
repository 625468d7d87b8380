use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use kitlabel_utils::error::ConfigError;

use crate::discovery::ATTRIBUTED_KEYS;
use crate::{CatalogConfig, Config, ConfigSource, Defaults, OutputConfig, TemplatesConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// Use this when embedding the label engine without config files or
    /// environment lookups.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kitlabel_config::Config;
    ///
    /// let config = Config::builder()
    ///     .base_dir("/srv/labels")
    ///     .catalog_path("catalog.json")
    ///     .templates_dir("templates")
    ///     .build()
    ///     .expect("Failed to build config");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration.
///
/// All values set via the builder are attributed to
/// `ConfigSource::Programmatic` in the resulting source attribution map.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    base_dir: Option<PathBuf>,
    state_dir: Option<PathBuf>,
    verbose: Option<bool>,
    catalog_path: Option<PathBuf>,
    skip_rows: Option<usize>,
    columns: BTreeMap<String, String>,
    templates_dir: Option<PathBuf>,
    large_template: Option<String>,
    small_fork_template: Option<String>,
    small_shock_template: Option<String>,
    output_dir: Option<PathBuf>,
    output_extension: Option<String>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory relative paths resolve against. Defaults to `.`.
    #[must_use]
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn state_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = Some(rows);
        self
    }

    /// Map a catalog field identifier to a spreadsheet column letter.
    #[must_use]
    pub fn column(mut self, field: impl Into<String>, letter: impl Into<String>) -> Self {
        self.columns.insert(field.into(), letter.into());
        self
    }

    #[must_use]
    pub fn templates_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn large_template(mut self, file_name: impl Into<String>) -> Self {
        self.large_template = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn small_fork_template(mut self, file_name: impl Into<String>) -> Self {
        self.small_fork_template = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn small_shock_template(mut self, file_name: impl Into<String>) -> Self {
        self.small_shock_template = Some(file_name.into());
        self
    }

    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = Some(extension.into());
        self
    }

    /// Build the configuration, validating every value that was set.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut source_attribution: HashMap<String, ConfigSource> = ATTRIBUTED_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();
        let mut mark = |key: &str, set: bool| {
            if set {
                source_attribution.insert(key.to_string(), ConfigSource::Programmatic);
            }
        };

        mark("verbose", self.verbose.is_some());
        mark("state_dir", self.state_dir.is_some());
        mark("catalog_path", self.catalog_path.is_some());
        mark("skip_rows", self.skip_rows.is_some());
        mark("templates_dir", self.templates_dir.is_some());
        mark("template_large", self.large_template.is_some());
        mark("template_small_fork", self.small_fork_template.is_some());
        mark("template_small_shock", self.small_shock_template.is_some());
        mark("output_dir", self.output_dir.is_some());
        mark("output_extension", self.output_extension.is_some());
        for field in self.columns.keys() {
            mark(&format!("column_{field}"), true);
        }

        let config = Config {
            defaults: Defaults {
                verbose: self.verbose,
                state_dir: self.state_dir,
            },
            catalog: CatalogConfig {
                path: self.catalog_path,
                skip_rows: self.skip_rows,
                columns: self.columns,
            },
            templates: TemplatesConfig {
                dir: self.templates_dir,
                large: self.large_template,
                small_fork: self.small_fork_template,
                small_shock: self.small_shock_template,
            },
            output: OutputConfig {
                dir: self.output_dir,
                extension: self.output_extension,
            },
            base_dir: self.base_dir.unwrap_or_else(|| PathBuf::from(".")),
            source_attribution,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_attributes_programmatic_values() {
        let config = Config::builder()
            .skip_rows(0)
            .column("brand_name", "D")
            .build()
            .unwrap();

        assert_eq!(
            config.source_attribution.get("skip_rows"),
            Some(&ConfigSource::Programmatic)
        );
        assert_eq!(
            config.source_attribution.get("column_brand_name"),
            Some(&ConfigSource::Programmatic)
        );
        assert_eq!(
            config.source_attribution.get("output_dir"),
            Some(&ConfigSource::Default)
        );
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let err = Config::builder().skip_rows(5000).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "skip_rows"));
    }
}
