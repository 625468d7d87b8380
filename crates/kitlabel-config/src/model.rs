use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use kitlabel_utils::types::ConfigSource;

/// Default state directory (holds the persisted cart and its lock)
pub const DEFAULT_STATE_DIR: &str = ".kitlabel";
/// Default number of header rows dropped from the catalog export
pub const DEFAULT_SKIP_ROWS: usize = 1;
/// Default template directory
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
/// Default large-label template file name
pub const DEFAULT_LARGE_TEMPLATE: &str = "large.zpl";
/// Default small fork-label template file name
pub const DEFAULT_SMALL_FORK_TEMPLATE: &str = "small_fork.zpl";
/// Default small shock-label template file name
pub const DEFAULT_SMALL_SHOCK_TEMPLATE: &str = "small_shock.zpl";
/// Default output directory for generated documents
pub const DEFAULT_OUTPUT_DIR: &str = "out";
/// Default extension for generated documents
pub const DEFAULT_OUTPUT_EXTENSION: &str = "zpl";

/// Configuration for kitlabel operations.
///
/// `Config` provides hierarchical configuration with discovery and precedence:
/// CLI arguments > config file > built-in defaults.
///
/// Relative paths are resolved against [`Config::base_dir`]: the directory that
/// contains `.kitlabel/` when the file was discovered, otherwise the working
/// directory.
///
/// # Example
///
/// ```rust,no_run
/// use kitlabel_config::{CliArgs, Config};
///
/// let config = Config::discover(&CliArgs::default())?;
/// println!("Catalog: {:?}", config.catalog_path());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: Defaults,
    pub catalog: CatalogConfig,
    pub templates: TemplatesConfig,
    pub output: OutputConfig,
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,
    /// Source attribution for each configuration value
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Defaults {
    pub verbose: Option<bool>,
    pub state_dir: Option<PathBuf>,
}

/// `[catalog]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON export of the product spreadsheet
    pub path: Option<PathBuf>,
    /// Header rows dropped before parsing records
    pub skip_rows: Option<usize>,
    /// Field identifier -> spreadsheet column letter overrides
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

/// `[templates]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemplatesConfig {
    pub dir: Option<PathBuf>,
    pub large: Option<String>,
    pub small_fork: Option<String>,
    pub small_shock: Option<String>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub extension: Option<String>,
}

impl Config {
    /// Resolve a possibly relative path against the base directory
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    /// Directory holding the persisted cart
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        let dir = self
            .defaults
            .state_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        self.resolve(&dir)
    }

    /// Catalog export path, if configured
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_deref().map(|p| self.resolve(p))
    }

    #[must_use]
    pub fn skip_rows(&self) -> usize {
        self.catalog.skip_rows.unwrap_or(DEFAULT_SKIP_ROWS)
    }

    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        let dir = self
            .templates
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));
        self.resolve(&dir)
    }

    #[must_use]
    pub fn large_template(&self) -> &str {
        self.templates
            .large
            .as_deref()
            .unwrap_or(DEFAULT_LARGE_TEMPLATE)
    }

    #[must_use]
    pub fn small_fork_template(&self) -> &str {
        self.templates
            .small_fork
            .as_deref()
            .unwrap_or(DEFAULT_SMALL_FORK_TEMPLATE)
    }

    #[must_use]
    pub fn small_shock_template(&self) -> &str {
        self.templates
            .small_shock
            .as_deref()
            .unwrap_or(DEFAULT_SMALL_SHOCK_TEMPLATE)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        let dir = self
            .output
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        self.resolve(&dir)
    }

    #[must_use]
    pub fn output_extension(&self) -> &str {
        self.output
            .extension
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_against_base_dir() {
        let config = Config::builder().base_dir("/work").build().unwrap();

        assert_eq!(config.state_dir(), PathBuf::from("/work/.kitlabel"));
        assert_eq!(config.templates_dir(), PathBuf::from("/work/templates"));
        assert_eq!(config.output_dir(), PathBuf::from("/work/out"));
        assert_eq!(config.large_template(), "large.zpl");
        assert_eq!(config.small_fork_template(), "small_fork.zpl");
        assert_eq!(config.small_shock_template(), "small_shock.zpl");
        assert_eq!(config.output_extension(), "zpl");
        assert_eq!(config.skip_rows(), 1);
        assert!(config.catalog_path().is_none());
        assert!(!config.verbose());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Config::builder()
            .base_dir("/work")
            .catalog_path("/data/catalog.json")
            .build()
            .unwrap();

        assert_eq!(
            config.catalog_path(),
            Some(PathBuf::from("/data/catalog.json"))
        );
    }
}
