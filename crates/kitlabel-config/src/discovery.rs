use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use kitlabel_utils::error::ConfigError;

use crate::{
    CatalogConfig, CliArgs, Config, ConfigSource, Defaults, OutputConfig, TemplatesConfig,
};

/// Environment variable naming a directory that holds `config.toml`
pub const HOME_ENV_VAR: &str = "KITLABEL_HOME";

/// Directory searched for upward from the working directory
pub const CONFIG_DIR_NAME: &str = ".kitlabel";

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
struct TomlConfig {
    defaults: Option<Defaults>,
    catalog: Option<CatalogConfig>,
    templates: Option<TemplatesConfig>,
    output: Option<OutputConfig>,
}

/// Keys tracked in `source_attribution`
pub(crate) const ATTRIBUTED_KEYS: &[&str] = &[
    "verbose",
    "state_dir",
    "catalog_path",
    "skip_rows",
    "templates_dir",
    "template_large",
    "template_small_fork",
    "template_small_shock",
    "output_dir",
    "output_extension",
];

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// When no explicit `--config` is given, `KITLABEL_HOME/config.toml` is
    /// used if it exists, otherwise `.kitlabel/config.toml` is searched for
    /// upward from the current directory.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("Failed to get current directory: {e}"),
        })?;

        let mut args = cli_args.clone();
        if args.config_path.is_none()
            && let Some(home) = env::var_os(HOME_ENV_VAR)
        {
            let candidate = PathBuf::from(home).join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Using {HOME_ENV_VAR} config");
                args.config_path = Some(candidate);
            }
        }

        Self::discover_from(&start_dir, &args)
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// Path-driven variant used by tests to avoid process-global state. The
    /// environment is not consulted.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut source_attribution: HashMap<String, ConfigSource> = ATTRIBUTED_KEYS
            .iter()
            .map(|key| ((*key).to_string(), ConfigSource::Default))
            .collect();

        let mut defaults = Defaults::default();
        let mut catalog = CatalogConfig::default();
        let mut templates = TemplatesConfig::default();
        let mut output = OutputConfig::default();

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    });
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        let base_dir = match &config_path {
            Some(path) => base_dir_for(path, start_dir),
            None => start_dir.to_path_buf(),
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "Loading config file");
            let file_config = Self::load_config_file(path)?;
            let mut mark = |key: &str| {
                source_attribution.insert(key.to_string(), ConfigSource::Config);
            };

            if let Some(file_defaults) = file_config.defaults {
                if file_defaults.verbose.is_some() {
                    defaults.verbose = file_defaults.verbose;
                    mark("verbose");
                }
                if file_defaults.state_dir.is_some() {
                    defaults.state_dir = file_defaults.state_dir;
                    mark("state_dir");
                }
            }

            if let Some(file_catalog) = file_config.catalog {
                if file_catalog.path.is_some() {
                    catalog.path = file_catalog.path;
                    mark("catalog_path");
                }
                if file_catalog.skip_rows.is_some() {
                    catalog.skip_rows = file_catalog.skip_rows;
                    mark("skip_rows");
                }
                for (field, letter) in file_catalog.columns {
                    mark(&format!("column_{field}"));
                    catalog.columns.insert(field, letter);
                }
            }

            if let Some(file_templates) = file_config.templates {
                if file_templates.dir.is_some() {
                    templates.dir = file_templates.dir;
                    mark("templates_dir");
                }
                if file_templates.large.is_some() {
                    templates.large = file_templates.large;
                    mark("template_large");
                }
                if file_templates.small_fork.is_some() {
                    templates.small_fork = file_templates.small_fork;
                    mark("template_small_fork");
                }
                if file_templates.small_shock.is_some() {
                    templates.small_shock = file_templates.small_shock;
                    mark("template_small_shock");
                }
            }

            if let Some(file_output) = file_config.output {
                if file_output.dir.is_some() {
                    output.dir = file_output.dir;
                    mark("output_dir");
                }
                if file_output.extension.is_some() {
                    output.extension = file_output.extension;
                    mark("output_extension");
                }
            }
        }

        // CLI overrides everything. CLI paths are relative to the working
        // directory, so they are made absolute here.
        let from_cli = |path: &PathBuf| -> PathBuf {
            if path.is_absolute() {
                path.clone()
            } else {
                start_dir.join(path)
            }
        };

        if let Some(verbose) = cli_args.verbose {
            defaults.verbose = Some(verbose);
            source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }
        if let Some(state_dir) = &cli_args.state_dir {
            defaults.state_dir = Some(from_cli(state_dir));
            source_attribution.insert("state_dir".to_string(), ConfigSource::Cli);
        }
        if let Some(catalog_path) = &cli_args.catalog_path {
            catalog.path = Some(from_cli(catalog_path));
            source_attribution.insert("catalog_path".to_string(), ConfigSource::Cli);
        }
        if let Some(templates_dir) = &cli_args.templates_dir {
            templates.dir = Some(from_cli(templates_dir));
            source_attribution.insert("templates_dir".to_string(), ConfigSource::Cli);
        }
        if let Some(output_dir) = &cli_args.output_dir {
            output.dir = Some(from_cli(output_dir));
            source_attribution.insert("output_dir".to_string(), ConfigSource::Cli);
        }

        let config = Self {
            defaults,
            catalog,
            templates,
            output,
            base_dir,
            source_attribution,
        };

        config.validate()?;

        Ok(config)
    }

    /// Discover config file by searching upward from a given directory
    ///
    /// Walks up the directory tree looking for `.kitlabel/config.toml`, stopping
    /// at repository root markers (.git, .hg, .svn) or the filesystem root.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = start_dir;

        loop {
            let config_path = current_dir.join(CONFIG_DIR_NAME).join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                return None;
            }

            current_dir = current_dir.parent()?;
        }
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("Failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConfigError::InvalidFile(format!("Failed to parse {}: {e}", path.display()))
        })
    }
}

/// `<root>/.kitlabel/config.toml` resolves against `<root>`; any other file
/// resolves against its own directory.
fn base_dir_for(config_path: &Path, start_dir: &Path) -> PathBuf {
    let Some(parent) = config_path.parent() else {
        return start_dir.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        start_dir.to_path_buf()
    } else if parent.is_absolute() {
        parent.to_path_buf()
    } else {
        start_dir.join(parent)
    };

    if parent.file_name().is_some_and(|name| name == CONFIG_DIR_NAME)
        && let Some(root) = parent.parent()
    {
        return root.to_path_buf();
    }
    parent
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(root: &Path, content: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let config = Config::discover_from(temp.path(), &CliArgs::default()).unwrap();

        assert_eq!(config.base_dir, temp.path());
        assert_eq!(config.skip_rows(), 1);
        assert_eq!(
            config.source_attribution.get("skip_rows"),
            Some(&ConfigSource::Default)
        );
    }

    #[test]
    fn test_discovers_config_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "[catalog]\npath = \"data/catalog.json\"\nskip_rows = 2\n",
        );
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::discover_from(&nested, &CliArgs::default()).unwrap();

        assert_eq!(config.base_dir, temp.path());
        assert_eq!(
            config.catalog_path(),
            Some(temp.path().join("data/catalog.json"))
        );
        assert_eq!(config.skip_rows(), 2);
        assert_eq!(
            config.source_attribution.get("catalog_path"),
            Some(&ConfigSource::Config)
        );
    }

    #[test]
    fn test_search_stops_at_repository_root() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "[catalog]\nskip_rows = 3\n");
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(Config::discover_config_file_from(&repo).is_none());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "[defaults]\nverbose = false\n\n[templates]\ndir = \"tpl\"\n",
        );
        let args = CliArgs {
            templates_dir: Some(PathBuf::from("other")),
            verbose: Some(true),
            ..CliArgs::default()
        };

        let config = Config::discover_from(temp.path(), &args).unwrap();

        assert!(config.verbose());
        assert_eq!(config.templates_dir(), temp.path().join("other"));
        assert_eq!(
            config.source_attribution.get("templates_dir"),
            Some(&ConfigSource::Cli)
        );
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let args = CliArgs {
            config_path: Some(temp.path().join("missing.toml")),
            ..CliArgs::default()
        };

        let err = Config::discover_from(temp.path(), &args).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_explicit_config_resolves_against_its_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("labels.toml");
        fs::write(&path, "[output]\ndir = \"printed\"\nextension = \"txt\"\n").unwrap();
        let args = CliArgs {
            config_path: Some(path),
            ..CliArgs::default()
        };

        let config = Config::discover_from(temp.path(), &args).unwrap();

        assert_eq!(config.output_dir(), temp.path().join("printed"));
        assert_eq!(config.output_extension(), "txt");
    }

    #[test]
    fn test_malformed_toml_is_invalid_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "[catalog\npath = ");

        let err = Config::discover_from(temp.path(), &CliArgs::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile(_)));
    }

    #[test]
    fn test_column_overrides_are_collected() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "[catalog.columns]\nbrand_name = \"T\"\nmodel_type = \"U\"\n",
        );

        let config = Config::discover_from(temp.path(), &CliArgs::default()).unwrap();

        assert_eq!(config.catalog.columns.get("brand_name"), Some(&"T".to_string()));
        assert_eq!(
            config.source_attribution.get("column_model_type"),
            Some(&ConfigSource::Config)
        );
    }
}
