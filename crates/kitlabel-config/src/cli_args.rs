use std::path::PathBuf;

/// CLI overrides fed into [`Config::discover`](crate::Config::discover).
///
/// Every field is optional; `None` means "not given on the command line".
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit configuration file (skips discovery)
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub verbose: Option<bool>,
}
