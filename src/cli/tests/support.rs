//! Test support utilities for CLI tests

use tempfile::TempDir;

use crate::test_support::write_fixture_workspace;
use crate::{AppContext, CliArgs, Config};

/// A fixture workspace and the configuration discovered from it.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        write_fixture_workspace(dir.path());
        Self { dir }
    }

    pub fn config(&self) -> Config {
        Config::discover_from(self.dir.path(), &CliArgs::default()).unwrap()
    }

    /// Fresh context, as a new CLI invocation would see it.
    pub fn reopen(&self) -> AppContext {
        AppContext::init(self.config()).unwrap()
    }
}
