//! CLI tests module (manifest).
//!
//! Split by concern under `src/cli/tests/*`. Commands are driven with a
//! `Config` built from a fixture workspace, so no test touches the process
//! environment or working directory.

mod support;

mod cart_commands;
