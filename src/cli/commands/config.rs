//! `kitlabel config show`

use anyhow::Result;

use super::json_emit::{ConfigJsonOutput, ConfigValueJson, emit_jcs};

use crate::Config;

/// Show the effective configuration with the source of every value.
pub fn execute_config_show_command(json: bool, config: &Config) -> Result<()> {
    let effective = config.effective_config();

    if json {
        let output = ConfigJsonOutput {
            values: effective
                .into_iter()
                .map(|(key, (value, source))| (key, ConfigValueJson { value, source }))
                .collect(),
        };
        println!("{}", emit_jcs(&output)?);
        return Ok(());
    }

    println!("Effective configuration (base: {}):", config.base_dir.display());
    for (key, (value, source)) in &effective {
        println!("  {key:<22} {value}  [{source}]");
    }
    Ok(())
}
