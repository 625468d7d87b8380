//! `kitlabel templates check`

use anyhow::Result;

use crate::Config;
use crate::context::load_generator;
use crate::variables::KNOWN_VARIABLES;

/// Load the templates and run the placeholder check.
pub fn execute_templates_check_command(config: &Config) -> Result<()> {
    let generator = load_generator(config)?;

    println!("Templates in {}:", config.templates_dir().display());
    for template in generator.templates().iter() {
        let names: Vec<&str> = template.placeholders().iter().map(String::as_str).collect();
        println!(
            "  ✓ {:<12} {} placeholder(s): {}",
            template.kind(),
            names.len(),
            names.join(", ")
        );
    }
    println!(
        "\nAll placeholders are among the {} known variables",
        KNOWN_VARIABLES.len()
    );
    Ok(())
}
