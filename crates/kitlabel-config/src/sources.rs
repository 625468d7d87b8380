use std::collections::BTreeMap;

use crate::{Config, ConfigSource};

fn source_label(config: &Config, key: &str) -> String {
    config
        .source_attribution
        .get(key)
        .unwrap_or(&ConfigSource::Default)
        .as_str()
        .to_string()
}

impl Config {
    /// Effective configuration as `key -> (value, source)`, sorted by key.
    ///
    /// Defaults are filled in, so every key is present.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut config = BTreeMap::new();
        let mut add = |key: &str, value: String| {
            config.insert(key.to_string(), (value, source_label(self, key)));
        };

        add("verbose", self.verbose().to_string());
        add("state_dir", self.state_dir().display().to_string());
        add(
            "catalog_path",
            self.catalog_path()
                .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string()),
        );
        add("skip_rows", self.skip_rows().to_string());
        add("templates_dir", self.templates_dir().display().to_string());
        add("template_large", self.large_template().to_string());
        add("template_small_fork", self.small_fork_template().to_string());
        add("template_small_shock", self.small_shock_template().to_string());
        add("output_dir", self.output_dir().display().to_string());
        add("output_extension", self.output_extension().to_string());
        for (field, letter) in &self.catalog.columns {
            add(&format!("column_{field}"), letter.to_ascii_uppercase());
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_config_reports_sources() {
        let config = Config::builder()
            .base_dir("/labels")
            .catalog_path("catalog.json")
            .column("year", "f")
            .build()
            .unwrap();

        let effective = config.effective_config();

        assert_eq!(
            effective.get("catalog_path"),
            Some(&(
                "/labels/catalog.json".to_string(),
                "programmatic".to_string()
            ))
        );
        assert_eq!(
            effective.get("skip_rows"),
            Some(&("1".to_string(), "default".to_string()))
        );
        assert_eq!(
            effective.get("column_year"),
            Some(&("F".to_string(), "programmatic".to_string()))
        );
    }
}
