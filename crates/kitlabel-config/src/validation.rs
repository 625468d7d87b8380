use kitlabel_utils::error::ConfigError;

use crate::Config;

/// Upper bound on header rows skipped before catalog parsing
pub const MAX_SKIP_ROWS: usize = 1000;

impl Config {
    /// Validate configuration values.
    ///
    /// Column override keys are checked against the catalog's field list when
    /// the column map is built; here only the letters themselves are checked.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(skip_rows) = self.catalog.skip_rows
            && skip_rows > MAX_SKIP_ROWS
        {
            return Err(ConfigError::InvalidValue {
                key: "skip_rows".to_string(),
                value: format!("{skip_rows} exceeds maximum limit of {MAX_SKIP_ROWS}"),
            });
        }

        for (field, letter) in &self.catalog.columns {
            if !is_column_letter(letter) {
                return Err(ConfigError::InvalidValue {
                    key: format!("columns.{field}"),
                    value: format!("'{letter}' is not a spreadsheet column letter"),
                });
            }
        }

        let template_names = [
            ("templates.large", self.templates.large.as_deref()),
            ("templates.small_fork", self.templates.small_fork.as_deref()),
            ("templates.small_shock", self.templates.small_shock.as_deref()),
        ];
        for (key, name) in template_names {
            if let Some(name) = name {
                validate_file_name(key, name)?;
            }
        }

        if let Some(extension) = &self.output.extension
            && (extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ConfigError::InvalidValue {
                key: "output.extension".to_string(),
                value: format!("'{extension}' must be non-empty and alphanumeric"),
            });
        }

        Ok(())
    }
}

/// One to three ASCII letters (`A` through `XFD`), case-insensitive.
fn is_column_letter(letter: &str) -> bool {
    (1..=3).contains(&letter.len()) && letter.chars().all(|c| c.is_ascii_alphabetic())
}

fn validate_file_name(key: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: "file name must not be empty".to_string(),
        });
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: format!("'{name}' must be a plain file name inside the templates directory"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_rows_limit() {
        assert!(Config::builder().skip_rows(MAX_SKIP_ROWS).build().is_ok());
        assert!(Config::builder().skip_rows(MAX_SKIP_ROWS + 1).build().is_err());
    }

    #[test]
    fn test_column_letters() {
        assert!(is_column_letter("A"));
        assert!(is_column_letter("ab"));
        assert!(is_column_letter("XFD"));
        assert!(!is_column_letter(""));
        assert!(!is_column_letter("A1"));
        assert!(!is_column_letter("ABCD"));

        let err = Config::builder().column("brand_name", "4").build().unwrap_err();
        assert!(err.to_string().contains("columns.brand_name"));
    }

    #[test]
    fn test_template_file_names() {
        assert!(Config::builder().large_template("").build().is_err());
        assert!(Config::builder().small_fork_template("../x.zpl").build().is_err());
        assert!(Config::builder().small_shock_template("dir/x.zpl").build().is_err());
        assert!(Config::builder().large_template("big.zpl").build().is_ok());
    }

    #[test]
    fn test_output_extension() {
        assert!(Config::builder().output_extension("txt").build().is_ok());
        assert!(Config::builder().output_extension("").build().is_err());
        assert!(Config::builder().output_extension(".zpl").build().is_err());
    }
}
