//! The three templates of a label set and their startup check

use std::collections::BTreeSet;
use std::path::Path;

use kitlabel_utils::error::RenderError;

use crate::TemplateKind;
use crate::render::{self, VariableLookup};

/// One loaded template and the placeholders it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    kind: TemplateKind,
    source: String,
    placeholders: BTreeSet<String>,
}

impl Template {
    /// Wrap template text. Empty (or whitespace-only) text is rejected.
    pub fn new(kind: TemplateKind, source: impl Into<String>) -> Result<Self, RenderError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(RenderError::MissingTemplate {
                kind: kind.as_str().to_string(),
                path: "<inline>".to_string(),
            });
        }
        let placeholders = render::placeholders(&source);
        Ok(Self {
            kind,
            source,
            placeholders,
        })
    }

    #[must_use]
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn placeholders(&self) -> &BTreeSet<String> {
        &self.placeholders
    }

    /// Render with strict placeholder resolution.
    pub fn render<V>(&self, vars: &V) -> Result<String, RenderError>
    where
        V: VariableLookup + ?Sized,
    {
        render::render(self.kind.as_str(), &self.source, vars)
    }
}

/// File names of the three templates inside a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFileNames {
    pub large: String,
    pub small_fork: String,
    pub small_shock: String,
}

impl Default for TemplateFileNames {
    fn default() -> Self {
        Self {
            large: "large.zpl".to_string(),
            small_fork: "small_fork.zpl".to_string(),
            small_shock: "small_shock.zpl".to_string(),
        }
    }
}

impl TemplateFileNames {
    #[must_use]
    pub fn for_kind(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Large => &self.large,
            TemplateKind::SmallFork => &self.small_fork,
            TemplateKind::SmallShock => &self.small_shock,
        }
    }
}

/// The large, small-fork and small-shock templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    large: Template,
    small_fork: Template,
    small_shock: Template,
}

impl TemplateSet {
    /// Build a set from template text.
    pub fn new(
        large: impl Into<String>,
        small_fork: impl Into<String>,
        small_shock: impl Into<String>,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            large: Template::new(TemplateKind::Large, large)?,
            small_fork: Template::new(TemplateKind::SmallFork, small_fork)?,
            small_shock: Template::new(TemplateKind::SmallShock, small_shock)?,
        })
    }

    /// Read all three templates from `dir`.
    ///
    /// A missing, unreadable or empty file is [`RenderError::MissingTemplate`].
    pub fn load_from_dir(dir: &Path, names: &TemplateFileNames) -> Result<Self, RenderError> {
        let load = |kind: TemplateKind| -> Result<Template, RenderError> {
            let path = dir.join(names.for_kind(kind));
            let missing = || RenderError::MissingTemplate {
                kind: kind.as_str().to_string(),
                path: path.display().to_string(),
            };
            let source = std::fs::read_to_string(&path).map_err(|e| {
                tracing::debug!(path = %path.display(), error = %e, "Template not readable");
                missing()
            })?;
            let template = Template::new(kind, source).map_err(|_| missing())?;
            tracing::debug!(
                kind = kind.as_str(),
                path = %path.display(),
                placeholders = template.placeholders().len(),
                "Loaded template"
            );
            Ok(template)
        };

        Ok(Self {
            large: load(TemplateKind::Large)?,
            small_fork: load(TemplateKind::SmallFork)?,
            small_shock: load(TemplateKind::SmallShock)?,
        })
    }

    #[must_use]
    pub fn get(&self, kind: TemplateKind) -> &Template {
        match kind {
            TemplateKind::Large => &self.large,
            TemplateKind::SmallFork => &self.small_fork,
            TemplateKind::SmallShock => &self.small_shock,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        [&self.large, &self.small_fork, &self.small_shock].into_iter()
    }

    /// Check every placeholder in every template is a known variable name.
    ///
    /// Reports the first template with unknown names, listing all of them.
    pub fn check_placeholders(&self, known: &[&str]) -> Result<(), RenderError> {
        for template in self.iter() {
            let unknown: Vec<String> = template
                .placeholders()
                .iter()
                .filter(|name| !known.contains(&name.as_str()))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                return Err(RenderError::UnknownPlaceholders {
                    template: template.kind().as_str().to_string(),
                    names: unknown,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitlabel_utils::test_support::{LARGE_TEMPLATE, SMALL_FORK_TEMPLATE, SMALL_SHOCK_TEMPLATE};
    use std::fs;
    use tempfile::TempDir;

    fn write_templates(dir: &Path) {
        fs::write(dir.join("large.zpl"), LARGE_TEMPLATE).unwrap();
        fs::write(dir.join("small_fork.zpl"), SMALL_FORK_TEMPLATE).unwrap();
        fs::write(dir.join("small_shock.zpl"), SMALL_SHOCK_TEMPLATE).unwrap();
    }

    #[test]
    fn test_load_from_dir() {
        let temp = TempDir::new().unwrap();
        write_templates(temp.path());

        let set = TemplateSet::load_from_dir(temp.path(), &TemplateFileNames::default()).unwrap();

        assert!(set.get(TemplateKind::Large).placeholders().contains("kit_info"));
        assert!(
            set.get(TemplateKind::SmallShock)
                .placeholders()
                .contains("shock_code")
        );
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn test_missing_template_names_kind_and_path() {
        let temp = TempDir::new().unwrap();
        write_templates(temp.path());
        fs::remove_file(temp.path().join("small_fork.zpl")).unwrap();

        let err =
            TemplateSet::load_from_dir(temp.path(), &TemplateFileNames::default()).unwrap_err();

        match err {
            RenderError::MissingTemplate { kind, path } => {
                assert_eq!(kind, "small_fork");
                assert!(path.ends_with("small_fork.zpl"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_template_is_missing() {
        let err = TemplateSet::new("^XA^XZ", "   \n", "^XA^XZ").unwrap_err();
        assert!(matches!(err, RenderError::MissingTemplate { ref kind, .. } if kind == "small_fork"));
    }

    #[test]
    fn test_custom_file_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "{{brand_name}}").unwrap();
        fs::write(temp.path().join("b.txt"), "{{fork_code}}").unwrap();
        fs::write(temp.path().join("c.txt"), "{{shock_code}}").unwrap();
        let names = TemplateFileNames {
            large: "a.txt".to_string(),
            small_fork: "b.txt".to_string(),
            small_shock: "c.txt".to_string(),
        };

        let set = TemplateSet::load_from_dir(temp.path(), &names).unwrap();

        assert_eq!(set.get(TemplateKind::SmallFork).source(), "{{fork_code}}");
    }

    #[test]
    fn test_check_placeholders() {
        let set = TemplateSet::new("{{a}} {{b}}", "{{a}}", "{{c}} {{zz}} {{yy}}").unwrap();

        assert!(set.check_placeholders(&["a", "b", "c", "yy", "zz"]).is_ok());

        let err = set.check_placeholders(&["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownPlaceholders {
                template: "small_shock".to_string(),
                names: vec!["yy".to_string(), "zz".to_string()],
            }
        );
    }

    #[test]
    fn test_template_render_uses_kind_name_in_errors() {
        let set = TemplateSet::new("{{a}}", "x", "y").unwrap();
        let err = set
            .get(TemplateKind::Large)
            .render(&std::collections::BTreeMap::<String, String>::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnresolvedPlaceholders { ref template, .. } if template == "large"));
    }
}
