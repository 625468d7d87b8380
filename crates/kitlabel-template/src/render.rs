//! Strict `{{name}}` placeholder substitution

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use kitlabel_utils::error::RenderError;

/// `{{name}}` with optional whitespace inside the braces.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// Anything that can answer "what is the value of variable `name`".
pub trait VariableLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl VariableLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl VariableLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Every distinct placeholder name in `source`, sorted.
#[must_use]
pub fn placeholders(source: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(source)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Substitute every placeholder in `source`.
///
/// Fails with [`RenderError::UnresolvedPlaceholders`] naming every
/// placeholder that has no value; nothing is partially rendered.
pub fn render<V>(template_name: &str, source: &str, vars: &V) -> Result<String, RenderError>
where
    V: VariableLookup + ?Sized,
{
    let mut unresolved = BTreeSet::new();

    let rendered = PLACEHOLDER.replace_all(source, |caps: &Captures<'_>| {
        let name = &caps[1];
        match vars.lookup(name) {
            Some(value) => value.to_string(),
            None => {
                unresolved.insert(name.to_string());
                String::new()
            }
        }
    });

    if unresolved.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(RenderError::UnresolvedPlaceholders {
            template: template_name.to_string(),
            names: unresolved.into_iter().collect(),
        })
    }
}
