//! Cart-to-documents batch generation

use serde::Serialize;
use std::time::Instant;

use kitlabel_template::{TemplateKind, TemplateSet};
use kitlabel_utils::error::{BatchError, RenderError};
use kitlabel_utils::logging::{batch_span, log_batch_complete, log_batch_error, log_batch_start};

use crate::cart::CartEntry;
use crate::expansion::LabelCounts;
use crate::variables::{KNOWN_VARIABLES, LabelVariableSet, LayoutWarning};

/// Separator between documents in one output string
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// A layout warning tied to the cart entry that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryWarning {
    pub entry_id: u64,
    pub product_code: String,
    pub warning: LayoutWarning,
}

/// Rendered documents and counts for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutput {
    pub big_document: String,
    pub small_document: String,
    pub counts: LabelCounts,
    pub warnings: Vec<EntryWarning>,
}

/// Renders cart entries into the big and small documents.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    templates: TemplateSet,
}

impl BatchGenerator {
    /// Build a generator over a template set.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnknownPlaceholders`] when any template uses a name the
    /// variable builder does not produce.
    pub fn new(templates: TemplateSet) -> Result<Self, RenderError> {
        templates.check_placeholders(&KNOWN_VARIABLES)?;
        Ok(Self { templates })
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Render every entry, in order.
    ///
    /// Either every document renders or the whole batch fails with the first
    /// failing entry; no partial output is returned.
    pub fn generate(&self, entries: &[CartEntry]) -> Result<BatchOutput, BatchError> {
        let span = batch_span(entries.len());
        let _enter = span.enter();
        let started = Instant::now();

        let kit_units: u64 = entries.iter().map(|e| u64::from(e.quantity)).sum();
        log_batch_start(entries.len(), kit_units);

        let mut big = Vec::new();
        let mut small = Vec::new();
        let mut counts = LabelCounts::default();
        let mut warnings = Vec::new();

        for entry in entries {
            let vars = LabelVariableSet::build(&entry.record);
            let entry_counts = entry.counts();

            self.render_copies(entry, &vars, TemplateKind::Large, entry_counts.big, &mut big)?;
            self.render_copies(
                entry,
                &vars,
                TemplateKind::SmallFork,
                entry_counts.small_fork,
                &mut small,
            )?;
            self.render_copies(
                entry,
                &vars,
                TemplateKind::SmallShock,
                entry_counts.small_shock,
                &mut small,
            )?;

            for warning in vars.warnings() {
                tracing::warn!(
                    entry_id = entry.id,
                    product_code = entry.product_code(),
                    %warning,
                    "Layout warning"
                );
                warnings.push(EntryWarning {
                    entry_id: entry.id,
                    product_code: entry.product_code().to_string(),
                    warning: warning.clone(),
                });
            }

            tracing::debug!(
                entry_id = entry.id,
                kit_type = %entry.kit_type,
                quantity = entry.quantity,
                big = entry_counts.big,
                small = entry_counts.total_small(),
                "Rendered entry"
            );
            counts += entry_counts;
        }

        log_batch_complete(
            counts.big,
            counts.total_small(),
            started.elapsed().as_millis(),
        );

        Ok(BatchOutput {
            big_document: big.join(DOCUMENT_SEPARATOR),
            small_document: small.join(DOCUMENT_SEPARATOR),
            counts,
            warnings,
        })
    }

    fn render_copies(
        &self,
        entry: &CartEntry,
        vars: &LabelVariableSet,
        kind: TemplateKind,
        copies: u64,
        out: &mut Vec<String>,
    ) -> Result<(), BatchError> {
        let template = self.templates.get(kind);
        for _ in 0..copies {
            let document = template.render(vars).map_err(|source| {
                log_batch_error(entry.id, &source.to_string());
                BatchError::Entry {
                    entry_id: entry.id,
                    product_code: entry.product_code().to_string(),
                    source,
                }
            })?;
            out.push(document);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use kitlabel_catalog::{FieldId, ProductRecord};
    use kitlabel_utils::test_support::{LARGE_TEMPLATE, SMALL_FORK_TEMPLATE, SMALL_SHOCK_TEMPLATE};
    use kitlabel_utils::types::KitType;

    fn generator() -> BatchGenerator {
        BatchGenerator::new(
            TemplateSet::new(LARGE_TEMPLATE, SMALL_FORK_TEMPLATE, SMALL_SHOCK_TEMPLATE).unwrap(),
        )
        .unwrap()
    }

    fn record(code: &str, brand: &str) -> ProductRecord {
        ProductRecord::from_pairs([
            (FieldId::ForkCode, code),
            (FieldId::ShockCode, code),
            (FieldId::BrandName, brand),
            (FieldId::ModelType, "MODEL"),
        ])
    }

    #[test]
    fn test_new_rejects_templates_with_unknown_placeholders() {
        let templates = TemplateSet::new("{{brand_name}} {{colour}}", "^XA^XZ", "^XA^XZ").unwrap();

        let err = BatchGenerator::new(templates).unwrap_err();

        assert_eq!(
            err,
            RenderError::UnknownPlaceholders {
                template: "large".to_string(),
                names: vec!["colour".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_cart_produces_empty_documents() {
        let output = generator().generate(&[]).unwrap();
        assert_eq!(output.big_document, "");
        assert_eq!(output.small_document, "");
        assert_eq!(output.counts, LabelCounts::default());
    }

    #[test]
    fn test_documents_follow_cart_order_and_multiplicity() {
        let mut cart = Cart::new();
        cart.add(&record("F-1", "ALPHA"), KitType::Fork, 2).unwrap();
        cart.add(&record("S-1", "BRAVO"), KitType::Shock, 1).unwrap();

        let output = generator().generate(cart.entries()).unwrap();

        assert_eq!(output.counts, LabelCounts::new(3, 4, 1));
        let big: Vec<&str> = output.big_document.split(DOCUMENT_SEPARATOR).collect();
        assert_eq!(big.len(), 3);
        assert!(big[0].contains("^FDALPHA^FS"));
        assert!(big[1].contains("^FDALPHA^FS"));
        assert!(big[2].contains("^FDBRAVO^FS"));

        let small: Vec<&str> = output.small_document.split(DOCUMENT_SEPARATOR).collect();
        assert_eq!(small.len(), 5);
        assert!(small[..4].iter().all(|doc| doc.contains("F-1 / ")));
        assert!(small[4].contains("S-1 / "));
        assert_eq!(output.small_document.matches("^XA").count(), 5);
    }

    #[test]
    fn test_render_failure_fails_whole_batch() {
        // Bypass the startup check to exercise the render-time guard.
        let generator = BatchGenerator {
            templates: TemplateSet::new("{{brand_name}}", "{{not_a_variable}}", "^XA^XZ").unwrap(),
        };
        let mut cart = Cart::new();
        cart.add(&record("S-1", "SHOCK ONLY"), KitType::Shock, 1).unwrap();
        cart.add(&record("F-1", "FORK"), KitType::Fork, 1).unwrap();

        let err = generator.generate(cart.entries()).unwrap_err();

        let BatchError::Entry {
            entry_id,
            product_code,
            source,
        } = err;
        assert_eq!(entry_id, 2);
        assert_eq!(product_code, "F-1");
        assert!(matches!(source, RenderError::UnresolvedPlaceholders { .. }));
    }

    #[test]
    fn test_warnings_carry_entry_id() {
        let long = ProductRecord::from_pairs([
            (FieldId::ForkCode, "F-1".to_string()),
            (FieldId::BrandName, "LONG NOTES".to_string()),
            (FieldId::ModelType, "MODEL".to_string()),
            (FieldId::ForkExtraInfo, "n".repeat(260)),
        ]);
        let mut cart = Cart::new();
        cart.add(&record("F-0", "SHORT"), KitType::Fork, 1).unwrap();
        cart.add(&long, KitType::Fork, 1).unwrap();

        let output = generator().generate(cart.entries()).unwrap();

        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].entry_id, 2);
        assert_eq!(output.warnings[0].product_code, "F-1");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let mut cart = Cart::new();
        cart.add(&record("C-1", "COMBI"), KitType::Combi, 3).unwrap();
        let generator = generator();

        let first = generator.generate(cart.entries()).unwrap();
        let second = generator.generate(cart.entries()).unwrap();

        assert_eq!(first, second);
    }
}
