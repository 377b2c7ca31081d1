//! Validation engine: binds document values and runs rule chains.
//!
//! One engine instance covers one document end-to-end (bind → validate →
//! aggregate). The pipeline is synchronous and single-threaded; a run
//! either completes or fails synchronously.

use serde_json::Value;

use formv_model::{Preferences, Report, Result};
use tracing::{debug, warn};

use crate::config::parse_preferences;
use crate::document::DocumentSource;
use crate::registry::FieldRegistry;
use crate::rules::{CustomRuleRegistry, Outcome};

#[derive(Debug)]
pub struct ValidationEngine {
    registry: FieldRegistry,
    preferences: Preferences,
}

impl ValidationEngine {
    /// Build an engine from an already-loaded configuration tree.
    ///
    /// Any malformed configuration aborts here, before any document is
    /// touched; no partial rule set is ever produced.
    pub fn from_config(root: &Value, custom_rules: &CustomRuleRegistry) -> Result<Self> {
        let preferences = parse_preferences(root)?;
        let registry = FieldRegistry::from_config(root, custom_rules)?;
        debug!(fields = registry.len(), "configuration loaded");
        Ok(Self {
            registry,
            preferences,
        })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Bind the document's resolved values onto the registered fields.
    ///
    /// Document fields unknown to the registry are skipped; when
    /// `warnOnUnknownField` is set each one is reported on the operator
    /// channel, never in the report itself. Registered fields absent from
    /// the document stay unbound and their chains still run.
    pub fn bind(&mut self, source: &dyn DocumentSource) -> Result<()> {
        for document_field in source.read_fields()? {
            if !self.registry.contains(&document_field.name) {
                if self.preferences.warn_on_unknown_field {
                    warn!(field = %document_field.name, "unknown document field");
                }
                continue;
            }
            self.registry
                .bind_value(&document_field.name, document_field.value);
        }
        Ok(())
    }

    /// Run every field's rule chain and return the committed report.
    ///
    /// Chains run in field registration order; each chain stops at the
    /// first failed rule, and the field's transient messages are committed
    /// under the all-or-nothing protocol before the next field starts.
    pub fn validate_all(&self) -> Result<Report> {
        let mut report = Report::new();

        for name in self.registry.names() {
            let Some(field) = self.registry.field(name) else {
                continue;
            };
            for rule in self.registry.chain(name) {
                let outcome =
                    rule.validate(field, self.registry.fields(), &mut report, &self.preferences)?;
                match outcome {
                    Outcome::Failed => break,
                    Outcome::Passed | Outcome::Skipped => {}
                }
            }
            report.commit();
        }

        Ok(report)
    }
}
