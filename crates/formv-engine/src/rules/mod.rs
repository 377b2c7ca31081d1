//! Validation rules and the rule contract.
//!
//! Each rule appends at most one message to exactly one transient report
//! bucket per invocation and returns a tri-state [`Outcome`]. The chain
//! runner stops a field's chain on `Failed`, while `Skipped` (a disabled
//! rule) continues as if the rule were absent.

mod custom;
mod factory;
mod format;
mod lists;
mod pattern;
mod required;

pub use custom::CustomRuleRegistry;
pub use factory::build_rule;
pub use format::{FormatKind, FormatRule};
pub use lists::{ListKind, ListRule};
pub use pattern::RegexRule;
pub use required::{RequiredLevel, RequiredRule};

use std::collections::HashMap;

use formv_model::{FormError, FormField, Preferences, PropertyMap, PropertyValue, Report, Result};

use crate::variables::{default_resolver, substitute};

/// All registered fields of one run, keyed by resolved name.
pub type FieldMap = HashMap<String, FormField>;

/// Result of one rule invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The rule passed; the chain continues.
    Passed,
    /// The rule failed; the chain stops.
    Failed,
    /// The rule was disabled for this evaluation; no message was emitted
    /// and the chain continues.
    Skipped,
}

/// State shared by every rule variant: message template overrides and the
/// open-ended property bag.
#[derive(Debug, Clone, Default)]
pub struct RuleCommon {
    pub valid_message: Option<String>,
    pub invalid_message: Option<String>,
    pub properties: PropertyMap,
}

impl RuleCommon {
    pub fn new(valid_message: Option<String>, invalid_message: Option<String>) -> Self {
        Self {
            valid_message,
            invalid_message,
            properties: PropertyMap::new(),
        }
    }
}

/// Contract implemented by every validation rule.
pub trait Rule: std::fmt::Debug {
    fn common(&self) -> &RuleCommon;

    fn common_mut(&mut self) -> &mut RuleCommon;

    /// Run the rule against `field`. `fields` is the full registry state,
    /// available for cross-field conditions.
    fn validate(
        &self,
        field: &FormField,
        fields: &FieldMap,
        report: &mut Report,
        preferences: &Preferences,
    ) -> Result<Outcome>;

    /// Render the valid message (or the preferences default) into the
    /// transient report bucket.
    fn report_valid(
        &self,
        field: &FormField,
        preferences: &Preferences,
        report: &mut Report,
    ) -> Result<()> {
        let template = self
            .common()
            .valid_message
            .as_deref()
            .unwrap_or(&preferences.valid_message);
        report.add_report(&field.name, substitute(field, template, default_resolver)?);
        Ok(())
    }

    /// Render the invalid message (or the preferences default) into the
    /// transient warning bucket.
    fn report_warning(
        &self,
        field: &FormField,
        preferences: &Preferences,
        report: &mut Report,
    ) -> Result<()> {
        let template = self
            .common()
            .invalid_message
            .as_deref()
            .unwrap_or(&preferences.invalid_message);
        report.add_warning(&field.name, substitute(field, template, default_resolver)?);
        Ok(())
    }

    /// Render the invalid message (or the preferences default) into the
    /// transient error bucket.
    fn report_error(
        &self,
        field: &FormField,
        preferences: &Preferences,
        report: &mut Report,
    ) -> Result<()> {
        let template = self
            .common()
            .invalid_message
            .as_deref()
            .unwrap_or(&preferences.invalid_message);
        report.add_error(&field.name, substitute(field, template, default_resolver)?);
        Ok(())
    }

    /// Boolean property with a default, rejecting other shapes.
    fn bool_property(&self, key: &str, default: bool) -> Result<bool> {
        match self.common().properties.get(key) {
            None => Ok(default),
            Some(PropertyValue::Bool(value)) => Ok(*value),
            Some(_) => Err(FormError::Config(format!(
                "the value of '{key}' must be a boolean"
            ))),
        }
    }

    /// Optional numeric property, rejecting other shapes.
    fn number_property(&self, key: &str) -> Result<Option<f64>> {
        match self.common().properties.get(key) {
            None => Ok(None),
            Some(PropertyValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(FormError::Config(format!(
                "the value of '{key}' must be a number"
            ))),
        }
    }
}
