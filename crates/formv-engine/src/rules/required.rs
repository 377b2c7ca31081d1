//! Presence checks with a three-way level and a dependency gate.

use formv_model::{FormError, FormField, Preferences, PropertyValue, Report, Result};

use super::{FieldMap, Outcome, Rule, RuleCommon};

const DEPENDENT_KEYS_PROPERTY: &str = "dependentKeys";

/// How strictly a field's presence is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredLevel {
    Yes,
    No,
    Warning,
}

impl RequiredLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            "WARNING" => Ok(Self::Warning),
            other => Err(FormError::Config(format!(
                "required level '{other}' is not supported; valid values are YES, NO, WARNING"
            ))),
        }
    }

    pub fn from_bool(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

#[derive(Debug)]
pub struct RequiredRule {
    level: RequiredLevel,
    common: RuleCommon,
}

impl RequiredRule {
    pub fn new(
        level: RequiredLevel,
        valid_message: Option<String>,
        invalid_message: Option<String>,
    ) -> Self {
        Self {
            level,
            common: RuleCommon::new(valid_message, invalid_message),
        }
    }

    /// Evaluate the optional `dependentKeys` gate.
    ///
    /// A leading `+` selects AND semantics over the comma-separated key
    /// list, otherwise OR. Keys not present in the registry are skipped.
    fn is_enabled(&self, fields: &FieldMap) -> Result<bool> {
        let keys = match self.common.properties.get(DEPENDENT_KEYS_PROPERTY) {
            None => return Ok(true),
            Some(PropertyValue::Text(keys)) => keys,
            Some(_) => {
                return Err(FormError::Config(format!(
                    "the value of '{DEPENDENT_KEYS_PROPERTY}' must be a string"
                )));
            }
        };

        let needs_all = keys.starts_with('+');
        let dependencies = keys
            .strip_prefix('+')
            .unwrap_or(keys)
            .split(',')
            .filter_map(|name| fields.get(name));

        let enabled = if needs_all {
            dependencies.fold(true, |enabled, field| enabled && field.has_value())
        } else {
            dependencies.fold(false, |enabled, field| enabled || field.has_value())
        };
        Ok(enabled)
    }
}

impl Rule for RequiredRule {
    fn common(&self) -> &RuleCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut RuleCommon {
        &mut self.common
    }

    fn validate(
        &self,
        field: &FormField,
        fields: &FieldMap,
        report: &mut Report,
        preferences: &Preferences,
    ) -> Result<Outcome> {
        if !self.is_enabled(fields)? {
            return Ok(Outcome::Skipped);
        }

        if !field.has_value() {
            return match self.level {
                // Explicitly not required: counts as a pass in the report,
                // but nothing further is checked on an absent value.
                RequiredLevel::No => {
                    self.report_valid(field, preferences, report)?;
                    Ok(Outcome::Failed)
                }
                RequiredLevel::Warning => {
                    self.report_warning(field, preferences, report)?;
                    Ok(Outcome::Passed)
                }
                RequiredLevel::Yes => {
                    self.report_error(field, preferences, report)?;
                    Ok(Outcome::Failed)
                }
            };
        }

        self.report_valid(field, preferences, report)?;
        Ok(Outcome::Passed)
    }
}
