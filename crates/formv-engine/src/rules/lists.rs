//! Membership checks against configured value lists.
//!
//! One implementation backs the three list-flavored rule keys: allowList
//! (membership required), disallowList (membership forbidden) and
//! warnList (membership downgraded to a warning). All three honor the
//! `caseSensitive` (default true) and `allowTrim` (default false)
//! properties independently.

use formv_model::{FormField, Preferences, Report, Result};

use super::{FieldMap, Outcome, Rule, RuleCommon};

const CASE_SENSITIVE_PROPERTY: &str = "caseSensitive";
const ALLOW_TRIM_PROPERTY: &str = "allowTrim";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Allow,
    Disallow,
    Warn,
}

#[derive(Debug)]
pub struct ListRule {
    kind: ListKind,
    values: Vec<String>,
    common: RuleCommon,
}

impl ListRule {
    pub fn new(
        kind: ListKind,
        values: Vec<String>,
        valid_message: Option<String>,
        invalid_message: Option<String>,
    ) -> Self {
        Self {
            kind,
            values,
            common: RuleCommon::new(valid_message, invalid_message),
        }
    }

    fn matches(&self, value: &str, case_sensitive: bool) -> bool {
        self.values.iter().any(|candidate| {
            if case_sensitive {
                candidate == value
            } else {
                candidate.eq_ignore_ascii_case(value)
            }
        })
    }
}

impl Rule for ListRule {
    fn common(&self) -> &RuleCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut RuleCommon {
        &mut self.common
    }

    fn validate(
        &self,
        field: &FormField,
        _fields: &FieldMap,
        report: &mut Report,
        preferences: &Preferences,
    ) -> Result<Outcome> {
        let mut value = field.value_as_string();
        let case_sensitive = self.bool_property(CASE_SENSITIVE_PROPERTY, true)?;
        if self.bool_property(ALLOW_TRIM_PROPERTY, false)? {
            value = value.trim().to_string();
        }

        let matched = self.matches(&value, case_sensitive);

        match self.kind {
            ListKind::Allow => {
                if matched {
                    self.report_valid(field, preferences, report)?;
                    Ok(Outcome::Passed)
                } else {
                    self.report_error(field, preferences, report)?;
                    Ok(Outcome::Failed)
                }
            }
            ListKind::Disallow => {
                if matched {
                    self.report_error(field, preferences, report)?;
                    Ok(Outcome::Failed)
                } else {
                    self.report_valid(field, preferences, report)?;
                    Ok(Outcome::Passed)
                }
            }
            // A warn-listed value never fails the chain.
            ListKind::Warn => {
                if matched {
                    self.report_warning(field, preferences, report)?;
                } else {
                    self.report_valid(field, preferences, report)?;
                }
                Ok(Outcome::Passed)
            }
        }
    }
}
