//! Well-known value formats with optional numeric bounds.

use std::sync::LazyLock;

use regex::Regex;

use formv_model::{FormError, FormField, Preferences, Report, Result};

use super::{FieldMap, Outcome, Rule, RuleCommon};

const MINIMUM_PROPERTY: &str = "minimum";
const MAXIMUM_PROPERTY: &str = "maximum";
const EQUALS_PROPERTY: &str = "equals";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Email,
    Integer,
    Decimal,
}

impl FormatKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "EMAIL" => Ok(Self::Email),
            "INTEGER" => Ok(Self::Integer),
            "DECIMAL" => Ok(Self::Decimal),
            other => Err(FormError::Config(format!(
                "format type '{other}' is not supported; valid values are EMAIL, INTEGER, DECIMAL"
            ))),
        }
    }
}

#[derive(Debug)]
pub struct FormatRule {
    kind: FormatKind,
    common: RuleCommon,
}

impl FormatRule {
    pub fn new(
        kind: FormatKind,
        valid_message: Option<String>,
        invalid_message: Option<String>,
    ) -> Self {
        Self {
            kind,
            common: RuleCommon::new(valid_message, invalid_message),
        }
    }

    /// Check the optional `minimum`/`maximum`/`equals` bounds.
    fn within_bounds(&self, value: f64) -> Result<bool> {
        let mut within = true;
        if let Some(minimum) = self.number_property(MINIMUM_PROPERTY)? {
            within &= minimum <= value;
        }
        if let Some(maximum) = self.number_property(MAXIMUM_PROPERTY)? {
            within &= value <= maximum;
        }
        if let Some(expected) = self.number_property(EQUALS_PROPERTY)? {
            within &= value == expected;
        }
        Ok(within)
    }
}

impl Rule for FormatRule {
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
        let value = field.value_as_string();

        let is_valid = match self.kind {
            FormatKind::Email => EMAIL_PATTERN.is_match(&value),
            FormatKind::Integer => match value.parse::<i64>() {
                Ok(number) => self.within_bounds(number as f64)?,
                Err(_) => false,
            },
            FormatKind::Decimal => match value.parse::<f64>() {
                Ok(number) => self.within_bounds(number)?,
                Err(_) => false,
            },
        };

        if is_valid {
            self.report_valid(field, preferences, report)?;
            Ok(Outcome::Passed)
        } else {
            self.report_error(field, preferences, report)?;
            Ok(Outcome::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(EMAIL_PATTERN.is_match("user@example.com"));
        assert!(EMAIL_PATTERN.is_match("first.last+tag@sub.example.co"));
        assert!(!EMAIL_PATTERN.is_match("not-an-email"));
        assert!(!EMAIL_PATTERN.is_match("user@"));
        assert!(!EMAIL_PATTERN.is_match("user@example"));
        assert!(!EMAIL_PATTERN.is_match(""));
    }

    #[test]
    fn format_kind_parse_is_case_insensitive() {
        assert_eq!(FormatKind::parse("email").unwrap(), FormatKind::Email);
        assert_eq!(FormatKind::parse("Integer").unwrap(), FormatKind::Integer);
        assert!(FormatKind::parse("date").is_err());
    }
}
