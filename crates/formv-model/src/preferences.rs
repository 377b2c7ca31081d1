//! Run-wide preferences parsed from the configuration `preferences` object.

use crate::error::{FormError, Result};

/// How much of the validation outcome is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLevel {
    /// No report output.
    None,
    /// No report output; validation errors map to a non-zero exit code.
    ExitCode,
    /// Compact single-line JSON.
    Compact,
    /// Pretty-printed JSON.
    #[default]
    Detailed,
    /// Pretty-printed JSON, everything included.
    All,
}

impl ReportLevel {
    /// Parse a report level from its configuration spelling (case-insensitive).
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "EXIT_CODE" => Ok(Self::ExitCode),
            "COMPACT" => Ok(Self::Compact),
            "DETAILED" => Ok(Self::Detailed),
            "ALL" => Ok(Self::All),
            other => Err(FormError::Config(format!(
                "'{other}' is not a valid report level; valid values are \
                 NONE, EXIT_CODE, COMPACT, DETAILED, ALL"
            ))),
        }
    }
}

/// Defaults and switches that apply to a whole validation run.
#[derive(Debug, Clone)]
pub struct Preferences {
    /// Default template for valid-outcome messages.
    pub valid_message: String,
    /// Default template for warning and error messages.
    pub invalid_message: String,
    pub report_level: ReportLevel,
    /// Suppress report printing entirely.
    pub silent: bool,
    /// Emit an operator warning when the document contains a field the
    /// configuration does not declare.
    pub warn_on_unknown_field: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            valid_message: "The field {{fieldName}} is valid.".to_string(),
            invalid_message: "The value '{{fieldValue}}' for '{{fieldName}}' is invalid."
                .to_string(),
            report_level: ReportLevel::default(),
            silent: false,
            warn_on_unknown_field: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_level_parse_is_case_insensitive() {
        assert_eq!(ReportLevel::parse("exit_code").unwrap(), ReportLevel::ExitCode);
        assert_eq!(ReportLevel::parse("Detailed").unwrap(), ReportLevel::Detailed);
        assert!(ReportLevel::parse("verbose").is_err());
    }

    #[test]
    fn default_messages_reference_field_variables() {
        let preferences = Preferences::default();
        assert!(preferences.valid_message.contains("{{fieldName}}"));
        assert!(preferences.invalid_message.contains("{{fieldValue}}"));
        assert!(!preferences.silent);
        assert!(preferences.warn_on_unknown_field);
    }
}
