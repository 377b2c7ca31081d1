//! Full-match regular expression checks.

use regex::Regex;

use formv_model::{FormError, FormField, Preferences, Report, Result};

use super::{FieldMap, Outcome, Rule, RuleCommon};

#[derive(Debug)]
pub struct RegexRule {
    pattern: Regex,
    common: RuleCommon,
}

impl RegexRule {
    /// Compile `source` into a full-match pattern. Compilation failure is
    /// a configuration error.
    pub fn compile(
        source: &str,
        valid_message: Option<String>,
        invalid_message: Option<String>,
    ) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{source})$")).map_err(|_| {
            FormError::Config(format!("regular expression '{source}' is not valid"))
        })?;
        Ok(Self {
            pattern,
            common: RuleCommon::new(valid_message, invalid_message),
        })
    }
}

impl Rule for RegexRule {
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
        if self.pattern.is_match(&field.value_as_string()) {
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
    fn pattern_must_match_the_whole_value() {
        let rule = RegexRule::compile("[0-9]{3}", None, None).unwrap();
        assert!(rule.pattern.is_match("123"));
        assert!(!rule.pattern.is_match("1234"));
        assert!(!rule.pattern.is_match("a123"));
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        assert!(matches!(
            RegexRule::compile("(unclosed", None, None),
            Err(FormError::Config(_))
        ));
    }
}
