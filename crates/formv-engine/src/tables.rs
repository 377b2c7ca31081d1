//! Templated bulk-field expansion.
//!
//! A table declares a numeric row range and a list of entry templates.
//! Expansion substitutes the literal `{{row}}` token (exact bracket
//! syntax, distinct from the general variable syntax) with each row
//! number in the generated field name, both message templates and every
//! string or list-of-string rule property, producing one concrete field
//! and rule chain per row.

use formv_model::{FieldType, FormField, PropertyValue, Result};
use serde_json::Value;

use crate::rules::{CustomRuleRegistry, Rule, RuleCommon, build_rule};

/// The row placeholder token.
pub const ROW_TOKEN: &str = "{{row}}";

/// Inclusive row range. `start` and `step` default to 1 in the config
/// grammar; `end` is required. Invariant, enforced at parse time:
/// `(end - start) % step == 0` and `step >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRange {
    pub start: i64,
    pub step: i64,
    pub end: i64,
}

impl TableRange {
    fn rows(&self) -> impl Iterator<Item = i64> {
        (self.start..=self.end).step_by(self.step as usize)
    }
}

/// One templated field declaration inside a table's `structure` array.
#[derive(Debug, Clone)]
pub struct TableEntryTemplate {
    pub name: String,
    pub field_type: FieldType,
    /// Rule key/value pairs in declaration order, built per row.
    pub validations: Vec<(String, Value)>,
}

/// A template that expands into many concrete fields across a row range.
#[derive(Debug, Clone)]
pub struct FieldTable {
    pub name: String,
    pub range: TableRange,
    pub entries: Vec<TableEntryTemplate>,
}

/// One concrete field and its rule chain produced by expansion.
#[derive(Debug)]
pub struct ExpandedField {
    pub field: FormField,
    pub rules: Vec<Box<dyn Rule>>,
}

impl FieldTable {
    /// Expand every entry template across the row range, rows ascending.
    pub fn expand(&self, custom_rules: &CustomRuleRegistry) -> Result<Vec<ExpandedField>> {
        let mut expanded = Vec::new();
        for entry in &self.entries {
            for row in self.range.rows() {
                let field = FormField::new(resolve_row(&entry.name, row), entry.field_type);
                let mut rules = Vec::with_capacity(entry.validations.len());
                for (key, value) in &entry.validations {
                    let mut rule = build_rule(key, value, custom_rules)?;
                    resolve_rule_rows(rule.common_mut(), row);
                    rules.push(rule);
                }
                expanded.push(ExpandedField { field, rules });
            }
        }
        Ok(expanded)
    }
}

fn resolve_row(template: &str, row: i64) -> String {
    template.replace(ROW_TOKEN, &row.to_string())
}

/// Substitute the row token into a built rule's messages and properties.
/// Boolean and numeric properties are left untouched.
fn resolve_rule_rows(common: &mut RuleCommon, row: i64) {
    if let Some(message) = common.valid_message.take() {
        common.valid_message = Some(resolve_row(&message, row));
    }
    if let Some(message) = common.invalid_message.take() {
        common.invalid_message = Some(resolve_row(&message, row));
    }
    for value in common.properties.values_mut() {
        match value {
            PropertyValue::Text(text) => *text = resolve_row(text, row),
            PropertyValue::List(items) => {
                for item in items {
                    *item = resolve_row(item, row);
                }
            }
            PropertyValue::Bool(_) | PropertyValue::Number(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_token_replacement_is_literal() {
        assert_eq!(resolve_row("row_{{row}}", 3), "row_3");
        assert_eq!(resolve_row("{{row}}_{{row}}", 2), "2_2");
        // The general variable syntax is not the row token.
        assert_eq!(resolve_row("{{fieldName}}", 2), "{{fieldName}}");
    }

    #[test]
    fn range_steps_ascending() {
        let range = TableRange {
            start: 1,
            step: 2,
            end: 5,
        };
        assert_eq!(range.rows().collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
