//! Builds one rule from one `key: value` pair of a `validations` object.
//!
//! Two configuration shapes are accepted: the shorthand form, where the
//! value is the rule's primary argument directly, and the object form
//! with a required `value` key, optional message overrides and extra
//! properties. Every failure aborts configuration loading; no partial
//! rule set is ever produced.

use serde_json::Value;

use formv_model::{FormError, PropertyMap, PropertyValue, Result};

use super::custom::CustomRuleRegistry;
use super::format::{FormatKind, FormatRule};
use super::lists::{ListKind, ListRule};
use super::pattern::RegexRule;
use super::required::{RequiredLevel, RequiredRule};
use super::Rule;

const RESERVED_KEYS: [&str; 3] = ["value", "validMessage", "invalidMessage"];

/// Build the rule configured under `key`.
pub fn build_rule(
    key: &str,
    value: &Value,
    custom_rules: &CustomRuleRegistry,
) -> Result<Box<dyn Rule>> {
    let mut valid_message = None;
    let mut invalid_message = None;
    let mut properties = PropertyMap::new();

    let primary = if let Some(object) = value.as_object() {
        let primary = object
            .get("value")
            .filter(|node| !node.is_null())
            .ok_or_else(|| {
                FormError::Config(format!(
                    "the 'value' property on the '{key}' validation must be set \
                     when the object form is used"
                ))
            })?;

        valid_message = message_override(object.get("validMessage"));
        invalid_message = message_override(object.get("invalidMessage"));

        for (property_key, node) in object {
            if RESERVED_KEYS.contains(&property_key.as_str()) {
                continue;
            }
            properties.insert(property_key.clone(), parse_property(property_key, node)?);
        }

        primary
    } else {
        value
    };

    let mut rule: Box<dyn Rule> = match key {
        "required" => Box::new(RequiredRule::new(
            parse_required_level(primary)?,
            valid_message,
            invalid_message,
        )),
        "format" => Box::new(FormatRule::new(
            FormatKind::parse(text_argument(key, primary)?)?,
            valid_message,
            invalid_message,
        )),
        "allowList" => Box::new(ListRule::new(
            ListKind::Allow,
            parse_list_values(key, primary)?,
            valid_message,
            invalid_message,
        )),
        "disallowList" => Box::new(ListRule::new(
            ListKind::Disallow,
            parse_list_values(key, primary)?,
            valid_message,
            invalid_message,
        )),
        "warnList" => Box::new(ListRule::new(
            ListKind::Warn,
            parse_list_values(key, primary)?,
            valid_message,
            invalid_message,
        )),
        "regex" => Box::new(RegexRule::compile(
            text_argument(key, primary)?,
            valid_message,
            invalid_message,
        )?),
        "custom" => custom_rules.build(
            text_argument(key, primary)?,
            valid_message,
            invalid_message,
        )?,
        other => {
            return Err(FormError::Config(format!(
                "invalid validation type '{other}'"
            )));
        }
    };

    rule.common_mut().properties = properties;
    Ok(rule)
}

fn message_override(node: Option<&Value>) -> Option<String> {
    node.and_then(Value::as_str).map(str::to_string)
}

/// Extra rule properties are restricted to boolean, number, string or
/// array-of-string; anything else is a build error.
fn parse_property(key: &str, node: &Value) -> Result<PropertyValue> {
    match node {
        Value::Bool(value) => Ok(PropertyValue::Bool(*value)),
        Value::Number(number) => number.as_f64().map(PropertyValue::Number).ok_or_else(|| {
            FormError::Config(format!("the property '{key}' is not a representable number"))
        }),
        Value::String(text) => Ok(PropertyValue::Text(text.clone())),
        Value::Array(items) => Ok(PropertyValue::List(string_items(key, items)?)),
        _ => Err(FormError::Config(format!(
            "the property '{key}' has an unsupported type; only booleans, \
             numbers, strings and arrays of strings are allowed"
        ))),
    }
}

fn string_items(key: &str, items: &[Value]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                FormError::Config(format!("the array property '{key}' may only contain strings"))
            })
        })
        .collect()
}

fn parse_required_level(node: &Value) -> Result<RequiredLevel> {
    match node {
        Value::Bool(value) => Ok(RequiredLevel::from_bool(*value)),
        Value::String(text) => RequiredLevel::parse(text),
        _ => Err(FormError::Config(
            "the 'required' validation takes a boolean or a level name".to_string(),
        )),
    }
}

/// Comma-separated string or array of strings.
fn parse_list_values(key: &str, node: &Value) -> Result<Vec<String>> {
    match node {
        Value::String(text) => Ok(text.split(',').map(str::to_string).collect()),
        Value::Array(items) => string_items(key, items),
        _ => Err(FormError::Config(format!(
            "invalid value for the '{key}' validation; expected a \
             comma-separated string or an array of strings"
        ))),
    }
}

fn text_argument<'a>(key: &str, node: &'a Value) -> Result<&'a str> {
    node.as_str().ok_or_else(|| {
        FormError::Config(format!("the '{key}' validation takes a string value"))
    })
}
