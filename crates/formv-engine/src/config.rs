//! Configuration tree parsing.
//!
//! The caller hands the engine an already-loaded JSON tree; this module
//! turns its `preferences`, `fields` and `tables` sections into typed
//! values. Every malformed shape is a fatal configuration error raised
//! before any document is processed.

use serde_json::Value;

use formv_model::{FieldType, FormError, Preferences, ReportLevel, Result};

use crate::tables::{FieldTable, TableEntryTemplate, TableRange};

/// Parse the optional `preferences` object, falling back to defaults for
/// anything left unset.
pub fn parse_preferences(root: &Value) -> Result<Preferences> {
    let mut preferences = Preferences::default();

    let Some(node) = root.get("preferences").filter(|node| !node.is_null()) else {
        return Ok(preferences);
    };
    let object = node.as_object().ok_or_else(|| {
        FormError::Config("the 'preferences' property must be an object".to_string())
    })?;

    if let Some(value) = present(object.get("validMessage")) {
        preferences.valid_message = text_value("validMessage", value)?;
    }
    if let Some(value) = present(object.get("invalidMessage")) {
        preferences.invalid_message = text_value("invalidMessage", value)?;
    }
    if let Some(value) = present(object.get("reportLevel")) {
        preferences.report_level = ReportLevel::parse(&text_value("reportLevel", value)?)?;
    }
    if let Some(value) = present(object.get("silent")) {
        preferences.silent = bool_value("silent", value)?;
    }
    if let Some(value) = present(object.get("warnOnUnknownField")) {
        preferences.warn_on_unknown_field = bool_value("warnOnUnknownField", value)?;
    }

    Ok(preferences)
}

/// Parse the optional `tables` array.
pub fn parse_tables(root: &Value) -> Result<Vec<FieldTable>> {
    let Some(node) = root.get("tables").filter(|node| !node.is_null()) else {
        return Ok(Vec::new());
    };
    let array = node.as_array().ok_or_else(|| {
        FormError::Config("the 'tables' property in the configuration must be an array".to_string())
    })?;
    array.iter().map(parse_table).collect()
}

fn parse_table(node: &Value) -> Result<FieldTable> {
    let name = node
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FormError::Config("a table object must have the 'name' property defined".to_string())
        })?
        .to_string();

    let range = parse_range(&name, node.get("range"))?;

    let structure = node
        .get("structure")
        .filter(|node| !node.is_null())
        .ok_or_else(|| {
            FormError::Config(format!(
                "the table '{name}' must have the 'structure' array defined"
            ))
        })?
        .as_array()
        .ok_or_else(|| {
            FormError::Config(format!(
                "the 'structure' property of the table '{name}' must be an array"
            ))
        })?;

    let entries = structure
        .iter()
        .map(|entry| parse_table_entry(&name, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(FieldTable {
        name,
        range,
        entries,
    })
}

fn parse_range(table_name: &str, node: Option<&Value>) -> Result<TableRange> {
    let object = node
        .filter(|node| !node.is_null())
        .and_then(Value::as_object)
        .ok_or_else(|| {
            FormError::Config(format!(
                "the table '{table_name}' must have the 'range' object defined"
            ))
        })?;

    let start = match object.get("start") {
        Some(value) => int_value("start", value)?,
        None => 1,
    };
    let step = match object.get("step") {
        Some(value) => int_value("step", value)?,
        None => 1,
    };
    let end = int_value(
        "end",
        object.get("end").ok_or_else(|| {
            FormError::Config("a range object must have the 'end' property defined".to_string())
        })?,
    )?;

    if step < 1 {
        return Err(FormError::Config(format!(
            "the step {step} in the table '{table_name}' must be a positive integer"
        )));
    }
    if (end - start) % step != 0 {
        return Err(FormError::Config(format!(
            "the step {step} is not valid for the start {start} and end {end}"
        )));
    }

    Ok(TableRange { start, step, end })
}

fn parse_table_entry(table_name: &str, node: &Value) -> Result<TableEntryTemplate> {
    let name = node
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            FormError::Config(format!(
                "every entry of the table '{table_name}' must have the 'name' property defined"
            ))
        })?
        .to_string();

    let field_type = FieldType::parse(node.get("type").and_then(Value::as_str).ok_or_else(
        || {
            FormError::Config(format!(
                "the table entry '{name}' must have the 'type' property defined"
            ))
        },
    )?)?;

    Ok(TableEntryTemplate {
        name,
        field_type,
        validations: validation_entries(node.get("validations"))?,
    })
}

/// The ordered rule key/value pairs of a `validations` object.
pub(crate) fn validation_entries(node: Option<&Value>) -> Result<Vec<(String, Value)>> {
    let Some(node) = node.filter(|node| !node.is_null()) else {
        return Ok(Vec::new());
    };
    let object = node.as_object().ok_or_else(|| {
        FormError::Config("the 'validations' property must be an object".to_string())
    })?;
    Ok(object
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

fn present(node: Option<&Value>) -> Option<&Value> {
    node.filter(|node| !node.is_null())
}

fn text_value(key: &str, node: &Value) -> Result<String> {
    node.as_str().map(str::to_string).ok_or_else(|| {
        FormError::Config(format!("the '{key}' preference must be a string"))
    })
}

fn bool_value(key: &str, node: &Value) -> Result<bool> {
    node.as_bool().ok_or_else(|| {
        FormError::Config(format!(
            "the '{key}' preference must be a boolean; valid values are [true,false]"
        ))
    })
}

fn int_value(key: &str, node: &Value) -> Result<i64> {
    node.as_i64().ok_or_else(|| {
        FormError::Config(format!(
            "the '{key}' property in a range object must be an integer"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_preferences_yields_defaults() {
        let preferences = parse_preferences(&json!({})).unwrap();
        assert_eq!(preferences.report_level, ReportLevel::Detailed);
        assert!(preferences.warn_on_unknown_field);
    }

    #[test]
    fn preferences_overrides_are_applied() {
        let preferences = parse_preferences(&json!({
            "preferences": {
                "validMessage": "ok: {{fieldName}}",
                "reportLevel": "compact",
                "silent": true,
                "warnOnUnknownField": false
            }
        }))
        .unwrap();
        assert_eq!(preferences.valid_message, "ok: {{fieldName}}");
        assert_eq!(preferences.report_level, ReportLevel::Compact);
        assert!(preferences.silent);
        assert!(!preferences.warn_on_unknown_field);
    }

    #[test]
    fn unknown_report_level_is_a_config_error() {
        let result = parse_preferences(&json!({
            "preferences": { "reportLevel": "verbose" }
        }));
        assert!(matches!(result, Err(FormError::Config(_))));
    }

    #[test]
    fn range_defaults_start_and_step_to_one() {
        let tables = parse_tables(&json!({
            "tables": [{
                "name": "items",
                "range": { "end": 3 },
                "structure": []
            }]
        }))
        .unwrap();
        assert_eq!(tables[0].range, TableRange { start: 1, step: 1, end: 3 });
    }

    #[test]
    fn non_divisible_range_is_a_config_error() {
        let result = parse_tables(&json!({
            "tables": [{
                "name": "items",
                "range": { "start": 1, "step": 2, "end": 4 },
                "structure": []
            }]
        }));
        assert!(matches!(result, Err(FormError::Config(_))));
    }
}
