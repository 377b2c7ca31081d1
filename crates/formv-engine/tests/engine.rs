//! End-to-end pipeline tests: configuration → bind → validate → report.

use serde_json::json;

use formv_engine::{
    CustomRuleRegistry, DocumentField, DocumentSource, Outcome, ValidationEngine, render_report,
};
use formv_model::{FieldType, FieldValue, FormError};

/// In-memory document adapter for pipeline tests.
struct MapDocument(Vec<DocumentField>);

impl MapDocument {
    fn with_text(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(name, value)| DocumentField {
                    name: name.to_string(),
                    value: FieldValue::Text(value.to_string()),
                })
                .collect(),
        )
    }
}

impl DocumentSource for MapDocument {
    fn read_fields(&self) -> formv_model::Result<Vec<DocumentField>> {
        Ok(self
            .0
            .iter()
            .map(|field| DocumentField {
                name: field.name.clone(),
                value: field.value.clone(),
            })
            .collect())
    }
}

fn engine_for(config: serde_json::Value) -> ValidationEngine {
    ValidationEngine::from_config(&config, &CustomRuleRegistry::new()).expect("valid configuration")
}

#[test]
fn missing_required_value_stops_the_chain_before_format() {
    let config = json!({
        "fields": [
            {
                "name": "email",
                "type": "text",
                "validations": { "required": true, "format": "email" }
            }
        ]
    });

    let mut engine = engine_for(config);
    engine.bind(&MapDocument::with_text(&[])).unwrap();
    let report = engine.validate_all().unwrap();

    // Only the required failure surfaces; format never ran.
    assert_eq!(report.errors().len(), 1);
    assert_eq!(
        report.errors()[0].message,
        "The value '' for 'email' is invalid."
    );
    assert!(!report.has_reports());
    assert!(!report.has_warnings());
}

#[test]
fn later_failure_discards_the_earlier_valid_message() {
    let config = json!({
        "fields": [
            {
                "name": "zip",
                "type": "text",
                "validations": {
                    "required": true,
                    "regex": "[0-9]{5}"
                }
            }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("zip", "abcde")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    // required passed and buffered a valid message, regex then failed.
    assert!(!report.has_reports());
    assert_eq!(report.errors().len(), 1);
}

#[test]
fn clean_chain_reports_one_valid_message_per_rule() {
    let config = json!({
        "fields": [
            {
                "name": "zip",
                "type": "text",
                "validations": {
                    "required": true,
                    "regex": "[0-9]{5}"
                }
            }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("zip", "12345")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.reports().len(), 2);
    assert!(report.reports().iter().all(|entry| entry.field_name == "zip"));
    assert!(!report.has_warnings());
    assert!(!report.has_errors());
}

#[test]
fn rules_run_in_configuration_declaration_order() {
    // Both rules fail on this value; only the first declared one reports.
    let config = json!({
        "fields": [
            {
                "name": "code",
                "type": "text",
                "validations": {
                    "regex": { "value": "[a-z]+", "invalidMessage": "first" },
                    "allowList": { "value": ["X"], "invalidMessage": "second" }
                }
            }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("code", "123")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].message, "first");
}

#[test]
fn skipped_rules_let_the_chain_continue() {
    let config = json!({
        "fields": [
            { "name": "country", "type": "text", "validations": {} },
            {
                "name": "state",
                "type": "text",
                "validations": {
                    "required": { "value": true, "dependentKeys": "country" },
                    "regex": "[A-Z]{2}"
                }
            }
        ]
    });

    // 'country' is empty, so the required gate is disabled. The regex
    // still runs against the bound value.
    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("state", "xx")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].field_name, "state");
}

#[test]
fn dependent_value_enables_the_required_gate() {
    let config = json!({
        "fields": [
            { "name": "country", "type": "text", "validations": {} },
            {
                "name": "state",
                "type": "text",
                "validations": {
                    "required": { "value": true, "dependentKeys": "country" }
                }
            }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("country", "US")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].field_name, "state");
}

#[test]
fn table_expansion_registers_one_field_per_row() {
    let config = json!({
        "tables": [
            {
                "name": "visit",
                "range": { "start": 1, "end": 7, "step": 2 },
                "structure": [
                    {
                        "name": "dose_{{row}}",
                        "type": "text",
                        "validations": { "required": true }
                    }
                ]
            }
        ]
    });

    let engine = engine_for(config);
    let names: Vec<&str> = engine.registry().names().collect();
    assert_eq!(names, vec!["dose_1", "dose_3", "dose_5", "dose_7"]);
}

#[test]
fn row_token_expands_in_messages_and_text_properties() {
    let config = json!({
        "tables": [
            {
                "name": "visit",
                "range": { "end": 2 },
                "structure": [
                    {
                        "name": "dose_{{row}}",
                        "type": "text",
                        "validations": {
                            "required": {
                                "value": true,
                                "invalidMessage": "dose for visit {{row}} is missing"
                            }
                        }
                    }
                ]
            }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[("dose_1", "10mg")]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].message, "dose for visit 2 is missing");
}

#[test]
fn non_divisible_range_is_rejected_at_load() {
    let config = json!({
        "tables": [
            {
                "name": "visit",
                "range": { "start": 1, "end": 4, "step": 2 },
                "structure": []
            }
        ]
    });

    let result = ValidationEngine::from_config(&config, &CustomRuleRegistry::new());
    assert!(matches!(result, Err(FormError::Config(_))));
}

#[test]
fn table_collision_keeps_position_and_runs_table_rules_first() {
    let config = json!({
        "fields": [
            {
                "name": "dose_1",
                "type": "text",
                "validations": {
                    "regex": { "value": "[0-9]+", "invalidMessage": "direct" }
                }
            },
            { "name": "after", "type": "text", "validations": {} }
        ],
        "tables": [
            {
                "name": "visit",
                "range": { "end": 1 },
                "structure": [
                    {
                        "name": "dose_{{row}}",
                        "type": "button",
                        "validations": { "warnList": ["unknown"] }
                    }
                ]
            }
        ]
    });

    let mut engine = engine_for(config);

    // Position and type after the merge.
    let names: Vec<&str> = engine.registry().names().collect();
    assert_eq!(names, vec!["dose_1", "after"]);
    assert_eq!(
        engine.registry().field("dose_1").unwrap().field_type,
        FieldType::Button
    );

    // The table's warnList runs before the direct regex: a value that
    // trips both produces the warning and then the direct error.
    engine
        .bind(&MapDocument::with_text(&[("dose_1", "unknown")]))
        .unwrap();
    let report = engine.validate_all().unwrap();
    assert_eq!(report.warnings().len(), 1);
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].message, "direct");
}

#[test]
fn unknown_document_fields_never_reach_the_report() {
    let config = json!({
        "fields": [
            { "name": "email", "type": "text", "validations": { "required": true } }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[
            ("email", "a@b.example"),
            ("stray", "ignored"),
        ]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.reports().len(), 1);
    assert_eq!(report.reports()[0].field_name, "email");
    assert!(!report.has_warnings());
    assert!(!report.has_errors());
}

#[test]
fn registered_field_absent_from_the_document_still_validates() {
    let config = json!({
        "fields": [
            { "name": "consent", "type": "button", "validations": { "required": true } }
        ]
    });

    let mut engine = engine_for(config);
    engine.bind(&MapDocument::with_text(&[])).unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].field_name, "consent");
}

#[test]
fn preference_templates_override_the_defaults() {
    let config = json!({
        "preferences": {
            "validMessage": "{{fieldName}} ok",
            "invalidMessage": "{{fieldName}} bad: {{fieldValue}}"
        },
        "fields": [
            { "name": "email", "type": "text", "validations": { "format": "email" } },
            { "name": "zip", "type": "text", "validations": { "regex": "[0-9]{5}" } }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[
            ("email", "a@b.example"),
            ("zip", "nope"),
        ]))
        .unwrap();
    let report = engine.validate_all().unwrap();

    assert_eq!(report.reports()[0].message, "email ok");
    assert_eq!(report.errors()[0].message, "zip bad: nope");
}

#[test]
fn repeated_runs_render_identically() {
    let config = json!({
        "fields": [
            { "name": "a", "type": "text", "validations": { "required": true } },
            { "name": "b", "type": "text", "validations": { "required": "warning" } },
            { "name": "c", "type": "text", "validations": { "required": false } }
        ]
    });

    let render = || {
        let mut engine = engine_for(config.clone());
        engine
            .bind(&MapDocument::with_text(&[("a", "present")]))
            .unwrap();
        let report = engine.validate_all().unwrap();
        render_report(&report, false).unwrap()
    };

    let first = render();
    assert_eq!(first, render());
    assert_eq!(first, render());
}

#[test]
fn full_report_renders_every_populated_bucket() {
    let config = json!({
        "fields": [
            { "name": "name", "type": "text", "validations": { "required": true } },
            { "name": "status", "type": "text", "validations": { "warnList": ["unknown"] } },
            { "name": "email", "type": "text", "validations": { "required": true } }
        ]
    });

    let mut engine = engine_for(config);
    engine
        .bind(&MapDocument::with_text(&[
            ("name", "Ada"),
            ("status", "unknown"),
        ]))
        .unwrap();
    let report = engine.validate_all().unwrap();
    let rendered = render_report(&report, false).unwrap();

    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        value,
        json!({
            "reports": ["The field name is valid."],
            "warnings": ["The value 'unknown' for 'status' is invalid."],
            "errors": ["The value '' for 'email' is invalid."]
        })
    );
}

#[test]
fn duplicate_field_names_are_rejected_at_load() {
    let config = json!({
        "fields": [
            { "name": "email", "type": "text", "validations": {} },
            { "name": "email", "type": "text", "validations": {} }
        ]
    });

    let result = ValidationEngine::from_config(&config, &CustomRuleRegistry::new());
    match result {
        Err(FormError::Config(message)) => {
            assert!(message.contains("defined twice"), "{message}");
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn skipped_outcome_is_distinct_from_failed() {
    // Guards the engine's chain-control contract at the type level.
    assert_ne!(Outcome::Skipped, Outcome::Failed);
    assert_ne!(Outcome::Skipped, Outcome::Passed);
}
