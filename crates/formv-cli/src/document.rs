//! JSON document adapter.
//!
//! A document is a JSON object mapping field name to value. Bare scalars
//! are classified by shape: a string binds as text, a boolean as a
//! checkbox state, `null` as an unsigned signature. The object form
//! `{"type": ..., "value": ...}` names the classification explicitly and
//! is required for radio groups and signed signatures.

use std::fs;
use std::path::Path;

use serde_json::Value;

use formv_engine::{DocumentField, DocumentSource};
use formv_model::{FieldValue, FormError, Result};

/// One parsed document, ready to bind.
#[derive(Debug)]
pub struct JsonDocument {
    fields: Vec<DocumentField>,
}

impl JsonDocument {
    /// Read and parse a document file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&text).map_err(|error| {
            FormError::Document(format!("{}: {error}", path.display()))
        })?;
        Self::from_value(&root)
    }

    /// Parse an already-loaded JSON tree.
    pub fn from_value(root: &Value) -> Result<Self> {
        let object = root.as_object().ok_or_else(|| {
            FormError::Document("a document must be a JSON object of field values".to_string())
        })?;

        let mut fields = Vec::with_capacity(object.len());
        for (name, node) in object {
            fields.push(DocumentField {
                name: name.clone(),
                value: parse_value(name, node)?,
            });
        }
        Ok(Self { fields })
    }
}

impl DocumentSource for JsonDocument {
    fn read_fields(&self) -> Result<Vec<DocumentField>> {
        Ok(self.fields.clone())
    }
}

fn parse_value(name: &str, node: &Value) -> Result<FieldValue> {
    match node {
        Value::String(text) => Ok(FieldValue::Text(text.clone())),
        Value::Bool(checked) => Ok(FieldValue::Checkbox(*checked)),
        Value::Null => Ok(FieldValue::Signature(None)),
        Value::Object(_) => parse_typed(name, node),
        _ => Err(FormError::Document(format!(
            "the field '{name}' has an unsupported value shape; expected a \
             string, boolean, null or a typed object"
        ))),
    }
}

fn parse_typed(name: &str, node: &Value) -> Result<FieldValue> {
    let kind = node.get("type").and_then(Value::as_str).ok_or_else(|| {
        FormError::Document(format!(
            "the typed value of the field '{name}' must have the 'type' property defined"
        ))
    })?;
    let value = node.get("value").unwrap_or(&Value::Null);

    match kind.to_ascii_lowercase().as_str() {
        "text" => typed_string(name, kind, value).map(FieldValue::Text),
        "radio" => typed_string(name, kind, value).map(FieldValue::Radio),
        "checkbox" => value.as_bool().map(FieldValue::Checkbox).ok_or_else(|| {
            FormError::Document(format!(
                "the checkbox value of the field '{name}' must be a boolean"
            ))
        }),
        "signature" => match value {
            Value::Null => Ok(FieldValue::Signature(None)),
            Value::String(signer) => Ok(FieldValue::Signature(Some(signer.clone()))),
            _ => Err(FormError::Document(format!(
                "the signature value of the field '{name}' must be a string or null"
            ))),
        },
        other => Err(FormError::Document(format!(
            "the field '{name}' has an unknown value type '{other}'"
        ))),
    }
}

fn typed_string(name: &str, kind: &str, value: &Value) -> Result<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        FormError::Document(format!(
            "the {kind} value of the field '{name}' must be a string"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields_of(document: &JsonDocument) -> Vec<DocumentField> {
        document.read_fields().unwrap()
    }

    #[test]
    fn bare_scalars_classify_by_shape() {
        let document = JsonDocument::from_value(&json!({
            "name": "Ada",
            "subscribe": false,
            "sig": null
        }))
        .unwrap();

        let fields = fields_of(&document);
        assert_eq!(fields[0].value, FieldValue::Text("Ada".to_string()));
        assert_eq!(fields[1].value, FieldValue::Checkbox(false));
        assert_eq!(fields[2].value, FieldValue::Signature(None));
    }

    #[test]
    fn typed_objects_select_the_classification() {
        let document = JsonDocument::from_value(&json!({
            "plan": { "type": "radio", "value": "annual" },
            "sig": { "type": "signature", "value": "J. Doe" }
        }))
        .unwrap();

        let fields = fields_of(&document);
        assert_eq!(fields[0].value, FieldValue::Radio("annual".to_string()));
        assert_eq!(
            fields[1].value,
            FieldValue::Signature(Some("J. Doe".to_string()))
        );
    }

    #[test]
    fn non_object_document_is_rejected() {
        let result = JsonDocument::from_value(&json!(["not", "a", "document"]));
        assert!(matches!(result, Err(FormError::Document(_))));
    }

    #[test]
    fn numeric_bare_value_is_rejected() {
        let result = JsonDocument::from_value(&json!({ "count": 3 }));
        assert!(matches!(result, Err(FormError::Document(_))));
    }

    #[test]
    fn unknown_typed_kind_is_rejected() {
        let result = JsonDocument::from_value(&json!({
            "x": { "type": "dropdown", "value": "a" }
        }));
        assert!(matches!(result, Err(FormError::Document(_))));
    }
}
