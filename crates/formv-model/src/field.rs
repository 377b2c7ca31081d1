//! Form field definitions and bound document values.

use crate::error::{FormError, Result};

/// Classification of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Checkboxes and radio button groups.
    Button,
    /// Free-form text input.
    Text,
    /// Digital signature field.
    Signature,
}

impl FieldType {
    /// Parse a field type from its configuration spelling (case-insensitive).
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "button" => Ok(Self::Button),
            "text" => Ok(Self::Text),
            "signature" => Ok(Self::Signature),
            other => Err(FormError::Config(format!(
                "invalid field type '{other}'; valid values are button, text, signature"
            ))),
        }
    }
}

/// A value resolved from a concrete document by the document adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checkbox(bool),
    Radio(String),
    /// Signer name, or `None` when the field is unsigned.
    Signature(Option<String>),
}

impl FieldValue {
    /// Classification-specific stringification. Checkboxes stringify their
    /// checked state, signatures the signer name (empty when unsigned).
    pub fn as_string(&self) -> String {
        match self {
            Self::Text(value) | Self::Radio(value) => value.clone(),
            Self::Checkbox(checked) => checked.to_string(),
            Self::Signature(signer) => signer.clone().unwrap_or_default(),
        }
    }
}

/// A named, typed unit of document data subject to validation.
///
/// Fields are owned exclusively by the registry for the lifetime of one
/// validation run. `value` stays `None` for fields declared in the
/// configuration but absent from the physical document.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub field_type: FieldType,
    pub value: Option<FieldValue>,
}

impl FormField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            value: None,
        }
    }

    pub fn value_as_string(&self) -> String {
        self.value
            .as_ref()
            .map(FieldValue::as_string)
            .unwrap_or_default()
    }

    pub fn has_value(&self) -> bool {
        !self.value_as_string().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_parse_is_case_insensitive() {
        assert_eq!(FieldType::parse("TEXT").unwrap(), FieldType::Text);
        assert_eq!(FieldType::parse("Button").unwrap(), FieldType::Button);
        assert_eq!(FieldType::parse("signature").unwrap(), FieldType::Signature);
        assert!(FieldType::parse("combo").is_err());
    }

    #[test]
    fn checkbox_stringifies_checked_state() {
        let mut field = FormField::new("accept", FieldType::Button);
        field.value = Some(FieldValue::Checkbox(false));
        // An unchecked checkbox still stringifies, so it counts as a value.
        assert_eq!(field.value_as_string(), "false");
        assert!(field.has_value());
    }

    #[test]
    fn unsigned_signature_has_no_value() {
        let mut field = FormField::new("sig", FieldType::Signature);
        field.value = Some(FieldValue::Signature(None));
        assert_eq!(field.value_as_string(), "");
        assert!(!field.has_value());

        field.value = Some(FieldValue::Signature(Some("J. Doe".to_string())));
        assert!(field.has_value());
    }

    #[test]
    fn unbound_field_has_no_value() {
        let field = FormField::new("missing", FieldType::Text);
        assert!(!field.has_value());
        assert_eq!(field.value_as_string(), "");
    }
}
