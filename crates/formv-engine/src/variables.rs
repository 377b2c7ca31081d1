//! Message template variable substitution.
//!
//! Templates contain placeholders written as double curly braces around
//! ASCII letters, e.g. `{{fieldName}}`. Substitution is literal token
//! replacement and never rescans substituted content. Templates are
//! rendered at commit time, so a malformed template that is never
//! exercised never fails.

use std::sync::LazyLock;

use regex::Regex;

use formv_model::{FormError, FormField, Result};

static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z]+)\}\}").expect("variable pattern"));

/// Maps a placeholder name to its value for one field, or `None` when the
/// placeholder is unknown to this resolver.
pub type VariableResolver = fn(field: &FormField, name: &str) -> Option<String>;

/// The resolver used by the built-in rules: `fieldName` and `fieldValue`.
pub fn default_resolver(field: &FormField, name: &str) -> Option<String> {
    match name {
        "fieldName" => Some(field.name.clone()),
        "fieldValue" => Some(field.value_as_string()),
        _ => None,
    }
}

/// Replace every placeholder in `template` using `resolver`.
///
/// An unrecognized placeholder is a render error.
pub fn substitute(field: &FormField, template: &str, resolver: VariableResolver) -> Result<String> {
    let mut message = template.to_string();
    for captures in VARIABLE_PATTERN.captures_iter(template) {
        let token = &captures[0];
        let name = &captures[1];
        let Some(value) = resolver(field, name) else {
            return Err(FormError::Render(format!(
                "the variable '{name}' is undefined"
            )));
        };
        message = message.replace(token, &value);
    }
    Ok(message)
}
