//! Field registry: name → (type, ordered rule chain).
//!
//! Direct field declarations load first; table expansions load second.
//! The registry exclusively owns the field definitions and their rule
//! chains for the lifetime of one validation run, and it preserves
//! insertion order so report output is reproducible.

use serde_json::Value;

use formv_model::{FieldType, FieldValue, FormError, FormField, Result};

use crate::config::{parse_tables, validation_entries};
use crate::rules::{CustomRuleRegistry, FieldMap, Rule, build_rule};
use crate::tables::ExpandedField;

#[derive(Debug, Default)]
pub struct FieldRegistry {
    /// Field names in registration order.
    order: Vec<String>,
    fields: FieldMap,
    chains: std::collections::HashMap<String, Vec<Box<dyn Rule>>>,
}

impl FieldRegistry {
    /// Build the registry from the configuration tree: direct `fields`
    /// first, then `tables` expansions merged on top.
    pub fn from_config(root: &Value, custom_rules: &CustomRuleRegistry) -> Result<Self> {
        let mut registry = Self::default();
        registry.load_fields(root.get("fields"), custom_rules)?;
        registry.load_tables(root, custom_rules)?;
        Ok(registry)
    }

    fn load_fields(
        &mut self,
        node: Option<&Value>,
        custom_rules: &CustomRuleRegistry,
    ) -> Result<()> {
        let Some(node) = node.filter(|node| !node.is_null()) else {
            return Ok(());
        };
        let array = node.as_array().ok_or_else(|| {
            FormError::Config(
                "the 'fields' property in the configuration must be an array".to_string(),
            )
        })?;

        for field_node in array {
            let name = field_node.get("name").and_then(Value::as_str).ok_or_else(
                || {
                    FormError::Config(
                        "a field object must have the 'name' property defined".to_string(),
                    )
                },
            )?;
            if self.fields.contains_key(name) {
                return Err(FormError::Config(format!(
                    "the field '{name}' is defined twice"
                )));
            }

            let field_type =
                FieldType::parse(field_node.get("type").and_then(Value::as_str).ok_or_else(
                    || {
                        FormError::Config(format!(
                            "the field '{name}' must have the 'type' property defined"
                        ))
                    },
                )?)?;

            let mut chain = Vec::new();
            for (key, value) in validation_entries(field_node.get("validations"))? {
                chain.push(build_rule(&key, &value, custom_rules)?);
            }

            self.insert_new(FormField::new(name, field_type), chain);
        }
        Ok(())
    }

    fn load_tables(&mut self, root: &Value, custom_rules: &CustomRuleRegistry) -> Result<()> {
        for table in parse_tables(root)? {
            for expanded in table.expand(custom_rules)? {
                self.merge_expanded(expanded);
            }
        }
        Ok(())
    }

    /// Merge one table-expanded field into the registry.
    ///
    /// On a name collision the table's rules run first and the previously
    /// registered rules are appended after them; the field type is
    /// overwritten by the table entry's type. The field keeps its original
    /// position in the iteration order.
    fn merge_expanded(&mut self, expanded: ExpandedField) {
        let name = expanded.field.name.clone();
        if let Some(existing) = self.fields.get_mut(&name) {
            existing.field_type = expanded.field.field_type;
            let mut chain = expanded.rules;
            if let Some(previous) = self.chains.remove(&name) {
                chain.extend(previous);
            }
            self.chains.insert(name, chain);
        } else {
            self.insert_new(expanded.field, expanded.rules);
        }
    }

    fn insert_new(&mut self, field: FormField, chain: Vec<Box<dyn Rule>>) {
        self.order.push(field.name.clone());
        self.chains.insert(field.name.clone(), chain);
        self.fields.insert(field.name.clone(), field);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Attach a document value to a registered field. Returns false when
    /// the name is not registered.
    pub fn bind_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.get_mut(name) {
            Some(field) => {
                field.value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    pub fn chain(&self, name: &str) -> &[Box<dyn Rule>] {
        self.chains.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
