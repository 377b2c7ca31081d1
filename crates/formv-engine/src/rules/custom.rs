//! Registration table for caller-supplied rules.
//!
//! The `custom` rule key resolves its identifier against this table;
//! callers register an identifier and a constructor closure before the
//! configuration is loaded. An identifier with no registration is a
//! configuration error, so a bad config fails fast instead of at
//! validation time.

use std::collections::HashMap;
use std::fmt;

use formv_model::{FormError, Result};

use super::Rule;

type Constructor =
    Box<dyn Fn(Option<String>, Option<String>) -> Box<dyn Rule> + Send + Sync>;

/// Maps custom-rule identifiers to rule constructors.
///
/// The constructor receives the optional `validMessage` and
/// `invalidMessage` overrides from the rule configuration; extra
/// properties are attached to the built rule by the factory afterwards.
#[derive(Default)]
pub struct CustomRuleRegistry {
    constructors: HashMap<String, Constructor>,
}

impl CustomRuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn(Option<String>, Option<String>) -> Box<dyn Rule> + Send + Sync + 'static,
    {
        self.constructors
            .insert(identifier.into(), Box::new(constructor));
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.constructors.contains_key(identifier)
    }

    pub fn build(
        &self,
        identifier: &str,
        valid_message: Option<String>,
        invalid_message: Option<String>,
    ) -> Result<Box<dyn Rule>> {
        let constructor = self.constructors.get(identifier).ok_or_else(|| {
            FormError::Config(format!(
                "no custom rule is registered for the identifier '{identifier}'"
            ))
        })?;
        Ok(constructor(valid_message, invalid_message))
    }
}

impl fmt::Debug for CustomRuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRuleRegistry")
            .field("identifiers", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
