//! Heterogeneous rule properties.
//!
//! Rule configurations carry an open-ended bag of extra properties
//! (`caseSensitive`, `minimum`, `dependentKeys`, ...). The bag is modeled
//! as an explicit tagged union so each rule matches exhaustively on the
//! shapes it supports; unsupported JSON shapes are rejected when the
//! configuration is loaded.

use std::collections::BTreeMap;

/// A scalar-or-list property value attached to a validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Ordered property map, keyed by the configuration property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;
