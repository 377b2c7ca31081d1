//! Rule engine for declarative form validation.
//!
//! The engine consumes a JSON-described rule set (direct field
//! declarations plus templated table expansions), binds the values a
//! document adapter resolved from a concrete file, runs each field's
//! rule chain with short-circuit semantics and commits the outcomes into
//! a categorized report.

pub mod config;
pub mod document;
pub mod engine;
pub mod registry;
pub mod render;
pub mod rules;
pub mod tables;
pub mod variables;

pub use config::parse_preferences;
pub use document::{DocumentField, DocumentSource};
pub use engine::ValidationEngine;
pub use registry::FieldRegistry;
pub use render::render_report;
pub use rules::{
    CustomRuleRegistry, FieldMap, FormatKind, FormatRule, ListKind, ListRule, Outcome,
    RegexRule, RequiredLevel, RequiredRule, Rule, RuleCommon, build_rule,
};
pub use tables::{ExpandedField, FieldTable, TableEntryTemplate, TableRange};
pub use variables::{VariableResolver, default_resolver, substitute};
