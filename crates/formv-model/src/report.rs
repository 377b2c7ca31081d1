//! Validation report with the all-or-nothing commit protocol.
//!
//! Messages produced while one field's rule chain runs are buffered in
//! transient buckets. `commit` promotes them into the permanent buckets:
//! warnings and errors always survive, valid-outcome messages only when
//! the field produced neither a warning nor an error. A field that passes
//! an early rule and fails a later one therefore keeps only the failure.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One rendered message attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub field_name: String,
    pub message: String,
}

impl ReportEntry {
    pub fn new(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
        }
    }
}

/// Categorized validation outcome for one document.
#[derive(Debug, Default)]
pub struct Report {
    reports: Vec<ReportEntry>,
    warnings: Vec<ReportEntry>,
    errors: Vec<ReportEntry>,

    pending_reports: Vec<ReportEntry>,
    pending_warnings: Vec<ReportEntry>,
    pending_errors: Vec<ReportEntry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a valid-outcome message for the field currently under validation.
    pub fn add_report(&mut self, field_name: &str, message: impl Into<String>) {
        self.pending_reports.push(ReportEntry::new(field_name, message));
    }

    pub fn add_warning(&mut self, field_name: &str, message: impl Into<String>) {
        self.pending_warnings.push(ReportEntry::new(field_name, message));
    }

    pub fn add_error(&mut self, field_name: &str, message: impl Into<String>) {
        self.pending_errors.push(ReportEntry::new(field_name, message));
    }

    /// Promote the transient buckets into the permanent record and clear them.
    ///
    /// Valid-outcome messages are discarded when the same field also produced
    /// a warning or an error.
    pub fn commit(&mut self) {
        if self.pending_errors.is_empty() && self.pending_warnings.is_empty() {
            self.reports.append(&mut self.pending_reports);
        }
        self.warnings.append(&mut self.pending_warnings);
        self.errors.append(&mut self.pending_errors);

        self.pending_reports.clear();
        self.pending_warnings.clear();
        self.pending_errors.clear();
    }

    pub fn reports(&self) -> &[ReportEntry] {
        &self.reports
    }

    pub fn warnings(&self) -> &[ReportEntry] {
        &self.warnings
    }

    pub fn errors(&self) -> &[ReportEntry] {
        &self.errors
    }

    pub fn has_reports(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when no committed entry exists in any bucket.
    pub fn is_empty(&self) -> bool {
        !(self.has_reports() || self.has_warnings() || self.has_errors())
    }
}

fn messages(entries: &[ReportEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.message.as_str()).collect()
}

impl Serialize for Report {
    /// Serializes committed buckets only; empty buckets are omitted.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if self.has_reports() {
            map.serialize_entry("reports", &messages(&self.reports))?;
        }
        if self.has_warnings() {
            map.serialize_entry("warnings", &messages(&self.warnings))?;
        }
        if self.has_errors() {
            map.serialize_entry("errors", &messages(&self.errors))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_field_promotes_valid_messages() {
        let mut report = Report::new();
        report.add_report("email", "The field email is valid.");
        report.commit();

        assert_eq!(report.reports().len(), 1);
        assert!(!report.has_warnings());
        assert!(!report.has_errors());
    }

    #[test]
    fn error_discards_buffered_valid_messages() {
        let mut report = Report::new();
        report.add_report("email", "The field email is valid.");
        report.add_error("email", "The value '' for 'email' is invalid.");
        report.commit();

        assert!(!report.has_reports());
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn warning_discards_valid_messages_but_keeps_the_warning() {
        let mut report = Report::new();
        report.add_report("phone", "ok");
        report.add_warning("phone", "suspicious");
        report.commit();

        assert!(!report.has_reports());
        assert_eq!(report.warnings().len(), 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn commit_clears_transient_buckets_between_fields() {
        let mut report = Report::new();
        report.add_error("a", "bad");
        report.commit();
        report.add_report("b", "good");
        report.commit();

        // The error on 'a' must not suppress the valid message on 'b'.
        assert_eq!(report.reports().len(), 1);
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn serializes_only_populated_buckets() {
        let mut report = Report::new();
        report.add_error("email", "bad email");
        report.commit();

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"errors":["bad email"]}"#);
    }

    #[test]
    fn empty_report_serializes_to_empty_object() {
        let report = Report::new();
        assert!(report.is_empty());
        assert_eq!(serde_json::to_string(&report).unwrap(), "{}");
    }
}
