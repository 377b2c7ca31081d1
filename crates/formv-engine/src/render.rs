//! Report serialization.

use formv_model::{FormError, Report, Result};

/// Render a committed report as JSON.
///
/// Buckets with no entries are omitted; a report with nothing to say
/// renders as the empty string rather than `{}`.
pub fn render_report(report: &Report, pretty: bool) -> Result<String> {
    if report.is_empty() {
        return Ok(String::new());
    }
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    rendered.map_err(|error| FormError::Render(error.to_string()))
}
