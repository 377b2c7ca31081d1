//! Per-document validation driver.

use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, info_span};

use formv_cli::document::JsonDocument;
use formv_engine::{CustomRuleRegistry, ValidationEngine, render_report};
use formv_model::ReportLevel;

use crate::cli::Cli;

/// Validate every document against the configuration and return the
/// process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    let config_text = fs::read_to_string(&cli.config)
        .with_context(|| format!("read configuration {}", cli.config.display()))?;
    let config: Value = serde_json::from_str(&config_text)
        .with_context(|| format!("parse configuration {}", cli.config.display()))?;

    // The reflection-free seam for project-specific rules. Nothing is
    // registered in the stock binary.
    let custom_rules = CustomRuleRegistry::new();

    let mut exit_code = 0;
    for path in &cli.documents {
        let span = info_span!("document", path = %path.display());
        let _guard = span.enter();

        let document =
            JsonDocument::load(path).with_context(|| format!("load document {}", path.display()))?;

        // A fresh engine per document: bound values never leak between runs.
        let mut engine = ValidationEngine::from_config(&config, &custom_rules)
            .context("load validation configuration")?;
        engine.bind(&document)?;
        let report = engine.validate_all()?;

        info!(
            reports = report.reports().len(),
            warnings = report.warnings().len(),
            errors = report.errors().len(),
            "validation finished"
        );

        let preferences = engine.preferences();
        if preferences.report_level == ReportLevel::ExitCode && report.has_errors() {
            exit_code = 1;
        }
        if preferences.silent {
            continue;
        }
        let rendered = match preferences.report_level {
            ReportLevel::None | ReportLevel::ExitCode => continue,
            ReportLevel::Compact => render_report(&report, false)?,
            ReportLevel::Detailed | ReportLevel::All => render_report(&report, true)?,
        };
        if !rendered.is_empty() {
            println!("{rendered}");
        }
    }

    Ok(exit_code)
}
