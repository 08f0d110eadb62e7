use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::EvaluationResult;
use crate::summary::CheckSummary;

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// Canonical check report written for CI and PR reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckReportArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub summary: CheckSummary,
    pub results: Vec<EvaluationResult>,
}

impl CheckReportArtifact {
    pub fn new(results: Vec<EvaluationResult>, generated_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at,
            summary: CheckSummary::from_results(&results),
            results,
        }
    }
}

/// Write the report in pretty JSON format.
pub fn write_report_json(path: &Path, artifact: &CheckReportArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize check report")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render markdown summary for PR/comment/check output.
pub fn render_report_md(artifact: &CheckReportArtifact) -> String {
    let s = &artifact.summary;
    let mut out = String::new();
    out.push_str("# EOL Check Report\n\n");
    out.push_str(&format!(
        "- total: {}\n- ok: {}\n- warn: {}\n- err: {}\n\n",
        s.total, s.ok, s.warn, s.err
    ));

    if artifact.results.is_empty() {
        out.push_str("No components checked.\n");
        return out;
    }

    out.push_str("| Status | Component | Version | Message |\n");
    out.push_str("|---|---|---|---|\n");
    for r in &artifact.results {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            r.status,
            escape_cell(&r.component),
            escape_cell(&r.version),
            escape_cell(&r.message)
        ));
    }
    out
}

/// Write the markdown summary.
pub fn write_report_md(path: &Path, artifact: &CheckReportArtifact) -> Result<()> {
    let md = render_report_md(artifact);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
