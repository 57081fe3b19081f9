//! Validation report rendering.
//!
//! Text reports use a fixed 70-column boxed layout; JSON reports carry the
//! same data plus the structured finding.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::rules::{Finding, FindingKind};
use crate::validator::FileOutcome;

const INNER_WIDTH: usize = 68;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown report format '{}' (expected text or json)", other),
        }
    }
}

/// A report over one validated file.
pub struct ValidationReport<'a> {
    pub config_path: &'a Path,
    pub timestamp: &'a str,
    pub schema_errors: &'a [Finding],
    pub custom_errors: &'a [Finding],
    pub is_valid: bool,
}

impl<'a> ValidationReport<'a> {
    pub fn new(result: &'a FileOutcome) -> Self {
        Self {
            config_path: &result.config_path,
            timestamp: &result.timestamp,
            schema_errors: &result.outcome.schema_errors,
            custom_errors: &result.outcome.custom_errors,
            is_valid: result.outcome.is_valid(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.generate()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Render the boxed text report.
    pub fn generate(&self) -> String {
        let blank = format!("║{}║", " ".repeat(INNER_WIDTH));
        let mut lines = vec![
            String::new(),
            format!("╔{}╗", "═".repeat(INNER_WIDTH)),
            blank.clone(),
            format!(
                "║{:^width$}║",
                "  API TEST CONFIGURATION VALIDATION REPORT",
                width = INNER_WIDTH
            ),
            blank,
            format!("╚{}╝", "═".repeat(INNER_WIDTH)),
            String::new(),
            format!("Configuration File: {}", self.config_path.display()),
            format!("Validation Time:    {}", self.timestamp),
            String::new(),
        ];

        if self.is_valid {
            lines.extend(status_box(
                "✓ VALIDATION PASSED",
                "Your configuration is valid and ready to use!",
            ));
        } else {
            let total = self.schema_errors.len() + self.custom_errors.len();
            lines.extend(status_box(
                "✗ VALIDATION FAILED",
                &format!("Found {} error(s) that need to be fixed", total),
            ));
            lines.push(String::new());

            push_section(&mut lines, "Schema Validation Errors:", self.schema_errors);
            push_section(&mut lines, "Business Logic Errors:", self.custom_errors);
        }

        lines.push(String::new());
        lines.join("\n")
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let report = JsonReport {
            config_file: self.config_path.display().to_string(),
            timestamp: self.timestamp,
            valid: self.is_valid,
            error_count: self.schema_errors.len() + self.custom_errors.len(),
            schema_errors: self.schema_errors.iter().map(JsonFinding::from).collect(),
            business_errors: self.custom_errors.iter().map(JsonFinding::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

fn status_box(title: &str, detail: &str) -> Vec<String> {
    vec![
        format!("┌{}┐", "─".repeat(INNER_WIDTH)),
        format!("│  {:<width$}│", title, width = INNER_WIDTH - 2),
        format!("│{}│", " ".repeat(INNER_WIDTH)),
        format!("│  {:<width$}│", detail, width = INNER_WIDTH - 2),
        format!("└{}┘", "─".repeat(INNER_WIDTH)),
    ]
}

fn push_section(lines: &mut Vec<String>, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    lines.push(heading.to_string());
    lines.push("─".repeat(INNER_WIDTH + 2));
    for (i, finding) in findings.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, finding));
    }
    lines.push(String::new());
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config_file: String,
    timestamp: &'a str,
    valid: bool,
    error_count: usize,
    schema_errors: Vec<JsonFinding<'a>>,
    business_errors: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    kind: FindingKind,
    message: String,
    detail: &'a Finding,
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    fn from(finding: &'a Finding) -> Self {
        Self {
            kind: finding.kind(),
            message: finding.to_string(),
            detail: finding,
        }
    }
}
