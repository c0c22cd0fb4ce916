//! Output formatting for the CLI.

use colored::*;
use erdoslab_policy::CheckReport;
use erdoslab_scout::CandidatesFile;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use crate::config::OutputFormat;
use crate::error::Result;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a policy check report.
    pub fn format_report(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(self.format_report_quiet(report)),
        }
    }

    fn format_report_json(&self, report: &CheckReport) -> Result<String> {
        let violations: Vec<serde_json::Value> = report
            .violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "file": v.file().map(|f| f.display().to_string()),
                    "message": v.to_string(),
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "problems_checked": report.problems_checked,
            "passed": report.passed(),
            "violations": violations,
        }))?)
    }

    fn format_report_table(&self, report: &CheckReport) -> String {
        let mut out = String::new();
        if !report.violations.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["File", "Violation"]);
            for violation in &report.violations {
                let file = violation
                    .file()
                    .map(|f| f.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                builder.push_record([file, violation.to_string()]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
            out.push('\n');
        }
        out.push_str(&report.summary());
        out.push('\n');
        out.push_str(&if report.passed() {
            self.colorize("Policy check passed.", "green")
        } else {
            self.colorize("Policy check FAILED.", "red")
        });
        out
    }

    fn format_report_quiet(&self, report: &CheckReport) -> String {
        report
            .violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format ingested literature candidates.
    pub fn format_candidates(&self, file: &CandidatesFile) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&file.candidates)?),
            OutputFormat::Quiet => Ok(file
                .candidates
                .iter()
                .map(|c| format!("{}:{}", c.id_type.as_str(), c.id))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if file.candidates.is_empty() {
                    return Ok(self.colorize("No candidates ingested.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Id", "Year", "Confidence", "Title"]);
                for cand in &file.candidates {
                    builder.push_record([
                        format!("{}:{}", cand.id_type.as_str(), cand.id),
                        cand.year.clone().unwrap_or_else(|| "n.d.".to_string()),
                        format!("{:.2}", cand.confidence),
                        cand.title.clone(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Apply color when enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
