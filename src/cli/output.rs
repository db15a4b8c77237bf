//! Output formatting module for nxconverge
//!
//! Provides colored human output and structured (JSON/YAML) output.

use super::OutputFormat;
use colored::Colorize;
use nxconverge::catalog::{ApplySummary, ResourceOutcome};
use nxconverge::reconcile::Action;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Per-resource status shown on a result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Already converged
    Ok,
    /// Created, updated or destroyed (or would be, in check mode)
    Changed,
    /// The pass ended with an error
    Failed,
}

impl ResourceStatus {
    /// Get the colored string representation
    pub fn colored_string(&self) -> String {
        match self {
            ResourceStatus::Ok => "ok".green().to_string(),
            ResourceStatus::Changed => "changed".yellow().to_string(),
            ResourceStatus::Failed => "failed".red().bold().to_string(),
        }
    }

    /// Get the plain string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Ok => "ok",
            ResourceStatus::Changed => "changed",
            ResourceStatus::Failed => "failed",
        }
    }

    pub fn of(outcome: &ResourceOutcome) -> Self {
        if outcome.is_failed() {
            ResourceStatus::Failed
        } else if outcome.is_changed() {
            ResourceStatus::Changed
        } else {
            ResourceStatus::Ok
        }
    }
}

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Human, JSON or YAML
    format: OutputFormat,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, format: OutputFormat, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            format,
            verbosity,
        }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn is_structured(&self) -> bool {
        self.format != OutputFormat::Human
    }

    /// Print a banner/header
    pub fn banner(&self, title: &str) {
        if self.is_structured() {
            return;
        }

        let header = format!("{} ", title);
        let stars = "*".repeat(80_usize.saturating_sub(header.len()));
        if self.use_color {
            println!("\n{}{}", header.bright_white().bold(), stars.bright_black());
        } else {
            println!("\n{}{}", header, stars);
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        if self.is_structured() {
            return;
        }

        if self.use_color {
            println!("\n{}", title.cyan().bold());
            println!("{}", "-".repeat(title.len()).cyan());
        } else {
            println!("\n{}", title);
            println!("{}", "-".repeat(title.len()));
        }
    }

    /// Print one resource outcome
    pub fn resource_result(&self, outcome: &ResourceOutcome) {
        if self.is_structured() {
            return;
        }

        let status = ResourceStatus::of(outcome);
        let status_str = if self.use_color {
            status.colored_string()
        } else {
            status.as_str().to_string()
        };
        let resource = if self.use_color {
            outcome.resource().bright_white().bold().to_string()
        } else {
            outcome.resource().to_string()
        };

        print!("{}: [{}]", status_str, resource);
        match outcome {
            ResourceOutcome::Ok(report) if report.action != Action::Unchanged => {
                print!(" => {}", report.action);
                if report.check_mode {
                    print!(" (check mode)");
                }
            }
            ResourceOutcome::Failed { message, .. } => print!(" => {}", message),
            ResourceOutcome::Ok(_) => {}
        }
        println!();

        if self.verbosity >= 1 {
            if let ResourceOutcome::Ok(report) = outcome {
                for call in &report.setters {
                    let args: Vec<String> = call
                        .values
                        .iter()
                        .map(|(_, v)| nxconverge::value::display_slot(v.as_ref()))
                        .collect();
                    let line = format!("    {}({})", call.setter, args.join(", "));
                    if self.use_color {
                        println!("{}", line.bright_black());
                    } else {
                        println!("{}", line);
                    }
                }
            }
        }
    }

    /// Print a recap summary
    pub fn recap(&self, summary: &ApplySummary) {
        if self.is_structured() {
            self.emit(summary);
            return;
        }

        let header = "RECAP ";
        let stars = "*".repeat(80 - header.len());
        if self.use_color {
            println!("\n{}{}", header.bright_white().bold(), stars.bright_black());
        } else {
            println!("\n{}{}", header, stars);
        }

        if self.use_color {
            let fmt_stat = |label: &str, value: usize, color: colored::Color| -> String {
                if value > 0 {
                    format!("{}={:<4}", label.color(color), value)
                } else {
                    format!("{}={:<4}", label, value).dimmed().to_string()
                }
            };
            println!(
                "{} {} {}",
                fmt_stat("ok", summary.ok, colored::Color::Green),
                fmt_stat("changed", summary.changed, colored::Color::Yellow),
                fmt_stat("failed", summary.failed, colored::Color::Red)
            );
        } else {
            println!(
                "ok={:<4} changed={:<4} failed={:<4}",
                summary.ok, summary.changed, summary.failed
            );
        }

        let duration = summary.duration().to_std().unwrap_or_default();
        let duration_str = format_duration(duration);
        let verb = if summary.check_mode { "Check" } else { "Apply" };

        if self.use_color {
            println!(
                "\n{} {}",
                format!("{} run took", verb).bright_black(),
                duration_str.bright_white()
            );
            if summary.has_failures() {
                println!("{}", format!("{} run failed.", verb).red().bold());
            } else {
                println!("{}", format!("{} completed successfully.", verb).green().bold());
            }
        } else {
            println!("\n{} run took {}", verb, duration_str);
            if summary.has_failures() {
                println!("{} run failed.", verb);
            } else {
                println!("{} completed successfully.", verb);
            }
        }
    }

    /// Serialize a value to stdout in the selected structured format.
    pub fn emit<T: Serialize>(&self, value: &T) {
        let rendered = match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
            _ => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        };
        match rendered {
            Ok(text) => println!("{}", text.trim_end()),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }

    fn message(&self, kind: &str, message: &str) -> Option<String> {
        if !self.is_structured() {
            return None;
        }
        let value = serde_json::json!({
            "type": kind,
            "message": message
        });
        Some(value.to_string())
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if let Some(line) = self.message("error", message) {
            eprintln!("{}", line);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if let Some(line) = self.message("warning", message) {
            eprintln!("{}", line);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }

    /// Print a hint message
    pub fn hint(&self, message: &str) {
        if let Some(line) = self.message("hint", message) {
            eprintln!("{}", line);
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "HINT:".cyan().bold(), message);
        } else {
            eprintln!("HINT: {}", message);
        }
    }

    /// Print an info message (respects verbosity)
    pub fn info(&self, message: &str) {
        if self.verbosity < 1 || self.is_structured() {
            return;
        }

        if self.use_color {
            println!("{} {}", "INFO:".blue(), message);
        } else {
            println!("INFO: {}", message);
        }
    }

    /// Print a debug message (requires higher verbosity)
    pub fn debug(&self, message: &str) {
        if self.verbosity < 2 || self.is_structured() {
            return;
        }

        if self.use_color {
            println!("{} {}", "DEBUG:".magenta(), message);
        } else {
            println!("DEBUG: {}", message);
        }
    }

    /// Print a list of items
    pub fn list(&self, title: &str, items: &[String]) {
        if self.use_color {
            println!("\n{}:", title.bright_white().bold());
        } else {
            println!("\n{}:", title);
        }

        for item in items {
            if self.use_color {
                println!("  {} {}", "-".bright_black(), item);
            } else {
                println!("  - {}", item);
            }
        }
    }

    /// Print a table
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let header_line = join_cells(headers.iter().map(|h| h.to_string()), &widths);
        if self.use_color {
            println!("{}", header_line.bright_white().bold());
        } else {
            println!("{}", header_line);
        }

        let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        if self.use_color {
            println!("{}", sep.join("-+-").bright_black());
        } else {
            println!("{}", sep.join("-+-"));
        }

        for row in rows {
            println!("{}", join_cells(row.iter().cloned(), &widths));
        }
    }

    /// Flush stdout
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

fn join_cells(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Format a duration as a human-readable string
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
