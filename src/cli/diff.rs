//! Colorized property diffs
//!
//! Renders the before and after state of a changed resource as `name: value`
//! lines and diffs them with the similar crate.

use colored::Colorize;
use nxconverge::reconcile::{Action, ReconcileReport};
use nxconverge::value::display_slot;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Colorized diff generator
pub struct ColorizedDiff {
    use_color: bool,
    context_lines: usize,
}

impl ColorizedDiff {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            context_lines: 3,
        }
    }

    /// Render the before and after text of a report.
    pub fn states(report: &ReconcileReport) -> (String, String) {
        let mut before = String::new();
        let mut after = String::new();
        for change in &report.changes {
            let _ = writeln!(
                before,
                "{}: {}",
                change.property,
                display_slot(change.current.as_ref())
            );
            if report.action != Action::Destroyed {
                let _ = writeln!(
                    after,
                    "{}: {}",
                    change.property,
                    display_slot(change.desired.as_ref())
                );
            }
        }
        (before, after)
    }

    /// Unified diff of a report's property changes.
    pub fn report(&self, report: &ReconcileReport) -> String {
        let (before, after) = Self::states(report);
        let old_name = match report.action {
            Action::Created => "absent".to_string(),
            _ => format!("{} (device)", report.resource),
        };
        let new_name = match report.action {
            Action::Destroyed => "absent".to_string(),
            _ => format!("{} (manifest)", report.resource),
        };
        self.diff(&before, &after, &old_name, &new_name)
    }

    /// Generate a colorized unified diff between two strings
    pub fn diff(&self, old: &str, new: &str, old_name: &str, new_name: &str) -> String {
        let diff = TextDiff::from_lines(old, new);
        let mut output = String::new();

        if self.use_color {
            let _ = writeln!(output, "{}", format!("--- {}", old_name).red());
            let _ = writeln!(output, "{}", format!("+++ {}", new_name).green());
        } else {
            let _ = writeln!(output, "--- {}", old_name);
            let _ = writeln!(output, "+++ {}", new_name);
        }

        for hunk in diff
            .unified_diff()
            .context_radius(self.context_lines)
            .iter_hunks()
        {
            let header = hunk.header().to_string();
            if self.use_color {
                let _ = writeln!(output, "{}", header.cyan());
            } else {
                let _ = writeln!(output, "{}", header);
            }

            for change in hunk.iter_changes() {
                let line = change.value().trim_end_matches('\n');
                let (sign, text) = match change.tag() {
                    ChangeTag::Delete => ("-", line),
                    ChangeTag::Insert => ("+", line),
                    ChangeTag::Equal => (" ", line),
                };
                let rendered = format!("{}{}", sign, text);
                if self.use_color {
                    let rendered = match change.tag() {
                        ChangeTag::Delete => rendered.red().to_string(),
                        ChangeTag::Insert => rendered.green().to_string(),
                        ChangeTag::Equal => rendered.dimmed().to_string(),
                    };
                    let _ = writeln!(output, "{}", rendered);
                } else {
                    let _ = writeln!(output, "{}", rendered);
                }
            }
        }

        output
    }
}
