//! Validate command
//!
//! Checks every declaration of a manifest without touching a device and
//! reports each invalid resource.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use nxconverge::manifest::Manifest;
use nxconverge::platform::Platform;
use nxconverge::schema::SchemaRegistry;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the manifest file
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Also reject properties this platform does not support
    #[arg(long, short = 'p')]
    pub platform: Option<Platform>,
}

#[derive(Debug, Serialize)]
struct ValidationEntry {
    resource: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let manifest = match Manifest::load(&self.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                ctx.output.error(&e.to_string());
                return Ok(e.exit_code());
            }
        };

        let platform = self.platform.or(ctx.config.defaults.platform);
        if let Some(platform) = platform {
            ctx.output
                .info(&format!("Validating against platform {}", platform));
        }

        let results = manifest.validate_each(SchemaRegistry::builtin(), platform);
        let entries: Vec<ValidationEntry> = manifest
            .resources
            .iter()
            .zip(results)
            .map(|(decl, result)| match result {
                Ok(state) => ValidationEntry {
                    resource: state.reference(),
                    valid: true,
                    identity: Some(state.identity.to_string()),
                    error: None,
                },
                Err(e) => ValidationEntry {
                    resource: decl.reference(),
                    valid: false,
                    identity: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
        let invalid = entries.iter().filter(|e| !e.valid).count();

        if ctx.output.is_structured() {
            ctx.output.emit(&entries);
        } else {
            ctx.output.banner(&format!("VALIDATE [{}]", self.manifest.display()));
            for entry in &entries {
                self.print_entry(ctx, entry);
            }
            let summary = format!(
                "{} resource(s), {} invalid",
                entries.len(),
                invalid
            );
            if !ctx.output.use_color() {
                println!("\n{}", summary);
            } else if invalid > 0 {
                println!("\n{}", summary.red().bold());
            } else {
                println!("\n{}", summary.green().bold());
            }
        }

        Ok(if invalid > 0 { 4 } else { 0 })
    }

    fn print_entry(&self, ctx: &CommandContext, entry: &ValidationEntry) {
        let color = ctx.output.use_color();
        match (&entry.error, &entry.identity) {
            (Some(error), _) => {
                let status = if color {
                    "invalid".red().bold().to_string()
                } else {
                    "invalid".to_string()
                };
                println!("{}: [{}] => {}", status, entry.resource, error);
            }
            (None, identity) => {
                let status = if color {
                    "ok".green().to_string()
                } else {
                    "ok".to_string()
                };
                match identity {
                    Some(identity) if ctx.verbosity >= 1 => {
                        println!("{}: [{}] => {}", status, entry.resource, identity)
                    }
                    _ => println!("{}: [{}]", status, entry.resource),
                }
            }
        }
    }
}

impl Runnable for ValidateArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}
