//! Apply command
//!
//! Validates a manifest against the device platform, then converges every
//! declared resource and writes the resulting device snapshot back.

use super::{CommandContext, Runnable};
use crate::cli::diff::ColorizedDiff;
use anyhow::{Context, Result};
use clap::Parser;
use nxconverge::catalog::{Catalog, ResourceOutcome};
use nxconverge::facade::Facade;
use nxconverge::manifest::Manifest;
use nxconverge::reconcile::ReconcileOptions;
use nxconverge::schema::SchemaRegistry;
use std::path::PathBuf;

/// Arguments for the apply command
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    /// Path to the manifest file
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Device snapshot to converge
    #[arg(short = 'd', long)]
    pub device: Option<PathBuf>,
}

impl ApplyArgs {
    /// Execute the apply command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let device_path = ctx.device_path(self.device.as_ref())?;
        let device = ctx.open_device(&device_path)?;

        let manifest = match Manifest::load(&self.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                ctx.output.error(&e.to_string());
                return Ok(e.exit_code());
            }
        };

        let catalog = match Catalog::compile(
            &manifest,
            SchemaRegistry::builtin(),
            Some(device.platform()),
        ) {
            Ok(catalog) => catalog,
            Err(e) => {
                ctx.output.error(&e.to_string());
                ctx.output.hint(&format!(
                    "run `nxconverge validate {}` to list every invalid resource",
                    self.manifest.display()
                ));
                return Ok(e.exit_code());
            }
        };

        if catalog.is_empty() {
            ctx.output.warning("Manifest declares no resources");
        }

        let hostname = device
            .snapshot()
            .hostname
            .unwrap_or_else(|| device_path.display().to_string());
        let verb = if ctx.check_mode { "CHECK" } else { "APPLY" };
        ctx.output
            .banner(&format!("{} [{}] ({})", verb, hostname, device.platform()));
        ctx.output.info(&format!(
            "{} resource(s) from {}",
            catalog.len(),
            self.manifest.display()
        ));

        let options = ReconcileOptions::new().with_check_mode(ctx.check_mode);
        let summary = catalog.apply(&device, &options);

        let differ = ColorizedDiff::new(ctx.output.use_color());
        for outcome in &summary.outcomes {
            ctx.output.resource_result(outcome);
            if ctx.diff_mode && !ctx.output.is_structured() {
                if let ResourceOutcome::Ok(report) = outcome {
                    if !report.changes.is_empty() {
                        print!("{}", differ.report(report));
                    }
                }
            }
        }
        ctx.output.recap(&summary);
        ctx.output.flush();

        if ctx.check_mode {
            ctx.output.debug("Check mode: device snapshot left untouched");
        } else {
            device
                .snapshot()
                .save(&device_path)
                .with_context(|| format!("Failed to save {}", device_path.display()))?;
        }

        Ok(if summary.has_failures() { 2 } else { 0 })
    }
}

impl Runnable for ApplyArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}
