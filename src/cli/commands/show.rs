//! Show command
//!
//! Enumerates the live instances of one resource kind on a device.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use nxconverge::enumerate::enumerate;
use nxconverge::identity::resource_ref;
use nxconverge::schema::SchemaRegistry;
use nxconverge::value::display_slot;
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Resource kind, e.g. cisco_bgp_neighbor
    #[arg(required = true)]
    pub kind: String,

    /// Device snapshot to read
    #[arg(short = 'd', long)]
    pub device: Option<PathBuf>,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let registry = SchemaRegistry::builtin();
        let kind = match registry.get(&self.kind) {
            Ok(kind) => kind,
            Err(e) => {
                ctx.output.error(&e.to_string());
                ctx.output
                    .hint(&format!("known kinds: {}", registry.names().join(", ")));
                return Ok(e.exit_code());
            }
        };

        let device_path = ctx.device_path(self.device.as_ref())?;
        let device = ctx.open_device(&device_path)?;
        let instances = enumerate(&device, kind)?;

        if ctx.output.is_structured() {
            ctx.output.emit(&instances);
            return Ok(0);
        }

        ctx.output
            .banner(&format!("SHOW [{}] ({} instance(s))", kind.name, instances.len()));
        for instance in &instances {
            let title = instance.identity.to_string();
            let header = resource_ref(kind.name, &title);
            if ctx.output.use_color() {
                println!("\n{}", header.bright_white().bold());
            } else {
                println!("\n{}", header);
            }

            for (field, value) in instance.identity.fields() {
                println!("  {:<28} {}", format!("{}:", field), value);
            }
            for (name, value) in &instance.properties {
                // Unconfigured properties only show up at -v
                if value.is_none() && ctx.verbosity < 1 {
                    continue;
                }
                let rendered = display_slot(value.as_ref());
                if value.is_none() && ctx.output.use_color() {
                    println!("  {:<28} {}", format!("{}:", name), rendered.bright_black());
                } else {
                    println!("  {:<28} {}", format!("{}:", name), rendered);
                }
            }
        }

        Ok(0)
    }
}

impl Runnable for ShowArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}
