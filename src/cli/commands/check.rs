//! Check command - Dry-run mode
//!
//! Runs the full apply pipeline with writes suppressed.

use super::{CommandContext, Runnable};
use crate::cli::commands::apply::ApplyArgs;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the manifest file
    #[arg(required = true)]
    pub manifest: PathBuf,

    /// Device snapshot to compare against
    #[arg(short = 'd', long)]
    pub device: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        // Force check mode
        ctx.check_mode = true;

        let apply_args = ApplyArgs {
            manifest: self.manifest.clone(),
            device: self.device.clone(),
        };

        apply_args.execute(ctx)
    }
}

impl Runnable for CheckArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args_parsing() {
        let args = CheckArgs::try_parse_from(["check", "site.yaml"]).unwrap();
        assert_eq!(args.manifest, PathBuf::from("site.yaml"));
        assert!(args.device.is_none());
    }

    #[test]
    fn test_check_with_global_diff() {
        let cli = crate::cli::Cli::try_parse_from(["nxconverge", "check", "site.yaml", "--diff"])
            .unwrap();
        assert!(cli.diff_mode);
    }
}
