//! CLI module for nxconverge
//!
//! This module provides the command-line interface for nxconverge,
//! including argument parsing, configuration loading, and subcommand handling.

pub mod commands;
pub mod diff;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// nxconverge - converge NX-OS configuration towards a manifest
#[derive(Parser, Debug, Clone)]
#[command(name = "nxconverge")]
#[command(version)]
#[command(about = "Declarative reconciliation of NX-OS configuration entities", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run in check mode (report changes without making them)
    #[arg(long = "check", global = true)]
    pub check_mode: bool,

    /// Show property differences for changed resources
    #[arg(long = "diff", global = true)]
    pub diff_mode: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "NXCONVERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Converge a device towards a manifest
    Apply(commands::apply::ApplyArgs),

    /// Report what `apply` would change without changing anything
    Check(commands::check::CheckArgs),

    /// Validate a manifest without touching a device
    Validate(commands::validate::ValidateArgs),

    /// Show the live instances of a resource kind
    Show(commands::show::ShowArgs),

    /// List resource kinds, or describe one
    Kinds(commands::kinds::KindsArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["nxconverge", "apply", "site.yaml", "--device", "sw1.yaml"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Apply(_)));
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["nxconverge", "-vvvv", "kinds"]).unwrap();
        assert_eq!(cli.verbosity(), 3);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "nxconverge",
            "validate",
            "site.yaml",
            "--output",
            "json",
            "--check",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.check_mode);
    }
}
