//! Subcommands module for nxconverge CLI
//!
//! This module contains all the subcommand implementations.

pub mod apply;
pub mod check;
pub mod kinds;
pub mod show;
pub mod validate;

use crate::cli::output::OutputFormatter;
use anyhow::{anyhow, bail, Result};
use nxconverge::config::Config;
use nxconverge::facade::MemoryDevice;
use std::path::{Path, PathBuf};

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Verbosity level
    pub verbosity: u8,
    /// Check mode (dry-run)
    pub check_mode: bool,
    /// Diff mode
    pub diff_mode: bool,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let use_color = !cli.no_color && config.colors.enabled;
        let output = OutputFormatter::new(use_color, cli.output, cli.verbosity());

        Self {
            output,
            verbosity: cli.verbosity(),
            check_mode: cli.check_mode || config.defaults.check_mode,
            diff_mode: cli.diff_mode || config.defaults.diff,
            config,
        }
    }

    /// Resolve the device snapshot path from the argument or the config.
    pub fn device_path(&self, arg: Option<&PathBuf>) -> Result<PathBuf> {
        match arg.or(self.config.device_path()) {
            Some(path) => Ok(path.clone()),
            None => bail!(
                "No device given: pass --device or set defaults.device in nxconverge.toml"
            ),
        }
    }

    /// Load the device snapshot at `path`.
    pub fn open_device(&self, path: &Path) -> Result<MemoryDevice> {
        self.output
            .debug(&format!("Loading device snapshot {}", path.display()));
        MemoryDevice::load(path).map_err(|e| anyhow!("{}", e))
    }
}

/// Trait for runnable commands
pub trait Runnable {
    /// Execute the command
    fn run(&self, ctx: &mut CommandContext) -> Result<i32>;
}
