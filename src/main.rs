//! nxconverge - declarative NX-OS configuration reconciliation
//!
//! This is the main entry point for the nxconverge CLI.

mod cli;

use cli::commands::{CommandContext, Runnable};
use cli::{Cli, Commands};
use nxconverge::config::{Config, LoggingConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        Config::default()
    });

    // Initialize logging based on verbosity
    init_logging(cli.verbosity(), &config.logging);

    if cli.verbosity() >= 2 {
        eprintln!("nxconverge v{}", nxconverge::VERSION);
    }

    // Create command context
    let mut ctx = CommandContext::new(&cli, config);

    // Execute the appropriate command
    let result = match &cli.command {
        Commands::Apply(args) => args.run(&mut ctx),
        Commands::Check(args) => args.run(&mut ctx),
        Commands::Validate(args) => args.run(&mut ctx),
        Commands::Show(args) => args.run(&mut ctx),
        Commands::Kinds(args) => args.run(&mut ctx),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

/// Map an error escaping a command to a process exit status
fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<nxconverge::Error>()
        .map_or(1, nxconverge::Error::exit_code)
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins, then `-v` flags, then the configured level.
fn init_logging(verbosity: u8, logging: &LoggingConfig) {
    let filter = match verbosity {
        0 => logging.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let json = logging.log_format.eq_ignore_ascii_case("json");
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(verbosity >= 3)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
