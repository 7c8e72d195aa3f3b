//! Cloudplan - declarative cloud resource graph builder
//!
//! Turns blueprint definitions into validated resource manifests for a
//! reconciliation engine to apply.
//!
//! This is the main entry point for the cloudplan CLI.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands::CommandContext;
use cli::{Cli, Commands};
use cloudplan::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    if cli.verbose >= 2 {
        eprintln!("cloudplan v{}", VERSION);
    }

    // Load configuration before logging is set up: the configured level is
    // the base filter when no -v flag raises it.
    let config = Config::load(cli.config.as_ref()).unwrap_or_else(|e| {
        if cli.verbose >= 1 {
            eprintln!("Warning: Failed to load config: {}", e);
        }
        Config::default()
    });

    init_logging(cli.verbose, &config.logging.log_level);

    // Create command context
    let mut ctx = CommandContext::new(&cli, config);

    // Execute the appropriate command
    let exit_code = match &cli.command {
        Commands::List(args) => args.execute(&mut ctx)?,
        Commands::Render(args) => args.execute(&mut ctx)?,
        Commands::Validate(args) => args.execute(&mut ctx)?,
        Commands::Graph(args) => args.execute(&mut ctx)?,
    };

    std::process::exit(exit_code);
}

/// Initialize logging. The -v count overrides the configured base level;
/// RUST_LOG overrides both. Events go to stderr so rendered manifests stay
/// clean on stdout.
fn init_logging(verbosity: u8, base_level: &str) {
    let filter = match verbosity {
        0 => base_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbosity >= 3)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}
