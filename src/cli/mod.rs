//! Command-line interface for lernplan.
//!
//! Provides `plan`, `checkin`, `migrate` and `import` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod checkin;
mod import;
mod migrate;
mod plan;
mod utils;

/// Study-schedule planner for law-exam candidates
#[derive(Parser)]
#[command(name = "lernplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a study plan from wizard settings
    Plan(plan::PlanArgs),

    /// Merge local and remote check-in records and report due status
    Checkin(checkin::CheckinArgs),

    /// Run or inspect the local-store key migration
    Migrate(migrate::MigrateArgs),

    /// Parse a schedule text file into structured entries
    Import(import::ImportArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Plan(args) => plan::run(args),
        Commands::Checkin(args) => checkin::run(args),
        Commands::Migrate(args) => migrate::run(args),
        Commands::Import(args) => import::run(args),
    }
}
