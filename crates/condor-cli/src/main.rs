//! Condor CLI
//!
//! Declarative management of Conductor task and workflow definitions

use clap::{Parser, Subcommand};
use condor_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "condor")]
#[command(about = "Condor - Conductor definitions as code", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: commands::ConnectionArgs,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show what an apply would do (create, no-op, update or replace)
    Plan(commands::plan::PlanArgs),
    /// Create or update a definition and record its state
    Apply(commands::apply::ApplyArgs),
    /// Refresh recorded state from the server
    Refresh(commands::refresh::RefreshArgs),
    /// Delete a definition (all versions for workflows)
    Destroy(commands::destroy::DestroyArgs),
    /// Start tracking a definition that already exists on the server
    Import(commands::import::ImportArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Apply(args) => commands::apply::execute(args, &cli.connection),
        Commands::Refresh(args) => commands::refresh::execute(args, &cli.connection),
        Commands::Destroy(args) => commands::destroy::execute(args, &cli.connection),
        Commands::Import(args) => commands::import::execute(args, &cli.connection),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
