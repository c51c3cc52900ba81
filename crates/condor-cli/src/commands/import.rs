//! Import command
//!
//! Usage: condor import --kind <task|workflow> --name <NAME> --state <FILE>

use super::{describe, write_state, CliResult, ConnectionArgs, KindArg};
use clap::Args;
use condor_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Name of the definition on the server
    #[arg(long)]
    pub name: String,

    /// State file to create
    #[arg(long)]
    pub state: PathBuf,
}

pub fn execute(args: ImportArgs, connection: &ConnectionArgs) -> CliResult {
    if args.state.exists() {
        return Err(format!("{} already exists, refusing to overwrite", args.state.display()).into());
    }
    let transport = connection.transport()?;

    let cmd = EngineCommand::Import {
        kind: args.kind.into(),
        name: args.name.clone(),
    };

    match apply_engine_command(cmd, &transport)? {
        EngineCommandResult::Imported(Some(state)) => {
            write_state(&args.state, &state)?;
            println!("✓ Imported {}", describe(&state));
            Ok(())
        }
        EngineCommandResult::Imported(None) => {
            Err(format!("no definition named '{}' on the server", args.name).into())
        }
        _ => Err("import returned an unexpected result".into()),
    }
}
