//! Refresh command
//!
//! Usage: condor refresh --kind <task|workflow> --state <FILE>

use super::{describe, remove_state, require_state, write_state, CliResult, ConnectionArgs, KindArg};
use clap::Args;
use condor_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RefreshArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    #[arg(long)]
    pub state: PathBuf,
}

pub fn execute(args: RefreshArgs, connection: &ConnectionArgs) -> CliResult {
    let state = require_state(&args.state)?;
    let name = describe(&state);
    let transport = connection.transport()?;

    let cmd = EngineCommand::Refresh {
        kind: args.kind.into(),
        state,
    };

    match apply_engine_command(cmd, &transport)? {
        EngineCommandResult::Refreshed(Some(refreshed)) => {
            write_state(&args.state, &refreshed)?;
            println!("✓ Refreshed {}", describe(&refreshed));
        }
        EngineCommandResult::Refreshed(None) => {
            remove_state(&args.state)?;
            println!("{} no longer exists, state removed", name);
        }
        _ => return Err("refresh returned an unexpected result".into()),
    }
    Ok(())
}
