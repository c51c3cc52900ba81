//! Destroy command
//!
//! Usage: condor destroy --kind <task|workflow> --state <FILE>

use super::{describe, remove_state, require_state, CliResult, ConnectionArgs, KindArg};
use clap::Args;
use condor_engine::{apply_engine_command, EngineCommand};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DestroyArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    #[arg(long)]
    pub state: PathBuf,
}

pub fn execute(args: DestroyArgs, connection: &ConnectionArgs) -> CliResult {
    let state = require_state(&args.state)?;
    let name = describe(&state);
    let transport = connection.transport()?;

    apply_engine_command(
        EngineCommand::Destroy {
            kind: args.kind.into(),
            state,
        },
        &transport,
    )?;

    remove_state(&args.state)?;
    println!("✓ Destroyed {}", name);
    Ok(())
}
