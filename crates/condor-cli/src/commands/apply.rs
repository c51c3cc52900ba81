//! Apply command
//!
//! Usage: condor apply --kind <task|workflow> --manifest <FILE> --state <FILE>

use super::{describe, read_state, write_state, CliResult, ConnectionArgs, KindArg};
use clap::Args;
use condor_engine::{apply_engine_command, Decision, EngineCommand, EngineCommandResult};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Desired manifest (JSON)
    #[arg(long)]
    pub manifest: PathBuf,

    /// State file, created on first apply
    #[arg(long)]
    pub state: PathBuf,
}

pub fn execute(args: ApplyArgs, connection: &ConnectionArgs) -> CliResult {
    let desired = std::fs::read_to_string(&args.manifest)?;
    let state = read_state(&args.state)?;
    let transport = connection.transport()?;

    let cmd = EngineCommand::Apply {
        kind: args.kind.into(),
        desired,
        state,
    };

    let EngineCommandResult::Applied(outcome) = apply_engine_command(cmd, &transport)? else {
        return Err("apply returned an unexpected result".into());
    };

    write_state(&args.state, &outcome.state)?;
    match outcome.decision {
        Decision::Written => println!("✓ Applied {}", describe(&outcome.state)),
        Decision::NoOp => println!("✓ No changes for {}", describe(&outcome.state)),
    }
    Ok(())
}
