//! Plan command
//!
//! Usage: condor plan --kind <task|workflow> --manifest <FILE> [--state <FILE>]
//!
//! Works offline: only the manifest and the recorded state are compared.

use super::{read_state, CliResult, KindArg};
use clap::Args;
use condor_core::Reconciler;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Desired manifest (JSON)
    #[arg(long)]
    pub manifest: PathBuf,

    /// Recorded state; a missing file plans a create
    #[arg(long)]
    pub state: Option<PathBuf>,
}

pub fn execute(args: PlanArgs) -> CliResult {
    let desired = std::fs::read_to_string(&args.manifest)?;

    let last_known = match &args.state {
        Some(path) => read_state(path)?.map(|s| s.manifest_text()).transpose()?,
        None => None,
    };

    let action = Reconciler::for_kind(args.kind.into()).plan(&desired, last_known.as_deref())?;
    println!("{}", action);
    Ok(())
}
