//! Engine-level commands for remote operations.

use crate::commands::apply;
use crate::resource::resource_for;
use crate::state::{ApplyOutcome, ResourceState};
use condor_client::Transport;
use condor_core::errors::Result;
use condor_core::PlanAction;
use condor_core_types::ResourceKind;

/// One lifecycle request against one definition.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Decide what an apply would do; sends nothing.
    Plan {
        kind: ResourceKind,
        desired: String,
        state: Option<ResourceState>,
    },
    Apply {
        kind: ResourceKind,
        desired: String,
        state: Option<ResourceState>,
    },
    Refresh {
        kind: ResourceKind,
        state: ResourceState,
    },
    /// Delete the definition (every version, for workflows).
    Destroy {
        kind: ResourceKind,
        state: ResourceState,
    },
    /// Start tracking an existing definition by name.
    Import { kind: ResourceKind, name: String },
}

/// Result of applying an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommandResult {
    Planned(PlanAction),
    Applied(ApplyOutcome),
    /// `None` when the definition no longer exists.
    Refreshed(Option<ResourceState>),
    Destroyed,
    /// `None` when the server does not know the name.
    Imported(Option<ResourceState>),
}

/// Apply an engine command over `transport`.
///
/// # Errors
///
/// Whatever the underlying operation returns.
pub fn apply_engine_command(cmd: EngineCommand, transport: &dyn Transport) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Plan {
            kind,
            desired,
            state,
        } => {
            let resource = resource_for(kind, transport);
            Ok(EngineCommandResult::Planned(resource.plan(&desired, state.as_ref())?))
        }
        EngineCommand::Apply {
            kind,
            desired,
            state,
        } => {
            let resource = resource_for(kind, transport);
            Ok(EngineCommandResult::Applied(apply::apply(resource.as_ref(), &desired, state)?))
        }
        EngineCommand::Refresh { kind, state } => {
            let resource = resource_for(kind, transport);
            Ok(EngineCommandResult::Refreshed(resource.read(&state)?))
        }
        EngineCommand::Destroy { kind, state } => {
            resource_for(kind, transport).delete(&state)?;
            Ok(EngineCommandResult::Destroyed)
        }
        EngineCommand::Import { kind, name } => {
            let resource = resource_for(kind, transport);
            Ok(EngineCommandResult::Imported(apply::import(resource.as_ref(), &name)?))
        }
    }
}
