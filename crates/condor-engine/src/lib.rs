//! Condor Engine - remote orchestration of definition lifecycles
//!
//! Combines the reconciliation kernel in `condor-core` with a
//! [`Transport`](condor_client::Transport) to run create, read, update,
//! delete and import against the Conductor metadata API.

pub mod commands;
pub mod remote;
pub mod resource;
pub mod state;
pub mod taskdef;
pub mod workflowdef;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use resource::{resource_for, DefinitionResource};
pub use state::{ApplyOutcome, Decision, ResourceState};
pub use taskdef::TaskDefResource;
pub use workflowdef::WorkflowDefResource;
