//! Command orchestration layer.
//!
//! Composes the per-class lifecycle operations into the flows a declarative
//! tool runs: apply (create, update or replace), refresh, destroy and import.

pub mod apply;
pub mod engine_command;
