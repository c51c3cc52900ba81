//! Condor Core - manifest reconciliation kernel
//!
//! This crate holds everything about Conductor definitions that does not touch
//! the network:
//! - Manifest parsing and field access (`name`, `version`, server-owned fields)
//! - Per-class default tables
//! - Default elision, server-echo merge and the no-op plan oracle
//! - The workflow version assignment state machine
//! - Error and logging facilities shared by the other crates

pub mod defaults;
pub mod errors;
pub mod logging_facility;
pub mod manifest;
pub mod reconcile;
pub mod versioning;

// Re-exported so the logging macros can name schema constants via `$crate`
pub use condor_core_types;

pub use defaults::DefaultTable;
pub use errors::{ConductorError, ExError, ExErrorKind, Result};
pub use manifest::Manifest;
pub use reconcile::{PlanAction, Reconciler};
pub use versioning::{CreateDecision, DeleteCursor, VersionMode, VersionState};
