//! Correlation types for operation tracking
//!
//! Every reconciliation pass (plan, create, read, update, delete) carries an
//! [`OperationContext`] so that the remote calls it issues can be tied back to
//! one logical operation in the logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a single reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(String);

impl OperationId {
    /// Generate a new OperationId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two remote definition classes managed by Condor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    TaskDef,
    WorkflowDef,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::TaskDef => "taskdef",
            ResourceKind::WorkflowDef => "workflowdef",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context carried through one operation on one named definition
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub operation_id: OperationId,
    pub kind: ResourceKind,
    pub name: Option<String>,
}

impl OperationContext {
    /// Create a context with a fresh OperationId
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            operation_id: OperationId::new(),
            kind,
            name: None,
        }
    }

    /// Attach the definition name once it is known
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
