//! Tracked state of one managed definition.

use condor_core::errors::Result;
use condor_core::manifest::{manifest_name, to_manifest_string};
use condor_core::Manifest;
use serde::{Deserialize, Serialize};

/// Last-known manifest plus the tracked workflow version.
///
/// The manifest is what the user wrote, refreshed with server scalars; it is
/// never the raw server echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub manifest: Manifest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl ResourceState {
    pub fn new(manifest: Manifest, version: Option<i32>) -> Self {
        Self { manifest, version }
    }

    /// # Errors
    ///
    /// `MalformedManifest` when the tracked manifest has no valid `name`.
    pub fn name(&self) -> Result<&str> {
        manifest_name(&self.manifest)
    }

    /// # Errors
    ///
    /// `Serialization` if the manifest cannot be rendered.
    pub fn manifest_text(&self) -> Result<String> {
        to_manifest_string(&self.manifest)
    }
}

/// Whether an apply touched the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    NoOp,
    Written,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub state: ResourceState,
    pub decision: Decision,
}

impl ApplyOutcome {
    pub fn written(state: ResourceState) -> Self {
        Self {
            state,
            decision: Decision::Written,
        }
    }

    pub fn no_op(state: ResourceState) -> Self {
        Self {
            state,
            decision: Decision::NoOp,
        }
    }
}
