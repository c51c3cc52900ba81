//! Workflow version assignment.
//!
//! Two modes, picked per apply from the proposed manifest:
//!
//! - **Auto** (`version` absent): the first create gets `1`, every update gets
//!   the tracked version plus one. A create that finds an identical
//!   definition on the server adopts its version and skips the write.
//! - **Manual** (`version` present): the requested version is written as is
//!   and must never be below the server's latest.
//!
//! This module only decides; the engine performs the remote calls and feeds
//! their results in.

use crate::errors::{ConductorError, Result};
use crate::manifest::{optional_version, required_version, Manifest, VERSION_KEY};
use crate::reconcile::{equality::manifests_equal, Reconciler};

/// How the version of the next write is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionMode {
    Auto,
    Manual(i32),
}

impl VersionMode {
    /// Read the mode from a proposed manifest.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` when `version` is present but not an integer ≥ 1.
    pub fn of(manifest: &Manifest) -> Result<Self> {
        Ok(match optional_version(manifest)? {
            Some(version) => VersionMode::Manual(version),
            None => VersionMode::Auto,
        })
    }
}

/// Version tracked for one workflow name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionState {
    NoVersion,
    AutoVersioned(i32),
    ManualVersioned(i32),
}

impl VersionState {
    /// Rebuild the state from a persisted version and the current mode.
    pub fn tracked(version: Option<i32>, mode: VersionMode) -> Self {
        match (version, mode) {
            (None, _) => VersionState::NoVersion,
            (Some(v), VersionMode::Auto) => VersionState::AutoVersioned(v),
            (Some(v), VersionMode::Manual(_)) => VersionState::ManualVersioned(v),
        }
    }

    fn in_mode(mode: VersionMode, version: i32) -> Self {
        match mode {
            VersionMode::Auto => VersionState::AutoVersioned(version),
            VersionMode::Manual(_) => VersionState::ManualVersioned(version),
        }
    }

    pub fn version(&self) -> Option<i32> {
        match self {
            VersionState::NoVersion => None,
            VersionState::AutoVersioned(v) | VersionState::ManualVersioned(v) => Some(*v),
        }
    }

    /// Decide the create for `name`, given what the server holds for it.
    ///
    /// `server` is the latest server manifest, or `None` when the name does
    /// not resolve.
    ///
    /// # Errors
    ///
    /// - `VersionConflict` when a manual version is below the server's.
    /// - `MalformedManifest` when the server manifest carries no valid version,
    ///   or an auto create would need a version above `i32::MAX`.
    pub fn create(
        reconciler: &Reconciler,
        name: &str,
        mode: VersionMode,
        proposed: &Manifest,
        server: Option<&Manifest>,
    ) -> Result<CreateDecision> {
        let Some(server) = server else {
            let version = match mode {
                VersionMode::Auto => 1,
                VersionMode::Manual(requested) => requested,
            };
            return Ok(CreateDecision::write(mode, version));
        };

        let current = required_version(server)?;

        match mode {
            VersionMode::Manual(requested) => {
                check_not_below(name, requested, current)?;
                if requested == current && reconciler.is_no_op_change(proposed, server) {
                    tracing::debug!(name, version = current, "definition already on server, skipping create");
                    return Ok(CreateDecision::adopt(mode, current));
                }
                Ok(CreateDecision::write(mode, requested))
            }
            VersionMode::Auto => {
                let mut proposed = proposed.clone();
                let mut server = server.clone();
                proposed.remove(VERSION_KEY);
                server.remove(VERSION_KEY);
                reconciler.normalize(&mut proposed);
                reconciler.normalize(&mut server);

                if manifests_equal(&proposed, &server) {
                    tracing::debug!(name, version = current, "definition already on server, skipping create");
                    return Ok(CreateDecision::adopt(mode, current));
                }
                Ok(CreateDecision::write(mode, next_version(name, current)?))
            }
        }
    }

    /// Decide the version of an update.
    ///
    /// `server_latest` is only consulted in manual mode (`None` when the name
    /// does not resolve, which is accepted).
    ///
    /// # Errors
    ///
    /// - `VersionConflict` when a manual version is below `server_latest`.
    /// - `MalformedManifest` when the tracked auto version is already `i32::MAX`.
    pub fn update(
        &self,
        name: &str,
        mode: VersionMode,
        server_latest: Option<i32>,
    ) -> Result<VersionState> {
        match mode {
            VersionMode::Auto => {
                let next = match self.version() {
                    Some(tracked) => next_version(name, tracked)?,
                    None => 1,
                };
                Ok(VersionState::AutoVersioned(next))
            }
            VersionMode::Manual(requested) => {
                if let Some(current) = server_latest {
                    check_not_below(name, requested, current)?;
                }
                Ok(VersionState::ManualVersioned(requested))
            }
        }
    }
}

fn next_version(name: &str, version: i32) -> Result<i32> {
    version.checked_add(1).ok_or_else(|| {
        ConductorError::malformed(format!(
            "workflow '{}' is at version {}, there is no higher version to assign",
            name, version
        ))
    })
}

fn check_not_below(name: &str, requested: i32, current: i32) -> Result<()> {
    if requested < current {
        return Err(ConductorError::VersionConflict {
            name: name.to_string(),
            requested,
            current,
        });
    }
    Ok(())
}

/// Outcome of [`VersionState::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateDecision {
    pub state: VersionState,
    /// `false` when the server already holds an equivalent definition.
    pub write: bool,
}

impl CreateDecision {
    fn write(mode: VersionMode, version: i32) -> Self {
        Self {
            state: VersionState::in_mode(mode, version),
            write: true,
        }
    }

    fn adopt(mode: VersionMode, version: i32) -> Self {
        Self {
            state: VersionState::in_mode(mode, version),
            write: false,
        }
    }

    pub fn version(&self) -> i32 {
        self.state.version().unwrap_or(1)
    }
}

/// Drives the delete-every-version loop.
///
/// Feed it the latest version after each delete; it answers with the version
/// to delete next, or `None` once the name no longer resolves.
#[derive(Debug, Clone)]
pub struct DeleteCursor {
    name: String,
    last_deleted: Option<i32>,
    deleted: Vec<i32>,
}

impl DeleteCursor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_deleted: None,
            deleted: Vec::new(),
        }
    }

    /// Accept the server's latest version and pick the next one to delete.
    ///
    /// # Errors
    ///
    /// `DeleteStalled` when the server reports the version that was just
    /// deleted, i.e. the delete did not retire it.
    pub fn advance(&mut self, latest: Option<i32>) -> Result<Option<i32>> {
        let Some(next) = latest else {
            return Ok(None);
        };

        if self.last_deleted == Some(next) {
            return Err(ConductorError::DeleteStalled {
                name: self.name.clone(),
                version: next,
            });
        }

        self.last_deleted = Some(next);
        self.deleted.push(next);
        Ok(Some(next))
    }

    /// Versions handed out so far, in order.
    pub fn deleted(&self) -> &[i32] {
        &self.deleted
    }
}
