//! Plan-time decision for one definition.
//!
//! The no-op check runs before the name comparison: a proposal that only
//! restates defaults must never be reported as a change, and a real name
//! change can never normalize away because `name` is never elided.

use crate::errors::Result;
use crate::manifest::{manifest_name, optional_version, parse_manifest, Manifest, NAME_KEY};
use crate::reconcile::Reconciler;
use condor_core_types::ResourceKind;
use std::fmt;

/// What the declarative tool should do for one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// Nothing is tracked yet.
    Create,
    /// Desired and last-known are equal after normalization.
    NoOp,
    /// The content changed under the same name.
    Update,
    /// The name changed: delete the old definition and create the new one.
    Replace,
}

impl PlanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanAction::Create => "create",
            PlanAction::NoOp => "no-op",
            PlanAction::Update => "update",
            PlanAction::Replace => "replace",
        }
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check the fields a desired manifest must carry for its class.
///
/// # Errors
///
/// `MalformedManifest` when `name` is not a non-empty string, or a workflow
/// `version` is present but not an integer ≥ 1.
pub fn validate_desired(kind: ResourceKind, manifest: &Manifest) -> Result<()> {
    manifest_name(manifest)?;
    if kind == ResourceKind::WorkflowDef {
        optional_version(manifest)?;
    }
    Ok(())
}

/// `true` when the definition's identity changed between the two manifests.
pub fn requires_replace(last_known: &Manifest, desired: &Manifest) -> bool {
    last_known.get(NAME_KEY) != desired.get(NAME_KEY)
}

impl Reconciler {
    /// Decide the plan action for `desired` against the `last_known` text.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` when the desired manifest does not parse or fails
    /// [`validate_desired`]. An unreadable last-known manifest is not an
    /// error: there is nothing to compare against, so the plan is an update.
    pub fn plan(&self, desired: &str, last_known: Option<&str>) -> Result<PlanAction> {
        let desired = parse_manifest(desired)?;
        validate_desired(self.kind(), &desired)?;

        let Some(last_known) = last_known else {
            return Ok(PlanAction::Create);
        };

        let last_known = match parse_manifest(last_known) {
            Ok(manifest) => manifest,
            Err(err) => {
                tracing::warn!(error = %err, "last-known manifest is unreadable, planning an update");
                return Ok(PlanAction::Update);
            }
        };

        if self.is_no_op_change(&desired, &last_known) {
            return Ok(PlanAction::NoOp);
        }

        if requires_replace(&last_known, &desired) {
            return Ok(PlanAction::Replace);
        }

        Ok(PlanAction::Update)
    }
}
