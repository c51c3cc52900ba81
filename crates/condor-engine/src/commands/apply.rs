//! Apply: bring the server in line with a desired manifest.

use crate::resource::DefinitionResource;
use crate::state::{ApplyOutcome, ResourceState};
use condor_core::errors::Result;
use condor_core::PlanAction;

/// Create when nothing is tracked, otherwise act on the plan.
///
/// - `NoOp` keeps the tracked state and sends nothing.
/// - `Replace` deletes the tracked definition, then creates the desired one.
/// - `Update` writes in place; if the server reports the definition gone it
///   is created again.
///
/// # Errors
///
/// The first failing step's error; tracked state is only returned on success.
pub fn apply(
    resource: &dyn DefinitionResource,
    desired: &str,
    state: Option<ResourceState>,
) -> Result<ApplyOutcome> {
    let Some(state) = state else {
        return resource.create(desired);
    };

    match resource.plan(desired, Some(&state))? {
        PlanAction::NoOp => Ok(ApplyOutcome::no_op(state)),
        PlanAction::Replace => {
            let from = state.name()?;
            tracing::info!(kind = resource.kind().as_str(), from, "definition renamed, replacing");
            resource.delete(&state)?;
            resource.create(desired)
        }
        PlanAction::Update | PlanAction::Create => match resource.update(desired, &state)? {
            Some(outcome) => Ok(outcome),
            None => {
                let name = state.name()?;
                tracing::warn!(
                    kind = resource.kind().as_str(),
                    name,
                    "definition vanished before update, creating it"
                );
                resource.create(desired)
            }
        },
    }
}

/// Import `name` and immediately refresh it. `None` when the server does not
/// know the name.
///
/// # Errors
///
/// `MalformedManifest` for an empty name, or any read failure.
pub fn import(resource: &dyn DefinitionResource, name: &str) -> Result<Option<ResourceState>> {
    let imported = resource.import(name)?;
    resource.read(&imported)
}
