//! The lifecycle every managed definition class implements.

use crate::state::{ApplyOutcome, ResourceState};
use crate::taskdef::TaskDefResource;
use crate::workflowdef::WorkflowDefResource;
use condor_client::Transport;
use condor_core::errors::Result;
use condor_core::manifest::{import_manifest, manifest_name};
use condor_core::{log_op_end, log_op_error, log_op_start, PlanAction, Reconciler};
use condor_core_types::{OperationContext, ResourceKind};
use std::time::Instant;

/// Remote lifecycle of one definition class.
///
/// `desired` is always the user's manifest text; tracked state is passed in
/// and returned, never held.
pub trait DefinitionResource {
    fn kind(&self) -> ResourceKind;

    fn reconciler(&self) -> &Reconciler;

    /// Plan-time decision; never touches the server.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` for an invalid desired manifest.
    fn plan(&self, desired: &str, state: Option<&ResourceState>) -> Result<PlanAction> {
        let last_known = state.map(ResourceState::manifest_text).transpose()?;
        self.reconciler().plan(desired, last_known.as_deref())
    }

    /// # Errors
    ///
    /// Any validation, version or remote failure; nothing is tracked then.
    fn create(&self, desired: &str) -> Result<ApplyOutcome>;

    /// Refresh tracked state from the server. `None` when the definition is
    /// gone.
    ///
    /// # Errors
    ///
    /// Remote failures, or a server manifest that does not parse.
    fn read(&self, state: &ResourceState) -> Result<Option<ResourceState>>;

    /// `None` when the server reports the definition gone.
    ///
    /// # Errors
    ///
    /// Any validation, version or remote failure.
    fn update(&self, desired: &str, state: &ResourceState) -> Result<Option<ApplyOutcome>>;

    /// # Errors
    ///
    /// Remote failures that are not resolved as "already deleted".
    fn delete(&self, state: &ResourceState) -> Result<()>;

    /// Minimal state for an existing definition; [`read`](Self::read) fills
    /// in the rest.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` for an empty name.
    fn import(&self, name: &str) -> Result<ResourceState> {
        let manifest = import_manifest(name);
        manifest_name(&manifest)?;
        Ok(ResourceState::new(manifest, None))
    }
}

/// The resource implementation for `kind`, bound to `transport`.
pub fn resource_for<'a>(kind: ResourceKind, transport: &'a dyn Transport) -> Box<dyn DefinitionResource + 'a> {
    match kind {
        ResourceKind::TaskDef => Box::new(TaskDefResource::new(transport)),
        ResourceKind::WorkflowDef => Box::new(WorkflowDefResource::new(transport)),
    }
}

/// Run `f` between start and end/error events for `op`.
pub(crate) fn instrumented<R>(
    op: &'static str,
    ctx: &OperationContext,
    f: impl FnOnce() -> Result<R>,
) -> Result<R> {
    let start = Instant::now();
    log_op_start!(
        op,
        operation_id = ctx.operation_id.as_str(),
        kind = ctx.kind.as_str(),
        name = ctx.name_or_empty()
    );

    let result = f();
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                operation_id = ctx.operation_id.as_str()
            );
        }
        Err(err) => {
            log_op_error!(
                op,
                err,
                duration_ms = duration_ms,
                operation_id = ctx.operation_id.as_str()
            );
        }
    }
    result
}
