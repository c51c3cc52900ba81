//! Workflow definitions (`metadata/workflow`), versioned.

use crate::remote::{self, WORKFLOW_PATH};
use crate::resource::{instrumented, DefinitionResource};
use crate::state::{ApplyOutcome, ResourceState};
use condor_client::{HttpResponse, Method, Transport};
use condor_core::errors::Result;
use condor_core::manifest::{manifest_name, parse_manifest, required_version, VERSION_KEY};
use condor_core::reconcile::plan::validate_desired;
use condor_core::{DeleteCursor, Manifest, Reconciler, VersionMode, VersionState};
use condor_core_types::{OperationContext, ResourceKind};
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::WorkflowDef;

pub struct WorkflowDefResource<T> {
    transport: T,
    reconciler: Reconciler,
}

impl<T: Transport> WorkflowDefResource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reconciler: Reconciler::for_kind(KIND),
        }
    }

    fn parse_desired(desired: &str) -> Result<(Manifest, VersionMode, OperationContext)> {
        let manifest = parse_manifest(desired)?;
        validate_desired(KIND, &manifest)?;
        let mode = VersionMode::of(&manifest)?;
        let ctx = OperationContext::new(KIND).with_name(manifest_name(&manifest)?);
        Ok((manifest, mode, ctx))
    }

    /// PUT the manifest stamped with `version`.
    fn put_version(&self, manifest: &Manifest, version: i32) -> Result<HttpResponse> {
        let mut stamped = manifest.clone();
        stamped.insert(VERSION_KEY.to_string(), Value::from(version));
        let body = remote::request_body(stamped, true)?;
        self.transport.send(Method::Put, WORKFLOW_PATH, Some(body))
    }
}

impl<T: Transport> DefinitionResource for WorkflowDefResource<T> {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    fn create(&self, desired: &str) -> Result<ApplyOutcome> {
        let (manifest, mode, ctx) = Self::parse_desired(desired)?;

        instrumented("workflowdef_create", &ctx, || {
            let name = ctx.name_or_empty();
            let server = remote::fetch_manifest(&self.transport, &remote::workflow_path(name))?;
            let decision = VersionState::create(&self.reconciler, name, mode, &manifest, server.as_ref())?;
            let version = decision.version();

            if decision.write {
                self.put_version(&manifest, version)?.require_ok(WORKFLOW_PATH)?;
            }

            let state = ResourceState::new(manifest, Some(version));
            Ok(if decision.write {
                ApplyOutcome::written(state)
            } else {
                ApplyOutcome::no_op(state)
            })
        })
    }

    fn read(&self, state: &ResourceState) -> Result<Option<ResourceState>> {
        let ctx = OperationContext::new(KIND).with_name(state.name()?);

        instrumented("workflowdef_read", &ctx, || {
            let path = remote::workflow_path(ctx.name_or_empty());
            let Some(mut current) = remote::fetch_manifest(&self.transport, &path)? else {
                tracing::info!(name = ctx.name_or_empty(), "workflow definition is gone");
                return Ok(None);
            };

            let version = required_version(&current)?;
            if !state.manifest.contains_key(VERSION_KEY) {
                current.remove(VERSION_KEY);
            }

            let mut refreshed = state.manifest.clone();
            self.reconciler.cleanup_and_merge(current, &mut refreshed);
            Ok(Some(ResourceState::new(refreshed, Some(version))))
        })
    }

    fn update(&self, desired: &str, state: &ResourceState) -> Result<Option<ApplyOutcome>> {
        let (manifest, mode, ctx) = Self::parse_desired(desired)?;

        instrumented("workflowdef_update", &ctx, || {
            let name = ctx.name_or_empty();
            let server_latest = match mode {
                VersionMode::Manual(_) => remote::latest_workflow_version(&self.transport, name)?,
                VersionMode::Auto => None,
            };

            let next = VersionState::tracked(state.version, mode).update(name, mode, server_latest)?;
            let version = next.version().unwrap_or(1);

            let response = self.put_version(&manifest, version)?;
            if response.is_not_found() {
                return Ok(None);
            }
            response.require_ok(WORKFLOW_PATH)?;
            Ok(Some(ApplyOutcome::written(ResourceState::new(manifest, Some(version)))))
        })
    }

    fn delete(&self, state: &ResourceState) -> Result<()> {
        let ctx = OperationContext::new(KIND).with_name(state.name()?);

        instrumented("workflowdef_delete", &ctx, || {
            let name = ctx.name_or_empty();
            let mut cursor = DeleteCursor::new(name);

            while let Some(version) = cursor.advance(remote::latest_workflow_version(&self.transport, name)?)? {
                remote::delete_with_recheck(
                    &self.transport,
                    &remote::workflow_version_path(name, version),
                    &remote::workflow_version_query(name, version),
                )?;
                tracing::debug!(name, version, "workflow version deleted");
            }

            tracing::debug!(name, deleted = ?cursor.deleted(), "workflow definition deleted");
            Ok(())
        })
    }
}
