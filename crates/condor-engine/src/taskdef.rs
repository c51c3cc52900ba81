//! Task definitions (`metadata/taskdefs`).

use crate::remote::{self, WriteStatus, TASKDEFS_PATH};
use crate::resource::{instrumented, DefinitionResource};
use crate::state::{ApplyOutcome, ResourceState};
use condor_client::{Method, Transport};
use condor_core::errors::Result;
use condor_core::manifest::{manifest_name, parse_manifest};
use condor_core::reconcile::plan::validate_desired;
use condor_core::{Manifest, Reconciler};
use condor_core_types::{OperationContext, ResourceKind};

const KIND: ResourceKind = ResourceKind::TaskDef;

pub struct TaskDefResource<T> {
    transport: T,
    reconciler: Reconciler,
}

impl<T: Transport> TaskDefResource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reconciler: Reconciler::for_kind(KIND),
        }
    }

    fn parse_desired(desired: &str) -> Result<(Manifest, OperationContext)> {
        let manifest = parse_manifest(desired)?;
        validate_desired(KIND, &manifest)?;
        let ctx = OperationContext::new(KIND).with_name(manifest_name(&manifest)?);
        Ok((manifest, ctx))
    }
}

impl<T: Transport> DefinitionResource for TaskDefResource<T> {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    fn create(&self, desired: &str) -> Result<ApplyOutcome> {
        let (manifest, ctx) = Self::parse_desired(desired)?;

        instrumented("taskdef_create", &ctx, || {
            let body = remote::request_body(manifest.clone(), true)?;
            let response = self.transport.send(Method::Post, TASKDEFS_PATH, Some(body))?;
            response.require_ok(TASKDEFS_PATH)?;
            Ok(ApplyOutcome::written(ResourceState::new(manifest, None)))
        })
    }

    fn read(&self, state: &ResourceState) -> Result<Option<ResourceState>> {
        let ctx = OperationContext::new(KIND).with_name(state.name()?);

        instrumented("taskdef_read", &ctx, || {
            let path = remote::taskdef_path(ctx.name_or_empty());
            let Some(current) = remote::fetch_manifest(&self.transport, &path)? else {
                tracing::info!(name = ctx.name_or_empty(), "task definition is gone");
                return Ok(None);
            };

            let mut refreshed = state.manifest.clone();
            self.reconciler.cleanup_and_merge(current, &mut refreshed);
            Ok(Some(ResourceState::new(refreshed, None)))
        })
    }

    fn update(&self, desired: &str, _state: &ResourceState) -> Result<Option<ApplyOutcome>> {
        let (manifest, ctx) = Self::parse_desired(desired)?;

        instrumented("taskdef_update", &ctx, || {
            let body = remote::request_body(manifest.clone(), false)?;
            match remote::write(&self.transport, Method::Put, TASKDEFS_PATH, body)? {
                WriteStatus::NotFound => Ok(None),
                WriteStatus::Written => Ok(Some(ApplyOutcome::written(ResourceState::new(manifest, None)))),
            }
        })
    }

    fn delete(&self, state: &ResourceState) -> Result<()> {
        let ctx = OperationContext::new(KIND).with_name(state.name()?);

        instrumented("taskdef_delete", &ctx, || {
            let path = remote::taskdef_path(ctx.name_or_empty());
            remote::delete_with_recheck(&self.transport, &path, &path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condor_client::HttpResponse;
    use condor_core::errors::ConductorError;
    use std::cell::RefCell;

    /// Answers every request with the same status and records the paths.
    struct Fixed {
        status: u16,
        paths: RefCell<Vec<String>>,
    }

    impl Transport for Fixed {
        fn send(&self, method: Method, path: &str, _body: Option<Vec<u8>>) -> Result<HttpResponse> {
            self.paths.borrow_mut().push(format!("{} {}", method, path));
            Ok(HttpResponse::new(self.status, "{}"))
        }
    }

    #[test]
    fn test_invalid_manifest_never_reaches_the_server() {
        let transport = Fixed {
            status: 200,
            paths: RefCell::new(Vec::new()),
        };
        let resource = TaskDefResource::new(&transport);

        let err = resource.create(r#"{"retryCount": 3}"#).unwrap_err();
        assert!(matches!(err, ConductorError::MalformedManifest { .. }));
        assert!(transport.paths.borrow().is_empty());
    }

    #[test]
    fn test_update_404_means_gone() {
        let transport = Fixed {
            status: 404,
            paths: RefCell::new(Vec::new()),
        };
        let resource = TaskDefResource::new(&transport);
        let state = resource.import("t1").unwrap();

        assert_eq!(resource.update(r#"{"name":"t1"}"#, &state).unwrap(), None);
        assert_eq!(*transport.paths.borrow(), vec!["PUT metadata/taskdefs".to_string()]);
    }
}
