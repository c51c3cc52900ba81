//! Request helpers shared by the definition resources.
//!
//! Status handling follows one contract: 200 is success, 404 means the
//! definition (or version) does not exist, and anything else surfaces as
//! `RemoteHttp` with the body verbatim. A 500 answering a delete is the one
//! ambiguous case and gets a single follow-up read.

use condor_client::{HttpResponse, Method, Transport};
use condor_core::errors::Result;
use condor_core::manifest::{parse_manifest_bytes, required_version, strip_server_owned};
use condor_core::Manifest;
use condor_core_types::schema::EVENT_AMBIGUOUS_DELETE;
use serde_json::Value;

pub const TASKDEFS_PATH: &str = "metadata/taskdefs";
pub const WORKFLOW_PATH: &str = "metadata/workflow";

pub fn taskdef_path(name: &str) -> String {
    format!("{}/{}", TASKDEFS_PATH, name)
}

/// Path resolving to the latest version of a workflow.
pub fn workflow_path(name: &str) -> String {
    format!("{}/{}", WORKFLOW_PATH, name)
}

pub fn workflow_version_path(name: &str, version: i32) -> String {
    format!("{}/{}/{}", WORKFLOW_PATH, name, version)
}

/// Read path for one specific workflow version.
pub fn workflow_version_query(name: &str, version: i32) -> String {
    format!("{}/{}?version={}", WORKFLOW_PATH, name, version)
}

/// Outcome of a write that may find its target gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    NotFound,
}

/// Strip server-owned fields and serialize the manifest as the request body.
///
/// `wrap` sends it as a one-element array, the shape create endpoints take.
///
/// # Errors
///
/// `Serialization` if the value cannot be encoded.
pub fn request_body(mut manifest: Manifest, wrap: bool) -> Result<Vec<u8>> {
    strip_server_owned(&mut manifest);
    let value = if wrap {
        Value::Array(vec![Value::Object(manifest)])
    } else {
        Value::Object(manifest)
    };
    Ok(serde_json::to_vec(&value)?)
}

/// GET a manifest. `None` on 404.
///
/// # Errors
///
/// `Transport`, `RemoteHttp` for statuses other than 200/404, or
/// `MalformedManifest` when the body is not a JSON object.
pub fn fetch_manifest<T: Transport + ?Sized>(transport: &T, path: &str) -> Result<Option<Manifest>> {
    let response = transport.send(Method::Get, path, None)?;
    if response.is_not_found() {
        return Ok(None);
    }
    let response = response.require_ok(path)?;
    parse_manifest_bytes(&response.body).map(Some)
}

/// Latest server version of a workflow. `None` when the name does not resolve.
///
/// # Errors
///
/// As [`fetch_manifest`], plus `MalformedManifest` when the server manifest
/// carries no valid `version`.
pub fn latest_workflow_version<T: Transport + ?Sized>(transport: &T, name: &str) -> Result<Option<i32>> {
    fetch_manifest(transport, &workflow_path(name))?
        .map(|manifest| required_version(&manifest))
        .transpose()
}

/// PUT or POST a body, treating 404 as "target gone".
///
/// # Errors
///
/// `Transport`, or `RemoteHttp` for statuses other than 200/404.
pub fn write<T: Transport + ?Sized>(
    transport: &T,
    method: Method,
    path: &str,
    body: Vec<u8>,
) -> Result<WriteStatus> {
    let response = transport.send(method, path, Some(body))?;
    if response.is_not_found() {
        return Ok(WriteStatus::NotFound);
    }
    response.require_ok(path)?;
    Ok(WriteStatus::Written)
}

/// DELETE `path`; on a 500, read `recheck_path` once and accept a 404 there as
/// "already deleted".
///
/// # Errors
///
/// - `Transport` if either request fails to complete.
/// - `RemoteHttp` carrying the read's response when the read answers neither
///   200 nor 404.
/// - `RemoteHttp` carrying the delete response otherwise.
pub fn delete_with_recheck<T: Transport + ?Sized>(transport: &T, path: &str, recheck_path: &str) -> Result<()> {
    let response = transport.send(Method::Delete, path, None)?;
    if response.is_ok() {
        return Ok(());
    }

    if response.status == 500 && recheck_reports_gone(transport, path, recheck_path)? {
        return Ok(());
    }

    response.require_ok(path).map(|_| ())
}

fn recheck_reports_gone<T: Transport + ?Sized>(transport: &T, path: &str, recheck_path: &str) -> Result<bool> {
    tracing::warn!(
        event = EVENT_AMBIGUOUS_DELETE,
        path,
        recheck = recheck_path,
        "delete answered 500, checking whether the definition still exists"
    );
    let recheck: HttpResponse = transport.send(Method::Get, recheck_path, None)?;
    if recheck.is_not_found() {
        tracing::info!(path, "definition was already deleted");
        return Ok(true);
    }
    recheck.require_ok(recheck_path)?;
    Ok(false)
}
