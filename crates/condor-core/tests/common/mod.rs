use condor_core::Manifest;
use serde_json::Value;

/// Unwrap a `json!` object literal into a manifest
#[allow(dead_code)]
pub fn manifest(value: Value) -> Manifest {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {}", other),
    }
}

/// A workflow as the server echoes it back: defaults filled in and
/// server-owned fields stamped
#[allow(dead_code)]
pub fn server_workflow(name: &str, version: i32) -> Manifest {
    manifest(serde_json::json!({
        "name": name,
        "version": version,
        "schemaVersion": 2,
        "restartable": true,
        "timeoutPolicy": "ALERT_ONLY",
        "timeoutSeconds": 0,
        "inputParameters": [],
        "outputParameters": {},
        "ownerEmail": "ops@example.com",
        "createTime": 1_700_000_000_000_i64,
        "createdBy": "admin",
        "tasks": [
            {
                "name": "fetch",
                "taskReferenceName": "fetch_ref",
                "type": "SIMPLE",
                "optional": false,
                "inputParameters": {"url": "${workflow.input.url}"},
                "startDelay": 0,
            }
        ],
    }))
}

/// The local counterpart of [`server_workflow`] without a version
#[allow(dead_code)]
pub fn local_workflow(name: &str) -> Manifest {
    manifest(serde_json::json!({
        "name": name,
        "ownerEmail": "ops@example.com",
        "tasks": [
            {
                "name": "fetch",
                "taskReferenceName": "fetch_ref",
                "inputParameters": {"url": "${workflow.input.url}"},
            }
        ],
    }))
}
