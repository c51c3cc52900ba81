#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::ScriptedTransport;
use condor_client::Method;
use condor_core::logging_facility::test_capture::init_test_capture;
use condor_core::PlanAction;
use condor_core_types::schema::{
    EVENT_AMBIGUOUS_DELETE, EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ERR_CODE, FIELD_KIND,
    FIELD_NAME, FIELD_OPERATION_ID, FIELD_VERSION,
};
use condor_core_types::ResourceKind;
use condor_engine::{apply_engine_command, Decision, EngineCommand, EngineCommandResult, ResourceState};
use serde_json::json;

fn tracked(manifest: serde_json::Value, version: Option<i32>) -> ResourceState {
    ResourceState::new(manifest.as_object().cloned().unwrap(), version)
}

#[test]
fn test_plan_needs_no_transport_calls() {
    let transport = ScriptedTransport::new();
    let result = apply_engine_command(
        EngineCommand::Plan {
            kind: ResourceKind::TaskDef,
            desired: r#"{"name":"t1","retryCount":3}"#.to_string(),
            state: Some(tracked(json!({"name": "t1"}), None)),
        },
        &transport,
    )
    .unwrap();

    assert_eq!(result, EngineCommandResult::Planned(PlanAction::NoOp));
    assert!(transport.calls().is_empty());
}

#[test]
fn test_apply_without_state_creates() {
    let transport = ScriptedTransport::new().then(Method::Post, "metadata/taskdefs", 200, "");
    let result = apply_engine_command(
        EngineCommand::Apply {
            kind: ResourceKind::TaskDef,
            desired: r#"{"name":"t1"}"#.to_string(),
            state: None,
        },
        &transport,
    )
    .unwrap();

    match result {
        EngineCommandResult::Applied(outcome) => assert_eq!(outcome.decision, Decision::Written),
        other => panic!("expected Applied, got {:?}", other),
    }
}

#[test]
fn test_apply_no_op_keeps_state_and_sends_nothing() {
    let transport = ScriptedTransport::new();
    let state = tracked(json!({"name": "w1", "ownerEmail": "a@b"}), Some(4));

    let result = apply_engine_command(
        EngineCommand::Apply {
            kind: ResourceKind::WorkflowDef,
            desired: r#"{"name":"w1","ownerEmail":"a@b","schemaVersion":2}"#.to_string(),
            state: Some(state.clone()),
        },
        &transport,
    )
    .unwrap();

    match result {
        EngineCommandResult::Applied(outcome) => {
            assert_eq!(outcome.decision, Decision::NoOp);
            assert_eq!(outcome.state, state);
        }
        other => panic!("expected Applied, got {:?}", other),
    }
    assert!(transport.calls().is_empty());
}

#[test]
fn test_apply_rename_replaces_definition() {
    // GIVEN t1 tracked and the desired manifest renamed to t2
    let transport = ScriptedTransport::new()
        .then(Method::Delete, "metadata/taskdefs/t1", 200, "")
        .then(Method::Post, "metadata/taskdefs", 200, "");

    // WHEN applied
    let result = apply_engine_command(
        EngineCommand::Apply {
            kind: ResourceKind::TaskDef,
            desired: r#"{"name":"t2"}"#.to_string(),
            state: Some(tracked(json!({"name": "t1"}), None)),
        },
        &transport,
    )
    .unwrap();

    // THEN the old definition is deleted before the new one is created
    assert_eq!(
        transport.calls(),
        vec!["DELETE metadata/taskdefs/t1", "POST metadata/taskdefs"]
    );
    match result {
        EngineCommandResult::Applied(outcome) => {
            assert_eq!(outcome.state.name().unwrap(), "t2");
        }
        other => panic!("expected Applied, got {:?}", other),
    }
}

#[test]
fn test_apply_update_on_vanished_definition_recreates_it() {
    let transport = ScriptedTransport::new()
        .then(Method::Put, "metadata/taskdefs", 404, "")
        .then(Method::Post, "metadata/taskdefs", 200, "");

    let result = apply_engine_command(
        EngineCommand::Apply {
            kind: ResourceKind::TaskDef,
            desired: r#"{"name":"t1","retryCount":9}"#.to_string(),
            state: Some(tracked(json!({"name": "t1"}), None)),
        },
        &transport,
    )
    .unwrap();

    assert!(matches!(result, EngineCommandResult::Applied(_)));
    transport.assert_exhausted();
}

#[test]
fn test_import_then_refresh() {
    let transport = ScriptedTransport::new().then_json(
        Method::Get,
        "metadata/workflow/w1",
        200,
        json!({"name": "w1", "version": 7, "description": "from server", "schemaVersion": 2}),
    );

    let result = apply_engine_command(
        EngineCommand::Import {
            kind: ResourceKind::WorkflowDef,
            name: "w1".to_string(),
        },
        &transport,
    )
    .unwrap();

    assert_eq!(
        result,
        EngineCommandResult::Imported(Some(tracked(
            json!({"name": "w1", "description": "from server"}),
            Some(7)
        )))
    );
}

#[test]
fn test_refresh_of_gone_definition() {
    let transport = ScriptedTransport::new().then(Method::Get, "metadata/taskdefs/t1", 404, "");
    let result = apply_engine_command(
        EngineCommand::Refresh {
            kind: ResourceKind::TaskDef,
            state: tracked(json!({"name": "t1"}), None),
        },
        &transport,
    )
    .unwrap();
    assert_eq!(result, EngineCommandResult::Refreshed(None));
}

#[test]
fn test_operations_emit_boundary_events() {
    let capture = init_test_capture();
    let transport = ScriptedTransport::new()
        .then(Method::Get, "metadata/workflow/w_logged", 404, "")
        .then(Method::Put, "metadata/workflow", 200, "");

    apply_engine_command(
        EngineCommand::Apply {
            kind: ResourceKind::WorkflowDef,
            desired: r#"{"name":"w_logged"}"#.to_string(),
            state: None,
        },
        &transport,
    )
    .unwrap();

    capture.assert_event_exists("workflowdef_create", EVENT_START);
    capture.assert_event_exists("workflowdef_create", EVENT_END);
    let starts: Vec<_> = capture
        .matching("workflowdef_create", EVENT_START)
        .into_iter()
        .filter(|e| e.field(FIELD_NAME) == Some("w_logged"))
        .collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field(FIELD_KIND), Some("workflowdef"));

    // AND the end event shares the start event's operation id
    let operation_id = starts[0].field(FIELD_OPERATION_ID).unwrap();
    let ends = capture.count_events(|e| {
        e.op() == Some("workflowdef_create")
            && e.event() == Some(EVENT_END)
            && e.field(FIELD_OPERATION_ID) == Some(operation_id)
    });
    assert_eq!(ends, 1);
}

#[test]
fn test_workflow_destroy_logs_each_deleted_version() {
    let capture = init_test_capture();
    let transport = ScriptedTransport::new()
        .then_json(Method::Get, "metadata/workflow/w_versions_logged", 200, json!({"name": "w_versions_logged", "version": 2}))
        .then(Method::Delete, "metadata/workflow/w_versions_logged/2", 200, "")
        .then_json(Method::Get, "metadata/workflow/w_versions_logged", 200, json!({"name": "w_versions_logged", "version": 1}))
        .then(Method::Delete, "metadata/workflow/w_versions_logged/1", 200, "")
        .then(Method::Get, "metadata/workflow/w_versions_logged", 404, "");

    apply_engine_command(
        EngineCommand::Destroy {
            kind: ResourceKind::WorkflowDef,
            state: tracked(json!({"name": "w_versions_logged"}), Some(2)),
        },
        &transport,
    )
    .unwrap();

    let versions: Vec<String> = capture
        .events()
        .into_iter()
        .filter(|e| e.field(FIELD_NAME) == Some("w_versions_logged"))
        .filter_map(|e| e.field(FIELD_VERSION).map(str::to_string))
        .collect();
    assert_eq!(versions, vec!["2", "1"]);
}

#[test]
fn test_failed_operation_emits_error_code() {
    let capture = init_test_capture();
    let transport = ScriptedTransport::new()
        .then(Method::Delete, "metadata/taskdefs/t_err_logged", 500, "")
        .then(Method::Get, "metadata/taskdefs/t_err_logged", 200, "{}");

    let result = apply_engine_command(
        EngineCommand::Destroy {
            kind: ResourceKind::TaskDef,
            state: tracked(json!({"name": "t_err_logged"}), None),
        },
        &transport,
    );
    assert!(result.is_err());

    let errors = capture.count_events(|e| {
        e.op() == Some("taskdef_delete")
            && e.event() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_REMOTE_HTTP")
    });
    assert!(errors >= 1);

    let rechecks = capture.count_events(|e| {
        e.event() == Some(EVENT_AMBIGUOUS_DELETE)
            && e.field("path") == Some("metadata/taskdefs/t_err_logged")
    });
    assert!(rechecks >= 1);
}
