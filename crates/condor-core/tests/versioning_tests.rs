#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{local_workflow, manifest, server_workflow};
use condor_core::errors::{ConductorError, ExError, ExErrorKind};
use condor_core::{DeleteCursor, Reconciler, VersionMode, VersionState};
use condor_core_types::ResourceKind;
use serde_json::json;

fn reconciler() -> Reconciler {
    Reconciler::for_kind(ResourceKind::WorkflowDef)
}

#[test]
fn test_scenario_b_auto_create_adopts_identical_server_version() {
    // GIVEN the server already holds w1 at version 2
    let server = server_workflow("w1", 2);

    // AND the proposal matches it once defaults are elided
    let proposed = local_workflow("w1");
    let mode = VersionMode::of(&proposed).unwrap();
    assert_eq!(mode, VersionMode::Auto);

    // WHEN the create is decided
    let decision = VersionState::create(&reconciler(), "w1", mode, &proposed, Some(&server)).unwrap();

    // THEN nothing is written and version 2 is tracked
    assert!(!decision.write);
    assert_eq!(decision.state, VersionState::AutoVersioned(2));
}

#[test]
fn test_auto_create_with_drift_writes_next_version() {
    let server = server_workflow("w1", 2);
    let mut proposed = local_workflow("w1");
    proposed.insert("description".to_string(), json!("changed"));

    let decision =
        VersionState::create(&reconciler(), "w1", VersionMode::Auto, &proposed, Some(&server)).unwrap();

    assert!(decision.write);
    assert_eq!(decision.version(), 3);
}

#[test]
fn test_scenario_c_manual_update_below_server_latest_conflicts() {
    // GIVEN w1 tracked manually at version 3, which is also the server's latest
    let tracked = VersionState::ManualVersioned(3);

    // WHEN an update requests version 1
    let proposed = manifest(json!({"name": "w1", "version": 1}));
    let mode = VersionMode::of(&proposed).unwrap();
    let err = tracked.update("w1", mode, Some(3)).unwrap_err();

    // THEN it is rejected with both versions reported
    match &err {
        ConductorError::VersionConflict {
            name,
            requested,
            current,
        } => {
            assert_eq!(name, "w1");
            assert_eq!(*requested, 1);
            assert_eq!(*current, 3);
        }
        other => panic!("expected VersionConflict, got {:?}", other),
    }

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::VersionConflict);
    assert_eq!(ex.code(), "ERR_VERSION_CONFLICT");
}

#[test]
fn test_manual_create_below_server_latest_conflicts() {
    let server = server_workflow("w1", 5);
    let proposed = manifest(json!({"name": "w1", "version": 4}));
    let err = VersionState::create(&reconciler(), "w1", VersionMode::Manual(4), &proposed, Some(&server))
        .unwrap_err();
    assert!(matches!(err, ConductorError::VersionConflict { current: 5, .. }));
}

#[test]
fn test_manual_create_same_version_with_drift_overwrites() {
    let server = server_workflow("w1", 3);
    let mut proposed = local_workflow("w1");
    proposed.insert("version".to_string(), json!(3));
    proposed.insert("description".to_string(), json!("new"));

    let decision =
        VersionState::create(&reconciler(), "w1", VersionMode::Manual(3), &proposed, Some(&server)).unwrap();
    assert!(decision.write);
    assert_eq!(decision.state, VersionState::ManualVersioned(3));
}

#[test]
fn test_manual_update_against_vanished_workflow_is_accepted() {
    let next = VersionState::ManualVersioned(2)
        .update("w1", VersionMode::Manual(7), None)
        .unwrap();
    assert_eq!(next, VersionState::ManualVersioned(7));
}

#[test]
fn test_auto_updates_are_strictly_increasing() {
    let mut state = VersionState::NoVersion;
    let mut seen = Vec::new();
    for _ in 0..5 {
        state = state.update("w1", VersionMode::Auto, None).unwrap();
        seen.push(state.version().unwrap());
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_mixed_mode_switch_is_not_guarded() {
    // Switching from manual to auto continues from the tracked version;
    // nothing checks the server's latest, so a collision is possible.
    let tracked = VersionState::tracked(Some(4), VersionMode::Auto);
    let next = tracked.update("w1", VersionMode::Auto, None).unwrap();
    assert_eq!(next, VersionState::AutoVersioned(5));

    // And from auto to a lower manual version only the server check applies.
    let tracked = VersionState::tracked(Some(5), VersionMode::Manual(2));
    let next = tracked.update("w1", VersionMode::Manual(2), None).unwrap();
    assert_eq!(next, VersionState::ManualVersioned(2));
}

#[test]
fn test_scenario_d_delete_cursor_walks_down_then_stops() {
    // GIVEN server versions {1,2,3}
    let mut cursor = DeleteCursor::new("w1");
    let mut latest_after_each_delete = vec![Some(3), Some(2), Some(1), None].into_iter();

    // WHEN the cursor is fed the latest version until the name is gone
    let mut deleted = Vec::new();
    while let Some(v) = cursor.advance(latest_after_each_delete.next().unwrap()).unwrap() {
        deleted.push(v);
    }

    // THEN versions were deleted newest first
    assert_eq!(deleted, vec![3, 2, 1]);
    assert_eq!(cursor.deleted(), &[3, 2, 1]);
}

#[test]
fn test_delete_cursor_stalls_on_repeated_version() {
    let mut cursor = DeleteCursor::new("w1");
    assert_eq!(cursor.advance(Some(2)).unwrap(), Some(2));

    let err = cursor.advance(Some(2)).unwrap_err();
    assert!(matches!(err, ConductorError::DeleteStalled { version: 2, .. }));
}
