//! Tests for the version gate against real subprocesses.
//!
//! Each test points the tool handle at a stub executable that emits a
//! controlled version line, then asserts the gate's verdict.

mod common;

use borgdrone::borg::BorgTool;
use borgdrone::error::DroneError;
use common::write_stub;

#[test]
fn test_version_gate_accepts_current_major() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg 2.0.1""#);

    let version = BorgTool::at(&stub).check_version().expect("2.x must pass");
    assert_eq!(version.version, "2.0.1");
    assert_eq!(version.major, 2);
}

#[test]
fn test_version_gate_accepts_newer_major() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg 3.1.0""#);

    let version = BorgTool::at(&stub).check_version().unwrap();
    assert_eq!(version.major, 3);
}

#[test]
fn test_version_gate_rejects_old_major() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg 1.9.0""#);

    let err = BorgTool::at(&stub).check_version().unwrap_err();
    match err {
        DroneError::IncompatibleVersion { found } => assert_eq!(found, "1.9.0"),
        other => panic!("expected IncompatibleVersion, got {other:?}"),
    }
}

#[test]
fn test_version_gate_rejects_missing_version_token() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg""#);

    assert!(matches!(
        BorgTool::at(&stub).check_version().unwrap_err(),
        DroneError::MalformedVersionOutput { .. }
    ));
}

#[test]
fn test_version_gate_rejects_non_numeric_major() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg x.y.z""#);

    assert!(matches!(
        BorgTool::at(&stub).check_version().unwrap_err(),
        DroneError::MalformedVersionOutput { .. }
    ));
}

#[test]
fn test_version_gate_rejects_failing_query() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "echo \"borg: unknown option\" >&2\nexit 1");

    assert!(matches!(
        BorgTool::at(&stub).check_version().unwrap_err(),
        DroneError::MalformedVersionOutput { .. }
    ));
}

#[test]
fn test_version_gate_ignores_trailing_detail() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), r#"echo "borg 2.1.3 (libacl enabled)""#);

    let version = BorgTool::at(&stub).check_version().unwrap();
    assert_eq!(version.version, "2.1.3");
}
