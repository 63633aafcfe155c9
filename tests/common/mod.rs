//! Shared helpers for integration tests: stub borg executables.

// Each test target compiles this module separately and uses a subset.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable `borg` stub with the given shell body into `dir`.
pub fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("borg");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write stub");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("failed to chmod stub");
    path
}

/// A stub that appends its argv (one line per invocation) to `log` and
/// exits non-zero when the subcommand matches `fail_on` (empty: never).
pub fn logging_stub(dir: &Path, log: &Path, fail_on: &str) -> PathBuf {
    let body = format!(
        r#"if [ "$1" = "--version" ]; then
  echo "borg 2.0.1"
  exit 0
fi
echo "$@" >> "{log}"
if [ -n "{fail_on}" ] && [ "$1" = "{fail_on}" ]; then
  exit 2
fi
exit 0"#,
        log = log.display(),
        fail_on = fail_on,
    );
    write_stub(dir, &body)
}

/// Read the invocation log written by [`logging_stub`], one argv per line.
pub fn read_log(log: &Path) -> Vec<String> {
    if !log.exists() {
        return Vec::new();
    }
    fs::read_to_string(log)
        .expect("failed to read invocation log")
        .lines()
        .map(str::to_string)
        .collect()
}
