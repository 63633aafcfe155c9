//! Borg executable resolution and the version gate
//!
//! Pre-flight only: locate the external tool and refuse to orchestrate
//! anything against an unsupported major version. All other borg knowledge
//! (subcommand argv construction, execution) lives in `steps` and `runner`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::config::vars;
use crate::environment::EnvSnapshot;
use crate::error::{DroneError, Result, MIN_BORG_MAJOR};

/// Handle on the resolved borg executable.
#[derive(Debug, Clone)]
pub struct BorgTool {
    executable: PathBuf,
}

/// Parsed result of the version query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorgVersion {
    /// Version string as reported, e.g. "2.0.1".
    pub version: String,
    /// Leading component of the version string.
    pub major: u32,
}

impl std::fmt::Display for BorgVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl BorgTool {
    /// Resolve the borg executable.
    ///
    /// `BORGDRONE_BORG_BIN` takes precedence; otherwise the name `borg` is
    /// looked up on `PATH` via `which`.
    pub fn resolve(env: &EnvSnapshot) -> Result<Self> {
        if let Some(path) = env.get(vars::BORG_BIN) {
            return Ok(Self {
                executable: PathBuf::from(path),
            });
        }

        let output = Command::new("which")
            .arg("borg")
            .output()
            .map_err(|err| DroneError::tool_not_found(format!("failed to run 'which': {err}")))?;

        if !output.status.success() {
            return Err(DroneError::tool_not_found(format!(
                "no 'borg' in PATH (set {} to override)",
                vars::BORG_BIN
            )));
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            return Err(DroneError::tool_not_found("'which borg' returned nothing"));
        }

        Ok(Self {
            executable: PathBuf::from(path),
        })
    }

    /// Build a handle on an explicit executable path, bypassing resolution.
    pub fn at(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Enforce the minimum supported borg major version.
    ///
    /// Queries `borg --version` and parses its single-line output as
    /// `<name> <version> ...`. A major version below the floor, or output we
    /// cannot parse, is fatal; orchestration must not proceed past either.
    pub fn check_version(&self) -> Result<BorgVersion> {
        let output = Command::new(&self.executable).arg("--version").output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(DroneError::MalformedVersionOutput {
                output: if stderr.is_empty() {
                    format!("version query exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        let line = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let version = parse_version_line(&line)?;

        if version.major < MIN_BORG_MAJOR {
            return Err(DroneError::IncompatibleVersion {
                found: version.version,
            });
        }

        info!(
            "Using BorgBackup {} from {}",
            version,
            self.executable.display()
        );
        Ok(version)
    }
}

/// Parse `<name> <version> ...`: the token after the first whitespace run is
/// the version; its leading dot-separated component is the major version.
fn parse_version_line(line: &str) -> Result<BorgVersion> {
    let malformed = || DroneError::MalformedVersionOutput {
        output: line.to_string(),
    };

    let version = line.split_whitespace().nth(1).ok_or_else(malformed)?;
    let major = version
        .split('.')
        .next()
        .ok_or_else(malformed)?
        .parse::<u32>()
        .map_err(|_| malformed())?;

    Ok(BorgVersion {
        version: version.to_string(),
        major,
    })
}
