//! Error handling for borgdrone
//!
//! Provides the central error type using thiserror. Every fatal condition in
//! a run maps to exactly one variant here; nothing is retried or recovered
//! internally, so every variant terminates the run with a non-zero exit code.

use thiserror::Error;

/// Minimum supported borg major version.
pub const MIN_BORG_MAJOR: u32 = 2;

/// Main error type for borgdrone
#[derive(Error, Debug)]
pub enum DroneError {
    /// IO errors (subprocess spawn/wait, pipe handling)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The borg executable could not be resolved
    #[error("borg executable not found: {detail}")]
    ToolNotFound { detail: String },

    /// The installed borg is older than the supported floor
    #[error("borgdrone requires BorgBackup version {MIN_BORG_MAJOR}.0 or higher, found {found}")]
    IncompatibleVersion { found: String },

    /// The version query produced output we could not parse
    #[error("could not parse borg version output {output:?}")]
    MalformedVersionOutput { output: String },

    /// A required configuration parameter is absent from the environment
    #[error("required configuration parameter {variable} not provided")]
    MissingParameter { variable: &'static str },

    /// A present configuration value failed type coercion
    #[error(
        "environment variable {variable} contains an unexpected value '{value}', expected {expected}"
    )]
    InvalidValue {
        variable: &'static str,
        value: String,
        expected: &'static str,
    },

    /// An enabled lifecycle step's invocation returned a failure status
    #[error("borg {step} failed with {status}")]
    StepFailure { step: String, status: String },
}

/// Result type alias for borgdrone operations
pub type Result<T> = std::result::Result<T, DroneError>;

impl DroneError {
    /// Create a tool-resolution error
    pub fn tool_not_found(detail: impl Into<String>) -> Self {
        Self::ToolNotFound {
            detail: detail.into(),
        }
    }

    /// Create a step-failure error
    pub fn step_failure(step: impl Into<String>, status: impl Into<String>) -> Self {
        Self::StepFailure {
            step: step.into(),
            status: status.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let err = DroneError::MissingParameter {
            variable: "BORGDRONE_REPO_PATH",
        };
        assert_eq!(
            err.to_string(),
            "required configuration parameter BORGDRONE_REPO_PATH not provided"
        );
    }

    #[test]
    fn test_invalid_value_names_variable_and_value() {
        let err = DroneError::InvalidValue {
            variable: "BORGDRONE_CHECK",
            value: "yes".to_string(),
            expected: "one of: 'true', 'false'",
        };
        let msg = err.to_string();
        assert!(msg.contains("BORGDRONE_CHECK"));
        assert!(msg.contains("'yes'"));
        assert!(msg.contains("'true', 'false'"));
    }

    #[test]
    fn test_incompatible_version_display() {
        let err = DroneError::IncompatibleVersion {
            found: "1.9.0".to_string(),
        };
        assert!(err.to_string().contains("2.0 or higher"));
        assert!(err.to_string().contains("1.9.0"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DroneError = io_err.into();
        assert!(matches!(err, DroneError::Io(_)));
    }
}
