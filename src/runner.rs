//! Borg invocation gatekeeper.
//!
//! All lifecycle invocations go through [`run_borg`] so that every child
//! process gets the same treatment: repository identity and secrets injected
//! via the child environment (never argv), argv logged to the diagnostic
//! stream, stdout/stderr passed through untouched, and dry-run handled in
//! one place.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::info;

use crate::borg::BorgTool;
use crate::config::Config;
use crate::error::DroneError;
use crate::step_traits::BorgArgs;

/// Whether invocations actually spawn or are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Live,
    DryRun,
}

/// Repository identity and secrets, injected into every child environment.
///
/// The passphrase travels only here. When both a literal passphrase and a
/// passphrase file are configured, the literal wins; the file is handed to
/// borg as a passphrase command so the secret itself never crosses our
/// process.
#[derive(Debug, Clone)]
pub struct RepoAccess {
    pub repo_path: PathBuf,
    pub key_file: PathBuf,
    pub passphrase: Option<String>,
    pub passphrase_file: Option<PathBuf>,
}

impl RepoAccess {
    pub fn from_config(config: &Config) -> Self {
        Self {
            repo_path: config.repo_path.clone(),
            key_file: config.repo_key_file.clone(),
            passphrase: config.repo_passphrase.clone(),
            passphrase_file: config.repo_passphrase_file.clone(),
        }
    }

    /// Child environment for repository access.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            ("BORG_REPO".to_string(), self.repo_path.display().to_string()),
            (
                "BORG_KEY_FILE".to_string(),
                self.key_file.display().to_string(),
            ),
        ];
        if let Some(ref passphrase) = self.passphrase {
            vars.push(("BORG_PASSPHRASE".to_string(), passphrase.clone()));
        } else if let Some(ref file) = self.passphrase_file {
            vars.push((
                "BORG_PASSCOMMAND".to_string(),
                format!("cat {}", file.display()),
            ));
        }
        vars
    }
}

/// Result of one borg invocation.
#[derive(Debug, Clone)]
pub struct BorgOutput {
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the invocation exited successfully.
    pub success: bool,
    /// True when the invocation was only logged, not spawned.
    pub dry_run: bool,
}

impl BorgOutput {
    /// Convert a failed invocation into the fatal step error.
    pub fn ensure_success(&self, step: &str) -> Result<()> {
        if self.success {
            return Ok(());
        }
        let status = match self.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        };
        Err(DroneError::step_failure(step, status).into())
    }
}

/// Execute one typed borg invocation.
///
/// The child inherits our stdout and stderr so borg's own output passes
/// through; our diagnostics go to the tracing subscriber on stderr. Blocks
/// until the subprocess terminates; a hang in the tool hangs the run.
pub fn run_borg<T: BorgArgs>(
    tool: &BorgTool,
    access: &RepoAccess,
    args: &T,
    mode: ExecMode,
) -> Result<BorgOutput> {
    let subcommand = args.subcommand();
    let cli_args = args.to_cli_args();

    // Secrets live in the child environment only; this line is safe to log.
    if cli_args.is_empty() {
        info!("borg {subcommand}");
    } else {
        info!("borg {} {}", subcommand, cli_args.join(" "));
    }

    if mode == ExecMode::DryRun {
        info!("dry-run: skipping borg {subcommand}");
        return Ok(BorgOutput {
            exit_code: Some(0),
            success: true,
            dry_run: true,
        });
    }

    let mut cmd = Command::new(tool.executable());
    cmd.arg(subcommand).args(&cli_args);
    for (key, value) in access.env_vars() {
        cmd.env(key, value);
    }
    for (key, value) in args.env_vars() {
        cmd.env(key, value);
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn borg {subcommand}"))?;

    Ok(BorgOutput {
        exit_code: status.code(),
        success: status.success(),
        dry_run: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access() -> RepoAccess {
        RepoAccess {
            repo_path: PathBuf::from("/backups/repo"),
            key_file: PathBuf::from("/keys"),
            passphrase: None,
            passphrase_file: None,
        }
    }

    #[test]
    fn test_env_vars_always_carry_repo_and_key_file() {
        let vars = access().env_vars();
        assert!(vars.contains(&("BORG_REPO".to_string(), "/backups/repo".to_string())));
        assert!(vars.contains(&("BORG_KEY_FILE".to_string(), "/keys".to_string())));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_passphrase_env() {
        let mut access = access();
        access.passphrase = Some("hunter2".to_string());
        let vars = access.env_vars();
        assert!(vars.contains(&("BORG_PASSPHRASE".to_string(), "hunter2".to_string())));
        assert!(!vars.iter().any(|(k, _)| k == "BORG_PASSCOMMAND"));
    }

    #[test]
    fn test_passphrase_file_becomes_passcommand() {
        let mut access = access();
        access.passphrase_file = Some(PathBuf::from("/secrets/borg"));
        let vars = access.env_vars();
        assert!(vars.contains(&(
            "BORG_PASSCOMMAND".to_string(),
            "cat /secrets/borg".to_string()
        )));
    }

    #[test]
    fn test_literal_passphrase_wins_over_file() {
        let mut access = access();
        access.passphrase = Some("hunter2".to_string());
        access.passphrase_file = Some(PathBuf::from("/secrets/borg"));
        let vars = access.env_vars();
        assert!(vars.iter().any(|(k, _)| k == "BORG_PASSPHRASE"));
        assert!(!vars.iter().any(|(k, _)| k == "BORG_PASSCOMMAND"));
    }

    #[test]
    fn test_ensure_success_failure_names_step_and_code() {
        let output = BorgOutput {
            exit_code: Some(2),
            success: false,
            dry_run: false,
        };
        let err = output.ensure_success("create").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("create"));
        assert!(msg.contains("exit code 2"));
    }

    #[test]
    fn test_ensure_success_signal_termination() {
        let output = BorgOutput {
            exit_code: None,
            success: false,
            dry_run: false,
        };
        let err = output.ensure_success("check").unwrap_err();
        assert!(format!("{err}").contains("signal"));
    }

    #[test]
    fn test_dry_run_never_spawns() {
        use crate::steps::repo::CheckArgs;
        // A nonexistent executable would fail to spawn in live mode.
        let tool = BorgTool::at("/nonexistent/borg");
        let output = run_borg(&tool, &access(), &CheckArgs, ExecMode::DryRun).unwrap();
        assert!(output.dry_run);
        assert!(output.success);
    }
}
