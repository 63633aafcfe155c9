//! Repository-level steps: initialization, compaction, consistency check.

use crate::config::Config;
use crate::step_traits::BorgArgs;

/// Arguments for `borg repo-create`.
///
/// # Field to flag mapping
///
/// | Config field              | Flag              | Emitted when |
/// |---------------------------|-------------------|--------------|
/// | `repo_init_encryption`    | `--encryption`    | set          |
/// | `repo_init_append_only`   | `--append-only`   | true         |
/// | `repo_init_quota`         | `--storage-quota` | set          |
/// | `repo_init_overwrite_key` | `--overwrite-key` | true         |
#[derive(Debug, Clone)]
pub struct InitArgs {
    pub append_only: bool,
    pub quota: Option<String>,
    pub encryption: Option<String>,
    pub overwrite_key: bool,
}

impl InitArgs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            append_only: config.repo_init_append_only,
            quota: config.repo_init_quota.clone(),
            encryption: config.repo_init_encryption.clone(),
            overwrite_key: config.repo_init_overwrite_key,
        }
    }
}

impl BorgArgs for InitArgs {
    fn subcommand(&self) -> &'static str {
        "repo-create"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(ref encryption) = self.encryption {
            args.push("--encryption".to_string());
            args.push(encryption.clone());
        }
        if self.append_only {
            args.push("--append-only".to_string());
        }
        if let Some(ref quota) = self.quota {
            args.push("--storage-quota".to_string());
            args.push(quota.clone());
        }
        if self.overwrite_key {
            args.push("--overwrite-key".to_string());
        }
        args
    }
}

/// Arguments for `borg compact`. The repository comes from the injected
/// environment; the subcommand itself takes no options we set.
#[derive(Debug, Clone, Default)]
pub struct CompactArgs;

impl BorgArgs for CompactArgs {
    fn subcommand(&self) -> &'static str {
        "compact"
    }

    fn to_cli_args(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Arguments for `borg check`.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs;

impl BorgArgs for CheckArgs {
    fn subcommand(&self) -> &'static str {
        "check"
    }

    fn to_cli_args(&self) -> Vec<String> {
        Vec::new()
    }
}
