//! Archive creation step.

use std::path::PathBuf;

use crate::config::Config;
use crate::step_traits::BorgArgs;

/// Archive name handed to borg when none is configured. The placeholder is
/// expanded by borg itself, so the timestamp-derived name is the tool's
/// choice, not ours.
pub const DEFAULT_ARCHIVE_NAME: &str = "{now}";

/// Arguments for `borg create`.
///
/// # Field to flag mapping
///
/// | Config field                 | Flag / positional      | Emitted when |
/// |------------------------------|------------------------|--------------|
/// | `archive_exclude_pattern`    | `--exclude`            | set          |
/// | `archive_exclude_caches`     | `--exclude-caches`     | true         |
/// | `archive_exclude_if_present` | `--exclude-if-present` | set          |
/// | `archive_keep_exclude_tags`  | `--keep-exclude-tags`  | true         |
/// | `archive_comment`            | `--comment`            | set          |
/// | `archive_name`               | positional NAME        | always (default `{now}`) |
/// | `archive_path`               | positional PATH...     | always       |
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub name: Option<String>,
    pub sources: Vec<PathBuf>,
    pub comment: Option<String>,
    pub exclude_pattern: Option<String>,
    pub exclude_caches: bool,
    pub exclude_if_present: Option<String>,
    pub keep_exclude_tags: bool,
}

impl CreateArgs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.archive_name.clone(),
            sources: config.archive_path.clone(),
            comment: config.archive_comment.clone(),
            exclude_pattern: config.archive_exclude_pattern.clone(),
            exclude_caches: config.archive_exclude_caches,
            exclude_if_present: config.archive_exclude_if_present.clone(),
            keep_exclude_tags: config.archive_keep_exclude_tags,
        }
    }
}

impl BorgArgs for CreateArgs {
    fn subcommand(&self) -> &'static str {
        "create"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(ref pattern) = self.exclude_pattern {
            args.push("--exclude".to_string());
            args.push(pattern.clone());
        }
        if self.exclude_caches {
            args.push("--exclude-caches".to_string());
        }
        if let Some(ref marker) = self.exclude_if_present {
            args.push("--exclude-if-present".to_string());
            args.push(marker.clone());
        }
        if self.keep_exclude_tags {
            args.push("--keep-exclude-tags".to_string());
        }
        if let Some(ref comment) = self.comment {
            args.push("--comment".to_string());
            args.push(comment.clone());
        }
        args.push(
            self.name
                .clone()
                .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string()),
        );
        for source in &self.sources {
            args.push(source.display().to_string());
        }
        args
    }
}
