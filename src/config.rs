//! Configuration materialization
//!
//! Every run is configured through a fixed namespace of `BORGDRONE_*`
//! environment variables. The [`PARAMETERS`] table is the single source of
//! truth for the namespace: one entry per variable with its semantic type
//! and required-or-default policy. [`Config::build`] materializes the typed,
//! immutable [`Config`] from an [`EnvSnapshot`], failing fast on the first
//! missing required parameter or uncoercible value. Loading touches nothing
//! but the snapshot: no filesystem, no network.

use std::path::PathBuf;
use std::time::Duration;

use crate::environment::EnvSnapshot;
use crate::error::{DroneError, Result};

/// Fixed prefix of the configuration namespace.
pub const ENV_PREFIX: &str = "BORGDRONE_";

/// Environment variable names, one const per configuration field.
///
/// Both the parameter table and the loader reference these consts, so a
/// lookup against a name the table does not declare cannot compile unnoticed.
pub mod vars {
    pub const REPO_PATH: &str = "BORGDRONE_REPO_PATH";
    pub const REPO_KEY_FILE: &str = "BORGDRONE_REPO_KEY_FILE";
    pub const REPO_PASSPHRASE: &str = "BORGDRONE_REPO_PASSPHRASE";
    pub const REPO_PASSPHRASE_FILE: &str = "BORGDRONE_REPO_PASSPHRASE_FILE";

    pub const REPO_INIT: &str = "BORGDRONE_REPO_INIT";
    pub const REPO_INIT_APPEND_ONLY: &str = "BORGDRONE_REPO_INIT_APPEND_ONLY";
    pub const REPO_INIT_QUOTA: &str = "BORGDRONE_REPO_INIT_QUOTA";
    pub const REPO_INIT_ENCRYPTION: &str = "BORGDRONE_REPO_INIT_ENCRYPTION";
    pub const REPO_INIT_OVERWRITE_KEY: &str = "BORGDRONE_REPO_INIT_OVERWRITE_KEY";

    pub const ARCHIVE_PATH: &str = "BORGDRONE_ARCHIVE_PATH";
    pub const ARCHIVE_NAME: &str = "BORGDRONE_ARCHIVE_NAME";
    pub const ARCHIVE_COMMENT: &str = "BORGDRONE_ARCHIVE_COMMENT";
    pub const ARCHIVE_EXCLUDE_PATTERN: &str = "BORGDRONE_ARCHIVE_EXCLUDE_PATTERN";
    pub const ARCHIVE_EXCLUDE_CACHES: &str = "BORGDRONE_ARCHIVE_EXCLUDE_CACHES";
    pub const ARCHIVE_EXCLUDE_IF_PRESENT: &str = "BORGDRONE_ARCHIVE_EXCLUDE_IF_PRESENT";
    pub const ARCHIVE_KEEP_EXCLUDE_TAGS: &str = "BORGDRONE_ARCHIVE_KEEP_EXCLUDE_TAGS";

    pub const CHECK: &str = "BORGDRONE_CHECK";
    pub const COMPACT: &str = "BORGDRONE_COMPACT";
    pub const PRUNE: &str = "BORGDRONE_PRUNE";

    pub const PRUNE_INTERVAL: &str = "BORGDRONE_PRUNE_INTERVAL";
    pub const PRUNE_SECONDLY: &str = "BORGDRONE_PRUNE_SECONDLY";
    pub const PRUNE_MINUTELY: &str = "BORGDRONE_PRUNE_MINUTELY";
    pub const PRUNE_HOURLY: &str = "BORGDRONE_PRUNE_HOURLY";
    pub const PRUNE_DAILY: &str = "BORGDRONE_PRUNE_DAILY";
    pub const PRUNE_WEEKLY: &str = "BORGDRONE_PRUNE_WEEKLY";
    pub const PRUNE_MONTHLY: &str = "BORGDRONE_PRUNE_MONTHLY";
    pub const PRUNE_YEARLY: &str = "BORGDRONE_PRUNE_YEARLY";

    /// Not a `Config` field: overrides borg executable resolution.
    pub const BORG_BIN: &str = "BORGDRONE_BORG_BIN";
}

/// Semantic type of a configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Integer,
    DurationSeconds,
    Path,
    PathList,
    String,
}

/// Whether a parameter must be present, and what happens when it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    /// Absent means the given default, rendered as the user would write it.
    Defaulted(&'static str),
    /// Absent means "not configured"; no flag is emitted downstream.
    Optional,
}

/// One row of the parameter namespace.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub var: &'static str,
    pub kind: ParamKind,
    pub requirement: Requirement,
}

/// The full `BORGDRONE_*` namespace. Auditable in one place; also the
/// known-name registry behind [`Config::unknown_variables`].
pub const PARAMETERS: &[ParamSpec] = &[
    ParamSpec { var: vars::REPO_PATH, kind: ParamKind::Path, requirement: Requirement::Required },
    ParamSpec { var: vars::REPO_KEY_FILE, kind: ParamKind::Path, requirement: Requirement::Defaulted("/keys") },
    ParamSpec { var: vars::REPO_PASSPHRASE, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::REPO_PASSPHRASE_FILE, kind: ParamKind::Path, requirement: Requirement::Optional },
    ParamSpec { var: vars::REPO_INIT, kind: ParamKind::Bool, requirement: Requirement::Defaulted("true") },
    ParamSpec { var: vars::REPO_INIT_APPEND_ONLY, kind: ParamKind::Bool, requirement: Requirement::Defaulted("false") },
    ParamSpec { var: vars::REPO_INIT_QUOTA, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::REPO_INIT_ENCRYPTION, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::REPO_INIT_OVERWRITE_KEY, kind: ParamKind::Bool, requirement: Requirement::Defaulted("false") },
    ParamSpec { var: vars::ARCHIVE_PATH, kind: ParamKind::PathList, requirement: Requirement::Required },
    ParamSpec { var: vars::ARCHIVE_NAME, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::ARCHIVE_COMMENT, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::ARCHIVE_EXCLUDE_PATTERN, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::ARCHIVE_EXCLUDE_CACHES, kind: ParamKind::Bool, requirement: Requirement::Defaulted("false") },
    ParamSpec { var: vars::ARCHIVE_EXCLUDE_IF_PRESENT, kind: ParamKind::String, requirement: Requirement::Optional },
    ParamSpec { var: vars::ARCHIVE_KEEP_EXCLUDE_TAGS, kind: ParamKind::Bool, requirement: Requirement::Defaulted("false") },
    ParamSpec { var: vars::CHECK, kind: ParamKind::Bool, requirement: Requirement::Defaulted("true") },
    ParamSpec { var: vars::COMPACT, kind: ParamKind::Bool, requirement: Requirement::Defaulted("true") },
    ParamSpec { var: vars::PRUNE, kind: ParamKind::Bool, requirement: Requirement::Defaulted("false") },
    ParamSpec { var: vars::PRUNE_INTERVAL, kind: ParamKind::DurationSeconds, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_SECONDLY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_MINUTELY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_HOURLY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_DAILY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_WEEKLY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_MONTHLY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::PRUNE_YEARLY, kind: ParamKind::Integer, requirement: Requirement::Optional },
    ParamSpec { var: vars::BORG_BIN, kind: ParamKind::Path, requirement: Requirement::Optional },
];

/// Complete configuration for one run. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Config {
    // Repository identity and access
    pub repo_path: PathBuf,
    pub repo_key_file: PathBuf,
    pub repo_passphrase: Option<String>,
    pub repo_passphrase_file: Option<PathBuf>,

    // Repository initialization
    pub repo_init: bool,
    pub repo_init_append_only: bool,
    pub repo_init_quota: Option<String>,
    pub repo_init_encryption: Option<String>,
    pub repo_init_overwrite_key: bool,

    // Archive source and metadata
    pub archive_path: Vec<PathBuf>,
    pub archive_name: Option<String>,
    pub archive_comment: Option<String>,

    // Archive filtering
    pub archive_exclude_pattern: Option<String>,
    pub archive_exclude_caches: bool,
    pub archive_exclude_if_present: Option<String>,
    pub archive_keep_exclude_tags: bool,

    // Lifecycle toggles
    pub check: bool,
    pub compact: bool,
    pub prune: bool,

    // Pruning retention
    pub prune_interval: Option<Duration>,
    pub prune_secondly: Option<u32>,
    pub prune_minutely: Option<u32>,
    pub prune_hourly: Option<u32>,
    pub prune_daily: Option<u32>,
    pub prune_weekly: Option<u32>,
    pub prune_monthly: Option<u32>,
    pub prune_yearly: Option<u32>,
}

impl Config {
    /// Materialize the configuration from an environment snapshot.
    ///
    /// Total apart from reading the snapshot. Fails with
    /// [`DroneError::MissingParameter`] for an absent required variable and
    /// [`DroneError::InvalidValue`] for a present value that does not coerce.
    pub fn build(env: &EnvSnapshot) -> Result<Self> {
        Ok(Self {
            repo_path: required_path(env, vars::REPO_PATH)?,
            repo_key_file: path_or(env, vars::REPO_KEY_FILE, "/keys"),
            repo_passphrase: opt_string(env, vars::REPO_PASSPHRASE),
            repo_passphrase_file: opt_path(env, vars::REPO_PASSPHRASE_FILE),

            repo_init: bool_or(env, vars::REPO_INIT, true)?,
            repo_init_append_only: bool_or(env, vars::REPO_INIT_APPEND_ONLY, false)?,
            repo_init_quota: opt_string(env, vars::REPO_INIT_QUOTA),
            repo_init_encryption: opt_string(env, vars::REPO_INIT_ENCRYPTION),
            repo_init_overwrite_key: bool_or(env, vars::REPO_INIT_OVERWRITE_KEY, false)?,

            archive_path: required_path_list(env, vars::ARCHIVE_PATH)?,
            archive_name: opt_string(env, vars::ARCHIVE_NAME),
            archive_comment: opt_string(env, vars::ARCHIVE_COMMENT),

            archive_exclude_pattern: opt_string(env, vars::ARCHIVE_EXCLUDE_PATTERN),
            archive_exclude_caches: bool_or(env, vars::ARCHIVE_EXCLUDE_CACHES, false)?,
            archive_exclude_if_present: opt_string(env, vars::ARCHIVE_EXCLUDE_IF_PRESENT),
            archive_keep_exclude_tags: bool_or(env, vars::ARCHIVE_KEEP_EXCLUDE_TAGS, false)?,

            check: bool_or(env, vars::CHECK, true)?,
            compact: bool_or(env, vars::COMPACT, true)?,
            prune: bool_or(env, vars::PRUNE, false)?,

            prune_interval: opt_duration_secs(env, vars::PRUNE_INTERVAL)?,
            prune_secondly: opt_u32(env, vars::PRUNE_SECONDLY)?,
            prune_minutely: opt_u32(env, vars::PRUNE_MINUTELY)?,
            prune_hourly: opt_u32(env, vars::PRUNE_HOURLY)?,
            prune_daily: opt_u32(env, vars::PRUNE_DAILY)?,
            prune_weekly: opt_u32(env, vars::PRUNE_WEEKLY)?,
            prune_monthly: opt_u32(env, vars::PRUNE_MONTHLY)?,
            prune_yearly: opt_u32(env, vars::PRUNE_YEARLY)?,
        })
    }

    /// `BORGDRONE_*` variables present in the snapshot but absent from the
    /// parameter table. Reported as warnings by the callers; a typo in a
    /// variable name should never silently configure nothing.
    pub fn unknown_variables(env: &EnvSnapshot) -> Vec<String> {
        let mut unknown: Vec<String> = env
            .names_with_prefix(ENV_PREFIX)
            .filter(|name| !PARAMETERS.iter().any(|spec| spec.var == *name))
            .map(str::to_string)
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// Coerce a raw boolean token. Only the two case-insensitive literals are
/// accepted; anything else is a hard validation error, never a silent false.
pub fn parse_bool(variable: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DroneError::InvalidValue {
            variable,
            value: value.to_string(),
            expected: "one of: 'true', 'false'",
        }),
    }
}

/// Coerce a raw base-10 integer token.
pub fn parse_u32(variable: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| DroneError::InvalidValue {
        variable,
        value: value.to_string(),
        expected: "a base-10 integer",
    })
}

/// Coerce a raw token holding a whole number of seconds.
pub fn parse_duration_secs(variable: &'static str, value: &str) -> Result<Duration> {
    let secs: u64 = value.trim().parse().map_err(|_| DroneError::InvalidValue {
        variable,
        value: value.to_string(),
        expected: "a whole number of seconds",
    })?;
    Ok(Duration::from_secs(secs))
}

/// Split a comma-separated path list: trim whitespace, drop empty segments,
/// preserve order.
pub fn parse_path_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn bool_or(env: &EnvSnapshot, variable: &'static str, default: bool) -> Result<bool> {
    match env.get(variable) {
        Some(raw) => parse_bool(variable, raw),
        None => Ok(default),
    }
}

fn opt_u32(env: &EnvSnapshot, variable: &'static str) -> Result<Option<u32>> {
    env.get(variable)
        .map(|raw| parse_u32(variable, raw))
        .transpose()
}

fn opt_duration_secs(env: &EnvSnapshot, variable: &'static str) -> Result<Option<Duration>> {
    env.get(variable)
        .map(|raw| parse_duration_secs(variable, raw))
        .transpose()
}

fn opt_string(env: &EnvSnapshot, variable: &'static str) -> Option<String> {
    env.get(variable).map(str::to_string)
}

fn opt_path(env: &EnvSnapshot, variable: &'static str) -> Option<PathBuf> {
    env.get(variable).map(PathBuf::from)
}

fn path_or(env: &EnvSnapshot, variable: &'static str, default: &str) -> PathBuf {
    env.get(variable)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn required_path(env: &EnvSnapshot, variable: &'static str) -> Result<PathBuf> {
    env.get(variable)
        .map(PathBuf::from)
        .ok_or(DroneError::MissingParameter { variable })
}

fn required_path_list(env: &EnvSnapshot, variable: &'static str) -> Result<Vec<PathBuf>> {
    let raw = env
        .get(variable)
        .ok_or(DroneError::MissingParameter { variable })?;
    let paths = parse_path_list(raw);
    if paths.is_empty() {
        return Err(DroneError::InvalidValue {
            variable,
            value: raw.to_string(),
            expected: "a non-empty comma-separated list of paths",
        });
    }
    Ok(paths)
}
