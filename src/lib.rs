//! borgdrone library
//!
//! Drives an external BorgBackup 2 executable through a fixed backup
//! lifecycle, configured entirely from `BORGDRONE_*` environment variables:
//! version gate, configuration materialization, then the ordered sequence of
//! init, create, prune, compact and check invocations with fail-fast
//! semantics.

pub mod borg;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod orchestrator;
pub mod runner;
pub mod step_traits;
pub mod steps;

// Re-export main types for convenience
pub use borg::{BorgTool, BorgVersion};
pub use cli::{Cli, Commands};
pub use config::{Config, ParamKind, ParamSpec, Requirement, ENV_PREFIX, PARAMETERS};
pub use environment::EnvSnapshot;
pub use error::{DroneError, Result, MIN_BORG_MAJOR};
pub use orchestrator::{run_lifecycle, Step};
pub use runner::{run_borg, BorgOutput, ExecMode, RepoAccess};
pub use step_traits::BorgArgs;
pub use steps::archive::{CreateArgs, DEFAULT_ARCHIVE_NAME};
pub use steps::prune::PruneArgs;
pub use steps::repo::{CheckArgs, CompactArgs, InitArgs};
