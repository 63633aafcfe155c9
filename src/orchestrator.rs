//! Lifecycle orchestration.
//!
//! A strictly ordered, conditionally skipped sequence of borg invocations.
//! Transitions only move forward; there are no retries and no compensation.
//! The first failing enabled step aborts the remainder of the run.

use anyhow::Result;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info};

use crate::borg::BorgTool;
use crate::config::Config;
use crate::runner::{run_borg, ExecMode, RepoAccess};
use crate::step_traits::BorgArgs;
use crate::steps::archive::CreateArgs;
use crate::steps::prune::PruneArgs;
use crate::steps::repo::{CheckArgs, CompactArgs, InitArgs};

/// Lifecycle steps in execution order. The version gate and configuration
/// build precede these and are handled by the entry point; by the time the
/// lifecycle runs, both have already passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    Init,
    Create,
    Prune,
    Compact,
    Check,
}

impl Step {
    /// Whether the configuration enables this step. Create always runs.
    pub fn enabled(self, config: &Config) -> bool {
        match self {
            Step::Init => config.repo_init,
            Step::Create => true,
            Step::Prune => config.prune,
            Step::Compact => config.compact,
            Step::Check => config.check,
        }
    }
}

/// Run every enabled lifecycle step in order, fail-fast.
pub fn run_lifecycle(tool: &BorgTool, config: &Config, mode: ExecMode) -> Result<()> {
    let access = RepoAccess::from_config(config);

    for step in Step::iter() {
        if !step.enabled(config) {
            debug!("skipping disabled step: {step}");
            continue;
        }
        info!("running step: {step}");
        match step {
            Step::Init => exec_step(tool, &access, &InitArgs::from_config(config), mode)?,
            Step::Create => exec_step(tool, &access, &CreateArgs::from_config(config), mode)?,
            Step::Prune => exec_step(tool, &access, &PruneArgs::from_config(config), mode)?,
            Step::Compact => exec_step(tool, &access, &CompactArgs, mode)?,
            Step::Check => exec_step(tool, &access, &CheckArgs, mode)?,
        }
    }

    info!("all enabled steps completed");
    Ok(())
}

fn exec_step<T: BorgArgs>(
    tool: &BorgTool,
    access: &RepoAccess,
    args: &T,
    mode: ExecMode,
) -> Result<()> {
    run_borg(tool, access, args, mode)?.ensure_success(args.subcommand())
}
