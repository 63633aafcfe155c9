//! borgdrone - main entry point
//!
//! Exit code contract: 0 when every enabled lifecycle step completed,
//! 1 on any fatal error (version gate, configuration, or step failure).

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use borgdrone::cli::{Cli, Commands};
use borgdrone::config::Config;
use borgdrone::environment::EnvSnapshot;
use borgdrone::orchestrator::{run_lifecycle, Step};
use borgdrone::runner::ExecMode;
use borgdrone::borg::{BorgTool, BorgVersion};

use strum::IntoEnumIterator;

/// Initialize the tracing subscriber: stderr only, compact format,
/// `RUST_LOG` override, `info` default. Standard output stays free for
/// pass-through of borg's own output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse_args();

    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            error!("FATAL: {err:#}");
            1
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let env = EnvSnapshot::from_process();

    for name in Config::unknown_variables(&env) {
        warn!("ignoring unknown configuration variable {name}");
    }

    // Pre-flight, in order: resolve the tool, gate on its version, then
    // materialize the configuration. Any failure stops the run here.
    let tool = BorgTool::resolve(&env)?;
    let version = tool.check_version()?;
    let config = Config::build(&env)?;

    let mode = if cli.dry_run {
        ExecMode::DryRun
    } else {
        ExecMode::Live
    };

    match cli.command {
        None | Some(Commands::Run) => run_lifecycle(&tool, &config, mode),
        Some(Commands::Validate) => {
            report_config(&tool, &version, &config);
            Ok(())
        }
    }
}

/// Human-readable resolved-settings report, written to the diagnostic
/// stream. Secrets are described, never printed.
fn report_config(tool: &BorgTool, version: &BorgVersion, config: &Config) {
    eprintln!("borg:        {} ({})", version, tool.executable().display());
    eprintln!("repository:  {}", config.repo_path.display());
    eprintln!("key file:    {}", config.repo_key_file.display());
    eprintln!("passphrase:  {}", describe_passphrase(config));
    eprintln!(
        "sources:     {}",
        config
            .archive_path
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    eprintln!(
        "archive:     {}",
        config.archive_name.as_deref().unwrap_or("(tool-derived)")
    );
    let enabled: Vec<String> = Step::iter()
        .filter(|step| step.enabled(config))
        .map(|step| step.to_string())
        .collect();
    eprintln!("steps:       {}", enabled.join(" -> "));
    info!("configuration OK");
}

fn describe_passphrase(config: &Config) -> String {
    if config.repo_passphrase.is_some() {
        "set (literal)".to_string()
    } else if let Some(ref file) = config.repo_passphrase_file {
        format!("set (file {})", file.display())
    } else {
        "unset".to_string()
    }
}
