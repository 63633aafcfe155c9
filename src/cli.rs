use clap::{Parser, Subcommand};

/// borgdrone - configuration-driven lifecycle orchestration for BorgBackup 2
#[derive(Parser)]
#[command(name = "borgdrone")]
#[command(about = "Drives BorgBackup 2 through init, create, prune, compact and check")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: sequence all enabled steps and log each planned borg
    /// invocation without executing it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full backup lifecycle (the default when no subcommand is given)
    Run,
    /// Verify the tool version and report the resolved configuration without
    /// running any lifecycle step
    Validate,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the full lifecycle)
        let result = Cli::try_parse_from(["borgdrone"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_run_subcommand() {
        let result = Cli::try_parse_from(["borgdrone", "run"]);
        assert!(result.is_ok());
        assert!(matches!(result.unwrap().command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_validate_subcommand() {
        let result = Cli::try_parse_from(["borgdrone", "validate"]);
        assert!(result.is_ok());
        assert!(matches!(result.unwrap().command, Some(Commands::Validate)));
    }

    #[test]
    fn test_cli_dry_run_is_global() {
        let cli = Cli::try_parse_from(["borgdrone", "run", "--dry-run"]).unwrap();
        assert!(cli.dry_run);

        let cli = Cli::try_parse_from(["borgdrone", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["borgdrone", "backup"]).is_err());
    }
}
