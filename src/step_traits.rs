//! Type-safe borg invocation contracts.
//!
//! Instead of assembling raw string vectors at call sites, each lifecycle
//! step defines a struct implementing [`BorgArgs`]. The struct definition IS
//! the field-to-flag contract: a renamed flag or a forgotten option is a
//! compile-time or unit-test failure, not a runtime surprise against the
//! external tool.

/// Trait for typed borg subcommand arguments.
///
/// Implementors define the mapping between configuration fields and the
/// exact argv/environment the borg subcommand expects.
///
/// # Contract
///
/// - `subcommand()`: the borg subcommand name (e.g. "repo-create").
/// - `to_cli_args()`: flags and positionals exactly as borg expects them,
///   in order, after the subcommand.
/// - `env_vars()`: extra environment for this invocation only. Repository
///   identity and secrets are NOT emitted here; the runner injects them for
///   every invocation so they never appear in a loggable argv.
pub trait BorgArgs {
    /// The borg subcommand this invocation runs.
    fn subcommand(&self) -> &'static str;

    /// Flags and positionals following the subcommand.
    fn to_cli_args(&self) -> Vec<String>;

    /// Additional per-invocation environment variables.
    fn env_vars(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
