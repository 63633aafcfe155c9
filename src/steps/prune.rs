//! Pruning step.

use std::time::Duration;

use crate::config::Config;
use crate::step_traits::BorgArgs;

/// Arguments for `borg prune`.
///
/// Every retention bucket is independent. An unset bucket omits its flag
/// entirely; it is never passed as zero, which would mean "keep none" to the
/// tool rather than "no limit".
///
/// # Field to flag mapping
///
/// | Config field     | Flag              |
/// |------------------|-------------------|
/// | `prune_secondly` | `--keep-secondly` |
/// | `prune_minutely` | `--keep-minutely` |
/// | `prune_hourly`   | `--keep-hourly`   |
/// | `prune_daily`    | `--keep-daily`    |
/// | `prune_weekly`   | `--keep-weekly`   |
/// | `prune_monthly`  | `--keep-monthly`  |
/// | `prune_yearly`   | `--keep-yearly`   |
/// | `prune_interval` | `--keep-within` (seconds, `S` suffix) |
#[derive(Debug, Clone, Default)]
pub struct PruneArgs {
    pub secondly: Option<u32>,
    pub minutely: Option<u32>,
    pub hourly: Option<u32>,
    pub daily: Option<u32>,
    pub weekly: Option<u32>,
    pub monthly: Option<u32>,
    pub yearly: Option<u32>,
    pub within: Option<Duration>,
}

impl PruneArgs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secondly: config.prune_secondly,
            minutely: config.prune_minutely,
            hourly: config.prune_hourly,
            daily: config.prune_daily,
            weekly: config.prune_weekly,
            monthly: config.prune_monthly,
            yearly: config.prune_yearly,
            within: config.prune_interval,
        }
    }
}

impl BorgArgs for PruneArgs {
    fn subcommand(&self) -> &'static str {
        "prune"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let buckets = [
            ("--keep-secondly", self.secondly),
            ("--keep-minutely", self.minutely),
            ("--keep-hourly", self.hourly),
            ("--keep-daily", self.daily),
            ("--keep-weekly", self.weekly),
            ("--keep-monthly", self.monthly),
            ("--keep-yearly", self.yearly),
        ];

        let mut args = Vec::new();
        for (flag, count) in buckets {
            if let Some(count) = count {
                args.push(flag.to_string());
                args.push(count.to_string());
            }
        }
        if let Some(within) = self.within {
            args.push("--keep-within".to_string());
            args.push(format!("{}S", within.as_secs()));
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_args_empty_emits_no_flags() {
        assert!(PruneArgs::default().to_cli_args().is_empty());
    }

    #[test]
    fn test_unset_buckets_omitted_not_zeroed() {
        let args = PruneArgs {
            daily: Some(7),
            ..Default::default()
        };
        let argv = args.to_cli_args();
        assert_eq!(argv, vec!["--keep-daily", "7"]);
        assert!(!argv.iter().any(|a| a == "--keep-secondly"));
        assert!(!argv.contains(&"0".to_string()));
    }

    #[test]
    fn test_all_buckets_in_fixed_order() {
        let args = PruneArgs {
            secondly: Some(60),
            minutely: Some(60),
            hourly: Some(24),
            daily: Some(7),
            weekly: Some(4),
            monthly: Some(12),
            yearly: Some(2),
            within: None,
        };
        assert_eq!(
            args.to_cli_args(),
            vec![
                "--keep-secondly",
                "60",
                "--keep-minutely",
                "60",
                "--keep-hourly",
                "24",
                "--keep-daily",
                "7",
                "--keep-weekly",
                "4",
                "--keep-monthly",
                "12",
                "--keep-yearly",
                "2",
            ]
        );
    }

    #[test]
    fn test_interval_rendered_as_seconds() {
        let args = PruneArgs {
            within: Some(Duration::from_secs(3600)),
            ..Default::default()
        };
        assert_eq!(args.to_cli_args(), vec!["--keep-within", "3600S"]);
    }
}
