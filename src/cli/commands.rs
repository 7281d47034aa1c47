// src/cli/commands.rs
use crate::types::SwitchPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hive Profit Switcher - moves farm workers to their most profitable flight sheet
#[derive(Parser, Debug)]
#[command(name = "hive-profit-switcher")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (run a pass, generate config, or check for updates)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Evaluate every farm worker once and switch where profitable
    Run(RunOptions),

    /// Generate configuration file template
    Config(ConfigOptions),

    /// Check the release feed for a newer version
    CheckUpdate(CheckUpdateOptions),
}

/// Options for an evaluation pass
#[derive(Parser, Debug)]
pub struct RunOptions {
    /// Path to configuration file (.json or .toml); relative paths missing
    /// from the working directory are looked up next to the executable
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Decide but do not change any flight sheet
    #[arg(long)]
    pub dry_run: bool,

    /// Switch policy (overrides config)
    #[arg(short, long)]
    pub policy: Option<SwitchPolicy>,

    /// Number of workers evaluated concurrently
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Print the pass report as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the release check after the pass
    #[arg(long)]
    pub no_update_check: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,
}

/// Options for the update check
#[derive(Parser, Debug)]
pub struct CheckUpdateOptions {
    /// Release tags feed (defaults to the project's feed)
    #[arg(long)]
    pub feed: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_arguments() {
        let cli = Commands::try_parse_from([
            "hive-profit-switcher",
            "run",
            "--config",
            "configs.json",
            "--dry-run",
            "--policy",
            "best_nicehash",
            "--concurrency",
            "4",
        ])
        .unwrap();

        match cli.action {
            Action::Run(opts) => {
                assert_eq!(opts.config, PathBuf::from("configs.json"));
                assert!(opts.dry_run);
                assert_eq!(opts.policy, Some(SwitchPolicy::NiceHashOnly));
                assert_eq!(opts.concurrency, 4);
                assert!(!opts.json);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_check_update_subcommand_name() {
        let cli = Commands::try_parse_from(["hive-profit-switcher", "check-update"]).unwrap();
        assert!(matches!(cli.action, Action::CheckUpdate(CheckUpdateOptions { feed: None })));
    }
}
