//! Command-line interface definitions.
//!
//! Defines the CLI structure for killfeed using `clap`: `run` starts the
//! long-poll loop, `check` verifies configuration and feed reachability.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration path. A missing file means defaults plus environment.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Announces zKillboard killmails involving a tracked character
#[derive(Parser, Debug)]
#[command(name = "killfeed")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow the feed and announce matching killmails (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `killfeed check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Load and validate configuration, then print the effective settings.
    Config(ConfigPathArg),
    /// Perform a single poll against the feed and print the result.
    Feed(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Announce every killmail to the debug channel and log at debug level
    /// (same as ZKILL_DEBUG=1).
    #[arg(long)]
    pub debug: bool,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "killfeed");
    }

    #[test]
    fn test_run_args_defaults() {
        let cli = Cli::try_parse_from(["killfeed", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(!args.debug);
        assert!(!args.json_logs);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_run_args_overrides() {
        let cli = Cli::try_parse_from([
            "killfeed",
            "run",
            "-c",
            "/etc/killfeed.toml",
            "--debug",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("/etc/killfeed.toml"));
        assert!(args.debug);
        assert!(args.json_logs);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_check_subcommands() {
        let cli = Cli::try_parse_from(["killfeed", "--json", "check", "feed"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Feed(_))));

        let cli = Cli::try_parse_from(["killfeed", "check", "config", "--config", "x.toml"]).unwrap();
        let Commands::Check(CheckCommand::Config(arg)) = cli.command else {
            panic!("expected check config");
        };
        assert_eq!(arg.config, PathBuf::from("x.toml"));
    }

    #[test]
    fn test_check_requires_subcommand() {
        assert!(Cli::try_parse_from(["killfeed", "check"]).is_err());
    }
}
