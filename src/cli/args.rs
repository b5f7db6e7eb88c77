//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// sensord - Hardware sensor telemetry over HTTP
///
/// Periodically refreshes sensor readings through timeout-bounded caches
/// and serves the last-known-good snapshot.
#[derive(Parser, Debug)]
#[command(name = "sensord")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SENSORD_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve sensor snapshots over HTTP
    Serve(ServeArgs),

    /// Run each sensor producer once and report the result
    Check,

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Listen address override (host:port)
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Refresh interval override in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_serve() {
        let cli = Cli::parse_from(["sensord", "serve"]);
        match cli.command {
            Commands::Serve(args) => {
                assert!(args.listen.is_none());
                assert!(args.interval.is_none());
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn cli_parses_serve_overrides() {
        let cli = Cli::parse_from(["sensord", "serve", "--listen", "127.0.0.1:9000", "--interval", "5"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.listen.as_deref(), Some("127.0.0.1:9000"));
                assert_eq!(args.interval, Some(5));
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn cli_parses_check() {
        let cli = Cli::parse_from(["sensord", "check"]);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn cli_parses_config_actions() {
        let cli = Cli::parse_from(["sensord", "config", "path"]);
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.action, Some(ConfigAction::Path))),
            _ => panic!("expected Config command"),
        }

        let cli = Cli::parse_from(["sensord", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.action, Some(ConfigAction::Init { force: true })))
            }
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["sensord", "check"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["sensord", "-vv", "check"]);
        assert_eq!(cli.verbose, 2);
    }
}
