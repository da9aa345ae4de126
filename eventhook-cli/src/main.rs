//! eventhook CLI - validate webhook configs and fire test events.
//!
//! # Commands
//!
//! - `eventhook validate <config>` - Load a webhook config file and print a summary
//! - `eventhook send <config> <event>` - Deliver one event to the configured webhook

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use eventhook_log::{Level, LogConfig};
use std::path::PathBuf;

mod commands;
mod error;

use commands::{send, validate};
use error::CliResult;

/// eventhook - deliver host events to a webhook endpoint
#[derive(Parser)]
#[command(name = "eventhook")]
#[command(version)]
#[command(about = "Validate webhook configs and fire events at them")]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} eventhook validate webhook.toml\n  {} eventhook send webhook.toml cert_obtained --data '{{\"identifier\":\"example.com\"}}'",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a webhook configuration file
    #[command(alias = "check")]
    Validate {
        /// Path to the config file (.toml or .json)
        config: PathBuf,
    },

    /// Send one event to the configured webhook
    Send(SendArgs),
}

#[derive(Args)]
struct SendArgs {
    /// Path to the config file (.toml or .json)
    config: PathBuf,

    /// Event name, e.g. cert_obtained
    event: String,

    /// Event data as a JSON object
    #[arg(short, long)]
    data: Option<String>,

    /// When the event occurred (RFC 3339), defaults to now
    #[arg(short, long)]
    timestamp: Option<String>,

    /// Dispatch in the background and wait at most this many seconds for it
    #[arg(short, long, env = "EVENTHOOK_GRACE")]
    grace: Option<f64>,
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose {
        config = config.with_level(Level::Debug);
    } else if cli.quiet {
        config = config.with_level(Level::Error);
    }
    if cli.no_color {
        config.color = false;
    }
    eventhook_log::init_with(&config);
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(&cli);

    let result: CliResult<()> = match cli.command {
        Commands::Validate { config } => validate::execute(&config, cli.quiet),
        Commands::Send(args) => {
            send::run(send::SendArgs {
                config: args.config,
                event: args.event,
                data: args.data,
                timestamp: args.timestamp,
                grace: args.grace,
                quiet: cli.quiet,
            })
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from([
            "eventhook",
            "-v",
            "send",
            "webhook.toml",
            "cert_obtained",
            "--data",
            "{}",
            "--grace",
            "2.5",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.event, "cert_obtained");
                assert_eq!(args.data.as_deref(), Some("{}"));
                assert_eq!(args.grace, Some(2.5));
            }
            Commands::Validate { .. } => panic!("expected send"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["eventhook", "-v", "-q", "validate", "x.toml"]).is_err());
    }
}
