//! Config validation command
//!
//! Loads a webhook configuration file and prints what the dispatcher would use.

use crate::error::CliResult;
use colored::Colorize;
use eventhook_webhooks::{HeaderOrder, WebhookConfig};
use std::path::Path;

/// Validate a config file and print a summary.
pub fn execute(path: &Path, quiet: bool) -> CliResult<()> {
    let config = WebhookConfig::from_file(path)?;

    if !quiet {
        print_summary(path, &config);
    }
    Ok(())
}

fn print_summary(path: &Path, config: &WebhookConfig) {
    println!("{} {}", "✓".green().bold(), path.display());
    println!();
    println!("  {:<14} {}", "url:".bright_cyan(), config.target_url());
    println!("  {:<14} {}", "method:".bright_cyan(), config.method());
    println!("  {:<14} {:?}", "timeout:".bright_cyan(), config.timeout());
    println!(
        "  {:<14} {}",
        "event:".bright_cyan(),
        config.event_filter().event_name().unwrap_or("(all events)")
    );
    println!(
        "  {:<14} {}",
        "header order:".bright_cyan(),
        match config.header_order() {
            HeaderOrder::CustomLast => "custom_last",
            HeaderOrder::ContentTypeLast => "content_type_last",
        }
    );
    if let Some(user_agent) = config.user_agent().and_then(|ua| ua.to_str().ok()) {
        println!("  {:<14} {}", "user agent:".bright_cyan(), user_agent);
    }
    println!("  {:<14} {}", "max in flight:".bright_cyan(), config.max_in_flight());

    // header values often carry credentials
    if !config.headers().is_empty() {
        let mut names: Vec<_> = config.headers().keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        println!("  {:<14} {}", "headers:".bright_cyan(), names.join(", "));
    }
}
