//! Send command
//!
//! Fires one event at the configured webhook, either awaiting the delivery
//! or scheduling it in the background and draining before exit.

use crate::error::{CliError, CliResult};
use chrono::DateTime;
use colored::Colorize;
use eventhook_webhooks::{Admission, DeliveryOutcome, Dispatcher, HostEvent, WebhookConfig};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the send command
#[derive(Debug)]
pub struct SendArgs {
    pub config: PathBuf,
    pub event: String,
    pub data: Option<String>,
    pub timestamp: Option<String>,
    pub grace: Option<f64>,
    pub quiet: bool,
}

/// Run the send command.
pub async fn run(args: SendArgs) -> CliResult<()> {
    let event = build_event(&args)?;
    let config = WebhookConfig::from_file(&args.config)?;
    let dispatcher = Dispatcher::new(config)?;

    match args.grace {
        Some(grace) => send_detached(&dispatcher, &event, grace, args.quiet).await,
        None => send_awaited(&dispatcher, &event, args.quiet).await,
    }
}

async fn send_awaited(dispatcher: &Dispatcher, event: &HostEvent, quiet: bool) -> CliResult<()> {
    match dispatcher.dispatch(event).await {
        DeliveryOutcome::Delivered { status } => {
            if !quiet {
                println!(
                    "{} {} delivered to {} ({})",
                    "✓".green().bold(),
                    event.name,
                    dispatcher.config().target_url(),
                    status
                );
            }
            Ok(())
        }
        DeliveryOutcome::Filtered => {
            report_filtered(dispatcher, event, quiet);
            Ok(())
        }
        DeliveryOutcome::Rejected { status, body } => Err(CliError::Rejected { status, body }),
        DeliveryOutcome::Failed(err) => Err(err.into()),
    }
}

async fn send_detached(
    dispatcher: &Dispatcher,
    event: &HostEvent,
    grace: f64,
    quiet: bool,
) -> CliResult<()> {
    let grace = Duration::try_from_secs_f64(grace)
        .map_err(|e| CliError::InvalidArgument(format!("--grace: {}", e)))?;

    match dispatcher.handle(event) {
        Admission::Scheduled => {}
        Admission::Filtered => {
            report_filtered(dispatcher, event, quiet);
            return Ok(());
        }
        Admission::Dropped => {
            return Err(CliError::Undelivered("dropped before sending".to_string()));
        }
    }

    if !dispatcher.drain(grace).await {
        return Err(CliError::Undelivered(format!(
            "still in flight after {:?}",
            grace
        )));
    }

    if !quiet {
        println!(
            "{} {} dispatched to {} (see logs for the outcome)",
            "✓".green().bold(),
            event.name,
            dispatcher.config().target_url()
        );
    }
    Ok(())
}

fn report_filtered(dispatcher: &Dispatcher, event: &HostEvent, quiet: bool) {
    if !quiet {
        println!(
            "{} {} skipped, this webhook only sends {}",
            "-".yellow().bold(),
            event.name,
            dispatcher.config().event_filter().event_name().unwrap_or_default()
        );
    }
}

/// Build the host event from command-line arguments.
pub fn build_event(args: &SendArgs) -> CliResult<HostEvent> {
    if args.event.trim().is_empty() {
        return Err(CliError::InvalidArgument("event name cannot be empty".into()));
    }

    let mut event = HostEvent::new(args.event.as_str());

    if let Some(raw) = &args.data {
        event = event.with_data(parse_data(raw)?);
    }

    if let Some(raw) = &args.timestamp {
        let timestamp = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| CliError::InvalidArgument(format!("--timestamp {:?}: {}", raw, e)))?;
        event = event.with_timestamp(timestamp);
    }

    Ok(event)
}

fn parse_data(raw: &str) -> CliResult<Map<String, Value>> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::InvalidArgument(
            "--data must be a JSON object".to_string(),
        )),
        Err(e) => Err(CliError::InvalidArgument(format!("--data: {}", e))),
    }
}
