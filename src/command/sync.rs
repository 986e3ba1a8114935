use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use crate::api::ApiClient;
use crate::archive::{self, Credentials, RunContext, RunOptions, SyncOutcome, SyncReport};
use crate::config::AppConfig;
use crate::notify::DingTalkNotifier;

/// Load configuration, run one sync of the target day and print its summary.
pub async fn run_sync_command(config_path: Option<&Path>, options: RunOptions) -> Result<()> {
    let (config, path) = AppConfig::load(config_path)?;
    debug!(config = ?config, path = %path.display(), "starting run");

    let client = ApiClient::new(&config.endpoint, config.request_timeout_secs)
        .with_context(|| format!("Invalid storage endpoint: {}", config.endpoint))?;

    let notifier = match &config.notify {
        Some(notify) if config.deadline_hour().is_some() => Some(
            DingTalkNotifier::new(notify.webhook_url.clone(), notify.secret.clone())
                .context("Invalid notification webhook")?,
        ),
        _ => None,
    };

    let ctx = RunContext::new(&config, &options, Local::now())?;
    let credentials = Credentials::from_config(&config);

    let report = archive::run_sync(&client, notifier.as_ref(), &credentials, &ctx)
        .await
        .with_context(|| format!("Sync of {} aborted", ctx.target_day))?;

    print_report(&report, &ctx);
    Ok(())
}

fn print_report(report: &SyncReport, ctx: &RunContext) {
    println!("Day:         {}", report.target_day);
    println!("Source:      {}", ctx.source_dir);
    println!("Destination: {}", ctx.day_bucket);
    println!("Recorded:    {}", report.local_count);
    println!("Uploaded:    {}", report.remote_count);

    match &report.outcome {
        SyncOutcome::AlreadySynced { removed } => {
            println!("\n✅ Every clip is uploaded");
            if *removed > 0 {
                println!("   Removed {} originals", removed);
            }
        }
        SyncOutcome::AllInFlight => {
            println!("\n⏳ {} clips are still being copied", report.in_flight_count);
        }
        SyncOutcome::Submitted { count } => {
            println!("\n📤 Submitted {} clips", count);
        }
        SyncOutcome::Planned { count } => {
            println!("\nWould submit {} clips:", count);
            for name in &report.batch {
                println!("  {}", name);
            }
        }
    }

    if report.notified {
        println!("🔔 Deadline alert sent");
    }
}
