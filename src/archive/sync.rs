//! Day synchronization run.
//!
//! One run walks a fixed sequence of steps, each feeding the next:
//! 1. Authenticate
//! 2. List the local camera directory (forced refresh)
//! 3. Keep complete clips of the target day
//! 4. Ensure the day-bucket exists
//! 5. Clear finished copy records (best-effort)
//! 6. List the day-bucket (forced refresh)
//! 7. Stop if the day is already complete, optionally deleting originals
//! 8. Alert if the deadline has passed
//! 9. List in-flight copies
//! 10. Keep in-flight clips of the target day
//! 11. Reconcile
//! 12. Submit one copy request for the batch, or stop if it is empty
//!
//! Any failure other than steps 5 and 8 aborts the run. Nothing is retried.
//! This includes the removal of originals requested with `--remove`: if it
//! fails, the run returns an error and the process exits non-zero.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::StorageError;
use crate::domain::TargetDay;

use super::context::{Credentials, RunContext};
use super::filter::{filter_in_flight_to_day, filter_target_day_complete};
use super::reconcile::reconcile;
use super::service::{Notifier, StorageService};

/// A run that stopped before finishing.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Local and remote agree; `removed` originals were deleted.
    AlreadySynced { removed: usize },
    /// Every outstanding clip is already being copied.
    AllInFlight,
    /// A copy request naming `count` clips was accepted.
    Submitted { count: usize },
    /// Dry run: `count` clips would have been submitted.
    Planned { count: usize },
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub target_day: TargetDay,
    /// Complete target-day clips in the camera directory.
    pub local_count: usize,
    /// Entries in the day-bucket.
    pub remote_count: usize,
    /// Target-day clips currently being copied.
    pub in_flight_count: usize,
    /// Clips submitted (or, in a dry run, that would be).
    pub batch: Vec<String>,
    pub outcome: SyncOutcome,
    /// Whether a deadline alert was delivered.
    pub notified: bool,
}

/// Alert text for a day that is still incomplete after the deadline.
pub fn deadline_message(day: &TargetDay, outstanding: usize) -> String {
    format!(
        "Date: {}\n{} clip(s) still not uploaded\nPlease check manually",
        day.bucket_suffix(),
        outstanding
    )
}

/// Run one synchronization of `ctx.target_day`.
pub async fn run_sync<S, N>(
    service: &S,
    notifier: Option<&N>,
    credentials: &Credentials,
    ctx: &RunContext,
) -> Result<SyncReport, SyncError>
where
    S: StorageService,
    N: Notifier,
{
    let day_key = ctx.target_day.day_key();
    info!("📅 Target day: {}", ctx.target_day);
    if ctx.dry_run {
        info!("Dry run: no copy, removal, cleanup or alert will be issued");
    }

    let session = service
        .authenticate(&credentials.username, &credentials.password)
        .await
        .inspect_err(|e| error!("❌ {}", e))?;
    debug!("Authenticated as {}", credentials.username);

    let local_listing = service
        .list_files(&session, &ctx.source_dir, true)
        .await
        .inspect_err(|e| error!("❌ Failed to list {}: {}", ctx.source_dir, e))?;
    let local = filter_target_day_complete(&local_listing, &day_key, ctx.scan_policy);
    debug!(
        "{} of {} local entries are complete clips of {}",
        local.len(),
        local_listing.len(),
        ctx.target_day
    );

    service
        .ensure_directory(&session, &ctx.day_bucket)
        .await
        .inspect_err(|e| error!("❌ Failed to create {}: {}", ctx.day_bucket, e))?;

    if !ctx.dry_run {
        if let Err(e) = service.clear_finished_copy_records(&session).await {
            warn!("Failed to clear finished copy records: {}", e);
        }
    }

    let remote_listing = service
        .list_files(&session, &ctx.day_bucket, true)
        .await
        .inspect_err(|e| error!("❌ Failed to list {}: {}", ctx.day_bucket, e))?;
    let remote: Vec<String> = remote_listing.into_iter().map(|f| f.name).collect();

    info!("📊 Clips recorded that day: {}", local.len());
    info!("📊 Clips already uploaded: {}", remote.len());

    let local_count = local.len();
    let remote_count = remote.len();

    if ctx.completion_policy.is_complete(&local, &remote) {
        info!("✅ All clips of {} are uploaded", ctx.target_day);
        let removed = if ctx.delete_after_upload {
            remove_originals(service, &session, ctx, &remote).await?
        } else {
            0
        };
        return Ok(SyncReport {
            target_day: ctx.target_day,
            local_count,
            remote_count,
            in_flight_count: 0,
            batch: Vec::new(),
            outcome: SyncOutcome::AlreadySynced { removed },
            notified: false,
        });
    }

    let mut notified = false;
    if ctx.deadline_passed() && !ctx.dry_run {
        if let Some(notifier) = notifier {
            let outstanding = local_count.saturating_sub(remote_count);
            let message = deadline_message(&ctx.target_day, outstanding);
            match notifier.notify(&message).await {
                Ok(()) => {
                    info!("🔔 Deadline alert sent ({} outstanding)", outstanding);
                    notified = true;
                }
                Err(e) => warn!("Failed to send deadline alert: {}", e),
            }
        }
    }

    let in_flight_listing = service
        .list_in_flight_copies(&session)
        .await
        .inspect_err(|e| error!("❌ Failed to list in-flight copies: {}", e))?;
    let in_flight = filter_in_flight_to_day(&in_flight_listing, &day_key, ctx.scan_policy);
    if !in_flight.is_empty() {
        info!("⏳ Clips of that day being copied: {}", in_flight.len());
    }

    let batch = reconcile(&local, &remote, &in_flight);
    let outcome = if batch.is_empty() {
        info!("⏳ Every remaining clip is already being copied");
        SyncOutcome::AllInFlight
    } else if ctx.dry_run {
        info!("📝 Would submit {} clips", batch.len());
        SyncOutcome::Planned { count: batch.len() }
    } else {
        service
            .submit_copy(&session, &ctx.source_dir, &ctx.day_bucket, &batch)
            .await
            .inspect_err(|e| error!("❌ Failed to submit copy request: {}", e))?;
        info!("📤 Submitted {} clips for upload", batch.len());
        SyncOutcome::Submitted { count: batch.len() }
    };

    Ok(SyncReport {
        target_day: ctx.target_day,
        local_count,
        remote_count,
        in_flight_count: in_flight.len(),
        batch,
        outcome,
        notified,
    })
}

/// Delete confirmed-uploaded originals from the camera directory.
async fn remove_originals<S: StorageService>(
    service: &S,
    session: &S::Session,
    ctx: &RunContext,
    names: &[String],
) -> Result<usize, SyncError> {
    if names.is_empty() {
        return Ok(0);
    }

    if ctx.dry_run {
        info!("📝 Would remove {} originals from {}", names.len(), ctx.source_dir);
        return Ok(0);
    }

    service
        .remove_files(session, &ctx.source_dir, names)
        .await
        .inspect_err(|e| error!("❌ Failed to remove originals: {}", e))?;

    info!("🗑️ Removed {} originals from {}", names.len(), ctx.source_dir);
    Ok(names.len())
}
