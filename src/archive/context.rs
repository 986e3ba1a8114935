//! Per-run inputs, fixed once at startup.

use chrono::{DateTime, Local, Timelike};
use thiserror::Error;

use crate::config::AppConfig;
use crate::domain::{CompletionPolicy, ScanPolicy, TargetDay};

/// Command-line choices that shape a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Days before today to upload.
    pub days_back: u32,
    /// Delete local originals once the day is confirmed uploaded.
    pub delete_after_upload: bool,
    /// Replaces the configured upload root.
    pub upload_path_override: Option<String>,
    /// Compute the batch without changing anything remotely.
    pub dry_run: bool,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("cannot target {days_back} days before {today}: date out of range")]
    DaysOutOfRange { days_back: u32, today: String },
}

/// Everything a sync run needs besides its collaborators.
///
/// Built once and only ever borrowed, so every step sees the same target day
/// and paths.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub target_day: TargetDay,
    pub started_at: DateTime<Local>,
    pub source_dir: String,
    pub day_bucket: String,
    pub delete_after_upload: bool,
    pub deadline_hour: Option<u32>,
    pub scan_policy: ScanPolicy,
    pub completion_policy: CompletionPolicy,
    pub dry_run: bool,
}

impl RunContext {
    pub fn new(
        config: &AppConfig,
        options: &RunOptions,
        now: DateTime<Local>,
    ) -> Result<Self, ContextError> {
        let target_day = TargetDay::days_before(&now, options.days_back).ok_or_else(|| {
            ContextError::DaysOutOfRange {
                days_back: options.days_back,
                today: now.format("%Y-%m-%d").to_string(),
            }
        })?;
        let upload_root = options
            .upload_path_override
            .as_deref()
            .unwrap_or(&config.upload_path);

        Ok(Self {
            target_day,
            started_at: now,
            source_dir: config.source_path.clone(),
            day_bucket: day_bucket_path(upload_root, &target_day),
            delete_after_upload: options.delete_after_upload,
            deadline_hour: config.deadline_hour(),
            scan_policy: config.scan_policy,
            completion_policy: config.completion_policy,
            dry_run: options.dry_run,
        })
    }

    /// Whether the run started at or after today's deadline hour.
    pub fn deadline_passed(&self) -> bool {
        self.deadline_hour
            .is_some_and(|hour| self.started_at.hour() >= hour)
    }
}

/// `<upload root>/YYYY/MM/DD`
pub fn day_bucket_path(upload_root: &str, day: &TargetDay) -> String {
    format!("{}/{}", upload_root.trim_end_matches('/'), day.bucket_suffix())
}

/// Storage-service login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
