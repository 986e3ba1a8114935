//! Domain types shared across modules.
//!
//! This module contains the data structures used by both the storage API
//! client (which produces listings) and the archive engine (which classifies
//! and reconciles them). Keeping them here avoids circular dependencies
//! between `api` and `archive`.

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Byte length of a fully written camera clip segment.
///
/// The camera slices its recording into segments of exactly this size; any
/// other size means the segment is still being written (or was cut short).
pub const SLICE_SIZE: u64 = 134_217_728;

/// One entry returned by any listing call.
///
/// Entries from the in-flight copy queue carry no size, so it deserializes to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

impl RemoteFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Whether this entry is a complete slice.
    pub fn is_complete(&self) -> bool {
        self.size == SLICE_SIZE
    }
}

/// The calendar day whose clips a run uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetDay(NaiveDate);

impl TargetDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day `days_back` days before `now` (local calendar), or `None` if
    /// that falls outside the representable date range.
    pub fn days_before(now: &DateTime<Local>, days_back: u32) -> Option<Self> {
        now.date_naive()
            .checked_sub_days(Days::new(u64::from(days_back)))
            .map(Self)
    }

    /// `YYYYMMDD`, the form embedded in clip filenames.
    pub fn day_key(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }

    /// `YYYY/MM/DD`, the relative path of the day-bucket under the upload root.
    pub fn bucket_suffix(&self) -> String {
        self.0.format("%Y/%m/%d").to_string()
    }
}

impl std::fmt::Display for TargetDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// How far into an ordered listing the engine trusts entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanPolicy {
    /// Stop at the first entry that does not qualify. Assumes the listing
    /// places every complete, dated clip contiguously at the front.
    #[default]
    TrustedPrefix,
    /// Skip entries that do not qualify and keep scanning.
    FullScan,
}

/// How the orchestrator decides that a day is fully uploaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Local and remote listings have the same number of entries.
    /// Equal counts with different names still count as done.
    #[default]
    #[serde(rename = "count")]
    CountMatch,
    /// Every target-day local name is present remotely.
    #[serde(rename = "names")]
    NameMatch,
}

impl CompletionPolicy {
    /// Apply the policy to the target-day local names and the confirmed
    /// remote names.
    pub fn is_complete(&self, local: &[String], remote: &[String]) -> bool {
        match self {
            CompletionPolicy::CountMatch => local.len() == remote.len(),
            CompletionPolicy::NameMatch => {
                let remote: std::collections::HashSet<&str> =
                    remote.iter().map(String::as_str).collect();
                local.iter().all(|name| remote.contains(name.as_str()))
            }
        }
    }
}
