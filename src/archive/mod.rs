//! Camera archive reconciliation.
//!
//! Decides which of a day's clips still have to be copied to remote storage:
//! - Classify clip filenames by their embedded start date
//! - Keep only complete slices of the target day
//! - Subtract clips already uploaded or already being copied
//! - Drive the storage service through one sync run

mod classifier;
mod context;
mod filter;
mod reconcile;
mod service;
mod sync;

// Re-exports
pub use context::{Credentials, RunContext, RunOptions};
pub use service::{Notifier, StorageService};
pub use sync::{run_sync, SyncOutcome, SyncReport};
