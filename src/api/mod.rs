//! API client for the OpenList storage service.
//!
//! The camera share and the upload destination are both mounted in the same
//! OpenList server, so listing, copying and deleting clips are all calls
//! against its JSON API.

mod auth;
mod authenticated;
mod client;
mod error;
mod fs;
mod http;
mod tasks;
mod types;

pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use error::StorageError;
#[cfg(test)]
pub use error::Operation;
