//! Collaborator contracts the sync engine drives.
//!
//! The engine never talks HTTP itself; it calls these traits in a fixed
//! order. `api::ApiClient` and `notify::DingTalkNotifier` are the production
//! implementations.

use crate::api::StorageError;
use crate::domain::RemoteFile;
use crate::notify::NotifyError;

/// Remote file-storage service holding both the local camera directory and
/// the upload destination.
#[allow(async_fn_in_trait)]
pub trait StorageService {
    /// Credential returned by [`StorageService::authenticate`] and passed to
    /// every later call.
    type Session;

    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Self::Session, StorageError>;

    /// Ordered listing of `path`. `refresh` bypasses any server-side cache.
    async fn list_files(
        &self,
        session: &Self::Session,
        path: &str,
        refresh: bool,
    ) -> Result<Vec<RemoteFile>, StorageError>;

    /// Create `path` if it is missing. An existing directory is success.
    async fn ensure_directory(&self, session: &Self::Session, path: &str)
        -> Result<(), StorageError>;

    /// Copies requested but not yet finished.
    async fn list_in_flight_copies(
        &self,
        session: &Self::Session,
    ) -> Result<Vec<RemoteFile>, StorageError>;

    async fn submit_copy(
        &self,
        session: &Self::Session,
        source_dir: &str,
        dest_dir: &str,
        names: &[String],
    ) -> Result<(), StorageError>;

    async fn clear_finished_copy_records(&self, session: &Self::Session)
        -> Result<(), StorageError>;

    async fn remove_files(
        &self,
        session: &Self::Session,
        dir: &str,
        names: &[String],
    ) -> Result<(), StorageError>;
}

/// Operator alert channel.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}
