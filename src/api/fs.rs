use serde::de::IgnoredAny;
use tracing::debug;

use super::client::ApiClient;
use super::error::{Operation, StorageError};
use super::types::{CopyRequest, ListData, ListRequest, MkdirRequest, RemoveRequest};
use crate::domain::RemoteFile;

impl ApiClient {
    /// List every entry of `path` on one page.
    ///
    /// With `refresh` the server re-reads the underlying storage instead of
    /// answering from its cache.
    pub async fn list_dir(
        &self,
        token: &str,
        path: &str,
        refresh: bool,
    ) -> Result<Vec<RemoteFile>, StorageError> {
        let body = ListRequest {
            path,
            password: "",
            page: 1,
            per_page: 0,
            refresh,
        };

        let data: Option<ListData> = self
            .post("/api/fs/list", Some(token), &body)
            .await
            .map_err(|e| StorageError::new(Operation::List, e))?;

        let files = data.and_then(|d| d.content).unwrap_or_default();
        debug!("Listed {} entries in {}", files.len(), path);
        Ok(files)
    }

    /// Create `path` (and missing parents). Succeeds if it already exists.
    pub async fn mkdir(&self, token: &str, path: &str) -> Result<(), StorageError> {
        let _: Option<IgnoredAny> = self
            .post("/api/fs/mkdir", Some(token), &MkdirRequest { path })
            .await
            .map_err(|e| StorageError::new(Operation::Mkdir, e))?;
        Ok(())
    }

    /// Ask the server to copy `names` from `src_dir` into `dst_dir`.
    ///
    /// The server queues one copy task per file and returns immediately.
    pub async fn copy(
        &self,
        token: &str,
        src_dir: &str,
        dst_dir: &str,
        names: &[String],
    ) -> Result<(), StorageError> {
        let body = CopyRequest {
            src_dir,
            dst_dir,
            names,
        };
        let _: Option<IgnoredAny> = self
            .post("/api/fs/copy", Some(token), &body)
            .await
            .map_err(|e| StorageError::new(Operation::Copy, e))?;
        Ok(())
    }

    /// Delete `names` from `dir`.
    pub async fn remove(&self, token: &str, dir: &str, names: &[String]) -> Result<(), StorageError> {
        let _: Option<IgnoredAny> = self
            .post("/api/fs/remove", Some(token), &RemoveRequest { dir, names })
            .await
            .map_err(|e| StorageError::new(Operation::Remove, e))?;
        Ok(())
    }
}
