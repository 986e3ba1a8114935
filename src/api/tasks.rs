//! Copy task queue endpoints.

use reqwest::Method;
use serde::de::IgnoredAny;

use super::client::ApiClient;
use super::error::{Operation, StorageError};
use crate::domain::RemoteFile;

impl ApiClient {
    /// Copy tasks that have not finished yet. Entry names are task
    /// descriptions and carry no size.
    pub async fn undone_copy_tasks(&self, token: &str) -> Result<Vec<RemoteFile>, StorageError> {
        let data: Option<Vec<RemoteFile>> = self
            .send::<(), _>(Method::GET, "/api/admin/task/copy/undone", Some(token), None)
            .await
            .map_err(|e| StorageError::new(Operation::ListInFlight, e))?;
        Ok(data.unwrap_or_default())
    }

    /// Drop the records of copy tasks that already finished.
    pub async fn clear_done_copy_tasks(&self, token: &str) -> Result<(), StorageError> {
        let _: Option<IgnoredAny> = self
            .send::<(), _>(Method::POST, "/api/admin/task/copy/clear_done", Some(token), None)
            .await
            .map_err(|e| StorageError::new(Operation::ClearDone, e))?;
        Ok(())
    }
}
