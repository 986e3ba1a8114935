//! Session credential and the `StorageService` binding for `ApiClient`.
//!
//! The session token is obtained once per run and handed to every later
//! call; the same `reqwest::Client` is reused so connections are pooled.

use super::client::ApiClient;
use super::error::StorageError;
use crate::archive::StorageService;
use crate::domain::RemoteFile;

/// Session token returned by the login endpoint.
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    /// Get the session token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl StorageService for ApiClient {
    type Session = Session;

    async fn authenticate(&self, username: &str, password: &str) -> Result<Session, StorageError> {
        self.login(username, password).await.map(Session::new)
    }

    async fn list_files(
        &self,
        session: &Session,
        path: &str,
        refresh: bool,
    ) -> Result<Vec<RemoteFile>, StorageError> {
        self.list_dir(session.token(), path, refresh).await
    }

    async fn ensure_directory(&self, session: &Session, path: &str) -> Result<(), StorageError> {
        self.mkdir(session.token(), path).await
    }

    async fn list_in_flight_copies(&self, session: &Session) -> Result<Vec<RemoteFile>, StorageError> {
        self.undone_copy_tasks(session.token()).await
    }

    async fn submit_copy(
        &self,
        session: &Session,
        source_dir: &str,
        dest_dir: &str,
        names: &[String],
    ) -> Result<(), StorageError> {
        self.copy(session.token(), source_dir, dest_dir, names).await
    }

    async fn clear_finished_copy_records(&self, session: &Session) -> Result<(), StorageError> {
        self.clear_done_copy_tasks(session.token()).await
    }

    async fn remove_files(
        &self,
        session: &Session,
        dir: &str,
        names: &[String],
    ) -> Result<(), StorageError> {
        self.remove(session.token(), dir, names).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token() {
        let session = Session::new("test-token".to_string());
        assert_eq!(session.token(), "test-token");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret-token-123".to_string());
        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("secret-token-123"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
