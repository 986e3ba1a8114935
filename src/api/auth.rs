use tracing::debug;

use super::client::ApiClient;
use super::error::{Operation, StorageError};
use super::types::{LoginData, LoginRequest, SUCCESS_CODE};

impl ApiClient {
    /// Exchange username and password for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, StorageError> {
        debug!("=== Login Request ===");
        let body = LoginRequest { username, password };

        let data: Option<LoginData> = self
            .post("/api/auth/login", None, &body)
            .await
            .map_err(|e| StorageError::new(Operation::Login, e))?;

        match data {
            Some(data) if !data.token.is_empty() => {
                debug!("Successfully obtained session token");
                Ok(data.token)
            }
            _ => Err(StorageError::rejected(
                Operation::Login,
                SUCCESS_CODE,
                "login response does not contain a token",
            )),
        }
    }
}
