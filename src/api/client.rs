use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::error::ApiFailure;
use super::http::read_envelope;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the User-Agent string
fn build_user_agent() -> String {
    let version =
        std::env::var("CAMSYNC_VERSION").unwrap_or_else(|_| DEFAULT_VERSION.to_string());
    std::env::var("CAMSYNC_USER_AGENT").unwrap_or_else(|_| format!("camsync/{}", version))
}

/// HTTP client for an OpenList storage server
pub struct ApiClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) user_agent: String,
}

impl ApiClient {
    /// Create a client for the server at `endpoint`.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ApiFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: Self::parse_base_url(endpoint)?,
            user_agent: build_user_agent(),
        })
    }

    /// Parse the server URL so that relative joins keep any path prefix.
    fn parse_base_url(endpoint: &str) -> Result<Url, url::ParseError> {
        let endpoint = endpoint.trim();
        if endpoint.ends_with('/') {
            Url::parse(endpoint)
        } else {
            Url::parse(&format!("{}/", endpoint))
        }
    }

    fn build_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(endpoint.trim_start_matches('/'))
    }

    /// Send one request and unwrap the response envelope.
    pub(super) async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint)?;
        let request_id = Uuid::new_v4().to_string();

        debug!("=== API Request ===");
        debug!("{} {} (request {})", method, url, request_id);

        let mut request = self
            .client
            .request(method, url)
            .header("User-Agent", &self.user_agent)
            .header("x-request-id", &request_id);

        // The server expects the bare token, without a "Bearer" prefix.
        if let Some(token) = token {
            request = request.header("Authorization", token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        read_envelope(response).await
    }

    pub(super) async fn post<B, T>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<Option<T>, ApiFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, endpoint, token, Some(body)).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_agent() {
        let ua = build_user_agent();
        assert!(ua.starts_with("camsync/"));
    }

    #[test]
    fn test_build_url_at_host_root() {
        let client = ApiClient::new("http://nas.local:5244", DEFAULT_TIMEOUT_SECS).unwrap();
        let url = client.build_url("/api/fs/list").unwrap();
        assert_eq!(url.as_str(), "http://nas.local:5244/api/fs/list");

        let client = ApiClient::new("http://nas.local:5244/", DEFAULT_TIMEOUT_SECS).unwrap();
        let url = client.build_url("api/fs/list").unwrap();
        assert_eq!(url.as_str(), "http://nas.local:5244/api/fs/list");
    }

    #[test]
    fn test_build_url_keeps_path_prefix() {
        let client = ApiClient::new("https://example.com/openlist", DEFAULT_TIMEOUT_SECS).unwrap();
        let url = client.build_url("/api/auth/login").unwrap();
        assert_eq!(url.as_str(), "https://example.com/openlist/api/auth/login");
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = ApiClient::new("not a url", DEFAULT_TIMEOUT_SECS).unwrap_err();
        assert!(matches!(err, ApiFailure::Url(_)));
    }
}
