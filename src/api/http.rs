use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiFailure;
use super::types::{Envelope, SUCCESS_CODE};

/// Read a response body and unwrap its envelope.
///
/// Each call is attempted once; there is no retry.
pub(super) async fn read_envelope<T>(response: reqwest::Response) -> Result<Option<T>, ApiFailure>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    debug!("=== API Response ===");
    debug!("Status: {}", status);

    decode_envelope(status, &body)
}

/// Unwrap an envelope, mapping a non-success code to [`ApiFailure::Rejected`].
///
/// A body that is not an envelope is a rejection when the HTTP status already
/// says the call failed, and a decode error otherwise.
pub(super) fn decode_envelope<T>(status: StatusCode, body: &str) -> Result<Option<T>, ApiFailure>
where
    T: DeserializeOwned,
{
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) if envelope.code == SUCCESS_CODE => Ok(envelope.data),
        Ok(envelope) => Err(ApiFailure::Rejected {
            code: envelope.code,
            message: envelope.message,
        }),
        Err(_) if !status.is_success() => {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body.trim().to_string()
            };
            Err(ApiFailure::Rejected {
                code: i64::from(status.as_u16()),
                message,
            })
        }
        Err(e) => Err(ApiFailure::Decode(e)),
    }
}
