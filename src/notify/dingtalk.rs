use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::NotifyError;
use crate::archive::Notifier;

type HmacSha256 = Hmac<Sha256>;

/// Webhook request timeout in seconds
const WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Text message body
#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    msgtype: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

/// Robot reply; `errcode` 0 means delivered.
#[derive(Debug, Deserialize)]
struct WebhookReply {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

/// Base64 HMAC-SHA256 of `"{timestamp}\n{secret}"` keyed with `secret`.
pub fn sign(secret: &str, timestamp_ms: i64) -> Result<String, NotifyError> {
    let string_to_sign = format!("{}\n{}", timestamp_ms, secret);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| NotifyError::Signing)?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Append `timestamp` and `sign` to the webhook URL.
pub fn signed_url(webhook_url: &str, secret: &str, timestamp_ms: i64) -> Result<Url, NotifyError> {
    let mut url = Url::parse(webhook_url)?;
    let signature = sign(secret, timestamp_ms)?;
    url.query_pairs_mut()
        .append_pair("timestamp", &timestamp_ms.to_string())
        .append_pair("sign", &signature);
    Ok(url)
}

/// Group robot notifier
pub struct DingTalkNotifier {
    client: Client,
    webhook_url: String,
    secret: String,
}

impl DingTalkNotifier {
    pub fn new(webhook_url: String, secret: String) -> Result<Self, NotifyError> {
        // Reject a malformed URL up front rather than at the deadline.
        Url::parse(&webhook_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            webhook_url,
            secret,
        })
    }
}

impl Notifier for DingTalkNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let url = signed_url(&self.webhook_url, &self.secret, Utc::now().timestamp_millis())?;
        let body = TextMessage {
            msgtype: "text",
            text: TextContent { content: message },
        };

        debug!("Sending webhook notification ({} chars)", message.len());
        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        // Some gateways answer with an empty body; only a parsed non-zero
        // errcode counts as a rejection.
        let text = response.text().await?;
        if let Ok(reply) = serde_json::from_str::<WebhookReply>(&text) {
            if reply.errcode != 0 {
                return Err(NotifyError::Rejected {
                    code: reply.errcode,
                    message: reply.errmsg,
                });
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for DingTalkNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DingTalkNotifier")
            .field("webhook_url", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        let signature = sign("SECtest", 1_700_000_000_000).unwrap();
        assert_eq!(signature, "aZLLrriXgn05YbwaGR7knYsLeJADjr9NwLaNNKpxh4g=");
    }

    #[test]
    fn test_signed_url_appends_encoded_query() {
        let url = signed_url(
            "https://oapi.dingtalk.com/robot/send?access_token=abc",
            "SECtest",
            1_700_000_000_000,
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://oapi.dingtalk.com/robot/send?access_token=abc&timestamp=1700000000000&sign=aZLLrriXgn05YbwaGR7knYsLeJADjr9NwLaNNKpxh4g%3D"
        );
    }

    #[test]
    fn test_text_message_shape() {
        let body = TextMessage {
            msgtype: "text",
            text: TextContent { content: "hello" },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"msgtype": "text", "text": {"content": "hello"}})
        );
    }

    #[test]
    fn test_rejects_bad_webhook_url() {
        let err = DingTalkNotifier::new("not a url".to_string(), "s".to_string()).unwrap_err();
        assert!(matches!(err, NotifyError::Url(_)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let notifier = DingTalkNotifier::new(
            "https://oapi.dingtalk.com/robot/send?access_token=tok".to_string(),
            "SECsecret".to_string(),
        )
        .unwrap();
        let debug_str = format!("{:?}", notifier);
        assert!(!debug_str.contains("SECsecret"));
        assert!(!debug_str.contains("tok"));
    }
}
