//! Operator notifications.
//!
//! Alerts go to a DingTalk-style group robot webhook signed with HMAC-SHA256.

mod dingtalk;

pub use dingtalk::DingTalkNotifier;

use thiserror::Error;

/// Failure to deliver an alert. Never aborts a sync run.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid signing key")]
    Signing,

    #[error("invalid webhook URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned HTTP {0}")]
    Status(u16),

    #[error("webhook rejected the message ({code}): {message}")]
    Rejected { code: i64, message: String },
}
