//! Error types for storage-service calls.

use thiserror::Error;

/// The storage-service operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    List,
    Mkdir,
    ListInFlight,
    Copy,
    ClearDone,
    Remove,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::List => "list",
            Operation::Mkdir => "mkdir",
            Operation::ListInFlight => "list in-flight copies",
            Operation::Copy => "copy",
            Operation::ClearDone => "clear finished copies",
            Operation::Remove => "remove",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single request did not succeed.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The request never produced a readable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON envelope.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a non-success code.
    #[error("server returned code {code}: {message}")]
    Rejected { code: i64, message: String },

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A failed storage-service operation.
#[derive(Debug, Error)]
#[error("{operation} failed: {cause}")]
pub struct StorageError {
    pub operation: Operation,
    #[source]
    pub cause: ApiFailure,
}

impl StorageError {
    pub fn new(operation: Operation, cause: impl Into<ApiFailure>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }

    /// A server-side rejection carrying the server's message.
    pub fn rejected(operation: Operation, code: i64, message: impl Into<String>) -> Self {
        Self {
            operation,
            cause: ApiFailure::Rejected {
                code,
                message: message.into(),
            },
        }
    }
}
