//! API request and response types for the OpenList storage service.
//!
//! Every endpoint answers with the same JSON envelope:
//! `{"code": 200, "message": "success", "data": ...}`.

use serde::{Deserialize, Serialize};

use crate::domain::RemoteFile;

/// Code the service uses for a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

// ============================================================================
// Auth
// ============================================================================

/// Login request body
#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response data
#[derive(Debug, Deserialize)]
pub(super) struct LoginData {
    pub token: String,
}

// ============================================================================
// File system
// ============================================================================

/// Directory listing request body
#[derive(Debug, Serialize)]
pub(super) struct ListRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
    pub page: i64,
    /// 0 asks for every entry on one page.
    pub per_page: i64,
    pub refresh: bool,
}

/// Directory listing response data
#[derive(Debug, Deserialize)]
pub(super) struct ListData {
    /// `null` for an empty directory.
    #[serde(default)]
    pub content: Option<Vec<RemoteFile>>,
}

/// Mkdir request body
#[derive(Debug, Serialize)]
pub(super) struct MkdirRequest<'a> {
    pub path: &'a str,
}

/// Copy request body
#[derive(Debug, Serialize)]
pub(super) struct CopyRequest<'a> {
    pub src_dir: &'a str,
    pub dst_dir: &'a str,
    pub names: &'a [String],
}

/// Remove request body
#[derive(Debug, Serialize)]
pub(super) struct RemoveRequest<'a> {
    pub dir: &'a str,
    pub names: &'a [String],
}
