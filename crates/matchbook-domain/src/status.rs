// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Stable status taxonomy shared by every operation of the identification
/// service. The wire representation is the SCREAMING_SNAKE form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    DeadlineExceeded,
    PermissionDenied,
    Unauthenticated,
    NotFound,
    InvalidInput,
    OutOfMemory,
    InternalError,
    NotInitialized,
    ConnectionError,
    LookupFailed,
    LookupTimedOut,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            StatusCode::PermissionDenied => "PERMISSION_DENIED",
            StatusCode::Unauthenticated => "UNAUTHENTICATED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::InvalidInput => "INVALID_INPUT",
            StatusCode::OutOfMemory => "OUT_OF_MEMORY",
            StatusCode::InternalError => "INTERNAL_ERROR",
            StatusCode::NotInitialized => "NOT_INITIALIZED",
            StatusCode::ConnectionError => "CONNECTION_ERROR",
            StatusCode::LookupFailed => "LOOKUP_FAILED",
            StatusCode::LookupTimedOut => "LOOKUP_TIMED_OUT",
        }
    }

    /// Whether a caller-level retry is the prescribed remedy. The client
    /// itself never retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StatusCode::DeadlineExceeded | StatusCode::ConnectionError | StatusCode::LookupTimedOut
        )
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the service: a status code plus the service-provided
/// message, surfaced verbatim. Also embedded in `SearchError` stream events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RemoteStatus {
    pub code: StatusCode,
    pub message: String,
}

impl RemoteStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
