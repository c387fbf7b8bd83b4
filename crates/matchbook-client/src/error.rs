// SPDX-License-Identifier: GPL-3.0-or-later

use matchbook_domain::{RemoteStatus, StatusCode};
use matchbook_fingerprint::FingerprintError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Error type for every client operation.
///
/// Remote errors (`Status`, `Transport`) carry a code from the service
/// status taxonomy. The remaining variants are local errors: they indicate
/// caller misuse or a malformed response and never carry a remote status
/// code.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An error reported by the service, surfaced verbatim.
    #[error("service error: {0}")]
    Status(#[from] RemoteStatus),

    /// The request never produced a service response. `code` is
    /// `DeadlineExceeded` for timeouts, `ConnectionError` otherwise.
    #[error("{code}: {source}")]
    Transport {
        code: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    /// The service response could not be mapped into the domain model. A
    /// single unparseable record fails the whole response; records are
    /// never silently skipped.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A search result was already fetched once. Local programming error.
    #[error("search result already consumed")]
    AlreadyConsumed,

    /// `next_event` was called on a stream session that already reached a
    /// terminal event or failed. Local programming error.
    #[error("stream session is no longer producing events")]
    StreamFinished,

    /// Fingerprint construction or loading failed before any network I/O.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),

    /// The configured service endpoint is not a valid URL.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ClientError {
    /// The status-taxonomy code, for remote and transport errors only.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status(status) => Some(status.code),
            ClientError::Transport { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether a caller-level retry is the prescribed remedy. The client
    /// never retries internally; submission is not idempotent in general.
    pub fn is_transient(&self) -> bool {
        self.status_code().is_some_and(|code| code.is_transient())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        let code = if source.is_timeout() {
            StatusCode::DeadlineExceeded
        } else {
            StatusCode::ConnectionError
        };
        ClientError::Transport { code, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_classification() {
        let err = ClientError::Status(RemoteStatus::new(StatusCode::LookupTimedOut, "timed out"));
        assert_eq!(err.status_code(), Some(StatusCode::LookupTimedOut));
        assert!(err.is_transient());

        let err = ClientError::Status(RemoteStatus::new(StatusCode::PermissionDenied, "nope"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_local_errors_carry_no_status_code() {
        assert_eq!(ClientError::AlreadyConsumed.status_code(), None);
        assert_eq!(ClientError::StreamFinished.status_code(), None);
        assert_eq!(ClientError::Decode("bad".into()).status_code(), None);
    }
}
