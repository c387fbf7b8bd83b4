// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FingerprintError>;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to read media: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid media input: {0}")]
    InvalidInput(String),

    #[error("invalid fingerprint dump: {0}")]
    InvalidDump(String),

    #[error("extraction engine failure: {0}")]
    Internal(String),
}
