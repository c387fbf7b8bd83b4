// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use matchbook_domain::FingerprintTypes;

use crate::error::{FingerprintError, Result};
use crate::fingerprint::Fingerprint;

/// The extraction engine that turns media into fingerprints.
///
/// Extraction is CPU-bound and local; the engine performs no network I/O.
/// Implementations must be deterministic: the same media bytes and type mask
/// always yield the same fingerprint.
pub trait FingerprintEngine: Send + Sync {
    /// Fingerprint a media file on disk. The file must be in a supported
    /// format and longer than one second.
    fn from_file(&self, path: &Path, types: FingerprintTypes) -> Result<Fingerprint>;

    /// Fingerprint a media file already loaded into memory.
    fn from_buffer(&self, media: &[u8], types: FingerprintTypes) -> Result<Fingerprint>;
}

/// Deterministic content-addressed reference engine.
///
/// Hashes the media bytes together with the requested type mask. It carries
/// no perceptual model and exists as the default engine for wiring, testing
/// and development; production deployments plug in a real codec-backed
/// engine through [`FingerprintEngine`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DigestEngine;

impl DigestEngine {
    pub fn new() -> Self {
        DigestEngine
    }
}

impl FingerprintEngine for DigestEngine {
    fn from_file(&self, path: &Path, types: FingerprintTypes) -> Result<Fingerprint> {
        let media = std::fs::read(path)?;
        debug!(
            target: "fingerprint",
            "read {} bytes from {}",
            media.len(),
            path.display()
        );
        self.from_buffer(&media, types)
    }

    fn from_buffer(&self, media: &[u8], types: FingerprintTypes) -> Result<Fingerprint> {
        if media.is_empty() {
            return Err(FingerprintError::InvalidInput(
                "media input is empty".to_string(),
            ));
        }
        if types.is_empty() {
            return Err(FingerprintError::InvalidInput(
                "no fingerprint types requested".to_string(),
            ));
        }

        let mut hasher = Sha256::new();
        hasher.update([types.bits()]);
        hasher.update(media);
        let digest = hasher.finalize();

        Fingerprint::from_engine_output(digest.to_vec(), types)
    }
}
