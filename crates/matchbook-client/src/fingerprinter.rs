// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use matchbook_domain::FingerprintTypes;
use matchbook_fingerprint::Fingerprint;

use crate::error::Result;

pub(crate) mod sealed {
    use matchbook_fingerprint::FingerprintEngine;

    pub trait HasEngine {
        fn engine(&self) -> &dyn FingerprintEngine;
    }
}

/// Fingerprinting capability carried by every client variant.
///
/// All variants expose the same three operations by delegating to the
/// extraction engine they were built with; the engine itself performs no
/// network I/O.
pub trait Fingerprinter: sealed::HasEngine {
    /// Fingerprint a media file stored on disk.
    fn fingerprint_from_file(&self, path: &Path, types: FingerprintTypes) -> Result<Fingerprint> {
        Ok(self.engine().from_file(path, types)?)
    }

    /// Fingerprint a media file loaded in memory.
    fn fingerprint_from_buffer(
        &self,
        media: &[u8],
        types: FingerprintTypes,
    ) -> Result<Fingerprint> {
        Ok(self.engine().from_buffer(media, types)?)
    }

    /// Restore a fingerprint previously serialized with
    /// [`Fingerprint::dump`].
    fn load_fingerprint(&self, dump: &[u8]) -> Result<Fingerprint> {
        Ok(Fingerprint::load(dump)?)
    }
}
