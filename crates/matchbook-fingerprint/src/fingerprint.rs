// SPDX-License-Identifier: GPL-3.0-or-later

use matchbook_domain::FingerprintTypes;

use crate::error::{FingerprintError, Result};

/// Serialized-dump container magic.
const DUMP_MAGIC: &[u8; 4] = b"MBFP";
const DUMP_VERSION: u8 = 1;
/// magic + version + type bits + u32 payload length
const DUMP_HEADER_LEN: usize = 4 + 1 + 1 + 4;

/// An immutable, opaque content identifier produced by an extraction engine.
///
/// The blob's layout belongs to the engine and the backend service; the
/// client never interprets it. The same media input always yields the same
/// fingerprint. Instances can only be obtained from a
/// [`FingerprintEngine`](crate::FingerprintEngine) or from
/// [`Fingerprint::load`], so no empty handle is ever reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    data: Vec<u8>,
    types: FingerprintTypes,
}

impl Fingerprint {
    /// Wrap an engine-produced blob. Rejects empty blobs and empty type
    /// masks so operations never see a hollow handle.
    pub fn from_engine_output(data: Vec<u8>, types: FingerprintTypes) -> Result<Self> {
        if data.is_empty() {
            return Err(FingerprintError::InvalidInput(
                "extraction engine produced an empty fingerprint".to_string(),
            ));
        }
        if types.is_empty() {
            return Err(FingerprintError::InvalidInput(
                "fingerprint must cover at least one fingerprint type".to_string(),
            ));
        }
        Ok(Self { data, types })
    }

    /// The opaque fingerprint payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Which fingerprint types this handle covers.
    pub fn types(&self) -> FingerprintTypes {
        self.types
    }

    /// Serialize the fingerprint so it can be stored on disk or in a
    /// database and later restored with [`Fingerprint::load`].
    pub fn dump(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(DUMP_HEADER_LEN + self.data.len());
        out.extend_from_slice(DUMP_MAGIC);
        out.push(DUMP_VERSION);
        out.push(self.types.bits());
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Restore a fingerprint previously serialized with
    /// [`Fingerprint::dump`]. Round-trip is exact: the restored handle is
    /// interchangeable with the original in any search.
    pub fn load(dump: &[u8]) -> Result<Self> {
        if dump.len() < DUMP_HEADER_LEN {
            return Err(FingerprintError::InvalidDump(format!(
                "dump too short: {} bytes",
                dump.len()
            )));
        }
        if &dump[..4] != DUMP_MAGIC {
            return Err(FingerprintError::InvalidDump(
                "bad magic, not a fingerprint dump".to_string(),
            ));
        }
        let version = dump[4];
        if version != DUMP_VERSION {
            return Err(FingerprintError::InvalidDump(format!(
                "unsupported dump version {version}"
            )));
        }
        let types = FingerprintTypes::from_bits_truncate(dump[5]);
        let declared_len = u32::from_be_bytes([dump[6], dump[7], dump[8], dump[9]]) as usize;
        let payload = &dump[DUMP_HEADER_LEN..];
        if payload.len() != declared_len {
            return Err(FingerprintError::InvalidDump(format!(
                "payload length mismatch: header says {declared_len}, got {}",
                payload.len()
            )));
        }
        Self::from_engine_output(payload.to_vec(), types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fingerprint {
        Fingerprint::from_engine_output(vec![0xAB; 48], FingerprintTypes::ALL).unwrap()
    }

    #[test]
    fn test_dump_load_round_trip() {
        let fp = sample();
        let restored = Fingerprint::load(&fp.dump()).unwrap();
        assert_eq!(restored, fp);
        assert_eq!(restored.types(), FingerprintTypes::ALL);
    }

    #[test]
    fn test_dump_round_trip_preserves_type_mask() {
        let types = FingerprintTypes::AUDIO.union(FingerprintTypes::MELODY);
        let fp = Fingerprint::from_engine_output(vec![1, 2, 3], types).unwrap();
        let restored = Fingerprint::load(&fp.dump()).unwrap();
        assert_eq!(restored.types(), types);
        assert_eq!(restored.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_load_rejects_bad_magic() {
        let mut dump = sample().dump();
        dump[0] = b'X';
        assert!(matches!(
            Fingerprint::load(&dump),
            Err(FingerprintError::InvalidDump(_))
        ));
    }

    #[test]
    fn test_load_rejects_short_input() {
        assert!(matches!(
            Fingerprint::load(b"MBFP"),
            Err(FingerprintError::InvalidDump(_))
        ));
    }

    #[test]
    fn test_load_rejects_truncated_payload() {
        let mut dump = sample().dump();
        dump.truncate(dump.len() - 1);
        assert!(matches!(
            Fingerprint::load(&dump),
            Err(FingerprintError::InvalidDump(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let mut dump = sample().dump();
        dump[4] = 9;
        assert!(matches!(
            Fingerprint::load(&dump),
            Err(FingerprintError::InvalidDump(_))
        ));
    }

    #[test]
    fn test_empty_blob_rejected() {
        assert!(Fingerprint::from_engine_output(vec![], FingerprintTypes::ALL).is_err());
        assert!(Fingerprint::from_engine_output(vec![1], FingerprintTypes::empty()).is_err());
    }
}
