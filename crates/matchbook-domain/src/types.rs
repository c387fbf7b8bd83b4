// SPDX-License-Identifier: GPL-3.0-or-later

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bitmask selecting which fingerprint kinds an operation covers.
///
/// A fingerprint can carry video, audio and melody components; searches and
/// catalog operations address any subset of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerprintTypes(u8);

impl FingerprintTypes {
    pub const VIDEO: FingerprintTypes = FingerprintTypes(1);
    pub const AUDIO: FingerprintTypes = FingerprintTypes(1 << 1);
    pub const MELODY: FingerprintTypes = FingerprintTypes(1 << 2);
    pub const ALL: FingerprintTypes = FingerprintTypes(0b111);

    pub fn empty() -> Self {
        FingerprintTypes(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn union(self, other: FingerprintTypes) -> Self {
        FingerprintTypes(self.0 | other.0)
    }

    pub fn contains(&self, other: FingerprintTypes) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bitmask value as serialized into fingerprint dumps.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Rebuild a mask from its raw value, dropping unknown bits.
    pub fn from_bits_truncate(bits: u8) -> Self {
        FingerprintTypes(bits & Self::ALL.0)
    }

    /// The individual set members, in wire order.
    pub fn members(&self) -> impl Iterator<Item = FingerprintTypes> + '_ {
        [Self::VIDEO, Self::AUDIO, Self::MELODY]
            .into_iter()
            .filter(|t| self.contains(*t))
    }

    fn member_name(self) -> Option<&'static str> {
        match self {
            Self::VIDEO => Some("video"),
            Self::AUDIO => Some("audio"),
            Self::MELODY => Some("melody"),
            _ => None,
        }
    }

    fn from_member_name(name: &str) -> Option<Self> {
        match name {
            "video" => Some(Self::VIDEO),
            "audio" => Some(Self::AUDIO),
            "melody" => Some(Self::MELODY),
            _ => None,
        }
    }
}

impl Default for FingerprintTypes {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::fmt::Display for FingerprintTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for member in self.members() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(member.member_name().unwrap_or("unknown"))?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

// On the wire the mask travels as a list of member names.
impl Serialize for FingerprintTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<&str> = self.members().filter_map(|m| m.member_name()).collect();
        names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FingerprintTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut mask = FingerprintTypes::empty();
        for name in &names {
            let member = FingerprintTypes::from_member_name(name)
                .ok_or_else(|| D::Error::custom(format!("unknown fingerprint type: {name}")))?;
            mask = mask.union(member);
        }
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_contains() {
        let mask = FingerprintTypes::AUDIO.union(FingerprintTypes::MELODY);
        assert!(mask.contains(FingerprintTypes::AUDIO));
        assert!(mask.contains(FingerprintTypes::MELODY));
        assert!(!mask.contains(FingerprintTypes::VIDEO));
        assert!(FingerprintTypes::ALL.contains(mask));
    }

    #[test]
    fn test_display() {
        assert_eq!(FingerprintTypes::ALL.to_string(), "video|audio|melody");
        assert_eq!(FingerprintTypes::empty().to_string(), "none");
        assert_eq!(FingerprintTypes::AUDIO.to_string(), "audio");
    }

    #[test]
    fn test_bits_round_trip() {
        let mask = FingerprintTypes::VIDEO.union(FingerprintTypes::MELODY);
        assert_eq!(FingerprintTypes::from_bits_truncate(mask.bits()), mask);
        // Unknown high bits are dropped.
        assert_eq!(
            FingerprintTypes::from_bits_truncate(0xFF),
            FingerprintTypes::ALL
        );
    }

    #[test]
    fn test_wire_round_trip() {
        let mask = FingerprintTypes::AUDIO.union(FingerprintTypes::VIDEO);
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, "[\"video\",\"audio\"]");
        let parsed: FingerprintTypes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mask);
    }

    #[test]
    fn test_unknown_wire_name_rejected() {
        let result = serde_json::from_str::<FingerprintTypes>("[\"hologram\"]");
        assert!(result.is_err());
    }
}
