// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Which fingerprint component a segment matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Audio,
    Video,
    Melody,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::Audio => "audio",
            SegmentType::Video => "video",
            SegmentType::Melody => "melody",
        }
    }
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SegmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(SegmentType::Audio),
            "video" => Ok(SegmentType::Video),
            "melody" => Ok(SegmentType::Melody),
            other => Err(format!("unknown segment type: {other}")),
        }
    }
}

/// A matched time range: the half-open interval `[start, end)` on both the
/// query and asset timelines, in seconds.
///
/// The pitch/speed/melody-transposition adjustments are present only when the
/// underlying match detected the corresponding transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub query_start: i64,
    pub query_end: i64,
    pub asset_start: i64,
    pub asset_end: i64,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub melody_transposition: Option<f32>,
}

impl Segment {
    /// Length of the matched range on the query timeline, in seconds.
    pub fn query_duration(&self) -> i64 {
        self.query_end - self.query_start
    }

    /// Length of the matched range on the asset timeline, in seconds.
    pub fn asset_duration(&self) -> i64 {
        self.asset_end - self.asset_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_type_round_trip() {
        for t in [SegmentType::Audio, SegmentType::Video, SegmentType::Melody] {
            let parsed: SegmentType = t.as_str().parse().unwrap();
            assert_eq!(parsed, t);
        }
        assert!("hologram".parse::<SegmentType>().is_err());
    }

    #[test]
    fn test_segment_durations() {
        let segment = Segment {
            segment_type: SegmentType::Audio,
            query_start: 10,
            query_end: 35,
            asset_start: 120,
            asset_end: 145,
            confidence: 0.92,
            pitch: None,
            speed: None,
            melody_transposition: None,
        };
        assert_eq!(segment.query_duration(), 25);
        assert_eq!(segment.asset_duration(), 25);
    }

    #[test]
    fn test_optional_adjustments_absent_from_wire() {
        let segment = Segment {
            segment_type: SegmentType::Melody,
            query_start: 0,
            query_end: 5,
            asset_start: 0,
            asset_end: 5,
            confidence: 0.5,
            pitch: None,
            // 1.5 is exact in both f32 and f64, so the JSON value compares
            // cleanly.
            speed: Some(1.5),
            melody_transposition: None,
        };
        let json = serde_json::to_value(&segment).unwrap();
        assert!(json.get("pitch").is_none());
        assert!(json.get("melody_transposition").is_none());
        assert_eq!(json["speed"], 1.5);
    }
}
