// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire shapes and their mapping into the domain model.
//!
//! This client speaks a single wire generation: structured field-by-field
//! JSON. Decoding is strict where the domain has invariants: a segment with
//! an inverted range or a match lacking an identity fails the whole
//! response instead of being skipped, since dropped records are unacceptable
//! in an audit-sensitive domain.

use std::collections::HashMap;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use matchbook_domain::{
    Asset, FingerprintTypes, LicenseSearchMatch, LicenseSearchResult, LookupId,
    MetadataSearchMatch, MetadataSearchResult, PrivateSearchMatch, PrivateSearchResult,
    RegistrySearchMatch, RegistrySearchResult, Segment, SegmentType, TerritoryPolicy,
};
use matchbook_fingerprint::Fingerprint;

use crate::error::{ClientError, Result};

pub(crate) fn encode_fingerprint(fingerprint: &Fingerprint) -> String {
    BASE64_STANDARD.encode(fingerprint.as_bytes())
}

#[derive(Serialize)]
pub(crate) struct StartSearchRequest {
    pub fingerprint: String,
    pub types: FingerprintTypes,
}

impl StartSearchRequest {
    pub(crate) fn new(fingerprint: &Fingerprint) -> Self {
        Self {
            fingerprint: encode_fingerprint(fingerprint),
            types: fingerprint.types(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct StartSearchResponse {
    pub lookup_ids: Vec<LookupId>,
}

#[derive(Serialize)]
pub(crate) struct CheckSearchRequest<'a> {
    pub lookup_ids: &'a [LookupId],
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSegment {
    #[serde(rename = "type")]
    segment_type: SegmentType,
    query_start: i64,
    query_end: i64,
    asset_start: i64,
    asset_end: i64,
    confidence: f32,
    #[serde(default)]
    pitch: Option<f32>,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    melody_transposition: Option<f32>,
}

impl WireSegment {
    fn into_segment(self, match_index: usize, segment_index: usize) -> Result<Segment> {
        if self.query_start > self.query_end {
            return Err(ClientError::Decode(format!(
                "match {match_index} segment {segment_index}: query range [{}, {}) is inverted",
                self.query_start, self.query_end
            )));
        }
        if self.asset_start > self.asset_end {
            return Err(ClientError::Decode(format!(
                "match {match_index} segment {segment_index}: asset range [{}, {}) is inverted",
                self.asset_start, self.asset_end
            )));
        }
        if !self.confidence.is_finite() {
            return Err(ClientError::Decode(format!(
                "match {match_index} segment {segment_index}: confidence is not finite"
            )));
        }
        Ok(Segment {
            segment_type: self.segment_type,
            query_start: self.query_start,
            query_end: self.query_end,
            asset_start: self.asset_start,
            asset_end: self.asset_end,
            confidence: self.confidence,
            pitch: self.pitch,
            speed: self.speed,
            melody_transposition: self.melody_transposition,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMatch {
    #[serde(default)]
    asset: Option<Asset>,
    #[serde(default)]
    provided_id: Option<String>,
    #[serde(default)]
    segments: Vec<WireSegment>,
    #[serde(default)]
    policies: Option<HashMap<String, TerritoryPolicy>>,
}

/// Response body of every check call; the variants each read the subset of
/// fields their result shape needs.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckSearchResponse {
    #[serde(default)]
    pub ugc_id: Option<u64>,
    #[serde(default)]
    pub matches: Vec<WireMatch>,
}

pub(crate) mod sealed {
    use matchbook_domain::LookupId;

    use super::CheckSearchResponse;
    use crate::error::Result;

    /// Maps one raw check response into a variant result. Lives behind the
    /// seal so the wire types stay crate-private.
    pub trait DecodeCheck: Sized {
        fn decode(lookup_ids: &[LookupId], raw: CheckSearchResponse) -> Result<Self>;
    }
}

/// Marker for the result types a [`SearchFuture`](crate::SearchFuture) can
/// produce. Sealed; implemented only by the per-variant result types.
pub trait DecodeCheck: sealed::DecodeCheck {}

impl<T: sealed::DecodeCheck> DecodeCheck for T {}

fn decode_segments(match_index: usize, segments: Vec<WireSegment>) -> Result<Vec<Segment>> {
    segments
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.into_segment(match_index, i))
        .collect()
}

fn require_asset(match_index: usize, asset: Option<Asset>) -> Result<Asset> {
    asset.ok_or_else(|| ClientError::Decode(format!("match {match_index} has no asset")))
}

fn single_lookup_id(lookup_ids: &[LookupId]) -> Result<LookupId> {
    lookup_ids
        .first()
        .cloned()
        .ok_or_else(|| ClientError::Decode("search job has no lookup ID".to_string()))
}

impl sealed::DecodeCheck for MetadataSearchResult {
    fn decode(lookup_ids: &[LookupId], raw: CheckSearchResponse) -> Result<Self> {
        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                Ok(MetadataSearchMatch {
                    asset: require_asset(i, m.asset)?,
                    segments: decode_segments(i, m.segments)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(MetadataSearchResult {
            lookup_id: single_lookup_id(lookup_ids)?,
            matches,
        })
    }
}

impl sealed::DecodeCheck for LicenseSearchResult {
    fn decode(lookup_ids: &[LookupId], raw: CheckSearchResponse) -> Result<Self> {
        let ugc_id = raw
            .ugc_id
            .ok_or_else(|| ClientError::Decode("license result has no ugc_id".to_string()))?;
        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                Ok(LicenseSearchMatch {
                    asset: require_asset(i, m.asset)?,
                    segments: decode_segments(i, m.segments)?,
                    // A match the service reports without policy data has an
                    // empty territory map, not a decode failure.
                    policies: m.policies.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LicenseSearchResult {
            lookup_id: single_lookup_id(lookup_ids)?,
            ugc_id,
            matches,
        })
    }
}

impl sealed::DecodeCheck for PrivateSearchResult {
    fn decode(lookup_ids: &[LookupId], raw: CheckSearchResponse) -> Result<Self> {
        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let provided_id = m.provided_id.ok_or_else(|| {
                    ClientError::Decode(format!("match {i} has no provided_id"))
                })?;
                Ok(PrivateSearchMatch {
                    provided_id,
                    segments: decode_segments(i, m.segments)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PrivateSearchResult {
            lookup_id: single_lookup_id(lookup_ids)?,
            matches,
        })
    }
}

impl sealed::DecodeCheck for RegistrySearchResult {
    fn decode(lookup_ids: &[LookupId], raw: CheckSearchResponse) -> Result<Self> {
        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                Ok(RegistrySearchMatch {
                    asset: require_asset(i, m.asset)?,
                    segments: decode_segments(i, m.segments)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RegistrySearchResult {
            lookup_ids: lookup_ids.to_vec(),
            matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::sealed::DecodeCheck as _;
    use super::*;
    use matchbook_domain::PolicyVerdict;

    fn raw(body: serde_json::Value) -> CheckSearchResponse {
        serde_json::from_value(body).unwrap()
    }

    fn lookup_ids() -> Vec<LookupId> {
        vec![LookupId::from("lk-1")]
    }

    #[test]
    fn test_inverted_query_range_rejected() {
        let response = raw(serde_json::json!({
            "matches": [{
                "asset": {"id": "a", "title": "t", "artist": "x"},
                "segments": [{
                    "type": "audio",
                    "query_start": 30, "query_end": 10,
                    "asset_start": 0, "asset_end": 20,
                    "confidence": 0.9
                }]
            }]
        }));
        let result = MetadataSearchResult::decode(&lookup_ids(), response);
        match result {
            Err(ClientError::Decode(message)) => assert!(message.contains("query range")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_asset_range_rejected() {
        let response = raw(serde_json::json!({
            "matches": [{
                "asset": {"id": "a", "title": "t", "artist": "x"},
                "segments": [{
                    "type": "video",
                    "query_start": 0, "query_end": 10,
                    "asset_start": 20, "asset_end": 5,
                    "confidence": 0.9
                }]
            }]
        }));
        assert!(matches!(
            MetadataSearchResult::decode(&lookup_ids(), response),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_ranges_allowed() {
        // [x, x) is a legal empty half-open range.
        let response = raw(serde_json::json!({
            "matches": [{
                "asset": {"id": "a", "title": "t", "artist": "x"},
                "segments": [{
                    "type": "melody",
                    "query_start": 10, "query_end": 10,
                    "asset_start": 4, "asset_end": 4,
                    "confidence": 0.4
                }]
            }]
        }));
        let result = MetadataSearchResult::decode(&lookup_ids(), response).unwrap();
        assert_eq!(result.matches[0].segments[0].query_duration(), 0);
    }

    #[test]
    fn test_optional_adjustments_tolerated() {
        let response = raw(serde_json::json!({
            "matches": [{
                "asset": {"id": "a", "title": "t", "artist": "x"},
                "segments": [{
                    "type": "audio",
                    "query_start": 0, "query_end": 10,
                    "asset_start": 0, "asset_end": 10,
                    "confidence": 0.8,
                    "pitch": 1.5
                }]
            }]
        }));
        let result = MetadataSearchResult::decode(&lookup_ids(), response).unwrap();
        let segment = &result.matches[0].segments[0];
        assert_eq!(segment.pitch, Some(1.5));
        assert_eq!(segment.speed, None);
        assert_eq!(segment.melody_transposition, None);
    }

    #[test]
    fn test_match_without_identity_rejected() {
        let response = raw(serde_json::json!({"matches": [{"segments": []}]}));
        assert!(matches!(
            MetadataSearchResult::decode(&lookup_ids(), response),
            Err(ClientError::Decode(_))
        ));
        let response = raw(serde_json::json!({"matches": [{"segments": []}]}));
        assert!(matches!(
            PrivateSearchResult::decode(&lookup_ids(), response),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_license_policies_grouped_by_territory() {
        let response = raw(serde_json::json!({
            "ugc_id": 77,
            "matches": [{
                "asset": {"id": "a", "title": "t", "artist": "x"},
                "segments": [],
                "policies": {
                    "US": [
                        {"rightsholder": {"id": 1, "title": "First"},
                         "policy": {"id": 10, "category_id": 100, "category_name": "monetize"}},
                        {"rightsholder": {"id": 2, "title": "Second"},
                         "policy": {"id": 11, "category_id": 101, "category_name": "track"}}
                    ],
                    "DE": "block"
                }
            }]
        }));
        let result = LicenseSearchResult::decode(&lookup_ids(), response).unwrap();
        assert_eq!(result.ugc_id, 77);
        let policies = &result.matches[0].policies;
        match &policies["US"] {
            TerritoryPolicy::Rightsholders(list) => {
                // Service-provided order within a territory is preserved.
                assert_eq!(list[0].rightsholder.title, "First");
                assert_eq!(list[1].rightsholder.title, "Second");
            }
            other => panic!("expected rightsholder list, got {other:?}"),
        }
        assert_eq!(
            policies["DE"],
            TerritoryPolicy::Verdict(PolicyVerdict::Block)
        );
    }

    #[test]
    fn test_match_order_preserved() {
        let response = raw(serde_json::json!({
            "matches": [
                {"provided_id": "second-ingested", "segments": []},
                {"provided_id": "first-ingested", "segments": []}
            ]
        }));
        let result = PrivateSearchResult::decode(&lookup_ids(), response).unwrap();
        // Service response order, no client-side resort.
        assert_eq!(result.matches[0].provided_id, "second-ingested");
        assert_eq!(result.matches[1].provided_id, "first-ingested");
    }

    #[test]
    fn test_registry_result_keeps_all_lookup_ids() {
        let ids = vec![LookupId::from("lk-a"), LookupId::from("lk-b")];
        let response = raw(serde_json::json!({"matches": []}));
        let result = RegistrySearchResult::decode(&ids, response).unwrap();
        assert_eq!(result.lookup_ids, ids);
    }
}
