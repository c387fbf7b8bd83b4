// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// A reference-registry asset that a query fingerprint matched against.
///
/// Searches performed through the client match against assets representing
/// copyrighted works. Not every field is populated for every asset kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque identifier assigned by the service.
    pub id: String,
    /// Kind of work, e.g. "recording" or "composition".
    #[serde(rename = "type", default)]
    pub asset_type: Option<String>,
    pub title: String,
    pub artist: String,
    /// International Standard Recording Code, when known.
    #[serde(default)]
    pub isrc: Option<String>,
    /// The label that owns the asset.
    #[serde(default)]
    pub label: Option<String>,
    /// Total duration of the asset in seconds.
    #[serde(default)]
    pub duration: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_asset_decodes() {
        let asset: Asset = serde_json::from_str(
            r#"{"id": "a-1", "title": "Holocene", "artist": "Bon Iver"}"#,
        )
        .unwrap();
        assert_eq!(asset.id, "a-1");
        assert_eq!(asset.asset_type, None);
        assert_eq!(asset.isrc, None);
        assert_eq!(asset.duration, None);
    }
}
