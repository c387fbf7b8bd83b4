// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::types::FingerprintTypes;

/// Opaque pagination continuation token. Never interpreted client-side, only
/// passed back verbatim on the next page request. Cursors may expire; a
/// request with a stale cursor fails rather than restarting the listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(pub String);

impl Cursor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the caller's private catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Caller-chosen ID, unique within the authenticated catalog.
    pub provided_id: String,
    /// Which fingerprint kinds were ingested for this entry.
    pub fingerprint_types: FingerprintTypes,
    /// Soft-deleted: excluded from future matching but kept enumerable for
    /// audit purposes.
    #[serde(default)]
    pub archived: bool,
}

/// One page of a catalog listing. The catalog may mutate between page
/// fetches; no snapshot isolation across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    /// Cursor to pass as `after` on the next call; `None` on the last page.
    pub end_cursor: Option<Cursor>,
    /// `false` guarantees no further entries existed at call time.
    pub has_next_page: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_page_decodes() {
        let page: CatalogPage = serde_json::from_str(
            r#"{
                "entries": [
                    {"provided_id": "vid-1", "fingerprint_types": ["audio", "melody"]},
                    {"provided_id": "vid-2", "fingerprint_types": ["video"], "archived": true}
                ],
                "end_cursor": "b3BhcXVl",
                "has_next_page": true
            }"#,
        )
        .unwrap();
        assert_eq!(page.entries.len(), 2);
        assert!(!page.entries[0].archived);
        assert!(page.entries[1].archived);
        assert_eq!(page.end_cursor, Some(Cursor("b3BhcXVl".to_string())));
        assert!(page.has_next_page);
    }
}
