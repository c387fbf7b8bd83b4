// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use matchbook_domain::{CatalogPage, Cursor, FingerprintTypes};
use matchbook_fingerprint::Fingerprint;

use crate::decode::encode_fingerprint;
use crate::error::Result;
use crate::session::Session;

#[derive(Serialize)]
struct IngestRequest<'a> {
    provided_id: &'a str,
    fingerprint: String,
    types: FingerprintTypes,
}

#[derive(Serialize)]
struct ArchiveRequest<'a> {
    provided_id: &'a str,
    types: FingerprintTypes,
}

/// Ingestion, archival and listing against the caller's private catalog.
///
/// Obtained from [`PrivateSearchClient::catalog`](crate::PrivateSearchClient::catalog);
/// shares that client's session, so operations issued through both are
/// serialized against each other. Holds no client-side cache: every page
/// fetch is an independent round trip against live server state.
pub struct CatalogManager {
    session: Arc<Session>,
}

impl CatalogManager {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Register a fingerprint under a caller-chosen ID, unique within the
    /// authenticated catalog. The ID comes back as `provided_id` on private
    /// search matches.
    pub async fn ingest(&self, provided_id: &str, fingerprint: &Fingerprint) -> Result<()> {
        debug!(target: "matchbook", "ingest {provided_id} ({})", fingerprint.types());
        self.session
            .post_empty(
                "v4/private/ingest",
                &IngestRequest {
                    provided_id,
                    fingerprint: encode_fingerprint(fingerprint),
                    types: fingerprint.types(),
                },
            )
            .await
    }

    /// Soft-delete the given fingerprint types of an entry. Archived types
    /// no longer produce matches; the entry itself stays enumerable through
    /// [`list`](CatalogManager::list) for audit purposes.
    pub async fn archive(&self, provided_id: &str, types: FingerprintTypes) -> Result<()> {
        debug!(target: "matchbook", "archive {provided_id} ({types})");
        self.session
            .post_empty(
                "v4/private/archive",
                &ArchiveRequest { provided_id, types },
            )
            .await
    }

    /// Fetch one page of the catalog. Loop, passing each page's
    /// `end_cursor` back as `after`, until `has_next_page` is false to
    /// enumerate the whole catalog. Cursors are opaque and may expire; a
    /// stale cursor fails the call rather than restarting the listing.
    pub async fn list(&self, limit: u32, after: Option<&Cursor>) -> Result<CatalogPage> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(cursor) = after {
            query.push(("after", cursor.as_str().to_string()));
        }
        self.session.get_json("v4/private/catalog", &query).await
    }
}
