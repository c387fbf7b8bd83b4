// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use matchbook_domain::PrivateSearchResult;
use matchbook_fingerprint::{Fingerprint, FingerprintEngine};

use crate::catalog::CatalogManager;
use crate::config::ClientCredentials;
use crate::decode::{StartSearchRequest, StartSearchResponse};
use crate::error::Result;
use crate::fingerprinter::{sealed, Fingerprinter};
use crate::future::SearchFuture;
use crate::session::{ClientBuilder, Session, SessionKind};

/// Client for searches against the caller's own catalog.
///
/// The catalog is determined by the credentials used at connect time; to
/// work with several catalogs in one application, connect several clients.
/// Matches identify entries by the caller-chosen ID supplied at ingestion.
pub struct PrivateSearchClient {
    session: Arc<Session>,
    engine: Arc<dyn FingerprintEngine>,
}

impl PrivateSearchClient {
    pub async fn connect(credentials: ClientCredentials) -> Result<Self> {
        Self::connect_with(ClientBuilder::new(credentials)).await
    }

    pub async fn connect_with(builder: ClientBuilder) -> Result<Self> {
        let (session, engine) = builder.connect(SessionKind::Private).await?;
        Ok(Self { session, engine })
    }

    /// Start a search against the private catalog. One round trip to
    /// register the search.
    pub async fn start_search(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<SearchFuture<PrivateSearchResult>> {
        let request = StartSearchRequest::new(fingerprint);
        let response: StartSearchResponse =
            self.session.post_json("v4/private/search", &request).await?;
        SearchFuture::new(
            self.session.clone(),
            "v4/private/search/check",
            response.lookup_ids,
        )
    }

    /// Catalog operations (ingest, archive, list) sharing this client's
    /// session; operations on the same session are serialized.
    pub fn catalog(&self) -> CatalogManager {
        CatalogManager::new(self.session.clone())
    }
}

impl sealed::HasEngine for PrivateSearchClient {
    fn engine(&self) -> &dyn FingerprintEngine {
        self.engine.as_ref()
    }
}

impl Fingerprinter for PrivateSearchClient {}
