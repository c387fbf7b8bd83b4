// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use matchbook_domain::LicenseSearchResult;
use matchbook_fingerprint::{Fingerprint, FingerprintEngine};

use crate::config::ClientCredentials;
use crate::decode::{StartSearchRequest, StartSearchResponse};
use crate::error::Result;
use crate::fingerprinter::{sealed, Fingerprinter};
use crate::future::SearchFuture;
use crate::session::{ClientBuilder, Session, SessionKind};

/// Client for license searches: like a metadata search, but each match also
/// carries per-territory licensing policy data keyed by ISO 3166-1 alpha-2
/// territory code.
pub struct LicenseSearchClient {
    session: Arc<Session>,
    engine: Arc<dyn FingerprintEngine>,
}

impl LicenseSearchClient {
    pub async fn connect(credentials: ClientCredentials) -> Result<Self> {
        Self::connect_with(ClientBuilder::new(credentials)).await
    }

    pub async fn connect_with(builder: ClientBuilder) -> Result<Self> {
        let (session, engine) = builder.connect(SessionKind::License).await?;
        Ok(Self { session, engine })
    }

    /// Start a license search. One round trip to register the search; the
    /// result is retrieved through the returned future.
    pub async fn start_search(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<SearchFuture<LicenseSearchResult>> {
        let request = StartSearchRequest::new(fingerprint);
        let response: StartSearchResponse =
            self.session.post_json("v4/license/search", &request).await?;
        SearchFuture::new(
            self.session.clone(),
            "v4/license/search/check",
            response.lookup_ids,
        )
    }
}

impl sealed::HasEngine for LicenseSearchClient {
    fn engine(&self) -> &dyn FingerprintEngine {
        self.engine.as_ref()
    }
}

impl Fingerprinter for LicenseSearchClient {}
