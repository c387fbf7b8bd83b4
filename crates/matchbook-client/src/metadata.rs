// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use matchbook_domain::MetadataSearchResult;
use matchbook_fingerprint::{Fingerprint, FingerprintEngine};

use crate::config::ClientCredentials;
use crate::decode::{StartSearchRequest, StartSearchResponse};
use crate::error::Result;
use crate::fingerprinter::{sealed, Fingerprinter};
use crate::future::SearchFuture;
use crate::session::{ClientBuilder, Session, SessionKind};

/// Client for metadata searches: matches a query fingerprint against the
/// reference registry and returns matched assets with their metadata.
pub struct MetadataSearchClient {
    session: Arc<Session>,
    engine: Arc<dyn FingerprintEngine>,
}

impl MetadataSearchClient {
    /// Connect with default configuration. Performs the one-time auth
    /// handshake; the session is reused for the client's whole lifetime.
    pub async fn connect(credentials: ClientCredentials) -> Result<Self> {
        Self::connect_with(ClientBuilder::new(credentials)).await
    }

    pub async fn connect_with(builder: ClientBuilder) -> Result<Self> {
        let (session, engine) = builder.connect(SessionKind::Metadata).await?;
        Ok(Self { session, engine })
    }

    /// Start a metadata search. Does not block until the search finishes,
    /// but does perform one network round trip to register the search on
    /// the backend. On failure no job state is left behind.
    pub async fn start_search(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<SearchFuture<MetadataSearchResult>> {
        let request = StartSearchRequest::new(fingerprint);
        let response: StartSearchResponse =
            self.session.post_json("v4/metadata/search", &request).await?;
        SearchFuture::new(
            self.session.clone(),
            "v4/metadata/search/check",
            response.lookup_ids,
        )
    }
}

impl sealed::HasEngine for MetadataSearchClient {
    fn engine(&self) -> &dyn FingerprintEngine {
        self.engine.as_ref()
    }
}

impl Fingerprinter for MetadataSearchClient {}
