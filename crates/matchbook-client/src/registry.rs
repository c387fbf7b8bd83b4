// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use matchbook_domain::RegistrySearchResult;
use matchbook_fingerprint::{Fingerprint, FingerprintEngine};

use crate::config::ClientCredentials;
use crate::decode::{StartSearchRequest, StartSearchResponse};
use crate::error::Result;
use crate::fingerprinter::{sealed, Fingerprinter};
use crate::future::SearchFuture;
use crate::session::{ClientBuilder, Session, SessionKind};
use crate::stream::StreamSearchSession;

/// Client for aggregate searches against the full reference registry.
///
/// One submission fans out into one sub-job per fingerprint type, each with
/// its own lookup ID; the future batches them into a single check call and
/// returns one merged result. Live media is handled by
/// [`start_stream_search`](RegistrySearchClient::start_stream_search).
pub struct RegistrySearchClient {
    session: Arc<Session>,
    engine: Arc<dyn FingerprintEngine>,
}

impl RegistrySearchClient {
    pub async fn connect(credentials: ClientCredentials) -> Result<Self> {
        Self::connect_with(ClientBuilder::new(credentials)).await
    }

    pub async fn connect_with(builder: ClientBuilder) -> Result<Self> {
        let (session, engine) = builder.connect(SessionKind::Registry).await?;
        Ok(Self { session, engine })
    }

    /// Start a registry search. One round trip to register the search.
    pub async fn start_search(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<SearchFuture<RegistrySearchResult>> {
        let request = StartSearchRequest::new(fingerprint);
        let response: StartSearchResponse =
            self.session.post_json("v4/registry/search", &request).await?;
        SearchFuture::new(
            self.session.clone(),
            "v4/registry/search/check",
            response.lookup_ids,
        )
    }

    /// Start a continuous search over live or streamed media. One round
    /// trip to register the stream; events are then pulled one at a time
    /// through the returned session.
    pub async fn start_stream_search(&self, media_url: &str) -> Result<StreamSearchSession> {
        StreamSearchSession::start(self.session.clone(), media_url).await
    }
}

impl sealed::HasEngine for RegistrySearchClient {
    fn engine(&self) -> &dyn FingerprintEngine {
        self.engine.as_ref()
    }
}

impl Fingerprinter for RegistrySearchClient {}
