// SPDX-License-Identifier: GPL-3.0-or-later

use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use matchbook_domain::LookupId;

use crate::decode::sealed::DecodeCheck as _;
use crate::decode::{CheckSearchRequest, CheckSearchResponse, DecodeCheck};
use crate::error::{ClientError, Result};
use crate::session::Session;

/// Handle for a submitted search: submit-then-poll, one result, fetched at
/// most once.
///
/// Returned by the `start_search` methods. [`SearchFuture::get`] blocks until
/// the service reports completion and consumes the job; a second call fails
/// with [`ClientError::AlreadyConsumed`]. Racing callers on the same future
/// are serialized so exactly one of them obtains the result.
///
/// Variants that fan one fingerprint out into several sub-jobs batch all
/// their lookup IDs into the single check round trip and return one merged
/// result.
pub struct SearchFuture<R: DecodeCheck> {
    session: Arc<Session>,
    check_path: &'static str,
    lookup_ids: Vec<LookupId>,
    consumed: Mutex<bool>,
    _result: PhantomData<fn() -> R>,
}

impl<R: DecodeCheck> SearchFuture<R> {
    pub(crate) fn new(
        session: Arc<Session>,
        check_path: &'static str,
        lookup_ids: Vec<LookupId>,
    ) -> Result<Self> {
        if lookup_ids.is_empty() {
            return Err(ClientError::Decode(
                "search submission returned no lookup IDs".to_string(),
            ));
        }
        Ok(Self {
            session,
            check_path,
            lookup_ids,
            consumed: Mutex::new(false),
            _result: PhantomData,
        })
    }

    /// The server-assigned IDs of this job's sub-searches. Opaque; useful
    /// for diagnostics.
    pub fn lookup_ids(&self) -> &[LookupId] {
        &self.lookup_ids
    }

    /// Block until the search result is ready, return it, and consume the
    /// job.
    ///
    /// Performs exactly one check round trip, no internal retry. A transport
    /// or service failure leaves the job unconsumed so the caller can decide
    /// to call `get` again; only a successfully returned result consumes it.
    pub async fn get(&self) -> Result<R> {
        let mut consumed = self.consumed.lock().await;
        if *consumed {
            return Err(ClientError::AlreadyConsumed);
        }

        let request = CheckSearchRequest {
            lookup_ids: &self.lookup_ids,
        };
        let raw: CheckSearchResponse = self.session.post_json(self.check_path, &request).await?;
        let result = R::decode(&self.lookup_ids, raw)?;

        *consumed = true;
        debug!(target: "matchbook", "search consumed: {:?}", self.lookup_ids);
        Ok(result)
    }

    /// Alias for [`SearchFuture::get`].
    pub async fn check(&self) -> Result<R> {
        self.get().await
    }
}
