// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use matchbook_domain::StreamEvent;

use crate::error::{ClientError, Result};
use crate::session::Session;

#[derive(Serialize)]
struct StartStreamRequest<'a> {
    media_url: &'a str,
}

#[derive(Deserialize)]
struct StartStreamResponse {
    search_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Producing,
    Ended,
    Errored,
}

/// A continuous search over live or streamed media, drained by pulling one
/// event at a time.
///
/// The pull model keeps backpressure implicit: the caller controls the
/// consumption rate and no events are buffered client-side. A session is
/// single-consumer; `next_event` takes `&mut self` and `close` takes the
/// session by value, so pulls and close cannot race.
///
/// The first event is always `SearchStarted`. A `SearchError` event reports
/// a non-terminal failure; the session stays live and the caller must keep
/// pulling. `StreamEnded` signals the input media ended but trailing match
/// events may still follow, so the session keeps producing. The sequence
/// closes with `SearchEnded`, after which further pulls fail with
/// [`ClientError::StreamFinished`]. The session must still be
/// [`close`](StreamSearchSession::close)d to terminate the remote search
/// and release its resources.
pub struct StreamSearchSession {
    session: Arc<Session>,
    search_id: String,
    state: StreamState,
    closed: bool,
}

impl StreamSearchSession {
    pub(crate) async fn start(session: Arc<Session>, media_url: &str) -> Result<Self> {
        let response: StartStreamResponse = session
            .post_json("v4/stream", &StartStreamRequest { media_url })
            .await?;
        debug!(
            target: "matchbook",
            "stream search started: {} for {media_url}",
            response.search_id
        );
        Ok(Self {
            session,
            search_id: response.search_id,
            state: StreamState::Producing,
            closed: false,
        })
    }

    /// Server-assigned ID of this stream search.
    pub fn search_id(&self) -> &str {
        &self.search_id
    }

    /// Pull the next event, blocking the calling task until one is
    /// available. Designed to be driven from a dedicated task per stream so
    /// the wait does not hold up unrelated work.
    pub async fn next_event(&mut self) -> Result<StreamEvent> {
        if self.state != StreamState::Producing {
            return Err(ClientError::StreamFinished);
        }

        let path = format!("v4/stream/{}/events/next", self.search_id);
        let event: StreamEvent = match self.session.pull_json(&path).await {
            Ok(event) => event,
            Err(err) => {
                // A failure of the pull itself is unrecoverable, unlike a
                // SearchError event reported inside the stream.
                self.state = StreamState::Errored;
                return Err(err);
            }
        };

        if event.is_terminal() {
            self.state = StreamState::Ended;
        }
        Ok(event)
    }

    /// Terminate the remote search and release the session. Taking the
    /// session by value makes close-exactly-once hold at the type level.
    pub async fn close(mut self) -> Result<()> {
        let path = format!("v4/stream/{}", self.search_id);
        self.session.delete(&path).await?;
        // Only a successful DELETE stops the remote search; a failed close
        // keeps the drop diagnostic.
        self.closed = true;
        Ok(())
    }
}

impl Drop for StreamSearchSession {
    fn drop(&mut self) {
        if !self.closed {
            debug!(
                target: "matchbook",
                "stream session {} dropped without close; remote search left running",
                self.search_id
            );
        }
    }
}
