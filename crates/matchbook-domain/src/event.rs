// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::status::RemoteStatus;

/// One unit of a continuous streaming-search event sequence.
///
/// `SearchStarted` always precedes any match event. `StreamEnded` signals
/// that the input media ended; trailing match events may still follow it.
/// `SearchEnded` is final: no more events will ever be produced after it.
/// `SearchError` reports a non-terminal failure embedded in the stream; the
/// session stays live and the caller must keep pulling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    SearchStarted,
    MatchStarted {
        asset: Asset,
        /// Position in the stream where the match began, in seconds.
        query_timestamp: i64,
        /// Position in the matched asset, in seconds.
        asset_timestamp: i64,
    },
    MatchEnded {
        asset: Asset,
        query_timestamp: i64,
        asset_timestamp: i64,
    },
    StreamEnded,
    SearchError {
        error: RemoteStatus,
    },
    SearchEnded,
}

impl StreamEvent {
    /// Whether this event closes the sequence: no further pulls should be
    /// issued after it. Only `SearchEnded` qualifies; `StreamEnded` leaves
    /// the sequence open for trailing match events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::SearchEnded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;

    #[test]
    fn test_match_event_decodes() {
        let event: StreamEvent = serde_json::from_str(
            r#"{
                "type": "match_started",
                "asset": {"id": "a-9", "title": "Intro", "artist": "The xx"},
                "query_timestamp": 42,
                "asset_timestamp": 3
            }"#,
        )
        .unwrap();
        match event {
            StreamEvent::MatchStarted {
                asset,
                query_timestamp,
                asset_timestamp,
            } => {
                assert_eq!(asset.id, "a-9");
                assert_eq!(query_timestamp, 42);
                assert_eq!(asset_timestamp, 3);
            }
            other => panic!("expected MatchStarted, got {other:?}"),
        }
    }

    #[test]
    fn test_only_search_ended_is_terminal() {
        let error_event = StreamEvent::SearchError {
            error: RemoteStatus::new(StatusCode::LookupFailed, "chunk download failed"),
        };
        assert!(!error_event.is_terminal());
        // The input ending does not end the sequence; matches may trail.
        assert!(!StreamEvent::StreamEnded.is_terminal());
        assert!(StreamEvent::SearchEnded.is_terminal());
    }
}
