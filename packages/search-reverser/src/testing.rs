//! Testing utilities including a scripted search backend.
//!
//! Useful for exercising the strategy and engine without a live endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::collector::{SearchBackend, SearchResponse};
use crate::error::{ProbeError, Result};
use crate::types::SearchHit;

/// Scripted reply for one query.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A 2xx with these hits.
    Hits(Vec<SearchHit>),
    /// A 503, surfaced as a transport error.
    TransportError,
    /// A 2xx whose body is not a JSON array.
    Malformed,
}

/// Record of a call made to the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockSearchCall {
    Search { query: String },
    CheckConnection,
}

/// A mock search backend for testing.
///
/// Unscripted queries get `default_hits` (empty unless set).
#[derive(Clone)]
pub struct MockSearchBackend {
    replies: Arc<RwLock<HashMap<String, MockReply>>>,
    default_hits: Vec<SearchHit>,
    reachable: bool,
    elapsed: Duration,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockSearchCall>>>,
}

impl Default for MockSearchBackend {
    fn default() -> Self {
        Self {
            replies: Arc::new(RwLock::new(HashMap::new())),
            default_hits: Vec::new(),
            reachable: true,
            elapsed: Duration::from_millis(5),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script hits for a query.
    pub fn with_hits(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.with_reply(query, MockReply::Hits(hits))
    }

    /// Make a query fail at the transport level.
    pub fn with_transport_error(self, query: impl Into<String>) -> Self {
        self.with_reply(query, MockReply::TransportError)
    }

    /// Make a query return an undecodable body.
    pub fn with_malformed(self, query: impl Into<String>) -> Self {
        self.with_reply(query, MockReply::Malformed)
    }

    pub fn with_reply(self, query: impl Into<String>, reply: MockReply) -> Self {
        self.replies.write().unwrap().insert(query.into(), reply);
        self
    }

    /// Hits returned for any unscripted query.
    pub fn with_default_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.default_hits = hits;
        self
    }

    /// Fail the connectivity probe.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Latency reported for every successful search.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockSearchCall> {
        self.calls.read().unwrap().clone()
    }

    /// Queries searched so far, in order.
    pub fn searched_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockSearchCall::Search { query } => Some(query),
                MockSearchCall::CheckConnection => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.calls.write().unwrap().push(MockSearchCall::Search {
            query: query.to_string(),
        });

        let reply = self
            .replies
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| MockReply::Hits(self.default_hits.clone()));

        match reply {
            MockReply::Hits(hits) => Ok(SearchResponse::new(hits, self.elapsed)),
            MockReply::TransportError => Err(ProbeError::Status {
                status: 503,
                url: format!("mock://search?q={}", query),
            }),
            MockReply::Malformed => {
                let hits: Vec<SearchHit> = serde_json::from_str("<html>oops</html>")?;
                Ok(SearchResponse::new(hits, self.elapsed))
            }
        }
    }

    async fn check_connection(&self) -> Result<()> {
        self.calls.write().unwrap().push(MockSearchCall::CheckConnection);
        if self.reachable {
            Ok(())
        } else {
            Err(ProbeError::Unreachable {
                url: "mock://".to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "mock backend unreachable",
                )),
            })
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
