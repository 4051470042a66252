//! Wire records returned by the target search endpoint.

use serde::{Deserialize, Serialize};

/// Value of the `matched` field the analyzer treats as a fuzzy hit.
pub const MATCHED_FUZZY: &str = "fuzzy";

/// Value of the `matched` field the analyzer treats as an exact hit.
pub const MATCHED_EXACT: &str = "exact";

/// One ranked result record from `GET /search?q=`.
///
/// `id`, `title`, `score` and `matched` are required; a body missing any of
/// them fails to decode. The id is kept as raw JSON since targets disagree
/// on whether it is a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: serde_json::Value,

    pub title: String,

    /// Relevance score as reported by the target.
    pub score: f64,

    /// Match label reported by the target (`"fuzzy"`, `"exact"`, or anything else).
    pub matched: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<serde_json::Value>,
}

/// How a single hit was matched, as far as the analyzer is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Fuzzy,
    Exact,
    Other,
}

impl SearchHit {
    /// Create a hit with the required fields only.
    pub fn new(
        id: impl Into<serde_json::Value>,
        title: impl Into<String>,
        score: f64,
        matched: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            score,
            matched: matched.into(),
            publication_date: None,
            popularity: None,
        }
    }

    /// Convenience constructor for a `"fuzzy"` hit.
    pub fn fuzzy(id: i64, title: impl Into<String>, score: f64) -> Self {
        Self::new(id, title, score, MATCHED_FUZZY)
    }

    /// Convenience constructor for an `"exact"` hit.
    pub fn exact(id: i64, title: impl Into<String>, score: f64) -> Self {
        Self::new(id, title, score, MATCHED_EXACT)
    }

    /// Add a publication date.
    pub fn with_publication_date(mut self, date: impl Into<String>) -> Self {
        self.publication_date = Some(date.into());
        self
    }

    /// Add raw popularity metrics.
    pub fn with_popularity(mut self, popularity: serde_json::Value) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn match_kind(&self) -> MatchKind {
        match self.matched.as_str() {
            MATCHED_FUZZY => MatchKind::Fuzzy,
            MATCHED_EXACT => MatchKind::Exact,
            _ => MatchKind::Other,
        }
    }
}
