//! Per-query analysis records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::hit::SearchHit;

/// Signals that might influence the target's ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingFactors {
    /// Placeholder: never inferred from data.
    pub date_influenced: bool,

    /// Placeholder: never inferred from data.
    pub popularity_signals: bool,

    /// Mean of the reported scores.
    pub text_relevance: f64,
}

/// Matching label derived from one result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingType {
    Fuzzy,
    Exact,
    Unknown,
}

impl std::fmt::Display for MatchingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingType::Fuzzy => write!(f, "fuzzy"),
            MatchingType::Exact => write!(f, "exact"),
            MatchingType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Tokenization guesses. Coarse proxies, see `ResultAnalyzer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tokenization {
    pub splits_on_space: bool,
    pub removes_stopwords: bool,
    pub uses_stemming: bool,
}

/// Everything the analyzer derives from a single result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCharacteristics {
    pub ranking_factors: RankingFactors,
    pub matching_type: MatchingType,
    pub tokenization: Tokenization,
}

impl ResultCharacteristics {
    /// Fixed record reported for an empty result list.
    pub fn neutral() -> Self {
        Self {
            ranking_factors: RankingFactors {
                date_influenced: false,
                popularity_signals: false,
                text_relevance: 0.0,
            },
            matching_type: MatchingType::Unknown,
            tokenization: Tokenization {
                splits_on_space: false,
                removes_stopwords: false,
                uses_stemming: false,
            },
        }
    }
}

/// One executed query with its raw results and derived characteristics.
#[derive(Debug, Clone, Serialize)]
pub struct QuerySample {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub characteristics: ResultCharacteristics,
    pub captured_at: DateTime<Utc>,

    /// Round-trip latency of the search request, pacing delay excluded.
    pub timing: Duration,
}
