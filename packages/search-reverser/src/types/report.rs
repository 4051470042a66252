//! Aggregate outputs: observed ratios, hypothesis, and the final report.

use serde::Serialize;

use crate::strategy::LearningStatus;

/// Ratios aggregated over every stored sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObservedPatterns {
    pub fuzzy_match_ratio: f64,
    pub exact_match_ratio: f64,

    /// Mean request latency in seconds.
    pub average_response_time: f64,
}

/// Best-effort label for the target's matching algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmType {
    FuzzySearch,
    ExactMatch,
    Hybrid,
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmType::FuzzySearch => write!(f, "fuzzy_search"),
            AlgorithmType::ExactMatch => write!(f, "exact_match"),
            AlgorithmType::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Hypothesis recomputed from the sample database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hypothesis {
    pub likely_algorithm: AlgorithmType,
    pub confidence_score: f64,
    pub observed_patterns: ObservedPatterns,
}

/// Result of a full adaptive run: the hypothesis plus the strategy snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    #[serde(flatten)]
    pub hypothesis: Hypothesis,
    pub learning_status: LearningStatus,
}
