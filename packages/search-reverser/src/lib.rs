//! Black-box behavioral profiler for full-text search endpoints.
//!
//! Probes an opaque `GET /search?q=` endpoint with crafted queries and infers
//! properties of its ranking and matching algorithm purely from the
//! responses. The inferred hypothesis is best-effort and carries a heuristic
//! confidence score.
//!
//! # Usage
//!
//! ```rust,ignore
//! use search_reverser::{AdaptiveStrategy, HttpCollector, ProbeConfig, ReverseEngineer};
//!
//! let config = ProbeConfig::from_env()?.with_seed(7);
//! let collector = HttpCollector::from_config(&config)?;
//! let strategy = AdaptiveStrategy::from_config(&config);
//! let mut engine = ReverseEngineer::with_strategy(collector, strategy);
//!
//! engine.check_connection().await?;
//! let report = engine.run_test_suite().await?;
//! println!("{} ({:.2})", report.hypothesis.likely_algorithm, report.hypothesis.confidence_score);
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Static domains, query patterns and baseline probes
//! - [`strategy`] - Adaptive query generation and learning state
//! - [`analyzer`] - Result heuristics and hypothesis scoring
//! - [`collector`] - `SearchBackend` trait and the HTTP implementation
//! - [`engine`] - The run loop tying everything together
//! - [`testing`] - Mock backend for tests

pub mod analyzer;
pub mod behavior;
pub mod catalog;
pub mod collector;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;
pub mod strategy;
pub mod testing;
pub mod types;

pub use analyzer::ResultAnalyzer;
pub use behavior::BehaviorProfile;
pub use collector::{HttpCollector, SearchBackend, SearchResponse};
pub use config::ProbeConfig;
pub use engine::ReverseEngineer;
pub use error::{ProbeError, Result};
pub use store::SampleStore;
pub use strategy::{
    AdaptiveStrategy, LearnedPatterns, LearningState, LearningStatus, Phase, ProbeKind,
    ProbeQuery, QueryCategory, QueryShape, SuccessRate,
};
pub use types::{
    AlgorithmType, Hypothesis, MatchingType, ObservedPatterns, QuerySample, ResultCharacteristics,
    SearchHit, TestReport,
};
