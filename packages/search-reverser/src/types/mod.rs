//! Data types shared across the profiler.

pub mod hit;
pub mod report;
pub mod sample;

pub use hit::{MatchKind, SearchHit, MATCHED_EXACT, MATCHED_FUZZY};
pub use report::{AlgorithmType, Hypothesis, ObservedPatterns, TestReport};
pub use sample::{MatchingType, QuerySample, RankingFactors, ResultCharacteristics, Tokenization};
