//! Heuristics over raw result lists and the sample database.
//!
//! Several detectors are deliberately coarse: ranking-factor flags are
//! never inferred and tokenization flags only reflect whether anything came
//! back. Callers should read them as placeholders, not evidence.

use crate::store::SampleStore;
use crate::types::{
    AlgorithmType, MatchKind, MatchingType, ObservedPatterns, RankingFactors,
    ResultCharacteristics, SearchHit, Tokenization,
};

/// Fuzzy ratio above which the target is labelled `fuzzy_search`.
pub const FUZZY_SEARCH_THRESHOLD: f64 = 0.8;

/// Exact ratio above which the target is labelled `exact_match`.
pub const EXACT_MATCH_THRESHOLD: f64 = 0.9;

/// Fixed consistency term averaged into the confidence score.
pub const RESULT_CONSISTENCY: f64 = 0.8;

/// Stateless result analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAnalyzer;

impl ResultAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Derive characteristics from one result list.
    pub fn analyze_results(&self, results: &[SearchHit]) -> ResultCharacteristics {
        if results.is_empty() {
            return ResultCharacteristics::neutral();
        }

        ResultCharacteristics {
            ranking_factors: self.detect_ranking_factors(results),
            matching_type: self.detect_matching_algorithm(results),
            tokenization: self.detect_tokenization_method(results),
        }
    }

    pub fn detect_ranking_factors(&self, results: &[SearchHit]) -> RankingFactors {
        RankingFactors {
            date_influenced: false,
            popularity_signals: false,
            text_relevance: mean_score(results),
        }
    }

    /// `fuzzy` when fuzzy hits outnumber exact ones, `exact` when any exact
    /// hit exists, `unknown` otherwise.
    pub fn detect_matching_algorithm(&self, results: &[SearchHit]) -> MatchingType {
        let (fuzzy, exact) = results
            .iter()
            .fold((0usize, 0usize), |(fuzzy, exact), hit| match hit.match_kind() {
                MatchKind::Fuzzy => (fuzzy + 1, exact),
                MatchKind::Exact => (fuzzy, exact + 1),
                MatchKind::Other => (fuzzy, exact),
            });

        if fuzzy > exact {
            MatchingType::Fuzzy
        } else if exact > 0 {
            MatchingType::Exact
        } else {
            MatchingType::Unknown
        }
    }

    pub fn detect_tokenization_method(&self, results: &[SearchHit]) -> Tokenization {
        let any = !results.is_empty();
        Tokenization {
            splits_on_space: any,
            removes_stopwords: any,
            uses_stemming: false,
        }
    }

    /// Aggregate ratios over every stored sample.
    ///
    /// The exact ratio is the complement of the fuzzy ratio, so samples with
    /// `exact` or `unknown` matching both count towards it.
    pub fn analyze_patterns(&self, samples: &SampleStore) -> ObservedPatterns {
        if samples.is_empty() {
            return ObservedPatterns::default();
        }

        let total = samples.len() as f64;
        let fuzzy = samples
            .values()
            .filter(|s| s.characteristics.matching_type == MatchingType::Fuzzy)
            .count() as f64;
        let elapsed: f64 = samples.values().map(|s| s.timing.as_secs_f64()).sum();

        ObservedPatterns {
            fuzzy_match_ratio: fuzzy / total,
            exact_match_ratio: (total - fuzzy) / total,
            average_response_time: elapsed / total,
        }
    }

    pub fn determine_algorithm_type(&self, samples: &SampleStore) -> AlgorithmType {
        let patterns = self.analyze_patterns(samples);
        if patterns.fuzzy_match_ratio > FUZZY_SEARCH_THRESHOLD {
            AlgorithmType::FuzzySearch
        } else if patterns.exact_match_ratio > EXACT_MATCH_THRESHOLD {
            AlgorithmType::ExactMatch
        } else {
            AlgorithmType::Hybrid
        }
    }

    /// Heuristic confidence in `[0, 1]`; 0.0 for an empty store.
    pub fn calculate_confidence(&self, samples: &SampleStore) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let patterns = self.analyze_patterns(samples);
        (patterns.fuzzy_match_ratio + patterns.exact_match_ratio + RESULT_CONSISTENCY) / 3.0
    }
}

fn mean_score(results: &[SearchHit]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuerySample;
    use chrono::Utc;
    use std::time::Duration;

    fn sample(query: &str, results: Vec<SearchHit>, millis: u64) -> QuerySample {
        QuerySample {
            query: query.to_string(),
            characteristics: ResultAnalyzer.analyze_results(&results),
            results,
            captured_at: Utc::now(),
            timing: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_empty_results_are_neutral() {
        let characteristics = ResultAnalyzer::new().analyze_results(&[]);
        assert_eq!(characteristics, ResultCharacteristics::neutral());
        assert_eq!(characteristics.matching_type, MatchingType::Unknown);
        assert!(!characteristics.tokenization.splits_on_space);
    }

    #[test]
    fn test_matching_algorithm() {
        let analyzer = ResultAnalyzer::new();

        let fuzzy_heavy = vec![
            SearchHit::fuzzy(1, "a", 0.5),
            SearchHit::fuzzy(2, "b", 0.5),
            SearchHit::exact(3, "c", 1.5),
        ];
        assert_eq!(analyzer.detect_matching_algorithm(&fuzzy_heavy), MatchingType::Fuzzy);

        let tied = vec![SearchHit::fuzzy(1, "a", 0.5), SearchHit::exact(2, "b", 1.5)];
        assert_eq!(analyzer.detect_matching_algorithm(&tied), MatchingType::Exact);

        let other = vec![SearchHit::new(1, "a", 0.5, "semantic")];
        assert_eq!(analyzer.detect_matching_algorithm(&other), MatchingType::Unknown);
    }

    #[test]
    fn test_text_relevance_is_mean_score() {
        let results = vec![SearchHit::exact(1, "a", 1.0), SearchHit::exact(2, "b", 2.0)];
        let characteristics = ResultAnalyzer::new().analyze_results(&results);

        assert!((characteristics.ranking_factors.text_relevance - 1.5).abs() < 1e-9);
        assert!(!characteristics.ranking_factors.date_influenced);
        assert!(!characteristics.ranking_factors.popularity_signals);
        assert!(characteristics.tokenization.splits_on_space);
        assert!(characteristics.tokenization.removes_stopwords);
        assert!(!characteristics.tokenization.uses_stemming);
    }

    #[test]
    fn test_empty_store() {
        let analyzer = ResultAnalyzer::new();
        let store = SampleStore::new();

        assert_eq!(analyzer.analyze_patterns(&store), ObservedPatterns::default());
        assert_eq!(analyzer.calculate_confidence(&store), 0.0);
        assert_eq!(analyzer.determine_algorithm_type(&store), AlgorithmType::Hybrid);
    }

    #[test]
    fn test_mostly_fuzzy_store() {
        let analyzer = ResultAnalyzer::new();
        let mut store = SampleStore::new();
        for i in 0..9 {
            store.insert(sample(&format!("q{}", i), vec![SearchHit::fuzzy(1, "x", 0.4)], 100));
        }
        store.insert(sample("q9", vec![SearchHit::exact(1, "x", 1.4)], 300));

        let patterns = analyzer.analyze_patterns(&store);
        assert!((patterns.fuzzy_match_ratio - 0.9).abs() < 1e-9);
        assert!((patterns.exact_match_ratio - 0.1).abs() < 1e-9);
        assert!((patterns.average_response_time - 0.12).abs() < 1e-9);
        assert_eq!(analyzer.determine_algorithm_type(&store), AlgorithmType::FuzzySearch);
    }

    #[test]
    fn test_unknown_samples_count_as_exact() {
        let analyzer = ResultAnalyzer::new();
        let mut store = SampleStore::new();
        for i in 0..10 {
            store.insert(sample(&format!("miss {}", i), vec![], 10));
        }

        let patterns = analyzer.analyze_patterns(&store);
        assert_eq!(patterns.fuzzy_match_ratio, 0.0);
        assert_eq!(patterns.exact_match_ratio, 1.0);
        assert_eq!(analyzer.determine_algorithm_type(&store), AlgorithmType::ExactMatch);
    }

    #[test]
    fn test_confidence_is_constant_for_nonempty_store() {
        let analyzer = ResultAnalyzer::new();
        let mut store = SampleStore::new();
        store.insert(sample("a", vec![SearchHit::fuzzy(1, "x", 0.4)], 5));
        store.insert(sample("b", vec![], 5));

        assert!((analyzer.calculate_confidence(&store) - 0.6).abs() < 1e-9);
    }
}
