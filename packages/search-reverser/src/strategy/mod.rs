//! Adaptive query strategy.
//!
//! The strategy decides which domains and patterns to probe next and learns
//! from every observed response. It moves through three phases:
//!
//! 1. **Domain exploration** - weighted sampling of catalog domains, one seed
//!    term per domain.
//! 2. **Pattern exploration** - catalog patterns applied to domains that have
//!    already returned results.
//! 3. **Optimization** - patterns whose shape produced high-scoring results,
//!    applied to successful domains.
//!
//! All decisions live in pure functions over [`LearningState`]
//! ([`apply_response`], [`next_queries`]). [`AdaptiveStrategy`] owns one
//! state plus a seedable RNG, so a run seeded with the same value and fed
//! the same responses issues the same queries.
//!
//! ```rust,ignore
//! let mut strategy = AdaptiveStrategy::with_seed(7);
//! for probe in strategy.generate_next_queries(&samples) {
//!     let hits = backend.search(&probe.query).await?.hits;
//!     strategy.analyze_response(&probe.query, &hits);
//! }
//! println!("{}", strategy.get_learning_status().phase);
//! ```

pub mod classify;
pub mod generate;
pub mod state;
pub mod update;

pub use classify::{
    categorize_query, domain_label, identify_domain, identify_query_pattern, QueryCategory,
    QueryShape, CATEGORY_RULES, GENERAL_DOMAIN, SHAPE_RULES,
};
pub use generate::{next_queries, ProbeKind, ProbeQuery};
pub use state::{
    LearnedPatterns, LearningState, LearningStatus, Phase, SuccessRate,
    DEFAULT_MAX_EXPLORATION_ROUNDS, MAX_DOMAIN_WEIGHT, MIN_DOMAIN_WEIGHT,
};
pub use update::{apply_response, HIGH_SCORE_THRESHOLD};

use tracing::debug;

use crate::store::SampleStore;
use crate::types::SearchHit;
use crate::ProbeConfig;

/// Stateful facade over the pure strategy functions.
#[derive(Debug, Clone)]
pub struct AdaptiveStrategy {
    state: LearningState,
    rng: fastrand::Rng,
}

impl Default for AdaptiveStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveStrategy {
    /// Fresh strategy with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            state: LearningState::default(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Fresh strategy whose choices are fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: LearningState::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Set the number of rounds per exploration phase.
    pub fn with_max_exploration_rounds(mut self, rounds: u32) -> Self {
        self.state.max_exploration_rounds = rounds;
        self
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        let strategy = match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        strategy.with_max_exploration_rounds(config.max_exploration_rounds)
    }

    /// Fold one observed response into the learning state.
    pub fn analyze_response(&mut self, query: &str, results: &[SearchHit]) {
        self.state = apply_response(&self.state, query, results);
    }

    /// Produce the next batch of probes and advance the phase counter.
    ///
    /// `previous` is only inspected for logging; generation depends on the
    /// learning state alone.
    pub fn generate_next_queries(&mut self, previous: &SampleStore) -> Vec<ProbeQuery> {
        let (next, queries) = next_queries(&self.state, &mut self.rng);
        debug!(
            phase = %self.state.phase,
            samples = previous.len(),
            count = queries.len(),
            "Generated probe batch"
        );
        self.state = next;
        queries
    }

    /// Snapshot of phase, progress, learned patterns and success rates.
    pub fn get_learning_status(&self) -> LearningStatus {
        self.state.status()
    }

    pub fn state(&self) -> &LearningState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hits_for(score: f64) -> Vec<SearchHit> {
        vec![SearchHit::fuzzy(1, "Introduction to Python", score)]
    }

    #[test]
    fn test_facade_drives_phases() {
        let mut strategy = AdaptiveStrategy::with_seed(42);
        let samples = SampleStore::new();

        for _ in 0..3 {
            let batch = strategy.generate_next_queries(&samples);
            assert_eq!(batch.len(), 3);
        }
        let status = strategy.get_learning_status();
        assert_eq!(status.phase, Phase::PatternExploration);
        assert_eq!(status.exploration_progress, "3/3");
    }

    #[test]
    fn test_analyze_response_updates_state() {
        let mut strategy = AdaptiveStrategy::with_seed(1);
        strategy.analyze_response("python", &hits_for(0.9));
        strategy.analyze_response("cobol dialects", &[]);

        let state = strategy.state();
        assert_eq!(state.weight("languages"), Some(1.2));
        assert!(state.learned.successful_domains.contains("languages"));
        assert_eq!(state.learned.successful_patterns, vec![QueryShape::Simple]);
        assert_eq!(state.success_rates.len(), 2);
    }

    #[test]
    fn test_from_config() {
        let config = ProbeConfig::default()
            .with_seed(9)
            .with_max_exploration_rounds(1);
        let mut a = AdaptiveStrategy::from_config(&config);
        let mut b = AdaptiveStrategy::from_config(&config);
        let samples = SampleStore::new();

        assert_eq!(
            a.generate_next_queries(&samples),
            b.generate_next_queries(&samples)
        );
        assert_eq!(a.state().phase, Phase::PatternExploration);
    }

    #[test]
    fn test_learning_status_is_read_only() {
        let mut strategy = AdaptiveStrategy::with_seed(3);
        strategy.analyze_response("css", &hits_for(0.2));
        let first = strategy.get_learning_status();
        let second = strategy.get_learning_status();
        assert_eq!(first, second);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Respond { query: String, hits: usize, score: f64 },
        Generate,
    }

    fn step() -> impl Strategy<Value = Step> {
        let query = prop_oneof![
            Just("python".to_string()),
            Just("css AND guide".to_string()),
            Just("\"rust\"".to_string()),
            Just("advanced algebra".to_string()),
            Just("medical OR clinical".to_string()),
            "[a-z!? ]{0,16}",
        ];
        prop_oneof![
            (query, 0usize..3, 0.0f64..3.0)
                .prop_map(|(query, hits, score)| Step::Respond { query, hits, score }),
            Just(Step::Generate),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_over_any_run(
            seed in any::<u64>(),
            steps in prop::collection::vec(step(), 0..40),
        ) {
            let mut strategy = AdaptiveStrategy::with_seed(seed);
            let samples = SampleStore::new();
            let mut last_phase = strategy.state().phase;

            for step in steps {
                match step {
                    Step::Respond { query, hits, score } => {
                        let results: Vec<_> = (0..hits)
                            .map(|i| SearchHit::exact(i as i64, "Python Guide", score))
                            .collect();
                        strategy.analyze_response(&query, &results);
                    }
                    Step::Generate => {
                        let batch = strategy.generate_next_queries(&samples);
                        prop_assert!(!batch.is_empty());
                        for probe in &batch {
                            prop_assert!(crate::catalog::domain(probe.domain).is_some());
                        }
                    }
                }

                let state = strategy.state();
                for weight in state.domain_weights.values() {
                    prop_assert!((MIN_DOMAIN_WEIGHT..=MAX_DOMAIN_WEIGHT).contains(weight));
                }
                prop_assert!(state.phase >= last_phase);
                last_phase = state.phase;

                let learned = &state.learned;
                prop_assert!(learned.effective_terms.is_disjoint(&learned.ineffective_terms));
                for rate in state.success_rates.values() {
                    prop_assert!(rate.success <= rate.total);
                }
            }
        }
    }
}
