//! Orchestration: query the target, analyze responses, feed the strategy.

use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::analyzer::ResultAnalyzer;
use crate::catalog::BASELINE_PROBES;
use crate::collector::{SearchBackend, SearchResponse};
use crate::error::Result;
use crate::store::SampleStore;
use crate::strategy::AdaptiveStrategy;
use crate::types::{Hypothesis, QuerySample, SearchHit, TestReport};

/// Drives one profiling run against a [`SearchBackend`].
///
/// All run state (samples, learning state, RNG) is owned here, and requests
/// are issued strictly one after another.
pub struct ReverseEngineer<B: SearchBackend> {
    backend: B,
    analyzer: ResultAnalyzer,
    strategy: AdaptiveStrategy,
    samples: SampleStore,
}

impl<B: SearchBackend> ReverseEngineer<B> {
    pub fn new(backend: B) -> Self {
        Self::with_strategy(backend, AdaptiveStrategy::new())
    }

    /// Use a preconfigured (for example seeded) strategy.
    pub fn with_strategy(backend: B, strategy: AdaptiveStrategy) -> Self {
        Self {
            backend,
            analyzer: ResultAnalyzer::new(),
            strategy,
            samples: SampleStore::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn strategy(&self) -> &AdaptiveStrategy {
        &self.strategy
    }

    /// Every sample collected so far.
    pub fn samples(&self) -> &SampleStore {
        &self.samples
    }

    /// Analyze and store one observation, replacing any earlier sample for
    /// the same query.
    pub fn collect_sample(
        &mut self,
        query: &str,
        results: Vec<SearchHit>,
        timing: Duration,
    ) -> &QuerySample {
        let characteristics = self.analyzer.analyze_results(&results);
        self.samples.insert(QuerySample {
            query: query.to_string(),
            results,
            characteristics,
            captured_at: Utc::now(),
            timing,
        })
    }

    /// Connectivity probe. Must succeed before a run is started.
    pub async fn check_connection(&self) -> Result<()> {
        self.backend.check_connection().await
    }

    /// Run the adaptive suite.
    ///
    /// One initial batch is generated. After each initial query a single
    /// follow-up batch is generated and executed in full; follow-ups never
    /// spawn further batches.
    pub async fn run_test_suite(&mut self) -> Result<TestReport> {
        info!(target_name = %self.backend.name(), "Starting adaptive search analysis");
        let mut run = SampleStore::new();

        let initial = self.strategy.generate_next_queries(&run);
        for probe in initial {
            self.execute(&probe.query, &mut run).await?;

            let follow_ups = self.strategy.generate_next_queries(&run);
            for follow_up in follow_ups {
                self.execute(&follow_up.query, &mut run).await?;
            }
        }

        let hypothesis = self.generate_hypothesis(&run);
        let learning_status = self.strategy.get_learning_status();
        info!(
            samples = run.len(),
            algorithm = %hypothesis.likely_algorithm,
            confidence = hypothesis.confidence_score,
            phase = %learning_status.phase,
            "Analysis complete"
        );

        Ok(TestReport {
            hypothesis,
            learning_status,
        })
    }

    /// Recompute the hypothesis from `samples`. Pure.
    pub fn generate_hypothesis(&self, samples: &SampleStore) -> Hypothesis {
        Hypothesis {
            likely_algorithm: self.analyzer.determine_algorithm_type(samples),
            confidence_score: self.analyzer.calculate_confidence(samples),
            observed_patterns: self.analyzer.analyze_patterns(samples),
        }
    }

    /// Hypothesis over every sample collected by this engine.
    pub fn hypothesis(&self) -> Hypothesis {
        self.generate_hypothesis(&self.samples)
    }

    /// Issue the fixed baseline probes without involving the strategy.
    pub async fn run_baseline(&mut self) -> Result<Vec<QuerySample>> {
        let mut samples = Vec::with_capacity(BASELINE_PROBES.len());
        for probe in BASELINE_PROBES {
            let response = self.probe(probe.query).await?;
            info!(
                query = %probe.query,
                kind = probe.kind,
                count = response.hits.len(),
                "Baseline probe complete"
            );
            let sample = self.collect_sample(probe.query, response.hits, response.elapsed);
            samples.push(sample.clone());
        }
        Ok(samples)
    }

    /// Search, record, and feed the strategy.
    async fn execute(&mut self, query: &str, run: &mut SampleStore) -> Result<()> {
        let response = self.probe(query).await?;
        self.strategy.analyze_response(query, &response.hits);
        let sample = self.collect_sample(query, response.hits, response.elapsed);
        run.insert(sample.clone());
        Ok(())
    }

    /// One search. Transport failures count as an empty result list timed
    /// up to the point of failure.
    async fn probe(&self, query: &str) -> Result<SearchResponse> {
        let started = Instant::now();
        match self.backend.search(query).await {
            Ok(response) => Ok(response),
            Err(e) if e.is_transport() => {
                warn!(query = %query, error = %e, "Error performing search");
                Ok(SearchResponse::new(Vec::new(), started.elapsed()))
            }
            Err(e) => Err(e),
        }
    }
}
