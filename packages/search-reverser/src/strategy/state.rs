//! Learning state for one profiling run.
//!
//! `LearningState` is a plain value: the update and generation functions
//! take it by reference and return the next state, so a run can be replayed
//! from its inputs and RNG seed.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

use super::classify::{QueryCategory, QueryShape};
use crate::catalog::DOMAINS;

/// Lower bound for a domain weight.
pub const MIN_DOMAIN_WEIGHT: f64 = 0.1;

/// Upper bound for a domain weight.
pub const MAX_DOMAIN_WEIGHT: f64 = 2.0;

/// Default number of generation rounds per exploration phase.
pub const DEFAULT_MAX_EXPLORATION_ROUNDS: u32 = 3;

/// Exploration phase. Ordered, and only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    DomainExploration,
    PatternExploration,
    Optimization,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::DomainExploration => write!(f, "domain_exploration"),
            Phase::PatternExploration => write!(f, "pattern_exploration"),
            Phase::Optimization => write!(f, "optimization"),
        }
    }
}

/// Success counters for one query category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuccessRate {
    pub success: u64,
    pub total: u64,
}

impl SuccessRate {
    /// Success percentage, 0.0 when nothing was recorded.
    pub fn percent(&self) -> f64 {
        self.success as f64 / self.total.max(1) as f64 * 100.0
    }
}

/// What the strategy has learned about the target so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LearnedPatterns {
    /// Terms seen on non-empty, high-scoring results (lowercased).
    pub effective_terms: BTreeSet<String>,

    /// Terms seen on empty results. Never overlaps `effective_terms`.
    pub ineffective_terms: BTreeSet<String>,

    /// Smoothed term count of successful queries.
    pub optimal_query_length: f64,

    /// Categories with at least one success, in first-success order.
    pub best_performing_categories: Vec<QueryCategory>,

    pub successful_domains: BTreeSet<&'static str>,

    /// Shapes of queries that returned a result scoring above 0.7.
    pub successful_patterns: Vec<QueryShape>,
}

/// Full mutable state of the adaptive strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningState {
    pub phase: Phase,
    pub exploration_rounds: u32,
    pub max_exploration_rounds: u32,

    /// Catalog domain → weight, in catalog order.
    pub domain_weights: IndexMap<&'static str, f64>,

    pub learned: LearnedPatterns,

    /// Category → counters, in first-seen order.
    pub success_rates: IndexMap<QueryCategory, SuccessRate>,
}

impl Default for LearningState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPLORATION_ROUNDS)
    }
}

impl LearningState {
    /// Fresh state: every catalog domain at weight 1.0.
    pub fn new(max_exploration_rounds: u32) -> Self {
        Self {
            phase: Phase::DomainExploration,
            exploration_rounds: 0,
            max_exploration_rounds,
            domain_weights: DOMAINS.iter().map(|d| (d.id, 1.0)).collect(),
            learned: LearnedPatterns::default(),
            success_rates: IndexMap::new(),
        }
    }

    pub fn weight(&self, domain: &str) -> Option<f64> {
        self.domain_weights.get(domain).copied()
    }

    /// Read-only snapshot for reporting.
    pub fn status(&self) -> LearningStatus {
        LearningStatus {
            phase: self.phase,
            exploration_progress: format!(
                "{}/{}",
                self.exploration_rounds, self.max_exploration_rounds
            ),
            learned_patterns: self.learned.clone(),
            success_rates: self.success_rates.clone(),
        }
    }
}

/// Snapshot exported with the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningStatus {
    pub phase: Phase,

    /// `"rounds/max"`. Rounds keep counting past `max` in later phases.
    pub exploration_progress: String,

    pub learned_patterns: LearnedPatterns,
    pub success_rates: IndexMap<QueryCategory, SuccessRate>,
}
