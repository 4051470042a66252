//! Phase-dependent query generation.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use super::state::{LearningState, Phase};
use crate::catalog::{self, Domain, QueryPattern, DOMAINS, PATTERNS};

/// Domains probed per domain-exploration round.
const DOMAINS_PER_ROUND: usize = 3;

/// Domains sampled per pattern-exploration or optimization round.
const FOCUSED_DOMAINS_PER_ROUND: usize = 2;

/// Why a query was generated. Serializes as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    DomainExploration,
    /// Pattern exploration with the named catalog pattern.
    Pattern(&'static str),
    Optimized,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeKind::DomainExploration => write!(f, "domain_exploration"),
            ProbeKind::Pattern(id) => write!(f, "{}", id),
            ProbeKind::Optimized => write!(f, "optimized"),
        }
    }
}

impl Serialize for ProbeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A query the strategy wants executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeQuery {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: ProbeKind,
    pub description: String,
    pub domain: &'static str,
}

/// Generate the next batch for the current phase and advance the round counter.
///
/// Always returns at least one query, and every query's domain is a
/// catalog domain.
pub fn next_queries(
    state: &LearningState,
    rng: &mut fastrand::Rng,
) -> (LearningState, Vec<ProbeQuery>) {
    let mut next = state.clone();

    let queries = match state.phase {
        Phase::DomainExploration => {
            let queries = domain_exploration_queries(state, rng);
            next.exploration_rounds += 1;
            if next.exploration_rounds >= next.max_exploration_rounds {
                next.phase = Phase::PatternExploration;
            }
            queries
        }
        Phase::PatternExploration => {
            let queries = pattern_exploration_queries(state, rng);
            next.exploration_rounds += 1;
            if next.exploration_rounds >= next.max_exploration_rounds * 2 {
                next.phase = Phase::Optimization;
            }
            queries
        }
        Phase::Optimization => optimized_queries(state, rng),
    };

    (next, queries)
}

/// Weighted selection: walk domains by descending weight, accepting each with
/// probability equal to its weight, then top up uniformly from the catalog.
fn select_weighted_domains(state: &LearningState, rng: &mut fastrand::Rng) -> Vec<&'static Domain> {
    let mut ranked: Vec<(&'static str, f64)> =
        state.domain_weights.iter().map(|(id, w)| (*id, *w)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut selected: Vec<&'static Domain> = Vec::with_capacity(DOMAINS_PER_ROUND);
    for (id, weight) in ranked {
        if rng.f64() < weight {
            if let Some(domain) = catalog::domain(id) {
                selected.push(domain);
            }
            if selected.len() >= DOMAINS_PER_ROUND {
                break;
            }
        }
    }

    while selected.len() < DOMAINS_PER_ROUND {
        let domain = &DOMAINS[rng.usize(..DOMAINS.len())];
        if !selected.iter().any(|d| d.id == domain.id) {
            selected.push(domain);
        }
    }

    selected
}

/// Up to two distinct domains from `successful_domains`, or the whole catalog
/// when nothing has succeeded yet.
fn sample_focus_domains(state: &LearningState, rng: &mut fastrand::Rng) -> Vec<&'static Domain> {
    let mut pool: Vec<&'static Domain> = state
        .learned
        .successful_domains
        .iter()
        .filter_map(|id| catalog::domain(id))
        .collect();
    if pool.is_empty() {
        pool = DOMAINS.iter().collect();
    }

    rng.shuffle(&mut pool);
    pool.truncate(FOCUSED_DOMAINS_PER_ROUND);
    pool
}

fn pick_term(domain: &Domain, rng: &mut fastrand::Rng) -> &'static str {
    domain.seed_terms[rng.usize(..domain.seed_terms.len())]
}

fn domain_exploration_queries(state: &LearningState, rng: &mut fastrand::Rng) -> Vec<ProbeQuery> {
    select_weighted_domains(state, rng)
        .into_iter()
        .map(|domain| ProbeQuery {
            query: pick_term(domain, rng).to_string(),
            kind: ProbeKind::DomainExploration,
            description: format!("Testing {} domain", domain.id),
            domain: domain.id,
        })
        .collect()
}

fn pattern_exploration_queries(state: &LearningState, rng: &mut fastrand::Rng) -> Vec<ProbeQuery> {
    sample_focus_domains(state, rng)
        .into_iter()
        .map(|domain| {
            let term = pick_term(domain, rng);
            let pattern = &PATTERNS[rng.usize(..PATTERNS.len())];
            ProbeQuery {
                query: pattern.apply(term, rng),
                kind: ProbeKind::Pattern(pattern.id),
                description: format!("Testing {} pattern in {}", pattern.id, domain.id),
                domain: domain.id,
            }
        })
        .collect()
}

fn optimized_queries(state: &LearningState, rng: &mut fastrand::Rng) -> Vec<ProbeQuery> {
    let mut candidates: Vec<&'static QueryPattern> = state
        .learned
        .successful_patterns
        .iter()
        .filter_map(|shape| catalog::pattern(shape.pattern_id()))
        .collect();
    if candidates.is_empty() {
        candidates = PATTERNS.iter().collect();
    }

    sample_focus_domains(state, rng)
        .into_iter()
        .map(|domain| {
            let pattern = candidates[rng.usize(..candidates.len())];
            let term = pick_term(domain, rng);
            ProbeQuery {
                query: pattern.apply(term, rng),
                kind: ProbeKind::Optimized,
                description: format!("Optimized {} query for {}", pattern.id, domain.id),
                domain: domain.id,
            }
        })
        .collect()
}
