//! Folding one observed response into the learning state.

use std::collections::BTreeSet;
use tracing::debug;

use super::classify::{categorize_query, identify_domain, identify_query_pattern, GENERAL_DOMAIN};
use super::state::{LearningState, MAX_DOMAIN_WEIGHT, MIN_DOMAIN_WEIGHT};
use crate::types::SearchHit;

/// Score above which a result marks every query term as effective.
pub const HIGH_SCORE_THRESHOLD: f64 = 0.7;

const SUCCESS_WEIGHT_FACTOR: f64 = 1.2;
const FAILURE_WEIGHT_FACTOR: f64 = 0.8;

/// Smoothing applied to `optimal_query_length` (prior, observation).
const LENGTH_SMOOTHING: (f64, f64) = (0.8, 0.2);

const LOGICAL_OPERATORS: &[&str] = &["and", "or", "not"];

/// Return the state after observing `results` for `query`.
///
/// A query succeeds when it returned at least one result. Queries that
/// overlap no catalog domain still count towards the category table but
/// leave domain weights and `successful_domains` untouched.
pub fn apply_response(
    state: &LearningState,
    query: &str,
    results: &[SearchHit],
) -> LearningState {
    let mut next = state.clone();
    let success = !results.is_empty();
    let category = categorize_query(query);
    let domain = identify_domain(query);

    let rate = next.success_rates.entry(category).or_default();
    rate.total += 1;

    if success {
        rate.success += 1;
        record_success(&mut next, query, results);
        if let Some(domain) = domain {
            next.learned.successful_domains.insert(domain.id);
        }
        if !next.learned.best_performing_categories.contains(&category) {
            next.learned.best_performing_categories.push(category);
        }
    } else {
        record_failure(&mut next, query);
    }

    if let Some(domain) = domain {
        if let Some(weight) = next.domain_weights.get_mut(domain.id) {
            *weight = if success {
                (*weight * SUCCESS_WEIGHT_FACTOR).min(MAX_DOMAIN_WEIGHT)
            } else {
                (*weight * FAILURE_WEIGHT_FACTOR).max(MIN_DOMAIN_WEIGHT)
            };
        }
    }

    debug!(
        query = %query,
        category = %category,
        domain = domain.map(|d| d.id).unwrap_or(GENERAL_DOMAIN),
        success,
        "Recorded probe response"
    );

    next
}

fn record_success(state: &mut LearningState, query: &str, results: &[SearchHit]) {
    let lowered = query.to_lowercase();
    let query_terms: BTreeSet<&str> = lowered.split_whitespace().collect();
    let mut successful_terms: BTreeSet<String> = BTreeSet::new();

    for result in results {
        let title = result.title.to_lowercase();
        successful_terms.extend(
            title
                .split_whitespace()
                .filter(|t| query_terms.contains(t))
                .map(str::to_string),
        );

        if result.score > HIGH_SCORE_THRESHOLD {
            successful_terms.extend(query_terms.iter().map(|t| t.to_string()));
            let shape = identify_query_pattern(query);
            if !state.learned.successful_patterns.contains(&shape) {
                state.learned.successful_patterns.push(shape);
            }
        }
    }

    let learned = &mut state.learned;
    learned.effective_terms.extend(successful_terms);
    learned
        .ineffective_terms
        .retain(|t| !learned.effective_terms.contains(t));

    let (prior, observed) = LENGTH_SMOOTHING;
    let length = query.split_whitespace().count() as f64;
    learned.optimal_query_length = learned.optimal_query_length * prior + length * observed;
}

fn record_failure(state: &mut LearningState, query: &str) {
    let learned = &mut state.learned;
    learned.ineffective_terms.extend(
        query
            .split_whitespace()
            .filter(|t| t.chars().all(char::is_alphanumeric))
            .filter(|t| !LOGICAL_OPERATORS.contains(&t.to_lowercase().as_str()))
            .map(str::to_string),
    );
    learned
        .ineffective_terms
        .retain(|t| !learned.effective_terms.contains(t));
}
