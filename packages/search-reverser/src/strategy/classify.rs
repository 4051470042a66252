//! Post-hoc labelling of issued queries.
//!
//! Categories and shapes overlap, so both are decided by ordered rule
//! tables evaluated top-down: the first predicate that holds wins.

use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::{Domain, DOMAINS};

/// Label used for queries that overlap no catalog domain.
pub const GENERAL_DOMAIN: &str = "general";

/// Structural category of a query, keyed in the success-rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    Exact,
    Partial,
    Fuzzy,
    Compound,
    General,
}

impl std::fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryCategory::Exact => write!(f, "exact"),
            QueryCategory::Partial => write!(f, "partial"),
            QueryCategory::Fuzzy => write!(f, "fuzzy"),
            QueryCategory::Compound => write!(f, "compound"),
            QueryCategory::General => write!(f, "general"),
        }
    }
}

fn term_count(query: &str) -> usize {
    query.split_whitespace().count()
}

fn has_many_terms(query: &str) -> bool {
    term_count(query) > 2
}

fn has_single_term(query: &str) -> bool {
    term_count(query) == 1
}

fn has_special_chars(query: &str) -> bool {
    query
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

fn has_boolean_operator(query: &str) -> bool {
    query.contains(" AND ") || query.contains(" OR ")
}

/// Category rules in priority order. Falls through to `General`.
pub const CATEGORY_RULES: &[(QueryCategory, fn(&str) -> bool)] = &[
    (QueryCategory::Exact, has_many_terms),
    (QueryCategory::Partial, has_single_term),
    (QueryCategory::Fuzzy, has_special_chars),
    (QueryCategory::Compound, has_boolean_operator),
];

/// Categorize a query by the first matching rule in [`CATEGORY_RULES`].
pub fn categorize_query(query: &str) -> QueryCategory {
    CATEGORY_RULES
        .iter()
        .find(|(_, applies)| applies(query))
        .map(|(category, _)| *category)
        .unwrap_or(QueryCategory::General)
}

/// Surface shape of an issued query, recorded on high-scoring queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryShape {
    Phrase,
    Compound,
    Broad,
    Specific,
    Simple,
}

impl QueryShape {
    /// Catalog pattern that produces queries of this shape.
    pub fn pattern_id(&self) -> &'static str {
        match self {
            QueryShape::Phrase => "quoted",
            QueryShape::Compound => "and_combo",
            QueryShape::Broad => "or_combo",
            QueryShape::Specific => "advanced",
            QueryShape::Simple => "simple",
        }
    }
}

impl std::fmt::Display for QueryShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryShape::Phrase => write!(f, "phrase"),
            QueryShape::Compound => write!(f, "compound"),
            QueryShape::Broad => write!(f, "broad"),
            QueryShape::Specific => write!(f, "specific"),
            QueryShape::Simple => write!(f, "simple"),
        }
    }
}

fn has_quote(query: &str) -> bool {
    query.contains('"')
}

fn has_and(query: &str) -> bool {
    query.contains(" and ")
}

fn has_or(query: &str) -> bool {
    query.contains(" or ")
}

fn has_advanced_prefix(query: &str) -> bool {
    query.starts_with("advanced ")
}

/// Shape rules in priority order, applied to the lowercased query.
pub const SHAPE_RULES: &[(QueryShape, fn(&str) -> bool)] = &[
    (QueryShape::Phrase, has_quote),
    (QueryShape::Compound, has_and),
    (QueryShape::Broad, has_or),
    (QueryShape::Specific, has_advanced_prefix),
];

/// Identify the shape of an already-issued query.
pub fn identify_query_pattern(query: &str) -> QueryShape {
    let query = query.to_lowercase();
    SHAPE_RULES
        .iter()
        .find(|(_, applies)| applies(&query))
        .map(|(shape, _)| *shape)
        .unwrap_or(QueryShape::Simple)
}

/// First catalog domain sharing a (case-insensitive) token with the query.
///
/// Returns `None` for the `general` fallback.
pub fn identify_domain(query: &str) -> Option<&'static Domain> {
    let lowered = query.to_lowercase();
    let query_terms: HashSet<&str> = lowered.split_whitespace().collect();

    DOMAINS.iter().find(|domain| {
        domain
            .seed_terms
            .iter()
            .any(|term| query_terms.contains(term.to_lowercase().as_str()))
    })
}

/// Domain label for logging and reporting.
pub fn domain_label(query: &str) -> &'static str {
    identify_domain(query).map(|d| d.id).unwrap_or(GENERAL_DOMAIN)
}
