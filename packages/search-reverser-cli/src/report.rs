//! Text rendering for the analysis report.

use colored::Colorize;
use search_reverser::{
    BehaviorProfile, QuerySample, ResultCharacteristics, SearchHit, TestReport,
};
use std::fmt::Write;
use std::time::Duration;

const RULE_WIDTH: usize = 40;

fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn yes_no(on: bool) -> colored::ColoredString {
    if on {
        "Yes".green()
    } else {
        "No".dimmed()
    }
}

/// Full report: learning status, behaviors, learned patterns, success rates,
/// then the hypothesis.
pub fn render(report: &TestReport, behaviors: &BehaviorProfile) -> String {
    let mut out = String::new();
    let status = &report.learning_status;
    let learned = &status.learned_patterns;

    let _ = writeln!(out, "\n{}", "Search Algorithm Analysis Report".bold());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));

    let _ = writeln!(out, "\nLearning Phase: {}", status.phase.to_string().cyan());
    let _ = writeln!(out, "Exploration Progress: {}", status.exploration_progress);

    let _ = writeln!(out, "\n{}", "Detected Behaviors:".bold());
    for (label, on) in behaviors.flags() {
        let _ = writeln!(out, "- {}: {}", label, yes_no(on));
    }

    let _ = writeln!(out, "\n{}", "Learned Patterns:".bold());
    let _ = writeln!(out, "- effective_terms: {}", join(&learned.effective_terms));
    let _ = writeln!(out, "- ineffective_terms: {}", join(&learned.ineffective_terms));
    let _ = writeln!(
        out,
        "- optimal_query_length: {:.2}",
        learned.optimal_query_length
    );
    let _ = writeln!(
        out,
        "- best_performing_categories: {}",
        join(&learned.best_performing_categories)
    );
    let _ = writeln!(out, "- successful_domains: {}", join(&learned.successful_domains));
    let _ = writeln!(
        out,
        "- successful_patterns: {}",
        join(&learned.successful_patterns)
    );

    let _ = writeln!(out, "\n{}", "Query Success Rates:".bold());
    for (category, rate) in &status.success_rates {
        let _ = writeln!(
            out,
            "- {}: {:.1}% ({}/{})",
            category,
            rate.percent(),
            rate.success,
            rate.total
        );
    }

    let hypothesis = &report.hypothesis;
    let _ = writeln!(
        out,
        "\nHypothesis: {} (confidence {:.2}, fuzzy {:.2}, exact {:.2}, avg {:.3}s)",
        hypothesis.likely_algorithm.to_string().yellow().bold(),
        hypothesis.confidence_score,
        hypothesis.observed_patterns.fuzzy_match_ratio,
        hypothesis.observed_patterns.exact_match_ratio,
        hypothesis.observed_patterns.average_response_time
    );

    out
}

/// One line per baseline probe.
pub fn render_baseline(samples: &[QuerySample]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Baseline Probes".bold());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    for sample in samples {
        let _ = writeln!(
            out,
            "- {:<20} {:>3} results  matching={}  relevance={:.2}  {}ms",
            format!("{:?}", sample.query),
            sample.results.len(),
            sample.characteristics.matching_type,
            sample.characteristics.ranking_factors.text_relevance,
            sample.timing.as_millis()
        );
    }
    out
}

/// Characteristics and ranked hits for a single query.
pub fn render_query(
    query: &str,
    hits: &[SearchHit],
    characteristics: &ResultCharacteristics,
    elapsed: Duration,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {:?}: {} results in {}ms",
        "Query".bold(),
        query,
        hits.len(),
        elapsed.as_millis()
    );
    let _ = writeln!(out, "Matching: {}", characteristics.matching_type);
    let _ = writeln!(
        out,
        "Text relevance: {:.2}",
        characteristics.ranking_factors.text_relevance
    );
    for (rank, hit) in hits.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. [{:.2} {}] {}",
            rank + 1,
            hit.score,
            hit.matched,
            hit.title
        );
    }
    out
}
