//! Static probe knowledge: semantic domains, query patterns, baseline probes.
//!
//! Nothing here is mutated at runtime. Declaration order of [`DOMAINS`] is
//! significant: domain identification returns the first domain whose seed
//! terms overlap the query.

use serde::Serialize;

/// Broad cluster a domain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainCluster {
    Academic,
    Technology,
    Business,
    Creative,
    Industry,
}

/// A named semantic cluster of seed terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub id: &'static str,
    pub cluster: DomainCluster,
    pub seed_terms: &'static [&'static str],
}

/// Probe domains, in identification priority order.
pub const DOMAINS: &[Domain] = &[
    Domain {
        id: "general_academic",
        cluster: DomainCluster::Academic,
        seed_terms: &[
            "education",
            "learning",
            "study",
            "course",
            "tutorial",
            "guide",
            "introduction",
        ],
    },
    Domain {
        id: "science",
        cluster: DomainCluster::Academic,
        seed_terms: &["research", "experiment", "theory", "analysis", "methodology", "scientific"],
    },
    Domain {
        id: "mathematics",
        cluster: DomainCluster::Academic,
        seed_terms: &["math", "calculus", "algebra", "statistics", "probability", "equations"],
    },
    Domain {
        id: "general_tech",
        cluster: DomainCluster::Technology,
        seed_terms: &[
            "technology",
            "digital",
            "computer",
            "software",
            "hardware",
            "system",
            "platform",
        ],
    },
    Domain {
        id: "programming",
        cluster: DomainCluster::Technology,
        seed_terms: &[
            "coding",
            "development",
            "software",
            "algorithm",
            "debugging",
            "implementation",
        ],
    },
    Domain {
        id: "languages",
        cluster: DomainCluster::Technology,
        seed_terms: &["python", "javascript", "java", "cpp", "rust", "golang", "ruby", "php"],
    },
    Domain {
        id: "web_dev",
        cluster: DomainCluster::Technology,
        seed_terms: &["frontend", "backend", "fullstack", "web", "html", "css", "api", "rest"],
    },
    Domain {
        id: "data_science",
        cluster: DomainCluster::Technology,
        seed_terms: &[
            "analytics",
            "machine learning",
            "data mining",
            "big data",
            "visualization",
            "prediction",
        ],
    },
    Domain {
        id: "business",
        cluster: DomainCluster::Business,
        seed_terms: &[
            "management",
            "strategy",
            "planning",
            "organization",
            "leadership",
            "innovation",
        ],
    },
    Domain {
        id: "marketing",
        cluster: DomainCluster::Business,
        seed_terms: &["advertising", "branding", "marketing", "social media", "content", "seo"],
    },
    Domain {
        id: "finance",
        cluster: DomainCluster::Business,
        seed_terms: &["investment", "trading", "economics", "financial", "accounting", "market"],
    },
    Domain {
        id: "design",
        cluster: DomainCluster::Creative,
        seed_terms: &["design", "creative", "art", "visual", "graphic", "typography", "layout"],
    },
    Domain {
        id: "media",
        cluster: DomainCluster::Creative,
        seed_terms: &["video", "audio", "multimedia", "animation", "production", "editing"],
    },
    Domain {
        id: "writing",
        cluster: DomainCluster::Creative,
        seed_terms: &["content", "documentation", "technical writing", "blogging", "copywriting"],
    },
    Domain {
        id: "engineering",
        cluster: DomainCluster::Industry,
        seed_terms: &["mechanical", "electrical", "civil", "chemical", "industrial", "engineering"],
    },
    Domain {
        id: "healthcare",
        cluster: DomainCluster::Industry,
        seed_terms: &["medical", "health", "clinical", "patient", "diagnosis", "treatment"],
    },
    Domain {
        id: "manufacturing",
        cluster: DomainCluster::Industry,
        seed_terms: &["production", "assembly", "quality", "automation", "industrial", "process"],
    },
];

/// Look up a domain by id.
pub fn domain(id: &str) -> Option<&'static Domain> {
    DOMAINS.iter().find(|d| d.id == id)
}

/// How a pattern turns a seed term into a query.
///
/// `Combined` picks its filler word from `choices` using the caller's RNG,
/// so the same seed reproduces the same queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTemplate {
    /// The term itself.
    Identity,
    /// The term wrapped in double quotes.
    Quoted,
    /// `"{prefix} {term}"`
    Prefix(&'static str),
    /// `"{term} {suffix}"`
    Suffix(&'static str),
    /// `"{prefix} {term} {suffix}"`
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// `"{term} {connector} {choice}"`
    Combined {
        connector: &'static str,
        choices: &'static [&'static str],
    },
}

impl PatternTemplate {
    /// Apply this template to a seed term.
    pub fn apply(&self, term: &str, rng: &mut fastrand::Rng) -> String {
        match self {
            PatternTemplate::Identity => term.to_string(),
            PatternTemplate::Quoted => format!("\"{}\"", term),
            PatternTemplate::Prefix(prefix) => format!("{} {}", prefix, term),
            PatternTemplate::Suffix(suffix) => format!("{} {}", term, suffix),
            PatternTemplate::Wrap { prefix, suffix } => format!("{} {} {}", prefix, term, suffix),
            PatternTemplate::Combined { connector, choices } => {
                let choice = choices[rng.usize(..choices.len())];
                format!("{} {} {}", term, connector, choice)
            }
        }
    }
}

/// A named query-mutation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPattern {
    pub id: &'static str,
    pub template: PatternTemplate,
}

impl QueryPattern {
    pub fn apply(&self, term: &str, rng: &mut fastrand::Rng) -> String {
        self.template.apply(term, rng)
    }
}

/// Query-mutation patterns available to the strategy.
pub const PATTERNS: &[QueryPattern] = &[
    QueryPattern {
        id: "simple",
        template: PatternTemplate::Identity,
    },
    QueryPattern {
        id: "quoted",
        template: PatternTemplate::Quoted,
    },
    QueryPattern {
        id: "and_combo",
        template: PatternTemplate::Combined {
            connector: "AND",
            choices: &["guide", "tutorial", "introduction"],
        },
    },
    QueryPattern {
        id: "or_combo",
        template: PatternTemplate::Combined {
            connector: "OR",
            choices: &["course", "training", "learning"],
        },
    },
    QueryPattern {
        id: "beginner",
        template: PatternTemplate::Prefix("beginner"),
    },
    QueryPattern {
        id: "advanced",
        template: PatternTemplate::Prefix("advanced"),
    },
    QueryPattern {
        id: "learn",
        template: PatternTemplate::Prefix("learn"),
    },
    QueryPattern {
        id: "with",
        template: PatternTemplate::Combined {
            connector: "with",
            choices: &["examples", "practice", "exercises"],
        },
    },
    QueryPattern {
        id: "for",
        template: PatternTemplate::Combined {
            connector: "for",
            choices: &["beginners", "professionals", "students"],
        },
    },
    QueryPattern {
        id: "course",
        template: PatternTemplate::Suffix("course"),
    },
    QueryPattern {
        id: "tutorial",
        template: PatternTemplate::Suffix("tutorial"),
    },
    QueryPattern {
        id: "guide",
        template: PatternTemplate::Wrap {
            prefix: "complete",
            suffix: "guide",
        },
    },
];

/// Look up a pattern by id.
pub fn pattern(id: &str) -> Option<&'static QueryPattern> {
    PATTERNS.iter().find(|p| p.id == id)
}

/// A fixed, non-adaptive probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaselineProbe {
    pub query: &'static str,
    pub kind: &'static str,
}

/// Hand-written probes covering the obvious matching behaviours.
pub const BASELINE_PROBES: &[BaselineProbe] = &[
    BaselineProbe {
        query: "exact term",
        kind: "exact",
    },
    BaselineProbe {
        query: "partial ter",
        kind: "partial",
    },
    BaselineProbe {
        query: "misspeled term",
        kind: "fuzzy",
    },
    BaselineProbe {
        query: "term exact",
        kind: "word_order",
    },
    BaselineProbe {
        query: "UPPER CASE",
        kind: "case_sensitivity",
    },
    BaselineProbe {
        query: "special!@#$",
        kind: "special_chars",
    },
];
