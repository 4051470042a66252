//! Run configuration.

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ProbeError, Result};
use crate::strategy::DEFAULT_MAX_EXPLORATION_ROUNDS;

pub const DEFAULT_TARGET: &str = "http://localhost:8000/search";
pub const DEFAULT_PACING_MS: u64 = 1000;
pub const DEFAULT_USER_AGENT: &str = "SearchReverseEngineer/1.0";

/// Configuration for one profiling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Full search URL, including the `/search` path.
    pub target: String,

    /// Delay after each successful request, in milliseconds.
    ///
    /// Default: 1000.
    pub pacing_ms: u64,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,

    pub user_agent: String,

    /// Generation rounds per exploration phase.
    ///
    /// Default: 3.
    pub max_exploration_rounds: u32,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            pacing_ms: DEFAULT_PACING_MS,
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_exploration_rounds: DEFAULT_MAX_EXPLORATION_ROUNDS,
            seed: None,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the environment, reading `.env` first if present.
    ///
    /// - `SEARCH_REVERSER_TARGET`
    /// - `SEARCH_REVERSER_PACING_MS`
    /// - `SEARCH_REVERSER_SEED`
    /// - `SEARCH_REVERSER_TIMEOUT_SECS`
    ///
    /// Unset variables keep their defaults; unparseable ones are an error.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            target: lookup("SEARCH_REVERSER_TARGET").unwrap_or(defaults.target),
            pacing_ms: parse_var(&lookup, "SEARCH_REVERSER_PACING_MS")?
                .unwrap_or(defaults.pacing_ms),
            timeout_secs: parse_var(&lookup, "SEARCH_REVERSER_TIMEOUT_SECS")?,
            user_agent: defaults.user_agent,
            max_exploration_rounds: defaults.max_exploration_rounds,
            seed: parse_var(&lookup, "SEARCH_REVERSER_SEED")?,
        })
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the pacing delay in milliseconds.
    pub fn with_pacing(mut self, ms: u64) -> Self {
        self.pacing_ms = ms;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_exploration_rounds(mut self, rounds: u32) -> Self {
        self.max_exploration_rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ProbeError::Config {
                key: key.to_string(),
                reason: format!("{} ({:?})", e, raw),
            }),
    }
}
