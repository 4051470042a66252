//! Shared test utilities for search-reverser integration harnesses.
//!
//! Import via `mod common; use common::*;` at the top of each harness file.

#![allow(dead_code)]

pub mod mock_search_api;

pub use mock_search_api::MockSearchApi;

use search_reverser::ProbeConfig;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("search_reverser=debug")
        .with_test_writer()
        .try_init();
}

/// Config pointed at `target` with pacing disabled and a fixed seed.
pub fn fast_config(target: impl Into<String>, seed: u64) -> ProbeConfig {
    ProbeConfig::default()
        .with_target(target)
        .with_pacing(0)
        .with_timeout(5)
        .with_seed(seed)
}
