//! Human-facing behavior flags derived from a finished run.

use serde::Serialize;

use crate::strategy::{LearningStatus, Phase, QueryCategory};
use crate::types::TestReport;

/// Literal term whose presence among ineffective terms marks stop-word removal.
pub const STOP_WORDS_MARKER: &str = "stop_words";

/// Yes/no summary of the target's observed behaviour.
///
/// Only three flags are ever derived; the rest stay `false` until the
/// analyzer grows detectors for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BehaviorProfile {
    pub case_sensitive: bool,
    pub uses_fuzzy_matching: bool,
    pub removes_stop_words: bool,
    pub considers_word_order: bool,
    pub boosts_by_popularity: bool,
    pub considers_recency: bool,
}

impl BehaviorProfile {
    pub fn from_status(status: &LearningStatus) -> Self {
        Self {
            uses_fuzzy_matching: status.success_rates.contains_key(&QueryCategory::Fuzzy),
            removes_stop_words: status
                .learned_patterns
                .ineffective_terms
                .contains(STOP_WORDS_MARKER),
            considers_word_order: status.phase == Phase::Optimization,
            ..Self::default()
        }
    }

    pub fn from_report(report: &TestReport) -> Self {
        Self::from_status(&report.learning_status)
    }

    /// Flags in report order, labelled for display.
    pub fn flags(&self) -> [(&'static str, bool); 6] {
        [
            ("Case Sensitive", self.case_sensitive),
            ("Uses Fuzzy Matching", self.uses_fuzzy_matching),
            ("Removes Stop Words", self.removes_stop_words),
            ("Considers Word Order", self.considers_word_order),
            ("Boosts By Popularity", self.boosts_by_popularity),
            ("Considers Recency", self.considers_recency),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{LearningState, SuccessRate};

    #[test]
    fn test_fresh_status_has_no_behaviors() {
        let profile = BehaviorProfile::from_status(&LearningState::default().status());
        assert_eq!(profile, BehaviorProfile::default());
        assert!(profile.flags().iter().all(|(_, on)| !on));
    }

    #[test]
    fn test_derived_flags() {
        let mut state = LearningState::default();
        state.phase = Phase::Optimization;
        state
            .success_rates
            .insert(
                QueryCategory::Fuzzy,
                SuccessRate {
                    success: 0,
                    total: 1,
                },
            );
        state
            .learned
            .ineffective_terms
            .insert(STOP_WORDS_MARKER.to_string());

        let profile = BehaviorProfile::from_status(&state.status());
        assert!(profile.uses_fuzzy_matching);
        assert!(profile.removes_stop_words);
        assert!(profile.considers_word_order);
        assert!(!profile.case_sensitive);
        assert!(!profile.boosts_by_popularity);
        assert!(!profile.considers_recency);

        let labels: Vec<_> = profile.flags().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels[1], "Uses Fuzzy Matching");
    }
}
