// Filter result — the immutable outcome of one filtering pass.

use std::collections::BTreeSet;

use super::classifier::Classification;
use super::violation::ViolationType;

/// Outcome of a filtering pass: allowed or not, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    allowed: bool,
    violations: BTreeSet<ViolationType>,
    detected_words: Vec<String>,
}

impl FilterResult {
    /// Content passed with nothing detected.
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            violations: BTreeSet::new(),
            detected_words: Vec::new(),
        }
    }

    /// Content rejected for the given reasons.
    pub fn rejected(violations: BTreeSet<ViolationType>, detected_words: Vec<String>) -> Self {
        Self {
            allowed: false,
            violations,
            detected_words,
        }
    }

    /// Turn a classifier pass into a result: clean text is allowed,
    /// anything detected is a rejection.
    pub fn from_classification(classification: Classification) -> Self {
        if classification.is_clean() {
            Self::allowed()
        } else {
            Self::rejected(classification.violations, classification.matched_words)
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn violations(&self) -> &BTreeSet<ViolationType> {
        &self.violations
    }

    pub fn detected_words(&self) -> &[String] {
        &self.detected_words
    }

    /// The most significant violation (lowest in category order), if any.
    pub fn primary_violation(&self) -> Option<ViolationType> {
        self.violations.iter().next().copied()
    }
}
