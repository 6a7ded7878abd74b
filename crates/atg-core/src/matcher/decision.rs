//! Mapping decision model.

use serde::{Deserialize, Serialize};

use crate::keyword::KeywordEntry;
use crate::step::ProcessStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    Mapped,
    Unmapped,
}

/// Which rule of the matching policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// A stored human correction for the same normalized action
    Correction,
    /// Normalized action equals a keyword's normalized name
    ExactName,
    /// Best token-overlap candidate cleared the acceptance threshold
    TokenOverlap,
    /// Best token-overlap candidate scored below the threshold
    BelowThreshold,
    /// No keyword shares a single token with the action
    NoCandidate,
    /// The step could not be matched at all
    InvalidStep,
}

/// The outcome of matching one process step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingDecision {
    pub step: ProcessStep,
    pub status: MappingStatus,
    /// Present iff `status` is `Mapped`
    pub matched_keyword: Option<KeywordEntry>,
    /// Match strength in [0, 1]; the best score seen when unmapped
    pub confidence: f64,
    pub rule: MatchRule,
    /// Best-scoring keyword of a near miss, for reviewer triage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_keyword: Option<String>,
    /// Number-like token count in the action differs from the keyword arity
    #[serde(default)]
    pub arity_mismatch: bool,
    /// Set when the step itself was rejected (`MatchRule::InvalidStep`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MappingDecision {
    pub fn mapped(
        step: ProcessStep,
        keyword: KeywordEntry,
        confidence: f64,
        rule: MatchRule,
        arity_mismatch: bool,
    ) -> Self {
        Self {
            step,
            status: MappingStatus::Mapped,
            matched_keyword: Some(keyword),
            confidence,
            rule,
            nearest_keyword: None,
            arity_mismatch,
            error: None,
        }
    }

    pub fn unmapped(step: ProcessStep, confidence: f64, rule: MatchRule, nearest: Option<String>) -> Self {
        Self {
            step,
            status: MappingStatus::Unmapped,
            matched_keyword: None,
            confidence,
            rule,
            nearest_keyword: nearest,
            arity_mismatch: false,
            error: None,
        }
    }

    /// An unmapped decision standing in for a step that failed validation.
    pub fn errored(step: ProcessStep, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::unmapped(step, 0.0, MatchRule::InvalidStep, None)
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.status == MappingStatus::Mapped
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
