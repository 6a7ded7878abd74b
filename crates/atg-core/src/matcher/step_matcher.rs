//! Deterministic, explainable keyword matching for a single step.
//!
//! Rules, first match wins:
//! 1. a stored correction for the normalized action
//! 2. exact normalized-name match
//! 3. best Jaccard token overlap, ties broken by arity bonus, then shorter
//!    name, then lexical name order
//! 4. the winner is accepted only at or above the acceptance threshold

use std::cmp::Ordering;

use super::decision::{MappingDecision, MatchRule};
use crate::config::{AtgConfig, DEFAULT_ACCEPTANCE_THRESHOLD};
use crate::correction::CorrectionSet;
use crate::error::{AtgError, Result};
use crate::framework::Framework;
use crate::keyword::{KeywordEntry, KeywordLibrary};
use crate::normalize::{count_number_tokens, jaccard, normalize, tokens};
use crate::step::ProcessStep;

/// Source reference given to keywords that only exist as a correction.
pub const CORRECTION_SOURCE_REF: &str = "correction";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Framework whose keywords are eligible
    pub framework: Framework,
    /// Minimum overlap score for a fuzzy match to count as mapped
    pub acceptance_threshold: f64,
}

impl MatcherConfig {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    pub fn from_config(config: &AtgConfig, framework: Framework) -> Self {
        Self::new(framework).with_threshold(config.acceptance_threshold)
    }
}

/// A scored candidate during rule 3.
struct Scored<'a> {
    entry: &'a KeywordEntry,
    score: f64,
    arity_bonus: bool,
}

impl Scored<'_> {
    /// Best candidate sorts first.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.arity_bonus.cmp(&self.arity_bonus))
            .then_with(|| {
                self.entry
                    .name
                    .chars()
                    .count()
                    .cmp(&other.entry.name.chars().count())
            })
            .then_with(|| self.entry.name.cmp(&other.entry.name))
    }
}

/// Matches process steps against a keyword library.
///
/// Pure: never mutates the library, the step or the corrections.
#[derive(Debug, Clone)]
pub struct StepMatcher {
    config: MatcherConfig,
}

impl StepMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Decides whether an existing keyword covers `step`.
    ///
    /// # Errors
    ///
    /// Returns `AtgError::InvalidStep` when the action is empty or has no
    /// word characters.
    pub fn match_step(
        &self,
        step: &ProcessStep,
        library: &KeywordLibrary,
        corrections: &CorrectionSet,
    ) -> Result<MappingDecision> {
        if step.action.trim().is_empty() {
            return Err(AtgError::invalid_step(step.order, "action text is empty"));
        }
        let normalized = normalize(&step.action);
        if normalized.is_empty() {
            return Err(AtgError::invalid_step(
                step.order,
                "action text has no word characters",
            ));
        }
        let framework = self.config.framework;
        let numbers = count_number_tokens(&normalized);

        if let Some(keyword_name) = corrections.get(&normalized) {
            let keyword = match library.find_by_name(keyword_name, framework) {
                Some(entry) => entry.clone(),
                None => {
                    tracing::warn!(
                        "Correction for '{}' names keyword '{}' which is not in the {} library",
                        normalized,
                        keyword_name,
                        framework
                    );
                    KeywordEntry {
                        name: keyword_name.to_string(),
                        framework,
                        arity: 0,
                        source_ref: CORRECTION_SOURCE_REF.to_string(),
                        step_kind: None,
                    }
                }
            };
            let mismatch = self.arity_mismatch(step, &keyword, numbers);
            return Ok(MappingDecision::mapped(
                step.clone(),
                keyword,
                1.0,
                MatchRule::Correction,
                mismatch,
            ));
        }

        if let Some(entry) = library.find_exact(&normalized, framework) {
            let mismatch = self.arity_mismatch(step, entry, numbers);
            return Ok(MappingDecision::mapped(
                step.clone(),
                entry.clone(),
                1.0,
                MatchRule::ExactName,
                mismatch,
            ));
        }

        let step_tokens = tokens(&normalized);
        let mut scored: Vec<Scored<'_>> = library
            .lookup_candidates(&normalized, framework)
            .into_iter()
            .map(|entry| Scored {
                entry,
                score: jaccard(&step_tokens, &tokens(&entry.name)),
                arity_bonus: entry.arity == numbers,
            })
            .collect();
        scored.sort_by(|a, b| a.rank(b));

        let Some(best) = scored.first() else {
            tracing::debug!(step = step.order, "No candidate keyword shares a token");
            return Ok(MappingDecision::unmapped(step.clone(), 0.0, MatchRule::NoCandidate, None));
        };

        if best.score >= self.config.acceptance_threshold {
            let mismatch = self.arity_mismatch(step, best.entry, numbers);
            Ok(MappingDecision::mapped(
                step.clone(),
                best.entry.clone(),
                best.score,
                MatchRule::TokenOverlap,
                mismatch,
            ))
        } else {
            tracing::debug!(
                step = step.order,
                score = best.score,
                nearest = %best.entry.name,
                "Best candidate below acceptance threshold"
            );
            Ok(MappingDecision::unmapped(
                step.clone(),
                best.score,
                MatchRule::BelowThreshold,
                Some(best.entry.name.clone()),
            ))
        }
    }

    fn arity_mismatch(&self, step: &ProcessStep, keyword: &KeywordEntry, numbers: usize) -> bool {
        let mismatch = numbers != keyword.arity;
        if mismatch {
            tracing::warn!(
                "Step #{} maps to '{}' which takes {} argument(s), but the action has {} number-like token(s)",
                step.order,
                keyword.name,
                keyword.arity,
                numbers
            );
        }
        mismatch
    }
}
