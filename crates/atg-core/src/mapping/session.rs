//! Mapping session aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::correction::CorrectionSet;
use crate::error::{AtgError, Result};
use crate::framework::Framework;
use crate::keyword::{KeywordEntry, KeywordLibrary};
use crate::matcher::{MappingDecision, MatchRule, MatcherConfig, StepMatcher};
use crate::step::ProcessStep;

/// Aggregated numbers for dashboards and reviewers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub total: usize,
    pub mapped: usize,
    pub unmapped: usize,
    /// Unmapped steps that were rejected as invalid
    pub errored: usize,
    /// `mapped / total`, `None` for an empty session
    pub ratio: Option<f64>,
}

impl CoverageSummary {
    /// The ratio as a percentage label, or `N/A` for an empty session.
    pub fn ratio_label(&self) -> String {
        match self.ratio {
            Some(ratio) => format!("{:.1}%", ratio * 100.0),
            None => "N/A".to_string(),
        }
    }
}

impl fmt::Display for CoverageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} steps mapped ({})",
            self.mapped,
            self.total,
            self.ratio_label()
        )?;
        if self.errored > 0 {
            write!(f, ", {} invalid", self.errored)?;
        }
        Ok(())
    }
}

/// The decisions for one test case's step sequence, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSession {
    id: String,
    framework: Framework,
    decisions: Vec<MappingDecision>,
    coverage: Option<f64>,
}

impl MappingSession {
    /// Matches every step once, preserving order.
    ///
    /// A step rejected by the matcher does not abort the session; it becomes
    /// an unmapped decision carrying the error.
    pub fn run(
        steps: Vec<ProcessStep>,
        library: &KeywordLibrary,
        corrections: &CorrectionSet,
        config: MatcherConfig,
    ) -> Self {
        let matcher = StepMatcher::new(config);
        let decisions = steps
            .into_iter()
            .map(|step| match matcher.match_step(&step, library, corrections) {
                Ok(decision) => decision,
                Err(e) => {
                    tracing::warn!("Step #{} could not be matched: {}", step.order, e);
                    MappingDecision::errored(step, e.to_string())
                }
            })
            .collect();

        let session = Self::from_decisions(config.framework, decisions);
        tracing::info!(
            session = %session.id,
            framework = %session.framework,
            "Mapping finished: {}",
            session.summary()
        );
        session
    }

    /// Assembles a session from already computed decisions.
    pub fn from_decisions(framework: Framework, decisions: Vec<MappingDecision>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4().to_string(),
            framework,
            decisions,
            coverage: None,
        };
        session.recompute_coverage();
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn decisions(&self) -> &[MappingDecision] {
        &self.decisions
    }

    /// Decision for the step with the given 1-based order.
    pub fn decision_for(&self, order: usize) -> Option<&MappingDecision> {
        self.decisions.iter().find(|d| d.step.order == order)
    }

    /// Unmapped decisions, in order. These are what reviewers work through.
    pub fn unmapped(&self) -> impl Iterator<Item = &MappingDecision> {
        self.decisions.iter().filter(|d| !d.is_mapped())
    }

    /// `mapped / total`; `None` (N/A) for an empty session.
    pub fn coverage_ratio(&self) -> Option<f64> {
        self.coverage
    }

    pub fn summary(&self) -> CoverageSummary {
        let total = self.decisions.len();
        let mapped = self.decisions.iter().filter(|d| d.is_mapped()).count();
        let errored = self.decisions.iter().filter(|d| d.is_error()).count();
        CoverageSummary {
            total,
            mapped,
            unmapped: total - mapped,
            errored,
            ratio: self.coverage,
        }
    }

    /// Replaces one step's decision with a reviewer-chosen keyword and
    /// recomputes coverage. Persisting the correction is the caller's job
    /// (see `Mapper::record_correction`).
    pub fn apply_correction(&mut self, order: usize, keyword: KeywordEntry) -> Result<()> {
        let decision = self
            .decisions
            .iter_mut()
            .find(|d| d.step.order == order)
            .ok_or_else(|| AtgError::invalid_step(order, "no step with this order in the session"))?;

        let step = decision.step.clone();
        *decision = MappingDecision::mapped(step, keyword, 1.0, MatchRule::Correction, false);
        self.recompute_coverage();
        Ok(())
    }

    fn recompute_coverage(&mut self) {
        let total = self.decisions.len();
        self.coverage = if total == 0 {
            None
        } else {
            let mapped = self.decisions.iter().filter(|d| d.is_mapped()).count();
            Some(mapped as f64 / total as f64)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::ResourceDefinition;
    use crate::matcher::MappingStatus;

    fn library() -> KeywordLibrary {
        KeywordLibrary::build(vec![
            ResourceDefinition::new("Open Browser To Login Page", 0, Framework::Robot, "common.robot"),
            ResourceDefinition::new("Click Login Button", 0, Framework::Robot, "common.robot"),
            ResourceDefinition::new("Input Username", 1, Framework::Robot, "common.robot"),
        ])
        .unwrap()
    }

    fn run(steps: Vec<ProcessStep>) -> MappingSession {
        MappingSession::run(
            steps,
            &library(),
            &CorrectionSet::new(),
            MatcherConfig::new(Framework::Robot),
        )
    }

    #[test]
    fn test_one_decision_per_step_in_order() {
        let session = run(ProcessStep::sequence(vec![
            ("Open browser to login page", "Login page shown"),
            ("Press the sign in button", "Dashboard is displayed"),
            ("Click Login Button", "Dashboard is displayed"),
        ]));

        let orders: Vec<_> = session.decisions().iter().map(|d| d.step.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(session.decisions()[1].status, MappingStatus::Unmapped);
        assert_eq!(session.framework(), Framework::Robot);
    }

    #[test]
    fn test_coverage_ratio() {
        let session = run(ProcessStep::sequence(vec![
            ("Open browser to login page", ""),
            ("Press the sign in button", ""),
            ("Click Login Button", ""),
            ("Logout", ""),
        ]));
        assert_eq!(session.coverage_ratio(), Some(0.5));

        let summary = session.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.unmapped, 2);
        assert_eq!(summary.to_string(), "2/4 steps mapped (50.0%)");
    }

    #[test]
    fn test_empty_sequence_reports_na() {
        let session = run(Vec::new());
        assert!(session.decisions().is_empty());
        assert_eq!(session.coverage_ratio(), None);
        assert_eq!(session.summary().ratio_label(), "N/A");
    }

    #[test]
    fn test_invalid_step_does_not_abort_session() {
        let session = run(ProcessStep::sequence(vec![
            ("Click Login Button", "ok"),
            ("", "nothing"),
            ("Input Username", "ok"),
        ]));

        assert_eq!(session.decisions().len(), 3);
        let bad = session.decision_for(2).unwrap();
        assert_eq!(bad.status, MappingStatus::Unmapped);
        assert_eq!(bad.rule, MatchRule::InvalidStep);
        assert_eq!(bad.confidence, 0.0);
        assert!(bad.error.as_deref().unwrap().contains("empty"));
        assert_eq!(session.summary().errored, 1);
        assert!(session.decision_for(3).unwrap().is_mapped());
    }

    #[test]
    fn test_apply_correction_recomputes_coverage() {
        let mut session = run(ProcessStep::sequence(vec![
            ("Click Login Button", ""),
            ("Press the sign in button", ""),
        ]));
        assert_eq!(session.coverage_ratio(), Some(0.5));

        let keyword = library().find_by_name("Click Login Button", Framework::Robot).cloned().unwrap();
        session.apply_correction(2, keyword).unwrap();

        assert_eq!(session.coverage_ratio(), Some(1.0));
        assert_eq!(session.decision_for(2).unwrap().rule, MatchRule::Correction);
        assert_eq!(session.unmapped().count(), 0);

        let err = session
            .apply_correction(9, library().find_by_name("Input Username", Framework::Robot).cloned().unwrap())
            .unwrap_err();
        assert!(err.is_invalid_step());
    }
}
