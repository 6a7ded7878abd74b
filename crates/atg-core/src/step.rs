//! Process step input model.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// One line of an input process description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    /// 1-based position in the enclosing sequence
    pub order: usize,
    /// What the actor does
    pub action: String,
    /// Observable outcome
    #[serde(default)]
    pub expected_result: String,
}

impl ProcessStep {
    pub fn new(order: usize, action: impl Into<String>, expected_result: impl Into<String>) -> Self {
        Self {
            order,
            action: action.into(),
            expected_result: expected_result.into(),
        }
    }

    /// Builds an ordered step sequence from `(action, expected_result)` pairs,
    /// numbering from 1.
    pub fn sequence<I, A, E>(pairs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (A, E)>,
        A: Into<String>,
        E: Into<String>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (action, expected))| Self::new(i + 1, action, expected))
            .collect()
    }

    /// The correction signature of this step: its normalized action text.
    pub fn signature(&self) -> String {
        normalize(&self.action)
    }
}
