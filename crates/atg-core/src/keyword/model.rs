//! Keyword domain models.

use serde::{Deserialize, Serialize};

use crate::framework::Framework;

/// Which Gherkin step type a step definition was registered for.
///
/// Step runners match by type, so a `When` definition must be invoked with
/// `When` (or an `And` following one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Given,
    When,
    Then,
}

impl StepKind {
    /// Parses a step decorator or manifest name; `step` and unknown names
    /// are not bound to a type.
    pub fn from_decorator(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "given" => Some(Self::Given),
            "when" => Some(Self::When),
            "then" => Some(Self::Then),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

/// One resource definition as produced by a resource-file scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub keyword_name: String,
    pub arity: usize,
    pub framework: Framework,
    pub source_ref: String,
    /// Gherkin step type, when the definition is bound to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_kind: Option<StepKind>,
}

impl ResourceDefinition {
    pub fn new(
        keyword_name: impl Into<String>,
        arity: usize,
        framework: Framework,
        source_ref: impl Into<String>,
    ) -> Self {
        Self {
            keyword_name: keyword_name.into(),
            arity,
            framework,
            source_ref: source_ref.into(),
            step_kind: None,
        }
    }

    pub fn with_step_kind(mut self, step_kind: Option<StepKind>) -> Self {
        self.step_kind = step_kind;
        self
    }
}

/// A reusable, named action available to test scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Canonical name, unique (after normalization) within its framework
    pub name: String,
    pub framework: Framework,
    /// Expected positional-argument count. Informational only.
    pub arity: usize,
    /// Resource definition this entry came from
    pub source_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_kind: Option<StepKind>,
}
