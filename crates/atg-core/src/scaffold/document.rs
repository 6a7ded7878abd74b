//! Rendered scaffold artifacts.

use serde::{Deserialize, Serialize};

use crate::framework::Framework;
use crate::matcher::MappingDecision;

/// Caller-supplied information about the test case being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldMetadata {
    pub test_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Suite/feature title; defaults to the test name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_name: Option<String>,
}

impl ScaffoldMetadata {
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_suite_name(mut self, suite_name: impl Into<String>) -> Self {
        self.suite_name = Some(suite_name.into());
        self
    }
}

/// An unmapped step left for a human to author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub order: usize,
    pub action: String,
    pub expected_result: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&MappingDecision> for Placeholder {
    fn from(decision: &MappingDecision) -> Self {
        Self {
            order: decision.step.order,
            action: decision.step.action.clone(),
            expected_result: decision.step.expected_result.clone(),
            confidence: decision.confidence,
            nearest_keyword: decision.nearest_keyword.clone(),
            error: decision.error.clone(),
        }
    }
}

/// A generated script. Immutable; re-rendering yields a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldDocument {
    framework: Framework,
    test_name: String,
    body_text: String,
    unresolved_placeholders: Vec<Placeholder>,
}

impl ScaffoldDocument {
    pub(crate) fn new(
        framework: Framework,
        test_name: String,
        body_text: String,
        unresolved_placeholders: Vec<Placeholder>,
    ) -> Self {
        Self {
            framework,
            test_name,
            body_text,
            unresolved_placeholders,
        }
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    /// Unmapped steps in step order.
    pub fn unresolved_placeholders(&self) -> &[Placeholder] {
        &self.unresolved_placeholders
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_placeholders.is_empty()
    }

    /// Conventional file name for this document.
    pub fn file_name(&self) -> String {
        self.framework.file_name_for(&self.test_name)
    }
}
