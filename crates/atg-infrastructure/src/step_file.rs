//! JSON step files: the input side of a mapping run.
//!
//! Two shapes are accepted:
//!
//! ```json
//! [{"action": "Open the login page", "expected_result": "Form shown"}]
//! ```
//!
//! ```json
//! {"name": "Valid Login", "description": "...", "steps": [ ... ]}
//! ```
//!
//! Steps are numbered from 1 in file order.

use std::fs;
use std::path::Path;

use atg_core::ProcessStep;
use atg_core::error::{AtgError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StepInput {
    #[serde(default)]
    action: String,
    #[serde(default, alias = "expected")]
    expected_result: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepFileDto {
    Bare(Vec<StepInput>),
    Case {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
        steps: Vec<StepInput>,
    },
}

/// A test case read from a step file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub steps: Vec<ProcessStep>,
}

impl TestCaseInput {
    pub fn parse(json: &str) -> Result<Self> {
        let dto: StepFileDto = serde_json::from_str(json)?;
        let (name, description, inputs) = match dto {
            StepFileDto::Bare(steps) => (None, None, steps),
            StepFileDto::Case {
                name,
                description,
                steps,
            } => (name, description, steps),
        };

        Ok(Self {
            name,
            description,
            steps: ProcessStep::sequence(
                inputs
                    .into_iter()
                    .map(|input| (input.action, input.expected_result)),
            ),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AtgError::io(format!("Failed to read step file {}: {}", path.display(), e))
        })?;
        let case = Self::parse(&content)?;
        tracing::debug!(
            steps = case.steps.len(),
            "Loaded step file {}",
            path.display()
        );
        Ok(case)
    }
}
