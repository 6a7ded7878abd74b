//! Keyword manifests (`*.keywords.toml`) for libraries that cannot be
//! scanned, such as compiled or remote keyword libraries.
//!
//! ```toml
//! [[keyword]]
//! name = "Click Login Button"
//! arity = 0
//! framework = "robot"
//! source = "resources/common.robot"   # defaults to the manifest itself
//! step = "when"                       # Gherkin step type, optional
//! ```

use atg_core::error::{AtgError, Result};
use atg_core::{Framework, ResourceDefinition, StepKind};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    #[serde(default)]
    arity: usize,
    framework: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    step: Option<StepKind>,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    keyword: Vec<ManifestEntry>,
}

pub fn parse(content: &str, source_ref: &str) -> Result<Vec<ResourceDefinition>> {
    let manifest: Manifest =
        toml::from_str(content).map_err(|e| AtgError::malformed(source_ref, e.to_string()))?;

    manifest
        .keyword
        .into_iter()
        .map(|entry| {
            let framework = Framework::parse_tag(&entry.framework)
                .map_err(|e| AtgError::malformed(source_ref, e.to_string()))?;
            Ok(ResourceDefinition::new(
                entry.name,
                entry.arity,
                framework,
                entry.source.unwrap_or_else(|| source_ref.to_string()),
            )
            .with_step_kind(entry.step))
        })
        .collect()
}
