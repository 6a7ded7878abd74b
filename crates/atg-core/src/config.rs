//! Engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AtgError, Result};
use crate::framework::Framework;

/// Default minimum Jaccard score for accepting a fuzzy match.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_ACCEPTANCE_THRESHOLD
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("tests/generated")
}

/// Project configuration, usually loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AtgConfig {
    #[serde(default = "default_threshold")]
    pub acceptance_threshold: f64,
    #[serde(default)]
    pub default_framework: Framework,
    /// Location of the corrections store; platform default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrections_path: Option<PathBuf>,
    #[serde(default)]
    pub resource_dirs: Vec<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for AtgConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            default_framework: Framework::default(),
            corrections_path: None,
            resource_dirs: Vec::new(),
            output_dir: default_output_dir(),
        }
    }
}

impl AtgConfig {
    /// Applies `ATG_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are ignored with a warning so a typo in the
    /// environment never hides the file configuration.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("ATG_ACCEPTANCE_THRESHOLD") {
            match raw.trim().parse::<f64>() {
                Ok(value) => self.acceptance_threshold = value,
                Err(_) => tracing::warn!("Ignoring ATG_ACCEPTANCE_THRESHOLD='{}': not a number", raw),
            }
        }

        if let Some(raw) = lookup("ATG_TEST_FRAMEWORK") {
            match Framework::parse_tag(&raw) {
                Ok(framework) => self.default_framework = framework,
                Err(e) => tracing::warn!("Ignoring ATG_TEST_FRAMEWORK: {}", e),
            }
        }

        if let Some(raw) = lookup("ATG_CORRECTIONS_PATH") {
            if !raw.trim().is_empty() {
                self.corrections_path = Some(PathBuf::from(raw));
            }
        }

        if let Some(raw) = lookup("ATG_OUTPUT_DIR") {
            if !raw.trim().is_empty() {
                self.output_dir = PathBuf::from(raw);
            }
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_process_env(&mut self) {
        self.apply_env_overrides(|key| std::env::var(key).ok());
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err(AtgError::config(format!(
                "acceptance_threshold must be within [0, 1], got {}",
                self.acceptance_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AtgConfig::default();
        assert_eq!(config.acceptance_threshold, 0.5);
        assert_eq!(config.default_framework, Framework::Robot);
        assert_eq!(config.output_dir, PathBuf::from("tests/generated"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AtgConfig = toml::from_str(
            r#"
            default_framework = "junit"
            resource_dirs = ["keywords"]
            "#,
        )
        .unwrap();
        assert_eq!(config.default_framework, Framework::Junit);
        assert_eq!(config.acceptance_threshold, 0.5);
        assert_eq!(config.resource_dirs, vec![PathBuf::from("keywords")]);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ATG_ACCEPTANCE_THRESHOLD", "0.75"),
            ("ATG_TEST_FRAMEWORK", "pytest"),
            ("ATG_CORRECTIONS_PATH", "/tmp/corrections.toml"),
        ]);
        let mut config = AtgConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.acceptance_threshold, 0.75);
        assert_eq!(config.default_framework, Framework::Pytest);
        assert_eq!(config.corrections_path, Some(PathBuf::from("/tmp/corrections.toml")));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = AtgConfig::default();
        config.apply_env_overrides(|key| match key {
            "ATG_ACCEPTANCE_THRESHOLD" => Some("high".to_string()),
            "ATG_TEST_FRAMEWORK" => Some("cobol".to_string()),
            _ => None,
        });
        assert_eq!(config, AtgConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_threshold() {
        let config = AtgConfig {
            acceptance_threshold: 1.5,
            ..AtgConfig::default()
        };
        assert!(config.validate().unwrap_err().is_config());
    }
}
