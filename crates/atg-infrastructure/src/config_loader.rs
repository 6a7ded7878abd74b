//! Loads `AtgConfig` from disk and the environment.

use std::fs;
use std::path::Path;

use atg_core::AtgConfig;
use atg_core::error::{AtgError, Result};

use crate::paths::AtgPaths;

/// Loads the effective configuration.
///
/// An explicit `path` must exist. Without one, the platform config file is
/// used when present and defaults otherwise. `ATG_*` environment variables
/// are applied last, then the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<AtgConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `lookup`.
pub fn load_config_with_env<F>(path: Option<&Path>, lookup: F) -> Result<AtgConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => {
            let default_path = AtgPaths::config_file()?;
            if default_path.exists() {
                read_config_file(&default_path)?
            } else {
                tracing::debug!(
                    "No config file at {}, using defaults",
                    default_path.display()
                );
                AtgConfig::default()
            }
        }
    };

    config.apply_env_overrides(lookup);
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AtgConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        AtgError::io(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    let config: AtgConfig = toml::from_str(&content)
        .map_err(|e| AtgError::config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atg_core::Framework;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
acceptance_threshold = 0.6
default_framework = "gherkin"
resource_dirs = ["steps", "resources"]
"#,
        )
        .unwrap();

        let config = load_config_with_env(Some(&path), no_env).unwrap();
        assert_eq!(config.acceptance_threshold, 0.6);
        assert_eq!(config.default_framework, Framework::Gherkin);
        assert_eq!(
            config.resource_dirs,
            vec![PathBuf::from("steps"), PathBuf::from("resources")]
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_framework = \"robot\"\n").unwrap();

        let config = load_config_with_env(Some(&path), |key| {
            (key == "ATG_TEST_FRAMEWORK").then(|| "junit".to_string())
        })
        .unwrap();
        assert_eq!(config.default_framework, Framework::Junit);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config_with_env(Some(&temp_dir.path().join("nope.toml")), no_env).unwrap_err();
        assert!(matches!(err, AtgError::Io { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "acceptance_threshold = 2.0\n").unwrap();
        assert!(load_config_with_env(Some(&path), no_env).unwrap_err().is_config());

        fs::write(&path, "default_framework = \"cobol\"\n").unwrap();
        assert!(load_config_with_env(Some(&path), no_env).unwrap_err().is_config());
    }
}
