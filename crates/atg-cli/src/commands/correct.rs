//! Correct Command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use atg_core::{AtgConfig, KeywordLibrary, Mapper, MatcherConfig, normalize::normalize};
use clap::Args;

use super::{build_library, open_corrections, resolve_framework, resource_roots};

#[derive(Args)]
pub struct CorrectArgs {
    /// Step action text (or its normalized signature)
    #[arg(short, long)]
    pub action: String,

    /// Keyword the step should map to
    #[arg(short, long)]
    pub keyword: String,

    /// Framework whose library the keyword is checked against
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Resource directories used to check the keyword name
    #[arg(short, long = "resources", num_args = 1..)]
    pub resources: Vec<PathBuf>,
}

pub fn execute(args: CorrectArgs, config: &AtgConfig) -> Result<()> {
    let framework = resolve_framework(args.framework.as_deref(), config)?;
    let roots = resource_roots(&args.resources, config);
    let library = if roots.is_empty() {
        tracing::info!("No resource directories configured; keyword name is not checked");
        KeywordLibrary::default()
    } else {
        build_library(&roots)?
    };

    let mapper = Mapper::new(
        Arc::new(library),
        Arc::new(open_corrections(config)?),
        MatcherConfig::from_config(config, framework),
    );
    mapper.record_correction(&args.action, &args.keyword)?;

    println!("'{}' -> {}", normalize(&args.action), args.keyword.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atg_core::correction::CorrectionRepository;
    use atg_infrastructure::TomlCorrectionRepository;
    use tempfile::TempDir;

    #[test]
    fn test_correct_persists_normalized_signature() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrections.toml");
        let config = AtgConfig {
            corrections_path: Some(path.clone()),
            ..AtgConfig::default()
        };

        execute(
            CorrectArgs {
                action: "Press the Sign-In button!".to_string(),
                keyword: "Click Login Button".to_string(),
                framework: None,
                resources: Vec::new(),
            },
            &config,
        )
        .unwrap();

        let stored = TomlCorrectionRepository::with_path(path)
            .find("press the sign in button")
            .unwrap()
            .unwrap();
        assert_eq!(stored.keyword, "Click Login Button");
    }

    #[test]
    fn test_blank_keyword_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = AtgConfig {
            corrections_path: Some(temp_dir.path().join("corrections.toml")),
            ..AtgConfig::default()
        };
        let result = execute(
            CorrectArgs {
                action: "Log out".to_string(),
                keyword: "  ".to_string(),
                framework: None,
                resources: Vec::new(),
            },
            &config,
        );
        assert!(result.is_err());
    }
}
