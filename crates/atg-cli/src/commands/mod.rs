//! CLI Commands

pub mod correct;
pub mod corrections;
pub mod keywords;
pub mod map;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use atg_core::{AtgConfig, Framework, KeywordLibrary};
use atg_infrastructure::{AtgPaths, ResourceScanner, TomlCorrectionRepository};

/// Framework from `--framework`, falling back to the configured default.
pub(crate) fn resolve_framework(tag: Option<&str>, config: &AtgConfig) -> Result<Framework> {
    match tag {
        Some(tag) => Ok(Framework::parse_tag(tag)?),
        None => Ok(config.default_framework),
    }
}

/// `--resources` when given, otherwise the configured resource directories.
pub(crate) fn resource_roots(cli_roots: &[PathBuf], config: &AtgConfig) -> Vec<PathBuf> {
    if cli_roots.is_empty() {
        config.resource_dirs.clone()
    } else {
        cli_roots.to_vec()
    }
}

pub(crate) fn build_library(roots: &[PathBuf]) -> Result<KeywordLibrary> {
    if roots.is_empty() {
        bail!("No resource directories given; pass --resources or set resource_dirs in the config");
    }
    let scanner = ResourceScanner::new()?;
    let library = scanner
        .build_library(roots)
        .context("Failed to build keyword library")?;
    tracing::info!(keywords = library.len(), "Keyword library ready");
    Ok(library)
}

pub(crate) fn open_corrections(config: &AtgConfig) -> Result<TomlCorrectionRepository> {
    let path = AtgPaths::corrections_file_for(config)?;
    tracing::debug!("Using corrections store {}", path.display());
    Ok(TomlCorrectionRepository::with_path(path))
}
