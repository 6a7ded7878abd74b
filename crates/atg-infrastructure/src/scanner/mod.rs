//! Resource-file scanning: turns keyword sources on disk into
//! `ResourceDefinition`s for the keyword library.
//!
//! # Module Structure
//!
//! - `robot`: `.robot` / `.resource` keyword tables
//! - `python`: pytest helpers and BDD step definitions (`.py`)
//! - `java`: `public static` keyword methods (`.java`)
//! - `manifest`: hand-written `*.keywords.toml` manifests

mod java;
mod manifest;
mod python;
mod robot;

use std::fs;
use std::path::{Path, PathBuf};

use atg_core::error::{AtgError, Result};
use atg_core::{KeywordLibrary, ResourceDefinition};
use regex::Regex;

pub use java::JavaParser;
pub use python::PythonParser;
pub use robot::RobotParser;

pub(crate) fn pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| AtgError::config(format!("invalid scanner pattern: {}", e)))
}

const MANIFEST_SUFFIX: &str = ".keywords.toml";
const SKIPPED_DIRS: &[&str] = &["__pycache__", "node_modules"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Robot,
    Python,
    Java,
    Manifest,
}

fn source_kind(path: &Path) -> Option<SourceKind> {
    let file_name = path.file_name()?.to_str()?;
    if file_name.ends_with(MANIFEST_SUFFIX) {
        return Some(SourceKind::Manifest);
    }
    match path.extension()?.to_str()? {
        "robot" | "resource" => Some(SourceKind::Robot),
        "py" => Some(SourceKind::Python),
        "java" => Some(SourceKind::Java),
        _ => None,
    }
}

/// Forward-slash path without a leading `./`.
fn source_ref(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    text.strip_prefix("./").unwrap_or(&text).to_string()
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Walks resource directories and extracts keyword definitions.
pub struct ResourceScanner {
    robot: RobotParser,
    python: PythonParser,
    java: JavaParser,
}

impl ResourceScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            robot: RobotParser::new()?,
            python: PythonParser::new()?,
            java: JavaParser::new()?,
        })
    }

    /// Scans every root in order. Within a root, files are visited in
    /// sorted path order, so the result is deterministic.
    pub fn scan_all<P: AsRef<Path>>(&self, roots: &[P]) -> Result<Vec<ResourceDefinition>> {
        let mut definitions = Vec::new();
        for root in roots {
            definitions.extend(self.scan(root.as_ref())?);
        }
        tracing::info!(
            roots = roots.len(),
            definitions = definitions.len(),
            "Scanned keyword resources"
        );
        Ok(definitions)
    }

    /// Scans a directory tree, or a single file.
    pub fn scan(&self, root: &Path) -> Result<Vec<ResourceDefinition>> {
        if !root.exists() {
            return Err(AtgError::io(format!(
                "Resource path does not exist: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();
        if root.is_dir() {
            collect_files(root, &mut files)?;
        } else {
            files.push(root.to_path_buf());
        }
        files.sort();

        let mut definitions = Vec::new();
        for file in files {
            definitions.extend(self.scan_file(&file)?);
        }
        Ok(definitions)
    }

    /// Parses one file. Unknown file types yield nothing; unreadable files
    /// are skipped with a warning.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<ResourceDefinition>> {
        let Some(kind) = source_kind(path) else {
            return Ok(Vec::new());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping unreadable resource {}: {}", path.display(), e);
                return Ok(Vec::new());
            }
        };

        let source = source_ref(path);
        let definitions = match kind {
            SourceKind::Robot => self.robot.parse(&content, &source),
            SourceKind::Python => self.python.parse(&content, &source),
            SourceKind::Java => self.java.parse(&content, &source),
            SourceKind::Manifest => manifest::parse(&content, &source)?,
        };
        tracing::debug!(
            source = %source,
            keywords = definitions.len(),
            "Parsed resource file"
        );
        Ok(definitions)
    }

    /// Scans `roots` and builds the keyword library in one step.
    pub fn build_library<P: AsRef<Path>>(&self, roots: &[P]) -> Result<KeywordLibrary> {
        KeywordLibrary::build(self.scan_all(roots)?)
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AtgError::io(format!("Failed to read {}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if path.is_dir() {
            if !is_skipped_dir(&path) {
                collect_files(&path, files)?;
            }
        } else if source_kind(&path).is_some() {
            files.push(path);
        }
    }
    Ok(())
}
