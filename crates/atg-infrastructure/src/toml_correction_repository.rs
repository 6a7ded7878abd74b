//! TOML-based CorrectionRepository implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use atg_core::correction::{Correction, CorrectionRepository};
use atg_core::error::{AtgError, Result};
use atg_core::normalize::normalize;
use serde::{Deserialize, Serialize};

use crate::paths::AtgPaths;
use crate::storage::AtomicTomlFile;

/// On-disk layout: one `[[correction]]` table per signature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CorrectionsDocument {
    #[serde(default, rename = "correction")]
    corrections: Vec<Correction>,
}

/// Corrections persisted in a single TOML file.
///
/// Every save is a locked read-modify-write of the whole document, so
/// writers in other threads or processes never lose each other's
/// signatures. Saving an existing signature replaces it (last writer wins).
pub struct TomlCorrectionRepository {
    file: AtomicTomlFile<CorrectionsDocument>,
    write_guard: Mutex<()>,
}

impl TomlCorrectionRepository {
    /// Opens the store at the platform default location
    /// (`<config_dir>/atg/corrections.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(AtgPaths::corrections_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Stored corrections with their signatures normalized, so hand-edited
    /// entries match like recorded ones.
    fn load_all(&self) -> Result<Vec<Correction>> {
        let mut corrections = self
            .file
            .load()?
            .map(|doc| doc.corrections)
            .unwrap_or_default();
        for correction in &mut corrections {
            correction.signature = normalize(&correction.signature);
        }
        Ok(corrections)
    }
}

impl CorrectionRepository for TomlCorrectionRepository {
    fn find(&self, signature: &str) -> Result<Option<Correction>> {
        let signature = normalize(signature);
        Ok(self
            .load_all()?
            .into_iter()
            .find(|c| c.signature == signature))
    }

    fn save(&self, mut correction: Correction) -> Result<()> {
        correction.signature = normalize(&correction.signature);
        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| AtgError::storage("corrections write lock poisoned"))?;

        tracing::debug!(
            path = %self.file.path().display(),
            signature = %correction.signature,
            "Persisting correction"
        );

        self.file.update(CorrectionsDocument::default(), |doc| {
            match doc
                .corrections
                .iter_mut()
                .find(|c| normalize(&c.signature) == correction.signature)
            {
                Some(existing) => *existing = correction,
                None => doc.corrections.push(correction),
            }
            doc.corrections.sort_by(|a, b| a.signature.cmp(&b.signature));
            Ok(())
        })?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Correction>> {
        self.load_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_an_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlCorrectionRepository::with_path(temp_dir.path().join("corrections.toml"));

        assert!(repo.list().unwrap().is_empty());
        assert!(repo.find("anything").unwrap().is_none());
        assert!(repo.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_same_signature() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlCorrectionRepository::with_path(temp_dir.path().join("corrections.toml"));

        repo.save(Correction::new("Log in", "Login")).unwrap();
        repo.save(Correction::new("log in!", "Submit Credentials")).unwrap();
        repo.save(Correction::new("Log out", "Logout")).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(repo.find("log in").unwrap().unwrap().keyword, "Submit Credentials");
    }

    #[test]
    fn test_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrections.toml");
        let repo = TomlCorrectionRepository::with_path(path.clone());

        repo.save(Correction::new("Press the sign in button", "Click Login Button"))
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[[correction]]"));
        assert!(content.contains("signature = \"press the sign in button\""));
        assert!(content.contains("keyword = \"Click Login Button\""));
    }

    #[test]
    fn test_hand_edited_signatures_are_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrections.toml");
        std::fs::write(
            &path,
            r#"[[correction]]
signature = "Press the Sign-In button"
keyword = "Click Login Button"
recorded_at = "2024-05-01T10:00:00Z"
"#,
        )
        .unwrap();

        let repo = TomlCorrectionRepository::with_path(path);
        let found = repo.find("press the sign in button").unwrap().unwrap();
        assert_eq!(found.keyword, "Click Login Button");
        assert_eq!(
            repo.snapshot().unwrap().get("press the sign in button"),
            Some("Click Login Button")
        );

        repo.save(Correction::new("press the sign in button", "Submit Credentials"))
            .unwrap();
        let all = repo.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].signature, "press the sign in button");
        assert_eq!(all[0].keyword, "Submit Credentials");
    }

    #[test]
    fn test_corrupt_file_surfaces_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrections.toml");
        std::fs::write(&path, "[[correction]\nsignature = 1").unwrap();

        let repo = TomlCorrectionRepository::with_path(path);
        assert!(matches!(repo.list(), Err(AtgError::Storage(_))));
    }
}
