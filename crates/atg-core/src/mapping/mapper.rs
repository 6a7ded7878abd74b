//! Mapping service: runs sessions and feeds reviewer corrections back in.

use std::sync::Arc;

use super::session::MappingSession;
use crate::correction::{Correction, CorrectionRepository};
use crate::error::{AtgError, Result};
use crate::keyword::KeywordLibrary;
use crate::matcher::MatcherConfig;
use crate::step::ProcessStep;

/// Orchestrates mapping passes over a shared, immutable keyword library.
///
/// Several mappers (or several threads using one mapper) may share the same
/// `Arc<KeywordLibrary>`. The corrections repository is the only mutable
/// shared state and serializes its own writers.
#[derive(Clone)]
pub struct Mapper {
    library: Arc<KeywordLibrary>,
    corrections: Arc<dyn CorrectionRepository>,
    config: MatcherConfig,
}

impl Mapper {
    pub fn new(
        library: Arc<KeywordLibrary>,
        corrections: Arc<dyn CorrectionRepository>,
        config: MatcherConfig,
    ) -> Self {
        Self {
            library,
            corrections,
            config,
        }
    }

    pub fn library(&self) -> &KeywordLibrary {
        &self.library
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Maps a whole step sequence against the library and the corrections
    /// recorded so far.
    ///
    /// # Errors
    ///
    /// Only a failure to read the corrections store is an error; invalid
    /// steps become error decisions inside the session.
    pub fn run(&self, steps: Vec<ProcessStep>) -> Result<MappingSession> {
        let corrections = self.corrections.snapshot()?;
        tracing::debug!(
            steps = steps.len(),
            corrections = corrections.len(),
            "Starting mapping pass"
        );
        Ok(MappingSession::run(steps, &self.library, &corrections, self.config))
    }

    /// Records a reviewer's choice for a step signature.
    ///
    /// The signature is normalized before storing, so raw action text works
    /// too. The next `run` maps any step with the same normalized action to
    /// `keyword` with confidence 1.0.
    ///
    /// # Errors
    ///
    /// `AtgError::InvalidConfig` when the signature has no word characters
    /// or the keyword is blank; storage errors from the repository.
    pub fn record_correction(&self, step_signature: &str, keyword: &str) -> Result<()> {
        let correction = Correction::new(step_signature, keyword.trim());
        if correction.signature.is_empty() {
            return Err(AtgError::config("correction signature has no word characters"));
        }
        if correction.keyword.is_empty() {
            return Err(AtgError::config("correction keyword is empty"));
        }
        if self
            .library
            .find_by_name(&correction.keyword, self.config.framework)
            .is_none()
        {
            tracing::warn!(
                "Recording correction to '{}', which is not a known {} keyword",
                correction.keyword,
                self.config.framework
            );
        }

        tracing::info!(
            signature = %correction.signature,
            keyword = %correction.keyword,
            "Recording correction"
        );
        self.corrections.save(correction)
    }
}
