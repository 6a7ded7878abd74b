//! In-memory correction repository.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::model::Correction;
use super::repository::CorrectionRepository;
use crate::error::{AtgError, Result};
use crate::normalize::normalize;

/// A `CorrectionRepository` backed by a lock-guarded map. Used for tests and
/// for callers that persist corrections elsewhere.
#[derive(Debug, Default)]
pub struct InMemoryCorrectionRepository {
    corrections: RwLock<BTreeMap<String, Correction>>,
}

impl InMemoryCorrectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AtgError {
    AtgError::storage("corrections lock poisoned")
}

impl CorrectionRepository for InMemoryCorrectionRepository {
    fn find(&self, signature: &str) -> Result<Option<Correction>> {
        let corrections = self.corrections.read().map_err(poisoned)?;
        Ok(corrections.get(&normalize(signature)).cloned())
    }

    fn save(&self, mut correction: Correction) -> Result<()> {
        correction.signature = normalize(&correction.signature);
        let mut corrections = self.corrections.write().map_err(poisoned)?;
        corrections.insert(correction.signature.clone(), correction);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Correction>> {
        let corrections = self.corrections.read().map_err(poisoned)?;
        Ok(corrections.values().cloned().collect())
    }
}
