//! Correction repository trait.
//!
//! Defines the interface for correction persistence operations.

use super::model::{Correction, CorrectionSet};
use crate::error::Result;

/// An abstract repository for the project-scoped corrections store.
///
/// # Implementation Notes
///
/// Implementations must serialize concurrent writers. Last writer wins per
/// signature; writes to different signatures must not interfere. Entries are
/// never removed automatically.
pub trait CorrectionRepository: Send + Sync {
    /// Finds the correction stored for a signature. The signature is
    /// normalized before lookup.
    fn find(&self, signature: &str) -> Result<Option<Correction>>;

    /// Stores a correction, replacing any previous one for the same signature.
    fn save(&self, correction: Correction) -> Result<()>;

    /// Lists all stored corrections ordered by signature.
    fn list(&self) -> Result<Vec<Correction>>;

    /// Takes an immutable snapshot for one mapping pass.
    fn snapshot(&self) -> Result<CorrectionSet> {
        Ok(self.list()?.into_iter().collect())
    }
}
