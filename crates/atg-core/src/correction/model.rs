//! Correction domain models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// A reviewed mapping: step signature → chosen keyword name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Normalized action text
    pub signature: String,
    /// Keyword name chosen by the reviewer
    pub keyword: String,
    pub recorded_at: DateTime<Utc>,
}

impl Correction {
    /// Creates a correction, normalizing the signature.
    pub fn new(signature: &str, keyword: impl Into<String>) -> Self {
        Self {
            signature: normalize(signature),
            keyword: keyword.into(),
            recorded_at: Utc::now(),
        }
    }
}

/// An immutable snapshot of the corrections store, taken once per mapping
/// pass so matching stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionSet {
    by_signature: BTreeMap<String, String>,
}

impl CorrectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the keyword for a signature.
    pub fn insert(&mut self, signature: &str, keyword: impl Into<String>) {
        self.by_signature.insert(normalize(signature), keyword.into());
    }

    /// Keyword recorded for an already normalized signature.
    pub fn get(&self, signature: &str) -> Option<&str> {
        self.by_signature.get(signature).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_signature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_signature.is_empty()
    }
}

impl FromIterator<Correction> for CorrectionSet {
    fn from_iter<T: IntoIterator<Item = Correction>>(iter: T) -> Self {
        let mut set = Self::new();
        for correction in iter {
            set.insert(&correction.signature, correction.keyword);
        }
        set
    }
}
