//! Error types for ATG.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the ATG engine.
///
/// The first three variants form the mapping taxonomy: malformed library input,
/// an unusable process step, and an unknown target framework. The remaining
/// variants cover configuration and persistence around the engine.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtgError {
    /// A resource definition could not be turned into a keyword entry.
    /// Fatal to library construction.
    #[error("Malformed resource '{source_ref}': {reason}")]
    MalformedResource { source_ref: String, reason: String },

    /// A process step cannot be matched (e.g. empty action text).
    /// Fatal to that step only.
    #[error("Invalid step #{order}: {reason}")]
    InvalidStep { order: usize, reason: String },

    /// The requested framework tag is not one of the supported syntaxes.
    #[error("Unsupported framework: '{0}'")]
    UnsupportedFramework(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Corrections store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Template rendering error
    #[error("Render error: {0}")]
    Render(String),
}

impl AtgError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MalformedResource error
    pub fn malformed(source_ref: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResource {
            source_ref: source_ref.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidStep error
    pub fn invalid_step(order: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStep {
            order,
            reason: reason.into(),
        }
    }

    /// Creates an InvalidConfig error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_malformed_resource(&self) -> bool {
        matches!(self, Self::MalformedResource { .. })
    }

    pub fn is_invalid_step(&self) -> bool {
        matches!(self, Self::InvalidStep { .. })
    }

    pub fn is_unsupported_framework(&self) -> bool {
        matches!(self, Self::UnsupportedFramework(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AtgError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AtgError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AtgError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for AtgError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for AtgError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// A type alias for `Result<T, AtgError>`.
pub type Result<T> = std::result::Result<T, AtgError>;
