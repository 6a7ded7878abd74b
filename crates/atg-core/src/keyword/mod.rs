//! Keyword domain module.
//!
//! This module contains the catalog of reusable test actions ("keywords")
//! scanned from framework resource files.
//!
//! # Module Structure
//!
//! - `model`: `KeywordEntry`, the `ResourceDefinition` input tuple and
//!   the Gherkin `StepKind`
//! - `library`: the immutable, queryable `KeywordLibrary`

mod library;
mod model;

// Re-export public API
pub use library::KeywordLibrary;
pub use model::{KeywordEntry, ResourceDefinition, StepKind};
