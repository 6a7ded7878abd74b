//! Core domain of the keyword mapping and scaffolding engine.
//!
//! A [`KeywordLibrary`] indexes reusable test actions scanned from resource
//! files. A [`Mapper`] matches ordered [`ProcessStep`]s against it, consulting
//! the corrections recorded by reviewers, and produces a [`MappingSession`].
//! The [`ScaffoldRenderer`] turns a session into a test script for one of the
//! supported [`Framework`]s, leaving a placeholder stub for every step that
//! did not map.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use atg_core::{
//!     Framework, InMemoryCorrectionRepository, KeywordLibrary, Mapper, MatcherConfig,
//!     ProcessStep, ResourceDefinition, ScaffoldMetadata, ScaffoldRenderer,
//! };
//!
//! let library = KeywordLibrary::build(vec![ResourceDefinition::new(
//!     "Click Login Button",
//!     0,
//!     Framework::Robot,
//!     "common.robot",
//! )])
//! .unwrap();
//! let mapper = Mapper::new(
//!     Arc::new(library),
//!     Arc::new(InMemoryCorrectionRepository::new()),
//!     MatcherConfig::new(Framework::Robot),
//! );
//!
//! let session = mapper
//!     .run(ProcessStep::sequence(vec![("Click Login Button", "Dashboard is displayed")]))
//!     .unwrap();
//! assert_eq!(session.coverage_ratio(), Some(1.0));
//!
//! let renderer = ScaffoldRenderer::new().unwrap();
//! let doc = renderer
//!     .render(&session, "robot", &ScaffoldMetadata::new("Valid Login"))
//!     .unwrap();
//! assert!(doc.body_text().contains("    Click Login Button\n"));
//! ```

pub mod config;
pub mod correction;
pub mod error;
pub mod framework;
pub mod keyword;
pub mod mapping;
pub mod matcher;
pub mod normalize;
pub mod scaffold;
pub mod step;

pub use config::AtgConfig;
pub use correction::{Correction, CorrectionRepository, CorrectionSet, InMemoryCorrectionRepository};
pub use error::{AtgError, Result};
pub use framework::Framework;
pub use keyword::{KeywordEntry, KeywordLibrary, ResourceDefinition, StepKind};
pub use mapping::{CoverageSummary, Mapper, MappingSession};
pub use matcher::{MappingDecision, MappingStatus, MatchRule, MatcherConfig, StepMatcher};
pub use scaffold::{Placeholder, ScaffoldDocument, ScaffoldMetadata, ScaffoldRenderer};
pub use step::ProcessStep;
