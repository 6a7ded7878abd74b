//! Mapping sessions: matching a whole test case's step sequence.
//!
//! # Module Structure
//!
//! - `session`: the `MappingSession` aggregate and its coverage summary
//! - `mapper`: the `Mapper` service tying library, matcher and corrections store

mod mapper;
mod session;

// Re-export public API
pub use mapper::Mapper;
pub use session::{CoverageSummary, MappingSession};
