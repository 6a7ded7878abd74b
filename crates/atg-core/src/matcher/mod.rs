//! Step matching: decides whether an existing keyword covers a process step.
//!
//! # Module Structure
//!
//! - `decision`: `MappingDecision` and its status/rule enums
//! - `step_matcher`: the deterministic scoring policy

mod decision;
mod step_matcher;

// Re-export public API
pub use decision::{MappingDecision, MappingStatus, MatchRule};
pub use step_matcher::{CORRECTION_SOURCE_REF, MatcherConfig, StepMatcher};
