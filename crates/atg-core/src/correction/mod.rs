//! Human corrections: the feedback loop of the mapping engine.
//!
//! A correction pins a step signature (normalized action text) to a keyword
//! name. Corrections are the only persisted state of the engine and live
//! behind the narrow `CorrectionRepository` interface so the backend can be
//! swapped without touching matcher or session logic.
//!
//! # Module Structure
//!
//! - `model`: `Correction` records and the immutable `CorrectionSet` snapshot
//! - `repository`: repository trait
//! - `memory`: in-memory repository implementation

mod memory;
mod model;
mod repository;

// Re-export public API
pub use memory::InMemoryCorrectionRepository;
pub use model::{Correction, CorrectionSet};
pub use repository::CorrectionRepository;
