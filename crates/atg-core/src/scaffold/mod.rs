//! Scaffold rendering: turning a mapping session into a test script.
//!
//! # Module Structure
//!
//! - `document`: `ScaffoldDocument`, `Placeholder` and `ScaffoldMetadata`
//! - `renderer`: the single `render` entry point over all frameworks
//! - `syntax`: per-framework statements, placeholders and escaping
//! - `templates`: document skeletons (minijinja)

mod document;
mod renderer;
pub mod syntax;
mod templates;

// Re-export public API
pub use document::{Placeholder, ScaffoldDocument, ScaffoldMetadata};
pub use renderer::ScaffoldRenderer;
pub use syntax::PLACEHOLDER_MARKER;
