//! Storage primitives for locally persisted engine state.

mod atomic_toml;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
