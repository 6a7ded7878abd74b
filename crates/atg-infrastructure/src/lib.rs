//! Filesystem side of the keyword mapping engine: resource scanning,
//! the TOML corrections store, configuration loading and step files.

pub mod config_loader;
pub mod paths;
pub mod scanner;
pub mod step_file;
pub mod storage;
pub mod toml_correction_repository;

pub use crate::config_loader::load_config;
pub use crate::paths::AtgPaths;
pub use crate::scanner::ResourceScanner;
pub use crate::step_file::TestCaseInput;
pub use crate::toml_correction_repository::TomlCorrectionRepository;
