//! Configuration module for vmselect
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (VMSELECT_*)
//! 3. Working directory config (./vmselect.toml)
//! 4. User config (<config dir>/vmselect/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

// Re-export ConfigWarning from domain layer
pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{apply_overrides, candidate_paths, parse_with_warnings, PROJECT_CONFIG_FILE};
pub use types::{Config, GroupingConfig, OutputConfig, OutputFormat, Verbosity, ViewConfig};
