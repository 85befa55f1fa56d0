//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, GroupingMode, ProviderType};
use crate::error::SelectorResult;

use super::loader;

/// Grouping configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GroupingConfig {
    /// Tab opened when a session starts
    #[serde(default)]
    pub default_mode: GroupingMode,

    /// Provider type the inventory comes from
    #[serde(default)]
    pub provider: ProviderType,
}

/// Tree view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_root_label")]
    pub root_label: String,

    #[serde(default = "default_true")]
    pub expand_all: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            expand_all: true,
        }
    }
}

fn default_root_label() -> String {
    "All datacenters".to_string()
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            format: OutputFormat::default(),
            unicode: true,
        }
    }
}

/// Output format of rendered views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Parse a verbosity name; unknown names map to `Normal`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grouping: GroupingConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SelectorResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SelectorResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from the working directory config, user config, or defaults
    pub fn load_or_default(working_dir: Option<&Path>) -> (Self, Vec<ConfigWarning>) {
        loader::load_or_default(working_dir)
    }

    /// Apply environment variable overrides (VMSELECT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
