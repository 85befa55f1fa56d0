//! InventorySource port - abstraction for fetching provider data
//!
//! The raw inventory tree of each grouping mode and the VM list arrive
//! asynchronously from the provider; this trait lets the application layer
//! load them without knowing where they come from.

use std::path::PathBuf;

use crate::domain::entities::{RawInventoryTree, Vm};
use crate::domain::value_objects::GroupingMode;

/// Errors raised while fetching provider data
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("no {what} found in {}", dir.display())]
    NotFound { what: String, dir: PathBuf },

    #[error("failed to read {}: {message}", path.display())]
    Unreadable { path: PathBuf, message: String },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("provider does not offer grouping '{0}'")]
    UnsupportedMode(GroupingMode),
}

/// Abstract source of inventory data
pub trait InventorySource: Send + Sync {
    /// Fetch the raw inventory tree for one grouping mode
    fn fetch_tree(&self, mode: GroupingMode) -> Result<RawInventoryTree, SourceError>;

    /// Fetch the provider's VM list
    fn fetch_vms(&self) -> Result<Vec<Vm>, SourceError>;
}

/// State of asynchronously delivered data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Loadable<T> {
    #[default]
    Pending,
    Ready(T),
    /// Fetch or validation failed; carries the message shown to the user
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Loadable::Pending)
    }

    /// The loaded value, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}
