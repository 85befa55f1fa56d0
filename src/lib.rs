//! vmselect - hierarchical VM selection for migration plans
//!
//! vmselect lets a user pick which VMs of a provider inventory a migration
//! plan includes. The inventory is shown as a tree, grouped either by
//! clusters and hosts or by VM folders, and selecting a node makes the VMs
//! it denotes available to the plan.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{CheckOutcome, FilterSession, FilterView, FormStateStore, SelectionState};
pub use config::Config;
pub use domain::entities::{InventoryNode, Plan, RawInventoryTree, Vm, VmCatalog};
pub use domain::policies::{GroupingPolicy, Preselection};
pub use domain::ports::{InventorySource, SelectionEvent, SelectionSink, SourceError};
pub use domain::services::{AvailabilityResolver, DisplayNode, DisplayTree, IndexedTree, VmSet};
pub use domain::value_objects::{CheckState, GroupingMode, NodeId, ProviderType, VmId};
pub use error::{MalformedTreeError, SelectorError, SelectorResult};
