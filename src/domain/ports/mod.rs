//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod inventory_source;
pub mod selection_events;

pub use inventory_source::{InventorySource, Loadable, SourceError};
pub use selection_events::{NoopSelectionSink, SelectionEvent, SelectionSink};
