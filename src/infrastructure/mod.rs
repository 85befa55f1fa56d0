//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `inventory_file` - InventorySource over a directory of JSON/YAML exports

pub mod inventory_file;

// Re-export for convenience
pub use inventory_file::{load_plan, parse_document, read_document, FileInventorySource};
