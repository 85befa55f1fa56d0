//! Domain Layer
//!
//! This is the core of vmselect - pure selection logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (InventoryNode, Vm, Plan)
//! - `value_objects/` - Immutable value types (NodeId, GroupingMode, CheckState)
//! - `services/` - Domain services (IndexedTree, Resolver, Projector, Reconciler)
//! - `policies/` - Business rules (GroupingPolicy)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
