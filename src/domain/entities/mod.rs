//! Domain Entities
//!
//! Core domain entities that have identity.
//! - `InventoryNode` - An entry of the provider inventory tree
//! - `Vm` - A migration unit, compared by id
//! - `Plan` - An existing migration plan being edited

mod inventory;
mod plan;
mod vm;

pub use inventory::{InventoryNode, NodeKind, NodePayload, RawInventoryTree, RawObject, ROOT_ID};
pub use plan::{Plan, PlanVm};
pub use vm::{Vm, VmCatalog};
