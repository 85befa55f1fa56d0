//! Domain Services
//!
//! Pure selection logic over an indexed inventory tree.
//! These services have no I/O dependencies and are easily testable.

mod inventory_index;
mod projector;
mod reconciler;
mod resolver;

pub use inventory_index::IndexedTree;
pub use projector::{
    badge_text, project, DisplayNode, DisplayTree, ProjectionInputs, ROOT_DISPLAY_KEY,
};
pub use reconciler::{PreselectionReconciler, ReconcileContext, ReconcileDecision};
pub use resolver::{AvailabilityResolver, VmSet};
