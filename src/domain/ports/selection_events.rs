//! Selection Event Port
//!
//! Selection changes are pushed to the form-state collaborator as explicit
//! messages instead of through a shared mutable reference.

use crate::domain::value_objects::{GroupingMode, NodeId};

/// Event emitted whenever the selection is mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Full selected-node list after the mutation, in display order
    Changed {
        mode: GroupingMode,
        selected: Vec<NodeId>,
    },
}

/// Trait for receiving selection events
///
/// Implementations can be:
/// - FormStateStore: Keeps the wizard's selected nodes
/// - NoopSelectionSink: Discards everything
pub trait SelectionSink: Send + Sync {
    /// Handle a selection event
    fn on_event(&self, event: SelectionEvent);
}

/// No-op sink for standalone use
pub struct NoopSelectionSink;

impl SelectionSink for NoopSelectionSink {
    fn on_event(&self, _event: SelectionEvent) {
        // Do nothing
    }
}
