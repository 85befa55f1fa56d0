//! Form-state store
//!
//! The wizard keeps the selected tree nodes, the active grouping mode and the
//! `is_prefilled` flag in its form state. This store holds them and applies
//! selection events pushed by [`SelectionState`](super::SelectionState).

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::ports::{SelectionEvent, SelectionSink};
use crate::domain::value_objects::{GroupingMode, NodeId};

/// Snapshot of the filter step's form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected_tree_nodes: Vec<NodeId>,
    pub grouping_mode: GroupingMode,
    /// Whether the form was filled from an existing plan
    pub is_prefilled: bool,
    /// Number of selection events applied
    pub revision: u64,
}

/// Thread-safe holder of [`FormState`]
#[derive(Debug, Default)]
pub struct FormStateStore {
    state: Mutex<FormState>,
}

impl FormStateStore {
    pub fn new(grouping_mode: GroupingMode, is_prefilled: bool) -> Self {
        Self {
            state: Mutex::new(FormState {
                grouping_mode,
                is_prefilled,
                ..FormState::default()
            }),
        }
    }

    /// Seed the selected nodes, as when restoring a saved wizard
    pub fn with_selected(self, nodes: Vec<NodeId>) -> Self {
        self.lock().selected_tree_nodes = nodes;
        self
    }

    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    pub fn selected_tree_nodes(&self) -> Vec<NodeId> {
        self.lock().selected_tree_nodes.clone()
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        self.lock().grouping_mode
    }

    pub fn set_grouping_mode(&self, mode: GroupingMode) {
        self.lock().grouping_mode = mode;
    }

    pub fn is_prefilled(&self) -> bool {
        self.lock().is_prefilled
    }

    pub fn set_prefilled(&self, is_prefilled: bool) {
        self.lock().is_prefilled = is_prefilled;
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SelectionSink for FormStateStore {
    fn on_event(&self, event: SelectionEvent) {
        match event {
            SelectionEvent::Changed { mode, selected } => {
                let mut state = self.lock();
                if state.grouping_mode != mode {
                    debug!(event_mode = %mode, form_mode = %state.grouping_mode, "Ignoring selection for inactive grouping");
                    return;
                }
                state.selected_tree_nodes = selected;
                state.revision += 1;
            }
        }
    }
}
