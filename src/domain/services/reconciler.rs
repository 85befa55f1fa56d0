//! Preselection reconciler
//!
//! Decides what happens to the selection when the grouping mode changes. A
//! fresh plan starts over with nothing selected; an edited plan that was
//! prefilled keeps denoting the same VMs in the new hierarchy.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::{Plan, VmCatalog};
use crate::domain::policies::Preselection;
use crate::domain::services::IndexedTree;
use crate::domain::value_objects::{GroupingMode, VmId};

/// Everything the reconciler reads besides the mode
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileContext<'a> {
    /// Plan being edited, if any
    pub plan: Option<&'a Plan>,
    pub is_prefilled: bool,
    /// Tree of the current mode; `None` while pending
    pub tree: Option<&'a IndexedTree>,
    /// Provider VM list; `None` while pending
    pub catalog: Option<&'a VmCatalog>,
}

/// Outcome of one reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Mode has not changed since the last decision
    Unchanged,
    /// Select nothing
    Clear,
    /// Replace the selection with nodes denoting the plan's VMs
    Replace(Preselection),
    /// Mode changed but tree or VM list is still loading
    Deferred,
}

/// Tracks the mode the selection was last reconciled for
#[derive(Debug, Clone)]
pub struct PreselectionReconciler {
    last_mode: GroupingMode,
}

impl PreselectionReconciler {
    pub fn new(initial_mode: GroupingMode) -> Self {
        Self {
            last_mode: initial_mode,
        }
    }

    /// Mode the current selection belongs to
    pub fn last_mode(&self) -> GroupingMode {
        self.last_mode
    }

    /// Reconcile against `current_mode`.
    ///
    /// The marker only advances when a decision is taken, so a deferred
    /// switch fires exactly once after both fetches complete.
    pub fn reconcile(
        &mut self,
        current_mode: GroupingMode,
        ctx: &ReconcileContext<'_>,
    ) -> ReconcileDecision {
        if current_mode == self.last_mode {
            return ReconcileDecision::Unchanged;
        }

        let plan = match ctx.plan {
            Some(plan) if ctx.is_prefilled => plan,
            _ => {
                debug!(from = %self.last_mode, to = %current_mode, "Clearing selection");
                self.last_mode = current_mode;
                return ReconcileDecision::Clear;
            }
        };

        let (Some(tree), Some(catalog)) = (ctx.tree, ctx.catalog) else {
            debug!(to = %current_mode, "Deferring preselection until data arrives");
            return ReconcileDecision::Deferred;
        };

        let target: HashSet<VmId> = plan
            .selected_vms(catalog)
            .into_iter()
            .map(|vm| vm.id.clone())
            .collect();
        let preselection = current_mode.policy().preselect(tree, &target);
        debug!(
            plan = %plan.name,
            to = %current_mode,
            roots = preselection.roots.len(),
            uncovered = preselection.uncovered.len(),
            "Preselecting plan VMs"
        );
        self.last_mode = current_mode;
        ReconcileDecision::Replace(preselection)
    }
}
