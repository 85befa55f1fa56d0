//! Filter Session
//!
//! Orchestrates the "filter VMs" step of the plan wizard:
//! 1. Hand out fetch tickets for the tree of the active mode and the VM list
//! 2. Accept deliveries, discarding stale ones
//! 3. Rebuild the selection when the tree snapshot or mode changes
//! 4. Route checkbox clicks and search text
//! 5. Produce the view model the widget renders
//!
//! Every method takes `&mut self`, so one call is one atomic state change.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::{FormStateStore, SelectionState, ToggleOutcome};
use crate::domain::entities::{InventoryNode, Plan, RawInventoryTree, Vm, VmCatalog};
use crate::domain::policies::Preselection;
use crate::domain::ports::{InventorySource, Loadable, SelectionSink, SourceError};
use crate::domain::services::{
    badge_text, project, AvailabilityResolver, DisplayTree, IndexedTree, PreselectionReconciler,
    ProjectionInputs, ReconcileContext, ReconcileDecision, VmSet, ROOT_DISPLAY_KEY,
};
use crate::domain::value_objects::{GroupingMode, NodeId, ProviderType, VmId};

/// Title shown when the VM list failed to load
pub const VMS_ERROR_TITLE: &str = "Error loading VMs";
/// Title shown when the inventory tree failed to load or validate
pub const TREE_ERROR_TITLE: &str = "Error loading inventory tree data";
/// Body shown while data is loading
pub const LONG_LOADING_MESSAGE: &str =
    "This might take a few minutes for providers with large inventories.";

/// Token identifying one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub mode: GroupingMode,
    pub generation: u64,
}

/// Result of a checkbox event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The root was clicked; carries the new all-selected state
    SelectAll(bool),
    Toggled(ToggleOutcome),
    /// The key matched no node of the current tree; no-op
    LookupMiss,
}

/// Presentation options of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub root_label: String,
    pub expand_all: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            root_label: "All datacenters".to_string(),
            expand_all: true,
        }
    }
}

/// Loading state of the step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewStatus {
    Loading { message: String },
    Error { title: String, message: String },
    Ready,
}

/// Everything the widget renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterView {
    pub intro: String,
    /// Grouping tabs offered by the provider
    pub modes: Vec<GroupingMode>,
    pub mode: GroupingMode,
    pub status: ViewStatus,
    pub tree: DisplayTree,
}

/// State of the "filter VMs" step
pub struct FilterSession {
    provider: ProviderType,
    options: ViewOptions,
    form: Arc<FormStateStore>,
    plan: Option<Plan>,
    mode: GroupingMode,
    tree: Loadable<Arc<IndexedTree>>,
    vms: Loadable<Arc<VmCatalog>>,
    selection: SelectionState,
    reconciler: PreselectionReconciler,
    query: String,
    generation: u64,
    tree_ticket: Option<FetchTicket>,
    vms_ticket: Option<FetchTicket>,
    last_preselection: Option<Preselection>,
}

impl FilterSession {
    /// Start a session over the wizard's form state.
    ///
    /// A form mode the provider does not offer falls back to the default.
    pub fn new(
        provider: ProviderType,
        form: Arc<FormStateStore>,
        plan: Option<Plan>,
        options: ViewOptions,
    ) -> Self {
        let mut mode = form.grouping_mode();
        if !provider.supports(mode) {
            warn!(%mode, provider = provider.display_name(), "Grouping not offered; using default");
            mode = GroupingMode::default();
            form.set_grouping_mode(mode);
        }
        let selection = SelectionState::new(
            Arc::new(IndexedTree::empty()),
            mode,
            Vec::new(),
            Self::sink(&form),
        );
        Self {
            provider,
            options,
            form,
            plan,
            mode,
            tree: Loadable::Pending,
            vms: Loadable::Pending,
            selection,
            reconciler: PreselectionReconciler::new(mode),
            query: String::new(),
            generation: 0,
            tree_ticket: None,
            vms_ticket: None,
            last_preselection: None,
        }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn provider(&self) -> ProviderType {
        self.provider
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn form(&self) -> &Arc<FormStateStore> {
        &self.form
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Tree of the active mode, once loaded
    pub fn tree(&self) -> Option<&IndexedTree> {
        self.tree.ready().map(Arc::as_ref)
    }

    /// Provider VM list, once loaded
    pub fn catalog(&self) -> Option<&VmCatalog> {
        self.vms.ready().map(Arc::as_ref)
    }

    /// The last preselection applied for a prefilled plan
    pub fn last_preselection(&self) -> Option<&Preselection> {
        self.last_preselection.as_ref()
    }

    /// Start fetching the tree of the active mode
    pub fn request_tree(&mut self) -> FetchTicket {
        let ticket = self.next_ticket();
        self.tree_ticket = Some(ticket);
        ticket
    }

    /// Start fetching the VM list
    pub fn request_vms(&mut self) -> FetchTicket {
        let ticket = self.next_ticket();
        self.vms_ticket = Some(ticket);
        ticket
    }

    /// Apply a tree fetch result. Returns false when the ticket is stale.
    pub fn deliver_tree(
        &mut self,
        ticket: FetchTicket,
        result: Result<RawInventoryTree, SourceError>,
    ) -> bool {
        if self.tree_ticket != Some(ticket) || ticket.mode != self.mode {
            debug!(?ticket, "Discarding stale tree result");
            return false;
        }
        self.tree_ticket = None;

        self.tree = match result {
            Ok(raw) => match IndexedTree::build(raw) {
                Ok(tree) => {
                    info!(mode = %self.mode, nodes = tree.len(), "Inventory tree loaded");
                    Loadable::Ready(Arc::new(tree))
                }
                Err(err) => {
                    warn!(error = %err, "Inventory tree rejected");
                    Loadable::Failed(err.to_string())
                }
            },
            Err(err) => {
                warn!(error = %err, "Inventory tree fetch failed");
                Loadable::Failed(err.to_string())
            }
        };

        // The form still holds the previous mode's nodes while a prefilled
        // switch is deferred.
        let seed = if self.reconciler.last_mode() == self.mode {
            self.form.selected_tree_nodes()
        } else {
            Vec::new()
        };
        self.rebuild_selection(seed);
        self.reconcile();
        true
    }

    /// Apply a VM list fetch result. Returns false when the ticket is stale.
    pub fn deliver_vms(&mut self, ticket: FetchTicket, result: Result<Vec<Vm>, SourceError>) -> bool {
        if self.vms_ticket != Some(ticket) {
            debug!(?ticket, "Discarding stale VM list result");
            return false;
        }
        self.vms_ticket = None;

        self.vms = match result {
            Ok(vms) => {
                let catalog = VmCatalog::new(vms);
                info!(vms = catalog.len(), "VM list loaded");
                Loadable::Ready(Arc::new(catalog))
            }
            Err(err) => {
                warn!(error = %err, "VM list fetch failed");
                Loadable::Failed(err.to_string())
            }
        };

        self.reconcile();
        true
    }

    /// Fetch and deliver everything synchronously from `source`
    pub fn load_from(&mut self, source: &dyn InventorySource) {
        let vms = self.request_vms();
        self.deliver_vms(vms, source.fetch_vms());
        let tree = self.request_tree();
        self.deliver_tree(tree, source.fetch_tree(self.mode));
    }

    /// Switch the grouping tab.
    ///
    /// Returns the ticket for fetching the new mode's tree, or `None` when
    /// the mode is already active or not offered by the provider.
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) -> Option<FetchTicket> {
        if mode == self.mode {
            return None;
        }
        if !self.provider.supports(mode) {
            warn!(%mode, provider = self.provider.display_name(), "Grouping not offered");
            return None;
        }

        info!(from = %self.mode, to = %mode, "Switching grouping");
        self.mode = mode;
        self.form.set_grouping_mode(mode);
        self.tree = Loadable::Pending;
        self.tree_ticket = None;
        self.rebuild_selection(Vec::new());
        self.reconcile();
        Some(self.request_tree())
    }

    /// Handle a checkbox event for the node with display key `key`
    pub fn on_check(&mut self, key: &str) -> CheckOutcome {
        if key == ROOT_DISPLAY_KEY {
            let select = !self.selection.are_all_selected();
            self.selection.select_all(select);
            return CheckOutcome::SelectAll(select);
        }

        let Some(id) = self
            .tree
            .ready()
            .and_then(|tree| tree.lookup_by_display_key(key))
            .map(|node| node.id.clone())
        else {
            return CheckOutcome::LookupMiss;
        };
        CheckOutcome::Toggled(self.selection.toggle_subtree(&id))
    }

    /// Update the search text
    pub fn on_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select the nodes denoting the plan's VMs in the active mode.
    ///
    /// Used when opening an existing plan for editing. Returns `None` until
    /// both the tree and the VM list are loaded, or when no plan is edited.
    pub fn prefill_from_plan(&mut self) -> Option<&Preselection> {
        let plan = self.plan.as_ref()?;
        let tree = self.tree.ready()?;
        let catalog = self.vms.ready()?;
        let target: HashSet<VmId> = plan
            .selected_vms(catalog)
            .into_iter()
            .map(|vm| vm.id.clone())
            .collect();
        let preselection = self.mode.policy().preselect(tree, &target);
        self.form.set_prefilled(true);
        self.apply_preselection(preselection);
        self.last_preselection.as_ref()
    }

    /// VMs the current selection makes available for the plan
    pub fn selected_vms(&self) -> VmSet {
        match self.tree.ready() {
            Some(tree) => AvailabilityResolver::new(tree, self.mode)
                .with_catalog(self.catalog())
                .resolve(&self.selection.selected_ids()),
            None => VmSet::default(),
        }
    }

    /// Current view model
    pub fn view(&self) -> FilterView {
        FilterView {
            intro: self.provider.intro_text(),
            modes: self.provider.grouping_modes().to_vec(),
            mode: self.mode,
            status: self.status(),
            tree: self.display_tree(),
        }
    }

    /// Display tree under the current search text
    pub fn display_tree(&self) -> DisplayTree {
        let Some(tree) = self.tree.ready() else {
            return DisplayTree::default();
        };
        let tree: &IndexedTree = tree;
        let resolver = AvailabilityResolver::new(tree, self.mode).with_catalog(self.catalog());
        let selection = &self.selection;
        let policy = selection.policy();

        let is_selected = |node: &InventoryNode| selection.is_selected(&node.id);
        let is_selectable = |node: &InventoryNode| policy.is_selectable(node);
        let badge = |node: &InventoryNode, is_root: bool| {
            let count = resolver.badge_count(&node.id, |id| selection.is_selected(id));
            badge_text(
                count,
                is_root,
                selection.is_selected(&node.id),
                selection.any_selected(),
            )
        };

        let inputs = ProjectionInputs {
            is_selected: &is_selected,
            is_selectable: &is_selectable,
            badge: &badge,
            are_all_selected: selection.are_all_selected(),
            any_selected: selection.any_selected(),
            root_label: &self.options.root_label,
            expand_all: self.options.expand_all,
        };
        project(Some(tree), &self.query, &inputs)
    }

    fn status(&self) -> ViewStatus {
        if let Some(message) = self.vms.error() {
            return ViewStatus::Error {
                title: VMS_ERROR_TITLE.to_string(),
                message: message.to_string(),
            };
        }
        if let Some(message) = self.tree.error() {
            return ViewStatus::Error {
                title: TREE_ERROR_TITLE.to_string(),
                message: message.to_string(),
            };
        }
        if self.vms.is_pending() || self.tree.is_pending() {
            return ViewStatus::Loading {
                message: LONG_LOADING_MESSAGE.to_string(),
            };
        }
        ViewStatus::Ready
    }

    fn next_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            mode: self.mode,
            generation: self.generation,
        }
    }

    fn sink(form: &Arc<FormStateStore>) -> Arc<dyn SelectionSink> {
        form.clone()
    }

    fn rebuild_selection(&mut self, seed: Vec<NodeId>) {
        let tree = match &self.tree {
            Loadable::Ready(tree) => tree.clone(),
            _ => Arc::new(IndexedTree::empty()),
        };
        self.selection = SelectionState::new(tree, self.mode, seed, Self::sink(&self.form));
    }

    fn reconcile(&mut self) {
        let ctx = ReconcileContext {
            plan: self.plan.as_ref(),
            is_prefilled: self.form.is_prefilled(),
            tree: self.tree.ready().map(Arc::as_ref),
            catalog: self.vms.ready().map(Arc::as_ref),
        };
        match self.reconciler.reconcile(self.mode, &ctx) {
            ReconcileDecision::Unchanged => {}
            ReconcileDecision::Clear => self.selection.set_selected(Vec::new()),
            // The form keeps the plan's selection until the new data is ready.
            ReconcileDecision::Deferred => {}
            ReconcileDecision::Replace(preselection) => self.apply_preselection(preselection),
        }
    }

    fn apply_preselection(&mut self, preselection: Preselection) {
        if !preselection.uncovered.is_empty() {
            warn!(
                count = preselection.uncovered.len(),
                mode = %self.mode,
                "Some plan VMs cannot be selected exactly in this grouping"
            );
        }
        self.selection.set_selected(preselection.selection.iter().cloned());
        self.last_preselection = Some(preselection);
    }
}
