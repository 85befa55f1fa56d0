//! Scenario: Edit an existing plan
//!
//! Journey: A user reopens a plan that migrates VM1 and VM2.
//!
//! Steps:
//! 1. The plan's VMs are preselected on the cluster tab
//! 2. User switches to the folder tab
//! 3. The same VMs are preselected there once the folder tree arrives
//!
//! Success Criteria:
//! - The VM set survives tab switches while the plan is prefilled
//! - VMs no exact cover can hold are reported, never over-selected

use std::sync::Arc;

use crate::common::*;
use vmselect::application::{FilterSession, FormStateStore, ViewOptions, ViewStatus};
use vmselect::infrastructure::{load_plan, FileInventorySource};
use vmselect::{GroupingMode, InventorySource, NodeId, Plan, ProviderType, VmId};

fn open(env: &TestEnv, plan: Plan) -> (FilterSession, Arc<FormStateStore>) {
    let form = Arc::new(FormStateStore::new(GroupingMode::ByContainer, false));
    let mut session = FilterSession::new(
        ProviderType::Vsphere,
        form.clone(),
        Some(plan),
        ViewOptions::default(),
    );
    session.load_from(&FileInventorySource::new(env.path("inventory")));
    (session, form)
}

fn vm_ids(session: &FilterSession) -> Vec<String> {
    session
        .selected_vms()
        .ids()
        .map(|id| id.as_str().to_string())
        .collect()
}

/// SCENARIO: Plan VMs follow the user across grouping tabs
#[test]
fn scenario_edit_plan_across_tabs() {
    let env = TestEnv::with_inventory();
    env.write("plan.yaml", PLAN_YAML);
    let plan = load_plan(&env.path("plan.yaml")).unwrap();
    let (mut session, form) = open(&env, plan);

    // Step 1: ClusterA holds exactly the plan's VMs
    let preselection = session.prefill_from_plan().unwrap().clone();
    assert_eq!(preselection.roots, vec![NodeId::from("cluster-a")]);
    assert!(preselection.uncovered.is_empty());
    assert!(form.is_prefilled());
    assert_eq!(vm_ids(&session), vec!["vm1", "vm2"]);

    // Step 2: switching tabs defers until the folder tree arrives
    let ticket = session.set_grouping_mode(GroupingMode::ByLeaf).unwrap();
    assert!(matches!(session.view().status, ViewStatus::Loading { .. }));
    assert!(vm_ids(&session).is_empty());

    // Step 3: the same VMs are selected individually
    let source = FileInventorySource::new(env.path("inventory"));
    session.deliver_tree(ticket, source.fetch_tree(GroupingMode::ByLeaf));
    assert_eq!(vm_ids(&session), vec!["vm1", "vm2"]);
    assert_eq!(
        form.selected_tree_nodes(),
        vec![NodeId::from("vm1"), NodeId::from("vm2")]
    );

    // And back again
    let ticket = session.set_grouping_mode(GroupingMode::ByContainer).unwrap();
    session.deliver_tree(ticket, source.fetch_tree(GroupingMode::ByContainer));
    assert_eq!(vm_ids(&session), vec!["vm1", "vm2"]);
}

/// SCENARIO: A plan that splits a host reports the VMs left out
#[test]
fn scenario_plan_without_exact_cover() {
    let env = TestEnv::with_inventory();
    let (mut session, _form) = open(&env, Plan::new("partial", ["vm1", "vm3"]));

    let preselection = session.prefill_from_plan().unwrap().clone();
    assert_eq!(preselection.roots, vec![NodeId::from("cluster-b")]);
    assert_eq!(preselection.uncovered, vec![VmId::from("vm1")]);
    assert_eq!(vm_ids(&session), vec!["vm3"]);
}

/// SCENARIO: VMs the provider no longer reports are dropped from the plan
#[test]
fn scenario_plan_with_vanished_vm() {
    let env = TestEnv::with_inventory();
    let (mut session, _form) = open(&env, Plan::new("stale", ["vm3", "vm-gone"]));

    let preselection = session.prefill_from_plan().unwrap().clone();
    assert!(preselection.uncovered.is_empty());
    assert_eq!(vm_ids(&session), vec!["vm3"]);
}

/// SCENARIO: Prefill waits for the inventory
#[test]
fn scenario_prefill_before_load_is_noop() {
    let form = Arc::new(FormStateStore::new(GroupingMode::ByContainer, false));
    let mut session = FilterSession::new(
        ProviderType::Vsphere,
        form.clone(),
        Some(Plan::new("early", ["vm1"])),
        ViewOptions::default(),
    );
    assert!(session.prefill_from_plan().is_none());
    assert!(!form.is_prefilled());
}
