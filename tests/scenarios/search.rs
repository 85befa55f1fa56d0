//! Scenario: Narrow the tree with search
//!
//! Journey: A user looks for one cluster in a large inventory.
//!
//! Steps:
//! 1. User types part of a cluster name
//! 2. Only the matching cluster, its VMs and its ancestors remain
//! 3. User checks it while the search is active
//! 4. User clears the search
//!
//! Success Criteria:
//! - Search never changes the selection
//! - Nodes hidden by search keep their check state

use std::sync::Arc;

use crate::common::*;
use vmselect::application::{FilterSession, FormStateStore, ViewOptions};
use vmselect::infrastructure::FileInventorySource;
use vmselect::{CheckState, GroupingMode, ProviderType};

fn open(env: &TestEnv) -> FilterSession {
    let form = Arc::new(FormStateStore::new(GroupingMode::ByContainer, false));
    let mut session = FilterSession::new(
        ProviderType::Vsphere,
        form,
        None,
        ViewOptions::default(),
    );
    session.load_from(&FileInventorySource::new(env.path("inventory")));
    session
}

/// SCENARIO: Searching for a cluster keeps its ancestors and whole subtree
#[test]
fn scenario_search_then_select() {
    let env = TestEnv::with_inventory();
    let mut session = open(&env);

    // Steps 1-2: search is case-insensitive
    session.on_search("clusterb");
    let tree = session.display_tree();
    assert!(tree.find("cluster-b").is_some());
    assert!(tree.find("vm3").is_some());
    assert!(tree.find("dc1").is_some());
    assert!(tree.find(CLUSTER_A_KEY).is_none());
    assert!(tree.find("vm1").is_none());

    // Step 3: check while filtered
    session.on_check("cluster-b");
    assert_eq!(session.selected_vms().len(), 1);

    // Step 4: clearing the search restores every node with its state
    session.on_search("");
    let tree = session.display_tree();
    assert_eq!(tree.roots[0].count(), 8);
    assert_eq!(tree.find("cluster-b").unwrap().check, CheckState::Checked);
    assert_eq!(tree.find(CLUSTER_A_KEY).unwrap().check, CheckState::Unchecked);
}

/// SCENARIO: A search matching nothing shows an empty tree
#[test]
fn scenario_search_without_matches() {
    let env = TestEnv::with_inventory();
    let mut session = open(&env);
    session.on_check(CLUSTER_A_KEY);

    session.on_search("datastore");
    assert!(session.display_tree().is_empty());
    assert_eq!(session.selected_vms().len(), 2);
}

/// SCENARIO: Searching a VM name shows the path down to it
#[test]
fn scenario_search_for_vm() {
    let env = TestEnv::with_inventory();
    let mut session = open(&env);

    session.on_search("VM2");
    let tree = session.display_tree();
    let host = tree.find("host1").unwrap();
    assert_eq!(host.children.len(), 1);
    assert_eq!(host.children[0].label, "VM2");
    assert!(host.expanded);
}
