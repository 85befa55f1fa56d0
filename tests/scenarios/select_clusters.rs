//! Scenario: Pick VMs by cluster for a new plan
//!
//! Journey: A user creating a plan wants every VM of one cluster.
//!
//! Steps:
//! 1. The step opens on the cluster tab and loads the inventory
//! 2. User checks ClusterA
//! 3. Badges and the VM list follow the selection
//! 4. User checks the root, then unchecks it
//!
//! Success Criteria:
//! - Checking a cluster makes exactly its VMs available
//! - The wizard's form state mirrors every change

use std::sync::Arc;

use crate::common::*;
use vmselect::application::{CheckOutcome, FilterSession, FormStateStore, ViewOptions, ViewStatus};
use vmselect::domain::services::ROOT_DISPLAY_KEY;
use vmselect::infrastructure::FileInventorySource;
use vmselect::{CheckState, GroupingMode, InventorySource, NodeId, ProviderType};

fn open(env: &TestEnv) -> (FilterSession, Arc<FormStateStore>) {
    let form = Arc::new(FormStateStore::new(GroupingMode::ByContainer, false));
    let mut session = FilterSession::new(
        ProviderType::Vsphere,
        form.clone(),
        None,
        ViewOptions::default(),
    );
    session.load_from(&FileInventorySource::new(env.path("inventory")));
    (session, form)
}

fn vm_names(session: &FilterSession) -> Vec<String> {
    session.selected_vms().iter().map(|vm| vm.name.clone()).collect()
}

/// SCENARIO: Checking one cluster selects its VMs and nothing else
#[test]
fn scenario_select_one_cluster() {
    let env = TestEnv::with_inventory();
    let (mut session, form) = open(&env);

    // Step 1: everything loaded, nothing selected
    let view = session.view();
    assert_eq!(view.status, ViewStatus::Ready);
    assert_eq!(view.modes, vec![GroupingMode::ByContainer, GroupingMode::ByLeaf]);
    assert!(vm_names(&session).is_empty());

    // Step 2: check ClusterA by its provider link
    let outcome = session.on_check(CLUSTER_A_KEY);
    assert!(matches!(outcome, CheckOutcome::Toggled(_)));

    // Step 3: badges and VMs follow
    let tree = session.display_tree();
    let cluster = tree.find(CLUSTER_A_KEY).unwrap();
    assert_eq!(cluster.check, CheckState::Checked);
    assert_eq!(cluster.badge.as_deref(), Some("2"));
    assert_eq!(tree.find("dc1").unwrap().check, CheckState::Indeterminate);
    assert_eq!(tree.find("cluster-b").unwrap().badge, None);
    assert_eq!(tree.roots[0].badge.as_deref(), Some("2 VMs"));
    assert_eq!(vm_names(&session), vec!["VM1", "VM2"]);

    // Host below the cluster was selected with it and mirrored to the form
    assert_eq!(
        form.selected_tree_nodes(),
        vec![NodeId::from("cluster-a"), NodeId::from("host1")]
    );

    // Catalog attributes ride along with the resolved VMs
    let vms = session.selected_vms();
    let first = vms.iter().next().unwrap();
    assert_eq!(first.attributes["powerState"], "poweredOn");
}

/// SCENARIO: The root checkbox selects and clears everything
#[test]
fn scenario_select_all_then_clear() {
    let env = TestEnv::with_inventory();
    let (mut session, form) = open(&env);

    assert_eq!(session.on_check(ROOT_DISPLAY_KEY), CheckOutcome::SelectAll(true));
    assert_eq!(vm_names(&session), vec!["VM1", "VM2", "VM3"]);
    assert_eq!(session.display_tree().roots[0].check, CheckState::Checked);
    assert_eq!(session.display_tree().roots[0].badge.as_deref(), Some("3 VMs"));

    assert_eq!(session.on_check(ROOT_DISPLAY_KEY), CheckOutcome::SelectAll(false));
    assert!(vm_names(&session).is_empty());
    assert!(form.selected_tree_nodes().is_empty());
    assert_eq!(session.display_tree().roots[0].badge, None);
}

/// SCENARIO: Clicking a checked cluster again deselects it
#[test]
fn scenario_toggle_cluster_off() {
    let env = TestEnv::with_inventory();
    let (mut session, _form) = open(&env);

    session.on_check(CLUSTER_A_KEY);
    session.on_check("cluster-b");
    assert_eq!(vm_names(&session), vec!["VM1", "VM2", "VM3"]);

    session.on_check(CLUSTER_A_KEY);
    assert_eq!(vm_names(&session), vec!["VM3"]);
}

/// SCENARIO: Folder tab selects VMs one by one
#[test]
fn scenario_folder_tab_selects_single_vms() {
    let env = TestEnv::with_inventory();
    let (mut session, form) = open(&env);
    session.on_check(CLUSTER_A_KEY);

    let ticket = session.set_grouping_mode(GroupingMode::ByLeaf).unwrap();
    assert!(matches!(session.view().status, ViewStatus::Loading { .. }));
    // Unprefilled switch starts over
    assert!(form.selected_tree_nodes().is_empty());

    let source = FileInventorySource::new(env.path("inventory"));
    assert!(session.deliver_tree(ticket, source.fetch_tree(GroupingMode::ByLeaf)));

    // Clicking a folder selects the VMs inside it
    session.on_check("folder-prod");
    assert_eq!(vm_names(&session), vec!["VM1", "VM2"]);
    let tree = session.display_tree();
    assert_eq!(tree.find("folder-prod").unwrap().check, CheckState::Indeterminate);
    assert_eq!(tree.find("vm1").unwrap().check, CheckState::Checked);

    session.on_check("vm2");
    assert_eq!(vm_names(&session), vec!["VM1"]);
    assert_eq!(form.grouping_mode(), GroupingMode::ByLeaf);
}
