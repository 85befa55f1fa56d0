//! Inventory entities - raw provider documents and indexed tree nodes

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::NodeId;
use crate::error::MalformedTreeError;

/// Id given to the synthetic root of a document whose top entry has no object
pub const ROOT_ID: &str = "__root__";

/// Kind of an inventory node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Cluster, host, folder or datacenter
    Container,
    /// Virtual machine (always a leaf)
    Vm,
}

impl NodeKind {
    /// Map a provider kind label (`"Cluster"`, `"VM"`, ...) to a node kind
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("vm") {
            NodeKind::Vm
        } else {
            NodeKind::Container
        }
    }
}

/// Provider attributes carried by a node, opaque to the selection engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePayload {
    /// Display name
    pub name: String,
    /// Provider object link, used as the display key when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Provider kind label (Datacenter, Cluster, Host, Folder, VM)
    #[serde(default)]
    pub category: String,
}

/// One entry of the inventory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Back-reference used for lookups only
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub child_ids: Vec<NodeId>,
    pub payload: NodePayload,
}

impl InventoryNode {
    /// Create a container node without children
    pub fn container(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Container, name)
    }

    /// Create a VM node
    pub fn vm(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Vm, name);
        node.payload.category = "VM".to_string();
        node
    }

    fn new(id: impl Into<NodeId>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: None,
            child_ids: Vec::new(),
            payload: NodePayload {
                name: name.into(),
                self_link: None,
                category: String::new(),
            },
        }
    }

    /// Set the ordered child ids
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.child_ids = children.into_iter().map(Into::into).collect();
        self
    }

    /// Set the provider kind label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.payload.category = category.into();
        self
    }

    /// Set the provider object link
    pub fn with_self_link(mut self, link: impl Into<String>) -> Self {
        self.payload.self_link = Some(link.into());
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.payload.name
    }

    /// Key the display layer uses to refer back to this node
    pub fn display_key(&self) -> &str {
        self.payload
            .self_link
            .as_deref()
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Check if this is a VM node
    pub fn is_vm(&self) -> bool {
        self.kind == NodeKind::Vm
    }

    /// Check if this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Provider object reference inside a nested inventory document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "selfLink", alias = "self_link")]
    pub self_link: Option<String>,
}

/// Nested inventory document as delivered by the provider
///
/// ```json
/// { "kind": "", "object": null, "children": [
///     { "kind": "Cluster", "object": { "id": "c1", "name": "ClusterA" }, "children": [] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInventoryTree {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub object: Option<RawObject>,
    #[serde(default)]
    pub children: Option<Vec<RawInventoryTree>>,
}

impl RawInventoryTree {
    /// Flatten the document into node records, returning the root id.
    ///
    /// Parent links are filled in from nesting. Structural checks beyond
    /// missing objects are left to the index build.
    pub fn into_records(self) -> Result<(NodeId, Vec<InventoryNode>), MalformedTreeError> {
        let root_id = self
            .object
            .as_ref()
            .map(|o| NodeId::from(o.id.as_str()))
            .unwrap_or_else(|| NodeId::from(ROOT_ID));

        let mut records = Vec::new();
        let mut stack = vec![(self, None::<NodeId>)];

        while let Some((entry, parent)) = stack.pop() {
            let RawInventoryTree {
                kind,
                object,
                children,
            } = entry;

            let object = match (object, &parent) {
                (Some(object), _) => object,
                (None, None) => RawObject {
                    id: ROOT_ID.to_string(),
                    name: String::new(),
                    self_link: None,
                },
                (None, Some(parent)) => {
                    return Err(MalformedTreeError::MissingObject {
                        kind,
                        parent: parent.clone(),
                    })
                }
            };

            let id = NodeId::from(object.id);
            let children = children.unwrap_or_default();
            let child_ids = children
                .iter()
                .map(|c| {
                    c.object
                        .as_ref()
                        .map(|o| NodeId::from(o.id.as_str()))
                        .ok_or_else(|| MalformedTreeError::MissingObject {
                            kind: c.kind.clone(),
                            parent: id.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            // Reverse push keeps records in document order once popped.
            for child in children.into_iter().rev() {
                stack.push((child, Some(id.clone())));
            }

            records.push(InventoryNode {
                id,
                kind: NodeKind::from_label(&kind),
                parent_id: parent,
                child_ids,
                payload: NodePayload {
                    name: object.name,
                    self_link: object.self_link,
                    category: kind,
                },
            });
        }

        Ok((root_id, records))
    }
}
