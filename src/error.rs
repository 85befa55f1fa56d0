//! Error types for vmselect
//!
//! Uses `thiserror` for library errors. Only structural corruption of an
//! inventory document is exceptional; empty data, search misses and empty
//! selections are ordinary states and never surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::NodeId;

/// Result type alias for vmselect operations
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Structural violation in a raw inventory document.
///
/// Fatal to an index build. Surfaced to the user as a load error and never
/// retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    /// The declared root id is not among the supplied nodes
    #[error("root node '{0}' is not present in the inventory")]
    MissingRoot(NodeId),

    /// Two nodes share one identifier
    #[error("node id '{0}' appears more than once")]
    DuplicateNode(NodeId),

    /// A child reference resolves to no node
    #[error("node '{parent}' references unknown child '{child}'")]
    DanglingChild { parent: NodeId, child: NodeId },

    /// A node is its own ancestor
    #[error("cycle detected: '{child}' is an ancestor of '{parent}'")]
    Cycle { parent: NodeId, child: NodeId },

    /// A node is listed as the child of more than one parent
    #[error("node '{child}' is listed under both '{first}' and '{second}'")]
    MultipleParents {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },

    /// A node cannot be reached from the root
    #[error("node '{0}' is not reachable from the root")]
    Disconnected(NodeId),

    /// A node's declared parent contradicts the child lists
    #[error("node '{node}' declares parent '{declared}' but is listed under '{actual}'")]
    ParentMismatch {
        node: NodeId,
        declared: NodeId,
        actual: NodeId,
    },

    /// Two nodes resolve to the same display key
    #[error("display key '{key}' is shared by '{first}' and '{second}'")]
    DuplicateDisplayKey {
        key: String,
        first: NodeId,
        second: NodeId,
    },

    /// A non-root node uses the key reserved for the top of the tree
    #[error("node '{0}' uses the reserved display key of the tree root")]
    ReservedDisplayKey(NodeId),

    /// VM nodes are leaves
    #[error("VM node '{0}' has children")]
    VmWithChildren(NodeId),

    /// A non-root entry of a nested document carries no object reference
    #[error("inventory entry of kind '{kind}' under '{parent}' has no object")]
    MissingObject { kind: String, parent: NodeId },
}

/// Main error type for vmselect operations
#[derive(Error, Debug)]
pub enum SelectorError {
    /// Inventory document failed structural validation
    #[error("malformed inventory tree: {0}")]
    MalformedTree(#[from] MalformedTreeError),

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
