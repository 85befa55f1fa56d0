//! Domain Policies
//!
//! Business rules and policies that govern behavior.
//! These are pure functions that operate on domain entities.

mod grouping;

pub use grouping::{ByContainer, ByLeaf, GroupingPolicy, Preselection};
