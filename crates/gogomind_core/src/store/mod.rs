//! In-memory node store.
//!
//! # Responsibility
//! - Own every node of one mind map, keyed by stable id.
//! - Enforce Root/Regular and parent/child invariants at the insert boundary.
//! - Provide soft delete, level traversal and whole-store snapshots.
//!
//! # Invariants
//! - At most one live Root; every live Regular node has a live parent.
//! - No id is shared by two live nodes.
//! - Entries are only dropped by `reset` or when a rewound id is reused.

use crate::model::node::NodeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod allocator;
mod node_store;

pub use allocator::IdAllocator;
pub use node_store::{Layout, NodeStore};

/// Result type used by node store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from node store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Requested parent does not exist or is soft-deleted.
    ParentNotFound(NodeId),
    /// A live node already uses this id.
    NodeAlreadyExists(NodeId),
    /// A live Root already exists; carries its id.
    RootAlreadyExists(NodeId),
    /// Target node does not exist or is soft-deleted.
    NodeNotFound(NodeId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParentNotFound(id) => write!(f, "parent node not found: {id}"),
            Self::NodeAlreadyExists(id) => write!(f, "node already exists: {id}"),
            Self::RootAlreadyExists(id) => write!(f, "root already exists: {id}"),
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
        }
    }
}

impl Error for StoreError {}
