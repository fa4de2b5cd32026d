//! Node domain model.
//!
//! # Responsibility
//! - Define the single node representation with an explicit kind tag.
//! - Provide soft-delete lifecycle helpers and the Root/Regular kind tag.
//! - Define the detached subtree shape used by copy/paste.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - A `Root` node has no parent; a `Regular` node has exactly one once inserted.
//! - Parent/children are id references into the owning store, never owned nodes.

use std::fmt::{Display, Formatter};

/// Stable node identifier.
///
/// Signed because the persisted format uses `-1` as the Root's parent marker.
pub type NodeId = i64;

/// First id handed out by a fresh allocator.
pub const FIRST_NODE_ID: NodeId = 0;

/// Parent id written for the Root record in persisted documents.
pub const ROOT_PARENT_ID: NodeId = -1;

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The single top-level node of a non-empty mind map.
    Root,
    /// Any other node; always attached under a parent.
    Regular,
}

impl NodeKind {
    /// Short label used in node info strings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Regular => "Node",
        }
    }
}

/// Mind map node stored in the node arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    /// User-facing text.
    pub description: String,
    kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) is_deleted: bool,
}

impl Node {
    /// Builds a detached node.
    ///
    /// Callers outside the store get nodes from `NodeStore::create`; this
    /// constructor exists for the store and the document loader.
    pub(crate) fn new(id: NodeId, kind: NodeKind, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            kind,
            parent: None,
            children: Vec::new(),
            is_deleted: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Parent id, `None` for Root and for nodes not inserted yet.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in display order, including soft-deleted children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Label in the form `<description> <Root|Node> ID:<id>`.
    pub fn info(&self) -> String {
        format!("{} <{}> ID:{}", self.description, self.kind.label(), self.id)
    }

    pub(crate) fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    pub(crate) fn restore(&mut self) {
        self.is_deleted = false;
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.info())
    }
}

/// Detached copy of a subtree: descriptions and child order, no ids.
///
/// Produced by copy/cut and consumed by paste; pasting mints fresh ids for
/// every node, so one clone can be pasted any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeClone {
    pub description: String,
    pub children: Vec<SubtreeClone>,
}

impl SubtreeClone {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child clone, builder style.
    pub fn with_child(mut self, child: SubtreeClone) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this clone, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SubtreeClone::node_count).sum::<usize>()
    }
}
