//! Arena-backed node store.
//!
//! # Responsibility
//! - Hold all nodes (live and soft-deleted) keyed by id.
//! - Allocate ids, insert nodes under live parents, soft delete subtrees.
//! - Answer live-only queries and produce the level-ordered layout.
//!
//! # Invariants
//! - A node is live only if it and every ancestor up to Root are not deleted.
//! - Child lists keep insertion order; soft-deleted children stay listed but
//!   are skipped by every query.

use super::{IdAllocator, StoreError, StoreResult};
use crate::codec::NodeRecord;
use crate::model::node::{Node, NodeId, NodeKind, SubtreeClone, ROOT_PARENT_ID};
use log::debug;
use std::collections::BTreeMap;

/// Level-ordered `(id, parent_id)` pairs; the Root carries `ROOT_PARENT_ID`.
pub type Layout = Vec<Vec<(NodeId, NodeId)>>;

/// All nodes of one mind map plus its id allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStore {
    root: Option<NodeId>,
    nodes: BTreeMap<NodeId, Node>,
    allocator: IdAllocator,
}

impl NodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-wired nodes; the allocator resumes at
    /// `next_id`, which the caller derives from the highest loaded id.
    pub(crate) fn from_loaded(
        root: Option<NodeId>,
        nodes: BTreeMap<NodeId, Node>,
        next_id: NodeId,
    ) -> Self {
        let mut allocator = IdAllocator::default();
        allocator.reset_to(next_id);
        Self {
            root,
            nodes,
            allocator,
        }
    }

    /// Live Root id, `None` when the store is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root.filter(|id| self.is_live(*id))
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    /// Id the next `create` call will assign.
    pub fn next_id(&self) -> NodeId {
        self.allocator.peek()
    }

    pub(crate) fn allocator_mut(&mut self) -> &mut IdAllocator {
        &mut self.allocator
    }

    /// Allocates an id and builds a detached node.
    ///
    /// The node is a Root when the store is empty, Regular otherwise. It is
    /// not part of the tree until passed to `insert`.
    pub fn create(&mut self, description: impl Into<String>) -> Node {
        let kind = if self.is_empty() {
            NodeKind::Root
        } else {
            NodeKind::Regular
        };
        let id = self.allocator.allocate();
        Node::new(id, kind, description)
    }

    /// Attaches a node to the tree.
    ///
    /// A Root is installed as the store root; `parent_id` is ignored for it.
    /// A Regular node is appended to the children of the live `parent_id`.
    ///
    /// # Errors
    /// - `RootAlreadyExists` when inserting a Root while one is live.
    /// - `ParentNotFound` when the parent is absent or soft-deleted.
    /// - `NodeAlreadyExists` when a live node already uses the id.
    pub fn insert(&mut self, node: Node, parent_id: Option<NodeId>) -> StoreResult<()> {
        match node.kind() {
            NodeKind::Root => self.insert_root(node),
            NodeKind::Regular => self.insert_child(node, parent_id),
        }
    }

    fn insert_root(&mut self, mut node: Node) -> StoreResult<()> {
        if let Some(root_id) = self.root() {
            return Err(StoreError::RootAlreadyExists(root_id));
        }
        if self.is_live(node.id()) {
            return Err(StoreError::NodeAlreadyExists(node.id()));
        }

        let id = node.id();
        self.drop_stale(id);
        node.parent = None;
        node.children.clear();
        node.restore();
        self.root = Some(id);
        self.nodes.insert(id, node);
        Ok(())
    }

    fn insert_child(&mut self, mut node: Node, parent_id: Option<NodeId>) -> StoreResult<()> {
        let parent_id = parent_id
            .filter(|id| self.is_live(*id))
            .ok_or(StoreError::ParentNotFound(parent_id.unwrap_or(ROOT_PARENT_ID)))?;
        if self.is_live(node.id()) {
            return Err(StoreError::NodeAlreadyExists(node.id()));
        }
        let id = node.id();
        self.drop_stale(id);
        node.parent = Some(parent_id);
        node.children.clear();
        node.restore();
        self.nodes.insert(id, node);
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.push(id);
        }
        Ok(())
    }

    /// Forgets a soft-deleted entry whose id is about to be reused.
    fn drop_stale(&mut self, id: NodeId) {
        let Some(stale) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(parent) = stale.parent.and_then(|pid| self.nodes.get_mut(&pid)) {
            parent.children.retain(|child| *child != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }
        debug!("event=stale_node_replaced module=store status=ok node_id={id}");
    }

    /// Returns the node only while it is live.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if self.is_live(id) {
            self.nodes.get(&id)
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.is_live(id) {
            self.nodes.get_mut(&id)
        } else {
            None
        }
    }

    /// Returns whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.is_live(id)
    }

    /// Returns whether `id` has a stored entry that is itself soft-deleted.
    pub(crate) fn is_soft_deleted(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(Node::is_deleted)
    }

    fn is_live(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        let mut hops = 0;
        while let Some(current) = cursor {
            let Some(node) = self.nodes.get(&current) else {
                return false;
            };
            if node.is_deleted() {
                return false;
            }
            if node.is_root() {
                return self.root == Some(current);
            }
            hops += 1;
            if hops > self.nodes.len() {
                return false;
            }
            cursor = node.parent;
        }
        false
    }

    /// Live children of a live node, in display order.
    pub fn children(&self, id: NodeId) -> StoreResult<Vec<NodeId>> {
        if !self.is_live(id) {
            return Err(StoreError::NodeNotFound(id));
        }
        Ok(self.live_children(id))
    }

    fn live_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes.get(child).is_some_and(|n| !n.is_deleted()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Live ids of the subtree rooted at `id`, pre-order.
    fn live_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            if node.is_deleted() {
                continue;
            }
            result.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        result
    }

    /// Soft-deletes a live node, optionally with its whole live subtree.
    ///
    /// Returns the ids whose flag was flipped, so the caller can undo exactly
    /// this deletion without resurrecting nodes deleted earlier.
    ///
    /// # Errors
    /// - `NodeNotFound` when the node is absent or already deleted.
    pub fn remove(&mut self, id: NodeId, with_descendants: bool) -> StoreResult<Vec<NodeId>> {
        if !self.is_live(id) {
            return Err(StoreError::NodeNotFound(id));
        }
        let ids = if with_descendants {
            self.live_subtree(id)
        } else {
            vec![id]
        };
        for node_id in &ids {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.soft_delete();
            }
        }
        debug!(
            "event=node_remove module=store status=ok node_id={id} count={}",
            ids.len()
        );
        Ok(ids)
    }

    /// Clears the deleted flag of exactly the given ids.
    ///
    /// Only for command undo/redo; bypasses the liveness guard of `remove`.
    pub(crate) fn undelete(&mut self, ids: &[NodeId]) {
        for id in ids {
            if let Some(node) = self.nodes.get_mut(id) {
                node.restore();
            }
        }
        debug!(
            "event=node_undelete module=store status=ok count={}",
            ids.len()
        );
    }

    /// Breadth-first, level by level walk from Root over live nodes.
    pub fn traverse(&self) -> Layout {
        let mut layout = Vec::new();
        let Some(root_id) = self.root() else {
            return layout;
        };

        let mut level = vec![(root_id, ROOT_PARENT_ID)];
        while !level.is_empty() {
            let next: Vec<(NodeId, NodeId)> = level
                .iter()
                .flat_map(|&(id, _)| {
                    self.live_children(id)
                        .into_iter()
                        .map(move |child| (child, id))
                })
                .collect();
            layout.push(level);
            level = next;
        }
        layout
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.traverse().iter().map(Vec::len).sum()
    }

    /// Live node set as persisted records, in traversal order.
    pub fn snapshot(&self) -> Vec<NodeRecord> {
        self.traverse()
            .into_iter()
            .flatten()
            .filter_map(|(id, parent_id)| {
                self.nodes.get(&id).map(|node| NodeRecord {
                    id,
                    description: node.description.clone(),
                    parent_id,
                })
            })
            .collect()
    }

    /// Detached copy of a live subtree, for copy/cut.
    pub fn clone_subtree(&self, id: NodeId) -> StoreResult<SubtreeClone> {
        let node = self.get(id).ok_or(StoreError::NodeNotFound(id))?;
        Ok(self.clone_node(node))
    }

    fn clone_node(&self, node: &Node) -> SubtreeClone {
        SubtreeClone {
            description: node.description.clone(),
            children: self
                .live_children(node.id())
                .iter()
                .filter_map(|child| self.nodes.get(child))
                .map(|child| self.clone_node(child))
                .collect(),
        }
    }

    /// Drops every node and rewinds the allocator.
    pub fn reset(&mut self) {
        let dropped = self.nodes.len();
        self.root = None;
        self.nodes.clear();
        self.allocator.reset();
        debug!("event=store_reset module=store status=ok dropped={dropped}");
    }
}
