//! Paste command.

use super::{CommandError, CommandResult};
use crate::model::node::{NodeId, SubtreeClone};
use crate::store::{NodeStore, StoreError, StoreResult};

/// Inserts a detached subtree under a parent, minting fresh ids.
#[derive(Debug, Clone)]
pub struct PasteCommand {
    parent_id: NodeId,
    subtree: SubtreeClone,
    /// Ids minted by the first execute, pre-order.
    pasted: Option<Vec<NodeId>>,
}

impl PasteCommand {
    pub fn new(parent_id: NodeId, subtree: SubtreeClone) -> Self {
        Self {
            parent_id,
            subtree,
            pasted: None,
        }
    }

    /// Ids created by this paste, once executed.
    pub fn pasted_ids(&self) -> &[NodeId] {
        self.pasted.as_deref().unwrap_or_default()
    }

    pub(super) fn execute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        if !store.contains(self.parent_id) {
            return Err(StoreError::ParentNotFound(self.parent_id).into());
        }

        if let Some(ids) = &self.pasted {
            let top = ids.first().copied().ok_or(CommandError::EmptyCommand)?;
            if !store.is_soft_deleted(top) {
                return Err(StoreError::NodeNotFound(top).into());
            }
            store.undelete(ids);
            store.allocator_mut().advance(ids.len());
            return Ok(());
        }

        let staged = store.clone();
        let mut ids = Vec::with_capacity(self.subtree.node_count());
        if let Err(err) = insert_subtree(store, self.parent_id, &self.subtree, &mut ids) {
            *store = staged;
            return Err(err.into());
        }
        self.pasted = Some(ids);
        Ok(())
    }

    pub(super) fn unexecute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        let ids = self.pasted.as_ref().ok_or(CommandError::EmptyCommand)?;
        let top = ids.first().copied().ok_or(CommandError::EmptyCommand)?;
        store.remove(top, true)?;
        store.allocator_mut().rewind(ids.len());
        Ok(())
    }
}

/// Depth-first create+insert of every clone node; children keep clone order.
fn insert_subtree(
    store: &mut NodeStore,
    parent_id: NodeId,
    subtree: &SubtreeClone,
    ids: &mut Vec<NodeId>,
) -> StoreResult<()> {
    let mut stack = vec![(parent_id, subtree)];
    while let Some((parent, item)) = stack.pop() {
        let node = store.create(item.description.clone());
        let id = node.id();
        store.insert(node, Some(parent))?;
        ids.push(id);
        stack.extend(item.children.iter().rev().map(|child| (id, child)));
    }
    Ok(())
}
