//! Delete command.

use super::{CommandError, CommandResult};
use crate::model::node::NodeId;
use crate::store::{NodeStore, StoreError};

#[derive(Debug, Clone)]
enum Deleted {
    /// Exact ids flipped by the soft delete.
    Subtree(Vec<NodeId>),
    /// Root deletion wipes the store; the prior store is kept whole.
    Root(Box<NodeStore>),
}

/// Deletes a node and its subtree; deleting the Root empties the map.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    target: NodeId,
    deleted: Option<Deleted>,
}

impl DeleteCommand {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            deleted: None,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub(super) fn execute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        let node = store
            .get(self.target)
            .ok_or(StoreError::NodeNotFound(self.target))?;

        let deleted = if node.is_root() {
            let image = store.clone();
            store.reset();
            Deleted::Root(Box::new(image))
        } else {
            Deleted::Subtree(store.remove(self.target, true)?)
        };
        self.deleted = Some(deleted);
        Ok(())
    }

    pub(super) fn unexecute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        match self.deleted.take() {
            None => Err(CommandError::EmptyCommand),
            Some(Deleted::Root(image)) => {
                *store = *image;
                Ok(())
            }
            Some(Deleted::Subtree(ids)) => {
                store.undelete(&ids);
                Ok(())
            }
        }
    }
}
