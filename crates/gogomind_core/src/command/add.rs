//! Add command.

use super::{CommandError, CommandResult};
use crate::model::node::NodeId;
use crate::store::{NodeStore, StoreError};

#[derive(Debug, Clone)]
enum Added {
    Regular(NodeId),
    /// Root adds are reversed by wiping the store; `image` holds the wiped
    /// store between undo and redo.
    Root {
        id: NodeId,
        image: Option<Box<NodeStore>>,
    },
}

/// Creates one node, or the Root when the store is empty.
#[derive(Debug, Clone)]
pub struct AddCommand {
    parent_id: NodeId,
    description: String,
    added: Option<Added>,
}

impl AddCommand {
    pub fn new(parent_id: NodeId, description: impl Into<String>) -> Self {
        Self {
            parent_id,
            description: description.into(),
            added: None,
        }
    }

    /// Id of the node this command created, once executed.
    pub fn node_id(&self) -> Option<NodeId> {
        match self.added {
            Some(Added::Regular(id)) | Some(Added::Root { id, .. }) => Some(id),
            None => None,
        }
    }

    pub(super) fn execute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        if self.added.is_none() {
            let added = self.apply_first(store)?;
            self.added = Some(added);
            return Ok(());
        }

        match &mut self.added {
            None => Err(CommandError::EmptyCommand),
            Some(Added::Regular(id)) => {
                if !store.is_soft_deleted(*id) {
                    return Err(StoreError::NodeNotFound(*id).into());
                }
                store.undelete(&[*id]);
                store.allocator_mut().advance(1);
                Ok(())
            }
            Some(Added::Root { id, image }) => {
                let image = image.take().ok_or(StoreError::NodeNotFound(*id))?;
                *store = *image;
                Ok(())
            }
        }
    }

    fn apply_first(&self, store: &mut NodeStore) -> CommandResult<Added> {
        let is_root = store.is_empty();
        if !is_root && !store.contains(self.parent_id) {
            return Err(StoreError::ParentNotFound(self.parent_id).into());
        }

        let node = store.create(self.description.clone());
        let id = node.id();
        if let Err(err) = store.insert(node, Some(self.parent_id)) {
            store.allocator_mut().rewind(1);
            return Err(err.into());
        }
        Ok(if is_root {
            Added::Root { id, image: None }
        } else {
            Added::Regular(id)
        })
    }

    pub(super) fn unexecute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        match &mut self.added {
            None => Err(CommandError::EmptyCommand),
            Some(Added::Regular(id)) => {
                store.remove(*id, false)?;
                store.allocator_mut().rewind(1);
                Ok(())
            }
            Some(Added::Root { id, image }) => {
                if store.root() != Some(*id) {
                    return Err(StoreError::NodeNotFound(*id).into());
                }
                *image = Some(Box::new(store.clone()));
                store.reset();
                Ok(())
            }
        }
    }
}
