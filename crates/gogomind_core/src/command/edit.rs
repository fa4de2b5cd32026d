//! Edit command.

use super::CommandResult;
use crate::model::node::NodeId;
use crate::store::{NodeStore, StoreError};

/// Swaps a node's description with the stored one.
///
/// Self-inverse: each application swaps the two texts back.
#[derive(Debug, Clone)]
pub struct EditCommand {
    target: NodeId,
    description: String,
}

impl EditCommand {
    pub fn new(target: NodeId, description: impl Into<String>) -> Self {
        Self {
            target,
            description: description.into(),
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub(super) fn execute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        let node = store
            .get_mut(self.target)
            .ok_or(StoreError::NodeNotFound(self.target))?;
        std::mem::swap(&mut node.description, &mut self.description);
        Ok(())
    }

    pub(super) fn unexecute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        self.execute(store)
    }
}
