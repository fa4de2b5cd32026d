//! Mind map use-case facade.
//!
//! # Responsibility
//! - Route every edit through the command history so it is undoable.
//! - Provide save/load and the read-only layout consumed by renderers.
//!
//! # Invariants
//! - Failed operations leave store and history untouched.
//! - A successful load replaces the store and clears undo/redo history,
//!   because persisted documents carry no soft-delete shadow state.

use crate::codec::{
    decode_document, deserialize, encode_document, load_document, save_document, CodecError,
    NodeRecord,
};
use crate::command::{Command, CommandError};
use crate::history::CommandManager;
use crate::model::node::{Node, NodeId, SubtreeClone, ROOT_PARENT_ID};
use crate::store::{Layout, NodeStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Result type used by mind map facade operations.
pub type MindMapResult<T> = Result<T, MindMapError>;

/// Errors surfaced to shells.
#[derive(Debug)]
pub enum MindMapError {
    /// Store rejected the edit or the target is missing.
    Store(StoreError),
    /// Undo/redo requested with nothing to apply.
    EmptyCommand,
    /// Saving or loading failed.
    Persistence(CodecError),
    /// A previous holder of the shared lock panicked.
    Poisoned,
}

impl Display for MindMapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::EmptyCommand => write!(f, "nothing to undo or redo"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "mind map lock poisoned"),
        }
    }
}

impl Error for MindMapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::EmptyCommand | Self::Poisoned => None,
        }
    }
}

impl From<StoreError> for MindMapError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CommandError> for MindMapError {
    fn from(value: CommandError) -> Self {
        match value {
            CommandError::Store(err) => Self::Store(err),
            CommandError::EmptyCommand => Self::EmptyCommand,
        }
    }
}

impl From<CodecError> for MindMapError {
    fn from(value: CodecError) -> Self {
        Self::Persistence(value)
    }
}

/// One editable mind map: node store plus undo/redo history.
#[derive(Debug, Default)]
pub struct MindMap {
    store: NodeStore,
    history: CommandManager,
}

impl MindMap {
    /// Creates an empty mind map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.store.root().and_then(|id| self.store.get(id))
    }

    /// Live node by id.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    /// Live child ids of `id` in display order.
    pub fn children(&self, id: NodeId) -> MindMapResult<Vec<NodeId>> {
        Ok(self.store.children(id)?)
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    /// Id the next created node will receive.
    pub fn next_id(&self) -> NodeId {
        self.store.next_id()
    }

    /// Returns the Root, creating it (undoably) when the map is empty.
    pub fn create_or_get_root(&mut self, description: impl Into<String>) -> MindMapResult<Node> {
        if self.store.is_empty() {
            self.history
                .execute(&mut self.store, Command::add(ROOT_PARENT_ID, description))?;
        }
        let root_id = self
            .store
            .root()
            .ok_or(StoreError::NodeNotFound(ROOT_PARENT_ID))?;
        self.store
            .get(root_id)
            .cloned()
            .ok_or_else(|| StoreError::NodeNotFound(root_id).into())
    }

    /// Adds a node under `parent_id`; on an empty map it becomes the Root
    /// and `parent_id` is ignored. Returns the new node id.
    pub fn add(
        &mut self,
        parent_id: NodeId,
        description: impl Into<String>,
    ) -> MindMapResult<NodeId> {
        self.history
            .execute(&mut self.store, Command::add(parent_id, description))?;
        match self.history.last_executed() {
            Some(Command::Add(command)) => command.node_id().ok_or(MindMapError::EmptyCommand),
            _ => Err(MindMapError::EmptyCommand),
        }
    }

    /// Replaces the description of a live node.
    pub fn edit(&mut self, id: NodeId, description: impl Into<String>) -> MindMapResult<()> {
        self.history
            .execute(&mut self.store, Command::edit(id, description))?;
        Ok(())
    }

    /// Deletes a live node and its subtree; deleting the Root empties the map.
    pub fn delete(&mut self, id: NodeId) -> MindMapResult<()> {
        self.history.execute(&mut self.store, Command::delete(id))?;
        Ok(())
    }

    /// Detached clone of a live subtree, for the clipboard.
    pub fn copy(&self, id: NodeId) -> MindMapResult<SubtreeClone> {
        Ok(self.store.clone_subtree(id)?)
    }

    /// Copies then deletes a subtree as one undoable delete.
    pub fn cut(&mut self, id: NodeId) -> MindMapResult<SubtreeClone> {
        let subtree = self.store.clone_subtree(id)?;
        self.delete(id)?;
        Ok(subtree)
    }

    /// Pastes a detached subtree under `parent_id`; returns the new ids in
    /// depth-first order.
    pub fn paste(
        &mut self,
        parent_id: NodeId,
        subtree: SubtreeClone,
    ) -> MindMapResult<Vec<NodeId>> {
        self.history
            .execute(&mut self.store, Command::paste(parent_id, subtree))?;
        match self.history.last_executed() {
            Some(Command::Paste(command)) => Ok(command.pasted_ids().to_vec()),
            _ => Err(MindMapError::EmptyCommand),
        }
    }

    pub fn undo(&mut self) -> MindMapResult<()> {
        Ok(self.history.undo(&mut self.store)?)
    }

    pub fn redo(&mut self) -> MindMapResult<()> {
        Ok(self.history.redo(&mut self.store)?)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Live nodes by depth level, for rendering only.
    pub fn current_layout(&self) -> Layout {
        self.store.traverse()
    }

    /// Live node set as persisted records.
    pub fn snapshot(&self) -> Vec<NodeRecord> {
        self.store.snapshot()
    }

    /// Writes the live nodes to `path`; returns the record count.
    pub fn save(&self, path: impl AsRef<Path>) -> MindMapResult<usize> {
        Ok(save_document(path, &self.store)?)
    }

    /// Replaces the map with the document at `path`.
    ///
    /// On failure the current map and its history are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> MindMapResult<()> {
        let store = load_document(path)?;
        self.commit_loaded(store);
        Ok(())
    }

    /// Encodes the live nodes as a document byte payload.
    pub fn to_document_bytes(&self) -> MindMapResult<Vec<u8>> {
        Ok(encode_document(&self.store.snapshot())?)
    }

    /// Replaces the map with a document byte payload.
    ///
    /// On failure the current map and its history are kept.
    pub fn load_document_bytes(&mut self, bytes: &[u8]) -> MindMapResult<()> {
        let records = decode_document(bytes)?;
        let store = deserialize(&records)?;
        self.commit_loaded(store);
        Ok(())
    }

    fn commit_loaded(&mut self, store: NodeStore) {
        let discarded = self.history.undo_depth() + self.history.redo_depth();
        self.store = store;
        self.history.clear();
        info!(
            "event=mind_map_load module=service status=ok nodes={} discarded_history={}",
            self.store.node_count(),
            discarded
        );
    }
}
