//! Reversible edit commands.
//!
//! # Responsibility
//! - Define the four edit kinds as one sum type with a uniform
//!   `execute`/`unexecute` contract.
//! - Keep only the state each command needs to reverse itself.
//!
//! # Invariants
//! - A command either fully applies or leaves the store unchanged.
//! - Redo re-resolves stored ids through the store; it never recreates
//!   nodes, so ids seen by callers stay valid across undo/redo.

use crate::model::node::{NodeId, SubtreeClone};
use crate::store::{NodeStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod add;
mod delete;
mod edit;
mod paste;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use edit::EditCommand;
pub use paste::PasteCommand;

/// Result type used by command execution.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors from executing or reversing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Store rejected the edit.
    Store(StoreError),
    /// No command is available for the requested step.
    EmptyCommand,
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::EmptyCommand => write!(f, "no command to apply"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::EmptyCommand => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One reversible edit against a `NodeStore`.
#[derive(Debug, Clone)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(DeleteCommand),
    Paste(PasteCommand),
}

impl Command {
    /// Adds a node under `parent_id`, or the Root when the store is empty.
    pub fn add(parent_id: NodeId, description: impl Into<String>) -> Self {
        Self::Add(AddCommand::new(parent_id, description))
    }

    /// Replaces the description of `target`.
    pub fn edit(target: NodeId, description: impl Into<String>) -> Self {
        Self::Edit(EditCommand::new(target, description))
    }

    /// Deletes `target` with its whole subtree.
    pub fn delete(target: NodeId) -> Self {
        Self::Delete(DeleteCommand::new(target))
    }

    /// Pastes a detached subtree under `parent_id` with fresh ids.
    pub fn paste(parent_id: NodeId, subtree: SubtreeClone) -> Self {
        Self::Paste(PasteCommand::new(parent_id, subtree))
    }

    /// Stable lowercase name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
            Self::Paste(_) => "paste",
        }
    }

    /// Applies the command; also the redo path.
    pub fn execute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        match self {
            Self::Add(command) => command.execute(store),
            Self::Edit(command) => command.execute(store),
            Self::Delete(command) => command.execute(store),
            Self::Paste(command) => command.execute(store),
        }
    }

    /// Reverses the last successful `execute`.
    pub fn unexecute(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        match self {
            Self::Add(command) => command.unexecute(store),
            Self::Edit(command) => command.unexecute(store),
            Self::Delete(command) => command.unexecute(store),
            Self::Paste(command) => command.unexecute(store),
        }
    }
}
