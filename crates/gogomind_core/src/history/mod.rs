//! Linear undo/redo history.
//!
//! # Responsibility
//! - Run commands against a store and keep them for undo/redo.
//!
//! # Invariants
//! - A failed execute/undo/redo leaves both stacks as they were.
//! - Any successful execute discards the whole redo stack; there is no
//!   branching history.

use crate::command::{Command, CommandError, CommandResult};
use crate::store::NodeStore;
use log::{info, warn};

/// Undo and redo stacks, most recent command last.
#[derive(Debug, Default)]
pub struct CommandManager {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `command` and records it for undo.
    ///
    /// # Errors
    /// - Returns the command's error; the command is dropped and history is
    ///   unchanged.
    pub fn execute(&mut self, store: &mut NodeStore, mut command: Command) -> CommandResult<()> {
        match command.execute(store) {
            Ok(()) => {
                info!(
                    "event=command_execute module=history status=ok kind={} discarded_redo={}",
                    command.name(),
                    self.redo_stack.len()
                );
                self.redo_stack.clear();
                self.undo_stack.push(command);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=command_execute module=history status=error kind={} error={}",
                    command.name(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Reverses the most recent command.
    ///
    /// # Errors
    /// - `EmptyCommand` when there is nothing to undo.
    /// - The command's error; it then stays on the undo stack.
    pub fn undo(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        let mut command = self.undo_stack.pop().ok_or(CommandError::EmptyCommand)?;
        match command.unexecute(store) {
            Ok(()) => {
                info!(
                    "event=command_undo module=history status=ok kind={}",
                    command.name()
                );
                self.redo_stack.push(command);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=command_undo module=history status=error kind={} error={}",
                    command.name(),
                    err
                );
                self.undo_stack.push(command);
                Err(err)
            }
        }
    }

    /// Re-applies the most recently undone command.
    ///
    /// # Errors
    /// - `EmptyCommand` when there is nothing to redo.
    /// - The command's error; it then stays on the redo stack.
    pub fn redo(&mut self, store: &mut NodeStore) -> CommandResult<()> {
        let mut command = self.redo_stack.pop().ok_or(CommandError::EmptyCommand)?;
        match command.execute(store) {
            Ok(()) => {
                info!(
                    "event=command_redo module=history status=ok kind={}",
                    command.name()
                );
                self.undo_stack.push(command);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=command_redo module=history status=error kind={} error={}",
                    command.name(),
                    err
                );
                self.redo_stack.push(command);
                Err(err)
            }
        }
    }

    /// Most recently executed (or redone) command.
    pub fn last_executed(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
