//! Node id allocator.
//!
//! # Invariants
//! - `next` is the id the next allocation returns.
//! - `next` never drops below `FIRST_NODE_ID`.
//! - `next` saturates at `NodeId::MAX`; loading rejects an id of
//!   `NodeId::MAX` because the counter could not resume past it.

use crate::model::node::{NodeId, FIRST_NODE_ID};

/// Monotonic id counter embedded in the node store.
///
/// Undo of an allocation rewinds the counter so ids stay dense and the
/// counter state is fully recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: NodeId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next: FIRST_NODE_ID,
        }
    }
}

impl IdAllocator {
    /// Hands out the next id and advances the counter.
    pub fn allocate(&mut self) -> NodeId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Id the next allocation will return.
    pub fn peek(&self) -> NodeId {
        self.next
    }

    /// Gives back the last `count` allocations.
    pub fn rewind(&mut self, count: usize) {
        let count = NodeId::try_from(count).unwrap_or(NodeId::MAX);
        self.next = self.next.saturating_sub(count).max(FIRST_NODE_ID);
    }

    /// Re-consumes `count` ids without handing them out (redo path).
    pub fn advance(&mut self, count: usize) {
        let count = NodeId::try_from(count).unwrap_or(NodeId::MAX);
        self.next = self.next.saturating_add(count);
    }

    /// Positions the counter so that `next` is handed out next.
    pub fn reset_to(&mut self, next: NodeId) {
        self.next = next.max(FIRST_NODE_ID);
    }

    pub fn reset(&mut self) {
        self.next = FIRST_NODE_ID;
    }
}
