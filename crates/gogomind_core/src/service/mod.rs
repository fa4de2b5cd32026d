//! Collaborator-facing mind map services.
//!
//! # Responsibility
//! - Pair one node store with its command history behind use-case APIs.
//! - Keep shells decoupled from commands, codec and store internals.

pub mod mind_map;
pub mod shared;
