//! Mind map domain model.
//!
//! # Responsibility
//! - Define the node shape shared by store, commands and codec.
//! - Keep Root/Regular policy checks in one place as plain functions.
//!
//! # Invariants
//! - Every node is identified by a stable integer `NodeId`.
//! - Deletion is a soft-delete flag; node storage is never freed while the
//!   owning store is alive.

pub mod node;
