//! Core document model for GogoMind mind maps.
//! This crate is the single source of truth for tree and history invariants.

pub mod codec;
pub mod command;
pub mod history;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use codec::{
    decode_document, deserialize, encode_document, load_document, save_document, serialize,
    CodecError, CodecResult, NodeRecord, DOCUMENT_FILE_EXTENSION,
};
pub use command::{
    AddCommand, Command, CommandError, CommandResult, DeleteCommand, EditCommand, PasteCommand,
};
pub use history::CommandManager;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::node::{Node, NodeId, NodeKind, SubtreeClone, FIRST_NODE_ID, ROOT_PARENT_ID};
pub use service::mind_map::{MindMap, MindMapError, MindMapResult};
pub use service::shared::SharedMindMap;
pub use store::{IdAllocator, Layout, NodeStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
