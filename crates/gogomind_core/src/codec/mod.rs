//! Persistence codec for mind map documents.
//!
//! # Responsibility
//! - Convert the live node set to a flat `NodeRecord` relation and back.
//! - Encode/decode the relation as the document byte payload.
//! - Read and write whole documents on disk.
//!
//! # Invariants
//! - Only live nodes are serialized; undo/redo shadow state never is.
//! - Decoding either yields a fully valid store or an error, never a
//!   partially rebuilt store.
//! - Record order in a document is insignificant for decoding.

use crate::model::node::{Node, NodeId, NodeKind, FIRST_NODE_ID, ROOT_PARENT_ID};
use crate::store::NodeStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod document;

pub use document::{load_document, save_document};

/// File extension collaborators should offer in file choosers.
pub const DOCUMENT_FILE_EXTENSION: &str = "ggm";

/// Result type used by codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Persistence failures from encoding, decoding or document I/O.
#[derive(Debug)]
pub enum CodecError {
    /// Reading or writing the document file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Payload is not a valid JSON record array.
    Json(serde_json::Error),
    /// Records parse but do not describe one valid tree.
    InvalidData(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "document i/o failed at `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "malformed document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid document data: {message}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One persisted node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub description: String,
    /// `ROOT_PARENT_ID` marks the Root record.
    pub parent_id: NodeId,
}

impl NodeRecord {
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// Flattens the live tree into records, parents before children.
pub fn serialize(store: &NodeStore) -> Vec<NodeRecord> {
    store.snapshot()
}

/// Rebuilds a store from records.
///
/// Pass one creates every node with its persisted id; pass two wires each
/// non-Root record to its parent in record order. The allocator resumes one
/// past the highest id.
///
/// # Errors
/// - `InvalidData` for negative or duplicate ids, a missing or repeated Root,
///   an unknown parent id, records unreachable from the Root, or an id so
///   large the allocator could not resume past it.
pub fn deserialize(records: &[NodeRecord]) -> CodecResult<NodeStore> {
    let mut nodes = BTreeMap::new();
    let mut root = None;

    for record in records {
        if record.id < FIRST_NODE_ID {
            return Err(CodecError::InvalidData(format!(
                "invalid node id `{}`",
                record.id
            )));
        }
        let kind = if record.is_root() {
            if let Some(existing) = root {
                return Err(CodecError::InvalidData(format!(
                    "multiple root records: {existing} and {}",
                    record.id
                )));
            }
            root = Some(record.id);
            NodeKind::Root
        } else {
            NodeKind::Regular
        };

        let node = Node::new(record.id, kind, record.description.clone());
        if nodes.insert(record.id, node).is_some() {
            return Err(CodecError::InvalidData(format!(
                "duplicate node id `{}`",
                record.id
            )));
        }
    }

    if root.is_none() && !records.is_empty() {
        return Err(CodecError::InvalidData("missing root record".to_string()));
    }

    for record in records.iter().filter(|record| !record.is_root()) {
        let parent = nodes.get_mut(&record.parent_id).ok_or_else(|| {
            CodecError::InvalidData(format!(
                "node `{}` references unknown parent `{}`",
                record.id, record.parent_id
            ))
        })?;
        parent.children.push(record.id);
        if let Some(node) = nodes.get_mut(&record.id) {
            node.parent = Some(record.parent_id);
        }
    }

    let next_id = match nodes.keys().next_back() {
        Some(max_id) => max_id.checked_add(1).ok_or_else(|| {
            CodecError::InvalidData(format!("node id `{max_id}` leaves no id to allocate"))
        })?,
        None => FIRST_NODE_ID,
    };

    let store = NodeStore::from_loaded(root, nodes, next_id);
    let reachable = store.node_count();
    if reachable != records.len() {
        return Err(CodecError::InvalidData(format!(
            "{} record(s) are not reachable from the root",
            records.len() - reachable
        )));
    }
    Ok(store)
}

/// Encodes records as the document byte payload (pretty JSON array).
pub fn encode_document(records: &[NodeRecord]) -> CodecResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Decodes a document byte payload into records.
pub fn decode_document(bytes: &[u8]) -> CodecResult<Vec<NodeRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}
