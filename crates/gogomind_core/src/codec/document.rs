//! Document file I/O.
//!
//! # Responsibility
//! - Write the whole live relation to a file on every save.
//! - Read a file into a staged store; callers commit it only on success.
//!
//! # Invariants
//! - Every save rewrites the full document; there are no incremental updates.
//! - A failed load never touches the caller's current store.

use super::{decode_document, deserialize, encode_document, serialize, CodecError, CodecResult};
use crate::store::NodeStore;
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Writes the live nodes of `store` to `path`.
///
/// Returns the number of records written.
///
/// # Side effects
/// - Replaces the file at `path`.
/// - Emits `document_save` logging events with duration and status.
pub fn save_document(path: impl AsRef<Path>, store: &NodeStore) -> CodecResult<usize> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=document_save module=codec status=start");

    let records = serialize(store);
    let result = encode_document(&records).and_then(|bytes| {
        std::fs::write(path, bytes).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    match result {
        Ok(()) => {
            info!(
                "event=document_save module=codec status=ok records={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(records.len())
        }
        Err(err) => {
            error!(
                "event=document_save module=codec status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Reads and rebuilds a store from the document at `path`.
///
/// # Side effects
/// - Emits `document_load` logging events with duration and status.
pub fn load_document(path: impl AsRef<Path>) -> CodecResult<NodeStore> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=document_load module=codec status=start");

    let result = std::fs::read(path)
        .map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|bytes| decode_document(&bytes))
        .and_then(|records| deserialize(&records));

    match result {
        Ok(store) => {
            info!(
                "event=document_load module=codec status=ok records={} duration_ms={}",
                store.node_count(),
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=document_load module=codec status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
