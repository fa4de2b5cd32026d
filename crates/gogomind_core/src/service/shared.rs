//! Single-writer access to one mind map from several callers.
//!
//! # Invariants
//! - Every command, save and load runs under one exclusive lock.
//! - Lock poisoning is reported as `MindMapError::Poisoned`, never a panic.

use super::mind_map::{MindMap, MindMapError, MindMapResult};
use std::sync::{Arc, Mutex};

/// Cloneable handle serializing all access to a `MindMap`.
#[derive(Debug, Clone, Default)]
pub struct SharedMindMap {
    inner: Arc<Mutex<MindMap>>,
}

impl SharedMindMap {
    pub fn new(map: MindMap) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    /// Runs `f` with exclusive access to the map.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut MindMap) -> MindMapResult<T>,
    ) -> MindMapResult<T> {
        let mut guard = self.inner.lock().map_err(|_| MindMapError::Poisoned)?;
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedMindMap;
    use std::thread;

    #[test]
    fn concurrent_adds_get_distinct_ids() {
        let shared = SharedMindMap::default();
        let root_id = shared
            .with(|map| map.create_or_get_root("Root").map(|root| root.id()))
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|index| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .with(|map| map.add(root_id, format!("child {index}")))
                        .unwrap()
                })
            })
            .collect();
        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();

        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(shared.with(|map| Ok(map.node_count())).unwrap(), 5);
    }
}
