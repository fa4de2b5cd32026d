use gogomind_core::{
    deserialize, load_document, save_document, serialize, CodecError, MindMap, MindMapError,
    NodeRecord, NodeStore,
};
use tempfile::TempDir;

fn record(id: i64, description: &str, parent_id: i64) -> NodeRecord {
    NodeRecord {
        id,
        description: description.to_string(),
        parent_id,
    }
}

fn sample_map() -> MindMap {
    let mut map = MindMap::new();
    map.create_or_get_root("Computer").unwrap();
    let os = map.add(0, "OS").unwrap();
    map.add(os, "Linux").unwrap();
    map.add(os, "Windows").unwrap();
    map.add(0, "Hardware").unwrap();
    map
}

#[test]
fn save_then_load_reproduces_live_tree() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("computer.ggm");
    let map = sample_map();

    assert_eq!(map.save(&path).unwrap(), 5);

    let mut loaded = MindMap::new();
    loaded.load(&path).unwrap();
    assert_eq!(loaded.snapshot(), map.snapshot());
    assert_eq!(loaded.current_layout(), map.current_layout());
    assert_eq!(loaded.next_id(), 5);
}

#[test]
fn serialize_of_deserialize_is_identity() {
    let records = vec![
        record(0, "Root", -1),
        record(1, "A", 0),
        record(2, "B", 0),
        record(3, "C", 1),
    ];
    let store = deserialize(&records).unwrap();
    assert_eq!(serialize(&store), records);
}

#[test]
fn record_order_does_not_matter_for_decoding() {
    let records = vec![
        record(3, "C", 1),
        record(1, "A", 0),
        record(0, "Root", -1),
    ];
    let store = deserialize(&records).unwrap();
    assert_eq!(store.traverse(), vec![vec![(0, -1)], vec![(1, 0)], vec![(3, 1)]]);
}

#[test]
fn allocator_resumes_past_highest_loaded_id() {
    let records = vec![record(0, "Root", -1), record(5, "A", 0), record(7, "B", 5)];
    let mut store = deserialize(&records).unwrap();
    assert_eq!(store.next_id(), 8);
    assert_eq!(store.create("C").id(), 8);
}

#[test]
fn empty_document_loads_as_empty_store() {
    let store = deserialize(&[]).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 0);
}

#[test]
fn invalid_record_sets_are_rejected() {
    let cases = vec![
        vec![record(1, "A", 0)],
        vec![record(0, "Root", -1), record(1, "Root2", -1)],
        vec![record(0, "Root", -1), record(1, "A", 0), record(1, "B", 0)],
        vec![record(0, "Root", -1), record(1, "A", 9)],
        vec![record(0, "Root", -1), record(-4, "A", 0)],
        vec![record(0, "Root", -1), record(1, "A", 2), record(2, "B", 1)],
    ];
    for records in cases {
        let err = deserialize(&records).unwrap_err();
        assert!(matches!(err, CodecError::InvalidData(_)), "{records:?}");
    }
}

#[test]
fn document_uses_flat_record_fields() {
    let map = sample_map();
    let bytes = map.to_document_bytes().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["id"], 0);
    assert_eq!(records[0]["description"], "Computer");
    assert_eq!(records[0]["parent_id"], -1);
    assert_eq!(records[1]["parent_id"], 0);
}

#[test]
fn soft_deleted_nodes_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pruned.ggm");
    let mut map = sample_map();
    map.delete(1).unwrap();

    assert_eq!(map.save(&path).unwrap(), 2);
    let store = load_document(&path).unwrap();
    assert!(store.get(1).is_none());
    assert!(store.get(2).is_none());
    assert_eq!(store.traverse(), vec![vec![(0, -1)], vec![(4, 0)]]);
}

#[test]
fn load_clears_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.ggm");
    let mut map = sample_map();
    map.save(&path).unwrap();
    map.edit(0, "Renamed").unwrap();
    assert!(map.can_undo());

    map.load(&path).unwrap();
    assert!(!map.can_undo());
    assert!(!map.can_redo());
    assert_eq!(map.root().unwrap().description, "Computer");
    assert!(matches!(map.undo().unwrap_err(), MindMapError::EmptyCommand));
}

#[test]
fn failed_load_keeps_current_map_and_history() {
    let dir = TempDir::new().unwrap();
    let garbage = dir.path().join("garbage.ggm");
    std::fs::write(&garbage, b"{ not a record array").unwrap();
    let mut map = sample_map();
    let before = map.snapshot();
    let depth = map.undo_depth();

    let err = map.load(&garbage).unwrap_err();
    assert!(matches!(err, MindMapError::Persistence(CodecError::Json(_))));

    let err = map.load(dir.path().join("missing.ggm")).unwrap_err();
    assert!(matches!(
        err,
        MindMapError::Persistence(CodecError::Io { .. })
    ));

    assert_eq!(map.snapshot(), before);
    assert_eq!(map.undo_depth(), depth);
    map.undo().unwrap();
    assert!(map.get_node(4).is_none());
}

#[test]
fn save_document_writes_a_loadable_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.ggm");
    let mut store = NodeStore::new();
    let root = store.create("Root");
    store.insert(root, None).unwrap();

    assert_eq!(save_document(&path, &store).unwrap(), 1);
    assert_eq!(load_document(&path).unwrap(), store);
}

#[test]
fn load_of_id_at_allocator_limit_fails_without_touching_map() {
    let mut map = sample_map();
    let before = map.snapshot();

    let err = map
        .load_document_bytes(br#"[{"id": 9223372036854775807, "description": "R", "parent_id": -1}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        MindMapError::Persistence(CodecError::InvalidData(_))
    ));
    assert_eq!(map.snapshot(), before);
    assert_eq!(map.next_id(), 5);
}
