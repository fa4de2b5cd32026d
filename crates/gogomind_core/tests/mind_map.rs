use gogomind_core::{
    MindMap, MindMapError, NodeKind, SharedMindMap, StoreError, SubtreeClone,
};

fn setup() -> MindMap {
    let mut map = MindMap::new();
    map.create_or_get_root("Root").unwrap();
    map.add(0, "A").unwrap();
    map.add(1, "B").unwrap();
    map
}

#[test]
fn create_or_get_root_is_idempotent() {
    let mut map = MindMap::new();
    let root = map.create_or_get_root("Computer").unwrap();
    assert_eq!(root.id(), 0);
    assert_eq!(root.kind(), NodeKind::Root);

    let again = map.create_or_get_root("Ignored").unwrap();
    assert_eq!(again.id(), 0);
    assert_eq!(again.description, "Computer");
    assert_eq!(map.undo_depth(), 1);
}

#[test]
fn add_returns_new_ids_and_info_renders_nodes() {
    let mut map = setup();
    let id = map.add(0, "C").unwrap();
    assert_eq!(id, 3);
    assert_eq!(map.get_node(id).unwrap().info(), "C <Node> ID:3");
    assert_eq!(map.root().unwrap().info(), "Root <Root> ID:0");
    assert_eq!(map.children(0).unwrap(), vec![1, 3]);
}

#[test]
fn add_on_empty_map_creates_root() {
    let mut map = MindMap::new();
    let id = map.add(42, "Root").unwrap();
    assert_eq!(id, 0);
    assert!(map.root().unwrap().is_root());
}

#[test]
fn cut_and_paste_moves_subtree_with_fresh_ids() {
    let mut map = setup();
    let other = map.add(0, "Other").unwrap();

    let clip = map.cut(1).unwrap();
    assert_eq!(clip.node_count(), 2);
    assert!(map.get_node(1).is_none());

    let ids = map.paste(other, clip).unwrap();
    assert_eq!(ids, vec![4, 5]);
    assert_eq!(
        map.current_layout(),
        vec![vec![(0, -1)], vec![(3, 0)], vec![(4, 3)], vec![(5, 4)]]
    );

    map.undo().unwrap();
    map.undo().unwrap();
    assert_eq!(
        map.current_layout(),
        vec![vec![(0, -1)], vec![(1, 0), (3, 0)], vec![(2, 1)]]
    );
}

#[test]
fn copied_subtree_pastes_repeatedly() {
    let mut map = setup();
    let clip = map.copy(1).unwrap();

    let first = map.paste(0, clip.clone()).unwrap();
    let second = map.paste(0, clip).unwrap();
    assert_eq!(first, vec![3, 4]);
    assert_eq!(second, vec![5, 6]);
    assert_eq!(map.get_node(6).unwrap().description, "B");
    assert_eq!(map.children(0).unwrap(), vec![1, 3, 5]);
}

#[test]
fn paste_of_built_clone_preserves_sibling_order() {
    let mut map = setup();
    let clip = SubtreeClone::new("X")
        .with_child(SubtreeClone::new("Y").with_child(SubtreeClone::new("Y1")))
        .with_child(SubtreeClone::new("Z"));

    let ids = map.paste(2, clip).unwrap();
    assert_eq!(ids, vec![3, 4, 5, 6]);
    assert_eq!(map.children(3).unwrap(), vec![4, 6]);
    assert_eq!(map.get_node(6).unwrap().description, "Z");
}

#[test]
fn errors_map_to_facade_variants() {
    let mut map = setup();
    assert!(matches!(
        map.delete(99).unwrap_err(),
        MindMapError::Store(StoreError::NodeNotFound(99))
    ));
    assert!(matches!(
        map.add(99, "X").unwrap_err(),
        MindMapError::Store(StoreError::ParentNotFound(99))
    ));
    assert!(matches!(
        map.copy(99).unwrap_err(),
        MindMapError::Store(StoreError::NodeNotFound(99))
    ));

    let mut empty = MindMap::new();
    assert!(matches!(empty.undo().unwrap_err(), MindMapError::EmptyCommand));
    assert!(matches!(empty.redo().unwrap_err(), MindMapError::EmptyCommand));
}

#[test]
fn deleting_root_empties_map_until_undo() {
    let mut map = setup();
    map.delete(0).unwrap();
    assert!(map.is_empty());
    assert!(map.current_layout().is_empty());

    map.undo().unwrap();
    assert_eq!(map.node_count(), 3);
    assert_eq!(map.next_id(), 3);
}

#[test]
fn document_bytes_round_trip_through_another_map() {
    let mut map = setup();
    map.edit(2, "Renamed").unwrap();
    let bytes = map.to_document_bytes().unwrap();

    let mut copy = MindMap::new();
    copy.load_document_bytes(&bytes).unwrap();
    assert_eq!(copy.snapshot(), map.snapshot());
    assert_eq!(copy.get_node(2).unwrap().description, "Renamed");

    let err = copy.load_document_bytes(b"[]x").unwrap_err();
    assert!(matches!(err, MindMapError::Persistence(_)));
    assert_eq!(copy.node_count(), 3);
}

#[test]
fn shared_handle_serializes_edits() {
    let shared = SharedMindMap::new(setup());
    let handle = shared.clone();

    let id = handle.with(|map| map.add(2, "C")).unwrap();
    let description = shared
        .with(|map| Ok(map.get_node(id).map(|node| node.description.clone())))
        .unwrap();
    assert_eq!(description.as_deref(), Some("C"));
}
