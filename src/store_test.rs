#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{CircleAttrs, ElementKind, RectAttrs};

// =============================================================
// Helpers
// =============================================================

fn named(id: &str) -> Element {
    let mut element = Element::new(ElementKind::Rect(RectAttrs {
        width: 100.0,
        height: 100.0,
        fill: "#3b82f6".to_owned(),
        stroke: None,
        stroke_width: 0.0,
    }));
    element.id = id.to_owned();
    element
}

fn store_with(ids: &[&str]) -> ElementStore {
    let mut store = ElementStore::new();
    for id in ids {
        store.push(named(id));
    }
    store
}

fn order(store: &ElementStore) -> Vec<&str> {
    store.elements().iter().map(|e| e.id.as_str()).collect()
}

// =============================================================
// Basic collection ops
// =============================================================

#[test]
fn push_appends_on_top() {
    let store = store_with(&["a", "b", "c"]);
    assert_eq!(order(&store), ["a", "b", "c"]);
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
}

#[test]
fn get_and_contains() {
    let store = store_with(&["a", "b"]);
    assert!(store.contains("a"));
    assert!(!store.contains("ghost"));
    assert_eq!(store.get("b").map(|e| e.id.as_str()), Some("b"));
    assert!(store.get("ghost").is_none());
}

#[test]
fn update_applies_patch() {
    let mut store = store_with(&["a"]);
    let patch = ElementPatch { x: Some(42.0), ..ElementPatch::default() };
    assert!(store.update("a", &patch));
    assert_eq!(store.get("a").map(|e| e.x), Some(42.0));
}

#[test]
fn update_missing_id_is_noop() {
    let mut store = store_with(&["a"]);
    let before = store.snapshot();
    let patch = ElementPatch { x: Some(42.0), ..ElementPatch::default() };
    assert!(!store.update("ghost", &patch));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn remove_returns_the_element() {
    let mut store = store_with(&["a", "b"]);
    let removed = store.remove("a");
    assert_eq!(removed.map(|e| e.id), Some("a".to_owned()));
    assert_eq!(order(&store), ["b"]);
    assert!(store.remove("a").is_none());
}

#[test]
fn replace_all_swaps_the_collection() {
    let mut store = store_with(&["a", "b"]);
    store.replace_all(vec![named("z")]);
    assert_eq!(order(&store), ["z"]);
}

// =============================================================
// Duplicate
// =============================================================

#[test]
fn duplicate_offsets_and_mints_fresh_id() {
    let mut store = ElementStore::new();
    store.push(named("a").at(10.0, 20.0));
    let new_id = store.duplicate("a").unwrap();
    assert_ne!(new_id, "a");
    assert_eq!(store.len(), 2);

    let copy = store.get(&new_id).unwrap();
    assert_eq!(copy.x, 25.0);
    assert_eq!(copy.y, 35.0);
    // copy lands on top, original untouched
    assert_eq!(store.elements()[1].id, new_id);
    let original = store.get("a").unwrap();
    assert_eq!(original.x, 10.0);
    assert_eq!(original.y, 20.0);
}

#[test]
fn duplicate_missing_id_is_noop() {
    let mut store = store_with(&["a"]);
    assert!(store.duplicate("ghost").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn duplicate_copies_kind_fields() {
    let mut store = ElementStore::new();
    let mut circle =
        Element::new(ElementKind::Circle(CircleAttrs { radius: 77.0, fill: "#abc".to_owned() }));
    circle.id = "c".to_owned();
    store.push(circle);
    let new_id = store.duplicate("c").unwrap();
    let ElementKind::Circle(attrs) = &store.get(&new_id).unwrap().kind else {
        panic!("expected circle kind");
    };
    assert_eq!(attrs.radius, 77.0);
}

// =============================================================
// Z-order
// =============================================================

#[test]
fn bring_forward_swaps_one_step() {
    let mut store = store_with(&["a", "b", "c"]);
    assert!(store.bring_forward("a"));
    assert_eq!(order(&store), ["b", "a", "c"]);
}

#[test]
fn bring_forward_at_top_is_noop() {
    let mut store = store_with(&["a", "b"]);
    assert!(!store.bring_forward("b"));
    assert_eq!(order(&store), ["a", "b"]);
}

#[test]
fn send_backward_swaps_one_step() {
    let mut store = store_with(&["a", "b", "c"]);
    assert!(store.send_backward("c"));
    assert_eq!(order(&store), ["a", "c", "b"]);
}

#[test]
fn send_backward_at_bottom_is_noop() {
    let mut store = store_with(&["a", "b"]);
    assert!(!store.send_backward("a"));
    assert_eq!(order(&store), ["a", "b"]);
}

#[test]
fn bring_to_front_moves_to_end() {
    let mut store = store_with(&["a", "b", "c"]);
    assert!(store.bring_to_front("a"));
    assert_eq!(order(&store), ["b", "c", "a"]);
    // already on top
    assert!(!store.bring_to_front("a"));
}

#[test]
fn send_to_back_moves_to_start() {
    let mut store = store_with(&["a", "b", "c"]);
    assert!(store.send_to_back("c"));
    assert_eq!(order(&store), ["c", "a", "b"]);
    // already at the bottom
    assert!(!store.send_to_back("c"));
}

#[test]
fn reorder_missing_id_is_noop() {
    let mut store = store_with(&["a", "b"]);
    assert!(!store.bring_forward("ghost"));
    assert!(!store.send_backward("ghost"));
    assert!(!store.bring_to_front("ghost"));
    assert!(!store.send_to_back("ghost"));
    assert_eq!(order(&store), ["a", "b"]);
}

#[test]
fn single_element_reorders_are_noops() {
    let mut store = store_with(&["a"]);
    assert!(!store.bring_forward("a"));
    assert!(!store.send_backward("a"));
    assert!(!store.bring_to_front("a"));
    assert!(!store.send_to_back("a"));
}
