//! Tests for the DOM mutations the clamp engine performs in place.

use clamp_dom::{DomTree, NodeId, NodeType};

/// Helper: a `<div>` attached to the document with `count` text children.
fn div_with_texts(tree: &mut DomTree, texts: &[&str]) -> (NodeId, Vec<NodeId>) {
    let div = tree.alloc_element("div");
    tree.append_child(NodeId::ROOT, div);
    let ids = texts
        .iter()
        .map(|t| {
            let id = tree.alloc_text(t);
            tree.append_child(div, id);
            id
        })
        .collect();
    (div, ids)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["only"]);

    tree.remove_child(div, ids[0]);

    assert!(tree.children(div).is_empty());
    assert_eq!(tree.parent(ids[0]), None);
    assert_eq!(tree.as_text(ids[0]), Some("only"));
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a", "b", "c"]);

    tree.remove_child(div, ids[1]);

    assert_eq!(tree.children(div), &[ids[0], ids[2]]);
    assert_eq!(tree.next_sibling(ids[0]), Some(ids[2]));
    assert_eq!(tree.prev_sibling(ids[2]), Some(ids[0]));
    assert_eq!(tree.prev_sibling(ids[1]), None);
    assert_eq!(tree.next_sibling(ids[1]), None);
}

#[test]
fn test_remove_child_of_wrong_parent_is_noop() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a"]);
    let other = tree.alloc_element("p");
    tree.append_child(NodeId::ROOT, other);

    tree.remove_child(other, ids[0]);

    assert_eq!(tree.children(div), &[ids[0]]);
    assert_eq!(tree.parent(ids[0]), Some(div));
}

// ========== insert_before / insert_after ==========

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a", "c"]);
    let b = tree.alloc_text("b");

    tree.insert_before(div, b, ids[1]);

    assert_eq!(tree.children(div), &[ids[0], b, ids[1]]);
    assert_eq!(tree.next_sibling(ids[0]), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(ids[0]));
    assert_eq!(tree.next_sibling(b), Some(ids[1]));
    assert_eq!(tree.prev_sibling(ids[1]), Some(b));
}

#[test]
fn test_insert_after_last_appends() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a", "b"]);
    let c = tree.alloc_text("c");

    tree.insert_after(ids[1], c);

    assert_eq!(tree.children(div), &[ids[0], ids[1], c]);
}

#[test]
fn test_insert_after_moves_attached_node() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a", "b", "c"]);

    // Move "c" between "a" and "b".
    tree.insert_after(ids[0], ids[2]);

    assert_eq!(tree.children(div), &[ids[0], ids[2], ids[1]]);
    assert_eq!(tree.next_sibling(ids[1]), None);
    assert_eq!(tree.prev_sibling(ids[1]), Some(ids[2]));
}

#[test]
fn test_append_child_reparents() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["a", "b"]);
    let span = tree.alloc_element("span");
    tree.append_child(div, span);

    tree.append_child(span, ids[0]);

    assert_eq!(tree.children(div), &[ids[1], span]);
    assert_eq!(tree.children(span), &[ids[0]]);
    assert_eq!(tree.prev_sibling(ids[1]), None);
}

// ========== text ==========

#[test]
fn test_set_text_only_applies_to_character_data() {
    let mut tree = DomTree::new();
    let (div, ids) = div_with_texts(&mut tree, &["before"]);

    assert!(tree.set_text(ids[0], "after"));
    assert!(!tree.set_text(div, "nope"));
    assert_eq!(tree.as_text(ids[0]), Some("after"));

    let comment = tree.alloc(NodeType::Comment(String::new()));
    assert!(tree.set_text(comment, "note"));
}

#[test]
fn test_text_content_concatenates_in_tree_order() {
    let mut tree = DomTree::new();
    let (div, _) = div_with_texts(&mut tree, &["one "]);
    let em = tree.alloc_element("em");
    tree.append_child(div, em);
    let inner = tree.alloc_text("two");
    tree.append_child(em, inner);
    let tail = tree.alloc_text(" three");
    tree.append_child(div, tail);

    assert_eq!(tree.text_content(div), "one two three");
    assert_eq!(
        tree.descendants(div).collect::<Vec<_>>(),
        vec![tree.children(div)[0], em, inner, tail]
    );
}

#[test]
fn test_get_element_by_id() {
    let mut tree = DomTree::new();
    let (div, _) = div_with_texts(&mut tree, &[]);
    let p = tree.alloc_element("p");
    tree.append_child(div, p);
    assert!(tree.set_attribute(p, "id", "target"));

    assert_eq!(tree.get_element_by_id("target"), Some(p));
    assert_eq!(tree.get_element_by_id("missing"), None);
    assert_eq!(tree.first_element(), Some(div));
    assert!(tree.is_descendant_of(p, div));
}
