//! Backwards walk over a container's text.

use clamp_dom::{DomTree, NodeId};

/// A snapshot of the text leaves under a container, in document order,
/// walked from the end.
///
/// Nodes that were detached, emptied or reduced to the truncation marker
/// since the snapshot are skipped. Choosing a node prunes everything after
/// it inside the container, so the chosen node is always the container's
/// last piece of content.
#[derive(Debug, Clone)]
pub struct TextCursor {
    container: NodeId,
    leaves: Vec<NodeId>,
    /// `leaves[..position]` are still ahead of the cursor.
    position: usize,
}

impl TextCursor {
    /// Snapshot the text nodes under `container`.
    #[must_use]
    pub fn new(tree: &DomTree, container: NodeId) -> Self {
        let leaves: Vec<NodeId> = tree
            .descendants(container)
            .filter(|&id| tree.is_text(id))
            .collect();
        let position = leaves.len();
        Self {
            container,
            leaves,
            position,
        }
    }

    /// Text nodes not yet visited.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.position
    }

    /// Move to the previous text node worth truncating and prune what
    /// follows it. Returns `None` once the snapshot is used up.
    pub fn previous(&mut self, tree: &mut DomTree, marker: &str) -> Option<NodeId> {
        while self.position > 0 {
            self.position -= 1;
            let id = self.leaves[self.position];
            if self.is_candidate(tree, id, marker) {
                prune_after(tree, self.container, id);
                return Some(id);
            }
        }
        None
    }

    fn is_candidate(&self, tree: &DomTree, id: NodeId, marker: &str) -> bool {
        if !tree.is_descendant_of(id, self.container) {
            return false;
        }
        tree.as_text(id)
            .is_some_and(|text| !text.trim().is_empty() && text != marker)
    }
}

/// Remove every node that follows `node` in document order inside
/// `container`: its following siblings, then those of each ancestor below
/// `container`. Running it twice changes nothing.
pub fn prune_after(tree: &mut DomTree, container: NodeId, node: NodeId) {
    let mut current = node;
    while current != container {
        let Some(parent) = tree.parent(current) else {
            return;
        };
        while let Some(next) = tree.next_sibling(current) {
            tree.remove_child(parent, next);
        }
        current = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clamp_html::parse_document;

    fn fixture(html: &str) -> (DomTree, NodeId) {
        let (tree, _) = parse_document(html);
        let container = tree.first_element().expect("container");
        (tree, container)
    }

    #[test]
    fn test_walks_text_backwards_through_nesting() {
        let (mut tree, p) = fixture("<p>one <b>two <i>three</i></b></p>");
        let mut cursor = TextCursor::new(&tree, p);
        assert_eq!(cursor.remaining(), 3);

        let mut texts = Vec::new();
        while let Some(id) = cursor.previous(&mut tree, "…") {
            texts.push(tree.as_text(id).unwrap_or_default().to_string());
        }
        assert_eq!(texts, vec!["three", "two ", "one "]);
        assert_eq!(tree.inner_html(p), "one ");
    }

    #[test]
    fn test_skips_and_prunes_empty_and_marker_nodes() {
        let (mut tree, p) = fixture("<p>keep<span>\u{2026}</span> <br><img></p>");
        let mut cursor = TextCursor::new(&tree, p);

        let first = cursor.previous(&mut tree, "\u{2026}").expect("a text node");
        assert_eq!(tree.as_text(first), Some("keep"));
        assert_eq!(tree.inner_html(p), "keep");
        assert_eq!(cursor.previous(&mut tree, "\u{2026}"), None);
    }

    #[test]
    fn test_skips_detached_nodes() {
        let (mut tree, p) = fixture("<p>a<b>b</b></p>");
        let mut cursor = TextCursor::new(&tree, p);
        let b = tree.children(p)[1];
        tree.remove_child(p, b);

        let node = cursor.previous(&mut tree, "…").expect("text a");
        assert_eq!(tree.as_text(node), Some("a"));
    }

    #[test]
    fn test_prune_after_is_idempotent() {
        let (mut tree, div) = fixture("<div><p>x<b>y</b>z</p><p>w</p></div>");
        let p = tree.children(div)[0];
        let x = tree.children(p)[0];

        prune_after(&mut tree, div, x);
        assert_eq!(tree.inner_html(div), "<p>x</p>");
        prune_after(&mut tree, div, x);
        assert_eq!(tree.inner_html(div), "<p>x</p>");
    }
}
