//! A scripted layout engine for driving the truncation engine without
//! real line breaking.

#![allow(dead_code)]

use clamp_css::LayoutEngine;
use clamp_dom::{DomTree, NodeId};

/// Heights are `ceil(chars / chars_per_line) * line_height`, counted over
/// the element's text content, or a fixed height when one is set.
pub struct ScriptedLayout {
    pub line_height: String,
    pub line_height_px: f32,
    pub chars_per_line: usize,
    pub fixed_height: Option<f32>,
    pub native: bool,
}

impl ScriptedLayout {
    pub fn new(chars_per_line: usize, line_height_px: f32) -> Self {
        Self {
            line_height: format!("{line_height_px}px"),
            line_height_px,
            chars_per_line,
            fixed_height: None,
            native: false,
        }
    }

    pub fn always(height: f32, line_height_px: f32) -> Self {
        Self {
            fixed_height: Some(height),
            ..Self::new(1, line_height_px)
        }
    }

    pub fn lines_for(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_line)
    }
}

impl LayoutEngine for ScriptedLayout {
    fn computed_style(&self, tree: &DomTree, element: NodeId, property: &str) -> Option<String> {
        tree.as_element(element)?;
        match property {
            "line-height" => Some(self.line_height.clone()),
            "font-size" => Some("16px".to_string()),
            _ => None,
        }
    }

    fn scroll_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        self.fixed_height.unwrap_or_else(|| {
            self.lines_for(&tree.text_content(element)) as f32 * self.line_height_px
        })
    }

    fn offset_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        self.scroll_height(tree, element)
    }

    fn client_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        self.scroll_height(tree, element)
    }

    fn supports_native_clamp(&self) -> bool {
        self.native
    }
}

/// A document with a single `<p>` holding `text` as one text node.
pub fn paragraph(text: &str) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let root = tree.root();
    let p = tree.alloc_element("p");
    tree.append_child(root, p);
    let text = tree.alloc_text(text);
    tree.append_child(p, text);
    (tree, p)
}
