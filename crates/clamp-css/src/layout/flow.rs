//! [§ 9.4 Normal flow](https://www.w3.org/TR/CSS2/visuren.html#normal-flow)
//!
//! "Boxes in the normal flow belong to a formatting context, which may be
//! block or inline, but not both simultaneously. Block-level boxes
//! participate in a block formatting context. Inline-level boxes participate
//! in an inline formatting context."
//!
//! A reference [`LayoutEngine`]: block boxes stack vertically, inline content
//! is broken into line boxes by [`InlineLayout`]. Enough to answer height
//! queries for prose; floats, margins, padding and borders are not modelled.

use clamp_dom::{DomTree, NodeId, NodeType};

use super::engine::LayoutEngine;
use super::inline::{ApproximateFontMetrics, FontMetrics, InlineLayout};
use crate::style::{ComputedStyle, DisplayValue, LengthValue};

/// Default width of the initial containing block.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// Line-box layout over the DOM with pluggable font metrics.
#[derive(Debug, Clone)]
pub struct FlowLayout<M: FontMetrics = ApproximateFontMetrics> {
    viewport_width: f32,
    native_line_clamp: bool,
    metrics: M,
}

impl FlowLayout {
    /// A layout with [`ApproximateFontMetrics`] and no native line clamp.
    #[must_use]
    pub const fn new(viewport_width: f32) -> Self {
        Self::with_metrics(viewport_width, ApproximateFontMetrics)
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH)
    }
}

/// Style and widths resolved along an element's ancestor chain.
struct Resolved {
    style: ComputedStyle,
    /// Width available to the element's own content.
    width: f32,
    /// Width of the containing block, the base for percentages.
    containing_width: f32,
}

impl<M: FontMetrics> FlowLayout<M> {
    /// A layout measuring text with `metrics`.
    #[must_use]
    pub const fn with_metrics(viewport_width: f32, metrics: M) -> Self {
        Self {
            viewport_width,
            native_line_clamp: false,
            metrics,
        }
    }

    /// Honor `display: -webkit-box` with `-webkit-line-clamp`, and report
    /// native clamp support.
    #[must_use]
    pub fn with_native_line_clamp(mut self, enabled: bool) -> Self {
        self.native_line_clamp = enabled;
        self
    }

    /// Width of the initial containing block.
    #[must_use]
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// Cascade from the root to `node`, narrowing the available width at
    /// every block-level element with a specified `width`.
    fn resolve(&self, tree: &DomTree, node: NodeId) -> Resolved {
        let mut chain: Vec<NodeId> = tree.ancestors(node).collect();
        chain.reverse();
        chain.push(node);

        let mut style = ComputedStyle::initial();
        let mut width = self.viewport_width;
        let mut containing_width = self.viewport_width;
        for id in chain {
            let Some(element) = tree.as_element(id) else {
                continue;
            };
            style = ComputedStyle::cascade(&style, element);
            containing_width = width;
            width = used_width(&style, width);
        }
        Resolved {
            style,
            width,
            containing_width,
        }
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow when 'overflow' computes to 'visible'](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// "If 'height' is 'auto', the height depends on whether the element has
    /// any block-level children... the height is the distance between the
    /// top content edge and ... the bottom edge of the last line box".
    ///
    /// Content height of `element`'s children laid out in `width`.
    fn content_height(
        &self,
        tree: &DomTree,
        element: NodeId,
        style: &ComputedStyle,
        width: f32,
    ) -> f32 {
        let mut flow = BlockFlow {
            height: 0.0,
            inline: InlineLayout::new(width, 0.0),
            width,
        };
        self.flow_children(tree, element, style, &mut flow);
        flow.flush_inline();
        let height = flow.height;

        // [CSS Overflow 4 § 4.2](https://www.w3.org/TR/css-overflow-4/#webkit-line-clamp)
        //
        // "-webkit-line-clamp ... only has an effect on -webkit-box or
        // -webkit-inline-box elements"
        match style.line_clamp {
            Some(lines) if self.native_line_clamp && style.display == DisplayValue::WebkitBox => {
                height.min(lines as f32 * style.line_height_px())
            }
            _ => height,
        }
    }

    /// Height of a block-level box: its specified height, or its content.
    fn box_height(&self, tree: &DomTree, element: NodeId, style: &ComputedStyle, width: f32) -> f32 {
        specified_height(style).unwrap_or_else(|| self.content_height(tree, element, style, width))
    }

    fn flow_children(
        &self,
        tree: &DomTree,
        parent: NodeId,
        parent_style: &ComputedStyle,
        flow: &mut BlockFlow,
    ) {
        for &child in tree.children(parent) {
            let Some(node) = tree.get(child) else {
                continue;
            };
            match &node.node_type {
                NodeType::Text(text) => {
                    let mut collapsed = collapse_white_space(text);
                    if collapsed.starts_with(' ') && flow.inline.ends_with_space() {
                        collapsed.remove(0);
                    }
                    flow.inline.add_text(
                        &collapsed,
                        parent_style.font_size,
                        parent_style.line_height_px(),
                        &self.metrics,
                    );
                }
                NodeType::Element(data) => {
                    let style = ComputedStyle::cascade(parent_style, data);
                    if style.display == DisplayValue::None {
                        continue;
                    }
                    if data.tag_name == "br" {
                        flow.inline.force_break(style.line_height_px());
                    } else if style.display.is_block_level() {
                        flow.flush_inline();
                        let width = used_width(&style, flow.width);
                        flow.height += self.box_height(tree, child, &style, width);
                    } else {
                        self.flow_children(tree, child, &style, flow);
                    }
                }
                NodeType::Comment(_) | NodeType::Document => {}
            }
        }
    }
}

impl<M: FontMetrics> LayoutEngine for FlowLayout<M> {
    fn computed_style(&self, tree: &DomTree, element: NodeId, property: &str) -> Option<String> {
        if tree.as_element(element).is_none() {
            return None;
        }
        let resolved = self.resolve(tree, element);
        resolved
            .style
            .property_value(property, resolved.containing_width)
    }

    fn scroll_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        let Resolved { style, width, .. } = self.resolve(tree, element);
        if style.display == DisplayValue::None {
            return 0.0;
        }
        let content = self.content_height(tree, element, &style, width);
        content.max(specified_height(&style).unwrap_or(0.0))
    }

    fn offset_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        self.client_height(tree, element)
    }

    fn client_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        let Resolved { style, width, .. } = self.resolve(tree, element);
        if matches!(style.display, DisplayValue::None | DisplayValue::Inline) {
            return 0.0;
        }
        self.box_height(tree, element, &style, width)
    }

    fn supports_native_clamp(&self) -> bool {
        self.native_line_clamp
    }
}

/// Block formatting state while walking one block's children.
struct BlockFlow {
    height: f32,
    inline: InlineLayout,
    width: f32,
}

impl BlockFlow {
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Close the anonymous block holding the pending line boxes.
    fn flush_inline(&mut self) {
        self.inline.finish_line();
        self.height += self.inline.total_height();
        self.inline = InlineLayout::new(self.width, 0.0);
    }
}

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// "If 'width' is set to 'auto', any other 'auto' values become '0' and
/// 'width' follows from the resulting equality." Without margins, that is
/// the containing block's width.
fn used_width(style: &ComputedStyle, containing_width: f32) -> f32 {
    match style.width {
        Some(width) if style.display.is_block_level() => {
            width.to_px(style.font_size, containing_width)
        }
        _ => containing_width,
    }
}

/// Percentage heights against an `auto` containing block compute to `auto`.
fn specified_height(style: &ComputedStyle) -> Option<f32> {
    match style.height? {
        LengthValue::Percent(_) => None,
        length => Some(length.to_px(style.font_size, 0.0)),
    }
}

/// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
///
/// "Any collapsible space immediately following another collapsible space
/// ... is collapsed to have zero advance width." Segment breaks and tabs
/// become spaces first.
fn collapse_white_space(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C') {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}
