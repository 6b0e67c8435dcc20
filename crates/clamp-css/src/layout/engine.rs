//! The measurement interface the clamp consumes.

use clamp_dom::{DomTree, NodeId};

/// Reads of live layout state for an element.
///
/// All methods are pure queries against the current tree: callers mutate the
/// tree between calls and expect the next answer to reflect the change.
pub trait LayoutEngine {
    /// [CSSOM § 9 getComputedStyle()](https://drafts.csswg.org/cssom/#dom-window-getcomputedstyle)
    ///
    /// The resolved value of `property` on `element`, serialized, or `None`
    /// when the engine does not know the property.
    fn computed_style(&self, tree: &DomTree, element: NodeId, property: &str) -> Option<String>;

    /// [CSSOM View § 5 scrollHeight](https://drafts.csswg.org/cssom-view/#dom-element-scrollheight)
    ///
    /// Height of the element's content, including content that overflows.
    fn scroll_height(&self, tree: &DomTree, element: NodeId) -> f32;

    /// [CSSOM View § 7 offsetHeight](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetheight)
    ///
    /// Height of the element's border box.
    fn offset_height(&self, tree: &DomTree, element: NodeId) -> f32;

    /// [CSSOM View § 5 clientHeight](https://drafts.csswg.org/cssom-view/#dom-element-clientheight)
    ///
    /// "If the element has no associated CSS layout box or if the CSS layout
    /// box is inline, return zero."
    fn client_height(&self, tree: &DomTree, element: NodeId) -> f32;

    /// Whether `-webkit-line-clamp` takes effect when written to an
    /// element's style.
    fn supports_native_clamp(&self) -> bool {
        false
    }
}
