//! Height and line-height queries against a [`LayoutEngine`].
//!
//! Everything here is a pure read: the truncation engine asks again after
//! every cut.

use clamp_common::warning::warn_once;
use clamp_css::{LayoutEngine, style::NORMAL_LINE_HEIGHT_RATIO};
use clamp_dom::{DomTree, NodeId};

/// Read-only measurement facade used by the controller and the engine.
#[derive(Clone, Copy)]
pub struct LayoutOracle<'a> {
    engine: &'a dyn LayoutEngine,
}

impl<'a> LayoutOracle<'a> {
    /// Wrap a layout engine.
    #[must_use]
    pub fn new(engine: &'a dyn LayoutEngine) -> Self {
        Self { engine }
    }

    /// The largest of the scroll, offset and client heights. Inline elements
    /// report zero client and offset heights while their scroll height still
    /// covers the content.
    #[must_use]
    pub fn element_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        self.engine
            .scroll_height(tree, element)
            .max(self.engine.offset_height(tree, element))
            .max(self.engine.client_height(tree, element))
    }

    /// Computed `line-height` as an integer number of pixels. `normal` is
    /// taken as 1.2 times the integer font size.
    #[must_use]
    pub fn line_height(&self, tree: &DomTree, element: NodeId) -> f32 {
        let value = self.style_value(tree, element, "line-height");
        if value == "normal" {
            let font_size = self.style_value(tree, element, "font-size");
            return style_int(&font_size, "font-size") * NORMAL_LINE_HEIGHT_RATIO;
        }
        style_int(&value, "line-height")
    }

    /// How many whole lines fit in `height_override`, or in the element's
    /// current height when the override is absent, zero or not a number.
    #[must_use]
    pub fn max_lines(&self, tree: &DomTree, element: NodeId, height_override: Option<f32>) -> u32 {
        let available = match height_override {
            Some(height) if height != 0.0 && !height.is_nan() => height,
            _ => self.element_height(tree, element),
        };
        let line_height = self.line_height(tree, element);
        if line_height <= 0.0 {
            return 0;
        }
        (available / line_height).floor().max(0.0) as u32
    }

    /// Height taken by `lines` lines.
    #[must_use]
    pub fn max_height(&self, tree: &DomTree, element: NodeId, lines: u32) -> f32 {
        self.line_height(tree, element) * lines as f32
    }

    fn style_value(&self, tree: &DomTree, element: NodeId, property: &str) -> String {
        self.engine
            .computed_style(tree, element, property)
            .unwrap_or_default()
    }
}

/// Read a computed value the way `parseInt` does, reporting values without
/// a leading integer once and reading them as zero.
fn style_int(value: &str, property: &str) -> f32 {
    parse_int(value).map_or_else(
        || {
            warn_once(
                "clamp",
                &format!("cannot read {property} value '{value}' as a number"),
            );
            0.0
        },
        |n| n as f32,
    )
}

/// The leading base-10 integer of `s`, after optional whitespace and sign:
/// `"16px"` is 16, `"19.2px"` is 19, `"px"` is `None`. Values past the
/// range of `i64` saturate.
#[must_use]
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix_semantics() {
        assert_eq!(parse_int("16px"), Some(16));
        assert_eq!(parse_int("19.2px"), Some(19));
        assert_eq!(parse_int("  3em"), Some(3));
        assert_eq!(parse_int("-4"), Some(-4));
        assert_eq!(parse_int("+7px"), Some(7));
        assert_eq!(parse_int("px"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("normal"), None);
    }

    #[test]
    fn test_parse_int_saturates_on_overflow() {
        assert_eq!(parse_int("99999999999999999999px"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
    }
}
