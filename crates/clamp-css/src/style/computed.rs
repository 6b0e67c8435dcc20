//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! "The computed value is the result of resolving the specified value as
//! defined in the 'Computed Value' line of the property definition table,
//! generally absolutizing it in preparation for inheritance."

use serde::Serialize;

use clamp_common::warning::warn_once;
use clamp_dom::{DomTree, ElementData, NodeId};

use super::declaration::parse_declarations;
use super::values::{
    DEFAULT_FONT_SIZE_PX, DisplayValue, LengthValue, LineHeight, default_display_for_element,
};

/// The properties the flow layout reads, computed for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
    /// Inherited. Always absolute.
    pub font_size: f32,
    /// [§ 10.8 line-height](https://www.w3.org/TR/CSS2/visudet.html#propdef-line-height)
    /// Inherited.
    pub line_height: LineHeight,
    /// [§ 2 display](https://www.w3.org/TR/css-display-3/#the-display-properties)
    pub display: DisplayValue,
    /// [§ 10.2 width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    /// `None` is `auto`.
    pub width: Option<LengthValue>,
    /// [§ 10.5 height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    /// `None` is `auto`.
    pub height: Option<LengthValue>,
    /// [CSS Overflow 4 § 4.2 line-clamp](https://www.w3.org/TR/css-overflow-4/#webkit-line-clamp)
    /// `None` is `none`.
    pub line_clamp: Option<u32>,
    /// [§ 3 overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    pub overflow_hidden: bool,
}

impl ComputedStyle {
    /// Initial values, as they apply to the root.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE_PX,
            line_height: LineHeight::Normal,
            display: DisplayValue::Inline,
            width: None,
            height: None,
            line_clamp: None,
            overflow_hidden: false,
        }
    }

    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// "The inherited value of a property on an element is the computed value
    /// of the property on the element's parent element."
    ///
    /// Derive the style of `element` from its parent's computed style and
    /// its own `style` attribute.
    #[must_use]
    pub fn cascade(parent: &Self, element: &ElementData) -> Self {
        let mut style = Self {
            font_size: parent.font_size,
            line_height: parent.line_height,
            display: default_display_for_element(&element.tag_name),
            ..Self::initial()
        };

        let Some(attr) = element.attrs.get("style") else {
            return style;
        };
        let declarations = parse_declarations(attr);

        // font-size first: em lengths elsewhere resolve against it.
        for decl in declarations.iter().filter(|d| d.name == "font-size") {
            match LengthValue::parse(&decl.value) {
                // "Percentages: refer to parent element's font size"
                Some(length) => style.font_size = length.to_px(parent.font_size, parent.font_size),
                None => unsupported_value(&decl.name, &decl.value),
            }
        }

        for decl in &declarations {
            let value = decl.value.as_str();
            match decl.name.as_str() {
                "font-size" => {}
                "line-height" => match LineHeight::parse(value, style.font_size) {
                    Some(line_height) => style.line_height = line_height,
                    None => unsupported_value(&decl.name, value),
                },
                "display" => match value.parse::<DisplayValue>() {
                    Ok(display) => style.display = display,
                    Err(_) => unsupported_value(&decl.name, value),
                },
                "width" | "height" => {
                    let length = if value.eq_ignore_ascii_case("auto") {
                        None
                    } else if let Some(length) = LengthValue::parse(value) {
                        Some(length)
                    } else {
                        unsupported_value(&decl.name, value);
                        continue;
                    };
                    if decl.name == "width" {
                        style.width = length;
                    } else {
                        style.height = length;
                    }
                }
                "-webkit-line-clamp" | "line-clamp" => {
                    if value.eq_ignore_ascii_case("none") {
                        style.line_clamp = None;
                    } else if let Ok(lines) = value.parse::<u32>() {
                        style.line_clamp = (lines > 0).then_some(lines);
                    } else {
                        unsupported_value(&decl.name, value);
                    }
                }
                "overflow" => style.overflow_hidden = value.eq_ignore_ascii_case("hidden"),
                // Written by the native clamp path; no effect on measurement.
                "text-overflow" | "-webkit-box-orient" => {}
                other => warn_once("CSS", &format!("unsupported property '{other}'")),
            }
        }

        style
    }

    /// Compute the style of any node by cascading from the root down.
    ///
    /// Text nodes get their parent element's style.
    #[must_use]
    pub fn compute(tree: &DomTree, node: NodeId) -> Self {
        let mut chain: Vec<NodeId> = tree.ancestors(node).collect();
        chain.reverse();
        chain.push(node);

        let mut style = Self::initial();
        for id in chain {
            if let Some(element) = tree.as_element(id) {
                style = Self::cascade(&style, element);
            }
        }
        style
    }

    /// The used line height in pixels.
    #[must_use]
    pub fn line_height_px(&self) -> f32 {
        self.line_height.to_px(self.font_size)
    }

    /// [CSSOM § 9 Resolved values](https://drafts.csswg.org/cssom/#resolved-values)
    ///
    /// Serialize one property the way `getComputedStyle()` would. `width`
    /// and `height` percentages resolve against `percent_base`.
    ///
    /// Returns `None` for properties this style does not track.
    #[must_use]
    pub fn property_value(&self, property: &str, percent_base: f32) -> Option<String> {
        let value = match property.to_ascii_lowercase().as_str() {
            "font-size" => format!("{}px", self.font_size),
            // "normal" is kept; numbers and lengths resolve to pixels.
            "line-height" => match self.line_height {
                LineHeight::Normal => "normal".to_string(),
                other => format!("{}px", other.to_px(self.font_size)),
            },
            "display" => self.display.to_string(),
            "width" => resolved_length(self.width, self.font_size, percent_base),
            "height" => resolved_length(self.height, self.font_size, percent_base),
            "-webkit-line-clamp" | "line-clamp" => self
                .line_clamp
                .map_or_else(|| "none".to_string(), |n| n.to_string()),
            "overflow" => (if self.overflow_hidden { "hidden" } else { "visible" }).to_string(),
            _ => return None,
        };
        Some(value)
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::initial()
    }
}

fn resolved_length(length: Option<LengthValue>, font_size: f32, percent_base: f32) -> String {
    length.map_or_else(
        || "auto".to_string(),
        |l| format!("{}px", l.to_px(font_size, percent_base)),
    )
}

fn unsupported_value(property: &str, value: &str) {
    warn_once("CSS", &format!("unsupported value '{value}' for '{property}'"));
}
