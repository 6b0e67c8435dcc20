//! CSS value types used by the computed style.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;
use strum_macros::{Display, EnumString};

use clamp_common::warning::warn_once;

/// User agent default font size.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// "We recommend a used value for 'normal' between 1.0 and 1.2."
pub const NORMAL_LINE_HEIGHT_RATIO: f32 = 1.2;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px(f32),
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    Percent(f32),
}

impl LengthValue {
    /// Parse a `<length>` or `<percentage>` such as `12px`, `1.5em`, `50%`.
    ///
    /// A unitless `0` is accepted as `0px`. Unknown units are reported once
    /// and rejected.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (number, unit) = split_number(input)?;
        if unit.is_empty() {
            return (number == 0.0).then_some(Self::Px(0.0));
        }
        if unit == "%" {
            return Some(Self::Percent(number));
        }
        if unit.eq_ignore_ascii_case("px") {
            Some(Self::Px(number))
        } else if unit.eq_ignore_ascii_case("em") {
            Some(Self::Em(number))
        } else {
            warn_once("CSS", &format!("unsupported unit '{unit}'"));
            None
        }
    }

    /// Resolve to pixels.
    ///
    /// `font_size` resolves `em`, `percent_base` resolves percentages.
    #[must_use]
    pub fn to_px(&self, font_size: f32, percent_base: f32) -> f32 {
        match self {
            Self::Px(px) => *px,
            Self::Em(em) => em * font_size,
            Self::Percent(pct) => pct * percent_base / 100.0,
        }
    }
}

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// Computed value of `line-height`: "For `<length>` and `<percentage>` the
/// absolute value; otherwise as specified."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LineHeight {
    /// "Tells user agents to set the used value to a 'reasonable' value
    /// based on the font of the element."
    Normal,
    /// "The used value of the property is this number multiplied by the
    /// element's font size."
    Number(f32),
    /// An absolute length, already resolved.
    Px(f32),
}

impl LineHeight {
    /// Parse a specified `line-height`, resolving lengths against the
    /// element's computed `font_size`.
    #[must_use]
    pub fn parse(input: &str, font_size: f32) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("normal") {
            return Some(Self::Normal);
        }
        if let Some((number, "")) = split_number(input) {
            // "Negative values are illegal."
            return (number >= 0.0).then_some(Self::Number(number));
        }
        match LengthValue::parse(input)? {
            LengthValue::Percent(pct) => Some(Self::Px(pct * font_size / 100.0)),
            length => Some(Self::Px(length.to_px(font_size, font_size))),
        }
    }

    /// The used line height in pixels.
    #[must_use]
    pub fn to_px(&self, font_size: f32) -> f32 {
        match self {
            Self::Normal => font_size * NORMAL_LINE_HEIGHT_RATIO,
            Self::Number(n) => n * font_size,
            Self::Px(px) => *px,
        }
    }
}

/// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// The display types the flow layout distinguishes. `-webkit-box` is the
/// legacy flexbox value required for `-webkit-line-clamp` to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DisplayValue {
    /// `display: block`
    Block,
    /// `display: inline`
    Inline,
    /// `display: inline-block`
    InlineBlock,
    /// `display: list-item`, laid out like a block.
    ListItem,
    /// `display: none`
    None,
    /// `display: -webkit-box`
    #[strum(serialize = "-webkit-box")]
    WebkitBox,
}

impl DisplayValue {
    /// Whether the element generates a block-level box in flow layout.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(self, Self::Block | Self::ListItem | Self::WebkitBox)
    }
}

/// [§ 15.3 Non-replaced elements](https://html.spec.whatwg.org/multipage/rendering.html#non-replaced-elements)
///
/// The user agent stylesheet's `display` for a tag name.
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> DisplayValue {
    // [§ 15.3.1 Hidden elements]
    // "The following elements must have their display set to none"
    const HIDDEN: &[&str] = &[
        "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
        "param", "rp", "script", "style", "template", "title",
    ];
    // [§ 15.3.3 Flow content] and friends.
    const BLOCK: &[&str] = &[
        "address",
        "article",
        "aside",
        "blockquote",
        "body",
        "center",
        "dd",
        "details",
        "dialog",
        "dir",
        "div",
        "dl",
        "dt",
        "fieldset",
        "figcaption",
        "figure",
        "footer",
        "form",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hgroup",
        "hr",
        "html",
        "legend",
        "main",
        "menu",
        "nav",
        "ol",
        "p",
        "pre",
        "section",
        "summary",
        "ul",
    ];

    if HIDDEN.contains(&tag_name) {
        DisplayValue::None
    } else if tag_name == "li" {
        DisplayValue::ListItem
    } else if BLOCK.contains(&tag_name) {
        DisplayValue::Block
    } else {
        DisplayValue::Inline
    }
}

/// Split `12.5px` into `(12.5, "px")`.
///
/// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
fn split_number(input: &str) -> Option<(f32, &str)> {
    let bytes = input.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let number = input[..end].parse::<f32>().ok()?;
    Some((number, &input[end..]))
}
