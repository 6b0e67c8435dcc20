//! Style and layout measurement for the clamp workspace.
//!
//! # Scope
//!
//! - **Declarations** ([CSS Syntax § 5.3.8](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations))
//!   read from and written to the `style` attribute
//! - **Computed style** for the handful of properties line clamping depends
//!   on: `font-size`, `line-height`, `display`, `width`, `height`,
//!   `overflow`, `-webkit-line-clamp`
//! - **Layout**: the [`LayoutEngine`] trait and [`FlowLayout`], a normal-flow
//!   engine that breaks text into line boxes using [`FontMetrics`]
//!
//! # Not Implemented
//!
//! - Stylesheets, selectors and the cascade beyond inheritance
//! - Margins, padding, borders, floats, positioning
//! - Real font shaping (see [`ApproximateFontMetrics`])

/// Box layout per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Declarations, values and computed style.
pub mod style;

pub use layout::{
    ApproximateFontMetrics, DEFAULT_VIEWPORT_WIDTH, FlowLayout, FontMetrics, InlineLayout,
    LayoutEngine,
};
pub use style::{
    ComputedStyle, DEFAULT_FONT_SIZE_PX, DisplayValue, LengthValue, LineHeight,
    inline_style_property, set_style_property,
};
