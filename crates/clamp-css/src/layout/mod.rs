//! CSS Layout
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//! - [CSSOM View Module](https://drafts.csswg.org/cssom-view/)
//!
//! # Module Structure
//!
//! - [`engine`] - The [`LayoutEngine`] measurement interface
//! - [`inline`] - Inline formatting context with line box model
//! - [`flow`] - Normal-flow reference engine built on [`inline`]

pub mod engine;
pub mod flow;
pub mod inline;

pub use engine::LayoutEngine;
pub use flow::{DEFAULT_VIEWPORT_WIDTH, FlowLayout};
pub use inline::{ApproximateFontMetrics, FontMetrics, InlineLayout, LineBox, LineFragment};
