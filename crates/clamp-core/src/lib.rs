//! Multi-line text clamping.
//!
//! [`clamp`] shortens an element's content until it fits in a number of
//! lines, appending a marker where the text was cut. Heights come from a
//! [`clamp_css::LayoutEngine`]; the cut is found by [`TruncationEngine`],
//! which trims the last text node at progressively finer boundaries and
//! moves backwards through earlier text nodes when one runs out.
//!
//! When the layout engine can clamp lines itself and
//! [`ClampOptions::use_native_clamp`] is set, the element's style is written
//! instead and the content is left alone.

mod controller;
/// Backwards walk over text nodes.
pub mod cursor;
/// Progressive truncation.
pub mod engine;
mod error;
/// Options and defaults.
pub mod options;
/// Height queries.
pub mod oracle;

pub use controller::{ClampResult, clamp, clamp_deferred};
pub use cursor::TextCursor;
pub use engine::{Step, TruncationEngine};
pub use error::ClampError;
pub use options::{Animate, ClampOptions, ClampValue};
pub use oracle::{LayoutOracle, parse_int};
