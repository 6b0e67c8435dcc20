//! Entry points: choose between the native line clamp and progressive
//! truncation, and report the result.

use clamp_common::warning::warn_once;
use clamp_css::{LayoutEngine, set_style_property};
use clamp_dom::{DomTree, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TruncationEngine;
use crate::options::{ClampOptions, ClampValue};
use crate::oracle::{LayoutOracle, parse_int};

/// The container's content before and after a clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampResult {
    /// Inner HTML before anything was changed.
    pub original: String,
    /// Inner HTML after truncation. Unset when the content already fit or
    /// the native line clamp was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamped: Option<String>,
}

impl ClampResult {
    /// The clamped HTML, or the original when nothing was truncated.
    #[must_use]
    pub fn content(&self) -> &str {
        self.clamped.as_deref().unwrap_or(&self.original)
    }

    /// Whether truncation took place.
    #[must_use]
    pub const fn is_clamped(&self) -> bool {
        self.clamped.is_some()
    }
}

/// Clamp `element` so its content fits in the configured number of lines,
/// running every truncation step immediately.
pub fn clamp(
    tree: &mut DomTree,
    element: NodeId,
    engine: &dyn LayoutEngine,
    options: &ClampOptions,
) -> ClampResult {
    if options.animate.delay().is_some() {
        debug!("clamp() runs synchronously; use clamp_deferred() to pace steps");
    }
    match prepare(tree, element, engine, options) {
        Prepared::Finished(result) => result,
        Prepared::Truncate { original, engine } => ClampResult {
            original,
            clamped: Some(engine.run(tree)),
        },
    }
}

/// Like [`clamp`], pausing for the `animate` delay between truncation steps.
pub async fn clamp_deferred(
    tree: &mut DomTree,
    element: NodeId,
    engine: &dyn LayoutEngine,
    options: &ClampOptions,
) -> ClampResult {
    match prepare(tree, element, engine, options) {
        Prepared::Finished(result) => result,
        Prepared::Truncate { original, engine } => {
            let clamped = match options.animate.delay() {
                Some(delay) => engine.run_paced(tree, delay).await,
                None => engine.run(tree),
            };
            ClampResult {
                original,
                clamped: Some(clamped),
            }
        }
    }
}

enum Prepared<'a> {
    Finished(ClampResult),
    Truncate {
        original: String,
        engine: TruncationEngine<'a>,
    },
}

fn prepare<'a>(
    tree: &mut DomTree,
    element: NodeId,
    engine: &'a dyn LayoutEngine,
    options: &'a ClampOptions,
) -> Prepared<'a> {
    let original = tree.inner_html(element);
    let oracle = LayoutOracle::new(engine);
    let lines = resolve_lines(tree, element, &oracle, &options.clamp);

    if engine.supports_native_clamp() && options.use_native_clamp {
        debug!(lines, "using native line clamp");
        apply_native_clamp(tree, element, lines, &options.clamp);
        return Prepared::Finished(ClampResult {
            original,
            clamped: None,
        });
    }

    let target = oracle.max_height(tree, element, lines);
    let height = oracle.element_height(tree, element);
    if height <= target {
        debug!(height, target, "content already fits");
        return Prepared::Finished(ClampResult {
            original,
            clamped: None,
        });
    }

    debug!(height, target, lines, "truncating");
    let engine = TruncationEngine::new(tree, element, target, oracle, options);
    Prepared::Truncate { original, engine }
}

/// Turn the clamp value into a line count.
fn resolve_lines(
    tree: &DomTree,
    element: NodeId,
    oracle: &LayoutOracle<'_>,
    clamp: &ClampValue,
) -> u32 {
    match clamp {
        ClampValue::Lines(lines) => *lines,
        ClampValue::Auto => oracle.max_lines(tree, element, None),
        ClampValue::Css(value) => {
            let height = parse_int(value);
            if height.is_none() {
                warn_once(
                    "clamp",
                    &format!("cannot read clamp length '{value}'; using the element height"),
                );
            }
            oracle.max_lines(tree, element, height.map(|h| h as f32))
        }
    }
}

fn apply_native_clamp(tree: &mut DomTree, element: NodeId, lines: u32, clamp: &ClampValue) {
    let lines = lines.to_string();
    let mut declarations = vec![
        ("overflow", "hidden"),
        ("text-overflow", "ellipsis"),
        ("-webkit-box-orient", "vertical"),
        ("display", "-webkit-box"),
        ("-webkit-line-clamp", lines.as_str()),
    ];
    let height = clamp.to_string();
    if clamp.is_css() {
        declarations.push(("height", height.as_str()));
    }
    for (name, value) in declarations {
        let _ = set_style_property(tree, element, name, value);
    }
}
