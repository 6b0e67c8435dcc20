//! The progressive truncation engine.
//!
//! Each [`TruncationEngine::step`] does one unit of work on the active text
//! node:
//!
//! - with no chunks in hand, take the next boundary from the plan (or the
//!   empty boundary once the plan is used up) and split the text on it;
//! - with more than one chunk, drop the last one, write the rest plus the
//!   marker into the node and measure. A fit on a non-empty boundary puts
//!   the chunk back and moves on to the next, finer boundary; a fit on the
//!   empty boundary is the result. No fit keeps cutting;
//! - with a single chunk the boundary is used up. Using up the empty
//!   boundary exhausts the node: it is reduced to the marker and the walk
//!   continues at the previous text node.
//!
//! Every step drops a chunk, consumes a boundary or consumes a node, so the
//! loop ends.

use std::collections::VecDeque;
use std::time::Duration;

use clamp_common::warning::warn_once;
use clamp_dom::{DomTree, NodeId};
use clamp_html::parse_fragment;
use tracing::{debug, trace};

use crate::cursor::TextCursor;
use crate::options::ClampOptions;
use crate::oracle::LayoutOracle;

/// Outcome of one engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// More work remains.
    Continue,
    /// Finished; the container's inner HTML.
    Done(String),
}

/// Chunks of the active text split on one boundary.
#[derive(Debug, Clone)]
struct ChunkState {
    boundary: String,
    chunks: Vec<String>,
    last_chunk: Option<String>,
}

/// Truncation state for one container.
pub struct TruncationEngine<'a> {
    oracle: LayoutOracle<'a>,
    options: &'a ClampOptions,
    container: NodeId,
    target_height: f32,
    cursor: TextCursor,
    node: Option<NodeId>,
    /// The active node's text without the marker.
    text: String,
    plan: VecDeque<String>,
    chunk_state: Option<ChunkState>,
    /// `" "`, the parsed truncation markup, and the marker, kept right
    /// after the active node when truncation markup is configured.
    suffix: Vec<NodeId>,
    steps: usize,
}

impl<'a> TruncationEngine<'a> {
    /// Prepare to truncate `container` until it is at most `target_height`
    /// tall, starting from its last meaningful text node. Content after that
    /// node is pruned.
    pub fn new(
        tree: &mut DomTree,
        container: NodeId,
        target_height: f32,
        oracle: LayoutOracle<'a>,
        options: &'a ClampOptions,
    ) -> Self {
        let suffix = options
            .truncation_html
            .as_deref()
            .map(|html| build_suffix(tree, html, &options.truncation_char))
            .unwrap_or_default();

        let mut engine = Self {
            oracle,
            options,
            container,
            target_height,
            cursor: TextCursor::new(tree, container),
            node: None,
            text: String::new(),
            plan: VecDeque::new(),
            chunk_state: None,
            suffix,
            steps: 0,
        };
        if let Some(node) = engine.cursor.previous(tree, &options.truncation_char) {
            engine.activate(tree, node);
        }
        engine
    }

    /// The text node being truncated, if any remain.
    #[must_use]
    pub const fn current_node(&self) -> Option<NodeId> {
        self.node
    }

    /// The active text without the marker.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Steps taken so far.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Advance by one unit of work.
    pub fn step(&mut self, tree: &mut DomTree) -> Step {
        // Nothing can fit in zero height; leave the content alone.
        if self.target_height <= 0.0 {
            return Step::Done(tree.inner_html(self.container));
        }
        let Some(node) = self.node else {
            return Step::Done(tree.inner_html(self.container));
        };
        self.steps += 1;

        let mut state = self.chunk_state.take().unwrap_or_else(|| {
            let boundary = self.plan.pop_front().unwrap_or_default();
            let chunks = split_text(&self.text, &boundary);
            ChunkState {
                boundary,
                chunks,
                last_chunk: None,
            }
        });

        if state.chunks.len() > 1 {
            state.last_chunk = state.chunks.pop();
            self.text = state.chunks.join(&state.boundary);
            self.write(tree, node);

            let height = self.oracle.element_height(tree, self.container);
            trace!(
                step = self.steps,
                boundary = %state.boundary,
                chunks = state.chunks.len(),
                height,
                "trial cut"
            );
            if height > self.target_height {
                self.chunk_state = Some(state);
                return Step::Continue;
            }
            if state.boundary.is_empty() {
                debug!(steps = self.steps, "truncation complete");
                return Step::Done(tree.inner_html(self.container));
            }
            // Fits, but a finer boundary may keep more. The rejoin always
            // inserts one separator.
            let last_chunk = state.last_chunk.take().unwrap_or_default();
            self.text = format!("{}{}{}", self.text, state.boundary, last_chunk);
            self.write(tree, node);
            return Step::Continue;
        }

        if !state.boundary.is_empty() {
            trace!(step = self.steps, boundary = %state.boundary, "boundary used up");
            return Step::Continue;
        }

        self.exhaust(tree, node);
        match self.cursor.previous(tree, &self.options.truncation_char) {
            Some(previous) => {
                self.activate(tree, previous);
                Step::Continue
            }
            None => {
                debug!(steps = self.steps, "no earlier text node; stopping");
                self.node = None;
                Step::Done(tree.inner_html(self.container))
            }
        }
    }

    /// Step until done and return the final HTML.
    pub fn run(mut self, tree: &mut DomTree) -> String {
        loop {
            if let Step::Done(html) = self.step(tree) {
                return html;
            }
        }
    }

    /// Like [`Self::run`], sleeping for `delay` between steps.
    pub async fn run_paced(mut self, tree: &mut DomTree, delay: Duration) -> String {
        loop {
            match self.step(tree) {
                Step::Done(html) => return html,
                Step::Continue => tokio::time::sleep(delay).await,
            }
        }
    }

    /// Make `node` the active text with a fresh plan. A marker left at the
    /// end by an earlier clamp is dropped.
    fn activate(&mut self, tree: &DomTree, node: NodeId) {
        let value = tree.as_text(node).unwrap_or_default();
        self.text = value
            .strip_suffix(self.options.truncation_char.as_str())
            .unwrap_or(value)
            .to_string();
        self.plan = self.options.split_on_chars.iter().cloned().collect();
        self.chunk_state = None;
        self.node = Some(node);
        debug!(
            node = node.0,
            chars = self.text.chars().count(),
            remaining_nodes = self.cursor.remaining(),
            "truncating text node"
        );
    }

    /// Write the active text into `node`, followed by the marker.
    fn write(&self, tree: &mut DomTree, node: NodeId) {
        if self.suffix.is_empty() {
            let value = format!("{}{}", self.text, self.options.truncation_char);
            let _ = tree.set_text(node, &value);
        } else {
            let _ = tree.set_text(node, &self.text);
            self.place_suffix(tree, node);
        }
    }

    /// Reduce `node` to the marker alone (or to nothing, when the suffix
    /// carries the marker).
    fn exhaust(&mut self, tree: &mut DomTree, node: NodeId) {
        self.text.clear();
        if self.suffix.is_empty() {
            let _ = tree.set_text(node, &self.options.truncation_char);
        } else {
            let _ = tree.set_text(node, "");
            self.place_suffix(tree, node);
        }
    }

    fn place_suffix(&self, tree: &mut DomTree, node: NodeId) {
        let mut previous = node;
        for &id in &self.suffix {
            tree.insert_after(previous, id);
            previous = id;
        }
    }
}

/// Split `text` on `boundary`; the empty boundary splits into characters.
fn split_text(text: &str, boundary: &str) -> Vec<String> {
    if boundary.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(boundary).map(String::from).collect()
    }
}

/// Parse truncation markup into detached nodes: a space, the markup, and
/// the marker.
fn build_suffix(tree: &mut DomTree, html: &str, marker: &str) -> Vec<NodeId> {
    let holder = tree.alloc_element("span");
    for issue in parse_fragment(tree, holder, html) {
        warn_once("HTML", &format!("truncation markup: {}", issue.message));
    }
    let mut suffix = vec![tree.alloc_text(" ")];
    suffix.extend_from_slice(tree.children(holder));
    suffix.push(tree.alloc_text(marker));
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text() {
        assert_eq!(split_text("a.b.", "."), vec!["a", "b", ""]);
        assert_eq!(split_text("héllo", ""), vec!["h", "é", "l", "l", "o"]);
        assert_eq!(split_text("", "."), vec![""]);
        assert!(split_text("", "").is_empty());
        assert_eq!(split_text("a -- b", "--"), vec!["a ", " b"]);
    }
}
