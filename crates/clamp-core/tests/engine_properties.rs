//! Property tests for the truncation engine.

mod common;

use clamp_core::{ClampOptions, LayoutOracle, Step, TruncationEngine};
use clamp_css::LayoutEngine;
use common::{ScriptedLayout, paragraph};
use proptest::prelude::*;

const MARKER: &str = "\u{2026}";

proptest! {
    #[test]
    fn engine_terminates_with_longest_fitting_prefix(
        text in "[a-z][a-z .-]{0,60}",
        chars_per_line in 2usize..12,
        lines in 1u32..4,
    ) {
        let layout = ScriptedLayout::new(chars_per_line, 20.0);
        let options = ClampOptions::default();
        let target = 20.0 * lines as f32;
        let (mut tree, p) = paragraph(&text);
        prop_assume!(layout.scroll_height(&tree, p) > target);

        let total_chars = text.chars().count();
        let bound = (options.split_on_chars.len() + 1) * (total_chars + 2);
        let mut engine =
            TruncationEngine::new(&mut tree, p, target, LayoutOracle::new(&layout), &options);

        let mut steps = 0;
        let html = loop {
            steps += 1;
            prop_assert!(steps <= bound, "no result after {} steps", steps);
            match engine.step(&mut tree) {
                Step::Done(html) => break html,
                Step::Continue => {
                    // Content never grows past the original.
                    let current = tree.text_content(p);
                    let kept = current.strip_suffix(MARKER).unwrap_or(&current);
                    prop_assert!(text.starts_with(kept), "{:?} is not a prefix of {:?}", kept, text);
                }
            }
        };

        prop_assert_eq!(&html, &tree.inner_html(p));
        prop_assert!(layout.scroll_height(&tree, p) <= target);

        let kept = html.strip_suffix(MARKER).expect("result ends with the marker");
        prop_assert!(text.starts_with(kept));
        // One more character would not have fit.
        let next: String = text.chars().take(kept.chars().count() + 1).collect();
        let next_with_marker = format!("{next}{MARKER}");
        prop_assert!(layout.lines_for(&next_with_marker) as u32 > lines);
    }
}
