//! End-to-end clamp tests against the flow layout and a scripted layout.

mod common;

use clamp_core::{
    Animate, ClampOptions, ClampResult, ClampValue, LayoutOracle, Step, TruncationEngine, clamp,
};
use clamp_css::{FlowLayout, LayoutEngine, inline_style_property};
use clamp_dom::{DomTree, NodeId};
use clamp_html::parse_document;
use common::{ScriptedLayout, paragraph};

const SENTENCES: &str = "The quick brown fox jumps over the lazy dog. It was a sunny afternoon.";

/// 25 characters per line at the default font size; three lines of text.
fn sentences_fixture() -> (DomTree, NodeId) {
    let html = format!(r#"<p id="t" style="width: 244px; line-height: 20px">{SENTENCES}</p>"#);
    with_target(&html)
}

fn with_target(html: &str) -> (DomTree, NodeId) {
    let (tree, _) = parse_document(html);
    let target = tree.get_element_by_id("t").expect("fixture should contain #t");
    (tree, target)
}

fn options(clamp: ClampValue) -> ClampOptions {
    ClampOptions {
        clamp,
        ..ClampOptions::default()
    }
}

#[test]
fn test_two_lines_cut_at_sentence_boundary() {
    let (mut tree, p) = sentences_fixture();
    let layout = FlowLayout::default();
    let options = ClampOptions {
        split_on_chars: vec![".".to_string(), " ".to_string()],
        ..options(ClampValue::Lines(2))
    };

    let result = clamp(&mut tree, p, &layout, &options);

    assert_eq!(result.original, SENTENCES);
    assert_eq!(
        result.clamped.as_deref(),
        Some("The quick brown fox jumps over the lazy dog.\u{2026}")
    );
    assert_eq!(tree.inner_html(p), result.content());
    assert_eq!(layout.scroll_height(&tree, p), 40.0);
}

#[test]
fn test_default_boundaries_give_same_cut() {
    let (mut tree, p) = sentences_fixture();
    let result = clamp(&mut tree, p, &FlowLayout::default(), &ClampOptions::default());

    assert_eq!(
        result.content(),
        "The quick brown fox jumps over the lazy dog.\u{2026}"
    );
}

#[test]
fn test_refinement_can_cut_past_a_fitting_sentence() {
    // Cutting after "lazy dog." already fits; refinement goes on down to
    // characters and keeps the longest prefix that fits.
    let (mut tree, p) = paragraph(SENTENCES);
    let layout = ScriptedLayout::new(30, 20.0);
    let options = ClampOptions {
        split_on_chars: vec![".".to_string(), " ".to_string()],
        ..options(ClampValue::Lines(2))
    };

    let result = clamp(&mut tree, p, &layout, &options);

    assert_eq!(
        result.content(),
        "The quick brown fox jumps over the lazy dog. It was a sunny\u{2026}"
    );
    assert_eq!(layout.scroll_height(&tree, p), 40.0);
}

#[test]
fn test_one_line_cut_is_character_precise() {
    let (mut tree, p) = sentences_fixture();
    let result = clamp(
        &mut tree,
        p,
        &FlowLayout::default(),
        &options(ClampValue::Lines(1)),
    );

    assert_eq!(result.content(), "The quick brown fox jump\u{2026}");
}

#[test]
fn test_auto_leaves_fitting_content_alone() {
    let html = format!(
        r#"<div id="t" style="width: 244px; height: 60px; line-height: 20px">{SENTENCES}</div>"#
    );
    let (mut tree, div) = with_target(&html);

    let result = clamp(
        &mut tree,
        div,
        &FlowLayout::default(),
        &options(ClampValue::Auto),
    );

    assert_eq!(result.original, SENTENCES);
    assert_eq!(result.clamped, None);
    assert_eq!(result.content(), SENTENCES);
    assert_eq!(tree.inner_html(div), SENTENCES);
}

#[test]
fn test_enough_lines_leaves_content_alone() {
    let (mut tree, p) = sentences_fixture();
    let result = clamp(
        &mut tree,
        p,
        &FlowLayout::default(),
        &options(ClampValue::Lines(3)),
    );

    assert!(!result.is_clamped());
    assert_eq!(tree.inner_html(p), SENTENCES);
}

#[test]
fn test_css_length_uses_leading_integer_as_pixels() {
    let (mut tree, p) = sentences_fixture();
    let result = clamp(
        &mut tree,
        p,
        &FlowLayout::default(),
        &options(ClampValue::Css("40px".to_string())),
    );
    assert_eq!(
        result.content(),
        "The quick brown fox jumps over the lazy dog.\u{2026}"
    );

    // "3em" reads as 3px: three lines of 1px.
    let (mut tree, p) = paragraph("abcdef");
    let layout = ScriptedLayout::new(1, 1.0);
    let result = clamp(
        &mut tree,
        p,
        &layout,
        &options(ClampValue::Css("3em".to_string())),
    );
    assert_eq!(result.content(), "ab\u{2026}");
}

#[test]
fn test_oversized_css_length_saturates() {
    let (mut tree, p) = paragraph("abcdefghij");
    let layout = ScriptedLayout {
        native: true,
        ..ScriptedLayout::new(5, 20.0)
    };

    let result = clamp(
        &mut tree,
        p,
        &layout,
        &options(ClampValue::Css("99999999999999999999px".to_string())),
    );

    assert_eq!(result.clamped, None);
    let style = tree.attribute(p, "style").unwrap_or_default();
    assert!(
        style.contains(&format!("-webkit-line-clamp: {};", u32::MAX)),
        "{style}"
    );
}

#[test]
fn test_unreadable_css_length_falls_back_to_element_height() {
    let (mut tree, p) = paragraph("abcdef");
    let layout = ScriptedLayout::new(2, 20.0);
    let result = clamp(
        &mut tree,
        p,
        &layout,
        &options(ClampValue::Css("em".to_string())),
    );

    assert_eq!(result.clamped, None);
}

#[test]
fn test_oracle_line_height_and_max_lines() {
    let (tree, p) = sentences_fixture();
    let layout = FlowLayout::default();
    let oracle = LayoutOracle::new(&layout);

    assert_eq!(oracle.element_height(&tree, p), 60.0);
    assert_eq!(oracle.line_height(&tree, p), 20.0);
    assert_eq!(oracle.max_lines(&tree, p, None), 3);
    assert_eq!(oracle.max_lines(&tree, p, Some(45.0)), 2);
    assert_eq!(oracle.max_lines(&tree, p, Some(0.0)), 3);
    assert_eq!(oracle.max_height(&tree, p, 2), 40.0);
}

#[test]
fn test_normal_line_height_uses_integer_font_size() {
    let (tree, p) = with_target(r#"<p id="t" style="font-size: 15.5px">x</p>"#);
    let layout = FlowLayout::default();

    assert_eq!(LayoutOracle::new(&layout).line_height(&tree, p), 15.0 * 1.2);
}

#[test]
fn test_nothing_fits_reduces_to_marker() {
    let (mut tree, _) = parse_document("<p>ab<b>c</b></p>");
    let p = tree.first_element().expect("p");
    let layout = ScriptedLayout::always(100.0, 20.0);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(1)));

    assert_eq!(result.original, "ab<b>c</b>");
    assert_eq!(result.content(), "\u{2026}");
}

#[test]
fn test_nothing_fits_with_truncation_markup() {
    let (mut tree, _) = parse_document("<p>ab<b>c</b></p>");
    let p = tree.first_element().expect("p");
    let layout = ScriptedLayout::always(100.0, 20.0);
    let options = ClampOptions {
        truncation_html: Some("<a>more</a>".to_string()),
        ..options(ClampValue::Lines(1))
    };

    let result = clamp(&mut tree, p, &layout, &options);

    assert_eq!(result.content(), " <a>more</a>\u{2026}");
}

#[test]
fn test_zero_lines_leaves_content_unchanged() {
    let (mut tree, p) = paragraph("abcdef");
    let layout = ScriptedLayout::new(2, 20.0);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(0)));

    assert_eq!(result.clamped.as_deref(), Some("abcdef"));
    assert_eq!(tree.inner_html(p), "abcdef");
}

#[test]
fn test_cut_inside_nested_markup() {
    let (mut tree, _) = parse_document("<p>one two <b>three four</b></p>");
    let p = tree.first_element().expect("p");
    let layout = ScriptedLayout::new(10, 20.0);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(1)));

    assert_eq!(result.content(), "one two <b>t\u{2026}</b>");
}

#[test]
fn test_exhausted_node_moves_to_previous_text() {
    let (mut tree, _) = parse_document("<p>one two <b>three four</b></p>");
    let p = tree.first_element().expect("p");
    let layout = ScriptedLayout::new(6, 20.0);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(1)));

    assert_eq!(result.content(), "one t\u{2026}");
}

#[test]
fn test_trailing_content_is_pruned() {
    let (mut tree, _) = parse_document("<p>alpha beta gamma<br><img src=\"x.png\"> </p>");
    let p = tree.first_element().expect("p");
    let layout = ScriptedLayout::new(8, 20.0);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(1)));

    assert_eq!(result.content(), "alpha b\u{2026}");
}

#[test]
fn test_truncation_markup_sits_between_text_and_marker() {
    let (mut tree, p) = paragraph("hello world again");
    let layout = ScriptedLayout::new(10, 20.0);
    let options = ClampOptions {
        truncation_html: Some("<i>+</i>".to_string()),
        ..options(ClampValue::Lines(1))
    };

    let result = clamp(&mut tree, p, &layout, &options);

    assert_eq!(result.content(), "hello w <i>+</i>\u{2026}");
    assert_eq!(tree.text_content(p), "hello w +\u{2026}");
}

#[test]
fn test_reclamp_truncates_earlier_markup_text_first() {
    let (mut tree, p) = paragraph("hello world again");
    let options = ClampOptions {
        truncation_html: Some("<i>+</i>".to_string()),
        ..options(ClampValue::Lines(1))
    };
    let first = clamp(&mut tree, p, &ScriptedLayout::new(10, 20.0), &options);
    assert_eq!(first.content(), "hello w <i>+</i>\u{2026}");

    // The "+" inside the earlier markup is the last text, so it is used up
    // before the cut moves back into "hello w".
    let second = clamp(&mut tree, p, &ScriptedLayout::new(5, 20.0), &options);
    assert_eq!(second.original, "hello w <i>+</i>\u{2026}");
    assert_eq!(second.content(), "he <i>+</i>\u{2026}");
    assert_eq!(tree.text_content(p), "he +\u{2026}");
}

#[test]
fn test_reclamp_does_not_double_the_marker() {
    let (mut tree, p) = paragraph("abcdefghij");
    let first = clamp(
        &mut tree,
        p,
        &ScriptedLayout::new(5, 20.0),
        &options(ClampValue::Lines(1)),
    );
    assert_eq!(first.content(), "abcd\u{2026}");

    let second = clamp(
        &mut tree,
        p,
        &ScriptedLayout::new(3, 20.0),
        &options(ClampValue::Lines(1)),
    );
    assert_eq!(second.original, "abcd\u{2026}");
    assert_eq!(second.content(), "ab\u{2026}");
}

#[test]
fn test_custom_marker() {
    let (mut tree, p) = paragraph("abcdefghij");
    let options = ClampOptions {
        truncation_char: "...".to_string(),
        ..options(ClampValue::Lines(1))
    };

    let result = clamp(&mut tree, p, &ScriptedLayout::new(6, 20.0), &options);

    assert_eq!(result.content(), "abc...");
}

#[test]
fn test_native_clamp_writes_style() {
    let (mut tree, p) = paragraph("abcdefghij");
    let layout = ScriptedLayout {
        native: true,
        ..ScriptedLayout::new(2, 20.0)
    };

    let result = clamp(
        &mut tree,
        p,
        &layout,
        &options(ClampValue::Css("60px".to_string())),
    );

    assert_eq!(result.clamped, None);
    assert_eq!(tree.text_content(p), "abcdefghij");
    assert_eq!(
        tree.attribute(p, "style"),
        Some(
            "overflow: hidden; text-overflow: ellipsis; -webkit-box-orient: vertical; \
             display: -webkit-box; -webkit-line-clamp: 3; height: 60px;"
        )
    );
}

#[test]
fn test_native_clamp_can_be_declined() {
    let (mut tree, p) = paragraph("abcdefghij");
    let layout = ScriptedLayout {
        native: true,
        ..ScriptedLayout::new(5, 20.0)
    };
    let options = ClampOptions {
        use_native_clamp: false,
        ..options(ClampValue::Lines(1))
    };

    let result = clamp(&mut tree, p, &layout, &options);

    assert_eq!(result.content(), "abcd\u{2026}");
    assert_eq!(tree.attribute(p, "style"), None);
}

#[test]
fn test_native_clamp_in_flow_layout() {
    let (mut tree, p) = sentences_fixture();
    let layout = FlowLayout::default().with_native_line_clamp(true);

    let result = clamp(&mut tree, p, &layout, &options(ClampValue::Lines(2)));

    assert_eq!(result.clamped, None);
    assert_eq!(
        inline_style_property(&tree, p, "-webkit-line-clamp").as_deref(),
        Some("2")
    );
    assert_eq!(inline_style_property(&tree, p, "width").as_deref(), Some("244px"));
    assert_eq!(layout.scroll_height(&tree, p), 40.0);
}

#[test]
fn test_animate_is_ignored_by_synchronous_clamp() {
    let (mut tree, p) = paragraph("abcdefghij");
    let options = ClampOptions {
        animate: Animate::On,
        ..options(ClampValue::Lines(1))
    };

    let result = clamp(&mut tree, p, &ScriptedLayout::new(5, 20.0), &options);

    assert_eq!(result.content(), "abcd\u{2026}");
}

#[test]
fn test_engine_steps_one_unit_at_a_time() {
    let (mut tree, p) = paragraph("abcdefghij");
    let layout = ScriptedLayout::new(5, 20.0);
    let options = options(ClampValue::Lines(1));
    let mut engine = TruncationEngine::new(&mut tree, p, 20.0, LayoutOracle::new(&layout), &options);
    assert_eq!(engine.text(), "abcdefghij");

    // One step per default boundary, none of which occur in the text.
    for _ in 0..5 {
        assert_eq!(engine.step(&mut tree), Step::Continue);
        assert_eq!(tree.inner_html(p), "abcdefghij");
    }
    assert_eq!(engine.step(&mut tree), Step::Continue);
    assert_eq!(tree.inner_html(p), "abcdefghi\u{2026}");

    let mut last = Step::Continue;
    while last == Step::Continue {
        last = engine.step(&mut tree);
    }
    assert_eq!(last, Step::Done("abcd\u{2026}".to_string()));
    assert_eq!(engine.steps(), 11);
}

#[test]
fn test_result_json_omits_unset_clamped() {
    let result = ClampResult {
        original: "<b>x</b>".to_string(),
        clamped: None,
    };
    assert_eq!(
        serde_json::to_string(&result).expect("serialize"),
        r#"{"original":"<b>x</b>"}"#
    );

    let parsed: ClampResult =
        serde_json::from_str(r#"{"original":"abc","clamped":"a…"}"#).expect("parse");
    assert_eq!(parsed.content(), "a…");
}

#[test]
fn test_options_from_json() {
    let options: ClampOptions = serde_json::from_str(
        r#"{"clamp":"auto","animate":true,"splitOnChars":[" "],"truncationHTML":"<b>more</b>"}"#,
    )
    .expect("parse options");
    assert_eq!(options.clamp, ClampValue::Auto);
    assert_eq!(options.animate, Animate::On);
    assert_eq!(options.split_on_chars, vec![" "]);
    assert_eq!(options.truncation_html.as_deref(), Some("<b>more</b>"));
    assert!(options.use_native_clamp);
    assert_eq!(options.truncation_char, "\u{2026}");

    let options: ClampOptions =
        serde_json::from_str(r#"{"clamp":3,"animate":25,"useNativeClamp":false}"#).expect("parse");
    assert_eq!(options.clamp, ClampValue::Lines(3));
    assert_eq!(options.animate, Animate::Millis(25));
    assert!(!options.use_native_clamp);

    let options: ClampOptions = serde_json::from_str(r#"{"clamp":"3em","animate":false}"#).expect("parse");
    assert_eq!(options.clamp, ClampValue::Css("3em".to_string()));
    assert_eq!(options.animate, Animate::Off);

    assert!(serde_json::from_str::<ClampOptions>(r#"{"clamp":"lots"}"#).is_err());
}

#[test]
fn test_fractional_clamp_in_json_is_rejected() {
    assert!(serde_json::from_str::<ClampOptions>(r#"{"clamp":2.5}"#).is_err());
    assert!(serde_json::from_str::<ClampOptions>(r#"{"clamp":"2.5"}"#).is_err());
}

#[test]
fn test_default_options_to_json() {
    let json = serde_json::to_value(ClampOptions::default()).expect("serialize");

    assert_eq!(json["clamp"], 2);
    assert_eq!(json["useNativeClamp"], true);
    assert_eq!(json["animate"], false);
    assert_eq!(json["truncationChar"], "\u{2026}");
    assert!(json.get("truncationHTML").is_none());
}
