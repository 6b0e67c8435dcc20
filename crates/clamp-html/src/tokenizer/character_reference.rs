//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! Only the named references that show up in prose (and in truncation
//! markers) are recognised; numeric references are fully supported.

use clamp_common::warning::warn_once;

/// Named character references we resolve, without the leading `&`.
///
/// [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
const NAMED_REFERENCES: &[(&str, &str)] = &[
    ("amp;", "&"),
    ("lt;", "<"),
    ("gt;", ">"),
    ("quot;", "\""),
    ("apos;", "'"),
    ("nbsp;", "\u{00A0}"),
    ("hellip;", "\u{2026}"),
    ("mdash;", "\u{2014}"),
    ("ndash;", "\u{2013}"),
    ("rsquo;", "\u{2019}"),
    ("lsquo;", "\u{2018}"),
    ("rdquo;", "\u{201D}"),
    ("ldquo;", "\u{201C}"),
    ("middot;", "\u{00B7}"),
    ("raquo;", "\u{00BB}"),
    ("laquo;", "\u{00AB}"),
    ("copy;", "\u{00A9}"),
];

/// Try to decode a character reference at the start of `input` (the text
/// immediately following a `&`).
///
/// Returns the decoded text and the number of bytes consumed from `input`,
/// or `None` when the ampersand should be emitted literally.
#[must_use]
pub fn decode(input: &str) -> Option<(String, usize)> {
    if let Some(rest) = input.strip_prefix('#') {
        return decode_numeric(rest).map(|(text, used)| (text, used + 1));
    }

    for (name, value) in NAMED_REFERENCES {
        if input.starts_with(name) {
            return Some(((*value).to_string(), name.len()));
        }
    }

    // An alphanumeric run followed by ';' that we don't know: keep it literal,
    // but say so once.
    let run: String = input
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    if !run.is_empty() && input[run.len()..].starts_with(';') {
        warn_once("HTML", &format!("unknown named character reference &{run};"));
    }
    None
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
fn decode_numeric(input: &str) -> Option<(String, usize)> {
    let (radix, digits_start) = match input.chars().next() {
        Some('x' | 'X') => (16, 1),
        _ => (10, 0),
    };

    let digits: String = input[digits_start..]
        .chars()
        .take_while(|c| c.is_digit(radix))
        .collect();
    if digits.is_empty() {
        // "absence-of-digits-in-numeric-character-reference parse error"
        return None;
    }

    let mut used = digits_start + digits.len();
    // "missing-semicolon-after-character-reference parse error" is tolerated.
    if input[used..].starts_with(';') {
        used += 1;
    }

    // [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    //
    // "If the number is 0x00 ... or greater than 0x10FFFF ... or a surrogate,
    // set the character reference code to 0xFFFD."
    let c = u32::from_str_radix(&digits, radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
        .unwrap_or('\u{FFFD}');
    Some((c.to_string(), used))
}
