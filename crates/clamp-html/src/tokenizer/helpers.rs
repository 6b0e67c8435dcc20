//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")

use std::collections::HashSet;

use clamp_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;

/// Elements whose contents are tokenized as RAWTEXT.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script", "xmp", "noembed", "noframes"];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position
    /// without consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// ASCII case-insensitive variant of [`Self::next_few_characters_are`].
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        let rest = &self.input[self.current_pos..];
        rest.len() >= target.len()
            && rest.is_char_boundary(target.len())
            && rest[..target.len()].eq_ignore_ascii_case(target)
    }

    /// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, or U+0020 SPACE."
    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
    }

    /// [§ 13.2.5.4 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this tokenizer"
    ///
    /// Called with `<` as the current input character.
    pub(super) fn at_appropriate_end_tag(&self) -> bool {
        let Some(name) = self.last_start_tag_name.as_deref() else {
            return false;
        };
        let rest = &self.input[self.current_pos..];
        let Some(after_solidus) = rest.strip_prefix('/') else {
            return false;
        };
        if after_solidus.len() < name.len()
            || !after_solidus.is_char_boundary(name.len())
            || !after_solidus[..name.len()].eq_ignore_ascii_case(name)
        {
            return false;
        }
        match after_solidus[name.len()..].chars().next() {
            None => true,
            Some(c) => Self::is_whitespace_char(c) || c == '/' || c == '>',
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.token_stream.push(Token::Character { data: c });
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.token_stream.push(Token::EndOfFile);
        self.at_eof = true;
    }

    /// "Emit the current token."
    ///
    /// Start tags for raw text elements switch the tokenizer to RAWTEXT, which
    /// the tree construction stage would normally do.
    pub(super) fn emit_current_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };

        if let Token::StartTag {
            name, attributes, ..
        } = &mut token
        {
            // [§ 13.2.5.33](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
            //
            // "If there is already an attribute on the token with the exact same
            // name, then this is a duplicate-attribute parse error and the new
            // attribute must be removed from the token."
            let mut seen = HashSet::new();
            let before = attributes.len();
            attributes.retain(|attr| seen.insert(attr.name.clone()));
            if attributes.len() != before {
                self.log_parse_error();
            }

            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                self.state = TokenizerState::RawText;
            }
            self.last_start_tag_name = Some(name.clone());
        }

        self.token_stream.push(token);
    }

    /// Append decoded text to the current attribute's value.
    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_attribute_value(s);
        }
    }

    /// Parse errors are reported once per tokenizer state.
    pub(super) fn log_parse_error(&self) {
        warn_once("HTML", &format!("parse error in {} state", self.state));
    }
}
