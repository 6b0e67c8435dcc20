//! HTML fragment tokenizer and parser for the clamp workspace.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT, tag, attribute and comment states
//!   - DOCTYPE recognition (dropped by the tree builder)
//!   - Numeric and common named character references
//!
//! - **Fragment Tree Builder** ([WHATWG § 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments))
//!   - Stack of open elements rooted at a context node
//!   - Void elements and self-closing tags
//!   - Unmatched end tags reported as [`ParseIssue`]s
//!
//! # Not Yet Implemented
//!
//! - Insertion modes and implied `<html>`/`<body>` elements
//! - Table parsing modes, foster parenting, adoption agency algorithm

/// Fragment parsing and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{FragmentParser, ParseIssue, parse_document, parse_fragment};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};
