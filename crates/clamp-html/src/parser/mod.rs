//! HTML fragment parsing and tree construction.

/// Fragment tree builder.
pub mod parser;

pub use parser::{FragmentParser, ParseIssue, parse_document, parse_fragment};
