//! [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
//!
//! A reduced tree builder: tokens are inserted under a context node using a
//! stack of open elements. There are no insertion modes; the markup handled
//! here is body content (prose and small inline decorations).

use clamp_dom::{DomTree, ElementData, NodeId, NodeType, is_void_element};

use crate::tokenizer::{HTMLTokenizer, Token};

/// A recoverable problem found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

/// [§ 13.2.6.4.7 "in body"](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// "If the stack of open elements has a p element in button scope, then
/// close a p element."
///
/// Start tags in this list implicitly close an open `<p>`.
const CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "footer", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Builds DOM nodes from a token stream under a context node.
pub struct FragmentParser {
    tokens: Vec<Token>,
    issues: Vec<ParseIssue>,
}

impl FragmentParser {
    /// Create a parser over an already tokenized input.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            issues: Vec::new(),
        }
    }

    /// Insert every token under `context`, appending after any existing
    /// children. Returns the issues encountered.
    pub fn run(mut self, tree: &mut DomTree, context: NodeId) -> Vec<ParseIssue> {
        // "Let stack of open elements be a new stack containing the context element."
        let mut open_elements: Vec<NodeId> = vec![context];
        let tokens = std::mem::take(&mut self.tokens);

        for (index, token) in tokens.into_iter().enumerate() {
            let current = open_elements.last().copied().unwrap_or(context);
            match token {
                Token::Character { data } => insert_character(tree, current, data),
                Token::Comment { data } => {
                    let comment = tree.alloc(NodeType::Comment(data));
                    tree.append_child(current, comment);
                }
                // "A DOCTYPE token: Parse error. Ignore the token."
                Token::Doctype { .. } => self.issue(index, "DOCTYPE in fragment ignored"),
                Token::StartTag {
                    name,
                    self_closing,
                    attributes,
                } => {
                    if CLOSES_P.contains(&name.as_str()) {
                        close_element(tree, &mut open_elements, "p");
                    }
                    if name == "li" {
                        close_element(tree, &mut open_elements, "li");
                    }

                    let mut data = ElementData::new(&name);
                    for attr in attributes {
                        let _previous = data.attrs.insert(attr.name, attr.value);
                    }
                    let parent = open_elements.last().copied().unwrap_or(context);
                    let element = tree.alloc(NodeType::Element(data));
                    tree.append_child(parent, element);

                    if self_closing && !is_void_element(&name) {
                        self.issue(
                            index,
                            &format!("self-closing flag on non-void element <{name}>"),
                        );
                    }
                    // Void elements are popped immediately; a self-closing
                    // non-void element is treated as closed, which is what
                    // authors writing `<span/>` intend.
                    if !is_void_element(&name) && !self_closing {
                        open_elements.push(element);
                    }
                }
                Token::EndTag { name } => {
                    // "<br> end tag: Parse error. Drop the attributes from the
                    // token, and act as described in the next entry; i.e. act as if
                    // this was a "br" start tag token with no attributes"
                    if name == "br" {
                        self.issue(index, "</br> treated as <br>");
                        let br = tree.alloc_element("br");
                        tree.append_child(current, br);
                        continue;
                    }
                    if !close_element(tree, &mut open_elements, &name) {
                        self.issue(index, &format!("unmatched end tag </{name}>"));
                    }
                }
                Token::EndOfFile => break,
            }
        }

        self.issues
    }

    fn issue(&mut self, token_index: usize, message: &str) {
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index,
        });
    }
}

/// [§ 13.2.6.1 Inserting a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
///
/// "If there is a Text node immediately before the adjusted insertion
/// location, then append data to that Text node's data. Otherwise, create a
/// new Text node whose data is data"
fn insert_character(tree: &mut DomTree, parent: NodeId, c: char) {
    if let Some(last) = tree.last_child(parent) {
        if let Some(NodeType::Text(text)) = tree.get_mut(last).map(|n| &mut n.node_type) {
            text.push(c);
            return;
        }
    }
    let text = tree.alloc(NodeType::Text(c.to_string()));
    tree.append_child(parent, text);
}

/// Pop the stack of open elements up to and including the nearest element
/// named `name`. The context element (bottom of the stack) is never popped.
/// Returns false if no such element is open.
fn close_element(tree: &DomTree, open_elements: &mut Vec<NodeId>, name: &str) -> bool {
    let Some(position) = open_elements.iter().skip(1).rposition(|&id| {
        tree.as_element(id)
            .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(name))
    }) else {
        return false;
    };
    // `rposition` on the skipped iterator is relative to index 1.
    open_elements.truncate(position + 1);
    true
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// Parse `html` and append the resulting nodes to `context`.
pub fn parse_fragment(tree: &mut DomTree, context: NodeId, html: &str) -> Vec<ParseIssue> {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    FragmentParser::new(tokenizer.into_tokens()).run(tree, context)
}

/// Parse `html` as a fragment directly under a new document node.
///
/// No `<html>`/`<head>`/`<body>` elements are implied; explicit ones are
/// kept as ordinary elements.
#[must_use]
pub fn parse_document(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tree = DomTree::new();
    let issues = parse_fragment(&mut tree, NodeId::ROOT, html);
    (tree, issues)
}
