//! Public AST types for parsed messages.
//!
//! These types are public to enable external tooling (catalog linters,
//! editors, the CLI's `--ast` dump). A parse always yields a root
//! [`Node::Concat`].

use serde::{Deserialize, Serialize};

/// A node in a parsed message tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Literal text, already unescaped.
    Literal(String),

    /// Children rendered in order and joined.
    Concat(Vec<Node>),

    /// A positional parameter. `$1` in source is index 0.
    Replace(usize),

    /// A template call: `{{name:arg|arg}}`.
    ///
    /// The name is kept as written (trimmed); dispatch lower-cases it.
    Operation { name: String, args: Vec<Node> },

    /// `[[target|label]]` or `[[target]]`. An unpiped link has no label and
    /// is rendered with its target text.
    Wikilink {
        target: Box<Node>,
        label: Option<Box<Node>>,
    },

    /// `[url label]`.
    Extlink { target: Box<Node>, label: Box<Node> },

    /// An allowlisted inline HTML element. Names are lower-cased.
    HtmlElement {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Build a `Concat` node, merging adjacent literals.
    pub fn concat(nodes: Vec<Node>) -> Node {
        Node::Concat(merge_literals(nodes))
    }

    /// Collapse a parameter's expression list: nothing becomes an empty
    /// literal, one expression is returned bare, more become a `Concat`.
    pub(crate) fn collapse(nodes: Vec<Node>) -> Node {
        let mut nodes = merge_literals(nodes);
        match nodes.len() {
            0 => Node::Literal(String::new()),
            1 => nodes.pop().unwrap_or_else(|| Node::Literal(String::new())),
            _ => Node::Concat(nodes),
        }
    }

    /// Returns the literal text if this node is a `Literal`.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Node::Literal(text) => Some(text),
            _ => None,
        }
    }
}

/// Merge adjacent `Literal` nodes into single nodes.
fn merge_literals(nodes: Vec<Node>) -> Vec<Node> {
    let mut result: Vec<Node> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Literal(text) => {
                if let Some(Node::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Node::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}
