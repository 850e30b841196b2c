//! Incremental builder for the immutable green tree.

use crate::{GreenElement, GreenNode, GreenToken, NodeOrToken, SyntaxKind};

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;

/// Builds a [`GreenNode`] from a flat sequence of start/token/finish calls.
pub struct Builder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Appends a token to the innermost open node.
    pub fn token(&mut self, token: GreenToken) {
        self.children.push(NodeOrToken::Token(token));
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("no opened nodes?");
        let children = self.children.split_off(first_child);
        self.children.push(NodeOrToken::Node(GreenNode::new(kind, children)));
    }

    /// Consumes the builder, returning the single root node.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unfinished nodes at the end of the tree");
        assert_eq!(self.children.len(), 1, "tree must have exactly one root");

        match self.children.pop() {
            Some(NodeOrToken::Node(root)) => root,
            _ => panic!("tree root must be a node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreenTrivia;

    fn token(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(kind, text, GreenTrivia::empty(), GreenTrivia::empty(), Vec::new())
    }

    #[test]
    fn nests_nodes() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::PARENTHESIZED_EXPR);
        builder.token(token(SyntaxKind::L_PAREN, "("));
        builder.start_node(SyntaxKind::IDENTIFIER_NAME);
        builder.token(token(SyntaxKind::IDENT, "x"));
        builder.finish_node();
        builder.token(token(SyntaxKind::R_PAREN, ")"));
        builder.finish_node();

        let root = builder.finish();
        assert_eq!(root.kind(), SyntaxKind::PARENTHESIZED_EXPR);
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.children()[1].kind(), SyntaxKind::IDENTIFIER_NAME);

        let mut text = String::new();
        root.write_full_text(&mut text);
        assert_eq!(text, "(x)");
    }

    #[test]
    #[should_panic(expected = "you should call `Builder::finish()`")]
    fn dropping_open_builder_panics() {
        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::BLOCK);
    }
}
