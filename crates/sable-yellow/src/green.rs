use std::fmt;

use sable_errors::Diagnostic;
use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, NodeOrToken, SyntaxKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn full_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.full_len(),
            NodeOrToken::Token(token) => token.full_len(),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct GreenNodeData {
    kind: SyntaxKind,
    full_len: TextSize,
    children: Box<[GreenElement]>,
}

/// Immutable interior node. Cloning shares the underlying allocation.
#[derive(Clone, Eq, PartialEq)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        let full_len = children.iter().map(GreenElement::full_len).sum();
        Self(Arc::new(GreenNodeData { kind, full_len, children: children.into_boxed_slice() }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn full_len(&self) -> TextSize {
        self.0.full_len
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    pub fn write_full_text(&self, buf: &mut String) {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => node.write_full_text(buf),
                NodeOrToken::Token(token) => token.write_full_text(buf),
            }
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("full_len", &self.full_len())
            .field("children", &self.children())
            .finish()
    }
}

#[derive(Debug, Eq, PartialEq)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    is_missing: bool,
    diagnostics: Box<[Diagnostic]>,
}

/// Immutable leaf. `text` excludes trivia; the full text is
/// `leading + text + trailing`.
#[derive(Clone, Eq, PartialEq)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    pub fn new(
        kind: SyntaxKind,
        text: &str,
        leading: GreenTrivia,
        trailing: GreenTrivia,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading,
            trailing,
            is_missing: false,
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    /// A zero-width token standing in for one the source lacks.
    pub fn missing(kind: SyntaxKind, leading: GreenTrivia, diagnostics: Vec<Diagnostic>) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: "".into(),
            leading,
            trailing: GreenTrivia::empty(),
            is_missing: true,
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.0.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.0.trailing
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_missing
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text())
    }

    pub fn full_len(&self) -> TextSize {
        self.leading().len() + self.text_len() + self.trailing().len()
    }

    pub fn write_full_text(&self, buf: &mut String) {
        self.leading().write_text(buf);
        buf.push_str(self.text());
        self.trailing().write_text(buf);
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("GreenToken");
        s.field("kind", &self.kind()).field("text", &self.text());
        if self.is_missing() {
            s.field("is_missing", &true);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TriviaPiece, TriviaPieceKind};

    fn whitespace(text: &str) -> GreenTrivia {
        GreenTrivia::new(vec![TriviaPiece::new(TriviaPieceKind::Whitespace, text)])
    }

    #[test]
    fn token_text() {
        let token = GreenToken::new(
            SyntaxKind::VAR_KW,
            "var",
            whitespace("\t "),
            whitespace(" \t\t"),
            Vec::new(),
        );

        let mut full = String::new();
        token.write_full_text(&mut full);
        assert_eq!(full, "\t var \t\t");
        assert_eq!(token.text(), "var");
        assert_eq!(token.full_len(), TextSize::new(8));
    }

    #[test]
    fn node_length_sums_children() {
        let ident = GreenToken::new(SyntaxKind::IDENT, "x", whitespace(" "), GreenTrivia::empty(), Vec::new());
        let missing = GreenToken::missing(SyntaxKind::SEMICOLON, GreenTrivia::empty(), Vec::new());
        let node = GreenNode::new(
            SyntaxKind::EXPRESSION_STMT,
            vec![NodeOrToken::Token(ident), NodeOrToken::Token(missing.clone())],
        );

        assert_eq!(node.full_len(), TextSize::new(2));
        assert!(missing.is_missing());
        assert_eq!(missing.full_len(), TextSize::new(0));
    }
}
