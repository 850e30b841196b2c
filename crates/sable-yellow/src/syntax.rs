//! Offset-carrying handles over the green tree.
//!
//! A [`SyntaxNode`] borrows its green node and knows where it starts in the
//! source, so ranges are computed on the fly without allocation or refcounts.
//! Parent pointers are not kept; navigation is top-down.

use std::fmt::{self, Write as _};

use sable_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use crate::{GreenNode, GreenToken, GreenTrivia, SyntaxKind, TriviaPiece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}

pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl SyntaxElement<'_> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNode<'a> {
    green: &'a GreenNode,
    offset: TextSize,
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_range())
    }
}

impl<'a> SyntaxNode<'a> {
    pub fn new_root(green: &'a GreenNode) -> Self {
        Self { green, offset: TextSize::new(0) }
    }

    /// A root whose text starts at `offset` in some larger buffer.
    pub fn new_root_at(green: &'a GreenNode, offset: TextSize) -> Self {
        Self { green, offset }
    }

    pub fn kind(self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(self) -> &'a GreenNode {
        self.green
    }

    /// Range including the leading and trailing trivia of the edge tokens.
    pub fn full_range(self) -> TextRange {
        TextRange::at(self.offset, self.green.full_len())
    }

    /// Range without the outer trivia.
    pub fn text_range(self) -> TextRange {
        let first = self.first_token().map(|token| token.text_range().start());
        let last = self.last_token().map(|token| token.text_range().end());

        match (first, last) {
            (Some(start), Some(end)) if start <= end => TextRange::new(start, end),
            _ => TextRange::empty(self.offset),
        }
    }

    pub fn children(self) -> impl Iterator<Item = SyntaxElement<'a>> + 'a {
        let mut offset = self.offset;
        self.green.children().iter().map(move |child| {
            let start = offset;
            offset += child.full_len();
            match child {
                NodeOrToken::Node(green) => NodeOrToken::Node(SyntaxNode { green, offset: start }),
                NodeOrToken::Token(green) => {
                    NodeOrToken::Token(SyntaxToken { green, offset: start })
                }
            }
        })
    }

    pub fn child_nodes(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.children().filter_map(NodeOrToken::into_node)
    }

    pub fn child_tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.children().filter_map(NodeOrToken::into_token)
    }

    pub fn child_token(self, kind: SyntaxKind) -> Option<SyntaxToken<'a>> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    /// Nodes in preorder, starting with `self`.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            let start = stack.len();
            stack.extend(node.child_nodes());
            stack[start..].reverse();
            Some(node)
        })
    }

    /// All tokens under `self` in source order. Skipped tokens held in trivia
    /// are not included.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> {
        self.descendants().flat_map(SyntaxNode::child_tokens)
    }

    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        self.children().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        let children = self.children().collect::<Vec<_>>();
        children.into_iter().rev().find_map(|child| match child {
            NodeOrToken::Node(node) => node.last_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Exact source text of this node, trivia included.
    pub fn full_text(self) -> String {
        let mut text = String::with_capacity(self.green.full_len().into());
        self.green.write_full_text(&mut text);
        text
    }

    /// Source text without the outer trivia.
    pub fn text(self) -> String {
        let full = self.full_text();
        let range = self.text_range() - self.offset;
        full[range].to_owned()
    }

    /// Diagnostics attached to any token under `self`, including skipped
    /// tokens, in source order.
    pub fn diagnostics(self) -> Vec<&'a Diagnostic> {
        let mut diagnostics = Vec::new();
        for token in self.tokens() {
            token.collect_diagnostics(&mut diagnostics);
        }
        diagnostics
    }

    pub fn contains_diagnostics(self) -> bool {
        self.tokens().any(|token| token.has_diagnostics())
    }

    /// Indented outline of the tree: one node or token per line, skipped
    /// tokens marked as such, missing tokens flagged.
    pub fn debug_dump(self) -> String {
        let mut buf = String::new();
        self.dump_into(&mut buf, 0);
        buf
    }

    fn dump_into(self, buf: &mut String, depth: usize) {
        let _ = writeln!(buf, "{:indent$}{:?}", "", self.kind(), indent = depth * 2);
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => node.dump_into(buf, depth + 1),
                NodeOrToken::Token(token) => token.green.dump_into(buf, depth + 1),
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken<'a> {
    green: &'a GreenToken,
    offset: TextSize,
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl<'a> SyntaxToken<'a> {
    pub fn kind(self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(self) -> &'a GreenToken {
        self.green
    }

    pub fn text(self) -> &'a str {
        self.green.text()
    }

    pub fn is_missing(self) -> bool {
        self.green.is_missing()
    }

    pub fn text_range(self) -> TextRange {
        TextRange::at(self.offset + self.green.leading().len(), self.green.text_len())
    }

    pub fn full_range(self) -> TextRange {
        TextRange::at(self.offset, self.green.full_len())
    }

    pub fn leading_trivia(self) -> &'a GreenTrivia {
        self.green.leading()
    }

    pub fn trailing_trivia(self) -> &'a GreenTrivia {
        self.green.trailing()
    }

    pub fn diagnostics(self) -> &'a [Diagnostic] {
        self.green.diagnostics()
    }

    /// Tokens the parser skipped and stored in this token's trivia.
    pub fn skipped_tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> {
        let leading = trivia_tokens(self.green.leading(), self.offset);
        let trailing = trivia_tokens(
            self.green.trailing(),
            self.offset + self.green.leading().len() + self.green.text_len(),
        );
        leading.chain(trailing)
    }

    fn has_diagnostics(self) -> bool {
        !self.diagnostics().is_empty()
            || self.skipped_tokens().any(|skipped| skipped.has_diagnostics())
    }

    fn collect_diagnostics(self, diagnostics: &mut Vec<&'a Diagnostic>) {
        let leading = trivia_tokens(self.green.leading(), self.offset);
        for skipped in leading {
            skipped.collect_diagnostics(diagnostics);
        }
        diagnostics.extend(self.diagnostics());
        let trailing_start = self.offset + self.green.leading().len() + self.green.text_len();
        for skipped in trivia_tokens(self.green.trailing(), trailing_start) {
            skipped.collect_diagnostics(diagnostics);
        }
    }
}

fn trivia_tokens(trivia: &GreenTrivia, start: TextSize) -> impl Iterator<Item = SyntaxToken<'_>> {
    let mut offset = start;
    trivia.pieces().iter().filter_map(move |piece| {
        let piece_start = offset;
        offset += piece.len();
        match piece {
            TriviaPiece::Skipped(green) => Some(SyntaxToken { green, offset: piece_start }),
            TriviaPiece::Text { .. } => None,
        }
    })
}

impl GreenToken {
    fn dump_into(&self, buf: &mut String, depth: usize) {
        for piece in self.leading().pieces() {
            if let TriviaPiece::Skipped(skipped) = piece {
                skipped.dump_skipped(buf, depth);
            }
        }

        let _ = write!(buf, "{:indent$}{:?} {:?}", "", self.kind(), self.text(), indent = depth * 2);
        if self.is_missing() {
            buf.push_str(" missing");
        }
        buf.push('\n');

        for piece in self.trailing().pieces() {
            if let TriviaPiece::Skipped(skipped) = piece {
                skipped.dump_skipped(buf, depth);
            }
        }
    }

    fn dump_skipped(&self, buf: &mut String, depth: usize) {
        for piece in self.leading().pieces() {
            if let TriviaPiece::Skipped(skipped) = piece {
                skipped.dump_skipped(buf, depth);
            }
        }
        let _ = writeln!(buf, "{:indent$}skipped {:?} {:?}", "", self.kind(), self.text(), indent = depth * 2);
    }
}

#[cfg(test)]
mod tests {
    use sable_errors::ErrorCode;

    use super::*;
    use crate::{Builder, TriviaPieceKind};

    fn token(kind: SyntaxKind, text: &str, leading: &str, trailing: &str) -> GreenToken {
        let trivia = |text: &str| {
            if text.is_empty() {
                GreenTrivia::empty()
            } else {
                GreenTrivia::new(vec![TriviaPiece::new(TriviaPieceKind::Whitespace, text)])
            }
        };
        GreenToken::new(kind, text, trivia(leading), trivia(trailing), Vec::new())
    }

    fn sample() -> GreenNode {
        // ` x ;` with a skipped `)` in front of the semicolon.
        let skipped = GreenToken::new(
            SyntaxKind::R_PAREN,
            ")",
            GreenTrivia::empty(),
            GreenTrivia::empty(),
            vec![Diagnostic::with_args(
                ErrorCode::UnexpectedToken,
                TextRange::new(3.into(), 4.into()),
                [")"],
            )],
        );
        let semicolon = GreenToken::new(
            SyntaxKind::SEMICOLON,
            ";",
            GreenTrivia::new(vec![TriviaPiece::Skipped(skipped)]),
            GreenTrivia::empty(),
            Vec::new(),
        );

        let mut builder = Builder::new();
        builder.start_node(SyntaxKind::EXPRESSION_STMT);
        builder.start_node(SyntaxKind::IDENTIFIER_NAME);
        builder.token(token(SyntaxKind::IDENT, "x", " ", " "));
        builder.finish_node();
        builder.token(semicolon);
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn ranges_skip_outer_trivia() {
        let green = sample();
        let root = SyntaxNode::new_root(&green);

        assert_eq!(root.full_range(), TextRange::new(0.into(), 5.into()));
        assert_eq!(root.text_range(), TextRange::new(1.into(), 5.into()));
        assert_eq!(root.full_text(), " x );");
        assert_eq!(root.text(), "x );");

        let semicolon = root.child_token(SyntaxKind::SEMICOLON).unwrap();
        assert_eq!(semicolon.text_range(), TextRange::new(4.into(), 5.into()));
        let skipped = semicolon.skipped_tokens().collect::<Vec<_>>();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].text_range(), TextRange::new(3.into(), 4.into()));
    }

    #[test]
    fn diagnostics_come_from_skipped_tokens() {
        let green = sample();
        let root = SyntaxNode::new_root(&green);
        let diagnostics = root.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), ErrorCode::UnexpectedToken);
        assert!(root.contains_diagnostics());
    }

    #[test]
    fn descendants_are_preorder() {
        let green = sample();
        let root = SyntaxNode::new_root(&green);
        let kinds = root.descendants().map(SyntaxNode::kind).collect::<Vec<_>>();
        assert_eq!(kinds, [SyntaxKind::EXPRESSION_STMT, SyntaxKind::IDENTIFIER_NAME]);
    }

    #[test]
    fn dump_marks_skipped_tokens() {
        let green = sample();
        let dump = SyntaxNode::new_root(&green).debug_dump();
        assert_eq!(
            dump,
            "EXPRESSION_STMT\n  IDENTIFIER_NAME\n    IDENT \"x\"\n  skipped R_PAREN \")\"\n  SEMICOLON \";\"\n"
        );
    }
}
