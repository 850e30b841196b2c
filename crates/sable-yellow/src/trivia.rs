//! Trivia pieces attached to tokens.

use std::fmt;

use text_size::TextSize;
use triomphe::ThinArc;

use crate::{GreenToken, SyntaxKind};

/// Kinds of textual trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    DocComment,
    PreprocessorDirective,
}

impl TriviaPieceKind {
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            Self::Whitespace => SyntaxKind::WHITESPACE,
            Self::EndOfLine => SyntaxKind::END_OF_LINE,
            Self::SingleLineComment => SyntaxKind::LINE_COMMENT,
            Self::MultiLineComment => SyntaxKind::BLOCK_COMMENT,
            Self::DocComment => SyntaxKind::DOC_COMMENT,
            Self::PreprocessorDirective => SyntaxKind::PREPROCESSOR_DIRECTIVE,
        }
    }
}

/// Either a run of source text that carries no grammar, or a token the parser
/// could not place and kept for fidelity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TriviaPiece {
    Text { kind: TriviaPieceKind, text: Box<str> },
    Skipped(GreenToken),
}

impl TriviaPiece {
    pub fn new(kind: TriviaPieceKind, text: &str) -> Self {
        Self::Text { kind, text: text.into() }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Text { kind, .. } => kind.syntax_kind(),
            Self::Skipped(_) => SyntaxKind::SKIPPED_TOKEN,
        }
    }

    pub fn len(&self) -> TextSize {
        match self {
            Self::Text { text, .. } => TextSize::of(&**text),
            Self::Skipped(token) => token.full_len(),
        }
    }

    pub fn is_end_of_line(&self) -> bool {
        matches!(self, Self::Text { kind: TriviaPieceKind::EndOfLine, .. })
    }

    pub fn write_text(&self, buf: &mut String) {
        match self {
            Self::Text { text, .. } => buf.push_str(text),
            Self::Skipped(token) => token.write_full_text(buf),
        }
    }
}

/// An immutable, shareable run of trivia pieces with its total length.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: Vec<TriviaPiece>) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }

        let total_len = pieces.iter().map(TriviaPiece::len).sum();
        Self { ptr: Some(ThinArc::from_header_and_iter(total_len, pieces.into_iter())) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().is_empty()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    pub fn contains_end_of_line(&self) -> bool {
        self.pieces().iter().any(TriviaPiece::is_end_of_line)
    }

    /// Returns a trivia run holding `prefix` followed by `self`.
    pub fn prepend(&self, prefix: &[TriviaPiece]) -> Self {
        if prefix.is_empty() {
            return self.clone();
        }

        Self::new(prefix.iter().chain(self.pieces()).cloned().collect())
    }

    pub fn write_text(&self, buf: &mut String) {
        for piece in self.pieces() {
            piece.write_text(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_length_is_cached() {
        let trivia = GreenTrivia::new(vec![
            TriviaPiece::new(TriviaPieceKind::Whitespace, "  "),
            TriviaPiece::new(TriviaPieceKind::SingleLineComment, "// hi"),
            TriviaPiece::new(TriviaPieceKind::EndOfLine, "\n"),
        ]);

        assert_eq!(trivia.len(), TextSize::new(8));
        assert!(trivia.contains_end_of_line());

        let mut text = String::new();
        trivia.write_text(&mut text);
        assert_eq!(text, "  // hi\n");
    }

    #[test]
    fn empty_trivia_has_no_allocation() {
        let trivia = GreenTrivia::new(Vec::new());
        assert!(trivia.is_empty());
        assert_eq!(trivia, GreenTrivia::empty());
        assert_eq!(trivia.len(), TextSize::new(0));
    }
}
