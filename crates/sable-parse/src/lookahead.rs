use sable_tokenizer::Token;
use sable_yellow::SyntaxKind::{self, *};

use crate::parser::MAX_DEPTH;

/// Rewindable read-only view of the token buffer. Scans move it freely and
/// never produce tree events or diagnostics; peeking past the end keeps
/// returning the end-of-file token. A copy is a mark: scans that may need
/// to back out work on a copy and drop it.
#[derive(Clone, Copy)]
pub(crate) struct Lookahead<'t> {
    text: &'t str,
    tokens: &'t [Token],
    pos: usize,
    in_async: bool,
    depth: u32,
}

impl<'t> Lookahead<'t> {
    pub(crate) fn new(text: &'t str, tokens: &'t [Token], pos: usize, in_async: bool) -> Self {
        debug_assert!(tokens.last().is_some_and(|token| token.kind == EOF));
        Self { text, tokens, pos, in_async, depth: 0 }
    }

    pub(crate) fn token(&self, n: usize) -> &'t Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    pub(crate) fn kind(&self, n: usize) -> SyntaxKind {
        self.token(n).kind
    }

    pub(crate) fn contextual(&self, n: usize) -> SyntaxKind {
        self.token(n).contextual_kind
    }

    pub(crate) fn text(&self, n: usize) -> &'t str {
        self.token(n).text(self.text)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.kind(0) == kind
    }

    pub(crate) fn nth_at_contextual(&self, n: usize, kind: SyntaxKind) -> bool {
        self.kind(n) == IDENT && self.contextual(n) == kind
    }

    pub(crate) fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.nth_at_contextual(0, kind)
    }

    pub(crate) fn is_underscore(&self, n: usize) -> bool {
        self.kind(n) == IDENT && self.text(n) == "_"
    }

    /// An identifier that is not acting as a keyword here.
    pub(crate) fn is_true_identifier(&self, n: usize) -> bool {
        self.kind(n) == IDENT && !(self.in_async && self.contextual(n) == AWAIT_KW)
    }

    pub(crate) fn in_async(&self) -> bool {
        self.in_async
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.token(0);
        if token.kind != EOF {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Whether tokens `n` and `n + 1` touch with no trivia in between.
    pub(crate) fn is_adjacent(&self, n: usize) -> bool {
        self.token(n).range.end() == self.token(n + 1).range.start()
    }

    /// Shift operators spelled with `>`, which the tokenizer always splits.
    /// Returns the combined kind and how many raw tokens it spans.
    pub(crate) fn composite_gt(&self) -> Option<(SyntaxKind, usize)> {
        if !self.at(GT) {
            return None;
        }

        let composite = match (self.kind(1), self.is_adjacent(0)) {
            (GT, true) => match (self.kind(2), self.is_adjacent(1)) {
                (GT, true) => (GT_GT_GT, 3),
                (GT_EQ, true) => (GT_GT_GT_EQ, 3),
                _ => (GT_GT, 2),
            },
            (GT_EQ, true) => (GT_GT_EQ, 2),
            _ => (GT, 1),
        };
        Some(composite)
    }

    /// Runs a nested scan, failing with `fallback` past the nesting limit.
    pub(crate) fn nested<R>(&mut self, fallback: R, scan: impl FnOnce(&mut Self) -> R) -> R {
        if self.depth >= MAX_DEPTH {
            return fallback;
        }
        self.depth += 1;
        let result = scan(self);
        self.depth -= 1;
        result
    }

    /// Moves past a balanced `open ... close` group. Fails at statement
    /// boundaries (`;`, `{`, `}`) and at end of file.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) -> bool {
        debug_assert!(self.at(open));
        let mut depth = 0usize;

        loop {
            match self.kind(0) {
                EOF | SEMICOLON | L_BRACE | R_BRACE => return false,
                kind if kind == open => depth += 1,
                kind if kind == close => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return true;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use sable_tokenizer::tokenize;
    use text_size::TextSize;

    use super::*;

    #[test]
    fn peeking_past_the_end_yields_eof() {
        let text = "a b";
        let tokens = tokenize(text, TextSize::new(0));
        let mut look = Lookahead::new(text, &tokens, 0, false);

        assert_eq!(look.kind(5), EOF);
        look.advance();
        look.advance();
        look.advance();
        look.advance();
        assert_eq!(look.kind(0), EOF);
        assert_eq!(look.kind(1), EOF);
    }

    #[test]
    fn copies_rewind() {
        let text = "a b c";
        let tokens = tokenize(text, TextSize::new(0));
        let mut look = Lookahead::new(text, &tokens, 0, false);

        let outer = look;
        look.advance();
        let inner = look;
        look.advance();
        assert_eq!(look.text(0), "c");
        look = inner;
        assert_eq!(look.text(0), "b");
        look = outer;
        assert_eq!(look.text(0), "a");
    }

    #[test]
    fn shift_operators_need_adjacent_tokens() {
        let text = ">> > > >>= >>>=";
        let tokens = tokenize(text, TextSize::new(0));
        let mut look = Lookahead::new(text, &tokens, 0, false);

        assert_eq!(look.composite_gt(), Some((GT_GT, 2)));
        look.advance();
        look.advance();
        assert_eq!(look.composite_gt(), Some((GT, 1)));
        look.advance();
        look.advance();
        assert_eq!(look.composite_gt(), Some((GT_GT_EQ, 2)));
        look.advance();
        look.advance();
        assert_eq!(look.composite_gt(), Some((GT_GT_GT_EQ, 3)));
    }

    #[test]
    fn balanced_skip_stops_at_statement_boundaries() {
        let text = "(a, (b)) => (c; d)";
        let tokens = tokenize(text, TextSize::new(0));
        let mut look = Lookahead::new(text, &tokens, 0, false);

        assert!(look.skip_balanced(L_PAREN, R_PAREN));
        assert_eq!(look.kind(0), FAT_ARROW);
        look.advance();
        assert!(!look.skip_balanced(L_PAREN, R_PAREN));
    }
}
