use std::mem;

use drop_bomb::DropBomb;
use sable_errors::{Diagnostic, ErrorCode};
use sable_tokenizer::Token;
use sable_yellow::SyntaxKind::{self, *};
use sable_yellow::{Builder, GreenNode, GreenToken, GreenTrivia, TriviaPiece};
use text_size::TextRange;

use crate::lookahead::Lookahead;
use crate::options::{Feature, ParseOptions};

/// Nesting limit for recursive productions and scans.
pub(crate) const MAX_DEPTH: u32 = 64;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    options: &'t ParseOptions,
    depth: u32,
    in_async: bool,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, options: &'t ParseOptions) -> Self {
        let tokens = sable_tokenizer::tokenize(text, options.offset);
        log::trace!("tokenized {} tokens", tokens.len());

        Self { text, tokens, pos: 0, events: Vec::new(), options, depth: 0, in_async: false }
    }

    pub(crate) fn options(&self) -> &'t ParseOptions {
        self.options
    }

    /// A scan cursor positioned at the current token.
    pub(crate) fn look(&self) -> Lookahead<'_> {
        Lookahead::new(self.text, &self.tokens, self.pos, self.in_async)
    }

    fn token(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    /// Index of the current token; only useful for progress checks.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.token(n).kind
    }

    pub(crate) fn nth_contextual(&self, n: usize) -> SyntaxKind {
        self.token(n).contextual_kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_contextual(&self, kind: SyntaxKind) -> bool {
        self.nth_at_contextual(0, kind)
    }

    pub(crate) fn nth_at_contextual(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == IDENT && self.nth_contextual(n) == kind
    }

    pub(crate) fn at_true_identifier(&self) -> bool {
        self.look().is_true_identifier(0)
    }

    pub(crate) fn at_underscore(&self) -> bool {
        self.look().is_underscore(0)
    }

    pub(crate) fn current_text(&self) -> &'t str {
        self.token(0).text(self.text)
    }

    pub(crate) fn current_range(&self) -> TextRange {
        self.token(0).range
    }

    /// Runs `f` with the async context set to `in_async`.
    pub(crate) fn with_async<R>(&mut self, in_async: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = mem::replace(&mut self.in_async, in_async);
        let result = f(self);
        self.in_async = saved;
        result
    }

    /// Consumes the current token. End of file is never consumed.
    pub(crate) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consumes the current token under a different kind, used for
    /// contextual keywords.
    pub(crate) fn bump_remap(&mut self, kind: SyntaxKind) {
        self.bump_composite(kind, 1);
    }

    /// Consumes `n_raw` adjacent tokens as one token of `kind`.
    pub(crate) fn bump_composite(&mut self, kind: SyntaxKind, n_raw: usize) {
        if self.at(EOF) {
            return;
        }
        self.pos += n_raw;
        self.events.push(Event::Token { kind, n_raw });
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.bump();
        true
    }

    pub(crate) fn eat_contextual(&mut self, kind: SyntaxKind) -> bool {
        if !self.at_contextual(kind) {
            return false;
        }
        self.bump_remap(kind);
        true
    }

    /// Consumes `kind` or inserts it as a missing token with the matching
    /// "expected" diagnostic.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }

        let diagnostic = self.expected_diagnostic(kind);
        self.missing(kind, Some(diagnostic));
        false
    }

    pub(crate) fn expect_contextual(&mut self, kind: SyntaxKind) -> bool {
        if self.eat_contextual(kind) {
            return true;
        }

        let text = kind.text().unwrap_or_default();
        let diagnostic = Diagnostic::with_args(ErrorCode::SyntaxError, self.missing_range(), [text]);
        self.missing(kind, Some(diagnostic));
        false
    }

    fn expected_diagnostic(&self, kind: SyntaxKind) -> Diagnostic {
        let range = self.missing_range();
        match kind {
            SEMICOLON => Diagnostic::new(ErrorCode::SemicolonExpected, range),
            IDENT if self.current().is_keyword() => {
                Diagnostic::with_args(ErrorCode::IdentifierExpectedKeyword, range, [self.current_text()])
            }
            IDENT => Diagnostic::new(ErrorCode::IdentifierExpected, range),
            R_PAREN => Diagnostic::new(ErrorCode::CloseParenExpected, range),
            L_BRACE => Diagnostic::new(ErrorCode::LbraceExpected, range),
            R_BRACE => Diagnostic::new(ErrorCode::RbraceExpected, range),
            _ => Diagnostic::with_args(ErrorCode::SyntaxError, range, [kind.text().unwrap_or_default()]),
        }
    }

    /// Where a diagnostic for a token that is not there goes: right after
    /// the previous token when a line break follows it, otherwise on the
    /// current token.
    pub(crate) fn missing_range(&self) -> TextRange {
        if let Some(previous) = self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos)) {
            if previous.has_trailing_end_of_line() {
                return TextRange::empty(previous.range.end());
            }
        }
        self.current_range()
    }

    /// Inserts a zero-width token of `kind`.
    pub(crate) fn missing(&mut self, kind: SyntaxKind, diagnostic: Option<Diagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.events.push(Event::Error(diagnostic));
        }
        self.events.push(Event::Missing { kind });
    }

    /// Reports `code` on the current token. The diagnostic travels with the
    /// next token, skipped token or missing token emitted.
    pub(crate) fn error(&mut self, code: ErrorCode) {
        self.push_error(Diagnostic::new(code, self.current_range()));
    }

    pub(crate) fn error_with_current_text(&mut self, code: ErrorCode) {
        let diagnostic = Diagnostic::with_args(code, self.current_range(), [self.current_text()]);
        self.push_error(diagnostic);
    }

    pub(crate) fn push_error(&mut self, diagnostic: Diagnostic) {
        log::trace!("diagnostic {diagnostic}");
        self.events.push(Event::Error(diagnostic));
    }

    /// Reports the feature as unavailable on the current token when the
    /// language version is too old. Parsing continues as if it were allowed.
    pub(crate) fn feature(&mut self, feature: Feature) {
        if self.options.is_available(feature) {
            return;
        }

        let version = self.options.language_version;
        let diagnostic = Diagnostic::with_args(
            ErrorCode::FeatureNotAvailable,
            self.current_range(),
            [feature.name(), version.as_str(), feature.required_version().as_str()],
        );
        self.push_error(diagnostic);
    }

    /// Moves the current token into trivia.
    pub(crate) fn skip(&mut self) {
        if self.at(EOF) {
            return;
        }
        self.pos += 1;
        self.events.push(Event::Skip);
    }

    pub(crate) fn skip_with_error(&mut self, code: ErrorCode) {
        self.error_with_current_text(code);
        self.skip();
    }

    pub(crate) fn skip_unexpected(&mut self) {
        self.skip_with_error(ErrorCode::UnexpectedToken);
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint { pos: self.pos, events: self.events.len() }
    }

    /// Forgets everything parsed since `checkpoint`.
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        log::trace!("rewinding from token {} to {}", self.pos, checkpoint.pos);
        self.pos = checkpoint.pos;
        self.events.truncate(checkpoint.events);
    }

    /// Enters one level of nesting; `false` once the limit is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Recovery for input nested past the limit: reports it once and skips
    /// to the end of the enclosing balanced region.
    pub(crate) fn skip_too_deep(&mut self) {
        log::debug!("nesting limit reached at token {}", self.pos);
        self.error(ErrorCode::ExpressionTooComplex);

        let mut depth = 0usize;
        loop {
            match self.current() {
                EOF => break,
                L_PAREN | L_BRACK | L_BRACE => depth += 1,
                R_PAREN | R_BRACK | R_BRACE if depth == 0 => break,
                R_PAREN | R_BRACK | R_BRACE => depth -= 1,
                SEMICOLON | COMMA if depth == 0 => break,
                _ => {}
            }
            self.skip();
        }
    }

    /// Consumes the end-of-file token, which carries the trailing trivia of
    /// the text and any tokens skipped before it.
    pub(crate) fn finish_eof(&mut self) {
        debug_assert!(self.at(EOF));
        self.pos += 1;
        self.events.push(Event::Token { kind: EOF, n_raw: 1 });
    }

    pub(crate) fn build_tree(self) -> GreenNode {
        let Parser { text, tokens, mut events, .. } = self;
        let mut builder = Builder::new();
        let mut tokens = tokens.into_iter();
        let mut forward_parents = Vec::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for i in 0..events.len() {
            match mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => builder.finish_node(),
                Event::Token { kind, n_raw } => {
                    let raw = tokens.by_ref().take(n_raw).collect::<Vec<_>>();
                    let token = glue(text, kind, raw, mem::take(&mut skipped), mem::take(&mut errors));
                    builder.token(token);
                }
                Event::Missing { kind } => {
                    let leading = GreenTrivia::new(mem::take(&mut skipped));
                    builder.token(GreenToken::missing(kind, leading, mem::take(&mut errors)));
                }
                Event::Skip => {
                    let Some(token) = tokens.next() else { unreachable!() };
                    let mut diagnostics = mem::take(&mut errors);
                    diagnostics.extend(token.diagnostics);
                    let green = GreenToken::new(
                        token.kind,
                        &text[token.range],
                        token.leading,
                        token.trailing,
                        diagnostics,
                    );
                    skipped.push(TriviaPiece::Skipped(green));
                }
                Event::Error(diagnostic) => errors.push(diagnostic),
            }
        }

        builder.finish()
    }
}

/// Turns raw tokens into one green token. Several raw tokens only occur for
/// shift operators, whose parts are known to touch.
fn glue(
    text: &str,
    kind: SyntaxKind,
    raw: Vec<Token>,
    skipped: Vec<TriviaPiece>,
    mut diagnostics: Vec<Diagnostic>,
) -> GreenToken {
    let mut raw = raw.into_iter();
    let Some(first) = raw.next() else { unreachable!() };
    let start = first.range.start();
    let mut end = first.range.end();
    let mut trailing = first.trailing;
    diagnostics.extend(first.diagnostics);

    for part in raw {
        end = part.range.end();
        trailing = part.trailing;
        diagnostics.extend(part.diagnostics);
    }

    let leading = first.leading.prepend(&skipped);
    GreenToken::new(kind, &text[TextRange::new(start, end)], leading, trailing, diagnostics)
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token { kind: SyntaxKind, n_raw: usize },
    Missing { kind: SyntaxKind },
    Skip,
    Error(Diagnostic),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: TOMBSTONE, forward_parent: None };
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    pos: usize,
    events: usize,
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Self { position: pos, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker { pos: self.position, kind }
    }

    /// Drops the node; its children attach to the enclosing node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        if self.position as usize == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Start { kind: TOMBSTONE, forward_parent: None }) => {}
                _ => unreachable!(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker {
    pos: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    pub(crate) fn kind(self) -> SyntaxKind {
        self.kind
    }

    /// Starts a node that will wrap this one.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
