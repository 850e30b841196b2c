//! Tokenizer producing tokens with attached leading and trailing trivia.
//!
//! Trailing trivia runs up to and including the first end of line; everything
//! after belongs to the next token's leading trivia. `>` is always produced
//! as a single token so the parser can close nested type argument lists;
//! shift operators are recombined from adjacent tokens by the parser.

mod cursor;

use std::mem;

use cursor::Cursor;
use sable_errors::{Diagnostic, ErrorCode};
pub use sable_yellow::SyntaxKind;
use sable_yellow::SyntaxKind::*;
use sable_yellow::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// The contextual keyword an identifier spells, or `kind` itself.
    pub contextual_kind: SyntaxKind,
    /// Range of the token text, trivia excluded.
    pub range: TextRange,
    pub leading: GreenTrivia,
    pub trailing: GreenTrivia,
    pub diagnostics: Vec<Diagnostic>,
}

impl Token {
    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        &source[self.range]
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::new(self.range.start() - self.leading.len(), self.range.end() + self.trailing.len())
    }

    pub fn has_trailing_end_of_line(&self) -> bool {
        self.trailing.contains_end_of_line()
    }
}

/// Tokenizes `text` starting at `offset`, returning every token up to and
/// including the end-of-file token.
pub fn tokenize(text: &str, offset: TextSize) -> Vec<Token> {
    let mut tokenizer = Tokenizer::with_offset(text, offset);
    let mut tokens = Vec::with_capacity(text.len() / 4 + 1);

    loop {
        let token = tokenizer.next_token();
        let is_eof = token.kind == EOF;
        tokens.push(token);
        if is_eof {
            return tokens;
        }
    }
}

/// Clamps `offset` to the text and moves it back to a char boundary.
pub fn start_offset(text: &str, offset: TextSize) -> TextSize {
    let mut start = usize::from(offset).min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    TextSize::of(&text[..start])
}

pub struct Tokenizer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    at_line_start: bool,
    trivia_pieces: Vec<TriviaPiece>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        Self::with_offset(text, TextSize::new(0))
    }

    /// Starts tokenizing at `offset`; ranges stay relative to the whole text.
    pub fn with_offset(text: &'t str, offset: TextSize) -> Self {
        let start = usize::from(start_offset(text, offset));
        let at_line_start = text[..start].chars().next_back().is_none_or(is_end_of_line);

        Self {
            text,
            cursor: Cursor::new(&text[start..]),
            at_line_start,
            trivia_pieces: Vec::with_capacity(4),
            diagnostics: Vec::new(),
        }
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.remaining()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn current_text(&self) -> &'t str {
        &self.text[self.range()]
    }

    fn error(&mut self, code: ErrorCode, range: TextRange) {
        self.diagnostics.push(Diagnostic::new(code, range));
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia(false);
        let leading = GreenTrivia::new(mem::take(&mut self.trivia_pieces));

        let (kind, range) = self.token_kind();
        let contextual_kind = match kind {
            IDENT if !self.text[range].starts_with('@') => {
                SyntaxKind::from_contextual_keyword(&self.text[range]).unwrap_or(IDENT)
            }
            _ => kind,
        };

        if kind != EOF {
            self.trivia(true);
        }
        let trailing = GreenTrivia::new(mem::take(&mut self.trivia_pieces));

        Token {
            kind,
            contextual_kind,
            range,
            leading,
            trailing,
            diagnostics: mem::take(&mut self.diagnostics),
        }
    }

    fn push_trivia(&mut self, kind: TriviaPieceKind) {
        let piece = TriviaPiece::new(kind, self.current_text());
        self.trivia_pieces.push(piece);
        self.cursor.reset_pos_within_token();
    }

    fn trivia(&mut self, trailing: bool) {
        loop {
            let kind = match self.cursor.peek() {
                _ if self.cursor.is_eof() => break,
                '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}' => {
                    if self.cursor.advance() == '\r' {
                        self.cursor.eat('\n');
                    }
                    self.push_trivia(TriviaPieceKind::EndOfLine);
                    self.at_line_start = true;
                    if trailing {
                        break;
                    }
                    continue;
                }
                c if c.is_whitespace() => {
                    self.cursor.advance_while(|c| c.is_whitespace() && !is_end_of_line(c));
                    TriviaPieceKind::Whitespace
                }
                '/' if self.cursor.second() == '/' => {
                    let doc = self.cursor.nth(2) == '/' && self.cursor.nth(3) != '/';
                    self.cursor.advance_while(|c| !is_end_of_line(c));
                    if doc { TriviaPieceKind::DocComment } else { TriviaPieceKind::SingleLineComment }
                }
                '/' if self.cursor.second() == '*' => {
                    self.block_comment();
                    TriviaPieceKind::MultiLineComment
                }
                '#' if !trailing && self.at_line_start => {
                    self.cursor.advance_while(|c| !is_end_of_line(c));
                    TriviaPieceKind::PreprocessorDirective
                }
                _ => break,
            };

            if kind != TriviaPieceKind::Whitespace {
                self.at_line_start = false;
            }
            self.push_trivia(kind);
        }
    }

    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        loop {
            if self.cursor.is_eof() {
                let range = self.range();
                self.error(ErrorCode::UnterminatedComment, range);
                return;
            }
            if self.cursor.advance() == '*' && self.cursor.eat('/') {
                return;
            }
        }
    }

    fn token_kind(&mut self) -> (SyntaxKind, TextRange) {
        let kind = if self.cursor.is_eof() { EOF } else { self.scan_token() };

        let range = self.range();
        self.cursor.reset_pos_within_token();
        self.at_line_start = false;

        (kind, range)
    }

    fn scan_token(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '{' => L_BRACE,
            '}' => R_BRACE,
            '(' => L_PAREN,
            ')' => R_PAREN,
            '[' => L_BRACK,
            ']' => R_BRACK,
            ';' => SEMICOLON,
            ',' => COMMA,
            '~' => TILDE,
            '.' if self.cursor.peek().is_ascii_digit() => self.number('.'),
            '.' => {
                if self.cursor.eat('.') {
                    DOT_DOT
                } else {
                    DOT
                }
            }
            ':' => {
                if self.cursor.eat(':') {
                    COLON_COLON
                } else {
                    COLON
                }
            }
            '?' => {
                if self.cursor.eat('?') {
                    if self.cursor.eat('=') { QUESTION_QUESTION_EQ } else { QUESTION_QUESTION }
                } else {
                    QUESTION
                }
            }
            '!' => self.with_eq(BANG, BANG_EQ),
            '=' => {
                if self.cursor.eat('=') {
                    EQ_EQ
                } else if self.cursor.eat('>') {
                    FAT_ARROW
                } else {
                    EQ
                }
            }
            '<' => {
                if self.cursor.eat('<') {
                    self.with_eq(LT_LT, LT_LT_EQ)
                } else {
                    self.with_eq(LT, LT_EQ)
                }
            }
            '>' => self.with_eq(GT, GT_EQ),
            '+' => {
                if self.cursor.eat('+') {
                    PLUS_PLUS
                } else {
                    self.with_eq(PLUS, PLUS_EQ)
                }
            }
            '-' => {
                if self.cursor.eat('-') {
                    MINUS_MINUS
                } else if self.cursor.eat('>') {
                    ARROW
                } else {
                    self.with_eq(MINUS, MINUS_EQ)
                }
            }
            '*' => self.with_eq(STAR, STAR_EQ),
            '/' => self.with_eq(SLASH, SLASH_EQ),
            '%' => self.with_eq(PERCENT, PERCENT_EQ),
            '^' => self.with_eq(CARET, CARET_EQ),
            '&' => {
                if self.cursor.eat('&') {
                    AMP_AMP
                } else {
                    self.with_eq(AMP, AMP_EQ)
                }
            }
            '|' => {
                if self.cursor.eat('|') {
                    PIPE_PIPE
                } else {
                    self.with_eq(PIPE, PIPE_EQ)
                }
            }
            '\'' => self.char_literal(),
            '"' => {
                if self.cursor.peek() == '"' && self.cursor.second() == '"' {
                    self.raw_string(1)
                } else {
                    self.regular_string();
                    STRING_LITERAL
                }
            }
            '@' => self.at_prefixed(),
            '$' => self.interpolated_string(),
            c @ '0'..='9' => self.number(c),
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);
                SyntaxKind::from_keyword(self.current_text()).unwrap_or(IDENT)
            }
            c => {
                let range = self.range();
                self.diagnostics.push(Diagnostic::with_args(
                    ErrorCode::UnexpectedCharacter,
                    range,
                    [c.to_string()],
                ));
                UNKNOWN
            }
        }
    }

    fn with_eq(&mut self, plain: SyntaxKind, with_eq: SyntaxKind) -> SyntaxKind {
        if self.cursor.eat('=') { with_eq } else { plain }
    }

    fn at_prefixed(&mut self) -> SyntaxKind {
        match self.cursor.peek() {
            '"' => {
                self.cursor.advance();
                self.verbatim_string_body(false);
                STRING_LITERAL
            }
            '$' if self.cursor.second() == '"' => {
                self.cursor.advance();
                self.cursor.advance();
                self.verbatim_string_body(true);
                INTERPOLATED_STRING
            }
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);
                IDENT
            }
            _ => {
                let range = self.range();
                self.diagnostics.push(Diagnostic::with_args(
                    ErrorCode::UnexpectedCharacter,
                    range,
                    ["@"],
                ));
                UNKNOWN
            }
        }
    }

    fn interpolated_string(&mut self) -> SyntaxKind {
        let mut dollars = 1;
        while self.cursor.eat('$') {
            dollars += 1;
        }

        match (self.cursor.peek(), self.cursor.second(), self.cursor.nth(2)) {
            ('"', '"', '"') => {
                self.cursor.advance();
                self.raw_string(1);
                INTERPOLATED_STRING
            }
            ('"', _, _) if dollars == 1 => {
                self.cursor.advance();
                self.interpolated_body();
                INTERPOLATED_STRING
            }
            ('@', '"', _) if dollars == 1 => {
                self.cursor.advance();
                self.cursor.advance();
                self.verbatim_string_body(true);
                INTERPOLATED_STRING
            }
            _ => {
                let range = self.range();
                self.diagnostics.push(Diagnostic::with_args(
                    ErrorCode::UnexpectedCharacter,
                    range,
                    ["$"],
                ));
                UNKNOWN
            }
        }
    }

    fn number(&mut self, first: char) -> SyntaxKind {
        let mut is_real = first == '.';

        if first == '0' && matches!(self.cursor.peek(), 'x' | 'X' | 'b' | 'B') {
            let hex = matches!(self.cursor.advance(), 'x' | 'X');
            let start = self.cursor.pos_within_token();
            self.cursor.advance_while(|c| c == '_' || if hex { c.is_ascii_hexdigit() } else { matches!(c, '0' | '1') });
            if self.cursor.pos_within_token() == start {
                let range = self.range();
                self.error(ErrorCode::InvalidNumber, range);
            }
            self.integer_suffix();
            return NUMERIC_LITERAL;
        }

        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');

        if !is_real && self.cursor.peek() == '.' && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
            is_real = true;
        }

        if matches!(self.cursor.peek(), 'e' | 'E') {
            let after = self.cursor.second();
            let exponent_digit = if matches!(after, '+' | '-') { self.cursor.nth(2) } else { after };
            if exponent_digit.is_ascii_digit() {
                self.cursor.advance();
                self.cursor.eat('+');
                self.cursor.eat('-');
                self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
                is_real = true;
            }
        }

        match self.cursor.peek() {
            'f' | 'F' | 'd' | 'D' | 'm' | 'M' => {
                self.cursor.advance();
            }
            _ if !is_real => self.integer_suffix(),
            _ => {}
        }

        NUMERIC_LITERAL
    }

    fn integer_suffix(&mut self) {
        if matches!(self.cursor.peek(), 'u' | 'U') {
            self.cursor.advance();
            if matches!(self.cursor.peek(), 'l' | 'L') {
                self.cursor.advance();
            }
        } else if matches!(self.cursor.peek(), 'l' | 'L') {
            self.cursor.advance();
            if matches!(self.cursor.peek(), 'u' | 'U') {
                self.cursor.advance();
            }
        }
    }

    fn char_literal(&mut self) -> SyntaxKind {
        let mut chars = 0;

        loop {
            match self.cursor.peek() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                c if self.cursor.is_eof() || is_end_of_line(c) => {
                    let range = self.range();
                    self.error(ErrorCode::NewlineInConstant, range);
                    return CHAR_LITERAL;
                }
                '\\' => {
                    self.cursor.advance();
                    self.escape();
                    chars += 1;
                }
                _ => {
                    self.cursor.advance();
                    chars += 1;
                }
            }
        }

        let range = self.range();
        match chars {
            0 => self.error(ErrorCode::EmptyCharLiteral, range),
            1 => {}
            _ => self.error(ErrorCode::TooManyCharsInCharLiteral, range),
        }

        CHAR_LITERAL
    }

    fn escape(&mut self) {
        match self.cursor.advance() {
            'u' => self.hex_digits(4),
            'U' => self.hex_digits(8),
            'x' => self.hex_digits(4),
            _ => {}
        }
    }

    fn hex_digits(&mut self, max: usize) {
        for _ in 0..max {
            if !self.cursor.peek().is_ascii_hexdigit() {
                return;
            }
            self.cursor.advance();
        }
    }

    /// Body of `"..."`, the opening quote already consumed.
    fn regular_string(&mut self) {
        loop {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    return;
                }
                c if self.cursor.is_eof() || is_end_of_line(c) => {
                    let range = self.range();
                    self.error(ErrorCode::NewlineInConstant, range);
                    return;
                }
                '\\' => {
                    self.cursor.advance();
                    self.escape();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Body of `@"..."`, where `""` is an escaped quote.
    fn verbatim_string_body(&mut self, interpolated: bool) {
        loop {
            if self.cursor.is_eof() {
                let range = self.range();
                self.error(ErrorCode::UnterminatedString, range);
                return;
            }
            match self.cursor.advance() {
                '"' if self.cursor.eat('"') => {}
                '"' => return,
                '{' if interpolated && !self.cursor.eat('{') => self.interpolation_hole(),
                _ => {}
            }
        }
    }

    /// Body of `$"..."`, the opening quote already consumed.
    fn interpolated_body(&mut self) {
        loop {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    return;
                }
                c if self.cursor.is_eof() || is_end_of_line(c) => {
                    let range = self.range();
                    self.error(ErrorCode::NewlineInConstant, range);
                    return;
                }
                '\\' => {
                    self.cursor.advance();
                    self.escape();
                }
                '{' => {
                    self.cursor.advance();
                    if !self.cursor.eat('{') {
                        self.interpolation_hole();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Skips an interpolation hole up to its closing brace, stepping over
    /// nested strings and braces.
    fn interpolation_hole(&mut self) {
        let mut depth = 1usize;

        while !self.cursor.is_eof() {
            match self.cursor.advance() {
                '{' | '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1).max(1),
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '"' => self.regular_string(),
                '\'' => {
                    self.char_literal();
                }
                '@' if self.cursor.peek() == '"' => {
                    self.cursor.advance();
                    self.verbatim_string_body(false);
                }
                '$' if self.cursor.peek() == '"' => {
                    self.cursor.advance();
                    self.interpolated_body();
                }
                _ => {}
            }
        }
    }

    /// Raw string whose opening run starts at the current `"`; `consumed` of
    /// its quotes were already taken.
    fn raw_string(&mut self, consumed: usize) -> SyntaxKind {
        let mut quotes = consumed;
        while self.cursor.eat('"') {
            quotes += 1;
        }

        loop {
            if self.cursor.is_eof() {
                let range = self.range();
                self.error(ErrorCode::UnterminatedRawString, range);
                return RAW_STRING_LITERAL;
            }

            if self.cursor.advance() == '"' {
                let mut run = 1;
                while run < quotes && self.cursor.eat('"') {
                    run += 1;
                }
                if run == quotes {
                    return RAW_STRING_LITERAL;
                }
            }
        }
    }
}

fn is_end_of_line(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests;
