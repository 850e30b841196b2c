//! Token scans that decide between readings before anything is parsed.
//!
//! Every scan runs on a copy of the cursor, so callers only observe the
//! answer. A scan never reports diagnostics.

use sable_yellow::SyntaxKind::{self, *};

use crate::grammar::types::TypeMode;
use crate::lookahead::Lookahead;

/// What a type scan learned about the tokens it covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanTypeFlags {
    NotType,
    /// Only a type can look like this: predefined types, arrays, function
    /// pointers, generics followed by something only types allow.
    MustBeType,
    /// `A<B>` where the argument list can only be type arguments.
    GenericTypeOrMethod,
    /// `A<B>` that could also be two comparisons.
    GenericTypeOrExpression,
    /// A plain or dotted name.
    NonGenericTypeOrExpression,
    /// `A::B`.
    AliasQualifiedName,
    /// Ends in `?`.
    NullableType,
    /// Ends in `*`, which could be a multiplication.
    PointerOrMultiplication,
    TupleType,
}

use ScanTypeFlags::*;

/// How `<` after a name in expression position reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeArgumentListKind {
    NotTypeArgumentList,
    PossibleTypeArgumentList,
    DefiniteTypeArgumentList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LambdaShape {
    /// `x => ...`, possibly after attributes and modifiers.
    pub(crate) simple: bool,
    /// The explicit return type is nullable and begins with an identifier,
    /// so a `:` after the body means the tokens were a conditional.
    pub(crate) speculative: bool,
}

/// Where a possible declaration expression sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeclarationContext {
    FirstTupleElement,
    AfterTupleComma,
    /// `out` arguments, `foreach` variables and similar positions where a
    /// declaration is the better guess.
    Other,
}

pub(crate) fn can_start_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || kind.is_predefined_type()
        || matches!(
            kind,
            IDENT
                | INTERPOLATED_STRING
                | THIS_KW
                | BASE_KW
                | NEW_KW
                | TYPEOF_KW
                | SIZEOF_KW
                | DEFAULT_KW
                | CHECKED_KW
                | UNCHECKED_KW
                | DELEGATE_KW
                | STACKALLOC_KW
                | THROW_KW
                | REF_KW
                | STATIC_KW
                | L_PAREN
                | L_BRACK
                | PLUS
                | MINUS
                | BANG
                | TILDE
                | PLUS_PLUS
                | MINUS_MINUS
                | AMP
                | STAR
                | CARET
                | DOT_DOT
        )
}

/// Whether `(T)` followed by `kind` can still be a cast when `T` alone could
/// be an expression.
pub(crate) fn can_follow_cast(kind: SyntaxKind) -> bool {
    !matches!(
        kind,
        AS_KW
            | IS_KW
            | SEMICOLON
            | R_PAREN
            | R_BRACK
            | L_BRACE
            | R_BRACE
            | COMMA
            | EQ
            | PLUS_EQ
            | MINUS_EQ
            | STAR_EQ
            | SLASH_EQ
            | PERCENT_EQ
            | AMP_EQ
            | CARET_EQ
            | PIPE_EQ
            | LT_LT_EQ
            | GT_GT_EQ
            | GT_GT_GT_EQ
            | QUESTION_QUESTION_EQ
            | QUESTION
            | COLON
            | PIPE_PIPE
            | AMP_AMP
            | PIPE
            | CARET
            | AMP
            | EQ_EQ
            | BANG_EQ
            | LT
            | LT_EQ
            | GT
            | GT_EQ
            | LT_LT
            | GT_GT
            | PLUS
            | MINUS
            | STAR
            | SLASH
            | PERCENT
            | PLUS_PLUS
            | MINUS_MINUS
            | L_BRACK
            | DOT
            | ARROW
            | QUESTION_QUESTION
            | EOF
            | SWITCH_KW
            | FAT_ARROW
            | DOT_DOT
    )
}

/// Tokens after `>` that confirm a type argument list in expression
/// position, as in `F<T>(x)` or `A<B>.C`.
fn follows_type_argument_list(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        L_PAREN
            | R_PAREN
            | R_BRACK
            | R_BRACE
            | COLON
            | SEMICOLON
            | COMMA
            | DOT
            | QUESTION
            | EQ_EQ
            | BANG_EQ
            | PIPE
            | CARET
            | AMP_AMP
            | PIPE_PIPE
            | AMP
            | L_BRACK
            | FAT_ARROW
            | EOF
            | GT
    )
}

/// Tokens that continue a constant expression after something that scanned
/// as a type, so the type reading of `is T` loses.
fn continues_constant_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        IDENT
            | L_PAREN
            | L_BRACE
            | PLUS
            | MINUS
            | STAR
            | SLASH
            | PERCENT
            | DOT_DOT
            | L_BRACK
            | DOT
            | ARROW
            | PLUS_PLUS
            | MINUS_MINUS
            | LT_LT
    )
}

impl Lookahead<'_> {
    pub(crate) fn scan_type(&mut self, mode: TypeMode) -> ScanTypeFlags {
        self.nested(NotType, |look| look.scan_type_core(mode))
    }

    fn scan_type_core(&mut self, mode: TypeMode) -> ScanTypeFlags {
        let mut result = self.scan_non_array_type(mode);
        if result == NotType {
            return result;
        }

        while self.at(L_BRACK) {
            self.advance();
            while self.eat(COMMA) {}
            if !self.eat(R_BRACK) {
                return NotType;
            }
            result = MustBeType;

            if self.at(QUESTION) && self.nullable_allowed(mode) {
                self.advance();
                result = NullableType;
            }
        }

        result
    }

    fn scan_non_array_type(&mut self, mode: TypeMode) -> ScanTypeFlags {
        let mut result = match self.kind(0) {
            L_PAREN => self.scan_tuple_type(),
            IDENT if self.is_true_identifier(0) => {
                let mut is_alias = self.kind(1) == COLON_COLON;
                let mut result = self.scan_named_type_part();
                let mut first = true;

                while result != NotType && matches!(self.kind(0), DOT | COLON_COLON) {
                    if !first {
                        is_alias = false;
                    }
                    first = false;
                    self.advance();
                    result = self.scan_named_type_part();
                }

                match result {
                    NotType => return NotType,
                    _ if is_alias && !first => AliasQualifiedName,
                    _ => result,
                }
            }
            kind if kind.is_predefined_type() => {
                self.advance();
                MustBeType
            }
            DELEGATE_KW if self.kind(1) == STAR => self.scan_function_pointer_type(),
            _ => NotType,
        };

        if result == NotType {
            return result;
        }

        loop {
            if self.at(QUESTION) && self.nullable_allowed(mode) {
                self.advance();
                result = NullableType;
            } else if self.at(STAR) && mode != TypeMode::Pattern {
                self.advance();
                result = match result {
                    GenericTypeOrExpression | NonGenericTypeOrExpression => PointerOrMultiplication,
                    GenericTypeOrMethod => MustBeType,
                    other => other,
                };
            } else {
                return result;
            }
        }
    }

    fn scan_named_type_part(&mut self) -> ScanTypeFlags {
        if !self.is_true_identifier(0) {
            return NotType;
        }
        self.advance();

        if !self.at(LT) {
            return NonGenericTypeOrExpression;
        }

        match self.scan_possible_type_argument_list() {
            None => NotType,
            Some(true) => GenericTypeOrMethod,
            Some(false) => GenericTypeOrExpression,
        }
    }

    /// Scans `<...>`. `None` when it cannot be a type argument list;
    /// otherwise whether it can only be one.
    pub(crate) fn scan_possible_type_argument_list(&mut self) -> Option<bool> {
        debug_assert!(self.at(LT));
        self.nested(None, |look| {
            let mut definite = false;

            loop {
                look.advance();

                if matches!(look.kind(0), COMMA | GT) {
                    // `typeof(A<>)` and `typeof(A<,>)`.
                    definite = true;
                } else {
                    match look.scan_type(TypeMode::Normal) {
                        NotType => return None,
                        MustBeType | GenericTypeOrMethod | AliasQualifiedName | TupleType => {
                            definite = true;
                        }
                        NullableType => definite |= matches!(look.kind(0), COMMA | GT),
                        _ => {}
                    }
                }

                if !look.at(COMMA) {
                    break;
                }
            }

            look.eat(GT).then_some(definite)
        })
    }

    /// Decides how `<` after a simple name in an expression reads.
    pub(crate) fn type_argument_list_kind(&self) -> TypeArgumentListKind {
        let mut look = *self;
        match look.scan_possible_type_argument_list() {
            None => TypeArgumentListKind::NotTypeArgumentList,
            Some(true) => TypeArgumentListKind::DefiniteTypeArgumentList,
            Some(false) if follows_type_argument_list(look.kind(0)) => {
                TypeArgumentListKind::PossibleTypeArgumentList
            }
            Some(false) => TypeArgumentListKind::NotTypeArgumentList,
        }
    }

    fn scan_tuple_type(&mut self) -> ScanTypeFlags {
        debug_assert!(self.at(L_PAREN));
        self.advance();

        let mut elements = 0;
        loop {
            if self.scan_type(TypeMode::Normal) == NotType {
                return NotType;
            }
            if self.is_true_identifier(0) {
                self.advance();
            }
            elements += 1;

            if !self.eat(COMMA) {
                break;
            }
        }

        if elements >= 2 && self.eat(R_PAREN) { TupleType } else { NotType }
    }

    fn scan_function_pointer_type(&mut self) -> ScanTypeFlags {
        self.advance();
        self.advance();

        if self.at_contextual(MANAGED_KW) || self.at_contextual(UNMANAGED_KW) {
            self.advance();
            if self.eat(L_BRACK) {
                loop {
                    if !self.eat(IDENT) {
                        return NotType;
                    }
                    if !self.eat(COMMA) {
                        break;
                    }
                }
                if !self.eat(R_BRACK) {
                    return NotType;
                }
            }
        }

        if !self.eat(LT) {
            return NotType;
        }

        loop {
            while matches!(self.kind(0), REF_KW | IN_KW | OUT_KW | READONLY_KW) {
                self.advance();
            }
            if self.scan_type(TypeMode::Normal) == NotType {
                return NotType;
            }
            if !self.eat(COMMA) {
                break;
            }
        }

        if self.eat(GT) { MustBeType } else { NotType }
    }

    /// Whether the `?` at the cursor belongs to the type being scanned.
    pub(crate) fn nullable_allowed(&self, mode: TypeMode) -> bool {
        debug_assert!(self.at(QUESTION));
        match mode {
            TypeMode::Normal => true,
            TypeMode::Pattern => !can_start_expression(self.kind(1)),
            TypeMode::NewExpression => matches!(self.kind(1), L_PAREN | L_BRACK | L_BRACE),
        }
    }

    /// Detects a lambda at the cursor without moving it.
    pub(crate) fn scan_lambda(&self) -> Option<LambdaShape> {
        let mut look = *self;

        while look.at(L_BRACK) {
            if !look.skip_balanced(L_BRACK, R_BRACK) {
                return None;
            }
        }

        loop {
            if look.at(STATIC_KW) || (look.at_contextual(ASYNC_KW) && look.kind(1) != FAT_ARROW) {
                look.advance();
            } else {
                break;
            }
        }

        if look.at(IDENT) && look.kind(1) == FAT_ARROW {
            return Some(LambdaShape { simple: true, speculative: false });
        }

        let mut speculative = false;
        if !look.at(L_PAREN) {
            let starts_with_identifier = look.at(IDENT);
            if look.eat(REF_KW) {
                look.eat(READONLY_KW);
            }
            let flags = look.scan_type(TypeMode::Normal);
            if flags == NotType || !look.at(L_PAREN) {
                return None;
            }
            speculative = flags == NullableType && starts_with_identifier;
        }

        if !look.skip_balanced(L_PAREN, R_PAREN) {
            return None;
        }

        look.at(FAT_ARROW).then_some(LambdaShape { simple: false, speculative })
    }

    /// Quick answer for an identifier at the start of a statement, `None`
    /// when a full type scan is needed.
    fn typed_identifier_start(&self) -> Option<bool> {
        if !self.is_true_identifier(0) {
            return None;
        }

        match self.kind(1) {
            DOT | STAR | QUESTION | L_BRACK | LT | COLON_COLON => None,
            L_PAREN if self.at_contextual(VAR_KW) => None,
            L_PAREN => Some(false),
            IDENT => Some(self.is_true_identifier(1)),
            _ => Some(false),
        }
    }

    /// Whether the statement at the cursor declares locals.
    pub(crate) fn is_possible_local_declaration(&self) -> bool {
        let kind = self.kind(0);
        if kind == REF_KW || matches!(kind, CONST_KW | READONLY_KW | VOLATILE_KW) {
            return true;
        }
        if kind.is_predefined_type() {
            return !matches!(self.kind(1), DOT | L_PAREN);
        }
        if kind == IDENT {
            if let Some(answer) = self.typed_identifier_start() {
                return answer;
            }
        }

        let mut look = *self;
        match look.scan_type(TypeMode::Normal) {
            MustBeType if !matches!(look.kind(0), DOT | L_PAREN) => true,
            NotType => false,
            _ if !look.is_true_identifier(0) => false,
            NullableType => look.declaration_follows_nullable(),
            PointerOrMultiplication => look.declaration_follows_pointer(),
            _ => true,
        }
    }

    /// `T? x` at a statement start: the `:` of a conditional gives it away.
    fn declaration_follows_nullable(&mut self) -> bool {
        self.advance();
        match self.kind(0) {
            COLON => false,
            EQ => {
                self.advance();
                self.initializer_is_not_conditional_tail()
            }
            _ => true,
        }
    }

    /// Scans an initializer to the `;` looking for a `:` that no `?` in it
    /// accounts for, as in `a ? b = c : d;`.
    fn initializer_is_not_conditional_tail(&mut self) -> bool {
        let mut questions = 0usize;
        let mut depth = 0usize;

        loop {
            match self.kind(0) {
                EOF => return true,
                SEMICOLON if depth == 0 => return true,
                L_PAREN | L_BRACK | L_BRACE => depth += 1,
                R_PAREN | R_BRACK | R_BRACE => {
                    if depth == 0 {
                        return true;
                    }
                    depth -= 1;
                }
                QUESTION if depth == 0 => questions += 1,
                COLON if depth == 0 => {
                    if questions == 0 {
                        return false;
                    }
                    questions -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }

    fn declaration_follows_pointer(&mut self) -> bool {
        self.advance();
        matches!(self.kind(0), SEMICOLON | EQ | COMMA | R_PAREN | IN_KW | L_BRACK)
    }

    /// Whether a declaration expression such as `int x` or `var (a, b)`
    /// starts at the cursor.
    pub(crate) fn is_possible_declaration_expression(&self, context: DeclarationContext) -> bool {
        if self.in_async() && self.at_contextual(AWAIT_KW) {
            return false;
        }

        let mut look = *self;
        let type_is_var = look.at_contextual(VAR_KW);
        let type_is_predefined = look.kind(0).is_predefined_type();
        if look.scan_type(TypeMode::Normal) == NotType {
            return false;
        }
        if !look.scan_designation(type_is_var || type_is_predefined) {
            return false;
        }

        match context {
            DeclarationContext::FirstTupleElement => look.at(COMMA),
            DeclarationContext::AfterTupleComma => matches!(look.kind(0), COMMA | R_PAREN),
            DeclarationContext::Other => true,
        }
    }

    pub(crate) fn scan_designation(&mut self, permit_tuple: bool) -> bool {
        match self.kind(0) {
            IDENT => {
                let result = self.is_true_identifier(0);
                self.advance();
                result
            }
            L_PAREN if permit_tuple => self.nested(false, |look| {
                look.advance();
                loop {
                    if !look.scan_designation(true) {
                        return false;
                    }
                    if !look.eat(COMMA) {
                        break;
                    }
                }
                look.eat(R_PAREN)
            }),
            _ => false,
        }
    }

    /// `var (a, b) = ...` or `int (a, b) = ...` on the left of an
    /// assignment.
    pub(crate) fn is_possible_deconstruction_left(&self) -> bool {
        if !(self.at_contextual(VAR_KW) || self.kind(0).is_predefined_type()) {
            return false;
        }

        let mut look = *self;
        look.advance();
        look.at(L_PAREN) && look.scan_designation(true) && look.at(EQ)
    }

    /// Whether the `(` at the cursor starts a cast.
    pub(crate) fn scan_cast(&self) -> bool {
        debug_assert!(self.at(L_PAREN));
        let mut look = *self;
        look.advance();

        let flags = look.scan_type(TypeMode::Normal);
        if flags == NotType || !look.eat(R_PAREN) {
            return false;
        }

        match flags {
            PointerOrMultiplication | NullableType | MustBeType | AliasQualifiedName => true,
            GenericTypeOrMethod | TupleType => look.at(L_BRACK) || can_follow_cast(look.kind(0)),
            _ => {
                if look.at(L_BRACK) {
                    // `(A)[]` is a cast to a collection expression.
                    look.kind(1) == R_BRACK
                } else {
                    can_follow_cast(look.kind(0))
                }
            }
        }
    }

    /// `from x in ...` and `from int x in ...`.
    pub(crate) fn is_query_expression(&self) -> bool {
        if !self.at_contextual(FROM_KW) {
            return false;
        }

        match self.kind(1) {
            kind if kind.is_predefined_type() => true,
            IDENT => !matches!(self.kind(2), SEMICOLON | COMMA | EQ),
            _ => false,
        }
    }

    /// `await` as an operator. Outside async code it only counts when an
    /// operand obviously follows.
    pub(crate) fn is_await_expression(&self) -> bool {
        if !self.at_contextual(AWAIT_KW) {
            return false;
        }
        if self.in_async() {
            return true;
        }

        // `await x;` and `await x = y;` declare a local of type `await`.
        match self.kind(1) {
            IDENT => !matches!(self.kind(2), SEMICOLON | EQ | COMMA),
            next => {
                next.is_literal()
                    || matches!(
                        next,
                        INTERPOLATED_STRING
                            | THIS_KW
                            | BASE_KW
                            | NEW_KW
                            | TYPEOF_KW
                            | DEFAULT_KW
                            | CHECKED_KW
                            | UNCHECKED_KW
                    )
            }
        }
    }

    /// After a type in statement position: `name(` or `name<T>(` starts a
    /// local function.
    pub(crate) fn is_local_function_name(&self) -> bool {
        if !self.is_true_identifier(0) {
            return false;
        }

        match self.kind(1) {
            L_PAREN => true,
            LT => {
                let mut look = *self;
                look.advance();
                look.scan_possible_type_argument_list().is_some() && look.at(L_PAREN)
            }
            _ => false,
        }
    }

    /// After `is`: whether the right side is a plain type rather than a
    /// pattern.
    pub(crate) fn is_plain_type_after_is(&self) -> bool {
        if self.at_contextual(NOT_KW) && can_start_pattern(self.kind(1)) {
            return false;
        }

        let mut look = *self;
        if look.scan_type(TypeMode::Pattern) == NotType {
            return false;
        }
        !continues_constant_expression(look.kind(0))
    }

    /// Whether a type scanned in a pattern should stand as a type pattern
    /// rather than a constant.
    pub(crate) fn is_type_pattern(&self) -> bool {
        let mut look = *self;
        let flags = look.scan_type(TypeMode::Pattern);
        matches!(flags, MustBeType | GenericTypeOrMethod | NullableType | AliasQualifiedName)
            && !continues_constant_expression(look.kind(0))
    }

    /// `(` in a pattern: a positional clause unless it is a single
    /// unnamed element with nothing following the `)`.
    pub(crate) fn paren_pattern_is_positional(&self) -> bool {
        debug_assert!(self.at(L_PAREN));
        if self.kind(1) == R_PAREN || (self.kind(1) == IDENT && self.kind(2) == COLON) {
            return true;
        }

        let mut look = *self;
        look.advance();
        let mut depth = 0usize;
        loop {
            match look.kind(0) {
                EOF | SEMICOLON => return false,
                L_PAREN | L_BRACK | L_BRACE => depth += 1,
                R_PAREN if depth == 0 => break,
                R_PAREN | R_BRACK | R_BRACE => depth = depth.saturating_sub(1),
                COMMA if depth == 0 => return true,
                _ => {}
            }
            look.advance();
        }

        look.advance();
        look.at(L_BRACE) || (look.is_true_identifier(0) && !look.is_pattern_keyword_here())
    }

    /// `and`, `or` and `when` after a pattern continue it instead of naming
    /// a designation.
    pub(crate) fn is_pattern_keyword_here(&self) -> bool {
        let combinator = (self.at_contextual(AND_KW) || self.at_contextual(OR_KW))
            && can_start_pattern(self.kind(1));
        combinator || self.at_contextual(WHEN_KW)
    }

    /// A designation after a type in a pattern.
    pub(crate) fn at_pattern_designation(&self) -> bool {
        self.is_true_identifier(0) && !self.is_pattern_keyword_here()
    }

    /// `name.name:` in a property pattern.
    pub(crate) fn at_expression_colon(&self) -> bool {
        if self.kind(0) != IDENT {
            return false;
        }

        let mut look = *self;
        look.advance();
        let mut dotted = false;
        while look.at(DOT) && look.kind(1) == IDENT {
            look.advance();
            look.advance();
            dotted = true;
        }
        dotted && look.at(COLON)
    }
}

pub(crate) fn can_start_pattern(kind: SyntaxKind) -> bool {
    can_start_expression(kind) || matches!(kind, L_BRACE | LT | LT_EQ | GT | GT_EQ)
}

#[cfg(test)]
mod tests {
    use sable_tokenizer::tokenize;
    use text_size::TextSize;

    use super::*;

    fn with_look<R>(text: &str, f: impl FnOnce(Lookahead<'_>) -> R) -> R {
        let tokens = tokenize(text, TextSize::new(0));
        f(Lookahead::new(text, &tokens, 0, false))
    }

    fn scan(text: &str) -> (ScanTypeFlags, SyntaxKind) {
        with_look(text, |mut look| {
            let flags = look.scan_type(TypeMode::Normal);
            (flags, look.kind(0))
        })
    }

    #[test]
    fn type_scan_flags() {
        assert_eq!(scan("int x"), (MustBeType, IDENT));
        assert_eq!(scan("A.B x"), (NonGenericTypeOrExpression, IDENT));
        assert_eq!(scan("List<int> x"), (GenericTypeOrMethod, IDENT));
        assert_eq!(scan("A<B> x"), (GenericTypeOrExpression, IDENT));
        assert_eq!(scan("A<B>[] x"), (MustBeType, IDENT));
        assert_eq!(scan("T? x"), (NullableType, IDENT));
        assert_eq!(scan("T* x"), (PointerOrMultiplication, IDENT));
        assert_eq!(scan("(int, string) x"), (TupleType, IDENT));
        assert_eq!(scan("(int) x").0, NotType);
        assert_eq!(scan("global::A x"), (AliasQualifiedName, IDENT));
        assert_eq!(scan("global::A.B x"), (NonGenericTypeOrExpression, IDENT));
        assert_eq!(scan("delegate*<int, void> x"), (MustBeType, IDENT));
        assert_eq!(scan("a < b;").0, NotType);
        assert_eq!(scan("T[]? x"), (NullableType, IDENT));
    }

    #[test]
    fn local_declarations() {
        let declaration = |text: &str| with_look(text, |look| look.is_possible_local_declaration());

        assert!(declaration("int x;"));
        assert!(declaration("var x = 1;"));
        assert!(declaration("List<int> xs;"));
        assert!(declaration("T? x = a ? b : c;"));
        assert!(declaration("T* p = null;"));
        assert!(!declaration("a ? b : c;"));
        assert!(!declaration("a ? b = c : d;"));
        assert!(declaration("a * b;"));
        assert!(!declaration("a < b;"));
        assert!(!declaration("F(x);"));
        assert!(!declaration("int.Parse(s);"));
        assert!(!declaration("x = 1;"));
        assert!(!declaration("var (a, b) = t;"));
    }

    #[test]
    fn casts() {
        let cast = |text: &str| with_look(text, |look| look.scan_cast());

        assert!(cast("(int)x"));
        assert!(cast("(A)x"));
        assert!(cast("(A)(x)"));
        assert!(cast("(A<B>)x"));
        assert!(cast("(A)[]"));
        assert!(!cast("(A) + x"));
        assert!(!cast("(a)"));
        assert!(!cast("(a)[0]"));
        assert!(!cast("(a, b)"));
    }

    #[test]
    fn lambdas() {
        let lambda = |text: &str| with_look(text, |look| look.scan_lambda());

        assert_eq!(lambda("x => x"), Some(LambdaShape { simple: true, speculative: false }));
        assert_eq!(lambda("async x => x"), Some(LambdaShape { simple: true, speculative: false }));
        assert_eq!(lambda("(a, b) => a"), Some(LambdaShape { simple: false, speculative: false }));
        assert_eq!(lambda("int () => 1"), Some(LambdaShape { simple: false, speculative: false }));
        assert_eq!(lambda("int? () => 1"), Some(LambdaShape { simple: false, speculative: false }));
        assert_eq!(lambda("T? () => x"), Some(LambdaShape { simple: false, speculative: true }));
        assert_eq!(lambda("ref int () => ref x"), Some(LambdaShape { simple: false, speculative: false }));
        assert_eq!(lambda("[A] () => 1"), Some(LambdaShape { simple: false, speculative: false }));
        assert_eq!(lambda("(a, b)"), None);
        assert_eq!(lambda("F(x)"), None);
        assert_eq!(lambda("T x => y"), None);
    }

    #[test]
    fn type_argument_lists_in_expressions() {
        let kind = |text: &str| {
            with_look(text, |mut look| {
                look.advance();
                look.type_argument_list_kind()
            })
        };

        assert_eq!(kind("F<T>(x)"), TypeArgumentListKind::PossibleTypeArgumentList);
        assert_eq!(kind("F<int>(x)"), TypeArgumentListKind::DefiniteTypeArgumentList);
        assert_eq!(kind("a < b > c"), TypeArgumentListKind::NotTypeArgumentList);
        assert_eq!(kind("a < b"), TypeArgumentListKind::NotTypeArgumentList);
        assert_eq!(kind("A<B>.C"), TypeArgumentListKind::PossibleTypeArgumentList);
    }

    #[test]
    fn declaration_expressions() {
        let first = |text: &str| {
            with_look(text, |look| look.is_possible_declaration_expression(DeclarationContext::FirstTupleElement))
        };

        assert!(first("int x, y"));
        assert!(!first("int x)"));
        assert!(!first("a, b"));
        assert!(with_look("var (a, b)", |look| {
            look.is_possible_declaration_expression(DeclarationContext::Other)
        }));
        assert!(!with_look("A (a, b)", |look| {
            look.is_possible_declaration_expression(DeclarationContext::Other)
        }));
    }

    #[test]
    fn is_right_hand_side() {
        let plain = |text: &str| with_look(text, |look| look.is_plain_type_after_is());

        assert!(plain("int;"));
        assert!(plain("A.B)"));
        assert!(plain("int? ;"));
        assert!(!plain("int x"));
        assert!(!plain("A(1)"));
        assert!(!plain("A { }"));
        assert!(!plain("null"));
        assert!(!plain("1"));
        assert!(plain("int ? a : b"));
        assert!(!plain("not null"));
    }
}
