use sable_errors::{Diagnostic, ErrorCode};
use sable_yellow::SyntaxKind::{self, *};

use super::patterns;
use super::scan::{
    DeclarationContext, ScanTypeFlags, TypeArgumentListKind, can_start_expression, can_start_pattern,
};
use super::types::{self, TypeMode};
use super::{delimited, identifier_name, invalid_term, items, lambdas, missing_name, queries, separated, stmts};
use crate::options::Feature;
use crate::parser::{CompletedMarker, Marker, Parser};

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Expression,
    Conditional,
    Coalescing,
    ConditionalOr,
    ConditionalAnd,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Switch,
    Range,
    Unary,
    Cast,
    Primary,
}

impl Precedence {
    const ASSIGNMENT: Self = Self::Expression;
    const LAMBDA: Self = Self::Expression;
}

pub(crate) fn expr(p: &mut Parser<'_>) -> CompletedMarker {
    sub_expr(p, Precedence::Expression)
}

/// An expression where `ref e` is also allowed: initializers, returns,
/// conditional branches and lambda bodies.
pub(crate) fn expr_or_ref(p: &mut Parser<'_>) -> CompletedMarker {
    if p.at(REF_KW) && p.look().scan_lambda().is_none() {
        let m = p.start();
        p.feature(Feature::RefLocalsReturns);
        p.bump();
        expr(p);
        return m.complete(p, REF_EXPR);
    }
    expr(p)
}

pub(crate) fn sub_expr(p: &mut Parser<'_>, precedence: Precedence) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let lhs = sub_expr_core(p, precedence);
    p.leave();
    lhs
}

fn sub_expr_core(p: &mut Parser<'_>, precedence: Precedence) -> CompletedMarker {
    let lhs = match p.current() {
        kind if is_prefix_operator(kind) => {
            let m = p.start();
            if kind == CARET {
                p.feature(Feature::Ranges);
            }
            p.bump();
            sub_expr(p, Precedence::Unary);
            m.complete(p, PREFIX_UNARY_EXPR)
        }
        DOT_DOT => {
            let m = p.start();
            p.feature(Feature::Ranges);
            p.bump();
            if can_start_range_operand(p) {
                sub_expr(p, Precedence::Range);
            }
            m.complete(p, RANGE_EXPR)
        }
        THROW_KW => return throw_expr(p),
        IDENT if p.look().is_await_expression() => {
            let m = p.start();
            p.bump_remap(AWAIT_KW);
            sub_expr(p, Precedence::Unary);
            m.complete(p, AWAIT_EXPR)
        }
        IDENT if p.look().is_query_expression() => queries::query_expr(p),
        _ if precedence <= Precedence::ASSIGNMENT && p.look().is_possible_deconstruction_left() => {
            declaration_expr(p)
        }
        _ => term(p, precedence),
    };

    expr_continued(p, lhs, precedence)
}

fn is_prefix_operator(kind: SyntaxKind) -> bool {
    matches!(kind, PLUS | MINUS | BANG | TILDE | PLUS_PLUS | MINUS_MINUS | AMP | STAR | CARET)
}

fn can_start_range_operand(p: &Parser<'_>) -> bool {
    can_start_expression(p.current()) && !p.at(DOT_DOT)
}

fn binary_operator(p: &Parser<'_>) -> Option<(SyntaxKind, usize)> {
    match p.current() {
        GT => p.look().composite_gt(),
        IDENT if p.at_contextual(WITH_KW) && p.nth_at(1, L_BRACE) => Some((WITH_KW, 1)),
        kind if binary_precedence(kind).is_some() => Some((kind, 1)),
        _ => None,
    }
}

fn binary_precedence(kind: SyntaxKind) -> Option<Precedence> {
    let precedence = match kind {
        EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ | AMP_EQ | PIPE_EQ | CARET_EQ
        | LT_LT_EQ | GT_GT_EQ | GT_GT_GT_EQ | QUESTION_QUESTION_EQ => Precedence::ASSIGNMENT,
        QUESTION_QUESTION => Precedence::Coalescing,
        PIPE_PIPE => Precedence::ConditionalOr,
        AMP_AMP => Precedence::ConditionalAnd,
        PIPE => Precedence::LogicalOr,
        CARET => Precedence::LogicalXor,
        AMP => Precedence::LogicalAnd,
        EQ_EQ | BANG_EQ => Precedence::Equality,
        LT | GT | LT_EQ | GT_EQ | IS_KW | AS_KW => Precedence::Relational,
        LT_LT | GT_GT | GT_GT_GT => Precedence::Shift,
        PLUS | MINUS => Precedence::Additive,
        STAR | SLASH | PERCENT => Precedence::Multiplicative,
        SWITCH_KW | WITH_KW => Precedence::Switch,
        DOT_DOT => Precedence::Range,
        _ => return None,
    };
    Some(precedence)
}

fn is_right_associative(kind: SyntaxKind) -> bool {
    binary_precedence(kind) == Some(Precedence::ASSIGNMENT) || kind == QUESTION_QUESTION
}

fn expr_continued(p: &mut Parser<'_>, mut lhs: CompletedMarker, precedence: Precedence) -> CompletedMarker {
    while let Some((op, n_raw)) = binary_operator(p) {
        let Some(op_precedence) = binary_precedence(op) else { break };
        if op_precedence < precedence || (op_precedence == precedence && !is_right_associative(op)) {
            break;
        }

        let m = lhs.precede(p);
        lhs = match op {
            IS_KW => {
                p.bump();
                if p.look().is_plain_type_after_is() {
                    types::type_with(p, TypeMode::Pattern);
                    m.complete(p, BINARY_EXPR)
                } else {
                    p.feature(Feature::PatternMatching);
                    patterns::pattern(p);
                    m.complete(p, IS_PATTERN_EXPR)
                }
            }
            AS_KW => {
                p.bump();
                types::type_with(p, TypeMode::Pattern);
                m.complete(p, BINARY_EXPR)
            }
            SWITCH_KW => switch_expr_arms(p, m),
            WITH_KW => {
                p.feature(Feature::Records);
                p.bump_remap(WITH_KW);
                let initializer = p.start();
                delimited(p, L_BRACE, R_BRACE, COMMA, true, |p| can_start_expression(p.current()), |p| {
                    expr(p);
                });
                initializer.complete(p, WITH_INITIALIZER_EXPR);
                m.complete(p, WITH_EXPR)
            }
            DOT_DOT => {
                p.feature(Feature::Ranges);
                p.bump();
                if can_start_range_operand(p) {
                    sub_expr(p, Precedence::Range);
                }
                m.complete(p, RANGE_EXPR)
            }
            _ if op_precedence == Precedence::ASSIGNMENT => {
                if op == QUESTION_QUESTION_EQ {
                    p.feature(Feature::CoalesceAssignment);
                }
                p.bump_composite(op, n_raw);
                if op == EQ && p.at(REF_KW) {
                    expr_or_ref(p);
                } else {
                    sub_expr(p, op_precedence);
                }
                m.complete(p, ASSIGNMENT_EXPR)
            }
            _ => {
                p.bump_composite(op, n_raw);
                sub_expr(p, op_precedence);
                m.complete(p, BINARY_EXPR)
            }
        };
    }

    if p.at(QUESTION) && precedence <= Precedence::Conditional {
        let m = lhs.precede(p);
        p.bump();
        expr_or_ref(p);
        p.expect(COLON);
        expr_or_ref(p);
        lhs = m.complete(p, CONDITIONAL_EXPR);
    }

    lhs
}

fn throw_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.feature(Feature::ThrowExpressions);
    p.bump();
    sub_expr(p, Precedence::Coalescing);
    m.complete(p, THROW_EXPR)
}

fn term(p: &mut Parser<'_>, precedence: Precedence) -> CompletedMarker {
    let primary = primary_expr(p, precedence);
    if matches!(primary.kind(), SIMPLE_LAMBDA_EXPR | PAREN_LAMBDA_EXPR | ANONYMOUS_METHOD_EXPR) {
        return primary;
    }
    postfix(p, primary)
}

fn primary_expr(p: &mut Parser<'_>, precedence: Precedence) -> CompletedMarker {
    match p.current() {
        IDENT => identifier_term(p, precedence, true),
        THIS_KW => single(p, THIS_EXPR),
        BASE_KW => single(p, BASE_EXPR),
        NUMERIC_LITERAL | CHAR_LITERAL | STRING_LITERAL | TRUE_KW | FALSE_KW | NULL_KW => {
            single(p, LITERAL_EXPR)
        }
        RAW_STRING_LITERAL => {
            p.feature(Feature::RawStringLiterals);
            single(p, LITERAL_EXPR)
        }
        INTERPOLATED_STRING => single(p, INTERPOLATED_STRING_EXPR),
        DEFAULT_KW => default_expr(p),
        TYPEOF_KW => parenthesized_type(p, TYPEOF_EXPR),
        SIZEOF_KW => parenthesized_type(p, SIZEOF_EXPR),
        CHECKED_KW | UNCHECKED_KW => {
            let m = p.start();
            p.bump();
            p.expect(L_PAREN);
            expr(p);
            p.expect(R_PAREN);
            m.complete(p, CHECKED_EXPR)
        }
        NEW_KW => new_expr(p),
        STACKALLOC_KW => stackalloc_expr(p),
        DELEGATE_KW if p.nth_at(1, STAR) => types::ty(p),
        DELEGATE_KW => anonymous_method(p),
        L_PAREN => paren_expr(p, precedence),
        L_BRACK | STATIC_KW | REF_KW => {
            if let Some(lambda) = try_lambda(p, precedence) {
                return lambda;
            }
            match p.current() {
                L_BRACK => collection_expr(p),
                REF_KW => {
                    let m = p.start();
                    p.feature(Feature::RefLocalsReturns);
                    p.bump();
                    sub_expr(p, Precedence::Unary);
                    m.complete(p, REF_EXPR)
                }
                _ => missing_name(p, Some(invalid_term(p))),
            }
        }
        kind if kind.is_predefined_type() => {
            if let Some(lambda) = try_lambda(p, precedence) {
                return lambda;
            }
            single(p, PREDEFINED_TYPE)
        }
        _ => missing_name(p, Some(invalid_term(p))),
    }
}

fn single(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    m.complete(p, kind)
}

fn try_lambda(p: &mut Parser<'_>, precedence: Precedence) -> Option<CompletedMarker> {
    if precedence > Precedence::LAMBDA {
        return None;
    }
    let shape = p.look().scan_lambda()?;
    lambdas::lambda(p, shape)
}

fn identifier_term(p: &mut Parser<'_>, precedence: Precedence, allow_lambda: bool) -> CompletedMarker {
    if allow_lambda && precedence <= Precedence::LAMBDA {
        if let Some(shape) = p.look().scan_lambda() {
            return match lambdas::lambda(p, shape) {
                Some(lambda) => lambda,
                None => identifier_term(p, precedence, false),
            };
        }
    }

    if p.at_contextual(ASYNC_KW) && p.nth_at(1, DELEGATE_KW) {
        return anonymous_method(p);
    }

    if p.nth_at(1, COLON_COLON) {
        let m = p.start();
        identifier_name(p);
        p.bump();
        simple_name(p);
        return m.complete(p, ALIAS_QUALIFIED_NAME);
    }

    simple_name(p)
}

/// `F` or `F<T>` in expression position, where `<` may be a comparison.
fn simple_name(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(IDENT);

    if p.at(LT) && p.look().type_argument_list_kind() != TypeArgumentListKind::NotTypeArgumentList {
        types::type_argument_list(p);
        m.complete(p, GENERIC_NAME)
    } else {
        m.complete(p, IDENTIFIER_NAME)
    }
}

fn postfix(p: &mut Parser<'_>, mut lhs: CompletedMarker) -> CompletedMarker {
    loop {
        lhs = match p.current() {
            L_PAREN => {
                let m = lhs.precede(p);
                argument_list(p);
                m.complete(p, INVOCATION_EXPR)
            }
            L_BRACK => {
                let m = lhs.precede(p);
                bracketed_argument_list(p);
                m.complete(p, ELEMENT_ACCESS_EXPR)
            }
            PLUS_PLUS | MINUS_MINUS => {
                let m = lhs.precede(p);
                p.bump();
                m.complete(p, POSTFIX_UNARY_EXPR)
            }
            DOT | ARROW => {
                let m = lhs.precede(p);
                p.bump();
                simple_name(p);
                m.complete(p, MEMBER_ACCESS_EXPR)
            }
            BANG => {
                let m = lhs.precede(p);
                p.feature(Feature::NullableReferenceTypes);
                p.bump();
                m.complete(p, POSTFIX_UNARY_EXPR)
            }
            QUESTION if matches!(p.nth(1), DOT | L_BRACK) => return conditional_access(p, lhs),
            _ => return lhs,
        };
    }
}

/// `a?.b`, `a?[i]` and everything chained after them.
fn conditional_access(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return lhs;
    }

    let m = lhs.precede(p);
    p.bump();

    let binding = p.start();
    let binding = if p.at(DOT) {
        p.bump();
        simple_name(p);
        binding.complete(p, MEMBER_BINDING_EXPR)
    } else {
        bracketed_argument_list(p);
        binding.complete(p, ELEMENT_BINDING_EXPR)
    };
    postfix(p, binding);

    p.leave();
    m.complete(p, CONDITIONAL_ACCESS_EXPR)
}

fn starts_argument(p: &Parser<'_>) -> bool {
    can_start_expression(p.current()) || matches!(p.current(), OUT_KW | IN_KW)
}

pub(crate) fn argument_list(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(L_PAREN) {
        delimited(p, L_PAREN, R_PAREN, COMMA, false, starts_argument, argument);
    } else {
        p.expect(L_PAREN);
    }
    m.complete(p, ARGUMENT_LIST);
}

fn bracketed_argument_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    if p.at(R_BRACK) {
        let argument = p.start();
        let diagnostic = Diagnostic::new(ErrorCode::ValueExpected, p.current_range());
        missing_name(p, Some(diagnostic));
        argument.complete(p, ARGUMENT);
    } else {
        separated(p, R_BRACK, COMMA, false, starts_argument, argument);
    }

    p.expect(R_BRACK);
    m.complete(p, BRACKETED_ARGUMENT_LIST);
}

fn argument(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(IDENT) && p.nth_at(1, COLON) {
        name_colon(p);
    }

    match p.current() {
        OUT_KW | IN_KW | REF_KW => {
            let out = p.at(OUT_KW);
            p.bump();
            if out && p.look().is_possible_declaration_expression(DeclarationContext::Other) {
                p.feature(Feature::OutVariables);
                declaration_expr(p);
            } else {
                expr(p);
            }
        }
        _ => {
            expr(p);
        }
    }
    m.complete(p, ARGUMENT);
}

pub(crate) fn name_colon(p: &mut Parser<'_>) {
    let m = p.start();
    identifier_name(p);
    p.expect(COLON);
    m.complete(p, NAME_COLON);
}

fn paren_expr(p: &mut Parser<'_>, precedence: Precedence) -> CompletedMarker {
    if let Some(lambda) = try_lambda(p, precedence) {
        return lambda;
    }

    if p.look().scan_cast() {
        let m = p.start();
        p.bump();
        types::ty(p);
        p.expect(R_PAREN);
        sub_expr(p, Precedence::Cast);
        return m.complete(p, CAST_EXPR);
    }

    let m = p.start();
    p.bump();

    if p.at(R_PAREN) {
        missing_name(p, Some(invalid_term(p)));
        p.bump();
        return m.complete(p, PARENTHESIZED_EXPR);
    }

    let element = p.start();
    let named = p.at(IDENT) && p.nth_at(1, COLON);
    if named {
        name_colon(p);
    }
    tuple_element_value(p, DeclarationContext::FirstTupleElement);

    if !named && !p.at(COMMA) {
        element.abandon(p);
        p.expect(R_PAREN);
        return m.complete(p, PARENTHESIZED_EXPR);
    }

    element.complete(p, ARGUMENT);
    p.feature(Feature::Tuples);
    let mut count = 1;
    while p.eat(COMMA) {
        let element = p.start();
        if p.at(IDENT) && p.nth_at(1, COLON) {
            name_colon(p);
        }
        tuple_element_value(p, DeclarationContext::AfterTupleComma);
        element.complete(p, ARGUMENT);
        count += 1;
    }

    if count < 2 {
        p.error(ErrorCode::TupleTooFewElements);
    }
    p.expect(R_PAREN);
    m.complete(p, TUPLE_EXPR)
}

fn tuple_element_value(p: &mut Parser<'_>, context: DeclarationContext) {
    if p.look().is_possible_declaration_expression(context) {
        declaration_expr(p);
    } else {
        expr(p);
    }
}

/// `int x`, `var (a, b)` and other declarations in expression position.
pub(crate) fn declaration_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    types::ty(p);
    designation(p);
    m.complete(p, DECLARATION_EXPR)
}

pub(crate) fn designation(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    match p.current() {
        L_PAREN => {
            delimited(p, L_PAREN, R_PAREN, COMMA, false, |p| matches!(p.current(), IDENT | L_PAREN), |p| {
                designation(p);
            });
            m.complete(p, PARENTHESIZED_VARIABLE_DESIGNATION)
        }
        IDENT if p.at_underscore() => {
            p.feature(Feature::Discards);
            p.bump();
            m.complete(p, DISCARD_DESIGNATION)
        }
        _ => {
            p.expect(IDENT);
            m.complete(p, SINGLE_VARIABLE_DESIGNATION)
        }
    }
}

fn default_expr(p: &mut Parser<'_>) -> CompletedMarker {
    if p.nth_at(1, L_PAREN) {
        return parenthesized_type(p, DEFAULT_EXPR);
    }

    let m = p.start();
    p.feature(Feature::DefaultLiteral);
    p.bump();
    m.complete(p, LITERAL_EXPR)
}

fn parenthesized_type(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.expect(L_PAREN);
    types::ty(p);
    p.expect(R_PAREN);
    m.complete(p, kind)
}

fn new_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    match p.current() {
        L_BRACK => {
            p.bump();
            while p.eat(COMMA) {}
            p.expect(R_BRACK);
            array_initializer_or_missing(p);
            m.complete(p, IMPLICIT_ARRAY_CREATION_EXPR)
        }
        L_BRACE => {
            delimited(p, L_BRACE, R_BRACE, COMMA, true, |p| can_start_expression(p.current()), |p| {
                anonymous_member(p);
            });
            m.complete(p, ANONYMOUS_OBJECT_CREATION_EXPR)
        }
        L_PAREN if !at_tuple_type_creation(p) => {
            p.feature(Feature::TargetTypedNew);
            argument_list(p);
            if p.at(L_BRACE) {
                object_or_collection_initializer(p);
            }
            m.complete(p, IMPLICIT_OBJECT_CREATION_EXPR)
        }
        _ => {
            let has_type = types::can_start_type(p.current());
            let ty = types::type_with(p, TypeMode::NewExpression);
            if ty.kind() == ARRAY_TYPE {
                if p.at(L_BRACE) {
                    array_initializer(p);
                }
                return m.complete(p, ARRAY_CREATION_EXPR);
            }

            let has_arguments = p.at(L_PAREN);
            if has_arguments {
                argument_list(p);
            }
            if p.at(L_BRACE) {
                object_or_collection_initializer(p);
            } else if !has_arguments && has_type {
                p.push_error(Diagnostic::new(ErrorCode::NewRequiresArgs, p.missing_range()));
            }
            m.complete(p, OBJECT_CREATION_EXPR)
        }
    }
}

/// `new (int, string)(...)` creates a tuple type rather than calling a
/// target-typed constructor.
fn at_tuple_type_creation(p: &Parser<'_>) -> bool {
    let mut look = p.look();
    look.scan_type(TypeMode::Normal) == ScanTypeFlags::TupleType
        && matches!(look.kind(0), L_PAREN | L_BRACE | L_BRACK)
}

fn anonymous_member(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(IDENT) && p.nth_at(1, EQ) {
        let name = p.start();
        identifier_name(p);
        p.bump();
        name.complete(p, NAME_EQUALS);
    }
    expr(p);
    m.complete(p, ANONYMOUS_OBJECT_MEMBER_DECLARATOR);
}

fn starts_initializer_element(p: &Parser<'_>) -> bool {
    matches!(p.current(), L_BRACE | L_BRACK) || can_start_expression(p.current())
}

fn object_or_collection_initializer(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let m = p.start();
    let object = p.nth_at(1, R_BRACE) || (p.nth_at(1, IDENT) && p.nth_at(2, EQ)) || p.nth_at(1, L_BRACK);

    delimited(p, L_BRACE, R_BRACE, COMMA, true, starts_initializer_element, |p| {
        if object {
            member_initializer(p);
        } else {
            collection_element(p);
        }
    });

    p.leave();
    m.complete(p, if object { OBJECT_INITIALIZER_EXPR } else { COLLECTION_INITIALIZER_EXPR })
}

/// `Name = value`, `[index] = value` or a nested initializer target.
fn member_initializer(p: &mut Parser<'_>) {
    let target = match p.current() {
        IDENT if p.nth_at(1, EQ) => Some(identifier_name(p)),
        L_BRACK => {
            let m = p.start();
            bracketed_argument_list(p);
            Some(m.complete(p, ELEMENT_BINDING_EXPR))
        }
        _ => None,
    };

    let Some(target) = target else {
        expr(p);
        return;
    };

    let m = target.precede(p);
    p.expect(EQ);
    if p.at(L_BRACE) {
        object_or_collection_initializer(p);
    } else {
        expr(p);
    }
    m.complete(p, ASSIGNMENT_EXPR);
}

fn collection_element(p: &mut Parser<'_>) {
    if !p.at(L_BRACE) {
        expr(p);
        return;
    }

    let m = p.start();
    delimited(p, L_BRACE, R_BRACE, COMMA, false, |p| can_start_expression(p.current()), |p| {
        expr(p);
    });
    m.complete(p, COMPLEX_ELEMENT_INITIALIZER_EXPR);
}

pub(crate) fn array_initializer(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let m = p.start();
    delimited(p, L_BRACE, R_BRACE, COMMA, true, starts_initializer_element, |p| {
        variable_initializer(p);
    });

    p.leave();
    m.complete(p, ARRAY_INITIALIZER_EXPR)
}

fn array_initializer_or_missing(p: &mut Parser<'_>) {
    if p.at(L_BRACE) {
        array_initializer(p);
    } else {
        let m = p.start();
        p.expect(L_BRACE);
        p.missing(R_BRACE, None);
        m.complete(p, ARRAY_INITIALIZER_EXPR);
    }
}

/// The value of `= ...` in a declarator: an expression, `ref e`, or an
/// array initializer.
pub(crate) fn variable_initializer(p: &mut Parser<'_>) -> CompletedMarker {
    if p.at(L_BRACE) { array_initializer(p) } else { expr_or_ref(p) }
}

fn stackalloc_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    if p.at(L_BRACK) {
        p.bump();
        while p.eat(COMMA) {}
        p.expect(R_BRACK);
        array_initializer_or_missing(p);
        return m.complete(p, IMPLICIT_STACKALLOC_ARRAY_CREATION_EXPR);
    }

    let ty = types::type_with(p, TypeMode::NewExpression);
    if ty.kind() != ARRAY_TYPE {
        p.push_error(Diagnostic::new(ErrorCode::StackallocRequiresBrackets, p.missing_range()));
    }
    if p.at(L_BRACE) {
        array_initializer(p);
    }
    m.complete(p, STACKALLOC_ARRAY_CREATION_EXPR)
}

fn anonymous_method(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    let is_async = p.eat_contextual(ASYNC_KW);
    p.expect(DELEGATE_KW);

    if p.at(L_PAREN) {
        items::parameter_list(p, items::ParameterContext::Method);
    }
    p.with_async(is_async, stmts::block);
    m.complete(p, ANONYMOUS_METHOD_EXPR)
}

fn collection_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.feature(Feature::CollectionExpressions);

    delimited(p, L_BRACK, R_BRACK, COMMA, true, |p| can_start_expression(p.current()), |p| {
        let element = p.start();
        if p.at(DOT_DOT) {
            p.bump();
            expr(p);
            element.complete(p, SPREAD_ELEMENT);
        } else {
            expr(p);
            element.complete(p, EXPRESSION_ELEMENT);
        }
    });

    m.complete(p, COLLECTION_EXPR)
}

/// `e switch { arm, ... }` after the governing expression.
fn switch_expr_arms(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.feature(Feature::SwitchExpressions);
    p.bump();
    p.expect(L_BRACE);

    while !p.at(R_BRACE) && !p.at(EOF) {
        let before = p.position();
        switch_arm(p);

        if p.eat(COMMA) {
            continue;
        }
        if p.at(SEMICOLON) {
            p.missing(COMMA, None);
            p.skip_with_error(ErrorCode::UnexpectedToken);
            continue;
        }
        if p.at(R_BRACE) || p.at(EOF) {
            break;
        }
        if p.position() == before || !(p.at(CASE_KW) || can_start_pattern(p.current())) {
            break;
        }
        p.expect(COMMA);
    }

    p.expect(R_BRACE);
    m.complete(p, SWITCH_EXPR)
}

fn switch_arm(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(CASE_KW) {
        p.skip_with_error(ErrorCode::BadCaseInSwitchArm);
    }

    patterns::pattern(p);

    if p.at_contextual(WHEN_KW) {
        when_clause(p);
    }

    if p.at(COLON) {
        p.push_error(Diagnostic::with_args(ErrorCode::SyntaxError, p.current_range(), ["=>"]));
        p.skip();
        p.missing(FAT_ARROW, None);
    } else {
        p.expect(FAT_ARROW);
    }

    expr(p);
    m.complete(p, SWITCH_EXPR_ARM);
}

pub(crate) fn when_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(WHEN_KW);
    expr(p);
    m.complete(p, WHEN_CLAUSE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_table() {
        assert!(binary_precedence(STAR) > binary_precedence(PLUS));
        assert!(binary_precedence(QUESTION_QUESTION) < binary_precedence(PIPE_PIPE));
        assert_eq!(binary_precedence(QUESTION_QUESTION_EQ), Some(Precedence::ASSIGNMENT));
        assert_eq!(binary_precedence(SEMICOLON), None);
        assert!(is_right_associative(EQ));
        assert!(is_right_associative(QUESTION_QUESTION));
        assert!(!is_right_associative(PLUS));
    }
}
