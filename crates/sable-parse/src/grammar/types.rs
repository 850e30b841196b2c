use sable_errors::{Diagnostic, ErrorCode};
use sable_yellow::SyntaxKind::{self, *};

use super::{delimited, exprs, missing_name, separated};
use crate::options::Feature;
use crate::parser::{CompletedMarker, Parser};

/// How much of the token stream a type may claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeMode {
    Normal,
    /// After `is` and `as` and inside patterns. `?` belongs to the type only
    /// when no expression follows it, and `*` is never a pointer.
    Pattern,
    /// After `new` and `stackalloc`. Array ranks may hold sizes, and `?`
    /// belongs to the type only before `(`, `[` or `{`.
    NewExpression,
}

pub(crate) fn can_start_type(kind: SyntaxKind) -> bool {
    kind.is_predefined_type() || matches!(kind, IDENT | L_PAREN | DELEGATE_KW)
}

pub(crate) fn ty(p: &mut Parser<'_>) -> CompletedMarker {
    type_with(p, TypeMode::Normal)
}

pub(crate) fn type_with(p: &mut Parser<'_>, mode: TypeMode) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let mut ty = non_array_type(p, mode);
    loop {
        match p.current() {
            QUESTION if p.look().nullable_allowed(mode) => {
                let m = ty.precede(p);
                p.bump();
                ty = m.complete(p, NULLABLE_TYPE);
            }
            STAR if mode != TypeMode::Pattern => {
                let m = ty.precede(p);
                p.bump();
                ty = m.complete(p, POINTER_TYPE);
            }
            L_BRACK if at_rank_specifier(p, mode) => {
                let m = ty.precede(p);
                while at_rank_specifier(p, mode) {
                    rank_specifier(p, mode);
                }
                ty = m.complete(p, ARRAY_TYPE);
            }
            _ => break,
        }
    }

    p.leave();
    ty
}

/// A type in return position: `ref T` and `ref readonly T` are allowed.
pub(crate) fn return_type(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.at(REF_KW) {
        return ty(p);
    }

    let m = p.start();
    p.feature(Feature::RefLocalsReturns);
    p.bump();
    p.eat(READONLY_KW);
    ty(p);
    m.complete(p, REF_TYPE)
}

fn non_array_type(p: &mut Parser<'_>, mode: TypeMode) -> CompletedMarker {
    match p.current() {
        L_PAREN => tuple_type(p),
        IDENT => name(p),
        kind if kind.is_predefined_type() => {
            let m = p.start();
            p.bump();
            m.complete(p, PREDEFINED_TYPE)
        }
        DELEGATE_KW if p.nth_at(1, STAR) => function_pointer_type(p),
        _ => {
            let code = match mode {
                TypeMode::NewExpression => ErrorCode::NewRequiresArgs,
                TypeMode::Normal | TypeMode::Pattern => ErrorCode::TypeExpected,
            };
            let diagnostic = Diagnostic::new(code, p.missing_range());
            missing_name(p, Some(diagnostic))
        }
    }
}

fn at_rank_specifier(p: &Parser<'_>, mode: TypeMode) -> bool {
    if !p.at(L_BRACK) {
        return false;
    }
    if mode == TypeMode::NewExpression {
        return true;
    }

    let mut look = p.look();
    look.advance();
    while look.eat(COMMA) {}
    look.at(R_BRACK)
}

fn rank_specifier(p: &mut Parser<'_>, mode: TypeMode) {
    let m = p.start();
    p.bump();

    loop {
        if mode == TypeMode::NewExpression && !matches!(p.current(), COMMA | R_BRACK) {
            exprs::expr(p);
        } else {
            let size = p.start();
            size.complete(p, OMITTED_ARRAY_SIZE_EXPR);
        }

        if !p.eat(COMMA) {
            break;
        }
    }

    p.expect(R_BRACK);
    m.complete(p, ARRAY_RANK_SPECIFIER);
}

/// A possibly qualified name in type position: `A`, `A.B<C>`, `global::A`.
pub(crate) fn name(p: &mut Parser<'_>) -> CompletedMarker {
    let mut lhs = if p.at(IDENT) && p.nth_at(1, COLON_COLON) {
        let m = p.start();
        let alias = p.start();
        p.bump();
        alias.complete(p, IDENTIFIER_NAME);
        p.bump();
        simple_name(p);
        m.complete(p, ALIAS_QUALIFIED_NAME)
    } else {
        simple_name(p)
    };

    while p.at(DOT) {
        let m = lhs.precede(p);
        p.bump();
        simple_name(p);
        lhs = m.complete(p, QUALIFIED_NAME);
    }

    lhs
}

/// `A` or `A<...>`. In type position `<` always opens type arguments.
pub(crate) fn simple_name(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(IDENT);

    if p.at(LT) {
        type_argument_list(p);
        m.complete(p, GENERIC_NAME)
    } else {
        m.complete(p, IDENTIFIER_NAME)
    }
}

pub(crate) fn type_argument_list(p: &mut Parser<'_>) {
    debug_assert!(p.at(LT));
    let m = p.start();
    p.bump();

    loop {
        if matches!(p.current(), COMMA | GT) {
            let omitted = p.start();
            omitted.complete(p, OMITTED_TYPE_ARGUMENT);
        } else {
            ty(p);
        }

        if !p.eat(COMMA) {
            break;
        }
    }

    p.expect(GT);
    m.complete(p, TYPE_ARGUMENT_LIST);
}

fn tuple_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.feature(Feature::Tuples);
    p.bump();

    let count = separated(p, R_PAREN, COMMA, false, |p| can_start_type(p.current()), |p| {
        let element = p.start();
        ty(p);
        if p.at_true_identifier() {
            p.bump();
        }
        element.complete(p, TUPLE_ELEMENT);
    });

    if count < 2 {
        p.error(ErrorCode::TupleTooFewElements);
    }
    p.expect(R_PAREN);
    m.complete(p, TUPLE_TYPE)
}

/// `delegate* unmanaged[Cdecl]<int, void>`.
fn function_pointer_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.feature(Feature::FunctionPointers);
    p.bump();
    p.bump();

    if p.at_contextual(MANAGED_KW) || p.at_contextual(UNMANAGED_KW) {
        let convention = p.start();
        let unmanaged = p.at_contextual(UNMANAGED_KW);
        p.bump_remap(if unmanaged { UNMANAGED_KW } else { MANAGED_KW });

        if unmanaged && p.at(L_BRACK) {
            let list = p.start();
            delimited(p, L_BRACK, R_BRACK, COMMA, false, |p| p.at(IDENT), |p| {
                let name = p.start();
                p.expect(IDENT);
                name.complete(p, FUNCTION_POINTER_UNMANAGED_CALLING_CONVENTION);
            });
            list.complete(p, FUNCTION_POINTER_UNMANAGED_CALLING_CONVENTION_LIST);
        }
        convention.complete(p, FUNCTION_POINTER_CALLING_CONVENTION);
    }

    let parameters = p.start();
    if p.at(LT) {
        delimited(
            p,
            LT,
            GT,
            COMMA,
            false,
            |p| can_start_type(p.current()) || matches!(p.current(), REF_KW | IN_KW | OUT_KW),
            |p| {
                let parameter = p.start();
                while matches!(p.current(), REF_KW | IN_KW | OUT_KW | READONLY_KW) {
                    p.bump();
                }
                ty(p);
                parameter.complete(p, FUNCTION_POINTER_PARAMETER);
            },
        );
    } else {
        p.expect(LT);
    }
    parameters.complete(p, FUNCTION_POINTER_PARAMETER_LIST);

    m.complete(p, FUNCTION_POINTER_TYPE)
}
