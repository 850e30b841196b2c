use sable_errors::{Diagnostic, ErrorCode};
use sable_yellow::SyntaxKind::{self, *};

use crate::options::Feature;
use crate::parser::{CompletedMarker, Parser};

pub(crate) mod attributes;
pub(crate) mod exprs;
pub(crate) mod items;
mod lambdas;
pub(crate) mod patterns;
mod queries;
pub(crate) mod scan;
pub(crate) mod stmts;
pub(crate) mod types;

/// `IDENTIFIER_NAME` around the current identifier, or around a missing one.
pub(crate) fn identifier_name(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(IDENT);
    m.complete(p, IDENTIFIER_NAME)
}

/// Parses `bra element (delim element)* ket`, returning the element count.
///
/// A missing delimiter is inserted when the next token starts another
/// element; anything else ends the list and `ket` is expected.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    allow_trailing: bool,
    starts_element: impl Fn(&Parser<'_>) -> bool,
    element: impl FnMut(&mut Parser<'_>),
) -> usize {
    debug_assert!(p.at(bra));
    p.bump();
    let count = separated(p, ket, delim, allow_trailing, starts_element, element);
    p.expect(ket);
    count
}

/// The inside of [`delimited`], for lists without brackets of their own.
pub(crate) fn separated(
    p: &mut Parser<'_>,
    ket: SyntaxKind,
    delim: SyntaxKind,
    allow_trailing: bool,
    starts_element: impl Fn(&Parser<'_>) -> bool,
    mut element: impl FnMut(&mut Parser<'_>),
) -> usize {
    if p.at(ket) || p.at(EOF) || !(p.at(delim) || starts_element(p)) {
        return 0;
    }

    let mut count = 0;
    loop {
        let before = p.position();
        element(p);
        count += 1;

        if p.eat(delim) {
            if allow_trailing && p.at(ket) {
                break;
            }
            continue;
        }

        if p.at(ket) || p.at(EOF) {
            break;
        }

        if p.position() != before && starts_element(p) {
            p.expect(delim);
            continue;
        }
        break;
    }
    count
}

/// Whether the token at `n` acts as a modifier of a declaration.
pub(crate) fn is_modifier(p: &Parser<'_>, n: usize) -> bool {
    match p.nth(n) {
        PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | INTERNAL_KW | STATIC_KW | ABSTRACT_KW
        | VIRTUAL_KW | OVERRIDE_KW | SEALED_KW | EXTERN_KW | UNSAFE_KW | NEW_KW | READONLY_KW
        | VOLATILE_KW | CONST_KW | FIXED_KW => !(p.nth_at(n, NEW_KW) && p.nth_at(n + 1, L_PAREN)),
        IDENT => is_contextual_modifier(p, n),
        _ => false,
    }
}

fn is_contextual_modifier(p: &Parser<'_>, n: usize) -> bool {
    if !matches!(p.nth_contextual(n), ASYNC_KW | PARTIAL_KW | REQUIRED_KW | FILE_KW) {
        return false;
    }

    match p.nth(n + 1) {
        kind if kind.is_predefined_type() || is_modifier_keyword(kind) => true,
        CLASS_KW | STRUCT_KW | INTERFACE_KW | ENUM_KW | DELEGATE_KW | EVENT_KW => true,
        IDENT => {
            is_contextual_modifier(p, n + 1)
                || p.nth_contextual(n + 1) == RECORD_KW
                || !matches!(p.nth(n + 2), L_PAREN | EQ | SEMICOLON | COMMA | L_BRACE | FAT_ARROW)
        }
        _ => false,
    }
}

fn is_modifier_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        PUBLIC_KW
            | PRIVATE_KW
            | PROTECTED_KW
            | INTERNAL_KW
            | STATIC_KW
            | ABSTRACT_KW
            | VIRTUAL_KW
            | OVERRIDE_KW
            | SEALED_KW
            | EXTERN_KW
            | UNSAFE_KW
            | NEW_KW
            | READONLY_KW
            | VOLATILE_KW
            | CONST_KW
            | FIXED_KW
    )
}

/// Consumes modifiers into the current node, reporting repeats. Returns
/// the modifier kinds in order.
pub(crate) fn modifiers(p: &mut Parser<'_>) -> Vec<SyntaxKind> {
    let mut seen = Vec::new();

    while is_modifier(p, 0) {
        let kind = match p.current() {
            IDENT => p.nth_contextual(0),
            kind => kind,
        };

        if seen.contains(&kind) {
            p.error_with_current_text(ErrorCode::DuplicateModifier);
        }
        if kind == REQUIRED_KW {
            p.feature(Feature::RequiredMembers);
        }
        seen.push(kind);
        p.bump_remap(kind);
    }

    seen
}

/// Skips tokens until one in `stop` or end of file, reporting only the
/// first.
pub(crate) fn skip_until(p: &mut Parser<'_>, stop: impl Fn(&Parser<'_>) -> bool, code: ErrorCode) {
    let mut first = true;
    while !p.at(EOF) && !stop(p) {
        if first {
            p.skip_with_error(code);
            first = false;
        } else {
            p.skip();
        }
    }
}

/// Skips whatever is left before end of file in a fragment parse.
pub(crate) fn skip_trailing(p: &mut Parser<'_>) {
    skip_until(p, |_| false, ErrorCode::UnexpectedToken);
}

/// Diagnostic for a token that cannot begin an expression.
pub(crate) fn invalid_term(p: &Parser<'_>) -> Diagnostic {
    if p.at(EOF) {
        Diagnostic::new(ErrorCode::ExpressionExpected, p.missing_range())
    } else {
        Diagnostic::with_args(ErrorCode::InvalidExprTerm, p.current_range(), [p.current_text()])
    }
}

/// An `IDENTIFIER_NAME` holding a missing identifier, standing in for an
/// expression or type that is not there.
pub(crate) fn missing_name(p: &mut Parser<'_>, diagnostic: Option<Diagnostic>) -> CompletedMarker {
    let m = p.start();
    p.missing(IDENT, diagnostic);
    m.complete(p, IDENTIFIER_NAME)
}
