use sable_errors::ErrorCode;
use sable_yellow::SyntaxKind::{self, *};

use super::exprs::{self, Precedence};
use super::scan::{ScanTypeFlags, can_start_pattern};
use super::types::{self, TypeMode};
use super::{delimited, missing_name};
use crate::options::Feature;
use crate::parser::{CompletedMarker, Marker, Parser};

/// A full pattern: `or` binds loosest, then `and`, then `not`.
pub(crate) fn pattern(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let mut lhs = conjunction(p);
    while at_combinator(p, OR_KW) {
        let m = lhs.precede(p);
        p.feature(Feature::LogicalPatterns);
        p.bump_remap(OR_KW);
        conjunction(p);
        lhs = m.complete(p, BINARY_PATTERN);
    }

    p.leave();
    lhs
}

fn conjunction(p: &mut Parser<'_>) -> CompletedMarker {
    let mut lhs = negation(p);
    while at_combinator(p, AND_KW) {
        let m = lhs.precede(p);
        p.feature(Feature::LogicalPatterns);
        p.bump_remap(AND_KW);
        negation(p);
        lhs = m.complete(p, BINARY_PATTERN);
    }
    lhs
}

fn negation(p: &mut Parser<'_>) -> CompletedMarker {
    if !at_combinator(p, NOT_KW) {
        return primary(p);
    }
    if !p.enter() {
        p.skip_too_deep();
        return missing_name(p, None);
    }

    let m = p.start();
    p.feature(Feature::LogicalPatterns);
    p.bump_remap(NOT_KW);
    negation(p);

    p.leave();
    m.complete(p, UNARY_PATTERN)
}

fn at_combinator(p: &Parser<'_>, keyword: SyntaxKind) -> bool {
    p.at_contextual(keyword) && can_start_pattern(p.nth(1))
}

fn primary(p: &mut Parser<'_>) -> CompletedMarker {
    match p.current() {
        L_BRACK => list_pattern(p),
        DOT_DOT => {
            let m = p.start();
            p.feature(Feature::ListPatterns);
            p.bump();
            if can_start_pattern(p.current()) {
                pattern(p);
            }
            m.complete(p, SLICE_PATTERN)
        }
        LT | LT_EQ | GT | GT_EQ => {
            let m = p.start();
            p.feature(Feature::RelationalPatterns);
            p.bump();
            exprs::sub_expr(p, Precedence::Shift);
            m.complete(p, RELATIONAL_PATTERN)
        }
        L_BRACE => {
            let m = p.start();
            recursive_rest(p, m)
        }
        L_PAREN if p.look().paren_pattern_is_positional() => {
            let m = p.start();
            recursive_rest(p, m)
        }
        L_PAREN => {
            let m = p.start();
            p.feature(Feature::LogicalPatterns);
            p.bump();
            pattern(p);
            p.expect(R_PAREN);
            m.complete(p, PARENTHESIZED_PATTERN)
        }
        IDENT if p.at_contextual(VAR_KW) && matches!(p.nth(1), IDENT | L_PAREN) => {
            let m = p.start();
            p.bump_remap(VAR_KW);
            exprs::designation(p);
            m.complete(p, VAR_PATTERN)
        }
        IDENT if p.at_underscore() && !matches!(p.nth(1), L_PAREN | L_BRACE | DOT | LT | COLON_COLON) => {
            let m = p.start();
            p.bump();
            m.complete(p, DISCARD_PATTERN)
        }
        DEFAULT_KW if !p.nth_at(1, L_PAREN) => {
            let m = p.start();
            p.error(ErrorCode::DefaultPattern);
            exprs::sub_expr(p, Precedence::Shift);
            m.complete(p, CONSTANT_PATTERN)
        }
        _ => type_or_constant(p),
    }
}

/// Something that starts like a type: a declaration, recursive or type
/// pattern when the tokens after the type say so, a constant otherwise.
fn type_or_constant(p: &mut Parser<'_>) -> CompletedMarker {
    let mut look = p.look();
    let flags = look.scan_type(TypeMode::Pattern);
    let next = look.kind(0);
    let designation_follows = look.at_pattern_designation();

    if flags != ScanTypeFlags::NotType {
        let m = p.start();
        if matches!(next, L_PAREN | L_BRACE) {
            types::type_with(p, TypeMode::Pattern);
            return recursive_rest(p, m);
        }
        if designation_follows {
            types::type_with(p, TypeMode::Pattern);
            exprs::designation(p);
            return m.complete(p, DECLARATION_PATTERN);
        }
        if p.look().is_type_pattern() {
            p.feature(Feature::TypePatterns);
            types::type_with(p, TypeMode::Pattern);
            return m.complete(p, TYPE_PATTERN);
        }
        m.abandon(p);
    }

    let m = p.start();
    exprs::sub_expr(p, Precedence::Shift);
    m.complete(p, CONSTANT_PATTERN)
}

/// `Type? (positional)? {properties}? designation?` with the optional type
/// already inside `m`.
fn recursive_rest(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.feature(Feature::RecursivePatterns);

    if p.at(L_PAREN) {
        let clause = p.start();
        delimited(p, L_PAREN, R_PAREN, COMMA, false, starts_subpattern, subpattern);
        clause.complete(p, POSITIONAL_PATTERN_CLAUSE);
    }
    if p.at(L_BRACE) {
        let clause = p.start();
        delimited(p, L_BRACE, R_BRACE, COMMA, true, starts_subpattern, subpattern);
        clause.complete(p, PROPERTY_PATTERN_CLAUSE);
    }
    if p.look().at_pattern_designation() {
        exprs::designation(p);
    }

    m.complete(p, RECURSIVE_PATTERN)
}

fn starts_subpattern(p: &Parser<'_>) -> bool {
    can_start_pattern(p.current())
}

fn subpattern(p: &mut Parser<'_>) {
    let m = p.start();

    if p.at(IDENT) && p.nth_at(1, COLON) {
        exprs::name_colon(p);
    } else if p.look().at_expression_colon() {
        let colon = p.start();
        p.feature(Feature::ExtendedPropertyPatterns);
        exprs::sub_expr(p, Precedence::Primary);
        p.expect(COLON);
        colon.complete(p, EXPRESSION_COLON);
    }

    pattern(p);
    m.complete(p, SUBPATTERN);
}

fn list_pattern(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.feature(Feature::ListPatterns);
    delimited(p, L_BRACK, R_BRACK, COMMA, true, starts_subpattern, |p| {
        pattern(p);
    });

    if p.look().at_pattern_designation() {
        exprs::designation(p);
    }
    m.complete(p, LIST_PATTERN)
}
