//! Query comprehensions: `from x in xs where ... select ...`.

use sable_yellow::SyntaxKind::*;

use super::scan::ScanTypeFlags;
use super::types::{self, TypeMode};
use super::{exprs, missing_name};
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn query_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    from_clause(p);
    query_body(p);
    m.complete(p, QUERY_EXPR)
}

/// `T x in` with an explicit range variable type.
fn at_typed_range_variable(p: &Parser<'_>) -> bool {
    let mut look = p.look();
    look.scan_type(TypeMode::Normal) != ScanTypeFlags::NotType
        && look.is_true_identifier(0)
        && look.kind(1) == IN_KW
}

fn range_variable(p: &mut Parser<'_>) {
    if at_typed_range_variable(p) {
        types::ty(p);
    }
    p.expect(IDENT);
    p.expect(IN_KW);
    exprs::expr(p);
}

fn from_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(FROM_KW);
    range_variable(p);
    m.complete(p, FROM_CLAUSE);
}

fn query_body(p: &mut Parser<'_>) {
    if !p.enter() {
        p.skip_too_deep();
        return;
    }
    let m = p.start();

    loop {
        if p.at_contextual(FROM_KW) {
            from_clause(p);
        } else if p.at_contextual(LET_KW) {
            let clause = p.start();
            p.bump_remap(LET_KW);
            p.expect(IDENT);
            p.expect(EQ);
            exprs::expr(p);
            clause.complete(p, LET_CLAUSE);
        } else if p.at_contextual(WHERE_KW) {
            let clause = p.start();
            p.bump_remap(WHERE_KW);
            exprs::expr(p);
            clause.complete(p, WHERE_CLAUSE);
        } else if p.at_contextual(JOIN_KW) {
            join_clause(p);
        } else if p.at_contextual(ORDERBY_KW) {
            order_by_clause(p);
        } else {
            break;
        }
    }

    let clause = p.start();
    if p.at_contextual(GROUP_KW) {
        p.bump_remap(GROUP_KW);
        exprs::expr(p);
        p.expect_contextual(BY_KW);
        exprs::expr(p);
        clause.complete(p, GROUP_CLAUSE);
    } else {
        if p.expect_contextual(SELECT_KW) {
            exprs::expr(p);
        } else {
            missing_name(p, None);
        }
        clause.complete(p, SELECT_CLAUSE);
    }

    if p.at_contextual(INTO_KW) {
        let continuation = p.start();
        p.bump_remap(INTO_KW);
        p.expect(IDENT);
        query_body(p);
        continuation.complete(p, QUERY_CONTINUATION);
    }

    p.leave();
    m.complete(p, QUERY_BODY);
}

fn join_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(JOIN_KW);
    range_variable(p);
    p.expect_contextual(ON_KW);
    exprs::expr(p);
    p.expect_contextual(EQUALS_KW);
    exprs::expr(p);

    if p.at_contextual(INTO_KW) {
        let into = p.start();
        p.bump_remap(INTO_KW);
        p.expect(IDENT);
        into.complete(p, JOIN_INTO_CLAUSE);
    }
    m.complete(p, JOIN_CLAUSE);
}

fn order_by_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump_remap(ORDERBY_KW);

    loop {
        let ordering = p.start();
        exprs::expr(p);
        if p.at_contextual(ASCENDING_KW) || p.at_contextual(DESCENDING_KW) {
            let direction = p.nth_contextual(0);
            p.bump_remap(direction);
        }
        ordering.complete(p, ORDERING);

        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, ORDER_BY_CLAUSE);
}
