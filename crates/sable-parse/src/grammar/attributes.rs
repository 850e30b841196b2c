use sable_yellow::SyntaxKind::*;

use super::scan::can_start_expression;
use super::{delimited, exprs, identifier_name, separated, types};
use crate::parser::Parser;

/// Zero or more `[...]` lists, returning how many were parsed.
pub(crate) fn attribute_lists(p: &mut Parser<'_>) -> usize {
    let mut count = 0;
    while p.at(L_BRACK) {
        attribute_list(p);
        count += 1;
    }
    count
}

pub(crate) fn attribute_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    if (p.at(IDENT) || p.current().is_keyword()) && p.nth_at(1, COLON) {
        let target = p.start();
        p.bump();
        p.bump();
        target.complete(p, ATTRIBUTE_TARGET_SPECIFIER);
    }

    separated(p, R_BRACK, COMMA, true, |p| p.at(IDENT), attribute);
    p.expect(R_BRACK);
    m.complete(p, ATTRIBUTE_LIST);
}

/// `[assembly: ...]` and `[module: ...]` stand alone at the top of a file.
pub(crate) fn at_global_attribute(p: &Parser<'_>) -> bool {
    p.at(L_BRACK)
        && p.nth_at(1, IDENT)
        && p.nth_at(2, COLON)
        && matches!(p.look().text(1), "assembly" | "module")
}

fn attribute(p: &mut Parser<'_>) {
    let m = p.start();
    types::name(p);

    if p.at(L_PAREN) {
        let arguments = p.start();
        delimited(p, L_PAREN, R_PAREN, COMMA, false, |p| can_start_expression(p.current()), |p| {
            let argument = p.start();
            if p.at(IDENT) && p.nth_at(1, EQ) {
                let name = p.start();
                identifier_name(p);
                p.bump();
                name.complete(p, NAME_EQUALS);
            } else if p.at(IDENT) && p.nth_at(1, COLON) {
                exprs::name_colon(p);
            }
            exprs::expr(p);
            argument.complete(p, ATTRIBUTE_ARGUMENT);
        });
        arguments.complete(p, ATTRIBUTE_ARGUMENT_LIST);
    }

    m.complete(p, ATTRIBUTE);
}
