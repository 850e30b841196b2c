use sable_yellow::SyntaxKind::*;

use super::items::{self, ParameterContext};
use super::scan::LambdaShape;
use super::{attributes, exprs, stmts, types};
use crate::options::Feature;
use crate::parser::{CompletedMarker, Parser};

/// Parses the lambda a scan found at the cursor.
///
/// A speculative lambda (nullable return type spelled with an identifier)
/// is thrown away when a `:` follows it; the tokens were the condition and
/// branch of a conditional, and `None` tells the caller to parse them as
/// an expression.
pub(crate) fn lambda(p: &mut Parser<'_>, shape: LambdaShape) -> Option<CompletedMarker> {
    if !shape.speculative {
        return Some(lambda_core(p, shape.simple));
    }

    let checkpoint = p.checkpoint();
    let lambda = lambda_core(p, shape.simple);
    if p.at(COLON) {
        log::trace!("lambda followed by `:`, reparsing as conditional");
        p.rewind(checkpoint);
        return None;
    }
    Some(lambda)
}

fn lambda_core(p: &mut Parser<'_>, simple: bool) -> CompletedMarker {
    let m = p.start();

    if p.at(L_BRACK) {
        p.feature(Feature::LambdaAttributes);
        attributes::attribute_lists(p);
    }

    let mut is_async = false;
    loop {
        if p.at(STATIC_KW) {
            p.feature(Feature::StaticAnonymousFunctions);
            p.bump();
        } else if p.at_contextual(ASYNC_KW) && !p.nth_at(1, FAT_ARROW) {
            p.bump_remap(ASYNC_KW);
            is_async = true;
        } else {
            break;
        }
    }

    if simple {
        let parameter = p.start();
        p.expect(IDENT);
        parameter.complete(p, PARAMETER);
        p.expect(FAT_ARROW);
        body(p, is_async);
        return m.complete(p, SIMPLE_LAMBDA_EXPR);
    }

    if !p.at(L_PAREN) {
        p.feature(Feature::LambdaReturnTypes);
        types::return_type(p);
    }
    items::parameter_list(p, ParameterContext::Lambda);
    p.expect(FAT_ARROW);
    body(p, is_async);
    m.complete(p, PAREN_LAMBDA_EXPR)
}

fn body(p: &mut Parser<'_>, is_async: bool) {
    p.with_async(is_async, |p| {
        if p.at(L_BRACE) {
            stmts::block(p);
        } else {
            exprs::expr_or_ref(p);
        }
    });
}
