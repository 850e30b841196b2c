use sable_errors::{Diagnostic, ErrorCode};
use sable_yellow::SyntaxKind::{self, *};

use super::exprs;
use super::items::{self, ParameterContext};
use super::scan::{DeclarationContext, ScanTypeFlags, can_start_expression};
use super::types::{self, TypeMode};
use super::{attributes, identifier_name, patterns};
use crate::options::Feature;
use crate::parser::{CompletedMarker, Marker, Parser};

pub(crate) fn block(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if !p.at(L_BRACE) {
        p.expect(L_BRACE);
        p.missing(R_BRACE, None);
        return m.complete(p, BLOCK);
    }

    p.bump();
    statement_list(p);
    p.expect(R_BRACE);
    m.complete(p, BLOCK)
}

/// Statements up to `}`. Member and type keywords also end the list, so a
/// missing `}` in a method body does not swallow the rest of the type.
fn statement_list(p: &mut Parser<'_>) {
    while !p.at(R_BRACE) && !p.at(EOF) && !at_member_boundary(p) {
        if p.at(ELSE_KW) {
            p.skip_with_error(ErrorCode::ElseCannotStartStatement);
            continue;
        }
        if !can_start_statement(p.current()) {
            p.skip_unexpected();
            continue;
        }

        let before = p.position();
        statement(p);
        if p.position() == before {
            p.skip_unexpected();
        }
    }
}

fn at_member_boundary(p: &Parser<'_>) -> bool {
    matches!(
        p.current(),
        NAMESPACE_KW | CLASS_KW | STRUCT_KW | INTERFACE_KW | ENUM_KW | PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | INTERNAL_KW
    )
}

pub(crate) fn can_start_statement(kind: SyntaxKind) -> bool {
    match kind {
        L_BRACE | SEMICOLON => true,
        CASE_KW | CATCH_KW | FINALLY_KW | OPERATOR_KW | IMPLICIT_KW | EXPLICIT_KW | EVENT_KW | PARAMS_KW
        | IN_KW | IS_KW | AS_KW => false,
        _ => can_start_expression(kind) || kind.is_keyword(),
    }
}

pub(crate) fn statement(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.enter() {
        p.skip_too_deep();
        let m = p.start();
        if !p.eat(SEMICOLON) {
            p.missing(SEMICOLON, None);
        }
        return m.complete(p, EMPTY_STMT);
    }

    while p.at(ELSE_KW) {
        p.skip_with_error(ErrorCode::ElseCannotStartStatement);
    }
    let stmt = statement_core(p);

    p.leave();
    stmt
}

fn statement_core(p: &mut Parser<'_>) -> CompletedMarker {
    match p.current() {
        L_BRACE => block(p),
        SEMICOLON => {
            let m = p.start();
            p.bump();
            m.complete(p, EMPTY_STMT)
        }
        IF_KW => if_stmt(p),
        WHILE_KW => while_stmt(p),
        DO_KW => do_stmt(p),
        FOR_KW => for_stmt(p),
        FOREACH_KW => {
            let m = p.start();
            foreach_stmt(p, m)
        }
        SWITCH_KW => switch_stmt(p),
        TRY_KW => try_stmt(p),
        RETURN_KW => {
            let m = p.start();
            p.bump();
            if !p.at(SEMICOLON) {
                exprs::expr_or_ref(p);
            }
            p.expect(SEMICOLON);
            m.complete(p, RETURN_STMT)
        }
        THROW_KW => {
            let m = p.start();
            p.bump();
            if !p.at(SEMICOLON) {
                exprs::expr(p);
            }
            p.expect(SEMICOLON);
            m.complete(p, THROW_STMT)
        }
        BREAK_KW => keyword_stmt(p, BREAK_STMT),
        CONTINUE_KW => keyword_stmt(p, CONTINUE_STMT),
        GOTO_KW => goto_stmt(p),
        LOCK_KW => {
            let m = p.start();
            p.bump();
            parenthesized_condition(p);
            embedded_statement(p);
            m.complete(p, LOCK_STMT)
        }
        FIXED_KW => fixed_stmt(p),
        UNSAFE_KW if p.nth_at(1, L_BRACE) => keyword_block(p, UNSAFE_STMT),
        CHECKED_KW | UNCHECKED_KW if p.nth_at(1, L_BRACE) => keyword_block(p, CHECKED_STMT),
        USING_KW => {
            let m = p.start();
            using_stmt(p, m)
        }
        L_BRACK if p.look().scan_lambda().is_none() => {
            let m = p.start();
            attributes::attribute_lists(p);
            local_declaration_or_function(p, m)
        }
        IDENT if p.at_contextual(YIELD_KW) && matches!(p.nth(1), RETURN_KW | BREAK_KW) => yield_stmt(p),
        IDENT if p.nth_at(1, COLON) => {
            let m = p.start();
            p.bump();
            p.bump();
            statement(p);
            m.complete(p, LABELED_STMT)
        }
        IDENT if p.at_contextual(AWAIT_KW) && p.nth_at(1, USING_KW) => {
            let m = p.start();
            p.bump_remap(AWAIT_KW);
            using_stmt(p, m)
        }
        IDENT if p.at_contextual(AWAIT_KW) && p.nth_at(1, FOREACH_KW) => {
            let m = p.start();
            p.bump_remap(AWAIT_KW);
            foreach_stmt(p, m)
        }
        _ => declaration_or_expression(p),
    }
}

/// Lambdas, queries and `await` win over a declaration reading; only then
/// do the tokens get a chance to declare locals.
fn declaration_or_expression(p: &mut Parser<'_>) -> CompletedMarker {
    let look = p.look();
    if look.scan_lambda().is_some() || look.is_query_expression() || look.is_await_expression() {
        return expression_stmt(p);
    }

    if at_local_declaration(p) {
        let m = p.start();
        return local_declaration_or_function(p, m);
    }
    expression_stmt(p)
}

fn is_local_modifier(p: &Parser<'_>, n: usize) -> bool {
    match p.nth(n) {
        CONST_KW | STATIC_KW | READONLY_KW | VOLATILE_KW | UNSAFE_KW | EXTERN_KW => true,
        IDENT if p.nth_at_contextual(n, ASYNC_KW) => {
            p.nth(n + 1).is_predefined_type()
                || is_local_modifier(p, n + 1)
                || (p.nth_at(n + 1, IDENT) && matches!(p.nth(n + 2), IDENT | LT | DOT | QUESTION | L_BRACK))
        }
        _ => false,
    }
}

fn at_local_declaration(p: &Parser<'_>) -> bool {
    is_local_modifier(p, 0) || at_scoped(p, 0) || p.look().is_possible_local_declaration()
}

/// `scoped` before a local or parameter type.
pub(crate) fn at_scoped(p: &Parser<'_>, n: usize) -> bool {
    if !p.nth_at_contextual(n, SCOPED_KW) {
        return false;
    }
    match p.nth(n + 1) {
        REF_KW | IN_KW | OUT_KW => true,
        kind if kind.is_predefined_type() => !matches!(p.nth(n + 2), COMMA | R_PAREN | EQ | SEMICOLON),
        IDENT => !matches!(p.nth(n + 2), COMMA | R_PAREN | EQ | SEMICOLON | COLON),
        _ => false,
    }
}

/// The type of a local: `ref T`, `scoped T` or plain `T`.
fn local_type(p: &mut Parser<'_>) -> CompletedMarker {
    if !at_scoped(p, 0) {
        return types::return_type(p);
    }

    let m = p.start();
    p.feature(Feature::ScopedRef);
    p.bump_remap(SCOPED_KW);
    types::return_type(p);
    m.complete(p, SCOPED_TYPE)
}

fn at_local_function(p: &Parser<'_>) -> bool {
    let mut look = p.look();
    while matches!(look.kind(0), CONST_KW | STATIC_KW | READONLY_KW | VOLATILE_KW | UNSAFE_KW | EXTERN_KW)
        || look.at_contextual(ASYNC_KW) && look.kind(1) != L_PAREN
    {
        look.advance();
    }
    if look.eat(REF_KW) {
        look.eat(READONLY_KW);
    }
    look.scan_type(TypeMode::Normal) != ScanTypeFlags::NotType && look.is_local_function_name()
}

/// Locals and local functions, after any attributes already inside `m`.
fn local_declaration_or_function(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    let function = at_local_function(p);
    let mut is_async = false;

    while is_local_modifier(p, 0) {
        let kind = if p.at(IDENT) { p.nth_contextual(0) } else { p.current() };
        let allowed = if function {
            matches!(kind, STATIC_KW | ASYNC_KW | UNSAFE_KW | EXTERN_KW)
        } else {
            kind == CONST_KW
        };

        if !allowed {
            p.error_with_current_text(ErrorCode::BadModifier);
        }
        if function && kind == STATIC_KW {
            p.feature(Feature::StaticLocalFunctions);
        }
        is_async |= kind == ASYNC_KW;
        p.bump_remap(kind);
    }

    let ty = local_type(p);

    if function {
        p.feature(Feature::LocalFunctions);
        p.expect(IDENT);
        if p.at(LT) {
            items::type_parameter_list(p);
        }
        items::parameter_list(p, ParameterContext::Method);
        items::constraint_clauses(p);
        p.with_async(is_async, items::method_body);
        return m.complete(p, LOCAL_FUNCTION_STMT);
    }

    variable_declaration(p, ty);
    p.expect(SEMICOLON);
    m.complete(p, LOCAL_DECLARATION_STMT)
}

/// Wraps an already parsed type and the declarators after it.
pub(crate) fn variable_declaration(p: &mut Parser<'_>, ty: CompletedMarker) -> CompletedMarker {
    let m = ty.precede(p);
    loop {
        let declarator = p.start();
        p.expect(IDENT);
        if p.at(EQ) {
            let value = p.start();
            p.bump();
            exprs::variable_initializer(p);
            value.complete(p, EQUALS_VALUE_CLAUSE);
        }
        declarator.complete(p, VARIABLE_DECLARATOR);

        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, VARIABLE_DECLARATION)
}

fn expression_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    exprs::expr(p);
    p.expect(SEMICOLON);
    m.complete(p, EXPRESSION_STMT)
}

/// The body of `if`, `while` and friends. Declarations and labels are not
/// allowed here, and a lone `;` is probably a mistake.
fn embedded_statement(p: &mut Parser<'_>) -> CompletedMarker {
    if p.at(SEMICOLON) {
        p.push_error(Diagnostic::new(ErrorCode::PossibleMistakenNullStatement, p.current_range()));
    }
    embedded_statement_quiet(p)
}

/// The body of `do`: no empty statement warning.
fn embedded_statement_quiet(p: &mut Parser<'_>) -> CompletedMarker {
    let start = p.current_range();
    let stmt = statement(p);
    if matches!(stmt.kind(), LOCAL_DECLARATION_STMT | LABELED_STMT | LOCAL_FUNCTION_STMT) {
        p.push_error(Diagnostic::new(ErrorCode::BadEmbeddedStatement, start));
    }
    stmt
}

fn parenthesized_condition(p: &mut Parser<'_>) {
    p.expect(L_PAREN);
    exprs::expr(p);
    p.expect(R_PAREN);
}

fn keyword_stmt(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.expect(SEMICOLON);
    m.complete(p, kind)
}

fn keyword_block(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.bump();
    block(p);
    m.complete(p, kind)
}

fn if_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    parenthesized_condition(p);
    embedded_statement(p);

    if p.at(ELSE_KW) {
        let clause = p.start();
        p.bump();
        embedded_statement(p);
        clause.complete(p, ELSE_CLAUSE);
    }
    m.complete(p, IF_STMT)
}

fn while_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    parenthesized_condition(p);
    embedded_statement(p);
    m.complete(p, WHILE_STMT)
}

fn do_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    embedded_statement_quiet(p);
    p.expect(WHILE_KW);
    parenthesized_condition(p);
    p.expect(SEMICOLON);
    m.complete(p, DO_STMT)
}

fn for_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.expect(L_PAREN);

    if !p.at(SEMICOLON) {
        if p.at(REF_KW) || at_local_declaration(p) {
            let ty = local_type(p);
            variable_declaration(p, ty);
        } else {
            expression_list(p);
        }
    }
    p.expect(SEMICOLON);

    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON);

    if !p.at(R_PAREN) {
        expression_list(p);
    }
    p.expect(R_PAREN);

    embedded_statement(p);
    m.complete(p, FOR_STMT)
}

fn expression_list(p: &mut Parser<'_>) {
    loop {
        exprs::expr(p);
        if !p.eat(COMMA) {
            break;
        }
    }
}

/// `foreach (T x in e)` or `foreach (var (a, b) in e)`, after an optional
/// `await` already inside `m`.
fn foreach_stmt(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.expect(FOREACH_KW);
    p.expect(L_PAREN);

    let mut look = p.look();
    if look.eat(REF_KW) {
        look.eat(READONLY_KW);
    }
    let typed = look.scan_type(TypeMode::Normal) != ScanTypeFlags::NotType && look.is_true_identifier(0);

    let kind = if typed {
        local_type(p);
        p.expect(IDENT);
        FOREACH_STMT
    } else {
        if p.look().is_possible_declaration_expression(DeclarationContext::Other) {
            exprs::declaration_expr(p);
        } else {
            exprs::expr(p);
        }
        FOREACH_VARIABLE_STMT
    };

    p.expect(IN_KW);
    exprs::expr(p);
    p.expect(R_PAREN);
    embedded_statement(p);
    m.complete(p, kind)
}

fn switch_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    if p.at(L_PAREN) {
        exprs::expr(p);
    } else {
        parenthesized_condition(p);
    }

    p.expect(L_BRACE);
    while !p.at(R_BRACE) && !p.at(EOF) {
        if !at_switch_label(p) {
            p.skip_unexpected();
            continue;
        }
        switch_section(p);
    }
    p.expect(R_BRACE);
    m.complete(p, SWITCH_STMT)
}

fn at_switch_label(p: &Parser<'_>) -> bool {
    p.at(CASE_KW) || (p.at(DEFAULT_KW) && p.nth_at(1, COLON))
}

fn switch_section(p: &mut Parser<'_>) {
    let m = p.start();
    while at_switch_label(p) {
        switch_label(p);
    }

    while !p.at(R_BRACE) && !p.at(EOF) && !at_switch_label(p) {
        if !can_start_statement(p.current()) {
            p.skip_unexpected();
            continue;
        }
        let before = p.position();
        statement(p);
        if p.position() == before {
            p.skip_unexpected();
        }
    }
    m.complete(p, SWITCH_SECTION);
}

/// `case` labels are parsed as patterns first; a lone constant without
/// `when` is reparsed as a full expression for a classic label.
fn switch_label(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(DEFAULT_KW) {
        p.bump();
        p.expect(COLON);
        m.complete(p, DEFAULT_SWITCH_LABEL);
        return;
    }

    p.bump();
    let checkpoint = p.checkpoint();
    let pattern = patterns::pattern(p);

    if p.at_contextual(WHEN_KW) {
        exprs::when_clause(p);
    } else if pattern.kind() == CONSTANT_PATTERN {
        p.rewind(checkpoint);
        exprs::expr(p);
        p.expect(COLON);
        m.complete(p, CASE_SWITCH_LABEL);
        return;
    }

    p.expect(COLON);
    m.complete(p, CASE_PATTERN_SWITCH_LABEL);
}

fn try_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    block(p);

    let mut handlers = 0;
    while p.at(CATCH_KW) {
        catch_clause(p);
        handlers += 1;
    }
    if p.at(FINALLY_KW) {
        let clause = p.start();
        p.bump();
        block(p);
        clause.complete(p, FINALLY_CLAUSE);
        handlers += 1;
    }

    if handlers == 0 {
        p.push_error(Diagnostic::new(ErrorCode::ExpectedCatchOrFinally, p.missing_range()));
    }
    m.complete(p, TRY_STMT)
}

fn catch_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    if p.at(L_PAREN) {
        let declaration = p.start();
        p.bump();
        types::ty(p);
        if p.at_true_identifier() {
            p.bump();
        }
        p.expect(R_PAREN);
        declaration.complete(p, CATCH_DECLARATION);
    }

    if p.at_contextual(WHEN_KW) {
        let filter = p.start();
        p.bump_remap(WHEN_KW);
        parenthesized_condition(p);
        filter.complete(p, CATCH_FILTER_CLAUSE);
    }

    block(p);
    m.complete(p, CATCH_CLAUSE);
}

fn goto_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();

    match p.current() {
        CASE_KW => {
            p.bump();
            exprs::expr(p);
        }
        DEFAULT_KW => p.bump(),
        _ => {
            identifier_name(p);
        }
    }

    p.expect(SEMICOLON);
    m.complete(p, GOTO_STMT)
}

fn yield_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump_remap(YIELD_KW);

    if p.eat(RETURN_KW) {
        exprs::expr(p);
        p.expect(SEMICOLON);
        return m.complete(p, YIELD_RETURN_STMT);
    }

    p.bump();
    p.expect(SEMICOLON);
    m.complete(p, YIELD_BREAK_STMT)
}

fn fixed_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.bump();
    p.expect(L_PAREN);
    let ty = types::ty(p);
    variable_declaration(p, ty);
    p.expect(R_PAREN);
    embedded_statement(p);
    m.complete(p, FIXED_STMT)
}

/// `using (...) stmt` or a `using` declaration, after an optional `await`
/// already inside `m`.
fn using_stmt(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.expect(USING_KW);

    if p.at(L_PAREN) {
        p.bump();
        if at_local_declaration(p) {
            let ty = local_type(p);
            variable_declaration(p, ty);
        } else {
            exprs::expr(p);
        }
        p.expect(R_PAREN);
        embedded_statement(p);
        return m.complete(p, USING_STMT);
    }

    p.feature(Feature::UsingDeclarations);
    while is_local_modifier(p, 0) {
        let kind = if p.at(IDENT) { p.nth_contextual(0) } else { p.current() };
        p.error_with_current_text(ErrorCode::UsingDeclarationModifiers);
        p.bump_remap(kind);
    }

    let ty = local_type(p);
    variable_declaration(p, ty);
    p.expect(SEMICOLON);
    m.complete(p, LOCAL_DECLARATION_STMT)
}
