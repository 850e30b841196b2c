//! Compilation units, namespaces, types and their members.

use sable_errors::{Diagnostic, ErrorCode};
use sable_yellow::SyntaxKind::{self, *};

use super::{
    attributes, delimited, exprs, identifier_name, is_modifier, modifiers, separated, skip_until, stmts, types,
};
use crate::options::{Feature, SourceKind};
use crate::parser::{CompletedMarker, Marker, Parser};

/// Where a parameter list appears. Lambdas allow untyped parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterContext {
    Method,
    Lambda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    CompilationUnit,
    Namespace,
    FileScopedNamespace,
}

pub(crate) fn compilation_unit(p: &mut Parser<'_>) {
    let m = p.start();
    namespace_body(p, Scope::CompilationUnit);
    p.finish_eof();
    m.complete(p, COMPILATION_UNIT);
}

fn namespace_body(p: &mut Parser<'_>, scope: Scope) {
    let mut seen_members = false;
    let mut seen_statement = false;

    loop {
        match p.current() {
            EOF => break,
            R_BRACE if scope == Scope::Namespace => break,
            R_BRACE => p.skip_with_error(ErrorCode::EofExpected),
            EXTERN_KW if p.nth_at_contextual(1, ALIAS_KW) => extern_alias(p),
            USING_KW | IDENT if at_using_directive(p) => {
                if seen_members {
                    p.error(ErrorCode::UsingAfterElements);
                }
                using_directive(p);
            }
            L_BRACK if attributes::at_global_attribute(p) => attributes::attribute_list(p),
            _ if scope == Scope::CompilationUnit && at_global_statement(p) => {
                if !seen_statement && p.options().kind == SourceKind::Regular {
                    p.feature(Feature::TopLevelStatements);
                }
                let before = p.position();
                global_statement(p);
                if p.position() == before {
                    p.skip_with_error(ErrorCode::EofExpected);
                }
                seen_statement = true;
                seen_members = true;
            }
            _ => {
                let start = p.current_range();
                if let Some(member) = member_declaration(p) {
                    let allowed = is_namespace_member(member.kind())
                        || (scope == Scope::CompilationUnit && p.options().kind == SourceKind::Script);
                    if !allowed {
                        p.push_error(Diagnostic::new(ErrorCode::NamespaceUnexpected, start));
                    }
                }
                seen_members = true;
            }
        }
    }
}

fn is_namespace_member(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        NAMESPACE_DECL
            | FILE_SCOPED_NAMESPACE_DECL
            | CLASS_DECL
            | STRUCT_DECL
            | INTERFACE_DECL
            | RECORD_DECL
            | RECORD_STRUCT_DECL
            | ENUM_DECL
            | DELEGATE_DECL
            | INCOMPLETE_MEMBER
    )
}

fn global_statement(p: &mut Parser<'_>) {
    let m = p.start();
    p.with_async(true, stmts::statement);
    m.complete(p, GLOBAL_STATEMENT);
}

/// Top-level code that reads as a statement rather than a declaration.
/// Attributes and access modifiers always mean a member.
fn at_global_statement(p: &Parser<'_>) -> bool {
    if p.at(L_BRACK) {
        return p.look().scan_lambda().is_some();
    }

    let mut n = 0;
    while is_modifier(p, n) {
        if matches!(
            p.nth(n),
            PUBLIC_KW | PRIVATE_KW | PROTECTED_KW | INTERNAL_KW | ABSTRACT_KW | VIRTUAL_KW | OVERRIDE_KW | SEALED_KW
        ) {
            return false;
        }
        n += 1;
    }

    !at_type_keyword(p, n) && stmts::can_start_statement(p.nth(n))
}

/// Whether the token at `n` begins a type or namespace declaration.
fn at_type_keyword(p: &Parser<'_>, n: usize) -> bool {
    match p.nth(n) {
        CLASS_KW | STRUCT_KW | INTERFACE_KW | ENUM_KW | NAMESPACE_KW => true,
        DELEGATE_KW => !matches!(p.nth(n + 1), L_PAREN | L_BRACE | STAR),
        IDENT => at_record(p, n),
        _ => false,
    }
}

fn at_record(p: &Parser<'_>, n: usize) -> bool {
    p.nth_at_contextual(n, RECORD_KW)
        && (matches!(p.nth(n + 1), CLASS_KW | STRUCT_KW)
            || (p.nth_at(n + 1, IDENT) && matches!(p.nth(n + 2), L_PAREN | L_BRACE | LT | COLON | SEMICOLON)))
}

fn extern_alias(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();
    p.bump_remap(ALIAS_KW);
    p.expect(IDENT);
    p.expect(SEMICOLON);
    m.complete(p, EXTERN_ALIAS_DIRECTIVE);
}

fn at_using_directive(p: &Parser<'_>) -> bool {
    let n = usize::from(p.at_contextual(GLOBAL_KW));
    if !p.nth_at(n, USING_KW) {
        return false;
    }
    if n == 1 {
        return true;
    }

    match p.nth(n + 1) {
        STATIC_KW => true,
        IDENT => matches!(p.nth(n + 2), EQ | SEMICOLON | DOT | COLON_COLON),
        _ => false,
    }
}

fn using_directive(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at_contextual(GLOBAL_KW) {
        p.bump_remap(GLOBAL_KW);
    }
    p.bump();
    p.eat(STATIC_KW);

    if p.at(IDENT) && p.nth_at(1, EQ) {
        let alias = p.start();
        identifier_name(p);
        p.bump();
        alias.complete(p, NAME_EQUALS);
        types::ty(p);
    } else {
        types::name(p);
    }

    p.expect(SEMICOLON);
    m.complete(p, USING_DIRECTIVE);
}

/// One member of a type or namespace. `None` when the current token cannot
/// begin one; it has been skipped with a diagnostic.
pub(crate) fn member_declaration(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.enter() {
        p.skip_too_deep();
        let m = p.start();
        p.eat(SEMICOLON);
        return Some(m.complete(p, INCOMPLETE_MEMBER));
    }

    let member = member_core(p);
    p.leave();
    member
}

fn member_core(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let m = p.start();
    let attributes = attributes::attribute_lists(p);
    let modifiers = modifiers(p);
    let is_async = modifiers.contains(&ASYNC_KW);

    let member = match p.current() {
        CLASS_KW => type_declaration(p, m, CLASS_DECL),
        STRUCT_KW => type_declaration(p, m, STRUCT_DECL),
        INTERFACE_KW => type_declaration(p, m, INTERFACE_DECL),
        IDENT if at_record(p, 0) => record_declaration(p, m),
        ENUM_KW => enum_declaration(p, m),
        DELEGATE_KW if !p.nth_at(1, STAR) => delegate_declaration(p, m),
        NAMESPACE_KW => namespace_declaration(p, m),
        TILDE => destructor(p, m),
        EVENT_KW => event(p, m),
        IMPLICIT_KW | EXPLICIT_KW => conversion_operator(p, m),
        IDENT if p.nth_at(1, L_PAREN) => constructor(p, m),
        kind if types::can_start_type(kind) || kind == REF_KW => typed_member(p, m, is_async),
        R_BRACE | EOF if attributes > 0 || !modifiers.is_empty() => {
            p.error_with_current_text(ErrorCode::InvalidMemberDecl);
            m.complete(p, INCOMPLETE_MEMBER)
        }
        _ if attributes > 0 || !modifiers.is_empty() => m.complete(p, INCOMPLETE_MEMBER),
        _ => {
            m.abandon(p);
            p.skip_with_error(ErrorCode::InvalidMemberDecl);
            return None;
        }
    };
    Some(member)
}

fn namespace_declaration(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    types::name(p);

    if p.at(SEMICOLON) {
        p.feature(Feature::FileScopedNamespaces);
        p.bump();
        namespace_body(p, Scope::FileScopedNamespace);
        return m.complete(p, FILE_SCOPED_NAMESPACE_DECL);
    }

    p.expect(L_BRACE);
    namespace_body(p, Scope::Namespace);
    p.expect(R_BRACE);
    p.eat(SEMICOLON);
    m.complete(p, NAMESPACE_DECL)
}

fn type_declaration(p: &mut Parser<'_>, m: Marker, kind: SyntaxKind) -> CompletedMarker {
    p.bump();
    type_declaration_rest(p, m, kind)
}

fn record_declaration(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.feature(Feature::Records);
    p.bump_remap(RECORD_KW);

    let kind = if p.at(STRUCT_KW) {
        p.feature(Feature::RecordStructs);
        p.bump();
        RECORD_STRUCT_DECL
    } else {
        p.eat(CLASS_KW);
        RECORD_DECL
    };
    type_declaration_rest(p, m, kind)
}

/// Name, type parameters, primary constructor, bases, constraints, body.
fn type_declaration_rest(p: &mut Parser<'_>, m: Marker, kind: SyntaxKind) -> CompletedMarker {
    p.expect(IDENT);
    if p.at(LT) {
        type_parameter_list(p);
    }

    if p.at(L_PAREN) {
        if !matches!(kind, RECORD_DECL | RECORD_STRUCT_DECL) {
            p.feature(Feature::PrimaryConstructors);
        }
        parameter_list(p, ParameterContext::Method);
    }

    if p.at(COLON) {
        base_list(p);
    }
    constraint_clauses(p);
    type_body(p);
    m.complete(p, kind)
}

fn base_list(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    loop {
        let base = p.start();
        types::ty(p);
        if p.at(L_PAREN) {
            exprs::argument_list(p);
            base.complete(p, PRIMARY_CONSTRUCTOR_BASE_TYPE);
        } else {
            base.complete(p, SIMPLE_BASE_TYPE);
        }

        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, BASE_LIST);
}

fn type_body(p: &mut Parser<'_>) {
    if p.eat(SEMICOLON) {
        return;
    }
    if !p.at(L_BRACE) {
        p.expect(L_BRACE);
        p.missing(R_BRACE, None);
        return;
    }

    p.bump();
    while !p.at(R_BRACE) && !p.at(EOF) {
        member_declaration(p);
    }
    p.expect(R_BRACE);
    p.eat(SEMICOLON);
}

pub(crate) fn type_parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    let starts = |p: &Parser<'_>| matches!(p.current(), IDENT | L_BRACK | IN_KW | OUT_KW);
    delimited(p, LT, GT, COMMA, false, starts, |p| {
        let parameter = p.start();
        attributes::attribute_lists(p);
        if matches!(p.current(), IN_KW | OUT_KW) {
            p.bump();
        }
        p.expect(IDENT);
        parameter.complete(p, TYPE_PARAMETER);
    });
    m.complete(p, TYPE_PARAMETER_LIST);
}

pub(crate) fn constraint_clauses(p: &mut Parser<'_>) {
    while p.at_contextual(WHERE_KW) {
        let m = p.start();
        p.bump_remap(WHERE_KW);
        identifier_name(p);
        p.expect(COLON);

        loop {
            constraint(p);
            if !p.eat(COMMA) {
                break;
            }
        }
        m.complete(p, TYPE_PARAMETER_CONSTRAINT_CLAUSE);
    }
}

fn constraint(p: &mut Parser<'_>) {
    let m = p.start();
    let kind = match p.current() {
        CLASS_KW => {
            p.bump();
            p.eat(QUESTION);
            CLASS_CONSTRAINT
        }
        STRUCT_KW => {
            p.bump();
            STRUCT_CONSTRAINT
        }
        NEW_KW => {
            p.bump();
            p.expect(L_PAREN);
            p.expect(R_PAREN);
            CONSTRUCTOR_CONSTRAINT
        }
        DEFAULT_KW => {
            p.bump();
            DEFAULT_CONSTRAINT
        }
        _ => {
            types::ty(p);
            TYPE_CONSTRAINT
        }
    };
    m.complete(p, kind);
}

fn enum_declaration(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    p.expect(IDENT);
    if p.at(COLON) {
        base_list(p);
    }

    if p.at(L_BRACE) {
        p.bump();
        separated(p, R_BRACE, COMMA, true, |p| matches!(p.current(), IDENT | L_BRACK), enum_member);
        skip_until(p, |p| p.at(R_BRACE) || at_type_keyword(p, 0), ErrorCode::UnexpectedToken);
        p.expect(R_BRACE);
    } else {
        p.expect(L_BRACE);
        p.missing(R_BRACE, None);
    }

    p.eat(SEMICOLON);
    m.complete(p, ENUM_DECL)
}

fn enum_member(p: &mut Parser<'_>) {
    let m = p.start();
    attributes::attribute_lists(p);
    p.expect(IDENT);
    if p.at(EQ) {
        let value = p.start();
        p.bump();
        exprs::expr(p);
        value.complete(p, EQUALS_VALUE_CLAUSE);
    }
    m.complete(p, ENUM_MEMBER_DECL);
}

fn delegate_declaration(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    types::return_type(p);
    p.expect(IDENT);
    if p.at(LT) {
        type_parameter_list(p);
    }
    parameter_list(p, ParameterContext::Method);
    constraint_clauses(p);
    p.expect(SEMICOLON);
    m.complete(p, DELEGATE_DECL)
}

fn constructor(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    parameter_list(p, ParameterContext::Method);

    if p.at(COLON) {
        let initializer = p.start();
        p.bump();
        if matches!(p.current(), BASE_KW | THIS_KW) {
            p.bump();
        } else {
            p.expect(THIS_KW);
        }
        exprs::argument_list(p);
        initializer.complete(p, CONSTRUCTOR_INITIALIZER);
    }

    method_body(p);
    m.complete(p, CONSTRUCTOR_DECL)
}

fn destructor(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    p.expect(IDENT);
    parameter_list(p, ParameterContext::Method);
    method_body(p);
    m.complete(p, DESTRUCTOR_DECL)
}

fn conversion_operator(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    p.expect(OPERATOR_KW);
    p.eat(CHECKED_KW);
    types::ty(p);
    parameter_list(p, ParameterContext::Method);
    method_body(p);
    m.complete(p, CONVERSION_OPERATOR_DECL)
}

fn event(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    let ty = types::ty(p);

    let dots = explicit_interface_dots(p);
    if dots > 0 || (p.at(IDENT) && p.nth_at(1, L_BRACE)) {
        explicit_interface_specifier(p, dots);
        p.expect(IDENT);
        accessor_list(p);
        return m.complete(p, EVENT_DECL);
    }

    stmts::variable_declaration(p, ty);
    p.expect(SEMICOLON);
    m.complete(p, EVENT_FIELD_DECL)
}

/// Methods, properties, indexers, operators and fields: everything that
/// starts with a type.
fn typed_member(p: &mut Parser<'_>, m: Marker, is_async: bool) -> CompletedMarker {
    let ty = types::return_type(p);

    let dots = explicit_interface_dots(p);
    explicit_interface_specifier(p, dots);

    match p.current() {
        THIS_KW => indexer(p, m),
        OPERATOR_KW => operator(p, m),
        IDENT if matches!(p.nth(1), L_PAREN | LT) => method(p, m, is_async),
        IDENT if dots > 0 || matches!(p.nth(1), L_BRACE | FAT_ARROW) => {
            p.bump();
            property_body(p, true);
            m.complete(p, PROPERTY_DECL)
        }
        L_PAREN => method(p, m, is_async),
        _ => {
            stmts::variable_declaration(p, ty);
            p.expect(SEMICOLON);
            m.complete(p, FIELD_DECL)
        }
    }
}

/// How many leading segments of the dotted name at the cursor name an
/// interface, as in `IList<T>.this` or `IFoo.Bar`.
fn explicit_interface_dots(p: &Parser<'_>) -> usize {
    let mut look = p.look();
    let mut dots = 0;

    loop {
        if !look.eat(IDENT) {
            break;
        }
        if look.at(LT) && look.scan_possible_type_argument_list().is_none() {
            break;
        }
        if !look.eat(DOT) {
            break;
        }
        dots += 1;
        if matches!(look.kind(0), THIS_KW | OPERATOR_KW) {
            break;
        }
    }
    dots
}

fn explicit_interface_specifier(p: &mut Parser<'_>, dots: usize) {
    if dots == 0 {
        return;
    }

    let m = p.start();
    let mut name = types::simple_name(p);
    for _ in 1..dots {
        let qualified = name.precede(p);
        p.bump();
        types::simple_name(p);
        name = qualified.complete(p, QUALIFIED_NAME);
    }
    p.expect(DOT);
    m.complete(p, EXPLICIT_INTERFACE_SPECIFIER);
}

fn method(p: &mut Parser<'_>, m: Marker, is_async: bool) -> CompletedMarker {
    p.expect(IDENT);
    if p.at(LT) {
        type_parameter_list(p);
    }
    parameter_list(p, ParameterContext::Method);
    constraint_clauses(p);
    p.with_async(is_async, method_body);
    m.complete(p, METHOD_DECL)
}

fn indexer(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    bracketed_parameter_list(p);
    property_body(p, false);
    m.complete(p, INDEXER_DECL)
}

fn operator(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.bump();
    p.eat(CHECKED_KW);

    if let Some((kind, n_raw)) = p.look().composite_gt() {
        p.bump_composite(kind, n_raw);
    } else if is_overloadable(p.current()) {
        p.bump();
    } else {
        let diagnostic = Diagnostic::new(ErrorCode::OverloadableOperatorExpected, p.missing_range());
        p.missing(PLUS, Some(diagnostic));
    }

    parameter_list(p, ParameterContext::Method);
    method_body(p);
    m.complete(p, OPERATOR_DECL)
}

fn is_overloadable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        PLUS | MINUS
            | BANG
            | TILDE
            | PLUS_PLUS
            | MINUS_MINUS
            | TRUE_KW
            | FALSE_KW
            | STAR
            | SLASH
            | PERCENT
            | AMP
            | PIPE
            | CARET
            | LT_LT
            | EQ_EQ
            | BANG_EQ
            | LT
            | LT_EQ
            | GT_EQ
    )
}

/// `=> expr;`, or accessors with an optional `= value;` for properties.
fn property_body(p: &mut Parser<'_>, allow_initializer: bool) {
    if p.at(FAT_ARROW) {
        arrow_expr_clause(p);
        p.expect(SEMICOLON);
        return;
    }

    accessor_list(p);

    if allow_initializer && p.at(EQ) {
        let value = p.start();
        p.bump();
        exprs::variable_initializer(p);
        value.complete(p, EQUALS_VALUE_CLAUSE);
        p.expect(SEMICOLON);
    }
}

fn accessor_list(p: &mut Parser<'_>) {
    let m = p.start();
    if !p.at(L_BRACE) {
        p.expect(L_BRACE);
        p.missing(R_BRACE, None);
        m.complete(p, ACCESSOR_LIST);
        return;
    }

    p.bump();
    while !p.at(R_BRACE) && !p.at(EOF) {
        if at_accessor(p) {
            accessor(p);
        } else if at_type_keyword(p, 0) || is_modifier(p, 0) {
            break;
        } else {
            p.skip_with_error(ErrorCode::AccessorExpected);
        }
    }
    p.expect(R_BRACE);
    m.complete(p, ACCESSOR_LIST);
}

fn accessor_keyword(p: &Parser<'_>) -> Option<SyntaxKind> {
    [GET_KW, SET_KW, INIT_KW, ADD_KW, REMOVE_KW].into_iter().find(|&kind| p.at_contextual(kind))
}

fn at_accessor(p: &Parser<'_>) -> bool {
    p.at(L_BRACK)
        || accessor_keyword(p).is_some()
        || matches!(p.current(), PRIVATE_KW | PROTECTED_KW | INTERNAL_KW | READONLY_KW)
}

fn accessor(p: &mut Parser<'_>) {
    let m = p.start();
    attributes::attribute_lists(p);
    modifiers(p);

    match accessor_keyword(p) {
        Some(kind) => {
            if kind == INIT_KW {
                p.feature(Feature::InitOnlySetters);
            }
            p.bump_remap(kind);
        }
        None => {
            let diagnostic = Diagnostic::new(ErrorCode::AccessorExpected, p.missing_range());
            p.missing(GET_KW, Some(diagnostic));
        }
    }

    method_body(p);
    m.complete(p, ACCESSOR_DECL);
}

fn arrow_expr_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();
    exprs::expr_or_ref(p);
    m.complete(p, ARROW_EXPR_CLAUSE);
}

/// A block, `=> expr;` or a bare `;`.
pub(crate) fn method_body(p: &mut Parser<'_>) {
    match p.current() {
        L_BRACE => {
            stmts::block(p);
        }
        FAT_ARROW => {
            arrow_expr_clause(p);
            p.expect(SEMICOLON);
        }
        _ => {
            p.expect(SEMICOLON);
        }
    }
}

pub(crate) fn parameter_list(p: &mut Parser<'_>, context: ParameterContext) -> CompletedMarker {
    let m = p.start();
    if p.at(L_PAREN) {
        delimited(p, L_PAREN, R_PAREN, COMMA, false, starts_parameter, |p| parameter(p, context));
    } else {
        p.expect(L_PAREN);
        p.missing(R_PAREN, None);
    }
    m.complete(p, PARAMETER_LIST)
}

fn bracketed_parameter_list(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(L_BRACK) {
        delimited(p, L_BRACK, R_BRACK, COMMA, false, starts_parameter, |p| {
            parameter(p, ParameterContext::Method);
        });
    } else {
        p.expect(L_BRACK);
        p.missing(R_BRACK, None);
    }
    m.complete(p, BRACKETED_PARAMETER_LIST);
}

fn starts_parameter(p: &Parser<'_>) -> bool {
    matches!(p.current(), L_BRACK | REF_KW | OUT_KW | IN_KW | PARAMS_KW | THIS_KW | READONLY_KW)
        || types::can_start_type(p.current())
}

fn parameter(p: &mut Parser<'_>, context: ParameterContext) {
    let m = p.start();
    attributes::attribute_lists(p);

    if stmts::at_scoped(p, 0) {
        p.feature(Feature::ScopedRef);
        p.bump_remap(SCOPED_KW);
    }
    while matches!(p.current(), REF_KW | OUT_KW | IN_KW | PARAMS_KW | THIS_KW | READONLY_KW) {
        p.bump();
    }

    if context == ParameterContext::Lambda && p.at(IDENT) && matches!(p.nth(1), COMMA | R_PAREN) {
        p.bump();
        m.complete(p, PARAMETER);
        return;
    }

    types::ty(p);
    p.expect(IDENT);

    if p.at(EQ) {
        if context == ParameterContext::Lambda {
            p.feature(Feature::LambdaOptionalParameters);
        }
        let value = p.start();
        p.bump();
        exprs::expr(p);
        value.complete(p, EQUALS_VALUE_CLAUSE);
    }
    m.complete(p, PARAMETER);
}
