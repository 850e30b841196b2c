use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use proptest::prelude::*;
use sable_errors::ErrorCode;
use sable_yellow::ast::{AstNode, ConditionalExpr, Expr};
use sable_yellow::{SyntaxKind, SyntaxKind::*, SyntaxNode, TextSize};

use crate::{
    LanguageVersion, Parse, ParseOptions, SourceKind, parse_compilation_unit, parse_expression,
    parse_member_declaration, parse_statement, parse_type_name,
};

fn unit(text: &str) -> Parse {
    checked(text, parse_compilation_unit(text, &ParseOptions::default()))
}

fn statement(text: &str) -> Parse {
    checked(text, parse_statement(text, &ParseOptions::default()))
}

fn expression(text: &str) -> Parse {
    checked(text, parse_expression(text, &ParseOptions::default()))
}

fn with_version(text: &str, version: LanguageVersion) -> Parse {
    let options = ParseOptions::default().with_language_version(version);
    checked(text, parse_compilation_unit(text, &options))
}

/// Every parse in this module goes through here: the tree must give back
/// the text it was built from.
fn checked(text: &str, parse: Parse) -> Parse {
    assert_eq!(parse.syntax().full_text(), text, "round trip of {text:?}");
    parse
}

fn kinds(parse: &Parse) -> Vec<SyntaxKind> {
    parse.syntax().descendants().map(SyntaxNode::kind).collect()
}

fn count(parse: &Parse, kind: SyntaxKind) -> usize {
    kinds(parse).into_iter().filter(|&k| k == kind).count()
}

fn codes(parse: &Parse) -> Vec<ErrorCode> {
    parse.errors().iter().map(|error| error.code()).collect()
}

fn assert_clean(parse: &Parse) {
    assert!(parse.errors().is_empty(), "unexpected diagnostics:\n{}", parse.debug_tree());
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    expected: PathBuf,
    text: String,
}

impl TestCase {
    /// `test_data/<dir>/*.cs` with their `.tree` dumps.
    fn list(dir: &str) -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join(dir);

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| panic!("Cannot read directory {}: {err}", test_data_dir.display()))
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "cs" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn test_data() {
    let entry_points: [(&str, fn(&str, &ParseOptions) -> Parse); 3] = [
        ("expressions", parse_expression),
        ("statements", parse_statement),
        ("units", parse_compilation_unit),
    ];

    for (dir, entry_point) in entry_points {
        let cases = TestCase::list(dir);
        assert!(!cases.is_empty(), "no cases in test_data/{dir}");

        for case in cases {
            let parse = checked(&case.text, entry_point(&case.text, &ParseOptions::default()));
            expect_file![&case.expected].assert_eq(&parse.debug_tree());
        }
    }
}

#[test]
fn parenthesized_receiver_is_not_a_cast() {
    let parse = statement("(x).ToString();");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&EXPRESSION_STMT));
    assert!(kinds.contains(&PARENTHESIZED_EXPR));
    assert!(!kinds.contains(&CAST_EXPR));
}

#[test]
fn named_tuple_type_declares_local() {
    let parse = statement("(Int32 a, Int64 b) x;");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&LOCAL_DECLARATION_STMT));
    assert!(kinds.contains(&TUPLE_TYPE));
    assert_eq!(count(&parse, TUPLE_ELEMENT), 2);
}

#[test]
fn tuple_of_names_is_an_expression() {
    let parse = statement("(Int32, Int64).Foo();");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&EXPRESSION_STMT));
    assert!(kinds.contains(&TUPLE_EXPR));
    assert!(!kinds.contains(&TUPLE_TYPE));
}

#[test]
fn tuple_assignment() {
    let parse = statement("(x, y) = foo;");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&ASSIGNMENT_EXPR));
    assert!(kinds.contains(&TUPLE_EXPR));
    assert!(!kinds.contains(&LOCAL_DECLARATION_STMT));
}

#[test]
fn lambda_with_return_type() {
    let parse = expression("T (x) => x");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&PAREN_LAMBDA_EXPR));
}

#[test]
fn return_type_requires_parenthesized_parameters() {
    let parse = expression("T x => y");
    assert!(!kinds(&parse).contains(&PAREN_LAMBDA_EXPR));
    assert_eq!(codes(&parse), [ErrorCode::UnexpectedToken]);
}

#[test]
fn nullable_predefined_return_type() {
    let parse = expression("int? () => null");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&PAREN_LAMBDA_EXPR));
    assert!(kinds.contains(&NULLABLE_TYPE));
}

#[test]
fn nullable_predefined_return_type_is_not_a_condition() {
    let parse = expression("int? () => x : y");
    assert!(kinds(&parse).contains(&PAREN_LAMBDA_EXPR));
    assert!(!kinds(&parse).contains(&CONDITIONAL_EXPR));
    assert_eq!(codes(&parse), [ErrorCode::UnexpectedToken]);
    assert_eq!(parse.errors()[0].range().start(), TextSize::new(13));
}

#[test]
fn speculative_lambda_yields_to_nested_conditionals() {
    let parse = expression("b? c? () => x : y : z");
    assert_clean(&parse);
    assert_eq!(count(&parse, CONDITIONAL_EXPR), 2);
    assert_eq!(count(&parse, PAREN_LAMBDA_EXPR), 1);
    assert_eq!(count(&parse, NULLABLE_TYPE), 0);

    let root = parse.syntax();
    let outer = root.descendants().find_map(ConditionalExpr::cast).unwrap();
    assert!(matches!(outer.condition(), Some(Expr::IdentifierName(_))));
    assert!(matches!(outer.when_true(), Some(Expr::Conditional(_))));
    assert!(matches!(outer.when_false(), Some(Expr::IdentifierName(_))));
}

#[test]
fn array_of_nullable_reads_as_element_access_condition() {
    let parse = expression("T[]? () => x : y");
    assert!(kinds(&parse).contains(&ELEMENT_ACCESS_EXPR));
    assert_eq!(codes(&parse), [ErrorCode::ValueExpected]);

    let root = parse.syntax();
    let conditional = root.descendants().find_map(ConditionalExpr::cast).unwrap();
    assert!(matches!(conditional.condition(), Some(Expr::ElementAccess(_))));
    assert!(matches!(conditional.when_true(), Some(Expr::ParenLambda(_))));
}

#[test]
fn tuple_array_declaration() {
    let parse = statement("(T, T)[] id;");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&LOCAL_DECLARATION_STMT));
    assert!(kinds.contains(&ARRAY_TYPE));
    assert!(kinds.contains(&TUPLE_TYPE));
}

#[test]
fn nullable_tuple_declaration() {
    let parse = statement("(x, y)? z = M();");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&LOCAL_DECLARATION_STMT));
    assert!(kinds.contains(&NULLABLE_TYPE));
    assert!(kinds.contains(&INVOCATION_EXPR));
}

#[test]
fn cast_to_tuple_type() {
    let parse = statement("(((x, y))z).Goo();");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&CAST_EXPR));
    assert!(kinds.contains(&TUPLE_TYPE));
    assert!(kinds.contains(&INVOCATION_EXPR));
}

#[test]
fn parenthesized_tuple_is_not_a_cast() {
    let parse = statement("((x, y)).ToString();");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&TUPLE_EXPR));
    assert!(!kinds.contains(&CAST_EXPR));
}

#[test]
fn deconstruction_declarations() {
    let parse = statement("var (x, y) = e;");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&DECLARATION_EXPR));
    assert!(kinds(&parse).contains(&PARENTHESIZED_VARIABLE_DESIGNATION));

    let parse = statement("(var x, var _) = e;");
    assert_clean(&parse);
    assert_eq!(count(&parse, DECLARATION_EXPR), 2);
    assert_eq!(count(&parse, DISCARD_DESIGNATION), 1);
}

#[test]
fn out_variable_discard() {
    let parse = statement("M(out var _);");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&DECLARATION_EXPR));
    assert!(kinds(&parse).contains(&DISCARD_DESIGNATION));
}

#[test]
fn function_pointer_local() {
    let parse = statement("delegate* unmanaged[Cdecl]<int, void> p;");
    assert_clean(&parse);
    let kinds = kinds(&parse);
    assert!(kinds.contains(&LOCAL_DECLARATION_STMT));
    assert!(kinds.contains(&FUNCTION_POINTER_TYPE));
    assert!(kinds.contains(&FUNCTION_POINTER_UNMANAGED_CALLING_CONVENTION));
    assert_eq!(count(&parse, FUNCTION_POINTER_PARAMETER), 2);
}

#[test]
fn generic_invocation_or_comparisons() {
    let parse = expression("F(G<A, B>(7))");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&GENERIC_NAME));
    assert_eq!(count(&parse, ARGUMENT), 2);

    let parse = expression("F(G < A, B > 7)");
    assert_clean(&parse);
    assert!(!kinds(&parse).contains(&GENERIC_NAME));
    assert_eq!(count(&parse, BINARY_EXPR), 2);
}

#[test]
fn generic_local_declaration() {
    let parse = statement("A<B> c;");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&LOCAL_DECLARATION_STMT));
    assert!(kinds(&parse).contains(&GENERIC_NAME));
}

#[test]
fn shift_operators_are_glued() {
    let parse = expression("a >> b");
    assert_clean(&parse);
    let shift = parse.syntax().tokens().find(|token| token.kind() == GT_GT).unwrap();
    assert_eq!(shift.text(), ">>");

    let parse = parse_type_name("List<List<int>>", &ParseOptions::default());
    assert_clean(&parse);
    assert_eq!(count(&parse, GENERIC_NAME), 2);
}

#[test]
fn is_type_then_conditional() {
    let parse = expression("x is T ? a : b");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&CONDITIONAL_EXPR));
    assert!(!kinds(&parse).contains(&IS_PATTERN_EXPR));
}

#[test]
fn patterns() {
    let parse = expression("x is int y");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&IS_PATTERN_EXPR));
    assert!(kinds(&parse).contains(&DECLARATION_PATTERN));

    let parse = expression("x is { Length: > 0 }");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&PROPERTY_PATTERN_CLAUSE));
    assert!(kinds(&parse).contains(&RELATIONAL_PATTERN));

    let parse = expression("x is not null and not 0");
    assert_clean(&parse);
    assert_eq!(count(&parse, UNARY_PATTERN), 2);
    assert_eq!(count(&parse, BINARY_PATTERN), 1);

    let parse = expression("x is [1, .. var rest]");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&LIST_PATTERN));
    assert!(kinds(&parse).contains(&SLICE_PATTERN));
    assert!(kinds(&parse).contains(&VAR_PATTERN));
}

#[test]
fn switch_expression() {
    let parse = expression(r#"x switch { 1 => "a", _ => "b" }"#);
    assert_clean(&parse);
    assert_eq!(count(&parse, SWITCH_EXPR_ARM), 2);
    assert!(kinds(&parse).contains(&DISCARD_PATTERN));
    assert!(kinds(&parse).contains(&CONSTANT_PATTERN));
}

#[test]
fn switch_expression_recovery() {
    let parse = expression("x switch { case 1 => 2 }");
    assert_eq!(codes(&parse), [ErrorCode::BadCaseInSwitchArm]);

    let parse = expression("x switch { 1 : 2 }");
    assert_eq!(codes(&parse), [ErrorCode::SyntaxError]);
    assert_eq!(parse.errors()[0].args(), ["=>"]);

    let parse = expression("x switch { 1 => 2; _ => 3 }");
    assert_eq!(codes(&parse), [ErrorCode::UnexpectedToken]);
    assert_eq!(count(&parse, SWITCH_EXPR_ARM), 2);

    let parse = expression("x switch { 1 => 2");
    assert_eq!(codes(&parse), [ErrorCode::RbraceExpected]);
}

#[test]
fn missing_tokens_come_first_at_a_shared_position() {
    let parse = expression("x is { A: 1 => 2");
    assert_eq!(codes(&parse), [ErrorCode::RbraceExpected, ErrorCode::UnexpectedToken]);
    assert_eq!(parse.errors()[0].range().start(), parse.errors()[1].range().start());
    assert_eq!(parse.errors()[1].args(), ["=>"]);
}

#[test]
fn statements() {
    let text = "
        if (a) b(); else { c(); }
        while (x) x--;
        do { } while (y);
        for (int i = 0; i < 10; i++) { }
        foreach (var item in items) { }
        foreach (var (k, v) in map) { }
        switch (n) { case 1: case int m when m > 2: break; default: return; }
        try { } catch (E e) when (e.Ok) { } finally { }
        lock (o) { }
        using (var r = Open()) { }
        using var s = Open();
        await foreach (var i in xs) { }
        label: goto label;
        checked { }
        int Add(int a, int b) => a + b;
        static void Log() { }
        yield return 1;
        throw new E();
    ";
    let parse = unit(text);
    assert_clean(&parse);

    let kinds = kinds(&parse);
    for kind in [
        IF_STMT,
        ELSE_CLAUSE,
        WHILE_STMT,
        DO_STMT,
        FOR_STMT,
        FOREACH_STMT,
        FOREACH_VARIABLE_STMT,
        SWITCH_STMT,
        CASE_SWITCH_LABEL,
        CASE_PATTERN_SWITCH_LABEL,
        DEFAULT_SWITCH_LABEL,
        TRY_STMT,
        CATCH_CLAUSE,
        CATCH_FILTER_CLAUSE,
        FINALLY_CLAUSE,
        LOCK_STMT,
        USING_STMT,
        LABELED_STMT,
        GOTO_STMT,
        CHECKED_STMT,
        LOCAL_FUNCTION_STMT,
        YIELD_RETURN_STMT,
        THROW_STMT,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
    assert_eq!(count(&parse, LOCAL_FUNCTION_STMT), 2);
    assert_eq!(count(&parse, GLOBAL_STATEMENT), 18);
}

#[test]
fn statement_recovery() {
    let parse = statement("try { }");
    assert_eq!(codes(&parse), [ErrorCode::ExpectedCatchOrFinally]);

    let parse = statement("static int x = 1;");
    assert_eq!(codes(&parse), [ErrorCode::BadModifier]);

    let parse = statement("using static var x = y;");
    assert_eq!(codes(&parse), [ErrorCode::UsingDeclarationModifiers]);

    let parse = statement("if (x) int y = 1;");
    assert_eq!(codes(&parse), [ErrorCode::BadEmbeddedStatement]);

    let parse = statement("if (x) ;");
    assert_eq!(codes(&parse), [ErrorCode::PossibleMistakenNullStatement]);
    assert!(!parse.has_errors());

    let parse = statement("F(1;");
    assert_eq!(codes(&parse), [ErrorCode::CloseParenExpected]);

    let parse = unit("class C { void M() { else x(); } }");
    assert_eq!(codes(&parse), [ErrorCode::ElseCannotStartStatement]);
}

#[test]
fn expression_recovery() {
    assert_eq!(codes(&expression("(a: 1)")), [ErrorCode::TupleTooFewElements]);
    assert_eq!(codes(&expression("new C")), [ErrorCode::NewRequiresArgs]);
    assert_eq!(codes(&expression("stackalloc int")), [ErrorCode::StackallocRequiresBrackets]);
    assert_eq!(codes(&expression("x is default")), [ErrorCode::DefaultPattern]);
    assert_eq!(codes(&expression("a[]")), [ErrorCode::ValueExpected]);
}

#[test]
fn type_declarations() {
    let text = "
        using System;
        using static System.Math;
        using Alias = System.Collections.Generic.List<int>;

        namespace N
        {
            [Serializable]
            public sealed class C<T> : Base, IFoo where T : class, new()
            {
                private int _x = 1, _y;
                public int P { get; private set; } = 3;
                public int Q => _x;
                public int this[int i] { get => i; }
                public C(int x) : base(x) { }
                ~C() { }
                public static C<T> operator +(C<T> a, C<T> b) => a;
                public static implicit operator int(C<T> c) => 0;
                public event Action E;
                int IFoo.Bar() => 1;
                public async Task<int> RunAsync() { return await Task.FromResult(1); }
            }

            struct S { }
            interface I { void M(); }
            enum E { A, B = 2, }
            delegate void D(int x);
            record R(int X);
            record struct P(int Y) { }
        }
    ";
    let parse = unit(text);
    assert_clean(&parse);

    let kinds = kinds(&parse);
    for kind in [
        USING_DIRECTIVE,
        NAME_EQUALS,
        NAMESPACE_DECL,
        ATTRIBUTE_LIST,
        CLASS_DECL,
        TYPE_PARAMETER_LIST,
        BASE_LIST,
        TYPE_PARAMETER_CONSTRAINT_CLAUSE,
        CLASS_CONSTRAINT,
        CONSTRUCTOR_CONSTRAINT,
        FIELD_DECL,
        PROPERTY_DECL,
        ACCESSOR_DECL,
        ARROW_EXPR_CLAUSE,
        INDEXER_DECL,
        CONSTRUCTOR_DECL,
        CONSTRUCTOR_INITIALIZER,
        DESTRUCTOR_DECL,
        OPERATOR_DECL,
        CONVERSION_OPERATOR_DECL,
        EVENT_FIELD_DECL,
        EXPLICIT_INTERFACE_SPECIFIER,
        METHOD_DECL,
        AWAIT_EXPR,
        STRUCT_DECL,
        INTERFACE_DECL,
        ENUM_DECL,
        DELEGATE_DECL,
        RECORD_DECL,
        RECORD_STRUCT_DECL,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
    assert_eq!(count(&parse, USING_DIRECTIVE), 3);
    assert_eq!(count(&parse, ENUM_MEMBER_DECL), 2);
}

#[test]
fn member_recovery() {
    assert_eq!(codes(&unit("using A; class C { } using B;")), [ErrorCode::UsingAfterElements]);
    assert_eq!(codes(&unit("class C { } }")), [ErrorCode::EofExpected]);
    assert_eq!(codes(&unit("namespace N { int x; }")), [ErrorCode::NamespaceUnexpected]);
    assert_eq!(codes(&unit("class C { public public int x; }")), [ErrorCode::DuplicateModifier]);
    assert_eq!(
        codes(&unit("class C { public static C operator (C a) => a; }")),
        [ErrorCode::OverloadableOperatorExpected]
    );
    assert!(codes(&unit("class C { int P { get; bad; } }")).contains(&ErrorCode::AccessorExpected));
    assert_eq!(codes(&unit("class C { public }")), [ErrorCode::InvalidMemberDecl]);

    let parse = unit("class C { void M() { int x = 1; }");
    assert_eq!(codes(&parse), [ErrorCode::RbraceExpected]);
    assert!(kinds(&parse).contains(&METHOD_DECL));
}

#[test]
fn member_fragment() {
    let parse = parse_member_declaration("public int X { get; init; }", &ParseOptions::default());
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&PROPERTY_DECL));
    assert_eq!(count(&parse, ACCESSOR_DECL), 2);
}

#[test]
fn top_level_statements() {
    let text = "System.Console.WriteLine(1);";
    assert_clean(&unit(text));

    let parse = with_version(text, LanguageVersion::CSharp8);
    assert_eq!(codes(&parse), [ErrorCode::FeatureNotAvailable]);

    let options = ParseOptions::default().with_language_version(LanguageVersion::CSharp8).with_kind(SourceKind::Script);
    assert_clean(&checked(text, parse_compilation_unit(text, &options)));
}

#[test]
fn script_members_at_top_level() {
    let text = "int x = 1; void M() { }";
    let options = ParseOptions::default().with_kind(SourceKind::Script);
    let parse = checked(text, parse_compilation_unit(text, &options));
    assert_clean(&parse);
    assert_eq!(count(&parse, GLOBAL_STATEMENT), 2);
}

#[test]
fn gated_features() {
    let parse = with_version("var t = (1, 2);", LanguageVersion::CSharp6);
    let features = parse
        .errors()
        .iter()
        .filter(|error| error.code() == ErrorCode::FeatureNotAvailable)
        .map(|error| error.args()[0].clone())
        .collect::<Vec<_>>();
    assert!(features.contains(&"tuples".to_owned()));

    let parse = parse_expression("x switch { _ => 1 }", &ParseOptions::default().with_language_version(LanguageVersion::CSharp7_3));
    assert_eq!(codes(&parse), [ErrorCode::FeatureNotAvailable]);
    assert_eq!(parse.errors()[0].args(), ["switch expression", "7.3", "8.0"]);
    assert_eq!(count(&parse, SWITCH_EXPR), 1);

    let parse = with_version("namespace N;", LanguageVersion::CSharp9);
    assert_eq!(codes(&parse), [ErrorCode::FeatureNotAvailable]);
    assert!(kinds(&parse).contains(&FILE_SCOPED_NAMESPACE_DECL));

    assert_clean(&unit("namespace N; class C { }"));
}

#[test]
fn queries_and_collections() {
    let parse = expression("from x in xs where x > 0 orderby x descending select x * 2");
    assert_clean(&parse);
    for kind in [QUERY_EXPR, FROM_CLAUSE, WHERE_CLAUSE, ORDER_BY_CLAUSE, SELECT_CLAUSE] {
        assert!(kinds(&parse).contains(&kind), "missing {kind:?}");
    }

    let parse = expression("[1, .. rest]");
    assert_clean(&parse);
    assert!(kinds(&parse).contains(&COLLECTION_EXPR));
    assert!(kinds(&parse).contains(&SPREAD_ELEMENT));
}

#[test]
fn deep_parentheses_are_reported_once() {
    let depth = 5_000;
    let text = format!("class C {{ void M() {{ var x = {}1{}; }} }}", "(".repeat(depth), ")".repeat(depth));
    let parse = unit(&text);
    let too_deep = codes(&parse).into_iter().filter(|&code| code == ErrorCode::ExpressionTooComplex).count();
    assert_eq!(too_deep, 1);
    assert!(kinds(&parse).contains(&METHOD_DECL));
}

#[test]
fn deep_nesting_terminates() {
    let depth = 3_000;
    for text in [
        "{".repeat(depth) + &"}".repeat(depth),
        "(".repeat(depth),
        "x is ".to_owned() + &"(".repeat(depth),
        "List<".repeat(depth) + "int x;",
    ] {
        let parse = statement(&text);
        assert!(!parse.errors().is_empty());
    }
}

#[test]
fn malformed_input_reports_diagnostics() {
    for text in ["class", "class C {", "void M(", "a ? b", "x => ", "new", "[", "if (", "} } }", "@"] {
        let parse = unit(text);
        assert!(!parse.errors().is_empty(), "no diagnostics for {text:?}");
    }
}

#[test]
fn reparse_is_stable() {
    let text = "class C { int M(int a) => a switch { > 0 => 1, _ => 0 }; }";
    let first = unit(text);
    assert_clean(&first);
    let second = unit(&first.syntax().full_text());
    assert_eq!(first.debug_tree(), second.debug_tree());
    assert_eq!(first, second);
}

#[test]
fn offset_ranges_are_absolute() {
    let text = "junk; x + y";
    let options = ParseOptions::default().with_offset(6);
    let parse = parse_expression(text, &options);
    assert_clean(&parse);
    assert_eq!(parse.syntax().full_text(), "x + y");
    assert_eq!(parse.syntax().text_range().start(), TextSize::new(6));
    assert!(kinds(&parse).contains(&BINARY_EXPR));
}

#[test]
fn offset_inside_a_character_is_rounded_down() {
    let text = "é x = 1;";
    for offset in 0..=text.len() as u32 + 2 {
        let options = ParseOptions::default().with_offset(offset);
        let parse = parse_statement(text, &options);
        let range = parse.syntax().full_range();
        assert_eq!(range.end(), TextSize::of(text), "offset {offset}");
        assert_eq!(parse.syntax().full_text(), &text[range], "offset {offset}");
    }

    let parse = parse_statement(text, &ParseOptions::default().with_offset(1));
    assert_clean(&parse);
    assert_eq!(parse.syntax().full_range().start(), TextSize::new(0));
    assert_eq!(count(&parse, LOCAL_DECLARATION_STMT), 1);
}

#[test]
fn parses_on_many_threads() {
    let text = "class C { void M() { var (a, b) = (1, 2); } }";
    let expected = unit(text).debug_tree();

    std::thread::scope(|scope| {
        let handles = (0..4).map(|_| scope.spawn(|| unit(text).debug_tree())).collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

const SOUP: &[&str] = &[
    "(", ")", "{", "}", "[", "]", "<", ">", ";", ",", ":", "?", ".", "=", "=>", "+", "*", "x", "y", "_", "int",
    "var", "class", "if", "else", "new", "case", "switch", "is", "not", "async", "await", "ref", "1", "\"s\"",
    "$\"a{x}\"", "'c'", "@", "/*", "//", "\n", "#", "record", "using", "namespace", "delegate", "from", "in",
];

proptest! {
    #[test]
    fn token_soup_round_trips(words in prop::collection::vec(prop::sample::select(SOUP), 0..48)) {
        let text = words.join(" ");
        let options = ParseOptions::default();

        let parses = [
            parse_compilation_unit(&text, &options),
            parse_statement(&text, &options),
            parse_expression(&text, &options),
            parse_member_declaration(&text, &options),
            parse_type_name(&text, &options),
        ];
        for parse in parses {
            prop_assert_eq!(parse.syntax().full_text(), text.clone());
        }
    }
}
