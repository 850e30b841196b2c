use super::*;

fn kinds(text: &str) -> Vec<SyntaxKind> {
    tokenize(text, TextSize::new(0)).into_iter().map(|token| token.kind).collect()
}

fn single(text: &str) -> Token {
    let mut tokens = tokenize(text, TextSize::new(0));
    assert_eq!(tokens.len(), 2, "expected a single token in {text:?}: {tokens:?}");
    tokens.remove(0)
}

fn trivia_text(trivia: &GreenTrivia) -> String {
    let mut text = String::new();
    trivia.write_text(&mut text);
    text
}

#[test]
fn numeric_literals() {
    let inputs = ["123", "0", "0x1F", "0b1010_1010", "1_000", "1.5", ".5", "1e10", "1.5e-3", "10UL", "2f", "3.0m"];

    for input in inputs {
        let token = single(input);
        assert_eq!(token.kind, NUMERIC_LITERAL, "{input}");
        assert_eq!(token.text(input), input);
        assert!(token.diagnostics.is_empty(), "{input}: {:?}", token.diagnostics);
    }
}

#[test]
fn member_access_on_integer_is_not_real() {
    assert_eq!(kinds("1..2"), [NUMERIC_LITERAL, DOT_DOT, NUMERIC_LITERAL, EOF]);
    assert_eq!(kinds("1.ToString"), [NUMERIC_LITERAL, DOT, IDENT, EOF]);
}

#[test]
fn keywords_and_contextual_keywords() {
    let tokens = tokenize("int var async @class", TextSize::new(0));
    let kinds = tokens.iter().map(|token| (token.kind, token.contextual_kind)).collect::<Vec<_>>();

    assert_eq!(
        kinds,
        [(INT_KW, INT_KW), (IDENT, VAR_KW), (IDENT, ASYNC_KW), (IDENT, IDENT), (EOF, EOF)]
    );
}

#[test]
fn greater_than_is_never_merged() {
    assert_eq!(kinds("a >> b"), [IDENT, GT, GT, IDENT, EOF]);
    assert_eq!(kinds("a >>= b"), [IDENT, GT, GT_EQ, IDENT, EOF]);
    assert_eq!(kinds("a <<= b"), [IDENT, LT_LT_EQ, IDENT, EOF]);
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds("?? ??= ?. :: => -> .. ! != && || ++ --"),
        [
            QUESTION_QUESTION,
            QUESTION_QUESTION_EQ,
            QUESTION,
            DOT,
            COLON_COLON,
            FAT_ARROW,
            ARROW,
            DOT_DOT,
            BANG,
            BANG_EQ,
            AMP_AMP,
            PIPE_PIPE,
            PLUS_PLUS,
            MINUS_MINUS,
            EOF
        ]
    );
}

#[test]
fn strings() {
    let inputs = [
        (r#""a\"b""#, STRING_LITERAL),
        (r#"@"a""b""#, STRING_LITERAL),
        (r#"$"x = {x}""#, INTERPOLATED_STRING),
        (r#"$"{ f("}") }""#, INTERPOLATED_STRING),
        (r#"$@"{a}""{{""#, INTERPOLATED_STRING),
        ("\"\"\"raw \"quoted\" text\"\"\"", RAW_STRING_LITERAL),
        ("$\"\"\"{x}\"\"\"", INTERPOLATED_STRING),
        ("'a'", CHAR_LITERAL),
        (r"'A'", CHAR_LITERAL),
        (r"'\''", CHAR_LITERAL),
    ];

    for (input, kind) in inputs {
        let token = single(input);
        assert_eq!(token.kind, kind, "{input}");
        assert_eq!(token.text(input), input);
        assert!(token.diagnostics.is_empty(), "{input}: {:?}", token.diagnostics);
    }
}

#[test]
fn empty_string_is_not_raw() {
    assert_eq!(kinds(r#""" + x"#), [STRING_LITERAL, PLUS, IDENT, EOF]);
}

#[test]
fn lexical_errors_attach_to_their_token() {
    let token = single("\"abc");
    assert_eq!(token.diagnostics.len(), 1);
    assert_eq!(token.diagnostics[0].code(), ErrorCode::NewlineInConstant);

    let token = single("''");
    assert_eq!(token.diagnostics[0].code(), ErrorCode::EmptyCharLiteral);

    let token = single("'ab'");
    assert_eq!(token.diagnostics[0].code(), ErrorCode::TooManyCharsInCharLiteral);

    let tokens = tokenize("a /* open", TextSize::new(0));
    assert_eq!(tokens[0].kind, IDENT);
    assert_eq!(tokens[0].diagnostics[0].code(), ErrorCode::UnterminatedComment);
    assert_eq!(tokens[0].diagnostics[0].range(), TextRange::new(2.into(), 9.into()));

    let token = single("`");
    assert_eq!(token.kind, UNKNOWN);
    assert_eq!(token.diagnostics[0].message(), "Unexpected character '`'");
}

#[test]
fn trailing_trivia_stops_after_end_of_line() {
    let text = "a // note\n  b";
    let tokens = tokenize(text, TextSize::new(0));

    assert_eq!(trivia_text(&tokens[0].trailing), " // note\n");
    assert!(tokens[0].has_trailing_end_of_line());
    assert_eq!(trivia_text(&tokens[1].leading), "  ");
    assert_eq!(tokens[1].range, TextRange::new(12.into(), 13.into()));
}

#[test]
fn preprocessor_directives_only_at_line_start() {
    let text = "#region r\nx # y";
    let tokens = tokenize(text, TextSize::new(0));

    let pieces = tokens[0].leading.pieces().iter().map(TriviaPiece::kind).collect::<Vec<_>>();
    assert_eq!(pieces, [PREPROCESSOR_DIRECTIVE, END_OF_LINE]);
    assert_eq!(tokens[1].kind, UNKNOWN);
}

#[test]
fn doc_comments_are_distinct() {
    let tokens = tokenize("/// doc\nx", TextSize::new(0));
    assert_eq!(tokens[0].leading.pieces()[0].kind(), DOC_COMMENT);
}

#[test]
fn offset_keeps_absolute_ranges() {
    let text = "junk; x + y";
    let tokens = tokenize(text, TextSize::new(5));

    assert_eq!(tokens.iter().map(|token| token.kind).collect::<Vec<_>>(), [IDENT, PLUS, IDENT, EOF]);
    assert_eq!(tokens[0].range, TextRange::new(6.into(), 7.into()));
    assert_eq!(tokens[0].full_range(), TextRange::new(5.into(), 8.into()));
    assert_eq!(tokens[0].text(text), "x");
}

#[test]
fn offset_inside_a_character_moves_back() {
    let text = "é x = 1;";
    assert_eq!(start_offset(text, TextSize::new(1)), TextSize::new(0));
    assert_eq!(start_offset(text, TextSize::new(2)), TextSize::new(2));
    assert_eq!(start_offset(text, TextSize::new(100)), TextSize::of(text));

    let tokens = tokenize(text, TextSize::new(1));
    assert_eq!(tokens[0].kind, IDENT);
    assert_eq!(tokens[0].text(text), "é");
}

#[test]
fn full_text_round_trips() {
    let text = "class C {\r\n  /* c */ int x = 0x1; // tail\n#if DEBUG\n}\n";
    let mut rebuilt = String::new();

    for token in tokenize(text, TextSize::new(0)) {
        rebuilt.push_str(&trivia_text(&token.leading));
        rebuilt.push_str(token.text(text));
        rebuilt.push_str(&trivia_text(&token.trailing));
    }

    assert_eq!(rebuilt, text);
}
