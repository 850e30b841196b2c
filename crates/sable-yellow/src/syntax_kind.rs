/// Every token, trivia and node kind of the tree.
///
/// Variants are grouped: punctuation, reserved keywords, contextual keywords,
/// literals, trivia, nodes. The grouping is relied upon by the range checks
/// below.
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SyntaxKind {
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    SEMICOLON,
    COMMA,
    DOT,
    DOT_DOT,
    COLON,
    COLON_COLON,
    QUESTION,
    QUESTION_QUESTION,
    QUESTION_QUESTION_EQ,
    TILDE,
    BANG,
    BANG_EQ,
    EQ,
    EQ_EQ,
    FAT_ARROW,
    LT,
    LT_EQ,
    LT_LT,
    LT_LT_EQ,
    GT,
    GT_EQ,
    GT_GT,
    GT_GT_EQ,
    GT_GT_GT,
    GT_GT_GT_EQ,
    PLUS,
    PLUS_EQ,
    PLUS_PLUS,
    MINUS,
    MINUS_EQ,
    MINUS_MINUS,
    ARROW,
    STAR,
    STAR_EQ,
    SLASH,
    SLASH_EQ,
    PERCENT,
    PERCENT_EQ,
    AMP,
    AMP_EQ,
    AMP_AMP,
    PIPE,
    PIPE_EQ,
    PIPE_PIPE,
    CARET,
    CARET_EQ,

    ABSTRACT_KW,
    AS_KW,
    BASE_KW,
    BOOL_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CHECKED_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DECIMAL_KW,
    DEFAULT_KW,
    DELEGATE_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EVENT_KW,
    EXPLICIT_KW,
    EXTERN_KW,
    FALSE_KW,
    FINALLY_KW,
    FIXED_KW,
    FLOAT_KW,
    FOR_KW,
    FOREACH_KW,
    GOTO_KW,
    IF_KW,
    IMPLICIT_KW,
    IN_KW,
    INT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    IS_KW,
    LOCK_KW,
    LONG_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OBJECT_KW,
    OPERATOR_KW,
    OUT_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    REF_KW,
    RETURN_KW,
    SBYTE_KW,
    SEALED_KW,
    SHORT_KW,
    SIZEOF_KW,
    STACKALLOC_KW,
    STATIC_KW,
    STRING_KW,
    STRUCT_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    UINT_KW,
    ULONG_KW,
    UNCHECKED_KW,
    UNSAFE_KW,
    USHORT_KW,
    USING_KW,
    VIRTUAL_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    ADD_KW,
    ALIAS_KW,
    AND_KW,
    ASCENDING_KW,
    ASYNC_KW,
    AWAIT_KW,
    BY_KW,
    DESCENDING_KW,
    EQUALS_KW,
    FILE_KW,
    FROM_KW,
    GET_KW,
    GLOBAL_KW,
    GROUP_KW,
    INIT_KW,
    INTO_KW,
    JOIN_KW,
    LET_KW,
    MANAGED_KW,
    NOT_KW,
    ON_KW,
    OR_KW,
    ORDERBY_KW,
    PARTIAL_KW,
    RECORD_KW,
    REMOVE_KW,
    REQUIRED_KW,
    SCOPED_KW,
    SELECT_KW,
    SET_KW,
    UNMANAGED_KW,
    VAR_KW,
    WHEN_KW,
    WHERE_KW,
    WITH_KW,
    YIELD_KW,

    IDENT,
    NUMERIC_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,
    INTERPOLATED_STRING,
    RAW_STRING_LITERAL,

    WHITESPACE,
    END_OF_LINE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,
    PREPROCESSOR_DIRECTIVE,
    SKIPPED_TOKEN,

    UNKNOWN,
    EOF,

    // Names and types.
    IDENTIFIER_NAME,
    GENERIC_NAME,
    TYPE_ARGUMENT_LIST,
    OMITTED_TYPE_ARGUMENT,
    QUALIFIED_NAME,
    ALIAS_QUALIFIED_NAME,
    PREDEFINED_TYPE,
    ARRAY_TYPE,
    ARRAY_RANK_SPECIFIER,
    OMITTED_ARRAY_SIZE_EXPR,
    NULLABLE_TYPE,
    POINTER_TYPE,
    FUNCTION_POINTER_TYPE,
    FUNCTION_POINTER_CALLING_CONVENTION,
    FUNCTION_POINTER_UNMANAGED_CALLING_CONVENTION_LIST,
    FUNCTION_POINTER_UNMANAGED_CALLING_CONVENTION,
    FUNCTION_POINTER_PARAMETER_LIST,
    FUNCTION_POINTER_PARAMETER,
    TUPLE_TYPE,
    TUPLE_ELEMENT,
    REF_TYPE,
    SCOPED_TYPE,

    // Expressions.
    LITERAL_EXPR,
    PARENTHESIZED_EXPR,
    TUPLE_EXPR,
    ARGUMENT,
    NAME_COLON,
    BINARY_EXPR,
    ASSIGNMENT_EXPR,
    PREFIX_UNARY_EXPR,
    POSTFIX_UNARY_EXPR,
    CONDITIONAL_EXPR,
    CAST_EXPR,
    INVOCATION_EXPR,
    ARGUMENT_LIST,
    BRACKETED_ARGUMENT_LIST,
    ELEMENT_ACCESS_EXPR,
    MEMBER_ACCESS_EXPR,
    CONDITIONAL_ACCESS_EXPR,
    MEMBER_BINDING_EXPR,
    ELEMENT_BINDING_EXPR,
    THIS_EXPR,
    BASE_EXPR,
    TYPEOF_EXPR,
    SIZEOF_EXPR,
    DEFAULT_EXPR,
    CHECKED_EXPR,
    REF_EXPR,
    OBJECT_CREATION_EXPR,
    IMPLICIT_OBJECT_CREATION_EXPR,
    ARRAY_CREATION_EXPR,
    IMPLICIT_ARRAY_CREATION_EXPR,
    STACKALLOC_ARRAY_CREATION_EXPR,
    IMPLICIT_STACKALLOC_ARRAY_CREATION_EXPR,
    OBJECT_INITIALIZER_EXPR,
    COLLECTION_INITIALIZER_EXPR,
    ARRAY_INITIALIZER_EXPR,
    COMPLEX_ELEMENT_INITIALIZER_EXPR,
    WITH_INITIALIZER_EXPR,
    ANONYMOUS_OBJECT_CREATION_EXPR,
    ANONYMOUS_OBJECT_MEMBER_DECLARATOR,
    NAME_EQUALS,
    ANONYMOUS_METHOD_EXPR,
    SIMPLE_LAMBDA_EXPR,
    PAREN_LAMBDA_EXPR,
    PARAMETER_LIST,
    BRACKETED_PARAMETER_LIST,
    PARAMETER,
    EQUALS_VALUE_CLAUSE,
    DECLARATION_EXPR,
    SINGLE_VARIABLE_DESIGNATION,
    DISCARD_DESIGNATION,
    PARENTHESIZED_VARIABLE_DESIGNATION,
    IS_PATTERN_EXPR,
    SWITCH_EXPR,
    SWITCH_EXPR_ARM,
    WHEN_CLAUSE,
    THROW_EXPR,
    AWAIT_EXPR,
    RANGE_EXPR,
    WITH_EXPR,
    INTERPOLATED_STRING_EXPR,
    COLLECTION_EXPR,
    EXPRESSION_ELEMENT,
    SPREAD_ELEMENT,
    QUERY_EXPR,
    QUERY_BODY,
    FROM_CLAUSE,
    LET_CLAUSE,
    JOIN_CLAUSE,
    JOIN_INTO_CLAUSE,
    WHERE_CLAUSE,
    ORDER_BY_CLAUSE,
    ORDERING,
    SELECT_CLAUSE,
    GROUP_CLAUSE,
    QUERY_CONTINUATION,

    // Patterns.
    DISCARD_PATTERN,
    DECLARATION_PATTERN,
    VAR_PATTERN,
    CONSTANT_PATTERN,
    TYPE_PATTERN,
    RECURSIVE_PATTERN,
    POSITIONAL_PATTERN_CLAUSE,
    PROPERTY_PATTERN_CLAUSE,
    SUBPATTERN,
    EXPRESSION_COLON,
    PARENTHESIZED_PATTERN,
    RELATIONAL_PATTERN,
    UNARY_PATTERN,
    BINARY_PATTERN,
    LIST_PATTERN,
    SLICE_PATTERN,

    // Statements.
    BLOCK,
    LOCAL_DECLARATION_STMT,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    EXPRESSION_STMT,
    EMPTY_STMT,
    LABELED_STMT,
    GOTO_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    RETURN_STMT,
    THROW_STMT,
    YIELD_RETURN_STMT,
    YIELD_BREAK_STMT,
    WHILE_STMT,
    DO_STMT,
    FOR_STMT,
    FOREACH_STMT,
    FOREACH_VARIABLE_STMT,
    USING_STMT,
    FIXED_STMT,
    CHECKED_STMT,
    UNSAFE_STMT,
    LOCK_STMT,
    IF_STMT,
    ELSE_CLAUSE,
    SWITCH_STMT,
    SWITCH_SECTION,
    CASE_SWITCH_LABEL,
    CASE_PATTERN_SWITCH_LABEL,
    DEFAULT_SWITCH_LABEL,
    TRY_STMT,
    CATCH_CLAUSE,
    CATCH_DECLARATION,
    CATCH_FILTER_CLAUSE,
    FINALLY_CLAUSE,
    LOCAL_FUNCTION_STMT,

    // Declarations.
    COMPILATION_UNIT,
    GLOBAL_STATEMENT,
    EXTERN_ALIAS_DIRECTIVE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    FILE_SCOPED_NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    INTERFACE_DECL,
    RECORD_DECL,
    RECORD_STRUCT_DECL,
    ENUM_DECL,
    ENUM_MEMBER_DECL,
    DELEGATE_DECL,
    BASE_LIST,
    SIMPLE_BASE_TYPE,
    PRIMARY_CONSTRUCTOR_BASE_TYPE,
    TYPE_PARAMETER_LIST,
    TYPE_PARAMETER,
    TYPE_PARAMETER_CONSTRAINT_CLAUSE,
    TYPE_CONSTRAINT,
    CLASS_CONSTRAINT,
    STRUCT_CONSTRAINT,
    CONSTRUCTOR_CONSTRAINT,
    DEFAULT_CONSTRAINT,
    FIELD_DECL,
    EVENT_FIELD_DECL,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    CONSTRUCTOR_INITIALIZER,
    DESTRUCTOR_DECL,
    PROPERTY_DECL,
    INDEXER_DECL,
    EVENT_DECL,
    OPERATOR_DECL,
    CONVERSION_OPERATOR_DECL,
    EXPLICIT_INTERFACE_SPECIFIER,
    ACCESSOR_LIST,
    ACCESSOR_DECL,
    ARROW_EXPR_CLAUSE,
    ATTRIBUTE_LIST,
    ATTRIBUTE_TARGET_SPECIFIER,
    ATTRIBUTE,
    ATTRIBUTE_ARGUMENT_LIST,
    ATTRIBUTE_ARGUMENT,
    INCOMPLETE_MEMBER,

    ERROR,
    FRAGMENT,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            WHITESPACE
                | END_OF_LINE
                | LINE_COMMENT
                | BLOCK_COMMENT
                | DOC_COMMENT
                | PREPROCESSOR_DIRECTIVE
                | SKIPPED_TOKEN
        )
    }

    pub const fn is_punctuation(self) -> bool {
        self as u16 <= CARET_EQ as u16
    }

    /// Reserved keywords, never usable as identifiers without `@`.
    pub const fn is_keyword(self) -> bool {
        self as u16 >= ABSTRACT_KW as u16 && self as u16 <= WHILE_KW as u16
    }

    /// Keywords that are identifiers everywhere except in specific positions.
    pub const fn is_contextual_keyword(self) -> bool {
        self as u16 >= ADD_KW as u16 && self as u16 <= YIELD_KW as u16
    }

    pub const fn is_token(self) -> bool {
        self as u16 <= EOF as u16
    }

    pub const fn is_node(self) -> bool {
        !self.is_token() && !matches!(self, TOMBSTONE)
    }

    pub const fn is_predefined_type(self) -> bool {
        matches!(
            self,
            BOOL_KW
                | BYTE_KW
                | CHAR_KW
                | DECIMAL_KW
                | DOUBLE_KW
                | FLOAT_KW
                | INT_KW
                | LONG_KW
                | OBJECT_KW
                | SBYTE_KW
                | SHORT_KW
                | STRING_KW
                | UINT_KW
                | ULONG_KW
                | USHORT_KW
                | VOID_KW
        )
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            NUMERIC_LITERAL
                | CHAR_LITERAL
                | STRING_LITERAL
                | RAW_STRING_LITERAL
                | TRUE_KW
                | FALSE_KW
                | NULL_KW
        )
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "abstract" => ABSTRACT_KW,
            "as" => AS_KW,
            "base" => BASE_KW,
            "bool" => BOOL_KW,
            "break" => BREAK_KW,
            "byte" => BYTE_KW,
            "case" => CASE_KW,
            "catch" => CATCH_KW,
            "char" => CHAR_KW,
            "checked" => CHECKED_KW,
            "class" => CLASS_KW,
            "const" => CONST_KW,
            "continue" => CONTINUE_KW,
            "decimal" => DECIMAL_KW,
            "default" => DEFAULT_KW,
            "delegate" => DELEGATE_KW,
            "do" => DO_KW,
            "double" => DOUBLE_KW,
            "else" => ELSE_KW,
            "enum" => ENUM_KW,
            "event" => EVENT_KW,
            "explicit" => EXPLICIT_KW,
            "extern" => EXTERN_KW,
            "false" => FALSE_KW,
            "finally" => FINALLY_KW,
            "fixed" => FIXED_KW,
            "float" => FLOAT_KW,
            "for" => FOR_KW,
            "foreach" => FOREACH_KW,
            "goto" => GOTO_KW,
            "if" => IF_KW,
            "implicit" => IMPLICIT_KW,
            "in" => IN_KW,
            "int" => INT_KW,
            "interface" => INTERFACE_KW,
            "internal" => INTERNAL_KW,
            "is" => IS_KW,
            "lock" => LOCK_KW,
            "long" => LONG_KW,
            "namespace" => NAMESPACE_KW,
            "new" => NEW_KW,
            "null" => NULL_KW,
            "object" => OBJECT_KW,
            "operator" => OPERATOR_KW,
            "out" => OUT_KW,
            "override" => OVERRIDE_KW,
            "params" => PARAMS_KW,
            "private" => PRIVATE_KW,
            "protected" => PROTECTED_KW,
            "public" => PUBLIC_KW,
            "readonly" => READONLY_KW,
            "ref" => REF_KW,
            "return" => RETURN_KW,
            "sbyte" => SBYTE_KW,
            "sealed" => SEALED_KW,
            "short" => SHORT_KW,
            "sizeof" => SIZEOF_KW,
            "stackalloc" => STACKALLOC_KW,
            "static" => STATIC_KW,
            "string" => STRING_KW,
            "struct" => STRUCT_KW,
            "switch" => SWITCH_KW,
            "this" => THIS_KW,
            "throw" => THROW_KW,
            "true" => TRUE_KW,
            "try" => TRY_KW,
            "typeof" => TYPEOF_KW,
            "uint" => UINT_KW,
            "ulong" => ULONG_KW,
            "unchecked" => UNCHECKED_KW,
            "unsafe" => UNSAFE_KW,
            "ushort" => USHORT_KW,
            "using" => USING_KW,
            "virtual" => VIRTUAL_KW,
            "void" => VOID_KW,
            "volatile" => VOLATILE_KW,
            "while" => WHILE_KW,
            _ => return None,
        };
        Some(kind)
    }

    pub fn from_contextual_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "add" => ADD_KW,
            "alias" => ALIAS_KW,
            "and" => AND_KW,
            "ascending" => ASCENDING_KW,
            "async" => ASYNC_KW,
            "await" => AWAIT_KW,
            "by" => BY_KW,
            "descending" => DESCENDING_KW,
            "equals" => EQUALS_KW,
            "file" => FILE_KW,
            "from" => FROM_KW,
            "get" => GET_KW,
            "global" => GLOBAL_KW,
            "group" => GROUP_KW,
            "init" => INIT_KW,
            "into" => INTO_KW,
            "join" => JOIN_KW,
            "let" => LET_KW,
            "managed" => MANAGED_KW,
            "not" => NOT_KW,
            "on" => ON_KW,
            "or" => OR_KW,
            "orderby" => ORDERBY_KW,
            "partial" => PARTIAL_KW,
            "record" => RECORD_KW,
            "remove" => REMOVE_KW,
            "required" => REQUIRED_KW,
            "scoped" => SCOPED_KW,
            "select" => SELECT_KW,
            "set" => SET_KW,
            "unmanaged" => UNMANAGED_KW,
            "var" => VAR_KW,
            "when" => WHEN_KW,
            "where" => WHERE_KW,
            "with" => WITH_KW,
            "yield" => YIELD_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Fixed source text of punctuation and keyword kinds.
    pub const fn text(self) -> Option<&'static str> {
        let text = match self {
            L_BRACE => "{",
            R_BRACE => "}",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACK => "[",
            R_BRACK => "]",
            SEMICOLON => ";",
            COMMA => ",",
            DOT => ".",
            DOT_DOT => "..",
            COLON => ":",
            COLON_COLON => "::",
            QUESTION => "?",
            QUESTION_QUESTION => "??",
            QUESTION_QUESTION_EQ => "??=",
            TILDE => "~",
            BANG => "!",
            BANG_EQ => "!=",
            EQ => "=",
            EQ_EQ => "==",
            FAT_ARROW => "=>",
            LT => "<",
            LT_EQ => "<=",
            LT_LT => "<<",
            LT_LT_EQ => "<<=",
            GT => ">",
            GT_EQ => ">=",
            GT_GT => ">>",
            GT_GT_EQ => ">>=",
            GT_GT_GT => ">>>",
            GT_GT_GT_EQ => ">>>=",
            PLUS => "+",
            PLUS_EQ => "+=",
            PLUS_PLUS => "++",
            MINUS => "-",
            MINUS_EQ => "-=",
            MINUS_MINUS => "--",
            ARROW => "->",
            STAR => "*",
            STAR_EQ => "*=",
            SLASH => "/",
            SLASH_EQ => "/=",
            PERCENT => "%",
            PERCENT_EQ => "%=",
            AMP => "&",
            AMP_EQ => "&=",
            AMP_AMP => "&&",
            PIPE => "|",
            PIPE_EQ => "|=",
            PIPE_PIPE => "||",
            CARET => "^",
            CARET_EQ => "^=",
            ABSTRACT_KW => "abstract",
            AS_KW => "as",
            BASE_KW => "base",
            BOOL_KW => "bool",
            BREAK_KW => "break",
            BYTE_KW => "byte",
            CASE_KW => "case",
            CATCH_KW => "catch",
            CHAR_KW => "char",
            CHECKED_KW => "checked",
            CLASS_KW => "class",
            CONST_KW => "const",
            CONTINUE_KW => "continue",
            DECIMAL_KW => "decimal",
            DEFAULT_KW => "default",
            DELEGATE_KW => "delegate",
            DO_KW => "do",
            DOUBLE_KW => "double",
            ELSE_KW => "else",
            ENUM_KW => "enum",
            EVENT_KW => "event",
            EXPLICIT_KW => "explicit",
            EXTERN_KW => "extern",
            FALSE_KW => "false",
            FINALLY_KW => "finally",
            FIXED_KW => "fixed",
            FLOAT_KW => "float",
            FOR_KW => "for",
            FOREACH_KW => "foreach",
            GOTO_KW => "goto",
            IF_KW => "if",
            IMPLICIT_KW => "implicit",
            IN_KW => "in",
            INT_KW => "int",
            INTERFACE_KW => "interface",
            INTERNAL_KW => "internal",
            IS_KW => "is",
            LOCK_KW => "lock",
            LONG_KW => "long",
            NAMESPACE_KW => "namespace",
            NEW_KW => "new",
            NULL_KW => "null",
            OBJECT_KW => "object",
            OPERATOR_KW => "operator",
            OUT_KW => "out",
            OVERRIDE_KW => "override",
            PARAMS_KW => "params",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            PUBLIC_KW => "public",
            READONLY_KW => "readonly",
            REF_KW => "ref",
            RETURN_KW => "return",
            SBYTE_KW => "sbyte",
            SEALED_KW => "sealed",
            SHORT_KW => "short",
            SIZEOF_KW => "sizeof",
            STACKALLOC_KW => "stackalloc",
            STATIC_KW => "static",
            STRING_KW => "string",
            STRUCT_KW => "struct",
            SWITCH_KW => "switch",
            THIS_KW => "this",
            THROW_KW => "throw",
            TRUE_KW => "true",
            TRY_KW => "try",
            TYPEOF_KW => "typeof",
            UINT_KW => "uint",
            ULONG_KW => "ulong",
            UNCHECKED_KW => "unchecked",
            UNSAFE_KW => "unsafe",
            USHORT_KW => "ushort",
            USING_KW => "using",
            VIRTUAL_KW => "virtual",
            VOID_KW => "void",
            VOLATILE_KW => "volatile",
            WHILE_KW => "while",
            ADD_KW => "add",
            ALIAS_KW => "alias",
            AND_KW => "and",
            ASCENDING_KW => "ascending",
            ASYNC_KW => "async",
            AWAIT_KW => "await",
            BY_KW => "by",
            DESCENDING_KW => "descending",
            EQUALS_KW => "equals",
            FILE_KW => "file",
            FROM_KW => "from",
            GET_KW => "get",
            GLOBAL_KW => "global",
            GROUP_KW => "group",
            INIT_KW => "init",
            INTO_KW => "into",
            JOIN_KW => "join",
            LET_KW => "let",
            MANAGED_KW => "managed",
            NOT_KW => "not",
            ON_KW => "on",
            OR_KW => "or",
            ORDERBY_KW => "orderby",
            PARTIAL_KW => "partial",
            RECORD_KW => "record",
            REMOVE_KW => "remove",
            REQUIRED_KW => "required",
            SCOPED_KW => "scoped",
            SELECT_KW => "select",
            SET_KW => "set",
            UNMANAGED_KW => "unmanaged",
            VAR_KW => "var",
            WHEN_KW => "when",
            WHERE_KW => "where",
            WITH_KW => "with",
            YIELD_KW => "yield",
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_ranges() {
        assert!(ABSTRACT_KW.is_keyword());
        assert!(WHILE_KW.is_keyword());
        assert!(!ADD_KW.is_keyword());
        assert!(VAR_KW.is_contextual_keyword());
        assert!(!IDENT.is_contextual_keyword());
        assert!(CARET_EQ.is_punctuation());
        assert!(!ABSTRACT_KW.is_punctuation());
        assert!(EOF.is_token());
        assert!(IDENTIFIER_NAME.is_node());
        assert!(!TOMBSTONE.is_node());
    }

    #[test]
    fn keyword_text_round_trips() {
        for text in ["int", "stackalloc", "while", "abstract"] {
            let kind = SyntaxKind::from_keyword(text).unwrap();
            assert_eq!(kind.text(), Some(text));
        }
        for text in ["var", "await", "scoped", "yield"] {
            let kind = SyntaxKind::from_contextual_keyword(text).unwrap();
            assert_eq!(kind.text(), Some(text));
            assert_eq!(SyntaxKind::from_keyword(text), None);
        }
    }

    #[test]
    fn reserved_keyword_count() {
        let count = (ABSTRACT_KW as u16..=WHILE_KW as u16).count();
        assert_eq!(count, 77);
    }
}
