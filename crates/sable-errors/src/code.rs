use std::fmt;

use crate::Severity;

macro_rules! error_codes {
    ($($name:ident = $number:literal => $template:literal,)*) => {
        /// Every diagnostic the tokenizer and parser can report.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($name,)*
        }

        impl ErrorCode {
            pub const ALL: &'static [Self] = &[$(Self::$name,)*];

            pub const fn number(self) -> u16 {
                match self {
                    $(Self::$name => $number,)*
                }
            }

            pub const fn template(self) -> &'static str {
                match self {
                    $(Self::$name => $template,)*
                }
            }
        }
    };
}

error_codes! {
    // Lexical.
    UnexpectedCharacter = 1056 => "Unexpected character '{0}'",
    NewlineInConstant = 1010 => "Newline in constant",
    UnterminatedString = 1039 => "Unterminated string literal",
    UnterminatedComment = 1035 => "End-of-file found, '*/' expected",
    EmptyCharLiteral = 1011 => "Empty character literal",
    TooManyCharsInCharLiteral = 1012 => "Too many characters in character literal",
    InvalidNumber = 1013 => "Invalid number",
    UnterminatedRawString = 9002 => "Unterminated raw string literal",

    // Expected token missing.
    IdentifierExpected = 1001 => "Identifier expected",
    IdentifierExpectedKeyword = 1041 => "Identifier expected; '{0}' is a keyword",
    SemicolonExpected = 1002 => "; expected",
    SyntaxError = 1003 => "Syntax error, '{0}' expected",
    CloseParenExpected = 1026 => ") expected",
    LbraceExpected = 1514 => "{ expected",
    RbraceExpected = 1513 => "} expected",
    ExpressionExpected = 1733 => "Expected expression",
    TypeExpected = 1031 => "Type expected",
    ValueExpected = 443 => "Syntax error; value expected",
    ExpectedCatchOrFinally = 1524 => "Expected catch or finally",
    NewRequiresArgs = 1526 => "A new expression requires an argument list or (), [], or {} after type",
    StackallocRequiresBrackets = 1575 => "A stackalloc expression requires [] after type",
    OverloadableOperatorExpected = 1037 => "Overloadable operator expected",
    AccessorExpected = 1014 => "A get or set accessor expected",

    // Unexpected tokens.
    InvalidExprTerm = 1525 => "Invalid expression term '{0}'",
    UnexpectedToken = 1073 => "Unexpected token '{0}'",
    InvalidMemberDecl = 1519 => "Invalid token '{0}' in a member declaration",
    EofExpected = 1022 => "Type or namespace definition, or end-of-file expected",
    NamespaceUnexpected = 116 => "A namespace cannot directly contain members such as fields, methods or statements",
    ElseCannotStartStatement = 8641 => "'else' cannot start a statement.",
    UsingAfterElements = 1529 => "A using clause must precede all other elements defined in the namespace except extern alias declarations",

    // Context errors.
    BadModifier = 106 => "The modifier '{0}' is not valid for this item",
    DuplicateModifier = 1004 => "Duplicate '{0}' modifier",
    UsingDeclarationModifiers = 9229 => "Modifiers cannot be placed on using declarations",
    BadCaseInSwitchArm = 9134 => "A switch expression arm does not begin with a 'case' keyword.",
    DefaultPattern = 8505 => "A default literal 'default' is not valid as a pattern. Use another literal (e.g. '0' or 'null') as appropriate. To match everything, use a discard pattern '_'.",
    TupleTooFewElements = 8124 => "Tuple must contain at least two elements.",
    BadEmbeddedStatement = 1023 => "Embedded statement cannot be a declaration or labeled statement",
    PossibleMistakenNullStatement = 642 => "Possible mistaken empty statement",
    ExpressionTooComplex = 8078 => "An expression is too long or complex to compile",
    FeatureNotAvailable = 8107 => "Feature '{0}' is not available in C# {1}. Please use language version {2} or greater.",
}

impl ErrorCode {
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::PossibleMistakenNullStatement => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CS{:04}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_unique() {
        let mut numbers = ErrorCode::ALL.iter().map(|code| code.number()).collect::<Vec<_>>();
        numbers.sort_unstable();
        let len = numbers.len();
        numbers.dedup();
        assert_eq!(len, numbers.len());
    }

    #[test]
    fn display_pads_code() {
        assert_eq!(ErrorCode::BadModifier.to_string(), "CS0106");
        assert_eq!(ErrorCode::SyntaxError.to_string(), "CS1003");
    }
}
