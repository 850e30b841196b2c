use std::fmt;
use std::str::FromStr;

use text_size::TextSize;

/// Language versions, oldest first. Ordering follows release order so a
/// feature check is a plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageVersion {
    CSharp1,
    CSharp2,
    CSharp3,
    CSharp4,
    CSharp5,
    CSharp6,
    CSharp7,
    CSharp7_1,
    CSharp7_2,
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    CSharp12,
    CSharp13,
    Preview,
}

impl LanguageVersion {
    pub const LATEST: Self = Self::CSharp13;

    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::CSharp1, "1"),
        (Self::CSharp2, "2"),
        (Self::CSharp3, "3"),
        (Self::CSharp4, "4"),
        (Self::CSharp5, "5"),
        (Self::CSharp6, "6"),
        (Self::CSharp7, "7.0"),
        (Self::CSharp7_1, "7.1"),
        (Self::CSharp7_2, "7.2"),
        (Self::CSharp7_3, "7.3"),
        (Self::CSharp8, "8.0"),
        (Self::CSharp9, "9.0"),
        (Self::CSharp10, "10.0"),
        (Self::CSharp11, "11.0"),
        (Self::CSharp12, "12.0"),
        (Self::CSharp13, "13.0"),
        (Self::Preview, "preview"),
    ];

    pub fn as_str(self) -> &'static str {
        Self::NAMES.iter().find(|(version, _)| *version == self).map_or("preview", |(_, name)| name)
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguageVersion(pub String);

impl fmt::Display for UnknownLanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language version `{}`", self.0)
    }
}

impl std::error::Error for UnknownLanguageVersion {}

impl FromStr for LanguageVersion {
    type Err = UnknownLanguageVersion;

    /// Accepts `7`, `7.0`, `7.3`, `10`, `latest`, `default` and `preview`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "latest" | "default" | "latestmajor" => return Ok(Self::LATEST),
            "preview" => return Ok(Self::Preview),
            _ => {}
        }

        let normalized = match s.strip_suffix(".0") {
            Some(major) if major.parse::<u8>().is_ok_and(|major| major >= 7) => s,
            Some(major) => major,
            None if s.parse::<u8>().is_ok_and(|major| major >= 7) => return format!("{s}.0").parse(),
            None => s,
        };

        Self::NAMES
            .iter()
            .find(|(_, name)| *name == normalized)
            .map(|(version, _)| *version)
            .ok_or_else(|| UnknownLanguageVersion(s.to_owned()))
    }
}

/// Whether the text is a regular source file or a script. Scripts accept
/// top-level statements regardless of the language version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    Regular,
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub language_version: LanguageVersion,
    pub kind: SourceKind,
    /// Byte offset where parsing starts; ranges stay relative to the whole
    /// text.
    pub offset: TextSize,
}

impl ParseOptions {
    pub fn with_language_version(mut self, language_version: LanguageVersion) -> Self {
        self.language_version = language_version;
        self
    }

    pub fn with_kind(mut self, kind: SourceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_offset(mut self, offset: impl Into<TextSize>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn is_available(&self, feature: Feature) -> bool {
        self.language_version >= feature.required_version()
    }
}

macro_rules! features {
    ($($name:ident => $text:literal, $version:ident;)*) => {
        /// Syntax gated on a minimum language version.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Feature {
            $($name,)*
        }

        impl Feature {
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => $text,)*
                }
            }

            pub const fn required_version(self) -> LanguageVersion {
                match self {
                    $(Self::$name => LanguageVersion::$version,)*
                }
            }
        }
    };
}

features! {
    Tuples => "tuples", CSharp7;
    RefLocalsReturns => "byref locals and returns", CSharp7;
    PatternMatching => "pattern matching", CSharp7;
    Discards => "discards", CSharp7;
    LocalFunctions => "local functions", CSharp7;
    ThrowExpressions => "throw expression", CSharp7;
    OutVariables => "out variable declaration", CSharp7;
    DefaultLiteral => "default literal", CSharp7_1;
    RecursivePatterns => "recursive patterns", CSharp8;
    SwitchExpressions => "switch expression", CSharp8;
    NullableReferenceTypes => "nullable reference types", CSharp8;
    UsingDeclarations => "using declarations", CSharp8;
    StaticLocalFunctions => "static local functions", CSharp8;
    Ranges => "index operator", CSharp8;
    CoalesceAssignment => "coalescing assignment", CSharp8;
    FunctionPointers => "function pointers", CSharp9;
    StaticAnonymousFunctions => "static anonymous function", CSharp9;
    Records => "records", CSharp9;
    TargetTypedNew => "target-typed object creation", CSharp9;
    RelationalPatterns => "relational pattern", CSharp9;
    LogicalPatterns => "and, or, not patterns", CSharp9;
    TypePatterns => "type pattern", CSharp9;
    InitOnlySetters => "init-only setters", CSharp9;
    TopLevelStatements => "top-level statements", CSharp9;
    LambdaReturnTypes => "lambda return type", CSharp10;
    LambdaAttributes => "lambda attributes", CSharp10;
    FileScopedNamespaces => "file-scoped namespace", CSharp10;
    RecordStructs => "record structs", CSharp10;
    ExtendedPropertyPatterns => "extended property patterns", CSharp10;
    ListPatterns => "list pattern", CSharp11;
    RawStringLiterals => "raw string literals", CSharp11;
    RequiredMembers => "required members", CSharp11;
    ScopedRef => "ref fields", CSharp11;
    CollectionExpressions => "collection expressions", CSharp12;
    PrimaryConstructors => "primary constructors", CSharp12;
    LambdaOptionalParameters => "lambda optional parameters", CSharp12;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_spellings() {
        assert_eq!("7".parse(), Ok(LanguageVersion::CSharp7));
        assert_eq!("7.0".parse(), Ok(LanguageVersion::CSharp7));
        assert_eq!("7.3".parse(), Ok(LanguageVersion::CSharp7_3));
        assert_eq!("6".parse(), Ok(LanguageVersion::CSharp6));
        assert_eq!("10".parse(), Ok(LanguageVersion::CSharp10));
        assert_eq!("latest".parse(), Ok(LanguageVersion::LATEST));
        assert_eq!("Preview".parse(), Ok(LanguageVersion::Preview));
        assert!("7.9".parse::<LanguageVersion>().is_err());
    }

    #[test]
    fn features_compare_against_version() {
        let options = ParseOptions::default().with_language_version(LanguageVersion::CSharp7_3);
        assert!(options.is_available(Feature::Tuples));
        assert!(!options.is_available(Feature::SwitchExpressions));
        assert_eq!(Feature::ListPatterns.required_version().to_string(), "11.0");
    }
}
