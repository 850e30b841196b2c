//! Parser diagnostics: a closed set of error codes, formatted messages and
//! snippet rendering.

use std::fmt;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

mod code;

pub use code::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[salsa::accumulator]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    args: Vec<String>,
    range: TextRange,
    severity: Severity,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, range: TextRange) -> Self {
        Self { code, args: Vec::new(), range, severity: code.default_severity() }
    }

    pub fn with_args<I, S>(code: ErrorCode, range: TextRange, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code,
            args: args.into_iter().map(Into::into).collect(),
            range,
            severity: code.default_severity(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Moves the diagnostic by `offset`, used when a tree fragment is embedded
    /// into a larger buffer.
    pub fn shifted(mut self, offset: TextSize) -> Self {
        self.range += offset;
        self
    }

    /// Substitutes `{N}` placeholders of the code's template with the
    /// diagnostic's arguments.
    pub fn message(&self) -> String {
        let template = self.code.template();
        let mut message = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            message.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let index = after
                .find('}')
                .and_then(|end| after[..end].parse::<usize>().ok().map(|index| (index, end)));

            match index {
                Some((index, end)) => {
                    message.push_str(self.args.get(index).map_or("", String::as_str));
                    rest = &after[end + 1..];
                }
                None => {
                    message.push('{');
                    rest = after;
                }
            }
        }

        message.push_str(rest);
        message
    }

    pub fn render(&self, renderer: &Renderer, path: &str, text: &str) -> String {
        let level = match self.severity {
            Severity::Warning => Level::Warning,
            Severity::Error => Level::Error,
        };
        let title = format!("{}: {}", self.code, self.message());
        let message = level.title(&title).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message).to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity} {}@{:?}: {}", self.code, self.range, self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn formats_arguments() {
        let diagnostic = Diagnostic::with_args(ErrorCode::SyntaxError, range(3, 4), ["=>"]);
        assert_eq!(diagnostic.message(), "Syntax error, '=>' expected");
        assert_eq!(diagnostic.to_string(), "error CS1003@3..4: Syntax error, '=>' expected");
    }

    #[test]
    fn missing_argument_renders_empty() {
        let diagnostic = Diagnostic::new(ErrorCode::InvalidExprTerm, range(0, 1));
        assert_eq!(diagnostic.message(), "Invalid expression term ''");
    }

    #[test]
    fn warnings_keep_their_severity() {
        let diagnostic = Diagnostic::new(ErrorCode::PossibleMistakenNullStatement, range(0, 1));
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert!(!diagnostic.is_error());
    }

    #[test]
    fn shifting_moves_the_range() {
        let diagnostic = Diagnostic::new(ErrorCode::SemicolonExpected, range(1, 1));
        assert_eq!(diagnostic.shifted(10.into()).range(), range(11, 11));
    }

    #[test]
    fn renders_snippet() {
        let text = "var x = 1\n";
        let diagnostic = Diagnostic::new(ErrorCode::SemicolonExpected, range(9, 9));
        let rendered = diagnostic.render(&Renderer::plain(), "main.cs", text);
        assert!(rendered.contains("CS1002: ; expected"), "{rendered}");
        assert!(rendered.contains("main.cs"), "{rendered}");
    }
}
