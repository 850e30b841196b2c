//! Error-tolerant parser producing full-fidelity syntax trees.
//!
//! Every entry point returns a [`Parse`] for any input. Malformed text
//! yields missing and skipped tokens plus diagnostics, never a failure, and
//! the tree's text is always the input text.

use std::fmt::Write as _;

use sable_errors::Diagnostic;
use sable_yellow::{GreenNode, SyntaxKind, SyntaxNode, TextSize};

mod grammar;
mod lookahead;
mod options;
mod parser;
#[cfg(test)]
mod tests;

pub use options::{Feature, LanguageVersion, ParseOptions, SourceKind, UnknownLanguageVersion};

use crate::grammar::{exprs, items, skip_trailing, stmts, types};
use crate::parser::Parser;

/// The result of parsing: a green tree and the diagnostics found in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    offset: TextSize,
    errors: Vec<Diagnostic>,
}

impl Parse {
    /// Diagnostics are ordered by start; at the same start, the ones on
    /// missing tokens come before the ones on skipped and present tokens.
    fn new(green: GreenNode, offset: TextSize) -> Self {
        let root = SyntaxNode::new_root_at(&green, offset);
        let mut ranked = Vec::new();
        for token in root.tokens() {
            for skipped in token.skipped_tokens() {
                ranked.extend(skipped.diagnostics().iter().map(|diagnostic| (true, diagnostic)));
            }
            let present = !token.is_missing();
            ranked.extend(token.diagnostics().iter().map(|diagnostic| (present, diagnostic)));
        }
        ranked.sort_by_key(|&(present, diagnostic)| (diagnostic.range().start(), present));

        let errors = ranked.into_iter().map(|(_, diagnostic)| diagnostic.clone()).collect();
        Self { green, offset, errors }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        SyntaxNode::new_root_at(&self.green, self.offset)
    }

    /// Diagnostics in source order, warnings included.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Diagnostic::is_error)
    }

    /// The tree outline followed by one line per diagnostic.
    pub fn debug_tree(&self) -> String {
        let mut buf = self.syntax().debug_dump();
        if !self.errors.is_empty() {
            buf.push_str("errors:\n");
            for error in &self.errors {
                let _ = writeln!(buf, "  {error}");
            }
        }
        buf
    }
}

pub fn parse_compilation_unit(text: &str, options: &ParseOptions) -> Parse {
    log::debug!("parsing compilation unit ({} bytes)", text.len());
    let mut p = Parser::new(text, options);
    items::compilation_unit(&mut p);
    Parse::new(p.build_tree(), start(text, options))
}

pub fn parse_statement(text: &str, options: &ParseOptions) -> Parse {
    log::debug!("parsing statement ({} bytes)", text.len());
    fragment(text, options, |p| {
        stmts::statement(p);
    })
}

pub fn parse_expression(text: &str, options: &ParseOptions) -> Parse {
    log::debug!("parsing expression ({} bytes)", text.len());
    fragment(text, options, |p| {
        exprs::expr(p);
    })
}

pub fn parse_type_name(text: &str, options: &ParseOptions) -> Parse {
    log::debug!("parsing type name ({} bytes)", text.len());
    fragment(text, options, |p| {
        types::ty(p);
    })
}

pub fn parse_member_declaration(text: &str, options: &ParseOptions) -> Parse {
    log::debug!("parsing member declaration ({} bytes)", text.len());
    fragment(text, options, |p| {
        items::member_declaration(p);
    })
}

/// Runs `rule` once and wraps its node, the leftovers and `EOF` in a
/// `FRAGMENT` root.
fn fragment(text: &str, options: &ParseOptions, rule: impl FnOnce(&mut Parser<'_>)) -> Parse {
    let mut p = Parser::new(text, options);
    let m = p.start();
    rule(&mut p);
    skip_trailing(&mut p);
    p.finish_eof();
    m.complete(&mut p, SyntaxKind::FRAGMENT);
    Parse::new(p.build_tree(), start(text, options))
}

fn start(text: &str, options: &ParseOptions) -> TextSize {
    sable_tokenizer::start_offset(text, options.offset)
}
