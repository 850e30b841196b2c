//! Lossless, immutable syntax tree with attached trivia.
//!
//! Green nodes are reference-counted and position independent. Syntax
//! handles borrow them and carry offsets, so ranges are computed on the fly.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod green;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a green tree.
pub use builder::Builder;
pub use green::{GreenElement, GreenNode, GreenToken};
/// Primary syntax tree API types.
pub use syntax::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
