//! Incremental queries over source files.

use camino::Utf8PathBuf;
pub use line_index::{LineCol, LineIndex};
pub use sable_errors::Diagnostic;
use sable_parse::{Parse, ParseOptions};
use salsa::{Accumulator as _, Database};

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    #[returns(ref)]
    pub options: ParseOptions,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

/// Parses the whole file as a compilation unit.
#[salsa::tracked(returns(ref))]
pub fn parse_file(db: &dyn Database, file: File) -> Parse {
    log::debug!("parse_file({})", file.path(db));
    sable_parse::parse_compilation_unit(file.text(db), file.options(db))
}

/// Reports every diagnostic of the file's parse through the [`Diagnostic`]
/// accumulator.
#[salsa::tracked]
pub fn check_file(db: &dyn Database, file: File) {
    for diagnostic in parse_file(db, file).errors() {
        diagnostic.clone().accumulate(db);
    }
}

/// Zero-based line and column of `diagnostic`'s start.
pub fn position(db: &dyn Database, file: File, diagnostic: &Diagnostic) -> LineCol {
    file.line_index(db).line_col(diagnostic.range().start())
}
