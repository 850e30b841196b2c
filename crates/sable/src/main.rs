use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use sable_db::{File, check_file, parse_file};
use sable_errors::{Diagnostic, Renderer};
use sable_parse::{LanguageVersion, Parse, ParseOptions, SourceKind};
use salsa::DatabaseImpl;
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Error-tolerant C# parser")]
enum Options {
    /// Parse a file and report its diagnostics.
    Parse(ParseArgs),
}

#[derive(clap::Args)]
struct ParseArgs {
    path: Utf8PathBuf,

    /// What the file contains.
    #[arg(long, value_enum, default_value_t = Kind::Unit)]
    kind: Kind,

    /// Language version gating newer syntax, e.g. `7.3`, `10` or `latest`.
    #[arg(long, default_value_t = LanguageVersion::LATEST)]
    lang_version: LanguageVersion,

    /// Treat the file as a script, allowing top-level statements.
    #[arg(long)]
    script: bool,

    /// Print the syntax tree.
    #[arg(long)]
    tree: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Off)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Unit,
    Statement,
    Expression,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let kind = if self.script { SourceKind::Script } else { SourceKind::Regular };
        ParseOptions::default().with_language_version(self.lang_version).with_kind(kind)
    }
}

fn main() -> anyhow::Result<()> {
    match Options::parse() {
        Options::Parse(args) => {
            SimpleLogger::new()
                .with_level(args.log_level.to_level_filter())
                .init()
                .context("failed to install the logger")?;

            let text = std::fs::read_to_string(&args.path)
                .with_context(|| format!("failed to read `{}`", args.path))?;

            let has_errors = match args.kind {
                Kind::Unit => check_unit(&args, text),
                Kind::Statement => {
                    report(&args, &text, &sable_parse::parse_statement(&text, &args.options()))
                }
                Kind::Expression => {
                    report(&args, &text, &sable_parse::parse_expression(&text, &args.options()))
                }
            };

            if has_errors {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Goes through the database so compilation units share the incremental
/// pipeline with other tools.
fn check_unit(args: &ParseArgs, text: String) -> bool {
    let db = DatabaseImpl::default();
    let file = File::new(&db, args.path.clone(), text, args.options());

    if args.tree {
        print!("{}", parse_file(&db, file).syntax().debug_dump());
    }

    let renderer = Renderer::styled();
    let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, file.path(&db).as_str(), file.text(&db)));
    }

    diagnostics.iter().any(|diagnostic| diagnostic.is_error())
}

fn report(args: &ParseArgs, text: &str, parse: &Parse) -> bool {
    if args.tree {
        print!("{}", parse.syntax().debug_dump());
    }

    let renderer = Renderer::styled();
    for diagnostic in parse.errors() {
        eprintln!("{}", diagnostic.render(&renderer, args.path.as_str(), text));
    }

    parse.has_errors()
}
