use sable_db::{Diagnostic, File, check_file, parse_file, position};
use sable_parse::{LanguageVersion, ParseOptions, SourceKind};
use salsa::{DatabaseImpl, Setter as _};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Expected {
    line: u32,
    message: String,
}

/// Collects `//~ ERROR msg` and `//~ WARNING msg` annotations, keyed by
/// one-based line.
fn expectations(fixture: &str) -> Vec<Expected> {
    let mut expected = Vec::new();

    for (idx, line) in fixture.lines().enumerate() {
        let Some((_, comment)) = line.split_once("//~") else {
            continue;
        };
        let comment = comment.trim();
        let message = comment
            .strip_prefix("ERROR")
            .or_else(|| comment.strip_prefix("WARNING"))
            .unwrap_or(comment)
            .trim();
        expected.push(Expected { line: idx as u32 + 1, message: message.to_owned() });
    }

    expected.sort();
    expected
}

fn actual(db: &DatabaseImpl, file: File) -> Vec<Expected> {
    let diagnostics = check_file::accumulated::<Diagnostic>(db, file);
    let mut actual = diagnostics
        .into_iter()
        .map(|diagnostic| Expected {
            line: position(db, file, diagnostic).line + 1,
            message: diagnostic.message(),
        })
        .collect::<Vec<_>>();
    actual.sort();
    actual
}

#[track_caller]
fn check(fixture: &str) {
    let db = DatabaseImpl::default();
    let file = File::new(&db, "check.cs".into(), fixture.to_owned(), ParseOptions::default());
    assert_eq!(actual(&db, file), expectations(fixture));
}

#[test]
fn clean_file_has_no_diagnostics() {
    check(
        r#"
using System;

namespace Demo;

public sealed class Greeter
{
    public string Greet(string name) => $"Hello, {name}";
}
"#,
    );
}

#[test]
fn diagnostics_land_on_their_lines() {
    check(
        r#"
class C
{
    void M(int x)
    {
        int y = 1 //~ ERROR ; expected
        if (x > y) ; //~ WARNING Possible mistaken empty statement
    }
}
"#,
    );
}

#[test]
fn edits_are_reparsed() {
    let mut db = DatabaseImpl::default();
    let file = File::new(&db, "edit.cs".into(), "class C {".to_owned(), ParseOptions::default());
    assert_eq!(actual(&db, file).len(), 1);

    file.set_text(&mut db).to("class C { }".to_owned());
    assert!(actual(&db, file).is_empty());
    assert!(!parse_file(&db, file).has_errors());
}

#[test]
fn options_are_an_input() {
    let mut db = DatabaseImpl::default();
    let options = ParseOptions::default().with_language_version(LanguageVersion::CSharp8);
    let file = File::new(&db, "script.csx".into(), "System.Console.WriteLine(1);".to_owned(), options);
    assert_eq!(actual(&db, file).len(), 1);

    let script = ParseOptions::default()
        .with_language_version(LanguageVersion::CSharp8)
        .with_kind(SourceKind::Script);
    file.set_options(&mut db).to(script);
    assert!(actual(&db, file).is_empty());
}
