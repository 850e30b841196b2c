use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = "
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
class C { void M() { if (a >= b && c != d) { x += 1; } else { y ??= z?.w; } } }
";

static LITERALS: &str = r#"
var a = 0x1F_FFu; var b = 1.5e-3f; var c = 'q'; var d = "text\n"; var e = @"verbatim ""quoted""";
var a = 0x1F_FFu; var b = 1.5e-3f; var c = 'q'; var d = "text\n"; var e = @"verbatim ""quoted""";
var a = 0x1F_FFu; var b = 1.5e-3f; var c = 'q'; var d = "text\n"; var e = @"verbatim ""quoted""";
var a = 0x1F_FFu; var b = 1.5e-3f; var c = 'q'; var d = "text\n"; var e = @"verbatim ""quoted""";
"#;

static TRIVIA: &str = "
// line comment
/* block
   comment */
#region tokens
    int /* inline */ x; // trailing
#endregion
// line comment
/* block
   comment */
#region tokens
    int /* inline */ x; // trailing
#endregion
";

static CANDIDATES: [(&str, &str); 3] =
    [("keywords_operators_and_punctuators", SOURCE), ("literals", LITERALS), ("trivia", TRIVIA)];

fn iterate(s: &str) {
    use sable_tokenizer::{SyntaxKind, Tokenizer};

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();

        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
