use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use sable_parse::{ParseOptions, parse_compilation_unit};

static SIMPLE: &str = r#"
class Program
{
    static void Main(string[] args)
    {
        System.Console.WriteLine("Hello");
    }
}
"#;

static AMBIGUOUS: &str = r#"
namespace Bench;

public sealed class Ambiguity<T> where T : class, new()
{
    private (int, string)[] _pairs = new (int, string)[4];

    public int Run(T value, int a, int b)
    {
        F(G<A, B>(7));
        F(G < A, B > 7);
        var (x, y) = (a, b);
        (((x, y))z).Goo();
        int? n = a > b ? x : y;
        var c = (T)value;
        Func<int, int> f = (int q) => q * 2;
        var s = value is { } v && x is > 0 and < 10;
        return a switch { > 0 => x >> 1, _ => y << 2 };
    }

    public IEnumerable<int> Query(List<List<int>> source) =>
        from row in source
        from cell in row
        where cell > 0
        orderby cell descending
        select cell * 2;
}
"#;

fn benchmark_parser(c: &mut Criterion) {
    let options = ParseOptions::default();
    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, source) in [("Simple", SIMPLE), ("Ambiguous", AMBIGUOUS)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), &source, |b, &source| {
            b.iter(|| black_box(parse_compilation_unit(source, &options)));
        });
    }

    group.finish();
}

fn benchmark_reparse(c: &mut Criterion) {
    use salsa::Setter as _;

    let mut db = salsa::DatabaseImpl::new();
    let file = sable_db::File::new(&db, "Ambiguous".into(), AMBIGUOUS.to_owned(), ParseOptions::default());

    c.bench_function("reparse_after_edit", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let text = if flip { format!("{AMBIGUOUS} ") } else { AMBIGUOUS.to_owned() };
            file.set_text(&mut db).to(text);
            black_box(sable_db::parse_file(&db, file).has_errors());
        });
    });
}

criterion_group!(benches, benchmark_parser, benchmark_reparse);
criterion_main!(benches);
