//! Parser benchmarks: end-to-end compile (lex + parse + emit) over a few
//! representative programs.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use c4_par::{seed, Parser};
use c4_util::SymbolTable;

fn compile(source: &str) {
    let mut symbols = SymbolTable::new();
    seed(&mut symbols);
    let mut parser = Parser::new(source.as_bytes(), &mut symbols, 64 * 1024);
    parser.parse_program().expect("benchmark source must compile");
}

fn bench_arithmetic(c: &mut Criterion) {
    let source = "int main() { return 2 + 3 * 4 - 1; }";
    let mut group = c.benchmark_group("parser_arithmetic");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("expr", |b| b.iter(|| compile(black_box(source))));
    group.finish();
}

fn bench_control_flow(c: &mut Criterion) {
    let source = r#"
        int fib(int n) {
            if (n <= 1) return n;
            return fib(n - 1) + fib(n - 2);
        }
        int main() {
            int i;
            i = 0;
            while (i < 10) {
                printf("%d\n", fib(i));
                i = i + 1;
            }
            return 0;
        }
    "#;
    let mut group = c.benchmark_group("parser_control_flow");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("fib_loop", |b| b.iter(|| compile(black_box(source))));
    group.finish();
}

fn bench_globals_and_pointers(c: &mut Criterion) {
    let source = r#"
        enum { A, B, C };
        int total;
        int *accumulate(int *p, int n) {
            int i;
            i = 0;
            while (i < n) {
                total = total + *(p + i);
                i = i + 1;
            }
            return p;
        }
        int main() {
            int *a;
            a = malloc(32);
            accumulate(a, 4);
            return A + B + C;
        }
    "#;
    let mut group = c.benchmark_group("parser_globals_and_pointers");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("pointers", |b| b.iter(|| compile(black_box(source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_control_flow,
    bench_globals_and_pointers
);
criterion_main!(benches);
