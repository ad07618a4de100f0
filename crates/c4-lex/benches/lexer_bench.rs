//! Run with: `cargo bench --package c4-lex`

use c4_util::SymbolTable;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn token_count(source: &[u8]) -> usize {
    let mut symbols = SymbolTable::new();
    let mut lexer = c4_lex::Lexer::new(source, &mut symbols);
    let mut count = 0;
    loop {
        match lexer.advance() {
            c4_lex::Token::Eof => break,
            _ => count += 1,
        }
    }
    count
}

fn bench_small_program(c: &mut Criterion) {
    let source = b"int main() { int i; i = 0; while (i < 5) i = i + 1; return i; }";
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("while_loop", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_identifier_heavy(c: &mut Criterion) {
    let source = b"int a; int b; int c; int d; int e; int f; int g; int h;";
    let mut group = c.benchmark_group("lexer_identifiers");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many_globals", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

fn bench_string_literal(c: &mut Criterion) {
    let source = br#"int main() { printf("a fairly ordinary format string\n"); return 0; }"#;
    let mut group = c.benchmark_group("lexer_strings");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("printf_call", |b| b.iter(|| token_count(black_box(source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_small_program,
    bench_identifier_heavy,
    bench_string_literal
);
criterion_main!(benches);
