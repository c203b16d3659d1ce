//! Benchmarks for specifier-line parsing.
//!
//! Parsing runs once per dependency line, so per-call cost should stay well
//! under a microsecond for typical specifiers.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pyreq_core::specifier;
use std::hint::black_box;

/// Benchmark representative specifier shapes.
fn bench_specifier_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("specifier_parsing");

    let specifiers = [
        ("bare_name", "requests"),
        ("simple_constraint", "requests>=2.28.0"),
        ("with_extras", "flask[async]>=3.0.0"),
        ("complex_constraints", "django>=4.0,<5.0,!=4.0.1"),
        ("with_markers", "numpy>=1.24; python_version>='3.9'"),
        (
            "git_reference",
            "mylib @ git+https://github.com/user/mylib.git@main",
        ),
        ("direct_url", "package @ https://example.com/package.whl"),
        ("bare_vcs_url", "git+ssh://git@github.com/user/mylib.git@v2"),
    ];

    for (name, line) in specifiers {
        group.bench_with_input(BenchmarkId::from_parameter(name), &line, |b, line| {
            b.iter(|| {
                let _ = specifier::parse(black_box(line));
            })
        });
    }

    group.finish();
}

/// Benchmark the constraint grammar used for manifest version strings.
fn bench_constraint_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraint_parsing");

    group.bench_function("single_pair", |b| {
        b.iter(|| specifier::parse_constraints(black_box("==1.0")))
    });

    group.bench_function("conjunction", |b| {
        b.iter(|| specifier::parse_constraints(black_box(">=2.25, <3.0, !=2.28.1")))
    });

    group.finish();
}

criterion_group!(benches, bench_specifier_parsing, bench_constraint_parsing);
criterion_main!(benches);
