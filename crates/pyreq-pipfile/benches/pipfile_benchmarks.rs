//! Benchmarks for Pipfile manifest parsing.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Small manifest with both dependency sections.
const SMALL_PIPFILE: &str = r#"
[[source]]
name = "pypi"
url = "https://pypi.org/simple"
verify_ssl = true

[packages]
requests = ">=2.25"
flask = { version = ">=3.0", extras = ["async"] }
local = { path = "../local-package" }

[dev-packages]
pytest = "*"
mypy = ">=1.0"

[requires]
python_version = "3.11"
"#;

/// Manifest with many plain entries.
fn generate_large_pipfile() -> String {
    let mut content = String::from("[packages]\n");
    for i in 0..100 {
        content.push_str(&format!("package-{i} = \">={}.0\"\n", i % 10));
    }
    content.push_str("\n[dev-packages]\n");
    for i in 0..40 {
        content.push_str(&format!("dev-package-{i} = \"*\"\n"));
    }
    content
}

fn bench_pipfile_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipfile_parsing");

    group.bench_function("small_manifest", |b| {
        b.iter(|| pyreq_pipfile::parse(black_box(SMALL_PIPFILE)))
    });

    let large = generate_large_pipfile();
    group.bench_function("large_manifest_140_deps", |b| {
        b.iter(|| pyreq_pipfile::parse(black_box(&large)))
    });

    group.finish();
}

criterion_group!(benches, bench_pipfile_parsing);
criterion_main!(benches);
