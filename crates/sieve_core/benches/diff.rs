//! Benchmarks for diff indexing.
//!
//! Run with: cargo bench -p `sieve_core`

#![expect(clippy::expect_used, reason = "benchmarks use expect for setup code")]

use std::fmt::Write as _;
use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sieve_core::prelude::*;

/// Builds a diff touching `files` files with `hunks` hunks each.
fn synthetic_diff(files: usize, hunks: usize) -> String {
    let mut text = String::new();

    for f in 0..files {
        let path = format!("src/module_{f}/file.rs");
        let _ = writeln!(text, "diff --git a/{path} b/{path}");
        let _ = writeln!(text, "index 83db48f..bf269f4 100644");
        let _ = writeln!(text, "--- a/{path}");
        let _ = writeln!(text, "+++ b/{path}");

        for h in 0..hunks {
            let start = h * 40 + 1;
            let _ = writeln!(text, "@@ -{start},6 +{start},7 @@ fn item_{h}() {{");
            text.push_str("     let a = 1;\n     let b = 2;\n-    let c = 3;\n+    let c = 4;\n+    let d = 5;\n");
            text.push_str("     a + b\n }\n \n");
        }
    }

    text
}

fn bench_index_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_diff");

    for (name, files, hunks) in [("small", 5, 3), ("large", 200, 20)] {
        let diff = synthetic_diff(files, hunks);
        group.throughput(Throughput::Bytes(diff.len() as u64));

        group.bench_function(name, |b| {
            b.iter(|| {
                let changed = ChangedLines::from_diff(black_box(&diff)).expect("valid diff");
                black_box(changed)
            });
        });
    }

    group.finish();
}

fn bench_build_check_run(c: &mut Criterion) {
    let diff = synthetic_diff(50, 10);
    let changed = ChangedLines::from_diff(&diff).expect("valid diff");

    let violations: Vec<Violation> = changed
        .iter()
        .flat_map(|(path, lines)| lines.iter().map(move |&line| (path.to_string(), line)))
        .map(|(path, line)| {
            ViolationDraft {
                tool_name: "clippy".into(),
                rule_id: Some("needless_return".into()),
                path,
                start_line: line,
                end_line: line,
                message: "unneeded `return` statement".into(),
                level: Level::Warning,
                ..ViolationDraft::default()
            }
            .resolve(&changed)
        })
        .collect();

    c.bench_function("build_check_run", |b| {
        b.iter(|| black_box(build_check_run(black_box(&violations))));
    });
}

criterion_group!(benches, bench_index_diff, bench_build_check_run);
criterion_main!(benches);
