// completion.rs - Benchmarks for variable completion over resource import chains
//
// Run with: cargo bench --bench completion --features test-support
// Compare baselines: cargo bench --bench completion --features test-support -- --baseline before

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio_util::sync::CancellationToken;

use robovars::test_utils::fixture_workspace::{
    create_fixture_workspace, suite_cursor, suite_path, FixtureConfig,
};
use robovars::variables::complete;
use robovars::workspace::Workspace;

// ---------------------------------------------------------------------------
// Benchmark: Completion with varying workspace sizes
// ---------------------------------------------------------------------------

fn bench_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("completion");

    for (name, config) in [
        ("small", FixtureConfig::small()),
        ("medium", FixtureConfig::medium()),
        ("large", FixtureConfig::large()),
    ] {
        let dir = create_fixture_workspace(&config);
        let path = suite_path(dir.path());
        let (line, col) = suite_cursor(&config);
        // Warm workspace: documents are read once and served from the cache
        let workspace = Workspace::default();

        group.bench_with_input(BenchmarkId::new("warm", name), &config, |b, _| {
            b.iter(|| {
                let ctx = workspace
                    .completion_context(&path, line, col, CancellationToken::new())
                    .unwrap();
                black_box(complete(&ctx).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("cold", name), &config, |b, _| {
            b.iter(|| {
                let workspace = Workspace::default();
                let ctx = workspace
                    .completion_context(&path, line, col, CancellationToken::new())
                    .unwrap();
                black_box(complete(&ctx).unwrap().len())
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: Dependency graph walk alone
// ---------------------------------------------------------------------------

fn bench_dependency_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_graph");

    for depth in [5usize, 20, 40] {
        let config = FixtureConfig {
            resource_count: depth + 1,
            resource_chain_depth: depth,
            ..FixtureConfig::small()
        };
        let dir = create_fixture_workspace(&config);
        let path = suite_path(dir.path());
        let workspace = Workspace::default();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let ctx = workspace
                    .completion_context(&path, 0, 0, CancellationToken::new())
                    .unwrap();
                black_box(ctx.collect_dependency_graph().unwrap().visited().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_completion, bench_dependency_graph);
criterion_main!(benches);
