//! Criterion benchmarks for key synthesis and snapshot projections.
//!
//! Summaries are recomputed after every checkbox change, and defaults are
//! filled on every profile load, so both should stay well under a
//! millisecond for the standard catalogs.
//!
//! Run with:
//! ```bash
//! cargo bench --package planter-core --bench key_space_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use planter_core::{
    apply_defaults,
    keyspace::{full_key_space, planter_field_key},
    recompute_summaries, Catalogs, SettingValue, SettingsSnapshot,
};

/// Builds a snapshot where roughly half of the planter-field pairs are set.
fn half_filled_snapshot(catalogs: &Catalogs) -> SettingsSnapshot {
    let mut snapshot = SettingsSnapshot::new();
    for (p, planter) in catalogs.planters.active().enumerate() {
        for (f, field) in catalogs.fields.active().enumerate() {
            if (p + f) % 2 == 0 {
                snapshot.insert(planter_field_key(planter, field), SettingValue::Bool(f % 3 != 0));
            }
        }
    }
    snapshot
}

fn bench_key_synthesis(c: &mut Criterion) {
    let catalogs = Catalogs::standard();
    c.bench_function("full_key_space/standard", |b| {
        b.iter(|| full_key_space(black_box(&catalogs)))
    });
}

fn bench_apply_defaults(c: &mut Criterion) {
    let catalogs = Catalogs::standard();
    let mut group = c.benchmark_group("apply_defaults");

    let empty = SettingsSnapshot::new();
    let half = half_filled_snapshot(&catalogs);
    let full = apply_defaults(SettingsSnapshot::new(), &catalogs).snapshot;

    for (label, snapshot) in [("empty", &empty), ("half", &half), ("full", &full)] {
        group.bench_with_input(BenchmarkId::from_parameter(label), snapshot, |b, s| {
            b.iter(|| apply_defaults(black_box(s.clone()), &catalogs))
        });
    }
    group.finish();
}

fn bench_recompute_summaries(c: &mut Criterion) {
    let catalogs = Catalogs::standard();
    let snapshot = half_filled_snapshot(&catalogs);
    c.bench_function("recompute_summaries/half_filled", |b| {
        b.iter(|| recompute_summaries(black_box(&snapshot), &catalogs))
    });
}

criterion_group!(
    benches,
    bench_key_synthesis,
    bench_apply_defaults,
    bench_recompute_summaries
);
criterion_main!(benches);
