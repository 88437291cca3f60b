//! Criterion benchmarks for assembly and step-driven dispatch.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use picdeck_bench::{multi_species_profile, reference_profile};
use picdeck_engine::DryRunEngine;

/// Benchmark: assemble a simulation with 32 species.
fn bench_assemble_32_species(c: &mut Criterion) {
    c.bench_function("assemble_32_species", |b| {
        b.iter(|| black_box(multi_species_profile(32, 100)));
    });
}

/// Benchmark: start a run and drive 1000 dry-run steps.
fn bench_dry_run_1000_steps(c: &mut Criterion) {
    c.bench_function("dry_run_1000_steps", |b| {
        b.iter_batched(
            || reference_profile(1000),
            |mut sim| {
                let run = sim.run(DryRunEngine::new()).unwrap();
                black_box(run.filter_map(Result::ok).count())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_assemble_32_species, bench_dry_run_1000_steps);
criterion_main!(benches);
