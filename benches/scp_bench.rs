//! Criterion benchmarks for the set covering heuristics.
//!
//! All strategies run on seeded geometric instances so that timings are
//! comparable across runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scp_heur::bh::{BhConfig, BhRunner};
use scp_heur::ga::{GaConfig, GaRunner};
use scp_heur::instance::generate::GeneratorConfig;
use scp_heur::lagrangian::{LagrangianConfig, LagrangianRunner};
use scp_heur::random::create_rng;
use scp_heur::sa::{SaConfig, SaRunner};
use scp_heur::{Instance, Repairer};

const SIZES: [(usize, usize); 3] = [(50, 30), (150, 80), (400, 200)];

fn instance(elements: usize, sets: usize) -> Instance {
    let mut rng = create_rng(Some(42));
    GeneratorConfig::new(elements, sets)
        .generate(&mut rng)
        .expect("benchmark instance")
}

fn label(elements: usize, sets: usize) -> String {
    format!("e{elements}_s{sets}")
}

// ===========================================================================
// Repair
// ===========================================================================

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair_empty");

    for (elements, sets) in SIZES {
        let inst = instance(elements, sets);
        group.bench_with_input(BenchmarkId::from_parameter(label(elements, sets)), &inst, |b, inst| {
            let repairer = Repairer::new(inst);
            b.iter(|| {
                let mut selection = vec![false; inst.num_sets()];
                repairer.repair(black_box(&mut selection));
                black_box(selection)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Strategies
// ===========================================================================

fn bench_sa(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa");
    group.sample_size(10);

    for (elements, sets) in SIZES {
        let inst = instance(elements, sets);
        let config = SaConfig::default().with_max_iterations(500).with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(label(elements, sets)),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = SaRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_bh(c: &mut Criterion) {
    let mut group = c.benchmark_group("bh");
    group.sample_size(10);

    for (elements, sets) in SIZES {
        let inst = instance(elements, sets);
        let config = BhConfig::default()
            .with_star_count(20)
            .with_max_iterations(50)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(label(elements, sets)),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = BhRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);

    for (elements, sets) in SIZES {
        let inst = instance(elements, sets);
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_iterations(50)
            .with_stagnation_limit(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(label(elements, sets)),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_lagrangian(c: &mut Criterion) {
    let mut group = c.benchmark_group("lagrangian");
    group.sample_size(10);

    for (elements, sets) in SIZES {
        let inst = instance(elements, sets);
        let config = LagrangianConfig::default().with_max_iterations(200);
        group.bench_with_input(
            BenchmarkId::from_parameter(label(elements, sets)),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = LagrangianRunner::run(black_box(i), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_repair, bench_sa, bench_bh, bench_ga, bench_lagrangian);
criterion_main!(benches);
