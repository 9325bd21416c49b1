//! Criterion benchmarks for the search engines.
//!
//! Instances are generated from fixed seeds so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use np_search::aco::{AcoConfig, AntColony};
use np_search::dp::solve_knapsack;
use np_search::ga::{GaConfig, GaEngine};
use np_search::local_search::two_opt;
use np_search::problems::knapsack::{KnapsackInstance, KnapsackParams, KnapsackProblem};
use np_search::problems::tsp::{Bounds, TourAnnealing, TspInstance};
use np_search::problems::{ColoringGraph, ColoringProblem};
use np_search::random::create_rng;
use np_search::sa::{Annealer, SaConfig};

fn random_tsp(n: usize) -> TspInstance {
    TspInstance::random(n, Bounds::default(), &mut create_rng(7)).expect("valid bounds")
}

// ===========================================================================
// GA
// ===========================================================================

fn bench_ga_coloring(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_coloring");
    group.sample_size(10);

    for &n in &[20usize, 50] {
        let graph = ColoringGraph::random(n, 0.2, &mut create_rng(3)).expect("valid probability");
        let problem = ColoringProblem::with_vertex_count_colors(&graph);
        let config = GaConfig::graph_coloring()
            .with_max_generations(50)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, cfg| {
            b.iter(|| {
                let engine = GaEngine::new(black_box(&problem), cfg.clone()).expect("valid config");
                black_box(engine.run())
            })
        });
    }
    group.finish();
}

fn bench_ga_knapsack(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_knapsack");
    group.sample_size(10);

    let instance = KnapsackInstance::generate(&KnapsackParams::default(), &mut create_rng(5))
        .expect("default params are feasible");
    let problem = KnapsackProblem::new(&instance);
    let config = GaConfig::knapsack().with_max_generations(100).with_seed(42);
    group.bench_function("items100_g100", |b| {
        b.iter(|| {
            let engine = GaEngine::new(black_box(&problem), config.clone()).expect("valid config");
            black_box(engine.run())
        })
    });
    group.finish();
}

// ===========================================================================
// TSP
// ===========================================================================

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");

    for &n in &[20usize, 50, 100] {
        let instance = random_tsp(n);
        let tour = instance.identity_tour();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tour, |b, t| {
            b.iter(|| black_box(two_opt(black_box(t), |x, y| instance.distance(x, y))))
        });
    }
    group.finish();
}

fn bench_sa_tsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_tsp");
    group.sample_size(10);

    let instance = random_tsp(30);
    let problem = TourAnnealing::new(&instance);
    let config = SaConfig::default().with_max_iterations(200).with_seed(42);
    group.bench_function("cities30_i200", |b| {
        b.iter(|| {
            let annealer =
                Annealer::new(black_box(&problem), config.clone()).expect("valid config");
            black_box(annealer.run())
        })
    });
    group.finish();
}

fn bench_aco_tsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_tsp");
    group.sample_size(10);

    for &n in &[20usize, 50] {
        let instance = random_tsp(n);
        let config = AcoConfig::default().with_max_iterations(20).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, cfg| {
            b.iter(|| {
                let colony =
                    AntColony::new(black_box(&instance), cfg.clone()).expect("valid config");
                black_box(colony.run())
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Exact DP
// ===========================================================================

fn bench_dp_knapsack(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp_knapsack");

    for &n in &[20usize, 100] {
        let params = KnapsackParams::default().with_num_items(n);
        let instance =
            KnapsackInstance::generate(&params, &mut create_rng(9)).expect("feasible params");
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| black_box(solve_knapsack(black_box(inst))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ga_coloring,
    bench_ga_knapsack,
    bench_two_opt,
    bench_sa_tsp,
    bench_aco_tsp,
    bench_dp_knapsack
);
criterion_main!(benches);
