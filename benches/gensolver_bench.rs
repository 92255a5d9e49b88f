//! Criterion benchmarks for the gensolver engine.
//!
//! Uses synthetic problems (Sphere function, OneMax) to measure
//! pure engine overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gensolver::ga::{GenSolver, Generation, Population, PopulationConfig, ShapeBounds, SolveControl};

// ===========================================================================
// Sphere function: maximize 1 / (1 + sum(x_i^2))
// ===========================================================================

fn sphere(generation: &mut Generation<f64>, _: &mut SolveControl) {
    for c in generation.iter_mut() {
        let sum: f64 = c.values().iter().map(|x| x * x).sum();
        c.set_fitness(1.0 / (1.0 + sum));
    }
}

fn bench_solve_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_sphere");
    group.sample_size(10);

    for &dim in &[10, 30, 100] {
        let config = PopulationConfig::new(100, -5.0, 5.0)
            .with_shape(ShapeBounds::fixed(dim, 1))
            .with_mutation_rate(0.01)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &config, |b, config| {
            b.iter(|| {
                let mut solver = GenSolver::new(black_box(config.clone()));
                solver.initialize();
                let result = solver.start_solving(&mut sphere, 50);
                black_box(result)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// OneMax with variable-length sub-genes: generation replacement only
// ===========================================================================

fn bench_new_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_new_generation");
    group.sample_size(10);

    for &size in &[50, 200, 1000] {
        let config = PopulationConfig::new(size, 0, 1)
            .with_shape(ShapeBounds {
                min_len: 20,
                max_len: 60,
                min_sub_len: 1,
                max_sub_len: 8,
            })
            .with_seed(42);
        let mut population = Population::new(config);
        population.initialize();

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                for chromosome in population.current_mut().iter_mut() {
                    let ones = chromosome.values().iter().filter(|&&v| v == 1).count();
                    chromosome.set_fitness(ones as f64 + 1.0);
                }
                population.create_new_generation();
                black_box(population.current().len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve_sphere, bench_new_generation);
criterion_main!(benches);
