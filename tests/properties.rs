//! Structural properties of the genetic operators.

use gensolver::ga::{
    operators, Chromosome, CrossRange, GenSolver, Generation, Population, PopulationConfig,
    ShapeBounds, SolveControl,
};
use gensolver::random::RandomSource;
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn shape_strategy() -> impl Strategy<Value = ShapeBounds> {
    (1usize..30, 0usize..20, 1usize..6, 0usize..6).prop_map(|(min_len, extra, min_sub, extra_sub)| {
        ShapeBounds {
            min_len,
            max_len: min_len + extra,
            min_sub_len: min_sub,
            max_sub_len: min_sub + extra_sub,
        }
    })
}

fn range_strategy() -> impl Strategy<Value = CrossRange> {
    (0.0f64..=100.0, 0.0f64..=100.0).prop_map(|(a, b)| CrossRange::new(a.min(b), a.max(b)))
}

proptest! {
    #[test]
    fn initialized_chromosomes_are_partitioned(shape in shape_strategy(), seed in any::<u64>()) {
        let mut rng = RandomSource::seeded(seed);
        let mut chromosome = Chromosome::<i64>::new();
        chromosome.initialize(&shape, -100, 100, &mut rng);

        prop_assert!(chromosome.is_consistent());
        prop_assert!(chromosome.len() >= shape.min_len);
        prop_assert!(chromosome.len() < shape.max_len + shape.max_sub_len);
        prop_assert!(chromosome
            .sub_gene_sizes()
            .iter()
            .all(|s| (shape.min_sub_len..=shape.max_sub_len).contains(s)));
    }

    #[test]
    fn crosspoints_fall_on_sub_gene_boundaries(
        shape in shape_strategy(),
        range in range_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = RandomSource::seeded(seed);
        let mut parent = Chromosome::<f64>::new();
        parent.initialize(&shape, 0.0, 1.0, &mut rng);

        let (sub, real) = operators::cross_points(&parent, &range, &mut rng);
        prop_assert!(sub < parent.number_of_sub_genes().max(1));
        prop_assert_eq!(real, parent.sub_gene_sizes()[..sub].iter().sum::<usize>());
    }

    #[test]
    fn crossover_children_are_partitioned(
        shape in shape_strategy(),
        ranges in (range_strategy(), range_strategy()),
        rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = RandomSource::seeded(seed);
        let mut p1 = Chromosome::<i32>::new();
        let mut p2 = Chromosome::<i32>::new();
        p1.initialize(&shape, 0, 9, &mut rng);
        p2.initialize(&shape, 0, 9, &mut rng);

        let mut config = PopulationConfig::new(2, 0, 9).with_crossover_rate(rate);
        config.cross_ranges = [ranges.0, ranges.1];

        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();
        operators::cross_over(&p1, &p2, &config, &mut rng, &mut b1, &mut b2);

        prop_assert!(b1.is_consistent());
        prop_assert!(b2.is_consistent());
        prop_assert_eq!(b1.len() + b2.len(), p1.len() + p2.len());
    }

    #[test]
    fn generation_size_is_conserved(half in 1usize..12, generations in 1usize..8, seed in any::<u64>()) {
        let config = PopulationConfig::new(half * 2, -5, 5)
            .with_shape(ShapeBounds { min_len: 2, max_len: 10, min_sub_len: 1, max_sub_len: 4 })
            .with_seed(seed);
        let mut population = Population::new(config);
        population.initialize();

        for _ in 0..generations {
            for c in population.current_mut().iter_mut() {
                c.set_fitness(1.0 + c.len() as f64);
            }
            population.create_new_generation();
            prop_assert_eq!(population.current().len(), half * 2);
            prop_assert!(population.current().iter().all(Chromosome::is_consistent));
        }
    }
}

#[test]
fn equal_cross_points_keep_fixed_length() {
    init_logger();
    let config = PopulationConfig::new(12, 0.0, 1.0)
        .with_shape(ShapeBounds::fixed(10, 2))
        .with_crossover_rate(1.0)
        .with_mutation_rate(0.05)
        .with_equal_cross_points(true)
        .with_seed(99);
    let mut solver = GenSolver::new(config);
    solver.initialize();

    let mut evaluator = |generation: &mut Generation<f64>, _: &mut SolveControl| {
        for c in generation.iter_mut() {
            c.set_fitness(0.1 + c.values().iter().sum::<f64>());
        }
    };
    solver.start_solving(&mut evaluator, 40);

    for c in solver.population().current() {
        assert_eq!(c.len(), 10);
        assert_eq!(c.sub_gene_sizes(), &[2, 2, 2, 2, 2]);
    }
}

#[test]
fn two_chromosome_scenario() {
    init_logger();
    let config = PopulationConfig::new(2, 0, 1)
        .with_shape(ShapeBounds::fixed(4, 2))
        .with_crossover_rate(1.0)
        .with_equal_cross_points(true)
        .with_cross_ranges(50.0, 50.0)
        .with_seed(3);
    let mut population = Population::new(config);
    population.initialize();

    let mut first = Chromosome::from_parts(vec![1, 1, 1, 1], vec![2, 2]);
    first.set_fitness(10.0);
    let second = Chromosome::from_parts(vec![0, 0, 0, 0], vec![2, 2]);

    let mut baby1 = Chromosome::new();
    let mut baby2 = Chromosome::new();
    population.cross_over_parents(&first, &second, &mut baby1, &mut baby2);

    assert_eq!(baby1.values(), &[1, 1, 0, 0]);
    assert_eq!(baby2.values(), &[0, 0, 1, 1]);
    assert_eq!(baby1.sub_gene_sizes(), &[2, 2]);
    assert_eq!(baby2.sub_gene_sizes(), &[2, 2]);
}

#[test]
fn selection_follows_fitness_ratio() {
    let mut strong = Chromosome::from_parts(vec![0], vec![1]);
    strong.set_fitness(3.0);
    let mut weak = Chromosome::from_parts(vec![0], vec![1]);
    weak.set_fitness(1.0);
    let generation = Generation::from_chromosomes(vec![strong, weak]);

    let mut rng = RandomSource::seeded(2024);
    let mut counts = [0u32; 2];
    for _ in 0..40_000 {
        counts[operators::roulette_index(&generation, &mut rng)] += 1;
    }
    let ratio = counts[0] as f64 / counts[1] as f64;
    assert!((2.8..3.2).contains(&ratio), "{counts:?}");
}
