//! Genetic operators on sub-gene structured chromosomes.
//!
//! # Selection
//!
//! - [`roulette_index`]: fitness-proportional selection, O(n)
//! - [`select_parents`]: two roulette draws, optionally distinct
//!
//! # Crossover
//!
//! - [`cross_points`]: sub-gene aligned crosspoint of one parent
//! - [`cross_over`]: two-parent single-point recombination producing two
//!   children
//!
//! # Mutation
//!
//! - [`mutate`]: per-value uniform replacement
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 3 (roulette wheel, single-point crossover)

use super::chromosome::Chromosome;
use super::config::{CrossRange, PopulationConfig};
use super::generation::Generation;
use super::types::GeneValue;
use crate::random::RandomSource;

// ============================================================================
// Selection
// ============================================================================

/// Fitness-proportional (roulette wheel) selection.
///
/// Draws `r` uniformly in `[0, total_fitness)` and walks the chromosomes
/// starting at index 1, wrapping past the end to index 0, accumulating
/// fitness until it reaches `r`.
///
/// At least one chromosome must have strictly positive fitness. With all
/// fitness values at 0 the walk only ends if `r` happens to be 0.
///
/// # Panics
/// Panics if `generation` is empty.
pub fn roulette_index<T: GeneValue>(generation: &Generation<T>, rng: &mut RandomSource) -> usize {
    let n = generation.len();
    assert!(n > 0, "cannot select from empty generation");

    let total = generation.total_fitness();
    let r = rng.unit() * total;

    let mut accumulated = 0.0;
    let mut i = 1 % n;
    loop {
        accumulated += generation[i].fitness();
        if accumulated >= r {
            return i;
        }
        i = (i + 1) % n;
    }
}

/// Chooses two parent indices.
///
/// With `clone_parents`, the second parent is drawn independently and may
/// equal the first. Otherwise it is redrawn until it differs, which needs
/// a second chromosome with positive fitness.
pub fn select_parents<T: GeneValue>(
    generation: &Generation<T>,
    clone_parents: bool,
    rng: &mut RandomSource,
) -> (usize, usize) {
    let first = roulette_index(generation, rng);
    let mut second = roulette_index(generation, rng);
    if !clone_parents {
        assert!(
            generation.len() > 1,
            "distinct parents need at least two chromosomes"
        );
        while second == first {
            second = roulette_index(generation, rng);
        }
    }
    (first, second)
}

// ============================================================================
// Crossover
// ============================================================================

/// Crosspoint of one parent as `(sub_gene_index, value_index)`.
///
/// The sub-gene index is drawn uniformly from `range` applied to the
/// parent's sub-gene count. The value index is the offset of that sub-gene,
/// so the split never falls inside a sub-gene.
pub fn cross_points<T: GeneValue>(
    parent: &Chromosome<T>,
    range: &CrossRange,
    rng: &mut RandomSource,
) -> (usize, usize) {
    let (lo, hi) = range.bounds(parent.number_of_sub_genes());
    let sub = rng.uniform_usize(lo, hi);
    (sub, parent.sub_gene_offset(sub))
}

/// Recombines two parents into `baby1` and `baby2`.
///
/// With probability `crossover_rate`, `baby1` is the head of `parent1`
/// before its crosspoint followed by the tail of `parent2` from its
/// crosspoint; `baby2` is the complement. Sub-gene sizes are spliced the
/// same way. Otherwise the babies are exact copies of the parents.
///
/// Crosspoints are always drawn, so the RNG advances identically whether
/// or not recombination happens.
///
/// # Panics
/// Panics if `equal_cross_points` is set and the parents' sub-gene sizes
/// differ before the first parent's crosspoint.
pub fn cross_over<T: GeneValue>(
    parent1: &Chromosome<T>,
    parent2: &Chromosome<T>,
    config: &PopulationConfig<T>,
    rng: &mut RandomSource,
    baby1: &mut Chromosome<T>,
    baby2: &mut Chromosome<T>,
) {
    let cross1 = cross_points(parent1, &config.cross_ranges[0], rng);
    let mut cross2 = cross_points(parent2, &config.cross_ranges[1], rng);

    if config.equal_cross_points {
        let (sub, _) = cross1;
        assert!(
            sub <= parent2.number_of_sub_genes()
                && parent1.sub_gene_sizes()[..sub] == parent2.sub_gene_sizes()[..sub],
            "equal crosspoints need parents with the same sub-gene sizes"
        );
        cross2 = cross1;
    }

    if rng.unit() < config.crossover_rate {
        log::trace!(
            "crossover at sub-genes {}/{} (values {}/{})",
            cross1.0,
            cross2.0,
            cross1.1,
            cross2.1
        );
        baby1.assign_spliced(parent1, cross1, parent2, cross2);
        baby2.assign_spliced(parent2, cross2, parent1, cross1);
    } else {
        baby1.clone_from(parent1);
        baby2.clone_from(parent2);
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Replaces each value independently with probability `rate` by a fresh
/// draw in `[min_value, max_value]`. Sub-gene sizes are never changed.
pub fn mutate<T: GeneValue>(
    chromosome: &mut Chromosome<T>,
    rate: f64,
    min_value: T,
    max_value: T,
    rng: &mut RandomSource,
) {
    for i in 0..chromosome.len() {
        if rng.unit() < rate {
            chromosome.mutate(i, min_value, max_value, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(values: Vec<i32>, sizes: Vec<usize>, fitness: f64) -> Chromosome<i32> {
        let mut c = Chromosome::from_parts(values, sizes);
        c.set_fitness(fitness);
        c
    }

    fn make_generation(fitnesses: &[f64]) -> Generation<i32> {
        Generation::from_chromosomes(
            fitnesses
                .iter()
                .map(|&f| scored(vec![0], vec![1], f))
                .collect(),
        )
    }

    #[test]
    fn test_roulette_is_fitness_proportional() {
        let generation = make_generation(&[3.0, 1.0]);
        let mut rng = RandomSource::seeded(42);

        let mut counts = [0u32; 2];
        let n = 20_000;
        for _ in 0..n {
            counts[roulette_index(&generation, &mut rng)] += 1;
        }
        let ratio = counts[0] as f64 / counts[1] as f64;
        assert!(
            (2.7..3.3).contains(&ratio),
            "expected roughly 3:1, got {counts:?} (ratio {ratio:.3})"
        );
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let generation = make_generation(&[0.0, 5.0, 0.0, 2.0]);
        let mut rng = RandomSource::seeded(7);
        for _ in 0..5000 {
            let idx = roulette_index(&generation, &mut rng);
            assert!(idx == 1 || idx == 3, "picked zero-fitness index {idx}");
        }
    }

    #[test]
    fn test_roulette_single_chromosome() {
        let generation = make_generation(&[1.0]);
        let mut rng = RandomSource::seeded(1);
        assert_eq!(roulette_index(&generation, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty generation")]
    fn test_roulette_empty_panics() {
        let generation = Generation::<i32>::new(0);
        roulette_index(&generation, &mut RandomSource::seeded(1));
    }

    #[test]
    fn test_select_distinct_parents() {
        let generation = make_generation(&[10.0, 1.0, 1.0]);
        let mut rng = RandomSource::seeded(3);
        for _ in 0..2000 {
            let (a, b) = select_parents(&generation, false, &mut rng);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_select_clone_parents_allows_self_pairing() {
        let generation = make_generation(&[10.0, 0.0]);
        let mut rng = RandomSource::seeded(3);
        let (a, b) = select_parents(&generation, true, &mut rng);
        assert_eq!((a, b), (0, 0));
    }

    #[test]
    fn test_cross_points_on_sub_gene_boundaries() {
        let parent = scored(vec![0; 10], vec![3, 1, 4, 2], 1.0);
        let range = CrossRange::default();
        let mut rng = RandomSource::seeded(11);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let (sub, real) = cross_points(&parent, &range, &mut rng);
            assert!(sub < 4);
            assert_eq!(real, parent.sub_gene_sizes()[..sub].iter().sum::<usize>());
            seen[sub] = true;
        }
        assert!(seen.iter().all(|&s| s), "{seen:?}");
    }

    #[test]
    fn test_cross_over_fixed_halves() {
        let p1 = scored(vec![1, 1, 1, 1], vec![2, 2], 10.0);
        let p2 = scored(vec![0, 0, 0, 0], vec![2, 2], 0.0);
        let config = PopulationConfig::new(2, 0, 1)
            .with_crossover_rate(1.0)
            .with_equal_cross_points(true)
            .with_cross_ranges(50.0, 50.0);
        let mut rng = RandomSource::seeded(0);
        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();

        cross_over(&p1, &p2, &config, &mut rng, &mut b1, &mut b2);

        assert_eq!(b1.values(), &[1, 1, 0, 0]);
        assert_eq!(b2.values(), &[0, 0, 1, 1]);
        assert_eq!(b1.sub_gene_sizes(), &[2, 2]);
        assert_eq!(b2.sub_gene_sizes(), &[2, 2]);
    }

    #[test]
    fn test_cross_over_variable_shapes_stay_consistent() {
        let p1 = scored(vec![1; 7], vec![1, 2, 4], 1.0);
        let p2 = scored(vec![2; 5], vec![3, 1, 1], 1.0);
        let config = PopulationConfig::new(2, 0, 9).with_crossover_rate(1.0);
        let mut rng = RandomSource::seeded(5);
        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();

        for _ in 0..500 {
            cross_over(&p1, &p2, &config, &mut rng, &mut b1, &mut b2);
            assert!(b1.is_consistent());
            assert!(b2.is_consistent());
            // children conserve the parents' material
            assert_eq!(b1.len() + b2.len(), 12);
            assert_eq!(b1.number_of_sub_genes() + b2.number_of_sub_genes(), 6);
        }
    }

    #[test]
    #[should_panic(expected = "same sub-gene sizes")]
    fn test_equal_cross_points_reject_mismatched_sizes() {
        let p1 = scored(vec![1; 4], vec![1, 3], 1.0);
        let p2 = scored(vec![2; 4], vec![3, 1], 1.0);
        let config = PopulationConfig::new(2, 0, 9)
            .with_crossover_rate(1.0)
            .with_equal_cross_points(true)
            .with_cross_ranges(50.0, 50.0);
        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();
        cross_over(&p1, &p2, &config, &mut RandomSource::seeded(0), &mut b1, &mut b2);
    }

    #[test]
    fn test_equal_cross_points_with_different_lengths() {
        let p1 = scored(vec![1; 6], vec![2, 2, 2], 1.0);
        let p2 = scored(vec![2; 4], vec![2, 2], 1.0);
        let config = PopulationConfig::new(2, 0, 9)
            .with_crossover_rate(1.0)
            .with_equal_cross_points(true)
            .with_cross_ranges(50.0, 50.0);
        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();
        cross_over(&p1, &p2, &config, &mut RandomSource::seeded(0), &mut b1, &mut b2);

        // crosspoint 1 of parent1 is reused for parent2
        assert_eq!(b1.values(), &[1, 1, 2, 2]);
        assert_eq!(b2.values(), &[2, 2, 1, 1, 1, 1]);
        assert!(b1.is_consistent() && b2.is_consistent());
    }

    #[test]
    fn test_cross_over_rate_zero_copies_parents() {
        let p1 = scored(vec![1, 2], vec![1, 1], 4.0);
        let p2 = scored(vec![3, 4, 5], vec![3], 2.0);
        let config = PopulationConfig::new(2, 0, 9).with_crossover_rate(0.0);
        let mut rng = RandomSource::seeded(5);
        let mut b1 = Chromosome::new();
        let mut b2 = Chromosome::new();

        cross_over(&p1, &p2, &config, &mut rng, &mut b1, &mut b2);

        assert_eq!(b1, p1);
        assert_eq!(b2, p2);
    }

    #[test]
    fn test_mutate_rate_one_replaces_everything() {
        let mut c = scored(vec![0; 20], vec![10, 10], 0.0);
        let mut rng = RandomSource::seeded(8);
        mutate(&mut c, 1.0, 5, 5, &mut rng);
        assert!(c.values().iter().all(|&v| v == 5));
        assert_eq!(c.sub_gene_sizes(), &[10, 10]);
    }

    #[test]
    fn test_mutate_rate_zero_is_noop() {
        let mut c = scored(vec![0; 20], vec![20], 0.0);
        let mut rng = RandomSource::seeded(8);
        mutate(&mut c, 0.0, 5, 5, &mut rng);
        assert!(c.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_mutate_rate_is_per_value() {
        let mut c = scored(vec![0; 10_000], vec![10_000], 0.0);
        let mut rng = RandomSource::seeded(8);
        mutate(&mut c, 0.1, 1, 1, &mut rng);
        let changed = c.values().iter().filter(|&&v| v == 1).count();
        assert!((800..1200).contains(&changed), "changed {changed}");
    }
}
