//! Two-buffer population engine.
//!
//! A [`Population`] owns a `current` and a `previous` [`Generation`]. Each
//! call to [`create_new_generation`](Population::create_new_generation)
//! swaps their roles and breeds the new current generation from the
//! previous one in place, so no generation is ever reallocated.

use super::chromosome::Chromosome;
use super::config::PopulationConfig;
use super::generation::Generation;
use super::operators;
use super::types::GeneValue;
use crate::random::RandomSource;
use std::mem;

/// The genetic-operator engine.
///
/// # Usage
///
/// ```
/// use gensolver::ga::{Population, PopulationConfig, ShapeBounds};
///
/// let config = PopulationConfig::new(20, 0, 9)
///     .with_shape(ShapeBounds::fixed(8, 2))
///     .with_seed(42);
/// let mut population = Population::new(config);
/// population.initialize();
///
/// for chromosome in population.current_mut().iter_mut() {
///     let score: i32 = chromosome.values().iter().sum();
///     chromosome.set_fitness(score as f64 + 1.0);
/// }
/// population.create_new_generation();
/// assert_eq!(population.current().len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Population<T: GeneValue> {
    config: PopulationConfig<T>,
    current: Generation<T>,
    previous: Generation<T>,
    rng: RandomSource,
    initialized: bool,
}

impl<T: GeneValue> Population<T> {
    /// Creates an uninitialized population. Nothing is drawn until
    /// [`initialize`](Self::initialize) seeds the RNG.
    pub fn new(config: PopulationConfig<T>) -> Self {
        Self {
            config,
            current: Generation::new(0),
            previous: Generation::new(0),
            rng: RandomSource::seeded(0),
            initialized: false,
        }
    }

    /// Seeds the RNG from `config.seed`, allocates both generations and
    /// randomizes the current one.
    ///
    /// # Panics
    /// Panics if called twice or if the configuration is invalid
    /// (call [`PopulationConfig::validate`] first to get a descriptive
    /// error).
    pub fn initialize(&mut self) {
        assert!(!self.initialized, "population is already initialized");
        if let Err(e) = self.config.validate() {
            panic!("invalid PopulationConfig: {e}");
        }

        self.rng = RandomSource::new(self.config.seed);
        let size = self.config.generation_size;
        self.current = Generation::new(size);
        self.previous = Generation::new(size);
        self.current.initialize_chromosomes(
            &self.config.shape,
            self.config.min_value,
            self.config.max_value,
            &mut self.rng,
        );
        self.initialized = true;

        log::debug!(
            "population initialized: {size} chromosomes, seed {}",
            self.rng.seed()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &PopulationConfig<T> {
        &self.config
    }

    /// The generation being evaluated.
    pub fn current(&self) -> &Generation<T> {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Generation<T> {
        &mut self.current
    }

    /// The generation the current one was bred from.
    ///
    /// After a solve run stops, this holds the last evaluated generation.
    pub fn previous(&self) -> &Generation<T> {
        &self.previous
    }

    /// The population's RNG. Draws made before
    /// [`initialize`](Self::initialize) do not affect the seeded run.
    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    fn require_initialized(&self) {
        assert!(self.initialized, "population is not initialized");
    }

    /// Fitness-proportional selection of one chromosome of `generation`.
    ///
    /// See [`operators::roulette_index`] for the preconditions on fitness.
    pub fn grab_chromosome(&mut self, generation: &Generation<T>) -> usize {
        self.require_initialized();
        operators::roulette_index(generation, &mut self.rng)
    }

    /// Chooses two parent indices according to `clone_parents`.
    pub fn select_parents(&mut self, generation: &Generation<T>) -> (usize, usize) {
        self.require_initialized();
        operators::select_parents(generation, self.config.clone_parents, &mut self.rng)
    }

    /// Selects two parents from `generation` and writes their children to
    /// `baby1` and `baby2`.
    pub fn cross_over(
        &mut self,
        generation: &Generation<T>,
        baby1: &mut Chromosome<T>,
        baby2: &mut Chromosome<T>,
    ) {
        self.require_initialized();
        breed(generation, &self.config, &mut self.rng, baby1, baby2);
    }

    /// Recombines two explicitly chosen parents.
    pub fn cross_over_parents(
        &mut self,
        parent1: &Chromosome<T>,
        parent2: &Chromosome<T>,
        baby1: &mut Chromosome<T>,
        baby2: &mut Chromosome<T>,
    ) {
        self.require_initialized();
        operators::cross_over(parent1, parent2, &self.config, &mut self.rng, baby1, baby2);
    }

    /// Mutates each value of `chromosome` with probability `mutation_rate`.
    pub fn mutate(&mut self, chromosome: &mut Chromosome<T>) {
        self.require_initialized();
        operators::mutate(
            chromosome,
            self.config.mutation_rate,
            self.config.min_value,
            self.config.max_value,
            &mut self.rng,
        );
    }

    /// Replaces the current generation by the offspring of the current one.
    ///
    /// The generations swap roles, then every slot pair `(i, i + 1)` of the
    /// new current generation is overwritten by two children of parents
    /// selected from the previous one, each child then mutated.
    ///
    /// # Panics
    /// Panics if the population is not initialized or the generation size
    /// is odd.
    pub fn create_new_generation(&mut self) {
        self.require_initialized();
        let size = self.current.len();
        assert!(size % 2 == 0, "generation size must be even, got {size}");

        mem::swap(&mut self.current, &mut self.previous);

        let Self {
            config,
            current,
            previous,
            rng,
            ..
        } = self;

        for i in (0..size).step_by(2) {
            let (baby1, baby2) = current.pair_mut(i);
            breed(previous, config, rng, baby1, baby2);
            operators::mutate(baby1, config.mutation_rate, config.min_value, config.max_value, rng);
            operators::mutate(baby2, config.mutation_rate, config.min_value, config.max_value, rng);
        }
    }
}

/// Parent selection followed by recombination.
fn breed<T: GeneValue>(
    generation: &Generation<T>,
    config: &PopulationConfig<T>,
    rng: &mut RandomSource,
    baby1: &mut Chromosome<T>,
    baby2: &mut Chromosome<T>,
) {
    let (p1, p2) = operators::select_parents(generation, config.clone_parents, rng);
    operators::cross_over(&generation[p1], &generation[p2], config, rng, baby1, baby2);
}
