//! Solve loop.
//!
//! [`GenSolver`] drives a [`Population`] through generations:
//! evaluation → selection → crossover → mutation → repeat, until the
//! generation cap is reached or the evaluator signals a solution.

use super::chromosome::Chromosome;
use super::config::PopulationConfig;
use super::generation::Generation;
use super::population::Population;
use super::types::{Evaluator, GeneValue, SolveControl};

/// Fitness statistics of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Index of the generation (0-based).
    pub generation: usize,
    pub total_fitness: f64,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

impl GenerationStats {
    fn of<T: GeneValue>(generation: usize, evaluated: &Generation<T>) -> Self {
        Self {
            generation,
            total_fitness: evaluated.total_fitness(),
            best_fitness: evaluated.best().map_or(0.0, Chromosome::fitness),
            mean_fitness: evaluated.mean_fitness(),
        }
    }
}

/// Result of a solve run.
#[derive(Debug, Clone)]
pub struct SolveResult<T> {
    /// Number of generations evaluated.
    pub generations: usize,

    /// Whether the evaluator signalled a solution.
    pub solution_found: bool,

    /// Highest-fitness chromosome seen in any evaluated generation.
    pub best: Option<Chromosome<T>>,

    /// Statistics of every evaluated generation, in order.
    pub history: Vec<GenerationStats>,
}

impl<T: GeneValue> SolveResult<T> {
    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(Chromosome::fitness)
    }
}

/// Executes the solve loop over an owned population.
///
/// # Usage
///
/// ```
/// use gensolver::ga::{GenSolver, Generation, PopulationConfig, ShapeBounds, SolveControl};
///
/// let config = PopulationConfig::new(30, 0, 1)
///     .with_shape(ShapeBounds::fixed(16, 1))
///     .with_mutation_rate(0.02)
///     .with_seed(42);
/// let mut solver = GenSolver::new(config);
/// solver.initialize();
///
/// let mut count_ones = |generation: &mut Generation<i32>, control: &mut SolveControl| {
///     for c in generation.iter_mut() {
///         let ones = c.values().iter().filter(|&&v| v == 1).count();
///         c.set_fitness(ones as f64 + 1.0);
///         if ones == 16 {
///             control.found_solution();
///         }
///     }
/// };
///
/// let result = solver.start_solving(&mut count_ones, 200);
/// assert!(result.generations <= 200);
/// ```
#[derive(Debug, Clone)]
pub struct GenSolver<T: GeneValue> {
    population: Population<T>,
    current_generation_index: usize,
    solution_found: bool,
}

impl<T: GeneValue> GenSolver<T> {
    /// Creates a solver over a new, uninitialized population.
    pub fn new(config: PopulationConfig<T>) -> Self {
        Self::with_population(Population::new(config))
    }

    /// Wraps an existing population.
    pub fn with_population(population: Population<T>) -> Self {
        Self {
            population,
            current_generation_index: 0,
            solution_found: false,
        }
    }

    /// Initializes the underlying population.
    ///
    /// # Panics
    /// Panics if the population is already initialized.
    pub fn initialize(&mut self) {
        self.population.initialize();
    }

    pub fn population(&self) -> &Population<T> {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population<T> {
        &mut self.population
    }

    pub fn into_population(self) -> Population<T> {
        self.population
    }

    /// Index of the last completed generation of the latest run.
    pub fn current_generation_index(&self) -> usize {
        self.current_generation_index
    }

    /// Whether the latest run stopped on a signalled solution.
    pub fn solution_found(&self) -> bool {
        self.solution_found
    }

    /// Runs at most `max_generations` generations.
    ///
    /// Each generation is evaluated, then replaced by its offspring. A
    /// solution signalled during evaluation stops the run after that
    /// replacement; the evaluated generation is then available as
    /// [`Population::previous`].
    ///
    /// # Panics
    /// Panics if the population is not initialized.
    pub fn start_solving<E: Evaluator<T>>(
        &mut self,
        evaluator: &mut E,
        max_generations: usize,
    ) -> SolveResult<T> {
        assert!(
            self.population.is_initialized(),
            "population is not initialized"
        );

        self.current_generation_index = 0;
        self.solution_found = false;

        let mut best: Option<Chromosome<T>> = None;
        let mut history = Vec::with_capacity(max_generations);

        log::info!(
            "solving: up to {max_generations} generations of {} chromosomes",
            self.population.current().len()
        );

        for gen in 0..max_generations {
            let mut control = SolveControl::new(gen);
            evaluator.assign_fitness(self.population.current_mut(), &mut control);

            let evaluated = self.population.current();
            let stats = GenerationStats::of(gen, evaluated);
            log::debug!(
                "generation {gen}: total {:.4}, best {:.4}, mean {:.4}",
                stats.total_fitness,
                stats.best_fitness,
                stats.mean_fitness
            );
            if let Some(candidate) = evaluated.best() {
                if best.as_ref().map_or(true, |b| candidate.fitness() > b.fitness()) {
                    best = Some(candidate.clone());
                }
            }
            history.push(stats);

            self.population.create_new_generation();
            self.current_generation_index = gen;

            if control.is_solution_found() {
                self.solution_found = true;
                log::info!("solution found in generation {gen}");
                break;
            }
        }

        log::info!("solving finished after {} generations", history.len());

        SolveResult {
            generations: history.len(),
            solution_found: self.solution_found,
            best,
            history,
        }
    }
}
