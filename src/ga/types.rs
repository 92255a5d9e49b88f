//! Core trait definitions for the GA engine.
//!
//! [`GeneValue`] is the only type-specific hook of the engine: everything
//! else in [`Chromosome`](super::Chromosome), [`Generation`](super::Generation)
//! and [`Population`](super::Population) is written once for any value type.
//! [`Evaluator`] is the contract between the engine and problem-specific
//! fitness code.

use super::generation::Generation;
use crate::random::RandomSource;

/// A value stored in a chromosome.
///
/// Built-in implementations exist for `i32`, `i64`, `f32` and `f64`.
pub trait GeneValue:
    Copy + PartialOrd + Default + std::fmt::Debug + std::fmt::Display + 'static
{
    /// Draws one value uniformly in `[min, max]`.
    fn random_in(rng: &mut RandomSource, min: Self, max: Self) -> Self;
}

impl GeneValue for i32 {
    fn random_in(rng: &mut RandomSource, min: Self, max: Self) -> Self {
        rng.uniform_int(min as i64, max as i64) as i32
    }
}

impl GeneValue for i64 {
    fn random_in(rng: &mut RandomSource, min: Self, max: Self) -> Self {
        rng.uniform_int(min, max)
    }
}

impl GeneValue for f32 {
    fn random_in(rng: &mut RandomSource, min: Self, max: Self) -> Self {
        (rng.uniform_float(min as f64, max as f64) as f32).clamp(min, max)
    }
}

impl GeneValue for f64 {
    fn random_in(rng: &mut RandomSource, min: Self, max: Self) -> Self {
        rng.uniform_float(min, max)
    }
}

/// Handle passed to an [`Evaluator`] during a solve run.
///
/// The evaluator uses it to request early termination. The request is
/// honoured at the next generation boundary, after the evaluated generation
/// has been replaced.
#[derive(Debug, Clone, Default)]
pub struct SolveControl {
    generation: usize,
    solution_found: bool,
}

impl SolveControl {
    pub(crate) fn new(generation: usize) -> Self {
        Self {
            generation,
            solution_found: false,
        }
    }

    /// Signals that a solution was found. Calling it again has no effect.
    pub fn found_solution(&mut self) {
        self.solution_found = true;
    }

    /// Whether [`found_solution`](Self::found_solution) was called.
    pub fn is_solution_found(&self) -> bool {
        self.solution_found
    }

    /// Index of the generation being evaluated (0-based).
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// Assigns fitness to a generation.
///
/// Higher fitness means a higher chance of being selected as a parent.
/// Fitness must be non-negative and at least one chromosome should receive a
/// strictly positive value: fitness-proportional selection over an all-zero
/// generation does not terminate.
///
/// Closures of the form `FnMut(&mut Generation<T>, &mut SolveControl)`
/// implement this trait.
///
/// ```
/// use gensolver::ga::{Generation, SolveControl};
///
/// let mut evaluator = |generation: &mut Generation<i32>, control: &mut SolveControl| {
///     for chromosome in generation.iter_mut() {
///         let score = chromosome.values().iter().map(|&v| v as f64).sum::<f64>();
///         chromosome.set_fitness(score.max(1.0));
///     }
///     if control.generation() == 3 {
///         control.found_solution();
///     }
/// };
/// # let _ = &mut evaluator;
/// ```
pub trait Evaluator<T: GeneValue> {
    /// Sets the fitness of every chromosome in `generation`.
    fn assign_fitness(&mut self, generation: &mut Generation<T>, control: &mut SolveControl);
}

impl<T, F> Evaluator<T> for F
where
    T: GeneValue,
    F: FnMut(&mut Generation<T>, &mut SolveControl),
{
    fn assign_fitness(&mut self, generation: &mut Generation<T>, control: &mut SolveControl) {
        self(generation, control)
    }
}
