//! Genetic Algorithm engine.
//!
//! A generic GA engine over chromosomes whose values are partitioned into
//! variable-length *sub-genes*. Crossover only cuts at sub-gene boundaries,
//! so encoded sub-structures survive recombination.
//!
//! # Core Traits
//!
//! - [`GeneValue`]: The value type of a chromosome (`i32`, `i64`, `f32`, `f64`)
//! - [`Evaluator`]: Assigns fitness to a generation, may signal a solution
//!
//! # Key Types
//!
//! - [`Chromosome`]: Values plus sub-gene sizes plus fitness
//! - [`Generation`]: Fixed-size set of chromosomes
//! - [`Population`]: Two alternating generations and the genetic operators
//! - [`PopulationConfig`]: Rates, crosspoint ranges, value range, shape, seed
//! - [`GenSolver`]: Executes the solve loop
//! - [`SolveResult`]: Outcome of a run with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Roulette selection, sub-gene aligned crossover, mutation
//! - [`format`]: Tagged text format for persisted generations
//! - [`network`]: Adapter evolving the weights of a network
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod chromosome;
mod config;
pub mod format;
mod generation;
pub mod network;
pub mod operators;
mod population;
mod runner;
mod types;

pub use chromosome::Chromosome;
pub use config::{CrossRange, PopulationConfig, ShapeBounds};
pub use format::{FormatError, GenerationFile};
pub use generation::Generation;
pub use network::{network_shape, NetworkEvaluator, WeightedNetwork};
pub use population::Population;
pub use runner::{GenSolver, GenerationStats, SolveResult};
pub use types::{Evaluator, GeneValue, SolveControl};
