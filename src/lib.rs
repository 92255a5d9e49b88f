//! Generic genetic-algorithm engine.
//!
//! Evolves a population of variable-structure chromosomes against a
//! user-supplied fitness evaluator:
//!
//! - **Chromosomes** are flat value sequences (integer or floating point)
//!   partitioned into variable-length sub-genes; two consecutive sub-genes
//!   form a gene.
//! - **Selection** is fitness-proportional (roulette wheel).
//! - **Crossover** is single-point per parent and always cuts at sub-gene
//!   boundaries, so parents of different lengths recombine without
//!   corrupting encoded sub-structures.
//! - **Mutation** replaces single values with fresh uniform draws.
//! - **Solving** runs generation after generation until a cap is reached
//!   or the evaluator signals a solution.
//!
//! # Architecture
//!
//! [`random`] is the leaf: every operator receives an explicit, seeded
//! [`random::RandomSource`]. [`ga`] contains the data model, operators and
//! the solve loop. The crate is single-threaded and synchronous; it logs
//! through the `log` facade and never installs a logger itself.

pub mod ga;
pub mod random;
