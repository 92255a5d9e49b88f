//! Variable-structure chromosome.
//!
//! A [`Chromosome`] is a flat sequence of values partitioned into
//! contiguous *sub-genes*. Two consecutive sub-genes form one *gene*.
//! The partition is the structure that crossover preserves: crosspoints
//! only ever fall on sub-gene boundaries.

use super::config::ShapeBounds;
use super::types::GeneValue;
use crate::random::RandomSource;
use std::fmt;

/// One candidate solution.
///
/// Invariant: `sub_gene_sizes.iter().sum() == values.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome<T> {
    values: Vec<T>,
    sub_gene_sizes: Vec<usize>,
    fitness: f64,
}

impl<T: GeneValue> Chromosome<T> {
    /// Creates an empty chromosome with fitness 0.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            sub_gene_sizes: Vec::new(),
            fitness: 0.0,
        }
    }

    /// Builds a chromosome from explicit values and sub-gene sizes.
    ///
    /// # Panics
    /// Panics if the sizes do not partition `values` exactly.
    pub fn from_parts(values: Vec<T>, sub_gene_sizes: Vec<usize>) -> Self {
        assert_eq!(
            sub_gene_sizes.iter().sum::<usize>(),
            values.len(),
            "sub-gene sizes must sum to the number of values"
        );
        Self {
            values,
            sub_gene_sizes,
            fitness: 0.0,
        }
    }

    /// Randomizes shape and contents.
    ///
    /// Draws a target length in `[min_len, max_len]`, then appends sub-genes
    /// of random size in `[min_sub_len, max_sub_len]` until the total reaches
    /// the target. The last sub-gene may overshoot the target; it is kept
    /// whole. Finally every position gets a fresh value in
    /// `[min_value, max_value]`.
    pub fn initialize(
        &mut self,
        shape: &ShapeBounds,
        min_value: T,
        max_value: T,
        rng: &mut RandomSource,
    ) {
        assert!(
            shape.min_sub_len >= 1,
            "sub-gene sizes must be positive"
        );
        let target = rng.uniform_usize(shape.min_len, shape.max_len);

        self.sub_gene_sizes.clear();
        let mut total = 0;
        while total < target {
            let size = rng.uniform_usize(shape.min_sub_len, shape.max_sub_len);
            self.sub_gene_sizes.push(size);
            total += size;
        }

        self.values.clear();
        self.values
            .extend((0..total).map(|_| rng.value(min_value, max_value)));
        self.fitness = 0.0;
    }

    /// Value at position `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn get(&self, i: usize) -> T {
        assert!(
            i < self.values.len(),
            "value index {i} out of range for chromosome of length {}",
            self.values.len()
        );
        self.values[i]
    }

    /// Overwrites the value at position `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn set(&mut self, i: usize, value: T) {
        assert!(
            i < self.values.len(),
            "value index {i} out of range for chromosome of length {}",
            self.values.len()
        );
        self.values[i] = value;
    }

    /// Replaces position `i` with a fresh draw in `[min_value, max_value]`.
    ///
    /// The sub-gene partition is untouched.
    pub fn mutate(&mut self, i: usize, min_value: T, max_value: T, rng: &mut RandomSource) {
        let value = rng.value(min_value, max_value);
        self.set(i, value);
    }

    /// All values, in order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Sizes of the sub-genes, in order.
    pub fn sub_gene_sizes(&self) -> &[usize] {
        &self.sub_gene_sizes
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn number_of_sub_genes(&self) -> usize {
        self.sub_gene_sizes.len()
    }

    /// Number of complete sub-gene pairs. A trailing odd sub-gene is not
    /// part of any gene.
    pub fn number_of_genes(&self) -> usize {
        self.sub_gene_sizes.len() / 2
    }

    /// Flat value index at which sub-gene `index` starts.
    ///
    /// `index == number_of_sub_genes()` yields `len()`.
    ///
    /// # Panics
    /// Panics if `index > number_of_sub_genes()`.
    pub fn sub_gene_offset(&self, index: usize) -> usize {
        assert!(
            index <= self.sub_gene_sizes.len(),
            "sub-gene index {index} out of range for {} sub-genes",
            self.sub_gene_sizes.len()
        );
        self.sub_gene_sizes[..index].iter().sum()
    }

    /// Values of sub-gene `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn sub_gene(&self, index: usize) -> &[T] {
        assert!(
            index < self.sub_gene_sizes.len(),
            "sub-gene index {index} out of range for {} sub-genes",
            self.sub_gene_sizes.len()
        );
        let start = self.sub_gene_offset(index);
        &self.values[start..start + self.sub_gene_sizes[index]]
    }

    /// Flat sub-gene index for sub-gene `sub` (0 or 1) of gene `gene`.
    pub fn sub_gene_index(gene: usize, sub: usize) -> usize {
        assert!(sub < 2, "a gene has two sub-genes, got sub index {sub}");
        match gene {
            0 => sub,
            k => 2 * k + sub,
        }
    }

    /// Values of sub-gene `sub` (0 or 1) of gene `gene`.
    pub fn gene_sub_gene(&self, gene: usize, sub: usize) -> &[T] {
        self.sub_gene(Self::sub_gene_index(gene, sub))
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Replaces contents with `prefix` of one parent followed by `suffix` of
    /// another. Fitness is reset.
    pub(crate) fn assign_spliced(
        &mut self,
        head: &Chromosome<T>,
        head_cross: (usize, usize),
        tail: &Chromosome<T>,
        tail_cross: (usize, usize),
    ) {
        let (head_sub, head_real) = head_cross;
        let (tail_sub, tail_real) = tail_cross;

        self.values.clear();
        self.values.extend_from_slice(&head.values[..head_real]);
        self.values.extend_from_slice(&tail.values[tail_real..]);

        self.sub_gene_sizes.clear();
        self.sub_gene_sizes
            .extend_from_slice(&head.sub_gene_sizes[..head_sub]);
        self.sub_gene_sizes
            .extend_from_slice(&tail.sub_gene_sizes[tail_sub..]);

        self.fitness = 0.0;
    }

    /// Checks the partition invariant.
    pub fn is_consistent(&self) -> bool {
        self.sub_gene_sizes.iter().sum::<usize>() == self.values.len()
    }
}

impl<T: GeneValue> fmt::Display for Chromosome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, size) in self.sub_gene_sizes.iter().enumerate() {
            if i > 0 {
                write!(f, " |")?;
            }
            let start = self.sub_gene_sizes[..i].iter().sum::<usize>();
            for v in &self.values[start..start + size] {
                write!(f, " {v}")?;
            }
        }
        write!(f, " ] fitness={}", self.fitness)
    }
}
