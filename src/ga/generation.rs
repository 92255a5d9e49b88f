//! Fixed-size set of chromosomes.
//!
//! A [`Generation`] owns its chromosomes. Its size never changes after
//! construction; the engine only rewrites chromosome contents. `Clone`
//! duplicates every chromosome.

use super::chromosome::Chromosome;
use super::config::ShapeBounds;
use super::format::{self, FormatError, GenerationFile};
use super::types::GeneValue;
use crate::random::RandomSource;
use std::io::{self, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

/// A fixed-size, ordered collection of chromosomes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation<T> {
    chromosomes: Vec<Chromosome<T>>,
}

impl<T: GeneValue> Generation<T> {
    /// Creates `size` empty chromosomes.
    pub fn new(size: usize) -> Self {
        Self {
            chromosomes: (0..size).map(|_| Chromosome::new()).collect(),
        }
    }

    /// Wraps existing chromosomes.
    pub fn from_chromosomes(chromosomes: Vec<Chromosome<T>>) -> Self {
        Self { chromosomes }
    }

    /// Randomizes every chromosome with the same bounds. Each chromosome
    /// draws its own shape.
    pub fn initialize_chromosomes(
        &mut self,
        shape: &ShapeBounds,
        min_value: T,
        max_value: T,
        rng: &mut RandomSource,
    ) {
        for chromosome in &mut self.chromosomes {
            chromosome.initialize(shape, min_value, max_value, rng);
        }
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Number of values in chromosome `index`.
    pub fn size_of_chromosome(&self, index: usize) -> usize {
        self[index].len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome<T>> {
        self.chromosomes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Chromosome<T>> {
        self.chromosomes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Chromosome<T>] {
        &self.chromosomes
    }

    /// Mutable access to the adjacent slots `index` and `index + 1`.
    ///
    /// # Panics
    /// Panics if `index + 1` is out of range.
    pub fn pair_mut(&mut self, index: usize) -> (&mut Chromosome<T>, &mut Chromosome<T>) {
        assert!(
            index + 1 < self.chromosomes.len(),
            "pair ({index}, {}) out of range for generation of size {}",
            index + 1,
            self.chromosomes.len()
        );
        let (head, tail) = self.chromosomes.split_at_mut(index + 1);
        (&mut head[index], &mut tail[0])
    }

    /// Sum of all fitness values.
    pub fn total_fitness(&self) -> f64 {
        self.chromosomes.iter().map(Chromosome::fitness).sum()
    }

    /// Mean fitness, or 0 for an empty generation.
    pub fn mean_fitness(&self) -> f64 {
        if self.chromosomes.is_empty() {
            0.0
        } else {
            self.total_fitness() / self.chromosomes.len() as f64
        }
    }

    /// Chromosome with the highest fitness. Ties go to the lowest index.
    pub fn best(&self) -> Option<&Chromosome<T>> {
        self.chromosomes.iter().reduce(|best, c| {
            if c.fitness() > best.fitness() {
                c
            } else {
                best
            }
        })
    }

    /// Sets every fitness back to 0.
    pub fn reset_fitness(&mut self) {
        for chromosome in &mut self.chromosomes {
            chromosome.set_fitness(0.0);
        }
    }

    /// Writes one line per chromosome with its values and fitness.
    ///
    /// With `min_fitness`, only chromosomes whose fitness is at least that
    /// value are written.
    pub fn write_values<W: Write>(&self, mut out: W, min_fitness: Option<f64>) -> io::Result<()> {
        for (i, chromosome) in self.filtered(min_fitness) {
            writeln!(out, "#{i}: {chromosome}")?;
        }
        Ok(())
    }

    /// Writes one line per chromosome with its sub-gene sizes and fitness.
    pub fn write_sizes<W: Write>(&self, mut out: W, min_fitness: Option<f64>) -> io::Result<()> {
        for (i, chromosome) in self.filtered(min_fitness) {
            write!(out, "#{i}: len={} sizes=", chromosome.len())?;
            for (k, size) in chromosome.sub_gene_sizes().iter().enumerate() {
                if k > 0 {
                    write!(out, ",")?;
                }
                write!(out, "{size}")?;
            }
            writeln!(out, " fitness={}", chromosome.fitness())?;
        }
        Ok(())
    }

    fn filtered(
        &self,
        min_fitness: Option<f64>,
    ) -> impl Iterator<Item = (usize, &Chromosome<T>)> + '_ {
        self.chromosomes
            .iter()
            .enumerate()
            .filter(move |(_, c)| min_fitness.map_or(true, |min| c.fitness() >= min))
    }

    /// Reads and checks a generation file.
    ///
    /// See [`format::load_generation`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GenerationFile, FormatError> {
        format::load_generation(path)
    }
}

impl<T> Index<usize> for Generation<T> {
    type Output = Chromosome<T>;

    fn index(&self, index: usize) -> &Chromosome<T> {
        assert!(
            index < self.chromosomes.len(),
            "chromosome index {index} out of range for generation of size {}",
            self.chromosomes.len()
        );
        &self.chromosomes[index]
    }
}

impl<T> IndexMut<usize> for Generation<T> {
    fn index_mut(&mut self, index: usize) -> &mut Chromosome<T> {
        assert!(
            index < self.chromosomes.len(),
            "chromosome index {index} out of range for generation of size {}",
            self.chromosomes.len()
        );
        &mut self.chromosomes[index]
    }
}

impl<'a, T> IntoIterator for &'a Generation<T> {
    type Item = &'a Chromosome<T>;
    type IntoIter = std::slice::Iter<'a, Chromosome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
