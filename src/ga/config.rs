//! Population configuration.
//!
//! [`PopulationConfig`] holds every parameter of the genetic operators:
//! rates, crosspoint ranges, value range, chromosome shape and seeding.

use super::types::GeneValue;

/// Bounds on the randomized shape of a new chromosome.
///
/// Lengths count values. A chromosome is built by appending sub-genes of
/// size `min_sub_len..=max_sub_len` until its length reaches a target drawn
/// from `min_len..=max_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeBounds {
    pub min_len: usize,
    pub max_len: usize,
    pub min_sub_len: usize,
    pub max_sub_len: usize,
}

impl ShapeBounds {
    /// Every chromosome gets exactly `len` values in sub-genes of exactly
    /// `sub_len` values (the last one may overshoot).
    pub fn fixed(len: usize, sub_len: usize) -> Self {
        Self {
            min_len: len,
            max_len: len,
            min_sub_len: sub_len,
            max_sub_len: sub_len,
        }
    }

    /// Whether every sub-gene has the same size.
    pub fn has_fixed_sub_genes(&self) -> bool {
        self.min_sub_len == self.max_sub_len
    }
}

impl Default for ShapeBounds {
    fn default() -> Self {
        Self::fixed(1, 1)
    }
}

/// Range of admissible crosspoints, in percent of a parent's sub-genes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossRange {
    pub min: f64,
    pub max: f64,
}

impl CrossRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: min.clamp(0.0, 100.0),
            max: max.clamp(0.0, 100.0),
        }
    }

    /// Inclusive range of sub-gene crosspoints for a parent with
    /// `sub_genes` sub-genes.
    ///
    /// Percentages apply to `sub_genes - 1` and are rounded to the nearest
    /// boundary, so `0%` maps to the first boundary and `100%` to the last.
    ///
    /// Rounding, not flooring: 50% of two sub-genes is crosspoint 1, and
    /// 50% of four sub-genes is crosspoint 2 where a floor would give 1.
    pub fn bounds(&self, sub_genes: usize) -> (usize, usize) {
        let span = sub_genes.saturating_sub(1) as f64;
        let lo = (span * self.min / 100.0).round() as usize;
        let hi = (span * self.max / 100.0).round() as usize;
        (lo, hi.max(lo))
    }
}

impl Default for CrossRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// Configuration of a [`Population`](super::Population).
///
/// # Builder Pattern
///
/// ```
/// use gensolver::ga::{PopulationConfig, ShapeBounds};
///
/// let config = PopulationConfig::new(50, -1.0, 1.0)
///     .with_shape(ShapeBounds::fixed(12, 2))
///     .with_mutation_rate(0.02)
///     .with_crossover_rate(0.8)
///     .with_equal_cross_points(true)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.generation_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationConfig<T> {
    /// Number of chromosomes per generation. Must be even: parents are
    /// paired and every pair produces two children.
    pub generation_size: usize,

    /// Per-value probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability that a parent pair is recombined (0.0–1.0).
    ///
    /// Otherwise the children are exact copies of the parents.
    pub crossover_rate: f64,

    /// Use the first parent's crosspoint for the second parent too.
    ///
    /// Requires fixed sub-gene sizes (`shape.min_sub_len ==
    /// shape.max_sub_len`); with equal sizes the children keep the parents'
    /// length.
    pub equal_cross_points: bool,

    /// Crosspoint ranges for the first and the second parent.
    pub cross_ranges: [CrossRange; 2],

    /// Allow the same chromosome to be both parents.
    pub clone_parents: bool,

    /// Random seed. `None` draws one at construction time.
    pub seed: Option<u64>,

    /// Lower bound of random values (inclusive).
    pub min_value: T,

    /// Upper bound of random values (inclusive).
    pub max_value: T,

    /// Shape of freshly initialized chromosomes.
    pub shape: ShapeBounds,
}

impl<T: GeneValue> PopulationConfig<T> {
    /// Creates a configuration with default rates.
    ///
    /// - mutation rate 0.05, crossover rate 0.7
    /// - crosspoints anywhere (`0..=100%`) for both parents
    /// - independent crosspoints, parent cloning allowed
    /// - one value per chromosome, random seed
    pub fn new(generation_size: usize, min_value: T, max_value: T) -> Self {
        Self {
            generation_size,
            mutation_rate: 0.05,
            crossover_rate: 0.7,
            equal_cross_points: false,
            cross_ranges: [CrossRange::default(); 2],
            clone_parents: true,
            seed: None,
            min_value,
            max_value,
            shape: ShapeBounds::default(),
        }
    }

    pub fn with_generation_size(mut self, n: usize) -> Self {
        self.generation_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_equal_cross_points(mut self, equal: bool) -> Self {
        self.equal_cross_points = equal;
        self
    }

    /// Sets the crosspoint range of one parent (`parent` is 0 or 1).
    pub fn with_cross_range(mut self, parent: usize, min: f64, max: f64) -> Self {
        assert!(parent < 2, "parent index must be 0 or 1, got {parent}");
        self.cross_ranges[parent] = CrossRange::new(min, max);
        self
    }

    /// Sets the same crosspoint range for both parents.
    pub fn with_cross_ranges(mut self, min: f64, max: f64) -> Self {
        self.cross_ranges = [CrossRange::new(min, max); 2];
        self
    }

    pub fn with_clone_parents(mut self, allow: bool) -> Self {
        self.clone_parents = allow;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seeds from a fresh random value instead of a fixed seed.
    pub fn with_real_random(mut self) -> Self {
        self.seed = None;
        self
    }

    pub fn with_value_range(mut self, min: T, max: T) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn with_shape(mut self, shape: ShapeBounds) -> Self {
        self.shape = shape;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.generation_size < 2 {
            return Err("generation_size must be at least 2".into());
        }
        if self.generation_size % 2 != 0 {
            return Err("generation_size must be even".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be within [0, 1]".into());
        }
        if self.min_value > self.max_value {
            return Err(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            ));
        }
        let shape = &self.shape;
        if shape.min_len == 0 {
            return Err("shape.min_len must be at least 1".into());
        }
        if shape.min_len > shape.max_len {
            return Err("shape.min_len exceeds shape.max_len".into());
        }
        if shape.min_sub_len == 0 {
            return Err("shape.min_sub_len must be at least 1".into());
        }
        if shape.min_sub_len > shape.max_sub_len {
            return Err("shape.min_sub_len exceeds shape.max_sub_len".into());
        }
        if self.equal_cross_points && !shape.has_fixed_sub_genes() {
            return Err("equal_cross_points requires fixed sub-gene sizes".into());
        }
        for (i, range) in self.cross_ranges.iter().enumerate() {
            if !(0.0..=100.0).contains(&range.min) || !(0.0..=100.0).contains(&range.max) {
                return Err(format!("cross_ranges[{i}] must be within [0, 100]"));
            }
            if range.min > range.max {
                return Err(format!("cross_ranges[{i}].min exceeds max"));
            }
        }
        Ok(())
    }
}
