//! Neuro-evolution adapter.
//!
//! Evolves the connection weights of a network: every chromosome of a
//! `f64` generation is loaded into the network as its weight vector, the
//! network is reset, and a user routine scores it. The network itself is
//! opaque behind [`WeightedNetwork`].

use super::chromosome::Chromosome;
use super::config::ShapeBounds;
use super::generation::Generation;
use super::types::{Evaluator, SolveControl};

/// A network whose behaviour is defined by a flat weight vector.
pub trait WeightedNetwork {
    /// Number of weights the network expects.
    fn connection_count(&self) -> usize;

    /// Replaces all weights. `weights.len()` equals
    /// [`connection_count`](Self::connection_count).
    fn set_weights(&mut self, weights: &[f64]);

    /// Clears internal state (activations, memory) before an evaluation.
    fn reset(&mut self);
}

/// Chromosome shape matching `network`: one value per connection, one
/// value per sub-gene.
pub fn network_shape<N: WeightedNetwork>(network: &N) -> ShapeBounds {
    ShapeBounds::fixed(network.connection_count(), 1)
}

/// Scores every chromosome by running it as the weights of a network.
///
/// The scoring routine receives the prepared network, the index of the
/// chromosome within its generation and the [`SolveControl`]. Once it
/// signals a solution, the remaining chromosomes of that generation are not
/// evaluated and keep fitness 0.
pub struct NetworkEvaluator<N, F> {
    network: N,
    score: F,
}

impl<N, F> NetworkEvaluator<N, F>
where
    N: WeightedNetwork,
    F: FnMut(&mut N, usize, &mut SolveControl) -> f64,
{
    pub fn new(network: N, score: F) -> Self {
        Self { network, score }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn into_network(self) -> N {
        self.network
    }

    /// Loads `chromosome` into the network and resets it.
    pub fn load(&mut self, chromosome: &Chromosome<f64>) {
        assert_eq!(
            chromosome.len(),
            self.network.connection_count(),
            "chromosome length must match the network's connection count"
        );
        self.network.set_weights(chromosome.values());
        self.network.reset();
    }
}

impl<N, F> Evaluator<f64> for NetworkEvaluator<N, F>
where
    N: WeightedNetwork,
    F: FnMut(&mut N, usize, &mut SolveControl) -> f64,
{
    fn assign_fitness(&mut self, generation: &mut Generation<f64>, control: &mut SolveControl) {
        generation.reset_fitness();
        for (i, chromosome) in generation.iter_mut().enumerate() {
            self.load(chromosome);
            let fitness = (self.score)(&mut self.network, i, control);
            chromosome.set_fitness(fitness);
            if control.is_solution_found() {
                log::debug!("network solution at chromosome {i}");
                break;
            }
        }
    }
}
