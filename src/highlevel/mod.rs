//! High-level value estimation API.
//!
//! A reinforcement-learning control loop only needs two calls per decision:
//! estimate the value of a (state, action) pair, and learn a target value
//! for one. [`QValueApproximator`] is that contract. Two backends implement
//! it and can be swapped without touching the loop:
//!
//! - [`ArtQApproximator`]: a three-field [`ResonanceNetwork`](crate::ResonanceNetwork)
//!   (state, action, reward) that generalises across similar states.
//! - [`DiscreteQTable`]: an exact lookup table over quantized vectors.
//!
//! For direct control over fields and steps, use the
//! [`network`](crate::network) layer instead.

pub mod approximator;
pub mod qtable;

pub use approximator::ArtQApproximator;
pub use qtable::DiscreteQTable;

use crate::error::Result;

/// Predict and learn a scalar value for a (state, action) pair.
pub trait QValueApproximator {
    /// Estimated value of taking `action` in `state`. Does not learn.
    fn predict_q_value(&mut self, state: &[f64], action: &[f64]) -> Result<f64>;

    /// Associate `target` with taking `action` in `prev_state`. Returns the
    /// value the backend holds after learning.
    fn learn_stimulus(&mut self, prev_state: &[f64], action: &[f64], target: f64) -> Result<f64>;

    /// Number of stored associations.
    fn memory_size(&self) -> usize;
}
