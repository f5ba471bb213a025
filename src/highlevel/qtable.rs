//! Discrete Q-table backend.
//!
//! Vectors are quantized by truncating every element toward zero. Each
//! quantized state owns a map from quantized action to value; a missing
//! entry is created at the neutral value 0.5 on first touch.

use super::QValueApproximator;
use crate::error::Result;
use std::collections::HashMap;

/// Value of an entry that has never been assigned.
pub const DEFAULT_VALUE: f64 = 0.5;

type Key = Vec<i64>;

/// Exact lookup table keyed by quantized (state, action) vectors.
///
/// # Example
///
/// ```rust
/// use fusion_art::highlevel::DiscreteQTable;
///
/// let mut table = DiscreteQTable::new();
/// assert_eq!(table.predict(&[1.0, 2.7], &[0.0, 1.0], -1.0), 0.5);
/// assert_eq!(table.predict(&[1.0, 2.0], &[0.0, 1.0], 0.9), 0.9);
/// assert_eq!(table.lookup(&[1.2, 2.2], &[0.0, 1.0]), Some(0.9));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiscreteQTable {
    entries: HashMap<Key, HashMap<Key, f64>>,
}

impl DiscreteQTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate every element toward zero.
    pub fn quantize(v: &[f64]) -> Vec<i64> {
        v.iter().map(|&x| x as i64).collect()
    }

    /// Look up (creating at [`DEFAULT_VALUE`] if needed) the entry for
    /// `(environment, action)`. A non-negative `reward` overwrites it; a
    /// negative one only reads. Returns the stored value.
    pub fn predict(&mut self, environment: &[f64], action: &[f64], reward: f64) -> f64 {
        let value = self
            .entries
            .entry(Self::quantize(environment))
            .or_default()
            .entry(Self::quantize(action))
            .or_insert(DEFAULT_VALUE);

        if reward >= 0.0 {
            *value = reward;
        }
        *value
    }

    /// Stored value, without creating an entry.
    pub fn lookup(&self, environment: &[f64], action: &[f64]) -> Option<f64> {
        self.entries
            .get(&Self::quantize(environment))?
            .get(&Self::quantize(action))
            .copied()
    }

    /// Overwrite the entry for `(environment, action)`.
    pub fn store(&mut self, environment: &[f64], action: &[f64], value: f64) {
        self.entries
            .entry(Self::quantize(environment))
            .or_default()
            .insert(Self::quantize(action), value);
    }

    /// Number of distinct quantized states seen.
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of (state, action) entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QValueApproximator for DiscreteQTable {
    fn predict_q_value(&mut self, state: &[f64], action: &[f64]) -> Result<f64> {
        Ok(self.predict(state, action, -1.0))
    }

    fn learn_stimulus(&mut self, prev_state: &[f64], action: &[f64], target: f64) -> Result<f64> {
        Ok(self.predict(prev_state, action, target))
    }

    fn memory_size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_truncates_toward_zero() {
        assert_eq!(DiscreteQTable::quantize(&[1.9, -1.9, 0.4]), vec![1, -1, 0]);
    }

    #[test]
    fn test_default_value_and_overwrite() {
        let mut t = DiscreteQTable::new();
        assert_eq!(t.predict(&[3.0], &[1.0], -1.0), DEFAULT_VALUE);
        assert_eq!(t.len(), 1);

        assert_eq!(t.predict(&[3.0], &[1.0], 0.0), 0.0);
        assert_eq!(t.predict(&[3.0], &[1.0], -0.5), 0.0);
    }

    #[test]
    fn test_multi_digit_keys_do_not_collide() {
        let mut t = DiscreteQTable::new();
        t.predict(&[1.0, 23.0], &[0.0], 0.1);
        t.predict(&[12.0, 3.0], &[0.0], 0.9);
        assert_eq!(t.state_count(), 2);
        assert_eq!(t.lookup(&[1.0, 23.0], &[0.0]), Some(0.1));
        assert_eq!(t.lookup(&[12.0, 3.0], &[0.0]), Some(0.9));
    }

    #[test]
    fn test_len_counts_actions_per_state() {
        let mut t = DiscreteQTable::new();
        t.store(&[0.0], &[0.0], 0.2);
        t.store(&[0.0], &[1.0], 0.3);
        t.store(&[1.0], &[0.0], 0.4);
        assert_eq!(t.state_count(), 2);
        assert_eq!(t.len(), 3);
        assert_eq!(t.memory_size(), 3);
        assert!(t.lookup(&[2.0], &[0.0]).is_none());
    }

    #[test]
    fn test_trait_calls() {
        let mut t = DiscreteQTable::new();
        assert_eq!(t.predict_q_value(&[0.0], &[1.0]).unwrap(), 0.5);
        assert_eq!(t.learn_stimulus(&[0.0], &[1.0], 0.75).unwrap(), 0.75);
        assert_eq!(t.predict_q_value(&[0.9], &[1.2]).unwrap(), 0.75);
    }
}
