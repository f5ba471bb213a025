//! Complement coding for bounded inputs.
//!
//! Fuzzy ART compares inputs with `min`, so a category built from small
//! values keeps matching anything larger. Doubling each input with its
//! complement keeps the total activity constant (`n` for an `n`-wide input)
//! and stops categories from proliferating on low-magnitude inputs.
//!
//! # Layout
//!
//! The complement half is appended **mirrored**: element `n + k` is derived
//! from element `n - 1 - k`.
//!
//! ```text
//! [v0, v1, v2]  →  [v0, v1, v2, 1-v2, 1-v1, 1-v0]
//! ```

use serde::{Deserialize, Serialize};

/// Encoding applied to an input vector before it is written to a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplementCoding {
    /// Write the vector as-is
    #[default]
    Identity,
    /// `[v, reverse(1 - v)]`
    Mirrored,
    /// `[v, reverse(v)]`: second half is a straight copy, read as a second
    /// hypothesis slot rather than a complement
    Prediction,
    /// `2n` ones; a neutral placeholder that never biases resonance
    DirectAccess,
}

impl ComplementCoding {
    /// Encode `input` according to this scheme.
    pub fn encode(self, input: &[f64]) -> Vec<f64> {
        match self {
            ComplementCoding::Identity => input.to_vec(),
            ComplementCoding::Mirrored => mirrored(input),
            ComplementCoding::Prediction => prediction(input),
            ComplementCoding::DirectAccess => direct_access(input.len()),
        }
    }

    /// Length of the encoded vector for an input of `len` elements.
    pub fn encoded_len(self, len: usize) -> usize {
        match self {
            ComplementCoding::Identity => len,
            _ => len * 2,
        }
    }
}

/// Mirrored complement coding.
pub fn mirrored(input: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(input.len() * 2);
    out.extend_from_slice(input);
    out.extend(input.iter().rev().map(|&v| 1.0 - v));
    out
}

/// Mirrored copy: the second half repeats the input in reverse.
pub fn prediction(input: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(input.len() * 2);
    out.extend_from_slice(input);
    out.extend(input.iter().rev());
    out
}

/// All-ones placeholder of width `2 * len`.
pub fn direct_access(len: usize) -> Vec<f64> {
    vec![1.0; len * 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_binary() {
        assert_eq!(mirrored(&[1.0, 0.0]), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_mirrored_reverses_complement() {
        let out = mirrored(&[0.2, 0.5, 0.9]);
        let expected = [0.2, 0.5, 0.9, 0.1, 0.5, 0.8];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_mirrored_truncation_recovers_input() {
        let v = [0.13, 0.0, 1.0, 0.77];
        let out = mirrored(&v);
        assert_eq!(&out[..v.len()], &v);
    }

    #[test]
    fn test_mirrored_constant_mass() {
        let v = [0.1, 0.4, 0.6];
        let sum: f64 = mirrored(&v).iter().sum();
        assert!((sum - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_prediction_copies() {
        assert_eq!(prediction(&[0.3, 0.7]), vec![0.3, 0.7, 0.7, 0.3]);
    }

    #[test]
    fn test_direct_access() {
        assert_eq!(
            ComplementCoding::DirectAccess.encode(&[0.0]),
            vec![1.0, 1.0]
        );
        assert_eq!(direct_access(3).len(), 6);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(ComplementCoding::Identity.encoded_len(4), 4);
        assert_eq!(ComplementCoding::Mirrored.encoded_len(4), 8);
        assert_eq!(ComplementCoding::DirectAccess.encoded_len(1), 2);
    }
}
