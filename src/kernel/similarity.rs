//! Similarity operators for category choice.
//!
//! Every operator produces two numbers for one field of one category:
//!
//! - a **contribution** to the category's composite temperature
//!   (`score * gamma`), used to rank candidates, and
//! - an **overlap** (the fuzzy-AND numerator `sum(min(w, x))`), which the
//!   vigilance check later divides by the activity sum.
//!
//! Both come out of the same pass over the weights.

use serde::{Deserialize, Serialize};

/// Floor substituted for scores that evaluate to NaN.
pub const NAN_FLOOR: f64 = 1e-5;

/// Available similarity operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Fuzzy ART choice: |w ∧ x| / (alpha + |w|)
    FuzzyMin,
    /// Cosine-style choice: w·x / (alpha + ‖w‖‖x‖)
    FuzzyCosine,
    /// Inverse L1 distance: 1 / (alpha + Σ|w - x|)
    Proximity,
    /// 1 when every element matches exactly, else 0
    Exact,
}

/// Per-field result of a similarity computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldScore {
    /// Gamma-weighted score added to the composite temperature
    pub contribution: f64,
    /// Numerator consumed by the vigilance match
    pub overlap: f64,
}

/// Similarity computation between a category's weights and the activity.
pub struct Similarity;

impl Similarity {
    /// Compute one field's score using the specified metric.
    pub fn compute(
        weights: &[f64],
        activity: &[f64],
        metric: Metric,
        alpha: f64,
        gamma: f64,
    ) -> FieldScore {
        debug_assert_eq!(
            weights.len(),
            activity.len(),
            "Dimension mismatch in similarity"
        );

        let (score, overlap) = match metric {
            Metric::FuzzyMin => Self::fuzzy_min(weights, activity, alpha),
            Metric::FuzzyCosine => Self::fuzzy_cosine(weights, activity, alpha),
            Metric::Proximity => Self::proximity(weights, activity, alpha),
            Metric::Exact => Self::exact(weights, activity),
        };

        FieldScore {
            contribution: clamp_nan(clamp_nan(score) * gamma),
            overlap,
        }
    }

    /// Fuzzy ART choice function.
    ///
    /// Returns `(score, overlap)` where `overlap = Σ min(w, x)` and
    /// `score = overlap / (alpha + Σ w)`.
    pub fn fuzzy_min(weights: &[f64], activity: &[f64], alpha: f64) -> (f64, f64) {
        let mut overlap = 0.0;
        let mut w_sum = 0.0;
        for (&w, &x) in weights.iter().zip(activity.iter()) {
            overlap += w.min(x);
            w_sum += w;
        }

        (overlap / (alpha + w_sum), overlap)
    }

    /// Cosine-style choice function.
    ///
    /// The overlap keeps the fuzzy-AND convention so vigilance matching is
    /// identical across metrics.
    pub fn fuzzy_cosine(weights: &[f64], activity: &[f64], alpha: f64) -> (f64, f64) {
        let mut overlap = 0.0;
        let mut dot = 0.0;
        let mut w_len = 0.0;
        let mut x_len = 0.0;
        for (&w, &x) in weights.iter().zip(activity.iter()) {
            overlap += w.min(x);
            dot += w * x;
            w_len += w * w;
            x_len += x * x;
        }

        (dot / (alpha + w_len.sqrt() * x_len.sqrt()), overlap)
    }

    /// Inverse Manhattan distance.
    ///
    /// Returns 1 / (alpha + distance) so higher values mean closer.
    pub fn proximity(weights: &[f64], activity: &[f64], alpha: f64) -> (f64, f64) {
        let mut overlap = 0.0;
        let mut distance = 0.0;
        for (&w, &x) in weights.iter().zip(activity.iter()) {
            overlap += w.min(x);
            distance += (w - x).abs();
        }

        (1.0 / (alpha + distance), overlap)
    }

    /// Element-by-element equality.
    ///
    /// Both the score and the overlap are 1.0 on an exact match, 0.0 otherwise.
    pub fn exact(weights: &[f64], activity: &[f64]) -> (f64, f64) {
        let matched = weights
            .iter()
            .zip(activity.iter())
            .all(|(&w, &x)| w == x);

        if matched {
            (1.0, 1.0)
        } else {
            (0.0, 0.0)
        }
    }

    /// Vigilance match factor: `overlap / activity_sum`.
    ///
    /// Returns `None` when the ratio is undefined (zero or non-finite
    /// activity sum); callers treat that as a vigilance failure.
    pub fn match_factor(overlap: f64, activity_sum: f64) -> Option<f64> {
        if activity_sum == 0.0 || !activity_sum.is_finite() {
            return None;
        }
        let m = overlap / activity_sum;
        if m.is_nan() {
            None
        } else {
            Some(m)
        }
    }
}

#[inline]
fn clamp_nan(v: f64) -> f64 {
    if v.is_nan() {
        NAN_FLOOR
    } else {
        v
    }
}
