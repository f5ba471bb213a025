//! Weight update and readout rules.

use serde::{Deserialize, Serialize};

/// Learning operator applied to one field of a resonating category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningOp {
    /// `w ← (1 - β)·w + β·min(w, x)`; weights can only shrink
    FuzzyMinBlend,
    /// `w ← (1 - β)·w + β·x`
    LinearBlend,
    /// Leave the field untouched
    #[serde(rename = "none")]
    Frozen,
}

impl LearningOp {
    /// Update `weights` in place toward `activity` at the given rate.
    pub fn apply(self, weights: &mut [f64], activity: &[f64], rate: f64) {
        match self {
            LearningOp::FuzzyMinBlend => {
                for (w, &x) in weights.iter_mut().zip(activity.iter()) {
                    *w = (1.0 - rate) * *w + rate * w.min(x);
                }
            }
            LearningOp::LinearBlend => {
                for (w, &x) in weights.iter_mut().zip(activity.iter()) {
                    *w = (1.0 - rate) * *w + rate * x;
                }
            }
            LearningOp::Frozen => {}
        }
    }
}

/// How a selected category is read back into the activity buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readout {
    /// `x ← min(w, x)`: shrink the activity toward the category
    Fuzzy,
    /// `x ← w`: overwrite the activity with the category
    #[default]
    Direct,
}

impl Readout {
    pub fn apply(self, weights: &[f64], activity: &mut [f64]) {
        match self {
            Readout::Fuzzy => {
                for (x, &w) in activity.iter_mut().zip(weights.iter()) {
                    *x = w.min(*x);
                }
            }
            Readout::Direct => activity.copy_from_slice(weights),
        }
    }
}
