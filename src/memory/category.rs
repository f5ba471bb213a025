//! Category: one learned prototype.

/// A learned prototype: one weight vector per field plus a confidence.
///
/// A freshly created category has every weight at 1.0, the maximally
/// general state that any bounded input resonates with.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    weights: Vec<Vec<f64>>,
    confidence: f64,
}

impl Category {
    /// An uncommitted category sized for the given field widths.
    pub fn uncommitted(sizes: &[usize]) -> Self {
        Self {
            weights: sizes.iter().map(|&n| vec![1.0; n]).collect(),
            confidence: 1.0,
        }
    }

    /// Weights of one field.
    pub fn field(&self, field: usize) -> &[f64] {
        &self.weights[field]
    }

    pub fn field_mut(&mut self, field: usize) -> &mut [f64] {
        &mut self.weights[field]
    }

    /// All fields, in schema order.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub(crate) fn set_confidence(&mut self, confidence: f64) {
        self.confidence = confidence;
    }

    /// Whether a two-valued field holds a saturated boundary outcome,
    /// exactly `[1, 0]` or `[0, 1]`.
    pub fn is_saturated(&self, field: usize) -> bool {
        matches!(self.weights[field].as_slice(), [a, b]
            if (*a == 1.0 && *b == 0.0) || (*a == 0.0 && *b == 1.0))
    }

    /// Copy `activity` over every field.
    pub fn overwrite(&mut self, activity: &[Vec<f64>]) {
        for (w, x) in self.weights.iter_mut().zip(activity.iter()) {
            w.copy_from_slice(x);
        }
    }
}
