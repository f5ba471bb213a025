//! Resonance search: choosing the category that answers an input.
//!
//! # Algorithm
//!
//! 1. **Scoring**: every committed category gets a composite temperature,
//!    the sum of its active fields' gamma-weighted choice scores. The
//!    fuzzy-AND overlap of each field is recorded in the same pass. The
//!    uncommitted category is pinned at temperature 0.
//! 2. **Ordering**: candidates are sorted by descending temperature. The
//!    sort is stable, so ties keep index order and the uncommitted category
//!    stays behind every committed category at 0.
//! 3. **Matching**: candidates are visited in order. A category resonates
//!    when, on every active field, `overlap / Σ activity` reaches that
//!    field's vigilance. An undefined ratio (zero activity) fails.
//! 4. **Fallback**: reaching the uncommitted category selects it without a
//!    check; it has not specialised yet and accepts any input.
//!
//! Vigilances are snapshotted once per search from the learning or the
//! performing column of the schema.
//!
//! # Adaptive mode
//!
//! [`SearchMode::Adaptive`] adds two reactions to a failed candidate:
//!
//! - if its STATE fields equal the activity exactly the search stops with
//!   [`Resolution::PerfectMismatch`] (same situation, different outcome);
//! - otherwise fields with `vigilance_raising` whose match beat the current
//!   vigilance have it raised to `min(match + rate, 1.0)` for the rest of
//!   the search.

use crate::kernel::Similarity;
use crate::memory::{Category, CategoryStore};
use crate::schema::{FieldRole, FieldSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Which search path a step runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Fixed vigilances, no mismatch detection
    #[default]
    Standard,
    /// Vigilance raising plus perfect-mismatch detection
    Adaptive,
}

/// How the selected category was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A committed category met every vigilance
    Resonated,
    /// Nothing resonated; the uncommitted category was taken
    Uncommitted,
    /// Adaptive mode found a category whose state matches exactly but which
    /// failed vigilance elsewhere
    PerfectMismatch,
}

/// Outcome of one resonance search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub resolution: Resolution,
    /// Composite temperature of the selected category
    pub temperature: f64,
}

/// A candidate's index and composite temperature, valid for one search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryTemperature {
    pub index: usize,
    pub temperature: f64,
}

/// One search over a category store against a fixed activity.
pub struct ResonanceSearch<'a> {
    fields: &'a [FieldSpec],
    activity: &'a [Vec<f64>],
    activity_sums: Vec<f64>,
}

impl<'a> ResonanceSearch<'a> {
    pub fn new(fields: &'a [FieldSpec], activity: &'a [Vec<f64>]) -> Self {
        let activity_sums = activity.iter().map(|x| x.iter().sum()).collect();
        Self {
            fields,
            activity,
            activity_sums,
        }
    }

    /// Composite temperature of `category` and its per-field overlaps.
    ///
    /// Inactive fields contribute nothing and keep an overlap of 0.
    pub fn score(&self, category: &Category) -> (f64, Vec<f64>) {
        let mut overlaps = vec![0.0; self.fields.len()];
        let mut temperature = 0.0;

        for (i, field) in self.fields.iter().enumerate() {
            if !field.active {
                continue;
            }
            let s = Similarity::compute(
                category.field(i),
                &self.activity[i],
                field.similarity,
                field.alpha,
                field.gamma,
            );
            temperature += s.contribution;
            overlaps[i] = s.overlap;
        }

        if temperature.is_nan() {
            temperature = crate::kernel::NAN_FLOOR;
        }
        (temperature, overlaps)
    }

    /// Match factor of one field, `None` when undefined.
    pub fn match_factor(&self, field: usize, overlap: f64) -> Option<f64> {
        Similarity::match_factor(overlap, self.activity_sums[field])
    }

    /// Whether every active field meets its vigilance.
    pub fn is_resonating(&self, overlaps: &[f64], vigilances: &[f64]) -> bool {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.active)
            .all(|(i, _)| match self.match_factor(i, overlaps[i]) {
                Some(m) => m >= vigilances[i],
                None => false,
            })
    }

    /// Whether every STATE field of `category` equals the activity exactly.
    ///
    /// A schema without STATE fields never reports a perfect mismatch.
    pub fn is_perfect_mismatch(&self, category: &Category) -> bool {
        let mut states = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.role == FieldRole::State)
            .peekable();

        if states.peek().is_none() {
            return false;
        }
        states.all(|(i, _)| category.field(i) == self.activity[i].as_slice())
    }

    /// Rank committed categories by descending temperature, with the
    /// uncommitted category pinned at 0. Also returns every committed
    /// category's overlaps, indexed by category.
    pub fn rank(&self, store: &CategoryStore) -> (Vec<CategoryTemperature>, Vec<Vec<f64>>) {
        let mut ranking = Vec::with_capacity(store.len());
        let mut overlaps = Vec::with_capacity(store.len());

        for (index, category) in store.committed().iter().enumerate() {
            let (temperature, o) = self.score(category);
            ranking.push(CategoryTemperature { index, temperature });
            overlaps.push(o);
        }
        ranking.push(CategoryTemperature {
            index: store.uncommitted_index(),
            temperature: 0.0,
        });

        ranking.sort_by(|a, b| b.temperature.total_cmp(&a.temperature));
        (ranking, overlaps)
    }

    /// Run the search and return the selected category.
    pub fn run(
        &self,
        store: &CategoryStore,
        learning: bool,
        mode: SearchMode,
        raise_rate: f64,
    ) -> Selection {
        let mut vigilances: Vec<f64> = self
            .fields
            .iter()
            .map(|f| f.vigilance(learning))
            .collect();

        let (ranking, overlaps) = self.rank(store);
        trace!(
            candidates = ranking.len(),
            learning,
            ?mode,
            ?vigilances,
            "resonance search"
        );

        for candidate in &ranking {
            if store.is_uncommitted(candidate.index) {
                break;
            }

            let o = &overlaps[candidate.index];
            if self.is_resonating(o, &vigilances) {
                return Selection {
                    index: candidate.index,
                    resolution: Resolution::Resonated,
                    temperature: candidate.temperature,
                };
            }

            if mode == SearchMode::Adaptive {
                let category = &store.committed()[candidate.index];
                if self.is_perfect_mismatch(category) {
                    return Selection {
                        index: candidate.index,
                        resolution: Resolution::PerfectMismatch,
                        temperature: candidate.temperature,
                    };
                }
                self.raise_vigilances(o, &mut vigilances, raise_rate);
            }
        }

        Selection {
            index: store.uncommitted_index(),
            resolution: Resolution::Uncommitted,
            temperature: 0.0,
        }
    }

    fn raise_vigilances(&self, overlaps: &[f64], vigilances: &mut [f64], rate: f64) {
        for (i, field) in self.fields.iter().enumerate() {
            if !field.vigilance_raising || !field.active {
                continue;
            }
            if let Some(m) = self.match_factor(i, overlaps[i]) {
                if m > vigilances[i] {
                    let raised = (m + rate).min(1.0);
                    debug!(field = i, from = vigilances[i], to = raised, "raising vigilance");
                    vigilances[i] = raised;
                }
            }
        }
    }
}
