//! The resonance network: activity buffers plus a category store.
//!
//! One decision step looks like this:
//!
//! 1. the caller writes every field with [`ResonanceNetwork::set_input`];
//! 2. [`ResonanceNetwork::step`] copies the inputs into the working activity
//!    and runs a resonance search;
//! 3. a learning step updates (or creates) the selected category, a
//!    performing step reads it back into the activity;
//! 4. the caller reads results with [`ResonanceNetwork::read_field`].
//!
//! Only category weights, confidences and the last selected index survive
//! from one step to the next.

use crate::error::{ArtError, Result};
use crate::kernel::ComplementCoding;
use crate::memory::{Category, CategoryStore};
use crate::resonance::{ResonanceSearch, Resolution, SearchMode, Selection};
use crate::schema::{ConfidenceParams, FieldRole, NetworkConfig};
use tracing::{debug, trace};

/// Online multi-field fuzzy ART network.
///
/// # Example
///
/// ```rust
/// use fusion_art::{FieldRole, FieldSpec, NetworkConfig, ResonanceNetwork};
///
/// let config = NetworkConfig::new(vec![
///     FieldSpec::new(4, FieldRole::State).with_vigilance(0.9, 0.0),
/// ]);
/// let mut net = ResonanceNetwork::new(config)?;
///
/// net.set_input_raw(0, &[1.0, 0.0, 0.0, 0.0])?;
/// let first = net.step(true);
/// assert_eq!(net.category_count(), 2);
///
/// net.set_input_raw(0, &[1.0, 0.0, 0.0, 0.0])?;
/// assert_eq!(net.step(true), first);
/// # Ok::<(), fusion_art::ArtError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ResonanceNetwork {
    config: NetworkConfig,
    store: CategoryStore,
    /// Inputs as last written by the caller
    input: Vec<Vec<f64>>,
    /// Working copy compared and read out during a step
    activity: Vec<Vec<f64>>,
    /// Last values handed out by `read_field`
    prediction: Vec<Vec<f64>>,
    last_selected: usize,
    learning_enabled: bool,
}

impl ResonanceNetwork {
    /// Build a network from a validated configuration. The store starts
    /// with a single uncommitted category.
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate()?;

        let sizes = config.sizes();
        let buffers: Vec<Vec<f64>> = sizes.iter().map(|&n| vec![0.0; n]).collect();

        debug!(fields = sizes.len(), ?sizes, "configuring resonance network");
        for (i, field) in config.fields.iter().enumerate() {
            debug!(field = i, spec = %field, "field");
        }

        Ok(Self {
            store: CategoryStore::new(sizes),
            input: buffers.clone(),
            activity: buffers.clone(),
            prediction: buffers,
            config,
            last_selected: 0,
            learning_enabled: true,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn field_count(&self) -> usize {
        self.config.fields.len()
    }

    /// Number of categories, the uncommitted one included.
    pub fn category_count(&self) -> usize {
        self.store.len()
    }

    pub fn confidence_of(&self, index: usize) -> Option<f64> {
        self.store.confidence_of(index)
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.store.get(index)
    }

    /// Every category in index order, the uncommitted one last.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.store.iter()
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// Index selected by the most recent step (0 before the first step).
    pub fn last_selected(&self) -> usize {
        self.last_selected
    }

    /// Weights of the category selected by the most recent step.
    pub fn last_prediction(&self) -> &Category {
        self.store
            .get(self.last_selected)
            .unwrap_or_else(|| self.store.uncommitted())
    }

    pub fn learning_enabled(&self) -> bool {
        self.learning_enabled
    }

    /// When disabled, learning steps still search and record the selection
    /// but leave the store untouched.
    pub fn set_learning_enabled(&mut self, enabled: bool) {
        self.learning_enabled = enabled;
    }

    pub fn confidence_params(&self) -> &ConfidenceParams {
        &self.config.confidence
    }

    pub fn set_confidence_params(&mut self, params: ConfidenceParams) -> Result<()> {
        params.validate()?;
        self.config.confidence = params;
        Ok(())
    }

    // =========================================================================
    // Input / output
    // =========================================================================

    /// Encode `vector` and write it as the input of `field`.
    ///
    /// The encoded vector must be at least as wide as the field; extra
    /// trailing elements are ignored. On error nothing is written.
    pub fn set_input(
        &mut self,
        field: usize,
        vector: &[f64],
        coding: ComplementCoding,
    ) -> Result<()> {
        let size = self.field_size(field)?;
        let encoded = coding.encode(vector);

        if encoded.len() < size {
            return Err(ArtError::DimensionMismatch {
                expected: size,
                got: encoded.len(),
            });
        }
        if encoded[..size].iter().any(|v| !v.is_finite()) {
            return Err(ArtError::NonFiniteInput { field });
        }

        self.input[field].copy_from_slice(&encoded[..size]);
        Ok(())
    }

    /// Write `vector` as-is.
    pub fn set_input_raw(&mut self, field: usize, vector: &[f64]) -> Result<()> {
        self.set_input(field, vector, ComplementCoding::Identity)
    }

    /// Copy of the post-step activity of `field`.
    pub fn read_field(&mut self, field: usize) -> Result<Vec<f64>> {
        self.field_size(field)?;
        self.prediction[field].copy_from_slice(&self.activity[field]);
        Ok(self.prediction[field].clone())
    }

    fn field_size(&self, field: usize) -> Result<usize> {
        self.config
            .fields
            .get(field)
            .map(|f| f.size)
            .ok_or(ArtError::FieldOutOfRange {
                index: field,
                count: self.config.fields.len(),
            })
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Run one standard step and return the selected category index.
    pub fn step(&mut self, learning: bool) -> usize {
        self.step_with(learning, SearchMode::Standard).index
    }

    /// Run one step with an explicit search mode.
    pub fn step_with(&mut self, learning: bool, mode: SearchMode) -> Selection {
        for (x, input) in self.activity.iter_mut().zip(self.input.iter()) {
            x.copy_from_slice(input);
        }

        let selection = ResonanceSearch::new(&self.config.fields, &self.activity).run(
            &self.store,
            learning,
            mode,
            self.config.adaptive_vigilance_rate,
        );
        trace!(
            index = selection.index,
            resolution = ?selection.resolution,
            temperature = selection.temperature,
            "category selected"
        );

        if learning {
            if self.learning_enabled {
                self.learn(&selection);
            }
        } else {
            self.read_out(selection.index);
        }

        self.last_selected = selection.index;
        selection
    }

    fn learn(&mut self, selection: &Selection) {
        let index = selection.index;
        let Some(category) = self.store.get_mut(index) else {
            return;
        };

        if selection.resolution == Resolution::PerfectMismatch {
            category.overwrite(&self.activity);
        } else {
            let terminal = self
                .config
                .fields
                .iter()
                .enumerate()
                .any(|(i, f)| f.role == FieldRole::Reward && category.is_saturated(i));

            if terminal {
                trace!(index, "terminal reward pattern, learning skipped");
            } else {
                for (i, field) in self.config.fields.iter().enumerate() {
                    field
                        .learning
                        .apply(category.field_mut(i), &self.activity[i], field.learning_rate);
                }
            }
        }

        if self.store.is_uncommitted(index) {
            self.store.commit();
            debug!(count = self.store.len(), "committed new category");
        }
    }

    fn read_out(&mut self, index: usize) {
        let Some(category) = self.store.get(index) else {
            return;
        };
        let readout = self.config.readout;
        for (i, x) in self.activity.iter_mut().enumerate() {
            readout.apply(category.field(i), x);
        }
    }

    // =========================================================================
    // Reactive helpers
    // =========================================================================

    /// Run a performing step and pick the strongest element of the first
    /// ACTION field. `None` when the uncommitted category answered (nothing
    /// known about this input) or the schema has no ACTION field.
    pub fn select_action(&mut self) -> Option<usize> {
        let selection = self.step_with(false, SearchMode::Standard);
        if selection.resolution == Resolution::Uncommitted {
            return None;
        }

        let field = self.config.first_with_role(FieldRole::Action)?;
        let mut best = None;
        let mut max = f64::MIN;
        for (i, &v) in self.activity[field].iter().enumerate() {
            if v >= max {
                max = v;
                best = Some(i);
            }
        }
        best
    }

    /// Overwrite the ACTION fields of the last selected category with the
    /// current activity. Does nothing when the last step fell back to the
    /// uncommitted category.
    pub fn reset_last_action(&mut self) {
        if self.store.is_uncommitted(self.last_selected) {
            return;
        }
        let Some(category) = self.store.get_mut(self.last_selected) else {
            return;
        };
        for (i, field) in self.config.fields.iter().enumerate() {
            if field.role == FieldRole::Action {
                category.field_mut(i).copy_from_slice(&self.activity[i]);
            }
        }
    }

    /// Overwrite every field of the last selected category with the current
    /// activity. If that is the uncommitted category it is committed and a
    /// fresh one takes its place.
    pub fn insert(&mut self) {
        let Some(category) = self.store.get_mut(self.last_selected) else {
            return;
        };
        category.overwrite(&self.activity);

        if self.store.is_uncommitted(self.last_selected) {
            self.store.commit();
            debug!(count = self.store.len(), "committed inserted category");
        }
    }

    // =========================================================================
    // Confidence maintenance
    // =========================================================================

    /// Reinforce the last selected category. Returns its new confidence.
    pub fn reinforce(&mut self) -> Option<f64> {
        let rate = self.config.confidence.reinforcement_rate;
        self.store.reinforce(self.last_selected, rate)
    }

    /// Erode the last selected category. Returns its new confidence.
    pub fn erode(&mut self) -> Option<f64> {
        let rate = self.config.confidence.erosion_rate;
        self.store.erode(self.last_selected, rate)
    }

    /// Decay every category's confidence.
    pub fn decay(&mut self) {
        self.store.decay(self.config.confidence.decay_rate);
    }

    /// Prune low-confidence categories. Returns how many were removed.
    ///
    /// The last selected index follows its category; if that category was
    /// removed it moves to the uncommitted one.
    pub fn prune(&mut self) -> usize {
        let params = self.config.confidence;
        let removed = self
            .store
            .prune(params.pruning_threshold, params.confidence_threshold);
        if removed.is_empty() {
            return 0;
        }

        let last = self.last_selected;
        self.last_selected = if removed.binary_search(&last).is_ok() {
            self.store.uncommitted_index()
        } else {
            last - removed.iter().take_while(|&&r| r < last).count()
        };

        debug!(
            removed = removed.len(),
            remaining = self.store.len(),
            "pruned low-confidence categories"
        );
        removed.len()
    }
}
