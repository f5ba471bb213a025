//! Resonance-network backed Q-value approximator.

use super::QValueApproximator;
use crate::error::Result;
use crate::kernel::{ComplementCoding, Metric};
use crate::network::ResonanceNetwork;
use crate::schema::{FieldRole, FieldSpec, NetworkConfig};

const STATE: usize = 0;
const ACTION: usize = 1;
const REWARD: usize = 2;

/// Q-value approximator over a state/action/reward resonance network.
///
/// States are complement coded before they are written, so the state field
/// is twice as wide as the raw state. Rewards are stored as the pair
/// `[r, 1 - r]`.
///
/// # Example
///
/// ```rust
/// use fusion_art::highlevel::{ArtQApproximator, QValueApproximator};
///
/// let mut q = ArtQApproximator::with_defaults(2, 2)?;
/// let state = [0.2, 0.9];
/// let action = [1.0, 0.0];
///
/// // nothing learned yet: the neutral estimate
/// assert_eq!(q.predict_q_value(&state, &action)?, 0.5);
///
/// q.learn_stimulus(&state, &action, 0.8)?;
/// assert!((q.predict_q_value(&state, &action)? - 0.8).abs() < 1e-10);
/// # Ok::<(), fusion_art::ArtError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ArtQApproximator {
    network: ResonanceNetwork,
}

impl ArtQApproximator {
    /// Wrap a network whose fields are, in order, state, action and a
    /// two-wide reward.
    pub fn new(config: NetworkConfig) -> Result<Self> {
        Ok(Self {
            network: ResonanceNetwork::new(config)?,
        })
    }

    /// The stock schema for raw states of `state_len` and actions of
    /// `action_len` elements.
    pub fn with_defaults(state_len: usize, action_len: usize) -> Result<Self> {
        Self::new(Self::default_config(state_len, action_len))
    }

    pub fn default_config(state_len: usize, action_len: usize) -> NetworkConfig {
        NetworkConfig::new(vec![
            FieldSpec::new(state_len * 2, FieldRole::State)
                .with_gamma(0.5)
                .with_vigilance(0.9, 0.0),
            FieldSpec::new(action_len, FieldRole::Action)
                .with_gamma(0.5)
                .with_vigilance(1.0, 0.0),
            FieldSpec::new(2, FieldRole::Reward)
                .with_similarity(Metric::FuzzyCosine)
                .with_gamma(0.0)
                .active(false),
        ])
    }

    pub fn network(&self) -> &ResonanceNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut ResonanceNetwork {
        &mut self.network
    }

    fn write(
        &mut self,
        state: &[f64],
        action: &[f64],
        reward: f64,
        coding: ComplementCoding,
    ) -> Result<()> {
        self.network.set_input(STATE, state, ComplementCoding::Mirrored)?;
        self.network.set_input_raw(ACTION, action)?;
        self.network.set_input(REWARD, &[reward], coding)
    }

    /// Decode the reward pair. An all-ones pair is the uncommitted
    /// category's readout and decodes to the neutral 0.5.
    fn read_reward(&mut self) -> Result<f64> {
        let reward = self.network.read_field(REWARD)?;
        if reward[0] == 1.0 && reward[1] == 1.0 {
            return Ok(reward[0] / (reward[0] + reward[1]));
        }
        Ok(reward[0])
    }
}

impl QValueApproximator for ArtQApproximator {
    fn predict_q_value(&mut self, state: &[f64], action: &[f64]) -> Result<f64> {
        self.write(state, action, 0.0, ComplementCoding::DirectAccess)?;
        self.network.step(false);
        self.read_reward()
    }

    fn learn_stimulus(&mut self, prev_state: &[f64], action: &[f64], target: f64) -> Result<f64> {
        self.write(prev_state, action, target, ComplementCoding::Mirrored)?;
        self.network.step(true);
        self.read_reward()
    }

    /// Committed categories only.
    fn memory_size(&self) -> usize {
        self.network.category_count() - 1
    }
}
