//! # Fusion ART: Online Resonance Categorization
//!
//! Fusion ART is a multi-field fuzzy Adaptive Resonance Theory network. It
//! learns categories (prototypes) online from state/action/reward
//! observations, one decision step at a time, and answers queries by
//! recalling the best-resonating category.
//!
//! ## Quick Start
//!
//! ```rust
//! use fusion_art::{ComplementCoding, FieldRole, FieldSpec, NetworkConfig, ResonanceNetwork};
//!
//! // One complement-coded state field, one reward pair
//! let config = NetworkConfig::new(vec![
//!     FieldSpec::new(4, FieldRole::State)
//!         .with_gamma(0.5)
//!         .with_vigilance(0.9, 0.0),
//!     FieldSpec::new(2, FieldRole::Reward).with_gamma(0.0).active(false),
//! ]);
//! let mut net = ResonanceNetwork::new(config)?;
//!
//! // Learn: state [1, 0] was worth 0.7
//! net.set_input(0, &[1.0, 0.0], ComplementCoding::Mirrored)?;
//! net.set_input(1, &[0.7], ComplementCoding::Mirrored)?;
//! net.step(true);
//!
//! // Recall
//! net.set_input(0, &[1.0, 0.0], ComplementCoding::Mirrored)?;
//! net.set_input(1, &[0.0], ComplementCoding::DirectAccess)?;
//! net.step(false);
//! let reward = net.read_field(1)?;
//! assert!((reward[0] - 0.7).abs() < 1e-10);
//! # Ok::<(), fusion_art::ArtError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Field**: one named slice of the input (state, action or reward) with
//!   its own similarity, learning and vigilance settings
//! - **Category**: a learned prototype holding one weight vector per field
//! - **Temperature**: gamma-weighted sum of per-field choice scores, used to
//!   rank categories
//! - **Vigilance**: per-field minimum match a category needs to resonate
//! - **Uncommitted category**: the all-ones prototype that is always last
//!   and absorbs inputs nothing else matches
//!
//! ## Layers
//!
//! - [`kernel`]: stateless per-field math (similarity, learning, encoders)
//! - [`memory`]: categories and their confidence bookkeeping
//! - [`resonance`]: the category search
//! - [`network`]: the stateful engine
//! - [`highlevel`]: Q-value approximators for reinforcement-learning loops

pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod memory;
pub mod network;
pub mod resonance;
pub mod schema;

// Re-exports for convenience
pub use error::{ArtError, Result};
pub use highlevel::{ArtQApproximator, DiscreteQTable, QValueApproximator};
pub use kernel::{ComplementCoding, LearningOp, Metric, Readout};
pub use memory::{Category, CategoryStore};
pub use network::ResonanceNetwork;
pub use resonance::{Resolution, SearchMode, Selection};
pub use schema::{ColumnarSchema, ConfidenceParams, FieldRole, FieldSpec, NetworkConfig};
