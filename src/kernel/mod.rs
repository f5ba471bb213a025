//! Kernel layer: stateless per-field operators.
//!
//! The kernel holds the math the network applies to a single field:
//! - Similarity operators ([`Similarity`], [`Metric`])
//! - Weight update rules ([`LearningOp`])
//! - Readout rules ([`Readout`])
//! - Input encoders ([`ComplementCoding`])
//!
//! This layer has no dependencies on [`memory`](crate::memory) or the
//! [`network`](crate::network).
//!
//! # Example
//!
//! ```rust
//! use fusion_art::kernel::{ComplementCoding, Metric, Similarity};
//!
//! let x = ComplementCoding::Mirrored.encode(&[1.0, 0.0]);
//! let w = vec![1.0; 4];
//! let score = Similarity::compute(&w, &x, Metric::FuzzyMin, 0.0, 1.0);
//! assert!((score.overlap - 2.0).abs() < 1e-10);
//! ```

pub mod encoder;
pub mod learning;
pub mod similarity;

pub use encoder::ComplementCoding;
pub use learning::{LearningOp, Readout};
pub use similarity::{FieldScore, Metric, Similarity, NAN_FLOOR};
