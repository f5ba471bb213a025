//! Memory layer: learned categories and their confidence bookkeeping.
//!
//! - [`Category`]: one prototype: a weight vector per field plus a
//!   confidence in [0, 1].
//! - [`CategoryStore`]: the ordered set of committed categories followed by
//!   the always-present uncommitted one, with reinforcement, erosion, decay
//!   and pruning.
//!
//! # Usage
//!
//! ```rust
//! use fusion_art::memory::CategoryStore;
//!
//! let mut store = CategoryStore::new(vec![4, 2]);
//! assert_eq!(store.len(), 1);
//!
//! store.commit();
//! store.erode(0, 0.9);
//! let removed = store.prune(0, 0.5);
//! assert_eq!(removed, vec![0]);
//! assert_eq!(store.len(), 1);
//! ```

pub mod category;
pub mod store;

pub use category::Category;
pub use store::CategoryStore;
