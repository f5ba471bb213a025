//! Property-based tests for the category store and the resonance network
//!
//! Tests cover:
//! - Confidence bounds under arbitrary maintenance sequences
//! - Learning moves weights toward the activity
//! - Pruning never reaches the uncommitted category
//! - Category count growth without pruning
//! - Complement coding truncation

use fusion_art::kernel::encoder::mirrored;
use fusion_art::{
    CategoryStore, ComplementCoding, FieldRole, FieldSpec, LearningOp, NetworkConfig,
    ResonanceNetwork,
};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Maintenance {
    Reinforce(usize, f64),
    Erode(usize, f64),
    Decay(f64),
}

fn maintenance() -> impl Strategy<Value = Maintenance> {
    prop_oneof![
        (0usize..5, 0.0f64..=1.0).prop_map(|(i, r)| Maintenance::Reinforce(i, r)),
        (0usize..5, 0.0f64..=1.0).prop_map(|(i, r)| Maintenance::Erode(i, r)),
        (0.0f64..=1.0).prop_map(Maintenance::Decay),
    ]
}

fn learning_op() -> impl Strategy<Value = LearningOp> {
    prop_oneof![Just(LearningOp::LinearBlend), Just(LearningOp::FuzzyMinBlend)]
}

/// Two equal-width input vectors.
fn pair() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1usize..5).prop_flat_map(|n| {
        (
            prop::collection::vec(0.01f64..1.0, n),
            prop::collection::vec(0.01f64..1.0, n),
        )
    })
}

/// A stream of equal-width input vectors.
fn stream(max_len: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..5).prop_flat_map(move |n| {
        prop::collection::vec(prop::collection::vec(0.01f64..1.0, n), 1..max_len)
    })
}

fn single_state(size: usize, op: LearningOp, rate: f64, vigilance: f64) -> NetworkConfig {
    NetworkConfig::new(vec![FieldSpec::new(size, FieldRole::State)
        .with_learning(op, rate)
        .with_vigilance(vigilance, 0.0)])
}

fn store_with(n: usize) -> CategoryStore {
    let mut store = CategoryStore::new(vec![2]);
    for _ in 0..n {
        store.commit();
    }
    store
}

#[cfg(test)]
mod confidence {
    use super::*;

    proptest! {
        /// Rates in [0, 1] keep every confidence in [0, 1]
        #[test]
        fn confidence_stays_bounded(ops in prop::collection::vec(maintenance(), 1..60)) {
            let mut store = store_with(4);
            for op in ops {
                match op {
                    Maintenance::Reinforce(i, r) => { store.reinforce(i, r); }
                    Maintenance::Erode(i, r) => { store.erode(i, r); }
                    Maintenance::Decay(r) => store.decay(r),
                }
                for c in store.iter() {
                    prop_assert!(c.confidence() >= 0.0);
                    prop_assert!(c.confidence() <= 1.0 + 1e-12);
                }
            }
        }

        /// Pruning removes exactly the committed categories below threshold
        #[test]
        fn prune_keeps_uncommitted(
            erosions in prop::collection::vec(0.0f64..=1.0, 0..8),
            threshold in 0.0f64..=1.0,
        ) {
            let mut store = store_with(erosions.len());
            let uncommitted = store.uncommitted_index();
            store.erode(uncommitted, 1.0);
            for (i, &r) in erosions.iter().enumerate() {
                store.erode(i, r);
            }

            let below = store
                .committed()
                .iter()
                .filter(|c| c.confidence() < threshold)
                .count();
            let before = store.len();
            let removed = store.prune(0, threshold);

            prop_assert_eq!(removed.len(), below);
            prop_assert_eq!(store.len(), before - below);
            prop_assert!(store.is_uncommitted(store.len() - 1));
            prop_assert!(store.committed().iter().all(|c| c.confidence() >= threshold));
        }
    }
}

#[cfg(test)]
mod learning {
    use super::*;

    proptest! {
        /// Resonating into a committed category moves each weight into the
        /// interval between its prior value and the activity
        #[test]
        fn weights_move_toward_activity(
            (first, second) in pair(),
            op in learning_op(),
            rate in 0.0f64..=1.0,
        ) {
            let mut net = ResonanceNetwork::new(single_state(first.len(), op, rate, 0.0)).unwrap();

            net.set_input_raw(0, &first).unwrap();
            net.step(true);
            let before = net.category(0).unwrap().field(0).to_vec();

            net.set_input_raw(0, &second).unwrap();
            let selected = net.step(true);
            prop_assert_eq!(selected, 0);

            let after = net.category(0).unwrap().field(0);
            for ((&w0, &w1), &x) in before.iter().zip(after.iter()).zip(second.iter()) {
                prop_assert!(w1 >= w0.min(x) - 1e-12);
                prop_assert!(w1 <= w0.max(x) + 1e-12);
            }
        }

        /// Without pruning, each learning step adds at most one category
        #[test]
        fn category_count_is_monotonic(
            inputs in stream(40),
            vigilance in 0.0f64..=1.0,
        ) {
            let size = inputs[0].len();
            let mut net = ResonanceNetwork::new(
                single_state(size * 2, LearningOp::FuzzyMinBlend, 1.0, vigilance),
            ).unwrap();

            let mut count = net.category_count();
            for x in &inputs {
                net.set_input(0, x, ComplementCoding::Mirrored).unwrap();
                let selected = net.step(true);
                let next = net.category_count();
                prop_assert!(next == count || next == count + 1);
                prop_assert!(selected < next - 1);
                count = next;
            }
        }

        /// The first half of a mirrored code is the input itself
        #[test]
        fn mirrored_truncation_recovers_input(v in prop::collection::vec(0.0f64..=1.0, 1..16)) {
            let encoded = mirrored(&v);
            prop_assert_eq!(encoded.len(), v.len() * 2);
            prop_assert_eq!(&encoded[..v.len()], v.as_slice());
        }
    }
}
