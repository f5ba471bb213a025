//! Category store: the growing set of learned categories.
//!
//! Committed categories live in an ordered `Vec`; the uncommitted category
//! is held in its own slot. Indices seen by callers are positional:
//! `0..committed` address committed categories and `len() - 1` addresses
//! the uncommitted one. Pruning compacts the committed list and can never
//! reach the uncommitted slot.

use super::category::Category;

/// Owner of every category in a network.
#[derive(Clone, Debug)]
pub struct CategoryStore {
    sizes: Vec<usize>,
    committed: Vec<Category>,
    uncommitted: Category,
}

impl CategoryStore {
    /// A store holding only the uncommitted category.
    pub fn new(sizes: Vec<usize>) -> Self {
        let uncommitted = Category::uncommitted(&sizes);
        Self {
            sizes,
            committed: Vec::new(),
            uncommitted,
        }
    }

    // --- Accessors ---

    /// Total number of categories, the uncommitted one included.
    pub fn len(&self) -> usize {
        self.committed.len() + 1
    }

    /// Always false: the uncommitted category is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn uncommitted_index(&self) -> usize {
        self.committed.len()
    }

    pub fn is_uncommitted(&self, index: usize) -> bool {
        index == self.committed.len()
    }

    pub fn committed(&self) -> &[Category] {
        &self.committed
    }

    pub fn uncommitted(&self) -> &Category {
        &self.uncommitted
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        if self.is_uncommitted(index) {
            Some(&self.uncommitted)
        } else {
            self.committed.get(index)
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Category> {
        if self.is_uncommitted(index) {
            Some(&mut self.uncommitted)
        } else {
            self.committed.get_mut(index)
        }
    }

    /// Every category in index order, the uncommitted one last.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.committed
            .iter()
            .chain(std::iter::once(&self.uncommitted))
    }

    pub fn confidence_of(&self, index: usize) -> Option<f64> {
        self.get(index).map(Category::confidence)
    }

    // --- Lifecycle ---

    /// Promote the uncommitted category to committed and open a fresh
    /// uncommitted slot. Returns the index of the newly committed category.
    pub fn commit(&mut self) -> usize {
        let fresh = Category::uncommitted(&self.sizes);
        let learned = std::mem::replace(&mut self.uncommitted, fresh);
        self.committed.push(learned);
        self.committed.len() - 1
    }

    // --- Confidence maintenance ---

    /// `c ← c + rate·(1 - c)`. Returns the new confidence.
    pub fn reinforce(&mut self, index: usize, rate: f64) -> Option<f64> {
        let category = self.get_mut(index)?;
        let c = category.confidence();
        category.set_confidence(c + rate * (1.0 - c));
        Some(category.confidence())
    }

    /// `c ← c - rate·c`. Returns the new confidence.
    pub fn erode(&mut self, index: usize, rate: f64) -> Option<f64> {
        let category = self.get_mut(index)?;
        let c = category.confidence();
        category.set_confidence(c - rate * c);
        Some(category.confidence())
    }

    /// Apply `c ← c - rate·c` to every category.
    pub fn decay(&mut self, rate: f64) {
        for category in self
            .committed
            .iter_mut()
            .chain(std::iter::once(&mut self.uncommitted))
        {
            let c = category.confidence();
            category.set_confidence(c - rate * c);
        }
    }

    /// Remove committed categories whose confidence is below `threshold`,
    /// but only once the store holds at least `min_count` categories.
    ///
    /// Survivors keep their relative order. Returns the pre-prune indices of
    /// the removed categories, ascending.
    pub fn prune(&mut self, min_count: usize, threshold: f64) -> Vec<usize> {
        if self.len() < min_count {
            return Vec::new();
        }

        let removed: Vec<usize> = self
            .committed
            .iter()
            .enumerate()
            .filter(|(_, c)| c.confidence() < threshold)
            .map(|(i, _)| i)
            .collect();

        if !removed.is_empty() {
            self.committed.retain(|c| c.confidence() >= threshold);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> CategoryStore {
        let mut store = CategoryStore::new(vec![2, 1]);
        for i in 0..n {
            store.get_mut(store.uncommitted_index()).unwrap().field_mut(1)[0] = i as f64;
            store.commit();
        }
        store
    }

    #[test]
    fn test_new_holds_only_uncommitted() {
        let store = CategoryStore::new(vec![3]);
        assert_eq!(store.len(), 1);
        assert!(store.is_uncommitted(0));
        assert_eq!(store.get(0).unwrap().field(0), &[1.0, 1.0, 1.0]);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_commit_appends_fresh_uncommitted() {
        let mut store = CategoryStore::new(vec![2]);
        store.get_mut(0).unwrap().field_mut(0)[0] = 0.0;
        let idx = store.commit();

        assert_eq!(idx, 0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().field(0), &[0.0, 1.0]);
        assert_eq!(store.uncommitted().field(0), &[1.0, 1.0]);
        assert!(store.is_uncommitted(1));
    }

    #[test]
    fn test_reinforce_and_erode() {
        let mut store = store_with(1);
        let c = store.erode(0, 0.5).unwrap();
        assert!((c - 0.5).abs() < 1e-10);
        let c = store.reinforce(0, 0.5).unwrap();
        assert!((c - 0.75).abs() < 1e-10);
        assert!(store.reinforce(7, 0.5).is_none());
    }

    #[test]
    fn test_decay_touches_every_category() {
        let mut store = store_with(2);
        store.decay(0.1);
        for c in store.iter() {
            assert!((c.confidence() - 0.9).abs() < 1e-10);
        }
    }

    #[test]
    fn test_prune_compacts_and_keeps_order() {
        let mut store = store_with(4);
        store.erode(1, 0.9);
        store.erode(2, 0.9);

        let removed = store.prune(0, 0.5);
        assert_eq!(removed, vec![1, 2]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().field(1), &[0.0]);
        assert_eq!(store.get(1).unwrap().field(1), &[3.0]);
        assert!(store.is_uncommitted(2));
    }

    #[test]
    fn test_prune_respects_count_threshold() {
        let mut store = store_with(2);
        store.erode(0, 1.0);
        assert!(store.prune(10, 0.5).is_empty());
        assert_eq!(store.len(), 3);
        assert_eq!(store.prune(3, 0.5), vec![0]);
    }

    #[test]
    fn test_prune_never_removes_uncommitted() {
        let mut store = store_with(1);
        store.decay(1.0);
        let removed = store.prune(0, 0.5);
        assert_eq!(removed, vec![0]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.uncommitted().confidence(), 0.0);
    }
}
