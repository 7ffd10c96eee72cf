use std::fmt::Debug;

/// Items that can live in an [`OrderedCollection`], keyed by a cheap copyable id.
pub trait Keyed {
    type Id: Copy + Eq + Debug;

    fn key(&self) -> Self::Id;
}

/// A pair of (items, order-of-ids) kept in lockstep.
///
/// Used for both the board's column list and each column's card list. Every
/// operation leaves `items` and `order` agreeing: `items[i].key() == order[i]`
/// for all `i`. Construction re-derives order from whatever the caller hands
/// in, so drifted inputs (stale order arrays from a remote peer, for example)
/// normalize instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedCollection<T: Keyed> {
    items: Vec<T>,
    order: Vec<T::Id>,
}

impl<T: Keyed> OrderedCollection<T> {
    /// Builds a collection from possibly-drifted parallel arrays.
    ///
    /// Items are sorted per `reindex`, then the order array is recomputed
    /// from the items so the lockstep invariant holds from the start.
    pub fn from_parts(items: Vec<T>, order: Vec<T::Id>) -> Self {
        let items = Self::reindex(items, &order);
        let order = items.iter().map(Keyed::key).collect();
        Self { items, order }
    }

    /// Sorts `items` according to `order`.
    ///
    /// Items whose id is missing from `order` append after the ordered ones,
    /// keeping their original relative order. Ids in `order` with no matching
    /// item are dropped silently. Never fails on drift.
    pub fn reindex(items: Vec<T>, order: &[T::Id]) -> Vec<T> {
        let mut matched: Vec<(usize, T)> = Vec::new();
        let mut unmatched: Vec<T> = Vec::new();

        for item in items {
            match order.iter().position(|id| *id == item.key()) {
                Some(pos) => matched.push((pos, item)),
                None => unmatched.push(item),
            }
        }

        matched.sort_by_key(|(pos, _)| *pos);
        matched
            .into_iter()
            .map(|(_, item)| item)
            .chain(unmatched)
            .collect()
    }

    /// Removes the item with the given id from both arrays.
    ///
    /// Returns `None` without touching anything when the id is absent.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let pos = self.items.iter().position(|item| item.key() == id)?;
        let item = self.items.remove(pos);
        self.order.retain(|o| *o != id);
        Some(item)
    }

    /// Splices `item` into the collection at `index`, clamped to `0..=len`.
    ///
    /// Out-of-range indices degrade to append rather than erroring. The order
    /// array is recomputed from the items afterwards.
    pub fn insert_at(&mut self, item: T, index: usize) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.order = self.items.iter().map(Keyed::key).collect();
    }

    /// Array-move: removes the item with `id` and re-inserts it at `index`
    /// (clamped against the post-removal length).
    ///
    /// Returns `false` as a no-op when the id is absent.
    pub fn move_to(&mut self, id: T::Id, index: usize) -> bool {
        match self.remove(id) {
            Some(item) => {
                self.insert_at(item, index);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn order(&self) -> &[T::Id] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<T::Id>) {
        (self.items, self.order)
    }

    /// Checks the lockstep invariant; exposed for tests and debug assertions.
    pub fn is_lockstep(&self) -> bool {
        self.items.len() == self.order.len()
            && self
                .items
                .iter()
                .zip(&self.order)
                .all(|(item, id)| item.key() == *id)
    }
}
