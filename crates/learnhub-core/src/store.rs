//! Collection Store
//!
//! Ordered list of items mirrored from the server for one feature page.
//! Items are held behind `Arc` and never mutated in place: a patch swaps in a
//! new `Arc` for the matching entry and leaves every other entry pointer-equal.

use std::fmt;
use std::sync::Arc;

use crate::domain::Entity;

pub struct CollectionStore<T: Entity> {
    items: Vec<Arc<T>>,
}

impl<T: Entity> Clone for CollectionStore<T> {
    fn clone(&self) -> Self {
        Self { items: self.items.clone() }
    }
}

impl<T: Entity> Default for CollectionStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for CollectionStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Entity + PartialEq> PartialEq for CollectionStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Entity> CollectionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        let mut store = Self::new();
        store.replace_all(items);
        store
    }

    /// Replace the whole list (full fetch). Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, items: Vec<T>) {
        let mut next: Vec<Arc<T>> = Vec::with_capacity(items.len());
        for item in items {
            if next.iter().any(|existing| existing.id() == item.id()) {
                log::warn!("Dropping duplicate id {:?} from fetched list", item.id());
                continue;
            }
            next.push(Arc::new(item));
        }
        self.items = next;
    }

    /// Insert at the front. An existing entry with the same id is replaced
    /// and moved to the front so ids stay unique.
    pub fn prepend(&mut self, item: T) {
        self.items.retain(|existing| existing.id() != item.id());
        self.items.insert(0, Arc::new(item));
    }

    /// Replace the matching item with `updater(old)`. Returns false when no
    /// item has that id.
    pub fn patch_by_id<F>(&mut self, id: &T::Id, updater: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                let next = updater(&self.items[index]);
                self.items[index] = Arc::new(next);
                true
            }
            None => false,
        }
    }

    /// Remove the matching item. Returns false when nothing was removed.
    pub fn remove_by_id(&mut self, id: &T::Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn get(&self, id: &T::Id) -> Option<&Arc<T>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }
}
