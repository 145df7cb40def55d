//! Feed State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. One store per
//! feature page; it is dropped with the page.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use learnhub_core::error::ActionResult;
use learnhub_core::notify::Notices;
use learnhub_core::{settle, CollectionStore, Id, Item, Patch};

/// State of one feature page
#[derive(Clone, Debug, Default, Store)]
pub struct FeedState {
    /// Items mirrored from the server
    pub items: CollectionStore<Item>,
    /// A full fetch is in flight
    pub loading: bool,
}

/// Type alias for the store
pub type FeedStore = Store<FeedState>;

// ========================
// Store Helper Functions
// ========================

/// Items in display order, tracked
pub fn store_items(store: &FeedStore) -> Vec<Arc<Item>> {
    store.items().with(|items| items.iter().cloned().collect())
}

/// Current copy of an item, untracked
pub fn store_item(store: &FeedStore, id: &Id) -> Option<Arc<Item>> {
    store.items().with_untracked(|items| items.get(id).cloned())
}

pub fn store_len(store: &FeedStore) -> usize {
    store.items().with(|items| items.len())
}

pub fn store_set_loading(store: &FeedStore, loading: bool) {
    store.loading().set(loading);
}

pub fn store_is_loading(store: &FeedStore) -> bool {
    store.loading().get()
}

/// Apply an action outcome to the items, or raise its notification
pub fn store_settle(
    store: &FeedStore,
    notices: RwSignal<Notices>,
    outcome: ActionResult<Patch>,
    success_message: Option<&str>,
) -> bool {
    let mut ok = false;
    store.items().update(|items| {
        notices.update(|n| ok = settle(outcome, items, n, success_message));
    });
    ok
}
