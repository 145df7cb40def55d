//! Store patches
//!
//! The outcome of a successful action, applied to the collection store
//! synchronously once the response has arrived.

use chrono::{DateTime, Utc};

use crate::domain::{Id, Item};
use crate::store::CollectionStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Full fetch
    ReplaceAll(Vec<Item>),
    /// Newly created item
    Prepend(Item),
    /// Server representation of an existing item
    Replace(Item),
    Remove(Id),
    /// Local unlike
    RemoveLike { item_id: Id, user_id: String },
    /// Local comment edit
    EditComment {
        item_id: Id,
        comment_id: Id,
        content: String,
        at: DateTime<Utc>,
    },
    /// Local comment delete
    RemoveComment { item_id: Id, comment_id: Id },
}

impl Patch {
    /// Apply to `store`. Returns whether the store changed.
    ///
    /// Patches for items no longer present are dropped: the item was removed
    /// while the request was in flight.
    pub fn apply(self, store: &mut CollectionStore<Item>) -> bool {
        match self {
            Patch::ReplaceAll(items) => {
                store.replace_all(items);
                true
            }
            Patch::Prepend(item) => {
                store.prepend(item);
                true
            }
            Patch::Replace(item) => {
                let id = item.id.clone();
                store.patch_by_id(&id, move |_| item)
            }
            Patch::Remove(id) => store.remove_by_id(&id),
            Patch::RemoveLike { item_id, user_id } => {
                store.patch_by_id(&item_id, |item| item.without_like(&user_id))
            }
            Patch::EditComment { item_id, comment_id, content, at } => {
                store.patch_by_id(&item_id, |item| item.with_comment_content(&comment_id, &content, at))
            }
            Patch::RemoveComment { item_id, comment_id } => {
                store.patch_by_id(&item_id, |item| item.without_comment(&comment_id))
            }
        }
    }
}
