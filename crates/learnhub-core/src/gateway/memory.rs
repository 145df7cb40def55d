//! In-memory gateway
//!
//! Emulates the REST server for tests: assigns ids and timestamps, keeps one
//! list per feature, records every call and can be told to fail the next one.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use super::FeedGateway;
use crate::domain::{AuthToken, Comment, CommentDraft, FeatureKind, Id, Item, ItemDraft, Like};
use crate::error::{GatewayError, GatewayResult};

/// A recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List(FeatureKind),
    Create(FeatureKind, String),
    Update(FeatureKind, Id),
    Delete(FeatureKind, Id),
    AddLike(FeatureKind, Id),
    RemoveLike(FeatureKind, Id),
    AddComment(FeatureKind, Id),
    UpdateComment(FeatureKind, Id, Id),
    DeleteComment(FeatureKind, Id, Id),
    Register(FeatureKind, Id),
}

#[derive(Default)]
pub struct InMemoryGateway {
    collections: RefCell<HashMap<FeatureKind, Vec<Item>>>,
    registrations: RefCell<Vec<(Id, String)>>,
    calls: RefCell<Vec<GatewayCall>>,
    fail_next: RefCell<Option<GatewayError>>,
    fail_list: RefCell<Option<GatewayError>>,
    removed_before_list: RefCell<Vec<(FeatureKind, Id)>>,
    next_id: Cell<u64>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection as if it already existed on the server
    pub fn with_items(self, kind: FeatureKind, items: Vec<Item>) -> Self {
        self.collections.borrow_mut().insert(kind, items);
        self
    }

    /// Make the next call fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    /// Make the next `list` fail with `error`, leaving other calls alone
    pub fn fail_next_list(&self, error: GatewayError) {
        *self.fail_list.borrow_mut() = Some(error);
    }

    /// Drop `id` from the collection right before the next `list`, as if
    /// another client deleted it in between
    pub fn remove_before_next_list(&self, kind: FeatureKind, id: Id) {
        self.removed_before_list.borrow_mut().push((kind, id));
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Server-side copy of an item
    pub fn item(&self, kind: FeatureKind, id: &Id) -> Option<Item> {
        self.collections
            .borrow()
            .get(&kind)
            .and_then(|items| items.iter().find(|item| &item.id == id).cloned())
    }

    pub fn registrations(&self) -> Vec<(Id, String)> {
        self.registrations.borrow().clone()
    }

    fn next_id(&self, prefix: &str) -> Id {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        Id::new(format!("{}-{}", prefix, n))
    }

    /// Record the call, then check injected failure and token
    fn begin(&self, call: GatewayCall, token: Option<&AuthToken>) -> GatewayResult<()> {
        self.calls.borrow_mut().push(call);
        if let Some(error) = self.fail_next.borrow_mut().take() {
            return Err(error);
        }
        match token {
            Some(token) if token.is_blank() => Err(GatewayError::Auth("empty bearer token".to_string())),
            _ => Ok(()),
        }
    }

    fn with_item<T>(&self, kind: FeatureKind, id: &Id, f: impl FnOnce(&mut Item) -> GatewayResult<T>) -> GatewayResult<T> {
        let mut collections = self.collections.borrow_mut();
        let item = collections
            .entry(kind)
            .or_default()
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| GatewayError::from_status(404, format!("{} not found", id)))?;
        f(item)
    }
}

#[async_trait(?Send)]
impl FeedGateway for InMemoryGateway {
    async fn list(&self, kind: FeatureKind, token: Option<&AuthToken>) -> GatewayResult<Vec<Item>> {
        self.begin(GatewayCall::List(kind), token)?;
        if let Some(error) = self.fail_list.borrow_mut().take() {
            return Err(error);
        }
        for (removed_kind, id) in self.removed_before_list.borrow_mut().drain(..) {
            if let Some(items) = self.collections.borrow_mut().get_mut(&removed_kind) {
                items.retain(|item| item.id != id);
            }
        }
        Ok(self.collections.borrow().get(&kind).cloned().unwrap_or_default())
    }

    async fn create(&self, kind: FeatureKind, user_id: &str, draft: &ItemDraft, token: &AuthToken) -> GatewayResult<Item> {
        self.begin(GatewayCall::Create(kind, user_id.to_string()), Some(token))?;
        let now = Utc::now();
        let mut item = Item::new(self.next_id(kind.noun()), user_id);
        item.title = draft.title.clone();
        item.description = draft.description.clone();
        item.fields = draft.fields.clone();
        item.created_at = Some(now);
        item.updated_at = Some(now);
        self.collections.borrow_mut().entry(kind).or_default().insert(0, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        kind: FeatureKind,
        id: &Id,
        user_id: &str,
        draft: &ItemDraft,
        token: &AuthToken,
    ) -> GatewayResult<Item> {
        self.begin(GatewayCall::Update(kind, id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            if item.owner_id != user_id {
                return Err(GatewayError::from_status(403, "not the owner"));
            }
            item.title = draft.title.clone();
            item.description = draft.description.clone();
            item.fields = draft.fields.clone();
            item.updated_at = Some(Utc::now());
            Ok(item.clone())
        })
    }

    async fn delete(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.begin(GatewayCall::Delete(kind, id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            if item.owner_id != user_id {
                return Err(GatewayError::from_status(403, "not the owner"));
            }
            Ok(())
        })?;
        if let Some(items) = self.collections.borrow_mut().get_mut(&kind) {
            items.retain(|item| &item.id != id);
        }
        Ok(())
    }

    async fn add_like(&self, kind: FeatureKind, id: &Id, like: &Like, token: &AuthToken) -> GatewayResult<Item> {
        self.begin(GatewayCall::AddLike(kind, id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            if !item.is_liked_by(&like.user_id) {
                item.likes.push(like.clone());
            }
            Ok(item.clone())
        })
    }

    async fn remove_like(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.begin(GatewayCall::RemoveLike(kind, id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            item.likes.retain(|like| like.user_id != user_id);
            Ok(())
        })
    }

    async fn add_comment(&self, kind: FeatureKind, id: &Id, draft: &CommentDraft, token: &AuthToken) -> GatewayResult<Item> {
        self.begin(GatewayCall::AddComment(kind, id.clone()), Some(token))?;
        let comment_id = self.next_id("comment");
        self.with_item(kind, id, |item| {
            let now = Utc::now();
            item.comments.push(Comment {
                id: comment_id,
                user_id: draft.user_id.clone(),
                user_name: draft.user_name.clone(),
                content: draft.content.clone(),
                created_at: Some(now),
                updated_at: Some(now),
            });
            Ok(item.clone())
        })
    }

    async fn update_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        draft: &CommentDraft,
        token: &AuthToken,
    ) -> GatewayResult<()> {
        self.begin(GatewayCall::UpdateComment(kind, id.clone(), comment_id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            let comment = item
                .comments
                .iter_mut()
                .find(|c| &c.id == comment_id)
                .ok_or_else(|| GatewayError::from_status(404, "comment not found"))?;
            if comment.user_id != draft.user_id {
                return Err(GatewayError::from_status(403, "not the author"));
            }
            comment.content = draft.content.clone();
            comment.updated_at = Some(Utc::now());
            Ok(())
        })
    }

    async fn delete_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        user_id: &str,
        token: &AuthToken,
    ) -> GatewayResult<()> {
        self.begin(GatewayCall::DeleteComment(kind, id.clone(), comment_id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            let before = item.comments.len();
            item.comments.retain(|c| !(&c.id == comment_id && c.user_id == user_id));
            if item.comments.len() == before {
                return Err(GatewayError::from_status(404, "comment not found"));
            }
            Ok(())
        })
    }

    async fn register(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.begin(GatewayCall::Register(kind, id.clone()), Some(token))?;
        self.with_item(kind, id, |item| {
            let attendees = item
                .fields
                .entry("attendees")
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let Some(list) = attendees.as_array_mut() {
                if !list.iter().any(|v| v.as_str() == Some(user_id)) {
                    list.push(serde_json::Value::String(user_id.to_string()));
                }
            }
            Ok(())
        })?;
        self.registrations.borrow_mut().push((id.clone(), user_id.to_string()));
        Ok(())
    }
}
