//! Reconciler
//!
//! One implementation of the create / update / delete / like / comment /
//! register flow for every feature kind. Each operation runs the client-side
//! checks, calls the gateway and turns the answer into a [`Patch`]. Nothing
//! touches the store until the caller applies the patch, so a failed call
//! leaves the store exactly as it was.

mod patch;

#[cfg(test)]
mod tests;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Capability, CommentDraft, DraftField, FeatureKind, Id, Item, ItemDraft, Like, Session};
use crate::error::{ActionError, ActionResult};
use crate::gateway::FeedGateway;
use crate::notify::Notices;
use crate::store::CollectionStore;

pub use patch::Patch;

/// How results the server computes are brought into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Unlike and comment edit / delete patch locally on success; like,
    /// comment add and register use the server's answer.
    #[default]
    Legacy,
    /// Every action ends with the server's representation of the item.
    /// Actions whose endpoint returns no body re-fetch the collection.
    ServerAuthoritative,
}

pub struct Reconciler<G> {
    gateway: G,
    kind: FeatureKind,
    policy: ReconcilePolicy,
}

impl<G: FeedGateway> Reconciler<G> {
    pub fn new(gateway: G, kind: FeatureKind) -> Self {
        Self {
            gateway,
            kind,
            policy: ReconcilePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn ensure(&self, capability: Capability) -> ActionResult<()> {
        if self.kind.supports(capability) {
            Ok(())
        } else {
            Err(ActionError::Unsupported { kind: self.kind, capability })
        }
    }

    /// Full fetch. Does not need a session.
    pub async fn load(&self, session: Option<&Session>) -> ActionResult<Patch> {
        self.ensure(Capability::List)?;
        let items = self.gateway.list(self.kind, session.map(|s| &s.token)).await?;
        log::info!("Loaded {} {} items", items.len(), self.kind.label());
        Ok(Patch::ReplaceAll(items))
    }

    pub async fn create(&self, session: Option<&Session>, draft: &ItemDraft) -> ActionResult<Patch> {
        self.ensure(Capability::Create)?;
        let session = require_session(session)?;
        validate_draft(self.kind, draft)?;
        let created = self
            .gateway
            .create(self.kind, session.user_id(), draft, &session.token)
            .await?;
        log::info!("Created {} {}", self.kind.noun(), created.id);
        Ok(Patch::Prepend(created))
    }

    pub async fn update(&self, session: Option<&Session>, id: &Id, draft: &ItemDraft) -> ActionResult<Patch> {
        self.ensure(Capability::Update)?;
        let session = require_session(session)?;
        validate_draft(self.kind, draft)?;
        let updated = self
            .gateway
            .update(self.kind, id, session.user_id(), draft, &session.token)
            .await?;
        Ok(Patch::Replace(updated))
    }

    /// Delete after the user confirmed it
    pub async fn delete(&self, session: Option<&Session>, id: &Id) -> ActionResult<Patch> {
        self.ensure(Capability::Delete)?;
        let session = require_session(session)?;
        self.gateway
            .delete(self.kind, id, session.user_id(), &session.token)
            .await?;
        log::info!("Deleted {} {}", self.kind.noun(), id);
        Ok(Patch::Remove(id.clone()))
    }

    /// Like when the viewer has not liked `item` yet, unlike otherwise
    pub async fn toggle_like(&self, session: Option<&Session>, item: &Item) -> ActionResult<Patch> {
        self.ensure(Capability::Like)?;
        let session = require_session(session)?;
        let user_id = session.user_id();

        if item.is_liked_by(user_id) {
            self.gateway
                .remove_like(self.kind, &item.id, user_id, &session.token)
                .await?;
            match self.policy {
                ReconcilePolicy::Legacy => Ok(Patch::RemoveLike {
                    item_id: item.id.clone(),
                    user_id: user_id.to_string(),
                }),
                ReconcilePolicy::ServerAuthoritative => self.refetch(session, &item.id).await,
            }
        } else {
            let like = Like::from_viewer(&session.viewer);
            let updated = self.gateway.add_like(self.kind, &item.id, &like, &session.token).await?;
            Ok(Patch::Replace(updated))
        }
    }

    pub async fn add_comment(&self, session: Option<&Session>, item_id: &Id, content: &str) -> ActionResult<Patch> {
        self.ensure(Capability::Comment)?;
        let session = require_session(session)?;
        let content = validate_comment(content)?;
        let draft = CommentDraft::new(&session.viewer, content);
        let updated = self
            .gateway
            .add_comment(self.kind, item_id, &draft, &session.token)
            .await?;
        Ok(Patch::Replace(updated))
    }

    pub async fn update_comment(
        &self,
        session: Option<&Session>,
        item_id: &Id,
        comment_id: &Id,
        content: &str,
    ) -> ActionResult<Patch> {
        self.ensure(Capability::Comment)?;
        let session = require_session(session)?;
        let content = validate_comment(content)?;
        let draft = CommentDraft::new(&session.viewer, content);
        self.gateway
            .update_comment(self.kind, item_id, comment_id, &draft, &session.token)
            .await?;
        match self.policy {
            ReconcilePolicy::Legacy => Ok(Patch::EditComment {
                item_id: item_id.clone(),
                comment_id: comment_id.clone(),
                content: content.to_string(),
                at: Utc::now(),
            }),
            ReconcilePolicy::ServerAuthoritative => self.refetch(session, item_id).await,
        }
    }

    pub async fn delete_comment(&self, session: Option<&Session>, item_id: &Id, comment_id: &Id) -> ActionResult<Patch> {
        self.ensure(Capability::Comment)?;
        let session = require_session(session)?;
        self.gateway
            .delete_comment(self.kind, item_id, comment_id, session.user_id(), &session.token)
            .await?;
        match self.policy {
            ReconcilePolicy::Legacy => Ok(Patch::RemoveComment {
                item_id: item_id.clone(),
                comment_id: comment_id.clone(),
            }),
            ReconcilePolicy::ServerAuthoritative => self.refetch(session, item_id).await,
        }
    }

    /// Register the viewer for an event
    pub async fn register(&self, session: Option<&Session>, item_id: &Id) -> ActionResult<Patch> {
        self.ensure(Capability::Register)?;
        let session = require_session(session)?;
        self.gateway
            .register(self.kind, item_id, session.user_id(), &session.token)
            .await?;
        log::info!("Registered {} for {} {}", session.user_id(), self.kind.noun(), item_id);
        self.refetch(session, item_id).await
    }

    /// Re-list the collection and pick out `id`
    async fn refetch(&self, session: &Session, id: &Id) -> ActionResult<Patch> {
        let items = self.gateway.list(self.kind, Some(&session.token)).await?;
        Ok(match items.into_iter().find(|item| &item.id == id) {
            Some(item) => Patch::Replace(item),
            None => Patch::Remove(id.clone()),
        })
    }
}

fn require_session(session: Option<&Session>) -> ActionResult<&Session> {
    session.ok_or(ActionError::AuthRequired)
}

/// Check the kind's required fields
pub fn validate_draft(kind: FeatureKind, draft: &ItemDraft) -> ActionResult<()> {
    match kind.required_fields().iter().find(|field| !draft.has(**field)) {
        Some(field) => Err(ActionError::Validation { field: *field }),
        None => Ok(()),
    }
}

/// Trimmed comment text, rejected when blank
pub fn validate_comment(content: &str) -> ActionResult<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        Err(ActionError::Validation { field: DraftField::Extra("Comment") })
    } else {
        Ok(trimmed)
    }
}

/// Apply a successful outcome to `store`, or turn the failure into exactly
/// one notification and leave `store` untouched. Returns whether the action
/// succeeded.
pub fn settle(
    outcome: ActionResult<Patch>,
    store: &mut CollectionStore<Item>,
    notices: &mut Notices,
    success_message: Option<&str>,
) -> bool {
    match outcome {
        Ok(patch) => {
            patch.apply(store);
            if let Some(message) = success_message {
                notices.success(message);
            }
            true
        }
        Err(err) => {
            log::warn!("Action failed: {}", err);
            notices.error(err.user_message());
            false
        }
    }
}
