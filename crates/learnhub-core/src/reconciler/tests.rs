//! Reconciler Tests
//!
//! Runs every action against the in-memory gateway and checks both the
//! calls made and the resulting store.

use serde_json::json;

use super::*;
use crate::domain::{AuthToken, Comment, Viewer};
use crate::error::GatewayError;
use crate::form::DraftForm;
use crate::gateway::{GatewayCall, InMemoryGateway};
use crate::modal::{ConfirmModal, ModalConfig};

fn session(user_id: &str) -> Session {
    Session::new(Viewer::new(user_id, format!("User {}", user_id)), AuthToken::new("token"))
}

fn plan(id: &str, owner: &str) -> Item {
    let mut item = Item::new(id, owner);
    item.title = format!("Plan {}", id);
    item
}

fn with_comment(mut item: Item, comment_id: &str, user_id: &str, content: &str) -> Item {
    item.comments.push(Comment {
        id: Id::from(comment_id),
        user_id: user_id.to_string(),
        user_name: String::new(),
        content: content.to_string(),
        created_at: None,
        updated_at: None,
    });
    item
}

fn setup(kind: FeatureKind, items: Vec<Item>) -> (Reconciler<InMemoryGateway>, CollectionStore<Item>) {
    let gateway = InMemoryGateway::new().with_items(kind, items.clone());
    (Reconciler::new(gateway, kind), CollectionStore::from_items(items))
}

fn current(store: &CollectionStore<Item>, id: &str) -> Item {
    store.get(&Id::from(id)).map(|item| (**item).clone()).expect("item in store")
}

#[tokio::test]
async fn test_load_replaces_store() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u1"), plan("2", "u2")]);
    store.replace_all(vec![plan("stale", "u1")]);
    let mut notices = Notices::new();

    let outcome = reconciler.load(None).await;
    assert!(settle(outcome, &mut store, &mut notices, None));

    assert_eq!(store.ids(), vec![Id::from("1"), Id::from("2")]);
    assert!(notices.is_empty());
}

#[tokio::test]
async fn test_like_scenario_uses_server_item() {
    let gateway = InMemoryGateway::new().with_items(FeatureKind::LearningPlans, vec![Item::new(1u64, "owner")]);
    let reconciler = Reconciler::new(gateway, FeatureKind::LearningPlans);
    let mut store = CollectionStore::from_items(vec![serde_json::from_value::<Item>(json!({"id": 1, "likes": []})).unwrap()]);
    let mut notices = Notices::new();
    let viewer = session("u1");

    let item = current(&store, "1");
    let outcome = reconciler.toggle_like(Some(&viewer), &item).await;
    assert!(settle(outcome, &mut store, &mut notices, None));

    let liked = current(&store, "1");
    assert_eq!(liked.likes.len(), 1);
    assert_eq!(liked.likes[0].user_id, "u1");
    assert_eq!(reconciler.gateway().calls(), vec![GatewayCall::AddLike(FeatureKind::LearningPlans, Id::from("1"))]);
}

#[tokio::test]
async fn test_like_toggle_twice_restores_membership() {
    let mut original = plan("1", "owner");
    original.likes.push(Like { user_id: "u2".into(), user_name: "Bob".into() });
    let (reconciler, mut store) = setup(FeatureKind::SkillSharing, vec![original.clone()]);
    let mut notices = Notices::new();
    let viewer = session("u1");

    for _ in 0..2 {
        let item = current(&store, "1");
        let outcome = reconciler.toggle_like(Some(&viewer), &item).await;
        assert!(settle(outcome, &mut store, &mut notices, None));
    }

    let after = current(&store, "1");
    let users: Vec<&str> = after.likes.iter().map(|l| l.user_id.as_str()).collect();
    assert_eq!(users, vec!["u2"]);
    assert_eq!(
        reconciler.gateway().calls(),
        vec![
            GatewayCall::AddLike(FeatureKind::SkillSharing, Id::from("1")),
            GatewayCall::RemoveLike(FeatureKind::SkillSharing, Id::from("1")),
        ]
    );
}

#[tokio::test]
async fn test_unlike_is_local_under_legacy_policy() {
    let mut item = plan("1", "owner");
    item.likes.push(Like { user_id: "u1".into(), user_name: String::new() });
    let (reconciler, store) = setup(FeatureKind::LearningPlans, vec![item]);

    let patch = reconciler.toggle_like(Some(&session("u1")), &current(&store, "1")).await.unwrap();
    assert_eq!(
        patch,
        Patch::RemoveLike { item_id: Id::from("1"), user_id: "u1".into() }
    );
    assert_eq!(reconciler.gateway().call_count(), 1);
}

#[tokio::test]
async fn test_unlike_refetches_under_server_policy() {
    let mut item = plan("1", "owner");
    item.likes.push(Like { user_id: "u1".into(), user_name: String::new() });
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![item]);
    let reconciler = reconciler.with_policy(ReconcilePolicy::ServerAuthoritative);
    let mut notices = Notices::new();

    let outcome = reconciler.toggle_like(Some(&session("u1")), &current(&store, "1")).await;
    assert!(matches!(outcome, Ok(Patch::Replace(_))));
    settle(outcome, &mut store, &mut notices, None);

    assert!(current(&store, "1").likes.is_empty());
    assert_eq!(
        reconciler.gateway().calls().last(),
        Some(&GatewayCall::List(FeatureKind::LearningPlans))
    );
}

#[tokio::test]
async fn test_add_comment_takes_server_ids() {
    let (reconciler, mut store) = setup(FeatureKind::Events, vec![plan("1", "owner")]);
    let mut notices = Notices::new();

    let outcome = reconciler.add_comment(Some(&session("u1")), &Id::from("1"), "  see you there ").await;
    assert!(settle(outcome, &mut store, &mut notices, None));

    let item = current(&store, "1");
    assert_eq!(item.comments.len(), 1);
    assert_eq!(item.comments[0].content, "see you there");
    assert!(item.comments[0].id.as_str().starts_with("comment-"));
    assert!(item.comments[0].created_at.is_some());
}

#[tokio::test]
async fn test_blank_comment_is_rejected_locally() {
    let (reconciler, mut store) = setup(FeatureKind::Events, vec![plan("1", "owner")]);
    let mut notices = Notices::new();

    let outcome = reconciler.add_comment(Some(&session("u1")), &Id::from("1"), "   ").await;
    assert!(matches!(outcome, Err(ActionError::Validation { .. })));
    assert!(!settle(outcome, &mut store, &mut notices, None));
    assert_eq!(reconciler.gateway().call_count(), 0);
    assert_eq!(notices.len(), 1);
}

#[tokio::test]
async fn test_edit_comment_patches_locally() {
    let item = with_comment(plan("1", "owner"), "c1", "u1", "first");
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![item]);
    let mut notices = Notices::new();

    let outcome = reconciler
        .update_comment(Some(&session("u1")), &Id::from("1"), &Id::from("c1"), "edited")
        .await;
    assert!(matches!(outcome, Ok(Patch::EditComment { .. })));
    assert!(settle(outcome, &mut store, &mut notices, None));

    let item = current(&store, "1");
    assert_eq!(item.comments[0].content, "edited");
    assert!(item.comments[0].updated_at.is_some());
    assert_eq!(reconciler.gateway().call_count(), 1);
}

#[tokio::test]
async fn test_deleted_comment_never_reappears() {
    let item = with_comment(with_comment(plan("1", "owner"), "c1", "u1", "a"), "c2", "u2", "b");
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![item]);
    let mut notices = Notices::new();

    let outcome = reconciler
        .delete_comment(Some(&session("u1")), &Id::from("1"), &Id::from("c1"))
        .await;
    assert!(settle(outcome, &mut store, &mut notices, None));

    let ids: Vec<Id> = current(&store, "1").comments.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![Id::from("c2")]);

    // a later full fetch agrees with the local patch
    let outcome = reconciler.load(Some(&session("u1"))).await;
    settle(outcome, &mut store, &mut notices, None);
    assert!(current(&store, "1").comment(&Id::from("c1")).is_none());
}

#[tokio::test]
async fn test_mutations_without_session_make_no_calls() {
    let item = with_comment(plan("1", "owner"), "c1", "owner", "a");
    let (reconciler, mut store) = setup(FeatureKind::Events, vec![item.clone()]);
    let snapshot = store.clone();
    let id = Id::from("1");
    let cid = Id::from("c1");
    let draft = ItemDraft::new("t", "d").with_field("eventDate", "2024-06-01");

    let outcomes = vec![
        reconciler.create(None, &draft).await,
        reconciler.update(None, &id, &draft).await,
        reconciler.delete(None, &id).await,
        reconciler.toggle_like(None, &item).await,
        reconciler.add_comment(None, &id, "hi").await,
        reconciler.update_comment(None, &id, &cid, "hi").await,
        reconciler.delete_comment(None, &id, &cid).await,
        reconciler.register(None, &id).await,
    ];

    for outcome in outcomes {
        assert_eq!(outcome.as_ref().err(), Some(&ActionError::AuthRequired));
        let mut notices = Notices::new();
        assert!(!settle(outcome, &mut store, &mut notices, Some("done")));
        assert_eq!(notices.len(), 1);
    }
    assert_eq!(reconciler.gateway().call_count(), 0);
    assert_eq!(store, snapshot);
}

#[tokio::test]
async fn test_create_with_empty_title_keeps_form() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![]);
    let mut notices = Notices::new();
    let mut form = DraftForm::new(FeatureKind::LearningPlans);
    form.description = "Some notes".into();
    form.set_field("topics", "rust");

    assert!(form.latch.try_begin());
    let outcome = reconciler.create(Some(&session("u1")), &form.to_draft()).await;
    form.latch.finish();

    assert_eq!(outcome.as_ref().err(), Some(&ActionError::Validation { field: DraftField::Title }));
    assert!(!settle(outcome, &mut store, &mut notices, Some("Created")));
    assert_eq!(reconciler.gateway().call_count(), 0);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.latest().map(|n| n.message.as_str()), Some("Title is required."));
    assert_eq!(form.description, "Some notes");
    assert_eq!(form.field("topics"), "rust");
}

#[tokio::test]
async fn test_create_prepends_server_item() {
    let (reconciler, mut store) = setup(FeatureKind::Resources, vec![plan("1", "u1")]);
    let mut notices = Notices::new();
    let draft = ItemDraft::new("The Book", "").with_field("url", "https://doc.rust-lang.org/book/");

    let outcome = reconciler.create(Some(&session("u1")), &draft).await;
    assert!(settle(outcome, &mut store, &mut notices, Some("Resource added")));

    let first = store.iter().next().map(|item| (**item).clone()).unwrap();
    assert_eq!(first.title, "The Book");
    assert_eq!(first.owner_id, "u1");
    assert_eq!(store.len(), 2);
    assert_eq!(notices.latest().map(|n| n.level), Some(crate::notify::Level::Success));
}

#[tokio::test]
async fn test_update_replaces_only_target() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u1"), plan("2", "u1")]);
    let untouched = store.get(&Id::from("2")).cloned().unwrap();
    let mut notices = Notices::new();

    let outcome = reconciler
        .update(Some(&session("u1")), &Id::from("1"), &ItemDraft::new("Renamed", ""))
        .await;
    assert!(settle(outcome, &mut store, &mut notices, None));

    assert_eq!(current(&store, "1").title, "Renamed");
    assert!(std::sync::Arc::ptr_eq(&untouched, store.get(&Id::from("2")).unwrap()));
}

#[tokio::test]
async fn test_delete_confirmed_removes_item() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u1"), plan("2", "u1")]);
    let mut notices = Notices::new();
    let mut modal: ConfirmModal<bool> = ConfirmModal::new();

    modal.open(ModalConfig::delete("plan"), true);
    if modal.take_confirm().unwrap_or(false) {
        let outcome = reconciler.delete(Some(&session("u1")), &Id::from("1")).await;
        assert!(settle(outcome, &mut store, &mut notices, Some("Deleted")));
    }

    assert!(!modal.is_open());
    assert_eq!(store.ids(), vec![Id::from("2")]);
    assert!(reconciler.gateway().item(FeatureKind::LearningPlans, &Id::from("1")).is_none());
}

#[tokio::test]
async fn test_delete_canceled_keeps_item() {
    let (reconciler, store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u1")]);
    let mut modal: ConfirmModal<bool> = ConfirmModal::new();

    modal.open(ModalConfig::delete("plan"), true);
    modal.cancel();
    assert_eq!(modal.take_confirm(), None);

    assert!(store.contains(&Id::from("1")));
    assert_eq!(reconciler.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_failed_delete_leaves_store_unchanged() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u1")]);
    let snapshot = store.clone();
    let mut notices = Notices::new();
    reconciler
        .gateway()
        .fail_next(GatewayError::Server { status: 500, message: "boom".into() });

    let outcome = reconciler.delete(Some(&session("u1")), &Id::from("1")).await;
    assert!(!settle(outcome, &mut store, &mut notices, Some("Deleted")));

    assert_eq!(store, snapshot);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.latest().map(|n| n.level), Some(crate::notify::Level::Error));
}

#[tokio::test]
async fn test_failed_like_leaves_store_unchanged() {
    let (reconciler, mut store) = setup(FeatureKind::SkillSharing, vec![plan("1", "u2")]);
    let snapshot = store.clone();
    let mut notices = Notices::new();
    reconciler.gateway().fail_next(GatewayError::Network("offline".into()));

    let outcome = reconciler.toggle_like(Some(&session("u1")), &current(&store, "1")).await;
    assert!(!settle(outcome, &mut store, &mut notices, None));
    assert_eq!(store, snapshot);
    assert!(notices.latest().unwrap().message.contains("connection"));
}

#[tokio::test]
async fn test_unsupported_capability() {
    let (reconciler, store) = setup(FeatureKind::Resources, vec![plan("1", "u1")]);
    let outcome = reconciler.toggle_like(Some(&session("u1")), &current(&store, "1")).await;
    assert!(matches!(outcome, Err(ActionError::Unsupported { capability: Capability::Like, .. })));
    assert_eq!(reconciler.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_register_refetches_event() {
    let mut event = plan("e1", "owner");
    event.fields.insert("eventDate".into(), json!("2024-06-01"));
    let (reconciler, mut store) = setup(FeatureKind::Events, vec![event]);
    let mut notices = Notices::new();

    let outcome = reconciler.register(Some(&session("u1")), &Id::from("e1")).await;
    assert!(settle(outcome, &mut store, &mut notices, Some("Registered")));

    assert_eq!(current(&store, "e1").fields.get("attendees"), Some(&json!(["u1"])));
    assert_eq!(reconciler.gateway().registrations(), vec![(Id::from("e1"), "u1".to_string())]);
}

#[tokio::test]
async fn test_patch_for_removed_item_is_dropped() {
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![plan("1", "u2")]);
    let item = current(&store, "1");

    let outcome = reconciler.toggle_like(Some(&session("u1")), &item).await;
    // the item disappears while the like is in flight
    store.remove_by_id(&Id::from("1"));
    let patch = outcome.unwrap();
    assert!(!patch.apply(&mut store));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_comment_edit_and_delete_refetch_under_server_policy() {
    let item = with_comment(with_comment(plan("1", "owner"), "c1", "u1", "first"), "c2", "u1", "second");
    let (reconciler, mut store) = setup(FeatureKind::LearningPlans, vec![item]);
    let reconciler = reconciler.with_policy(ReconcilePolicy::ServerAuthoritative);
    let mut notices = Notices::new();
    let viewer = session("u1");

    let outcome = reconciler
        .update_comment(Some(&viewer), &Id::from("1"), &Id::from("c1"), "edited")
        .await;
    assert!(matches!(outcome, Ok(Patch::Replace(_))));
    assert!(settle(outcome, &mut store, &mut notices, None));

    let outcome = reconciler
        .delete_comment(Some(&viewer), &Id::from("1"), &Id::from("c2"))
        .await;
    assert!(matches!(outcome, Ok(Patch::Replace(_))));
    assert!(settle(outcome, &mut store, &mut notices, None));

    let comments: Vec<(Id, String)> = current(&store, "1")
        .comments
        .iter()
        .map(|c| (c.id.clone(), c.content.clone()))
        .collect();
    assert_eq!(comments, vec![(Id::from("c1"), "edited".to_string())]);
    assert_eq!(
        reconciler.gateway().calls(),
        vec![
            GatewayCall::UpdateComment(FeatureKind::LearningPlans, Id::from("1"), Id::from("c1")),
            GatewayCall::List(FeatureKind::LearningPlans),
            GatewayCall::DeleteComment(FeatureKind::LearningPlans, Id::from("1"), Id::from("c2")),
            GatewayCall::List(FeatureKind::LearningPlans),
        ]
    );
}

#[tokio::test]
async fn test_refetch_without_item_removes_it() {
    let mut item = plan("1", "owner");
    item.likes.push(Like { user_id: "u1".into(), user_name: String::new() });
    let (reconciler, mut store) = setup(FeatureKind::SkillSharing, vec![item, plan("2", "owner")]);
    let reconciler = reconciler.with_policy(ReconcilePolicy::ServerAuthoritative);
    let mut notices = Notices::new();
    reconciler
        .gateway()
        .remove_before_next_list(FeatureKind::SkillSharing, Id::from("1"));

    let outcome = reconciler.toggle_like(Some(&session("u1")), &current(&store, "1")).await;
    assert_eq!(outcome.as_ref().ok(), Some(&Patch::Remove(Id::from("1"))));
    assert!(settle(outcome, &mut store, &mut notices, None));

    assert_eq!(store.ids(), vec![Id::from("2")]);
}

#[tokio::test]
async fn test_failed_refetch_leaves_store_unchanged() {
    let item = with_comment(plan("1", "owner"), "c1", "u1", "first");
    let (reconciler, mut store) = setup(FeatureKind::Events, vec![item]);
    let reconciler = reconciler.with_policy(ReconcilePolicy::ServerAuthoritative);
    let snapshot = store.clone();
    let mut notices = Notices::new();
    reconciler.gateway().fail_next_list(GatewayError::Network("offline".into()));

    let outcome = reconciler
        .delete_comment(Some(&session("u1")), &Id::from("1"), &Id::from("c1"))
        .await;
    assert!(matches!(outcome, Err(ActionError::Gateway(GatewayError::Network(_)))));
    assert!(!settle(outcome, &mut store, &mut notices, Some("Comment deleted")));

    // the server took the delete; only the follow-up fetch failed
    assert!(reconciler
        .gateway()
        .item(FeatureKind::Events, &Id::from("1"))
        .is_some_and(|item| item.comments.is_empty()));
    assert_eq!(store, snapshot);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.latest().map(|n| n.level), Some(crate::notify::Level::Error));
}
