//! Comment Section Component
//!
//! Comment list of one card with add, inline edit and delete for the
//! viewer's own comments.

use std::sync::Arc;

use leptos::prelude::*;

use learnhub_core::form::SubmitLatch;
use learnhub_core::{Comment, Id, Item};

use crate::commands::use_feed;
use crate::context::use_app_context;
use crate::display::{comment_label, format_timestamp, was_edited};

#[component]
pub fn CommentSection(item: Arc<Item>) -> impl IntoView {
    let ctx = use_app_context();
    let feed = use_feed();
    let item_id = item.id.clone();

    let (new_text, set_new_text) = signal(String::new());
    let latch = RwSignal::new(SubmitLatch::default());

    let add_comment = {
        let item_id = item_id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if !latch.try_update(|l| l.try_begin()).unwrap_or(false) {
                return;
            }
            let content = new_text.get_untracked();
            let item_id = item_id.clone();
            feed.run(
                ctx,
                None,
                move |reconciler, session| async move {
                    reconciler.add_comment(session.as_ref(), &item_id, &content).await
                },
                move |ok| {
                    latch.update(|l| l.finish());
                    if ok {
                        set_new_text.set(String::new());
                    }
                },
            );
        }
    };

    let comments = item
        .comments
        .iter()
        .cloned()
        .map(|comment| view! { <CommentRow item_id=item_id.clone() comment=comment /> })
        .collect_view();

    view! {
        <div class="comments">
            <p class="comment-count">{comment_label(item.comments.len())}</p>
            {comments}
            <Show when=move || ctx.session.with(|s| s.is_some())>
                <form class="comment-form" on:submit=add_comment.clone()>
                    <input
                        type="text"
                        placeholder="Write a comment..."
                        prop:value=move || new_text.get()
                        on:input=move |ev| set_new_text.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || latch.with(|l| l.is_submitting())>
                        "Comment"
                    </button>
                </form>
            </Show>
        </div>
    }
}

#[component]
fn CommentRow(item_id: Id, comment: Comment) -> impl IntoView {
    let ctx = use_app_context();
    let feed = use_feed();

    let is_author = ctx
        .session
        .with_untracked(|s| s.as_ref().map(|s| comment.is_authored_by(&s.viewer)))
        .unwrap_or(false);
    let (editing, set_editing) = signal(false);
    let (edit_text, set_edit_text) = signal(comment.content.clone());
    let latch = RwSignal::new(SubmitLatch::default());
    let edited = was_edited(comment.created_at, comment.updated_at);

    let save = {
        let item_id = item_id.clone();
        let comment_id = comment.id.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if !latch.try_update(|l| l.try_begin()).unwrap_or(false) {
                return;
            }
            let content = edit_text.get_untracked();
            let item_id = item_id.clone();
            let comment_id = comment_id.clone();
            feed.run(
                ctx,
                None,
                move |reconciler, session| async move {
                    reconciler
                        .update_comment(session.as_ref(), &item_id, &comment_id, &content)
                        .await
                },
                move |ok| {
                    latch.update(|l| l.finish());
                    if ok {
                        set_editing.set(false);
                    }
                },
            );
        }
    };

    let delete = {
        let item_id = item_id.clone();
        let comment_id = comment.id.clone();
        move |_: web_sys::MouseEvent| {
            let item_id = item_id.clone();
            let comment_id = comment_id.clone();
            feed.run(
                ctx,
                Some("Comment deleted".to_string()),
                move |reconciler, session| async move {
                    reconciler
                        .delete_comment(session.as_ref(), &item_id, &comment_id)
                        .await
                },
                |_| (),
            );
        }
    };

    let content = comment.content.clone();
    view! {
        <div class="comment">
            <span class="comment-author">{comment.user_name.clone()}</span>
            <span class="comment-time">
                {format_timestamp(comment.created_at)}
                {edited.then_some(" (edited)")}
            </span>
            {move || {
                if editing.get() {
                    view! {
                        <form class="comment-edit" on:submit=save.clone()>
                            <input
                                type="text"
                                prop:value=move || edit_text.get()
                                on:input=move |ev| set_edit_text.set(event_target_value(&ev))
                            />
                            <button type="submit" disabled=move || latch.with(|l| l.is_submitting())>
                                "Save"
                            </button>
                            <button type="button" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                        </form>
                    }
                        .into_any()
                } else {
                    view! { <p class="comment-content">{content.clone()}</p> }.into_any()
                }
            }}
            {is_author.then(|| view! {
                <span class="comment-actions">
                    <button class="edit-btn" on:click=move |_| set_editing.set(true)>"Edit"</button>
                    <button class="delete-btn" on:click=delete.clone()>"Delete"</button>
                </span>
            })}
        </div>
    }
}
