//! Post Card Component
//!
//! A single item: author, content, feature fields, like button, comments,
//! and owner actions. Re-rendered only when its item is replaced in the
//! store.

use std::sync::Arc;

use leptos::prelude::*;

use learnhub_core::domain::Capability;
use learnhub_core::modal::ModalConfig;
use learnhub_core::Item;

use crate::commands::use_feed;
use crate::components::{CommentSection, PostForm};
use crate::context::use_app_context;
use crate::display::{capitalize, format_timestamp, initials, like_label, was_edited};

#[component]
pub fn PostCard(item: Arc<Item>) -> impl IntoView {
    let ctx = use_app_context();
    let feed = use_feed();
    let kind = feed.kind;

    let viewer = ctx.session.with_untracked(|s| s.as_ref().map(|s| s.viewer.clone()));
    let is_owner = viewer.as_ref().map(|v| item.is_owned_by(v)).unwrap_or(false);
    let liked = viewer.as_ref().map(|v| item.is_liked_by(&v.user_id)).unwrap_or(false);
    let registered = viewer
        .as_ref()
        .map(|v| item.field_text("attendees").map(|a| a.split(", ").any(|u| u == v.user_id)).unwrap_or(false))
        .unwrap_or(false);
    let (editing, set_editing) = signal(false);

    let on_like = {
        let item = item.clone();
        move |_: web_sys::MouseEvent| {
            let item = item.clone();
            feed.run(
                ctx,
                None,
                move |reconciler, session| async move { reconciler.toggle_like(session.as_ref(), &item).await },
                |_| (),
            );
        }
    };

    let on_delete = {
        let id = item.id.clone();
        move |_: web_sys::MouseEvent| {
            let id = id.clone();
            ctx.confirm(ModalConfig::delete(kind.noun()), move || {
                feed.run(
                    ctx,
                    Some(format!("{} deleted", capitalize(kind.noun()))),
                    move |reconciler, session| async move { reconciler.delete(session.as_ref(), &id).await },
                    |_| (),
                );
            });
        }
    };

    let on_register = {
        let id = item.id.clone();
        move |_: web_sys::MouseEvent| {
            let id = id.clone();
            feed.run(
                ctx,
                Some("You're registered".to_string()),
                move |reconciler, session| async move { reconciler.register(session.as_ref(), &id).await },
                |_| (),
            );
        }
    };

    let fields = kind
        .extra_fields()
        .iter()
        .filter_map(|(name, label)| item.field_text(name).map(|value| (*label, value)))
        .map(|(label, value)| {
            view! {
                <div class="post-field">
                    <span class="field-label">{label}</span>
                    <span class="field-value">{value}</span>
                </div>
            }
        })
        .collect_view();

    let edited = was_edited(item.created_at, item.updated_at);
    let like_count = item.likes.len();
    let edit_item = item.clone();

    view! {
        <article class="post-card">
            <header class="post-header">
                <span class="avatar">{initials(&item.user_name)}</span>
                <div class="post-meta">
                    <span class="post-author">{item.user_name.clone()}</span>
                    <span class="post-time">
                        {format_timestamp(item.created_at)}
                        {edited.then_some(" (edited)")}
                    </span>
                </div>
                {is_owner.then(|| view! {
                    <span class="owner-actions">
                        <button class="edit-btn" on:click=move |_| set_editing.set(true)>"Edit"</button>
                        <button class="delete-btn" on:click=on_delete.clone()>"Delete"</button>
                    </span>
                })}
            </header>

            <Show
                when=move || editing.get()
                fallback={
                    let item = item.clone();
                    move || view! {
                        <h3 class="post-title">{item.title.clone()}</h3>
                        <p class="post-description">{item.description.clone()}</p>
                    }
                }
            >
                <PostForm
                    kind=kind
                    editing=edit_item.clone()
                    on_done=move |_| set_editing.set(false)
                />
            </Show>

            <div class="post-fields">{fields}</div>

            <footer class="post-actions">
                {kind.supports(Capability::Like).then(|| view! {
                    <button
                        class={if liked { "like-btn liked" } else { "like-btn" }}
                        on:click=on_like.clone()
                    >
                        {if liked { "♥ " } else { "♡ " }}
                        {like_label(like_count)}
                    </button>
                })}
                {kind.supports(Capability::Register).then(|| view! {
                    <button class="register-btn" disabled=registered on:click=on_register.clone()>
                        {if registered { "Registered" } else { "Register" }}
                    </button>
                })}
            </footer>

            {kind.supports(Capability::Comment).then(|| view! { <CommentSection item=item.clone() /> })}
        </article>
    }
}
