//! Feed Page Component
//!
//! One feature collection: create form on top, cards below. Owns the page
//! store and reloads it whenever the signed-in user changes.

use leptos::prelude::*;

use learnhub_core::FeatureKind;

use crate::commands::FeedHandle;
use crate::components::{PostCard, PostForm};
use crate::context::use_app_context;
use crate::store::{store_is_loading, store_items, store_len};

#[component]
pub fn FeedPage(kind: FeatureKind) -> impl IntoView {
    let ctx = use_app_context();
    let feed = FeedHandle::new(kind, &ctx.config());
    provide_context(feed);

    // Load on mount and after sign-in / sign-out
    Effect::new(move |_| {
        let _ = ctx.session.with(|s| s.as_ref().map(|s| s.user_id().to_string()));
        feed.load(ctx);
    });

    let signed_in = move || ctx.session.with(|s| s.is_some());

    view! {
        <section class="feed">
            <h2>{kind.label()}</h2>

            <Show
                when=signed_in
                fallback=move || view! {
                    <p class="signed-out-hint">{format!("Sign in to share a {}.", kind.noun())}</p>
                }
            >
                <PostForm kind=kind />
            </Show>

            <Show when=move || store_is_loading(&feed.state)>
                <p class="loading">"Loading..."</p>
            </Show>

            <Show when=move || !store_is_loading(&feed.state) && store_len(&feed.state) == 0>
                <p class="empty">{format!("No {}s yet.", kind.noun())}</p>
            </Show>

            <div class="post-list">
                // Keyed by id and allocation: only patched items re-render
                <For
                    each=move || store_items(&feed.state)
                    key=|item| (item.id.clone(), std::sync::Arc::as_ptr(item) as usize)
                    children=move |item| view! { <PostCard item=item /> }
                />
            </div>
        </section>
    }
}
