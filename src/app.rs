//! LearnHub Frontend App
//!
//! Feature tabs over one feed page at a time, plus the shared toasts and
//! confirm dialog.

use leptos::prelude::*;

use learnhub_core::{ClientConfig, FeatureKind};

use crate::components::{ConfirmDialog, FeedPage, NotificationBar, TabBar};
use crate::context::{use_app_context, AppContext};
use crate::session;

/// Configuration baked in at build time
pub fn load_config() -> ClientConfig {
    ClientConfig::default().with_api_base_url(option_env!("LEARNHUB_API_URL"))
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let ctx = AppContext::new(config, session::load_session());
    provide_context(ctx);

    let (current, set_current) = signal(FeatureKind::SkillSharing);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"LearnHub"</h1>
                <SessionBadge />
            </header>

            <TabBar current=current set_current=set_current />

            <main class="main-content">
                // A fresh page (and store) per tab
                {move || {
                    let kind = current.get();
                    view! { <FeedPage kind=kind /> }
                }}
            </main>

            <NotificationBar />
            <ConfirmDialog />
        </div>
    }
}

/// Who is signed in, with a sign-out button
#[component]
fn SessionBadge() -> impl IntoView {
    let ctx = use_app_context();

    let sign_out = move |_| {
        session::clear_session();
        ctx.session.set(None);
        log::info!("Signed out");
    };

    move || match ctx.viewer() {
        Some(viewer) => view! {
            <div class="session-badge">
                <span>{format!("Signed in as {}", viewer.user_name)}</span>
                <button class="sign-out-btn" on:click=sign_out>"Sign out"</button>
            </div>
        }
        .into_any(),
        None => view! { <div class="session-badge signed-out">"Not signed in"</div> }.into_any(),
    }
}
