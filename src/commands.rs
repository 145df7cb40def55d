//! Feed Commands
//!
//! Binds a feature page to its reconciler and runs user actions on the
//! browser event loop: call the gateway, then settle the outcome into the
//! page store and the toasts.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use learnhub_core::error::ActionResult;
use learnhub_core::gateway::HttpGateway;
use learnhub_core::{ClientConfig, FeatureKind, Patch, Reconciler, Session};

use crate::context::AppContext;
use crate::store::{store_set_loading, store_settle, FeedState, FeedStore};

pub type FeedReconciler = Rc<Reconciler<HttpGateway>>;

/// Per-page handle provided via context to cards and forms
#[derive(Clone, Copy)]
pub struct FeedHandle {
    pub kind: FeatureKind,
    pub state: FeedStore,
    reconciler: StoredValue<FeedReconciler, LocalStorage>,
}

impl FeedHandle {
    pub fn new(kind: FeatureKind, config: &ClientConfig) -> Self {
        let gateway = HttpGateway::new(config.api_base_url.clone());
        let reconciler = Reconciler::new(gateway, kind).with_policy(config.policy);
        Self {
            kind,
            state: FeedStore::new(FeedState::default()),
            reconciler: StoredValue::new_local(Rc::new(reconciler)),
        }
    }

    /// Run `action` with the current session and settle its outcome.
    /// `on_done` receives whether it succeeded.
    pub fn run<F, Fut>(&self, ctx: AppContext, success: Option<String>, action: F, on_done: impl FnOnce(bool) + 'static)
    where
        F: FnOnce(FeedReconciler, Option<Session>) -> Fut + 'static,
        Fut: Future<Output = ActionResult<Patch>> + 'static,
    {
        let session = ctx.session.get_untracked();
        let reconciler = self.reconciler.get_value();
        let state = self.state;
        spawn_local(async move {
            let outcome = action(reconciler, session).await;
            let ok = store_settle(&state, ctx.notices, outcome, success.as_deref());
            on_done(ok);
        });
    }

    /// Full fetch into the page store
    pub fn load(&self, ctx: AppContext) {
        let state = self.state;
        store_set_loading(&state, true);
        self.run(
            ctx,
            None,
            |reconciler, session| async move { reconciler.load(session.as_ref()).await },
            move |_| store_set_loading(&state, false),
        );
    }
}

/// Get the feed handle of the enclosing page
pub fn use_feed() -> FeedHandle {
    expect_context::<FeedHandle>()
}
