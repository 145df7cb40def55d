//! Application Context
//!
//! Session, notifications and the shared confirm modal, provided via the
//! Leptos Context API. The session is passed explicitly into every
//! reconciler call from here.

use leptos::prelude::*;

use learnhub_core::modal::{ConfirmModal, ModalConfig};
use learnhub_core::notify::Notices;
use learnhub_core::{ClientConfig, Session, Viewer};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in user, `None` when signed out
    pub session: RwSignal<Option<Session>>,
    /// Visible toasts
    pub notices: RwSignal<Notices>,
    /// The single confirm dialog; callbacks are not `Send`
    pub modal: RwSignal<ConfirmModal, LocalStorage>,
    config: StoredValue<ClientConfig>,
}

impl AppContext {
    pub fn new(config: ClientConfig, session: Option<Session>) -> Self {
        Self {
            session: RwSignal::new(session),
            notices: RwSignal::new(Notices::new()),
            modal: RwSignal::new_local(ConfirmModal::new()),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> ClientConfig {
        self.config.get_value()
    }

    /// Current viewer, tracked
    pub fn viewer(&self) -> Option<Viewer> {
        self.session.with(|s| s.as_ref().map(|s| s.viewer.clone()))
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.notices.update(|n| {
            n.error(message);
        });
    }

    /// Ask for confirmation; `on_confirm` runs only if the user confirms
    pub fn confirm(&self, config: ModalConfig, on_confirm: impl FnOnce() + 'static) {
        self.modal.update(|m| m.open(config, Box::new(on_confirm)));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
