//! Confirmation modal state machine
//!
//! `Closed` -> `Open` via [`ConfirmModal::open`]; back to `Closed` via
//! cancel, backdrop click, or confirm (which runs the captured callback
//! first). Opening while open overwrites the previous request.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Render the confirm button as destructive
    pub danger: bool,
}

impl ModalConfig {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            danger: false,
        }
    }

    /// Standard config for deleting a `noun`
    pub fn delete(noun: &str) -> Self {
        Self {
            title: format!("Delete {}", noun),
            message: format!("Are you sure you want to delete this {}? This cannot be undone.", noun),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
            danger: true,
        }
    }

    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

enum ModalState<C> {
    Closed,
    Open { config: ModalConfig, on_confirm: C },
}

pub struct ConfirmModal<C = Box<dyn FnOnce()>> {
    state: ModalState<C>,
}

impl<C> Default for ConfirmModal<C> {
    fn default() -> Self {
        Self { state: ModalState::Closed }
    }
}

impl<C> ConfirmModal<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, config: ModalConfig, on_confirm: C) {
        if self.is_open() {
            log::debug!("Replacing open confirmation: {}", config.title);
        }
        self.state = ModalState::Open { config, on_confirm };
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn config(&self) -> Option<&ModalConfig> {
        match &self.state {
            ModalState::Open { config, .. } => Some(config),
            ModalState::Closed => None,
        }
    }

    /// Close without running the callback
    pub fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }

    pub fn backdrop_click(&mut self) {
        self.cancel();
    }

    /// Close and hand back the callback, if open
    pub fn take_confirm(&mut self) -> Option<C> {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open { on_confirm, .. } => Some(on_confirm),
            ModalState::Closed => None,
        }
    }
}

impl<C: FnOnce()> ConfirmModal<C> {
    /// Run the captured callback, then close. Returns false when closed.
    pub fn confirm(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open { on_confirm, .. } => {
                on_confirm();
                true
            }
            ModalState::Closed => false,
        }
    }
}
