//! Confirm Dialog Component
//!
//! Renders the shared confirm modal while it is open.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.modal.with(|m| m.config().cloned()).map(|config| {
            let confirm_class = if config.danger { "confirm-btn danger" } else { "confirm-btn" };
            view! {
                <div class="modal-backdrop" on:click=move |_| ctx.modal.update(|m| m.backdrop_click())>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <h3>{config.title}</h3>
                        <p>{config.message}</p>
                        <div class="modal-actions">
                            <button
                                class="cancel-btn"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    ctx.modal.update(|m| m.cancel());
                                }
                            >
                                {config.cancel_label}
                            </button>
                            <button
                                class=confirm_class
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    // Close first, then run outside the signal borrow
                                    if let Some(on_confirm) = ctx.modal.try_update(|m| m.take_confirm()).flatten() {
                                        on_confirm();
                                    }
                                }
                            >
                                {config.confirm_label}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
