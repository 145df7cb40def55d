//! Notification Bar Component
//!
//! Toasts for action results. Each toast dismisses itself after a few
//! seconds or on click.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

const TOAST_MS: u32 = 4_000;

#[component]
pub fn NotificationBar() -> impl IntoView {
    let ctx = use_app_context();

    // One timer per pushed toast; dismissals never reschedule
    let scheduled = StoredValue::new(0u64);
    Effect::new(move |_| {
        let fresh: Vec<u64> = ctx.notices.with(|n| n.pushed_after(scheduled.get_value()).collect());
        for id in fresh {
            scheduled.set_value(id);
            spawn_local(async move {
                TimeoutFuture::new(TOAST_MS).await;
                ctx.notices.update(|n| n.dismiss(id));
            });
        }
    });

    view! {
        <div class="toasts">
            {move || {
                ctx.notices
                    .with(|n| n.iter().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id;
                        view! {
                            <div
                                class=notice.level.css_class()
                                on:click=move |_| ctx.notices.update(|n| n.dismiss(id))
                            >
                                {notice.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
