//! Feature Tab Bar Component
//!
//! Switches between the feature pages. Switching drops the old page and its
//! store; the new page fetches its collection on mount.

use leptos::prelude::*;

use learnhub_core::FeatureKind;

#[component]
pub fn TabBar(
    current: ReadSignal<FeatureKind>,
    set_current: WriteSignal<FeatureKind>,
) -> impl IntoView {
    view! {
        <nav class="feature-tab-bar">
            {FeatureKind::ALL
                .iter()
                .map(|kind| {
                    let kind = *kind;
                    let tab_class = move || {
                        if current.get() == kind { "feature-tab active" } else { "feature-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_current.set(kind)>
                            {kind.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
